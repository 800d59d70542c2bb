//! Parser definition types
//!
//! This module defines the data structures that represent a parser
//! definition file, and turns them into the actions the formatter renders.

use crate::error::{HelpError, Result};
use crate::formatter::{HelpFormatter, RenderContext, SUPPRESS};
use crate::text::StyledText;
use crate::theme::OutputFormat;
use crate::usage::{ActionDescriptor, Metavar, MutexGroup, Nargs, ParamValue};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Program name used when neither the file nor the caller names one
pub const DEFAULT_PROG: &str = "prog";

/// Top-level parser definition
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParserDefinition {
    /// Program name, substituted for `%(prog)s`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prog: Option<String>,

    /// Usage line; generated from the arguments when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Text shown between usage and the argument sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Text shown after the argument sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epilog: Option<String>,

    /// Add the `-h, --help` option
    #[serde(default = "default_true")]
    pub add_help: bool,

    /// Version string; adds a `--version` option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Arguments of the default groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDefinition>,

    /// Mutually exclusive groups of the default groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mutually_exclusive: Vec<MutexDefinition>,

    /// Titled argument groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupDefinition>,

    /// Subcommands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcommands: Option<SubcommandsDefinition>,
}

impl Default for ParserDefinition {
    fn default() -> Self {
        ParserDefinition {
            prog: None,
            usage: None,
            description: None,
            epilog: None,
            add_help: true,
            version: None,
            arguments: Vec::new(),
            mutually_exclusive: Vec::new(),
            groups: Vec::new(),
            subcommands: None,
        }
    }
}

/// One argument
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentDefinition {
    /// Option strings (`-s`, `--size`); a single string is accepted
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_flags"
    )]
    pub flags: Vec<String>,

    /// Name of a positional argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metavar: Option<Metavar>,

    /// Value count: a number or one of `?`, `*`, `+`, `...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nargs: Option<NargsDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Default value; `==SUPPRESS==` hides it from `%(default)s`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// Value type name, used by `%(type)s` and type metavars
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(default)]
    pub action: ArgumentAction,

    /// Hide from help and usage
    #[serde(default)]
    pub suppress: bool,
}

/// A value count as written in a definition file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NargsDefinition {
    Count(usize),
    Symbol(String),
}

impl NargsDefinition {
    pub fn to_nargs(&self) -> Result<Nargs> {
        match self {
            NargsDefinition::Count(count) => Ok(Nargs::Fixed(*count)),
            NargsDefinition::Symbol(symbol) => symbol.parse().map_err(HelpError::Definition),
        }
    }
}

/// What an argument does with its values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentAction {
    #[default]
    Store,
    StoreConst,
    StoreTrue,
    StoreFalse,
    Append,
    Count,
    Help,
    Version,
}

impl ArgumentAction {
    /// Whether the action consumes values
    pub fn takes_values(&self) -> bool {
        matches!(self, ArgumentAction::Store | ArgumentAction::Append)
    }
}

/// A titled argument group
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDefinition {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mutually_exclusive: Vec<MutexDefinition>,
}

/// A mutually exclusive group
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MutexDefinition {
    /// Exactly one member must be given
    #[serde(default)]
    pub required: bool,

    pub arguments: Vec<ArgumentDefinition>,
}

/// The subcommands of a parser
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SubcommandsDefinition {
    /// Heading of a separate section; without it subcommands are listed
    /// with the positional arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metavar: Option<String>,

    #[serde(default)]
    pub required: bool,

    pub commands: Vec<CommandDefinition>,
}

/// One subcommand
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Custom deserializer for flags that accepts a string or a list
fn deserialize_flags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flags {
        Single(String),
        Multiple(Vec<String>),
    }

    match Flags::deserialize(deserializer)? {
        Flags::Single(flag) => Ok(flag.split_whitespace().map(str::to_string).collect()),
        Flags::Multiple(flags) => Ok(flags),
    }
}

/// A help section and the actions listed in it
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentGroup {
    pub title: String,
    pub description: Option<String>,
    pub actions: Vec<ActionDescriptor>,
}

/// A parser ready to be formatted
#[derive(Debug, Clone, PartialEq)]
pub struct Parser {
    pub prog: String,
    pub usage: Option<String>,
    pub description: Option<String>,
    pub epilog: Option<String>,
    pub version: Option<String>,
    /// Every action in the order it appears in usage
    pub actions: Vec<ActionDescriptor>,
    pub mutex_groups: Vec<MutexGroup>,
    /// Help sections in display order
    pub groups: Vec<ArgumentGroup>,
}

/// Collects actions while a definition is walked
struct Builder {
    actions: Vec<ActionDescriptor>,
    mutex_groups: Vec<MutexGroup>,
    option_strings: HashSet<String>,
}

impl Builder {
    fn add(&mut self, action: ActionDescriptor) -> Result<ActionDescriptor> {
        for option in &action.option_strings {
            if !self.option_strings.insert(option.clone()) {
                return Err(HelpError::Definition(format!(
                    "conflicting option string: {}",
                    option
                )));
            }
        }
        self.actions.push(action.clone());
        Ok(action)
    }

    fn add_argument(&mut self, argument: &ArgumentDefinition) -> Result<ActionDescriptor> {
        let action = argument.to_action()?;
        self.add(action)
    }

    fn add_mutex(&mut self, group: &MutexDefinition) -> Result<Vec<ActionDescriptor>> {
        let index = self.mutex_groups.len();
        self.mutex_groups.push(MutexGroup {
            required: group.required,
        });

        let mut members = Vec::new();
        for argument in &group.arguments {
            let mut action = argument.to_action()?;
            if action.required {
                return Err(HelpError::Definition(format!(
                    "mutually exclusive arguments must be optional: {}",
                    action.display_name()
                )));
            }
            action.mutex_group = Some(index);
            members.push(self.add(action)?);
        }
        Ok(members)
    }
}

impl ArgumentDefinition {
    /// Build the action this argument describes
    pub fn to_action(&self) -> Result<ActionDescriptor> {
        let mut action = match (&self.name, self.flags.is_empty()) {
            (Some(_), false) => {
                return Err(HelpError::Definition(format!(
                    "argument '{}' has both a name and flags",
                    self.flags.join(", ")
                )));
            }
            (None, true) => {
                return Err(HelpError::Definition(
                    "argument needs either a name or flags".to_string(),
                ));
            }
            (Some(name), true) => ActionDescriptor::positional(name),
            (None, false) => {
                if let Some(flag) = self.flags.iter().find(|f| !f.starts_with('-')) {
                    return Err(HelpError::Definition(format!(
                        "invalid option string '{}': must start with '-'",
                        flag
                    )));
                }
                let flags: Vec<&str> = self.flags.iter().map(String::as_str).collect();
                ActionDescriptor::optional(&flags).required(self.required)
            }
        };

        if let Some(dest) = &self.dest {
            action.dest = dest.clone();
        }
        action.metavar = self.metavar.clone();
        action.choices = self.choices.clone();
        action.type_name = self.type_name.clone();
        action.help = self.help.clone();
        action.suppressed = self.suppress || self.help.as_deref() == Some(SUPPRESS);

        if self.action.takes_values() {
            if let Some(nargs) = &self.nargs {
                action.nargs = nargs.to_nargs()?;
            }
        } else {
            if action.is_positional() {
                return Err(HelpError::Definition(format!(
                    "positional '{}' cannot use a flag action",
                    action.dest
                )));
            }
            action.nargs = Nargs::Fixed(0);
        }
        if action.is_positional() {
            action.required = !matches!(action.nargs, Nargs::Optional | Nargs::ZeroOrMore);
        }

        action.default = match self.action {
            ArgumentAction::StoreTrue => Some(ParamValue::Bool(false)),
            ArgumentAction::StoreFalse => Some(ParamValue::Bool(true)),
            ArgumentAction::Help | ArgumentAction::Version => None,
            _ => Some(ParamValue::None),
        };
        match &self.default {
            Some(ParamValue::Str(value)) if value == SUPPRESS => action.default = None,
            Some(value) => action.default = Some(value.clone()),
            None => {}
        }

        if action.help.is_none() {
            action.help = match self.action {
                ArgumentAction::Help => Some("show this help message and exit".to_string()),
                ArgumentAction::Version => {
                    Some("show program's version number and exit".to_string())
                }
                _ => None,
            };
        }

        Ok(action)
    }
}

impl SubcommandsDefinition {
    /// The positional that lists the subcommands, one row per command
    pub fn to_action(&self) -> ActionDescriptor {
        let choices: Vec<&str> = self
            .commands
            .iter()
            .flat_map(|command| {
                std::iter::once(command.name.as_str())
                    .chain(command.aliases.iter().map(String::as_str))
            })
            .collect();

        let mut action = ActionDescriptor::positional(self.dest.as_deref().unwrap_or(SUPPRESS))
            .nargs(Nargs::Parser)
            .choices(&choices)
            .required(self.required);
        action.help = self.help.clone();
        if let Some(metavar) = &self.metavar {
            action = action.metavar(metavar);
        }

        for command in &self.commands {
            let label = if command.aliases.is_empty() {
                command.name.clone()
            } else {
                format!("{} ({})", command.name, command.aliases.join(", "))
            };
            let mut row = ActionDescriptor::positional(&command.name).metavar(&label);
            row.help = command.help.clone();
            action = action.subaction(row);
        }
        action
    }
}

impl ParserDefinition {
    /// Parse a definition from YAML; an empty document is a bare parser
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let is_empty = yaml
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
        if is_empty {
            return Ok(ParserDefinition::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a definition file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Build the parser. `fallback_prog` is used when the definition names
    /// no program.
    pub fn build(&self, fallback_prog: Option<&str>) -> Result<Parser> {
        let prog = self
            .prog
            .clone()
            .or_else(|| fallback_prog.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_PROG.to_string());

        let mut builder = Builder {
            actions: Vec::new(),
            mutex_groups: Vec::new(),
            option_strings: HashSet::new(),
        };
        let mut positionals = Vec::new();
        let mut optionals = Vec::new();
        let mut sort = |action: ActionDescriptor| {
            if action.is_positional() {
                positionals.push(action);
            } else {
                optionals.push(action);
            }
        };

        if self.add_help {
            sort(builder.add(ActionDescriptor::help_action())?);
        }
        if self.version.is_some() {
            sort(builder.add(ActionDescriptor::version_action())?);
        }
        for argument in &self.arguments {
            sort(builder.add_argument(argument)?);
        }
        for group in &self.mutually_exclusive {
            for member in builder.add_mutex(group)? {
                sort(member);
            }
        }

        let mut custom = Vec::new();
        for group in &self.groups {
            let mut actions = Vec::new();
            for argument in &group.arguments {
                actions.push(builder.add_argument(argument)?);
            }
            for mutex in &group.mutually_exclusive {
                actions.extend(builder.add_mutex(mutex)?);
            }
            custom.push(ArgumentGroup {
                title: group.title.clone(),
                description: group.description.clone(),
                actions,
            });
        }

        if let Some(subcommands) = &self.subcommands {
            let action = builder.add(subcommands.to_action())?;
            match &subcommands.title {
                Some(title) => custom.push(ArgumentGroup {
                    title: title.clone(),
                    description: subcommands.description.clone(),
                    actions: vec![action],
                }),
                None => sort(action),
            }
        }

        let mut groups = vec![
            ArgumentGroup {
                title: "positional arguments".to_string(),
                description: None,
                actions: positionals,
            },
            ArgumentGroup {
                title: "options".to_string(),
                description: None,
                actions: optionals,
            },
        ];
        groups.extend(custom);

        Ok(Parser {
            prog,
            usage: self.usage.clone(),
            description: self.description.clone(),
            epilog: self.epilog.clone(),
            version: self.version.clone(),
            actions: builder.actions,
            mutex_groups: builder.mutex_groups,
            groups,
        })
    }
}

impl Parser {
    /// Lay out the full help document
    pub fn format_help(&self, context: &RenderContext) -> Result<StyledText> {
        Ok(self.formatter(context)?.format_help())
    }

    /// Lay out and render the full help document
    pub fn render_help(&self, context: &RenderContext, format: OutputFormat) -> Result<String> {
        Ok(self.formatter(context)?.render(format))
    }

    /// The version string with `%(prog)s` expanded
    pub fn format_version(&self, context: &RenderContext) -> Result<Option<String>> {
        let formatter = HelpFormatter::new(self.prog.as_str(), context);
        self.version
            .as_deref()
            .map(|version| formatter.format_version(version))
            .transpose()
    }

    fn formatter<'c>(&self, context: &'c RenderContext) -> Result<HelpFormatter<'c>> {
        let mut formatter = HelpFormatter::new(self.prog.as_str(), context);

        formatter.add_usage(
            self.usage.as_deref(),
            &self.actions,
            &self.mutex_groups,
            None,
        )?;
        formatter.add_text(self.description.as_deref())?;

        for group in &self.groups {
            formatter.start_section(Some(&group.title));
            formatter.add_text(group.description.as_deref())?;
            formatter.add_arguments(&group.actions)?;
            formatter.end_section();
        }

        formatter.add_text(self.epilog.as_deref())?;
        Ok(formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(yaml: &str) -> Parser {
        ParserDefinition::from_yaml(yaml).unwrap().build(None).unwrap()
    }

    fn help(yaml: &str, width: usize) -> String {
        let context = RenderContext::default().with_width(width);
        build(yaml).format_help(&context).unwrap().plain().to_string()
    }

    #[test]
    fn test_flag_scenario() {
        let yaml = r#"
prog: PROG
arguments:
  - flags: --flag
    action: store_true
    help: Is flag?
"#;
        assert_eq!(
            help(yaml, 100),
            "Usage: PROG [-h] [--flag]\n\nOptions:\n  -h, --help  show this help message and exit\n  --flag      Is flag?\n"
        );
    }

    #[test]
    fn test_empty_definition() {
        let parser = build("");
        assert_eq!(parser.prog, DEFAULT_PROG);
        assert_eq!(parser.actions.len(), 1);
        assert_eq!(parser.actions[0].dest, "help");
    }

    #[test]
    fn test_fallback_prog() {
        let definition = ParserDefinition::default();
        let parser = definition.build(Some("demo")).unwrap();
        assert_eq!(parser.prog, "demo");
    }

    #[test]
    fn test_argument_fields() {
        let yaml = r#"
arguments:
  - flags: [-s, --size]
    nargs: 2
    type: int
    default: 3
    help: the size
  - name: files
    nargs: '*'
  - flags: --quiet
    action: store_false
"#;
        let parser = build(yaml);
        let size = &parser.actions[1];
        assert_eq!(size.dest, "size");
        assert_eq!(size.nargs, Nargs::Fixed(2));
        assert_eq!(size.type_name.as_deref(), Some("int"));
        assert_eq!(size.default, Some(ParamValue::Int(3)));

        let files = &parser.actions[2];
        assert!(files.is_positional());
        assert!(!files.required);
        assert_eq!(files.nargs, Nargs::ZeroOrMore);

        let quiet = &parser.actions[3];
        assert_eq!(quiet.nargs, Nargs::Fixed(0));
        assert_eq!(quiet.default, Some(ParamValue::Bool(true)));
    }

    #[test]
    fn test_suppressed_default() {
        let yaml = r#"
arguments:
  - flags: --level
    default: ==SUPPRESS==
"#;
        assert_eq!(build(yaml).actions[1].default, None);
    }

    #[test]
    fn test_invalid_definitions() {
        let both = "arguments:\n  - name: x\n    flags: -x\n";
        let neither = "arguments:\n  - help: nothing\n";
        let bad_flag = "arguments:\n  - flags: x\n";
        let flag_positional = "arguments:\n  - name: x\n    action: store_true\n";
        let bad_nargs = "arguments:\n  - flags: -x\n    nargs: many\n";

        for yaml in [both, neither, bad_flag, flag_positional, bad_nargs] {
            let result = ParserDefinition::from_yaml(yaml).unwrap().build(None);
            assert!(
                matches!(result, Err(HelpError::Definition(_))),
                "expected a definition error for {:?}",
                yaml
            );
        }
    }

    #[test]
    fn test_conflicting_option_strings() {
        let yaml = "arguments:\n  - flags: [-h, --host]\n";
        let err = ParserDefinition::from_yaml(yaml)
            .unwrap()
            .build(None)
            .unwrap_err();
        assert!(err.to_string().contains("conflicting option string: -h"));
    }

    #[test]
    fn test_required_mutex_member_is_rejected() {
        let yaml = r#"
mutually_exclusive:
  - arguments:
      - flags: --a
        required: true
"#;
        let result = ParserDefinition::from_yaml(yaml).unwrap().build(None);
        assert!(matches!(result, Err(HelpError::Definition(_))));
    }

    #[test]
    fn test_nargs_spelling_decides_required() {
        for nargs in ["'?'", "optional", "'*'", "zero_or_more"] {
            let yaml = format!(
                "mutually_exclusive:\n  - arguments:\n      - name: src\n        nargs: {}\n      - flags: --url\n",
                nargs
            );
            let parser = build(&yaml);
            let src = parser.actions.iter().find(|a| a.dest == "src").unwrap();
            assert!(!src.required, "nargs {} should make src optional", nargs);
        }

        let yaml = "mutually_exclusive:\n  - arguments:\n      - name: src\n        nargs: one_or_more\n";
        let result = ParserDefinition::from_yaml(yaml).unwrap().build(None);
        assert!(matches!(result, Err(HelpError::Definition(_))));
    }

    #[test]
    fn test_mutex_groups_and_sections() {
        let yaml = r#"
prog: PROG
mutually_exclusive:
  - required: true
    arguments:
      - flags: --path
        metavar: PATH
      - flags: --url
        metavar: URL
groups:
  - title: output
    description: Where results go.
    arguments:
      - flags: [-o, --out]
        help: output file
"#;
        let text = help(yaml, 80);
        assert_eq!(
            text,
            "Usage: PROG [-h] (--path PATH | --url URL) [-o OUT]\n\
             \n\
             Options:\n\
             \x20 -h, --help     show this help message and exit\n\
             \x20 --path PATH\n\
             \x20 --url URL\n\
             \n\
             Output:\n\
             \x20 Where results go.\n\
             \n\
             \x20 -o, --out OUT  output file\n"
        );
    }

    #[test]
    fn test_subcommands() {
        let yaml = r#"
prog: git
subcommands:
  dest: command
  commands:
    - name: clone
      help: copy a repository
    - name: status
      aliases: [st]
      help: show the working tree
"#;
        let text = help(yaml, 80);
        assert_eq!(
            text,
            "Usage: git [-h] {clone,status,st} ...\n\
             \n\
             Positional Arguments:\n\
             \x20 {clone,status,st}\n\
             \x20   clone            copy a repository\n\
             \x20   status (st)      show the working tree\n\
             \n\
             Options:\n\
             \x20 -h, --help         show this help message and exit\n"
        );
    }

    #[test]
    fn test_titled_subcommands() {
        let yaml = r#"
subcommands:
  title: commands
  commands:
    - name: run
"#;
        let parser = build(yaml);
        assert_eq!(parser.groups.len(), 3);
        assert_eq!(parser.groups[2].title, "commands");
        assert!(parser.groups[0].actions.is_empty());
    }

    #[test]
    fn test_description_epilog_and_version() {
        let yaml = r#"
prog: tool
description: '%(prog)s does things.'
epilog: See the manual.
version: '%(prog)s 2.0'
"#;
        let context = RenderContext::default().with_width(80);
        let parser = build(yaml);
        let text = parser.format_help(&context).unwrap();
        assert_eq!(
            text.plain(),
            "Usage: tool [-h] [--version]\n\
             \n\
             tool does things.\n\
             \n\
             Options:\n\
             \x20 -h, --help  show this help message and exit\n\
             \x20 --version   show program's version number and exit\n\
             \n\
             See the manual.\n"
        );
        assert_eq!(
            parser.format_version(&context).unwrap().as_deref(),
            Some("tool 2.0")
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(matches!(
            ParserDefinition::from_yaml("progname: x\n"),
            Err(HelpError::Yaml(_))
        ));
    }
}

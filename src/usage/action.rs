//! Action descriptors
//!
//! The read-only view of one parser argument that help rendering needs:
//! how it is invoked, what value it consumes and how it is documented.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many values an action consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nargs {
    /// Exactly one value (no explicit count)
    #[default]
    Single,
    /// Zero or one value (`?`)
    Optional,
    /// Any number of values (`*`)
    ZeroOrMore,
    /// At least one value (`+`)
    OneOrMore,
    /// A fixed count; `Fixed(0)` is a flag taking no value
    Fixed(usize),
    /// Everything left on the command line (`...`)
    Remainder,
    /// A subcommand followed by its own arguments (`A...`)
    Parser,
    /// Consumes values but never shows them
    Suppressed,
}

impl Nargs {
    /// Whether the action shows a value placeholder
    pub fn takes_value(&self) -> bool {
        !matches!(self, Nargs::Fixed(0) | Nargs::Suppressed)
    }

    /// The conventional spelling, used by `%(nargs)s`
    pub fn as_param(&self) -> ParamValue {
        match self {
            Nargs::Single => ParamValue::None,
            Nargs::Optional => ParamValue::Str("?".to_string()),
            Nargs::ZeroOrMore => ParamValue::Str("*".to_string()),
            Nargs::OneOrMore => ParamValue::Str("+".to_string()),
            Nargs::Fixed(n) => ParamValue::Int(*n as i64),
            Nargs::Remainder => ParamValue::Str("...".to_string()),
            Nargs::Parser => ParamValue::Str("A...".to_string()),
            Nargs::Suppressed => ParamValue::Str("==SUPPRESS==".to_string()),
        }
    }
}

impl FromStr for Nargs {
    type Err = String;

    /// Accepts the symbolic spellings (`?`, `*`, `+`, `...`, `A...`, a count)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "single" => Ok(Nargs::Single),
            "?" | "optional" => Ok(Nargs::Optional),
            "*" | "zero_or_more" => Ok(Nargs::ZeroOrMore),
            "+" | "one_or_more" => Ok(Nargs::OneOrMore),
            "..." | "remainder" => Ok(Nargs::Remainder),
            "A..." | "parser" => Ok(Nargs::Parser),
            "==SUPPRESS==" | "suppressed" => Ok(Nargs::Suppressed),
            other => other
                .parse::<usize>()
                .map(Nargs::Fixed)
                .map_err(|_| format!("invalid nargs '{}'", other)),
        }
    }
}

/// Explicit placeholder name(s) for an action's values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metavar {
    /// One name, repeated for every value
    Single(String),
    /// One name per value
    Tuple(Vec<String>),
}

/// A scalar attribute value, as seen by `%(param)s` expansion
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// No value
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// Whether the value counts as "set" (non-empty, non-zero)
    pub fn is_truthy(&self) -> bool {
        match self {
            ParamValue::None => false,
            ParamValue::Bool(b) => *b,
            ParamValue::Int(i) => *i != 0,
            ParamValue::Float(f) => *f != 0.0,
            ParamValue::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::None => f.write_str("None"),
            ParamValue::Bool(true) => f.write_str("True"),
            ParamValue::Bool(false) => f.write_str("False"),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Where default metavars come from when an action names none
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetavarSource {
    /// `DEST` for options, `dest` for positionals
    #[default]
    Dest,
    /// The value type name (falls back to the dest rule)
    Type,
}

impl MetavarSource {
    /// Default metavar of an option
    pub fn for_optional(&self, action: &ActionDescriptor) -> String {
        match (self, &action.type_name) {
            (MetavarSource::Type, Some(type_name)) => type_name.clone(),
            _ => action.dest.to_uppercase(),
        }
    }

    /// Default metavar of a positional
    pub fn for_positional(&self, action: &ActionDescriptor) -> String {
        match (self, &action.type_name) {
            (MetavarSource::Type, Some(type_name)) => type_name.clone(),
            _ => action.dest.clone(),
        }
    }

    /// Default metavar of any action
    pub fn for_action(&self, action: &ActionDescriptor) -> String {
        if action.is_positional() {
            self.for_positional(action)
        } else {
            self.for_optional(action)
        }
    }
}

/// Metadata of a mutually exclusive group; actions refer to it by index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutexGroup {
    /// Exactly one member must be given
    pub required: bool,
}

/// One argument of a parser, as help rendering sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDescriptor {
    /// Option strings such as `-s`, `--long`; empty for positionals
    pub option_strings: Vec<String>,

    /// Destination name, the source of default metavars
    pub dest: String,

    /// Explicit metavar
    pub metavar: Option<Metavar>,

    /// Value count
    pub nargs: Nargs,

    /// Help text, possibly with `%(param)s` placeholders
    pub help: Option<String>,

    /// Hidden from help and usage
    pub suppressed: bool,

    /// Must be given on the command line
    pub required: bool,

    /// Default value; `None` when the default is suppressed
    pub default: Option<ParamValue>,

    /// Allowed values
    pub choices: Option<Vec<String>>,

    /// Name of the value type (e.g. `int`)
    pub type_name: Option<String>,

    /// Index of the mutually exclusive group this action belongs to
    pub mutex_group: Option<usize>,

    /// Nested rows shown under this action (subcommands)
    pub subactions: Vec<ActionDescriptor>,
}

impl ActionDescriptor {
    fn base(option_strings: Vec<String>, dest: String) -> Self {
        ActionDescriptor {
            option_strings,
            dest,
            metavar: None,
            nargs: Nargs::Single,
            help: None,
            suppressed: false,
            required: false,
            default: Some(ParamValue::None),
            choices: None,
            type_name: None,
            mutex_group: None,
            subactions: Vec::new(),
        }
    }

    /// An option taking one value; `dest` is derived from the option strings
    pub fn optional(option_strings: &[&str]) -> Self {
        let strings: Vec<String> = option_strings.iter().map(|s| s.to_string()).collect();
        let dest = dest_from_option_strings(&strings);
        Self::base(strings, dest)
    }

    /// An option taking no value (`store_true`)
    pub fn flag(option_strings: &[&str]) -> Self {
        Self::optional(option_strings)
            .nargs(Nargs::Fixed(0))
            .default_value(false)
    }

    /// A positional argument
    pub fn positional(dest: &str) -> Self {
        let mut action = Self::base(Vec::new(), dest.to_string());
        action.required = true;
        action
    }

    /// The automatic `-h, --help` action
    pub fn help_action() -> Self {
        let mut action = Self::flag(&["-h", "--help"]).help("show this help message and exit");
        action.default = None;
        action
    }

    /// A `--version` action
    pub fn version_action() -> Self {
        let mut action =
            Self::flag(&["--version"]).help("show program's version number and exit");
        action.default = None;
        action
    }

    /// Override the destination name
    pub fn dest(mut self, dest: &str) -> Self {
        self.dest = dest.to_string();
        self
    }

    /// Set a single metavar
    pub fn metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(Metavar::Single(metavar.to_string()));
        self
    }

    /// Set one metavar per value
    pub fn metavar_tuple(mut self, metavars: &[&str]) -> Self {
        self.metavar = Some(Metavar::Tuple(
            metavars.iter().map(|m| m.to_string()).collect(),
        ));
        self
    }

    /// Set the value count
    pub fn nargs(mut self, nargs: Nargs) -> Self {
        self.nargs = nargs;
        self
    }

    /// Set the help text
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Hide the action from help and usage
    pub fn suppress(mut self) -> Self {
        self.suppressed = true;
        self
    }

    /// Mark as required
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the default value
    pub fn default_value(mut self, value: impl Into<ParamValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Restrict the allowed values
    pub fn choices(mut self, choices: &[&str]) -> Self {
        self.choices = Some(choices.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Name the value type
    pub fn type_name(mut self, type_name: &str) -> Self {
        self.type_name = Some(type_name.to_string());
        self
    }

    /// Put the action in a mutually exclusive group
    pub fn in_mutex_group(mut self, group: usize) -> Self {
        self.mutex_group = Some(group);
        self
    }

    /// Add a nested row
    pub fn subaction(mut self, action: ActionDescriptor) -> Self {
        self.subactions.push(action);
        self
    }

    /// Whether this is a positional argument
    pub fn is_positional(&self) -> bool {
        self.option_strings.is_empty()
    }

    /// The name used in error messages
    pub fn display_name(&self) -> String {
        if self.option_strings.is_empty() {
            self.dest.clone()
        } else {
            self.option_strings.join("/")
        }
    }

    /// Metavar names for `count` values
    pub fn metavar_parts(&self, default_metavar: &str, count: usize) -> Vec<String> {
        let names: Vec<String> = match (&self.metavar, &self.choices) {
            (Some(Metavar::Tuple(names)), _) if !names.is_empty() => names.clone(),
            (Some(Metavar::Single(name)), _) => vec![name.clone()],
            (_, Some(choices)) => vec![format!("{{{}}}", choices.join(","))],
            _ => vec![default_metavar.to_string()],
        };
        (0..count).map(|i| names[i % names.len()].clone()).collect()
    }

    /// Render the value placeholder, e.g. `N [N ...]` for one or more
    pub fn format_args(&self, default_metavar: &str) -> String {
        match self.nargs {
            Nargs::Single => self.metavar_parts(default_metavar, 1).remove(0),
            Nargs::Optional => format!("[{}]", self.metavar_parts(default_metavar, 1)[0]),
            Nargs::ZeroOrMore => match &self.metavar {
                Some(Metavar::Tuple(names)) if names.len() == 2 => {
                    format!("[{} [{} ...]]", names[0], names[1])
                }
                _ => format!("[{} ...]", self.metavar_parts(default_metavar, 1)[0]),
            },
            Nargs::OneOrMore => {
                let parts = self.metavar_parts(default_metavar, 2);
                format!("{} [{} ...]", parts[0], parts[1])
            }
            Nargs::Fixed(n) => self.metavar_parts(default_metavar, n).join(" "),
            Nargs::Remainder => "...".to_string(),
            Nargs::Parser => format!("{} ...", self.metavar_parts(default_metavar, 1)[0]),
            Nargs::Suppressed => String::new(),
        }
    }

    /// The physically separate tokens a positional renders as in a usage line
    pub fn usage_tokens(&self, default_metavar: &str) -> Vec<String> {
        match self.nargs {
            Nargs::Fixed(n) => self.metavar_parts(default_metavar, n),
            Nargs::OneOrMore => {
                let parts = self.metavar_parts(default_metavar, 2);
                vec![parts[0].clone(), format!("[{} ...]", parts[1])]
            }
            Nargs::ZeroOrMore => {
                let formatted = self.format_args(default_metavar);
                match formatted.split_once(' ') {
                    Some((head, tail)) => vec![head.to_string(), tail.to_string()],
                    None => vec![formatted],
                }
            }
            _ => {
                let formatted = self.format_args(default_metavar);
                if formatted.is_empty() {
                    Vec::new()
                } else {
                    vec![formatted]
                }
            }
        }
    }
}

/// Dest rule: first long option, else first short, without
/// prefix characters and with dashes turned into underscores
fn dest_from_option_strings(option_strings: &[String]) -> String {
    let chosen = option_strings
        .iter()
        .find(|s| s.starts_with("--"))
        .or_else(|| option_strings.first());
    chosen
        .map(|s| s.trim_start_matches('-').replace('-', "_"))
        .unwrap_or_default()
}

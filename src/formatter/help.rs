//! The help formatter
//!
//! Collects usage, texts, sections and argument rows into a
//! [`SectionTree`], styling everything on the way in. Calls come in the
//! order of a help document: `add_usage`, `add_text`, `start_section`,
//! `add_argument(s)`, `end_section`, then `format_help`.

use crate::error::Result;
use crate::formatter::{
    action_fields, expand, expand_markup, expand_usage, prog_fields, FieldMap, RenderContext,
};
use crate::layout::{join_lines, Row, Section, SectionTree};
use crate::text::{parse_markup, StyleTag, StyledText};
use crate::theme::{render, OutputFormat};
use crate::usage::{format_usage, ActionDescriptor, MutexGroup, UsageSpanResolver};
use tracing::debug;

/// Marks a usage, description or help that must not be shown
pub const SUPPRESS: &str = "==SUPPRESS==";

/// Prefix of generated usage lines, before heading casing
pub const USAGE_PREFIX: &str = "usage: ";

/// Builds one help document
#[derive(Debug)]
pub struct HelpFormatter<'c> {
    context: &'c RenderContext,
    prog: String,
    tree: SectionTree,
    open_sections: Vec<Section>,
    current_indent: usize,
}

impl<'c> HelpFormatter<'c> {
    pub fn new(prog: impl Into<String>, context: &'c RenderContext) -> Self {
        HelpFormatter {
            context,
            prog: prog.into(),
            tree: SectionTree::new(),
            open_sections: Vec::new(),
            current_indent: 0,
        }
    }

    pub fn prog(&self) -> &str {
        &self.prog
    }

    pub fn context(&self) -> &'c RenderContext {
        self.context
    }

    /// `usage: ` with the label cased like the section headings
    fn usage_prefix(&self, prefix: Option<&str>) -> String {
        let prefix = prefix.unwrap_or(USAGE_PREFIX);
        match prefix.split_once(':') {
            Some((label, rest)) => format!(
                "{}:{}",
                self.context.layout.group_name_format.apply(label),
                rest
            ),
            None => prefix.to_string(),
        }
    }

    /// Add the usage block.
    ///
    /// A given `usage` only has `%(prog)s` expanded. Otherwise the usage is
    /// generated from `actions` and mapped back to per-action spans; when
    /// that mapping fails the usage is still shown, with only the label and
    /// program name styled.
    pub fn add_usage(
        &mut self,
        usage: Option<&str>,
        actions: &[ActionDescriptor],
        groups: &[MutexGroup],
        prefix: Option<&str>,
    ) -> Result<()> {
        if usage == Some(SUPPRESS) {
            return Ok(());
        }

        let prefix = self.usage_prefix(prefix);
        let label_len = prefix.trim_end().chars().count();

        let text = match usage {
            Some(usage) => {
                let mut text = StyledText::new(prefix.as_str());
                text.stylize(0, label_len, StyleTag::GROUPS);
                text.append_text(&expand_usage(usage, &self.prog, self.context.placeholders)?);
                text
            }
            None => self.generated_usage(&prefix, label_len, actions, groups),
        };

        self.tree.push_text(text);
        Ok(())
    }

    fn generated_usage(
        &self,
        prefix: &str,
        label_len: usize,
        actions: &[ActionDescriptor],
        groups: &[MutexGroup],
    ) -> StyledText {
        let metavars = self.context.policy.metavars;
        let width = self
            .context
            .layout
            .width
            .saturating_sub(self.current_indent);
        let formatted = format_usage(prefix, &self.prog, actions, groups, width, metavars);

        let mut text = StyledText::new(formatted.text.as_str());
        text.stylize(0, label_len, StyleTag::GROUPS);
        let prog_len = self.prog.chars().count();
        text.stylize(
            formatted.prog_start,
            formatted.prog_start + prog_len,
            StyleTag::PROG,
        );

        match UsageSpanResolver::new(&formatted.text, actions)
            .with_metavars(metavars)
            .resolve(formatted.actions_start)
        {
            Ok(spans) => {
                for span in spans {
                    text.stylize(span.start, span.end, span.tag);
                }
            }
            Err(err) => {
                debug!(prog = %self.prog, error = %err, "usage left without argument highlighting");
            }
        }
        text
    }

    /// Add a description or epilog; inside a section it becomes the
    /// section description
    pub fn add_text(&mut self, text: Option<&str>) -> Result<()> {
        let Some(text) = text.filter(|t| *t != SUPPRESS && !t.trim().is_empty()) else {
            return Ok(());
        };

        let mut styled = self.expand_styled(text, &prog_fields(&self.prog), &self.prog)?;
        self.context.highlights.apply(&mut styled);
        styled.insert_base_span(StyleTag::TEXT);

        match self.open_sections.last_mut() {
            Some(section) => match &mut section.description {
                Some(existing) => {
                    existing.append("\n\n");
                    existing.append_text(&styled);
                }
                None => section.description = Some(styled),
            },
            None => self.tree.push_paragraph(styled),
        }
        Ok(())
    }

    /// Open a section; everything added until [`end_section`](Self::end_section)
    /// goes into it
    pub fn start_section(&mut self, heading: Option<&str>) {
        let section = Section {
            heading: heading.map(str::to_string),
            indent: self.current_indent,
            ..Default::default()
        };
        self.current_indent += self.context.layout.indent_increment;
        self.open_sections.push(section);
    }

    /// Close the innermost open section
    pub fn end_section(&mut self) {
        if let Some(section) = self.open_sections.pop() {
            self.current_indent = self
                .current_indent
                .saturating_sub(self.context.layout.indent_increment);
            match self.open_sections.last_mut() {
                Some(parent) => parent.children.push(section),
                None => self.tree.push_section(section),
            }
        }
    }

    /// Add one argument row (and its subcommand rows)
    pub fn add_argument(&mut self, action: &ActionDescriptor) -> Result<()> {
        if action.suppressed {
            return Ok(());
        }
        self.add_action_rows(action, self.current_indent)
    }

    pub fn add_arguments(&mut self, actions: &[ActionDescriptor]) -> Result<()> {
        for action in actions {
            self.add_argument(action)?;
        }
        Ok(())
    }

    fn add_action_rows(&mut self, action: &ActionDescriptor, indent: usize) -> Result<()> {
        let row = Row {
            invocation: self.format_invocation(action),
            help: self.format_action_help(action)?,
            indent,
        };
        self.push_row(row);

        let nested = indent + self.context.layout.indent_increment;
        for subaction in action.subactions.iter().filter(|a| !a.suppressed) {
            self.add_action_rows(subaction, nested)?;
        }
        Ok(())
    }

    /// Rows outside any section share one heading-less section with the
    /// rows added right before them
    fn push_row(&mut self, row: Row) {
        if let Some(section) = self.open_sections.last_mut() {
            section.rows.push(row);
            return;
        }
        match self.tree.last_section_mut() {
            Some(section) if section.heading.is_none() && section.children.is_empty() => {
                section.rows.push(row)
            }
            _ => {
                let mut section = Section::default();
                section.rows.push(row);
                self.tree.push_section(section);
            }
        }
    }

    /// `-s, --size SIZE` for options, the metavar for positionals
    pub fn format_invocation(&self, action: &ActionDescriptor) -> StyledText {
        let metavars = self.context.policy.metavars;

        if action.is_positional() {
            let name = action
                .metavar_parts(&metavars.for_positional(action), 1)
                .into_iter()
                .next()
                .unwrap_or_default();
            return StyledText::styled(name, StyleTag::ARGS);
        }

        let mut text = StyledText::default();
        for (i, option) in action.option_strings.iter().enumerate() {
            if i > 0 {
                text.append(", ");
            }
            text.append_styled(option, StyleTag::ARGS);
        }
        if action.nargs.takes_value() {
            let args = action.format_args(&metavars.for_optional(action));
            if !args.is_empty() {
                text.append(" ");
                text.append_styled(&args, StyleTag::METAVAR);
            }
        }
        text
    }

    /// Expanded, highlighted help of an action, or `None` when it has none
    pub fn format_action_help(&self, action: &ActionDescriptor) -> Result<Option<StyledText>> {
        let Some(help) = action
            .help
            .as_deref()
            .filter(|h| *h != SUPPRESS && !h.trim().is_empty())
        else {
            return Ok(None);
        };

        let fields = action_fields(action, &self.prog);
        let name = action.display_name();

        let mut text = self.expand_styled(help, &fields, &name)?;
        if let Some(suffix) = self.context.policy.default_suffix(action) {
            let start = text.len();
            text.append_text(&self.expand_styled(suffix, &fields, &name)?);
            let end = text.len();
            text.stylize(start, end, StyleTag::DEFAULT);
        }
        self.context.highlights.apply(&mut text);
        text.insert_base_span(StyleTag::HELP);
        Ok(Some(text))
    }

    /// Expand placeholders, then read markup when the policy asks for it
    fn expand_styled(&self, template: &str, fields: &FieldMap, owner: &str) -> Result<StyledText> {
        let mode = self.context.placeholders;
        if self.context.policy.markup {
            Ok(parse_markup(&expand_markup(template, fields, owner, mode)?))
        } else {
            Ok(StyledText::new(expand(template, fields, owner, mode)?))
        }
    }

    /// Expand `%(prog)s` in a version string
    pub fn format_version(&self, version: &str) -> Result<String> {
        Ok(expand(
            version,
            &prog_fields(&self.prog),
            "--version",
            self.context.placeholders,
        )?)
    }

    /// Close open sections and hand over the tree
    pub fn finish(mut self) -> SectionTree {
        while !self.open_sections.is_empty() {
            self.end_section();
        }
        self.tree
    }

    /// Lay the document out as styled text
    pub fn format_help(self) -> StyledText {
        let context = self.context;
        let tree = self.finish();
        join_lines(&tree.render_lines(&context.layout))
    }

    /// Lay the document out and render it with the context's theme
    pub fn render(self, format: OutputFormat) -> String {
        let context = self.context;
        let title = format!("{} --help", self.prog);
        let document = self.format_help();
        render(&document, &context.theme, format, &title)
    }
}

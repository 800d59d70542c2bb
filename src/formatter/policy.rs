//! Formatter policies
//!
//! Raw description, raw text, paragraphs, argument defaults, type
//! metavars and markup are independent settings that combine freely.

use crate::layout::WrapMode;
use crate::usage::{ActionDescriptor, MetavarSource, Nargs};
use serde::{Deserialize, Serialize};

/// Suffix appended to help by [`HelpPolicy::show_defaults`]
pub const DEFAULT_SUFFIX: &str = " (default: %(default)s)";

/// Named text handling presets, as found in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatterKind {
    /// Rewrap descriptions and help
    #[default]
    Default,
    /// Keep descriptions and epilogs as written
    RawDescription,
    /// Keep every text as written, help included
    RawText,
    /// Rewrap, but keep blank-line separated paragraphs apart
    Paragraph,
}

impl std::str::FromStr for FormatterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(FormatterKind::Default),
            "raw_description" => Ok(FormatterKind::RawDescription),
            "raw_text" => Ok(FormatterKind::RawText),
            "paragraph" => Ok(FormatterKind::Paragraph),
            other => Err(format!(
                "unknown formatter '{}' (expected default, raw_description, raw_text or paragraph)",
                other
            )),
        }
    }
}

/// How help text is prepared before layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpPolicy {
    /// Whitespace handling of argument help
    pub help_wrap: WrapMode,
    /// Whitespace handling of descriptions and epilogs
    pub text_fill: WrapMode,
    /// Where default metavars come from
    pub metavars: MetavarSource,
    /// Append the default value to help where it is meaningful
    pub show_defaults: bool,
    /// Read `[style]...[/style]` markup in descriptions and help
    pub markup: bool,
}

impl Default for HelpPolicy {
    fn default() -> Self {
        HelpPolicy {
            help_wrap: WrapMode::Normalize,
            text_fill: WrapMode::Normalize,
            metavars: MetavarSource::default(),
            show_defaults: false,
            markup: true,
        }
    }
}

impl HelpPolicy {
    /// Descriptions keep their line breaks; help is still rewrapped
    pub fn raw_description() -> Self {
        HelpPolicy {
            text_fill: WrapMode::Raw,
            ..Default::default()
        }
    }

    /// Nothing is rewrapped
    pub fn raw_text() -> Self {
        HelpPolicy {
            help_wrap: WrapMode::Raw,
            text_fill: WrapMode::Raw,
            ..Default::default()
        }
    }

    /// Paragraphs survive rewrapping, in help and descriptions alike
    pub fn paragraph() -> Self {
        HelpPolicy {
            help_wrap: WrapMode::Paragraph,
            text_fill: WrapMode::Paragraph,
            ..Default::default()
        }
    }

    /// Help mentions default values
    pub fn argument_defaults() -> Self {
        HelpPolicy::default().with_argument_defaults()
    }

    /// Metavars are the value type names
    pub fn metavar_type() -> Self {
        HelpPolicy::default().with_metavar_type()
    }

    /// The preset for a configured formatter kind
    pub fn from_kind(kind: FormatterKind) -> Self {
        match kind {
            FormatterKind::Default => HelpPolicy::default(),
            FormatterKind::RawDescription => HelpPolicy::raw_description(),
            FormatterKind::RawText => HelpPolicy::raw_text(),
            FormatterKind::Paragraph => HelpPolicy::paragraph(),
        }
    }

    pub fn with_argument_defaults(mut self) -> Self {
        self.show_defaults = true;
        self
    }

    pub fn with_metavar_type(mut self) -> Self {
        self.metavars = MetavarSource::Type;
        self
    }

    /// Take brackets literally
    pub fn without_markup(mut self) -> Self {
        self.markup = false;
        self
    }

    /// The suffix to append to an action's help, if any.
    ///
    /// Only options and positionals that may be omitted get one, and never
    /// when the help already mentions `%(default)` or the default is hidden.
    pub fn default_suffix(&self, action: &ActionDescriptor) -> Option<&'static str> {
        if !self.show_defaults {
            return None;
        }
        let help = action.help.as_deref()?;
        if help.contains("%(default)") || action.default.is_none() {
            return None;
        }
        let defaulting = matches!(action.nargs, Nargs::Optional | Nargs::ZeroOrMore);
        if !action.is_positional() || defaulting {
            Some(DEFAULT_SUFFIX)
        } else {
            None
        }
    }
}

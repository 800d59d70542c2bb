//! Help layout
//!
//! Turns a tree of sections and rows into wrapped, aligned lines of
//! styled text. Nothing here knows about themes or terminals.

pub mod columns;
pub mod section;
pub mod wrap;

// Re-export main types
pub use columns::*;
pub use section::*;
pub use wrap::*;

use crate::text::StyledText;
use serde::{Deserialize, Serialize};

/// How section headings are cased
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupNameFormat {
    /// Capitalize the first letter of every word
    #[default]
    Title,
    Upper,
    Lower,
    /// Leave headings as given
    Verbatim,
}

impl GroupNameFormat {
    /// Apply the casing to a heading
    pub fn apply(&self, heading: &str) -> String {
        match self {
            GroupNameFormat::Title => title_case(heading),
            GroupNameFormat::Upper => heading.to_uppercase(),
            GroupNameFormat::Lower => heading.to_lowercase(),
            GroupNameFormat::Verbatim => heading.to_string(),
        }
    }
}

impl std::str::FromStr for GroupNameFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(GroupNameFormat::Title),
            "upper" => Ok(GroupNameFormat::Upper),
            "lower" => Ok(GroupNameFormat::Lower),
            "verbatim" => Ok(GroupNameFormat::Verbatim),
            other => Err(format!(
                "unknown group name format '{}' (expected title, upper, lower or verbatim)",
                other
            )),
        }
    }
}

/// Uppercase the first letter after any non-letter, lowercase the rest
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    result
}

/// Geometry and text handling used when rendering a [`SectionTree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Total line width
    pub width: usize,
    /// Lower bound of the invocation column before the gutter
    pub min_column_width: usize,
    /// Upper bound of the invocation column before the gutter
    pub max_column_width: usize,
    /// Indentation added per nesting level
    pub indent_increment: usize,
    /// Whitespace handling for argument help
    pub help_wrap: WrapMode,
    /// Whitespace handling for descriptions and epilogs
    pub text_fill: WrapMode,
    /// Heading casing
    pub group_name_format: GroupNameFormat,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            width: 78,
            min_column_width: 0,
            max_column_width: 22,
            indent_increment: 2,
            help_wrap: WrapMode::Normalize,
            text_fill: WrapMode::Normalize,
            group_name_format: GroupNameFormat::Title,
        }
    }
}

/// Join rendered lines into a document: one `\n` after every line,
/// or nothing at all when there are no lines
pub fn join_lines(lines: &[StyledText]) -> StyledText {
    if lines.is_empty() {
        return StyledText::default();
    }
    let mut document = StyledText::join(&StyledText::new("\n"), lines.iter());
    document.append("\n");
    document
}

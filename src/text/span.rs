//! Style tags and tagged character ranges

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

/// Opaque key naming a semantic style, resolved against a theme at render time
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTag(Cow<'static, str>);

impl StyleTag {
    /// Option strings and positional names (e.g. "--help")
    pub const ARGS: StyleTag = StyleTag(Cow::Borrowed("args"));
    /// Group headings and the "Usage:" prefix
    pub const GROUPS: StyleTag = StyleTag(Cow::Borrowed("groups"));
    /// Argument help text
    pub const HELP: StyleTag = StyleTag(Cow::Borrowed("help"));
    /// Meta variables (e.g. "FILE" in "--file FILE")
    pub const METAVAR: StyleTag = StyleTag(Cow::Borrowed("metavar"));
    /// Text inside backticks
    pub const SYNTAX: StyleTag = StyleTag(Cow::Borrowed("syntax"));
    /// Descriptions and epilog
    pub const TEXT: StyleTag = StyleTag(Cow::Borrowed("text"));
    /// The program name
    pub const PROG: StyleTag = StyleTag(Cow::Borrowed("prog"));
    /// Default values appended to help
    pub const DEFAULT: StyleTag = StyleTag(Cow::Borrowed("default"));

    /// Tags produced by the formatter itself
    pub const BUILTIN: [StyleTag; 8] = [
        Self::ARGS,
        Self::GROUPS,
        Self::HELP,
        Self::METAVAR,
        Self::SYNTAX,
        Self::TEXT,
        Self::PROG,
        Self::DEFAULT,
    ];

    /// Create a tag from any name
    pub fn new(name: impl Into<String>) -> Self {
        StyleTag(Cow::Owned(name.into()))
    }

    /// The tag name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StyleTag {
    fn from(name: &str) -> Self {
        StyleTag::new(name)
    }
}

impl From<String> for StyleTag {
    fn from(name: String) -> Self {
        StyleTag::new(name)
    }
}

impl Borrow<str> for StyleTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A tagged half-open `[start, end)` range over codepoint offsets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    /// First codepoint covered
    pub start: usize,
    /// One past the last codepoint covered
    pub end: usize,
    /// Style applied to the range
    pub tag: StyleTag,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, tag: StyleTag) -> Self {
        Span { start, end, tag }
    }

    /// Number of codepoints covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers nothing
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Move the span right by `offset`
    pub fn shifted(&self, offset: usize) -> Self {
        Span::new(self.start + offset, self.end + offset, self.tag.clone())
    }

    /// Clip the span to `[start, end)` and re-base it on `start`.
    ///
    /// Returns `None` when nothing of the span survives.
    pub fn clip(&self, start: usize, end: usize) -> Option<Self> {
        let clipped_start = self.start.max(start);
        let clipped_end = self.end.min(end);
        if clipped_start < clipped_end {
            Some(Span::new(
                clipped_start - start,
                clipped_end - start,
                self.tag.clone(),
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_inside_window() {
        let span = Span::new(2, 8, StyleTag::ARGS);
        assert_eq!(span.clip(4, 10), Some(Span::new(0, 4, StyleTag::ARGS)));
        assert_eq!(span.clip(0, 5), Some(Span::new(2, 5, StyleTag::ARGS)));
    }

    #[test]
    fn test_clip_outside_window() {
        let span = Span::new(2, 4, StyleTag::ARGS);
        assert_eq!(span.clip(4, 10), None);
        assert_eq!(span.clip(0, 2), None);
    }

    #[test]
    fn test_tag_borrows_as_str() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(StyleTag::METAVAR, 1);
        assert_eq!(map.get("metavar"), Some(&1));
        assert_eq!(StyleTag::new("metavar"), StyleTag::METAVAR);
    }
}

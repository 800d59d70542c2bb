//! Themes
//!
//! A theme maps style tags to visual attributes. Text carries only tags;
//! the theme is looked up when the text is rendered.

pub mod builtin;
pub mod render;
pub mod style;

// Re-export main types
pub use builtin::*;
pub use render::*;
pub use style::*;

use crate::error::{ThemeError, ThemeResult};
use crate::text::StyleTag;
use std::collections::BTreeMap;
use tracing::debug;

/// Tag to style mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    name: String,
    styles: BTreeMap<StyleTag, Style>,
}

impl Theme {
    /// Create an empty theme
    pub fn new(name: impl Into<String>) -> Self {
        Theme {
            name: name.into(),
            styles: BTreeMap::new(),
        }
    }

    /// Look up a built-in theme, `anti_` variants included
    pub fn named(name: &str) -> ThemeResult<Self> {
        let (base, reversed) = match name.strip_prefix(ANTI_PREFIX) {
            Some(base) => (base, true),
            None => (name, false),
        };
        let table =
            builtin_table(base).ok_or_else(|| ThemeError::UnknownTheme(name.to_string()))?;

        let mut theme = Theme::new(name);
        for (tag, definition) in table {
            theme.set(StyleTag::new(*tag), Style::parse(definition)?);
        }
        if reversed {
            theme = theme.reversed(name);
        }
        Ok(theme)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set(&mut self, tag: StyleTag, style: Style) {
        self.styles.insert(tag, style);
    }

    pub fn get(&self, tag: &str) -> Option<&Style> {
        self.styles.get(tag)
    }

    /// Tags and styles, ordered by tag name
    pub fn styles(&self) -> impl Iterator<Item = (&StyleTag, &Style)> {
        self.styles.iter()
    }

    /// Replace styles from `tag -> style string` definitions
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> ThemeResult<Self> {
        for (tag, definition) in overrides {
            self.set(StyleTag::new(tag.as_str()), Style::parse(definition)?);
        }
        Ok(self)
    }

    /// The same theme with every style reversed
    pub fn reversed(&self, name: impl Into<String>) -> Theme {
        let reverse = Style {
            reverse: Some(true),
            ..Default::default()
        };
        Theme {
            name: name.into(),
            styles: self
                .styles
                .iter()
                .map(|(tag, style)| (tag.clone(), style.combine(&reverse)))
                .collect(),
        }
    }

    /// Flatten the styles of `tags`, lowest priority first.
    ///
    /// A tag the theme does not know is read as an inline style string
    /// (markup such as `[bold red]`); when that fails it contributes nothing.
    pub fn resolve<'a, I>(&self, tags: I) -> Style
    where
        I: IntoIterator<Item = &'a StyleTag>,
    {
        tags.into_iter().fold(Style::default(), |style, tag| {
            if let Some(layer) = self.styles.get(tag) {
                return style.combine(layer);
            }
            match Style::parse(tag.as_str()) {
                Ok(inline) => style.combine(&inline),
                Err(_) => {
                    debug!(tag = %tag, theme = %self.name, "no style for tag");
                    style
                }
            }
        })
    }
}

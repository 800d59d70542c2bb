//! Render settings snapshot

use crate::config::HelpConfig;
use crate::error::Result;
use crate::formatter::{HelpPolicy, PlaceholderMode};
use crate::layout::LayoutOptions;
use crate::text::HighlightRuleSet;
use crate::theme::{Theme, DEFAULT_THEME};

/// Everything a render needs, fixed when the formatter is created.
///
/// Rendering never mutates the context, so one value can be shared by any
/// number of formatters, on any thread.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub layout: LayoutOptions,
    pub theme: Theme,
    pub highlights: HighlightRuleSet,
    pub policy: HelpPolicy,
    pub placeholders: PlaceholderMode,
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext {
            layout: LayoutOptions::default(),
            theme: Theme::named(DEFAULT_THEME).unwrap_or_else(|_| Theme::new(DEFAULT_THEME)),
            highlights: HighlightRuleSet::default(),
            policy: HelpPolicy::default(),
            placeholders: PlaceholderMode::default(),
        }
    }
}

impl RenderContext {
    /// Snapshot a loaded configuration
    pub fn from_config(config: &HelpConfig) -> Result<Self> {
        let theme = Theme::named(&config.theme)?.with_overrides(&config.styles)?;
        let highlights = config.highlight_rules()?;
        Ok(RenderContext {
            layout: config.layout_options(),
            theme,
            highlights,
            policy: config.policy(),
            placeholders: config.placeholders,
        })
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.layout.width = width;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_highlights(mut self, highlights: HighlightRuleSet) -> Self {
        self.highlights = highlights;
        self
    }

    /// Switch policy; the layout follows its wrap settings
    pub fn with_policy(mut self, policy: HelpPolicy) -> Self {
        self.layout.help_wrap = policy.help_wrap;
        self.layout.text_fill = policy.text_fill;
        self.policy = policy;
        self
    }

    pub fn with_placeholders(mut self, mode: PlaceholderMode) -> Self {
        self.placeholders = mode;
        self
    }
}

//! Core configuration types
//!
//! This module defines the data structures that represent a richhelp.yml file.

use crate::error::ConfigResult;
use crate::formatter::{FormatterKind, HelpPolicy, PlaceholderMode};
use crate::layout::{GroupNameFormat, LayoutOptions};
use crate::text::{HighlightRule, HighlightRuleSet, StyleTag};
use crate::theme::DEFAULT_THEME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

/// Width used when neither the config nor `$COLUMNS` gives one
pub const FALLBACK_WIDTH: usize = 78;

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelpConfig {
    /// Total line width; defaults to the terminal width minus two
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,

    /// Lower bound of the invocation column
    pub min_column_width: usize,

    /// Upper bound of the invocation column
    pub max_column_width: usize,

    /// Indentation per nesting level
    pub indent_increment: usize,

    /// Heading casing
    pub group_name_format: GroupNameFormat,

    /// Built-in theme name
    pub theme: String,

    /// Per-tag style string overrides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,

    /// Highlight rules; when present they replace the defaults
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<HighlightConfig>>,

    /// What to do with placeholders that cannot be expanded
    pub placeholders: PlaceholderMode,

    /// Text handling preset
    pub formatter: FormatterKind,

    /// Append default values to help
    pub show_defaults: bool,

    /// Use type names as default metavars
    pub metavar_type: bool,

    /// Read `[style]...[/style]` markup in descriptions and help
    pub markup: bool,
}

/// A highlight rule as written in a config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum HighlightConfig {
    /// Just a pattern; every named group is tagged with its own name
    Pattern(String),
    /// A pattern plus group -> tag renames
    Mapped {
        pattern: String,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
}

impl HighlightConfig {
    pub fn pattern(&self) -> &str {
        match self {
            HighlightConfig::Pattern(pattern) => pattern,
            HighlightConfig::Mapped { pattern, .. } => pattern,
        }
    }

    /// Compile into a rule
    pub fn to_rule(&self) -> ConfigResult<HighlightRule> {
        match self {
            HighlightConfig::Pattern(pattern) => HighlightRule::new(pattern),
            HighlightConfig::Mapped { pattern, tags } => {
                tags.iter().try_fold(HighlightRule::new(pattern)?, |rule, (group, tag)| {
                    rule.map_group(group, StyleTag::new(tag.as_str()))
                })
            }
        }
    }
}

impl Default for HelpConfig {
    fn default() -> Self {
        HelpConfig {
            width: None,
            min_column_width: 0,
            max_column_width: 22,
            indent_increment: 2,
            group_name_format: GroupNameFormat::Title,
            theme: DEFAULT_THEME.to_string(),
            styles: BTreeMap::new(),
            highlights: None,
            placeholders: PlaceholderMode::Lenient,
            formatter: FormatterKind::Default,
            show_defaults: false,
            metavar_type: false,
            markup: true,
        }
    }
}

impl HelpConfig {
    /// The configured width, else `$COLUMNS - 2`, else [`FALLBACK_WIDTH`]
    pub fn resolved_width(&self) -> usize {
        self.width.unwrap_or_else(terminal_width)
    }

    /// Layout settings derived from this config
    pub fn layout_options(&self) -> LayoutOptions {
        let policy = self.policy();
        LayoutOptions {
            width: self.resolved_width(),
            min_column_width: self.min_column_width,
            max_column_width: self.max_column_width,
            indent_increment: self.indent_increment,
            help_wrap: policy.help_wrap,
            text_fill: policy.text_fill,
            group_name_format: self.group_name_format,
        }
    }

    /// The formatter policy: the preset plus the independent switches
    pub fn policy(&self) -> HelpPolicy {
        let mut policy = HelpPolicy::from_kind(self.formatter);
        if self.show_defaults {
            policy = policy.with_argument_defaults();
        }
        if self.metavar_type {
            policy = policy.with_metavar_type();
        }
        if !self.markup {
            policy = policy.without_markup();
        }
        policy
    }

    /// Configured highlight rules, or the defaults
    pub fn highlight_rules(&self) -> ConfigResult<HighlightRuleSet> {
        match &self.highlights {
            None => Ok(HighlightRuleSet::default()),
            Some(rules) => {
                let mut set = HighlightRuleSet::new();
                for rule in rules {
                    set.push(rule.to_rule()?);
                }
                Ok(set)
            }
        }
    }
}

/// `$COLUMNS - 2`, or the fallback width
pub fn terminal_width() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse::<usize>().ok())
        .filter(|columns| *columns > 2)
        .map(|columns| columns - 2)
        .unwrap_or(FALLBACK_WIDTH)
}

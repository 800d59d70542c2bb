//! Regex highlighting of help and description text
//!
//! Each rule is a regular expression with named capture groups; every
//! participating group of every match becomes a span whose tag is mapped
//! from the group name.

use crate::error::{ConfigError, ConfigResult};
use crate::text::{StyleTag, StyledText};
use regex::Regex;

/// `--words-with-dashes` as args
pub const ARGS_PATTERN: &str = r"(?:^|\s)(?P<args>-{1,2}[\w]+[\w-]*)";

/// `text in backquotes` as syntax
pub const SYNTAX_PATTERN: &str = r"`(?P<syntax>[^`]*)`";

/// A regex whose named groups map to style tags
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pattern: Regex,
    groups: Vec<(String, StyleTag)>,
}

impl HighlightRule {
    /// Compile a rule; each named group is tagged with its own name
    pub fn new(pattern: &str) -> ConfigResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidHighlight {
            pattern: pattern.to_string(),
            error: e.to_string(),
        })?;

        let groups: Vec<(String, StyleTag)> = regex
            .capture_names()
            .flatten()
            .map(|name| (name.to_string(), StyleTag::new(name)))
            .collect();

        if groups.is_empty() {
            return Err(ConfigError::InvalidHighlight {
                pattern: pattern.to_string(),
                error: "pattern has no named capture group".to_string(),
            });
        }

        Ok(HighlightRule {
            pattern: regex,
            groups,
        })
    }

    /// Tag a named group with something other than its own name
    pub fn map_group(mut self, group: &str, tag: StyleTag) -> ConfigResult<Self> {
        match self.groups.iter_mut().find(|(name, _)| name == group) {
            Some(entry) => {
                entry.1 = tag;
                Ok(self)
            }
            None => Err(ConfigError::InvalidHighlight {
                pattern: self.pattern.as_str().to_string(),
                error: format!("no group named '{}'", group),
            }),
        }
    }

    /// The source pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Tags this rule can produce
    pub fn tags(&self) -> impl Iterator<Item = &StyleTag> {
        self.groups.iter().map(|(_, tag)| tag)
    }

    /// Add spans for every match in `text`
    pub fn apply(&self, text: &mut StyledText) {
        // byte offset -> codepoint offset
        let char_starts: Vec<usize> = text.plain().char_indices().map(|(i, _)| i).collect();
        let to_char = |byte: usize| char_starts.binary_search(&byte).unwrap_or_else(|i| i);

        let mut found = Vec::new();
        for caps in self.pattern.captures_iter(text.plain()) {
            for (name, tag) in &self.groups {
                if let Some(group) = caps.name(name) {
                    found.push((to_char(group.start()), to_char(group.end()), tag.clone()));
                }
            }
        }

        for (start, end, tag) in found {
            text.stylize(start, end, tag);
        }
    }
}

/// Ordered list of highlight rules, applied in order
#[derive(Debug, Clone)]
pub struct HighlightRuleSet {
    rules: Vec<HighlightRule>,
}

impl HighlightRuleSet {
    /// An empty rule set; highlighting is disabled
    pub fn new() -> Self {
        HighlightRuleSet { rules: Vec::new() }
    }

    /// Compile a rule set from patterns
    pub fn from_patterns<I, S>(patterns: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| HighlightRule::new(p.as_ref()))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(HighlightRuleSet { rules })
    }

    /// Add a rule at lowest priority (applied last, wins overlaps)
    pub fn push(&mut self, rule: HighlightRule) {
        self.rules.push(rule);
    }

    /// The rules in application order
    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// Whether no rule is configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to `text`
    pub fn apply(&self, text: &mut StyledText) {
        for rule in &self.rules {
            rule.apply(text);
        }
    }
}

impl Default for HighlightRuleSet {
    fn default() -> Self {
        Self::from_patterns([ARGS_PATTERN, SYNTAX_PATTERN]).unwrap_or_else(|_| Self::new())
    }
}

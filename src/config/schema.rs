//! Configuration validation
//!
//! This module provides validation logic for configuration files.

use crate::config::types::HelpConfig;
use crate::error::{ConfigError, ConfigResult, ThemeError};
use crate::text::StyleTag;
use crate::theme::{is_builtin_theme, Style};
use tracing::warn;

/// Validate a complete configuration
pub fn validate_config(config: &HelpConfig) -> ConfigResult<()> {
    if config.width == Some(0) {
        return Err(ConfigError::Invalid("width must be greater than 0".to_string()));
    }

    if config.min_column_width > config.max_column_width {
        return Err(ConfigError::Invalid(format!(
            "min_column_width ({}) is larger than max_column_width ({})",
            config.min_column_width, config.max_column_width
        )));
    }

    if !is_builtin_theme(&config.theme) {
        return Err(ConfigError::Invalid(
            ThemeError::UnknownTheme(config.theme.clone()).to_string(),
        ));
    }

    for definition in config.styles.values() {
        Style::parse(definition).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    }

    let rules = config.highlight_rules()?;

    for warning in style_warnings(config) {
        warn!("{}", warning);
    }
    if rules.is_empty() {
        warn!("highlighting is disabled: the highlight list is empty");
    }

    Ok(())
}

/// Style overrides for tags that nothing produces.
///
/// These are not fatal: the style is simply never used.
pub fn style_warnings(config: &HelpConfig) -> Vec<ThemeError> {
    let highlight_tags: Vec<StyleTag> = config
        .highlight_rules()
        .map(|rules| {
            rules
                .rules()
                .iter()
                .flat_map(|rule| rule.tags().cloned())
                .collect()
        })
        .unwrap_or_default();

    config
        .styles
        .keys()
        .filter(|tag| {
            !StyleTag::BUILTIN.iter().any(|known| known.as_str() == tag.as_str())
                && !highlight_tags.iter().any(|known| known.as_str() == tag.as_str())
        })
        .map(|tag| ThemeError::UnknownStyleTag(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HighlightConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&HelpConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_width() {
        let config = HelpConfig {
            width: Some(0),
            ..Default::default()
        };
        assert!(matches!(validate_config(&config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_column_bounds() {
        let config = HelpConfig {
            min_column_width: 30,
            max_column_width: 20,
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_theme() {
        let config = HelpConfig {
            theme: "solarized".to_string(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("solarized"));

        let anti = HelpConfig {
            theme: "anti_prince".to_string(),
            ..Default::default()
        };
        assert!(validate_config(&anti).is_ok());
    }

    #[test]
    fn test_bad_style_override() {
        let mut config = HelpConfig::default();
        config.styles.insert("args".to_string(), "bold glittery".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_highlight_pattern() {
        let config = HelpConfig {
            highlights: Some(vec![HighlightConfig::Pattern("(?P<args>[".to_string())]),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidHighlight { .. })
        ));
    }

    #[test]
    fn test_unused_style_tags_only_warn() {
        let mut config = HelpConfig::default();
        config.styles.insert("args".to_string(), "bold".to_string());
        config.styles.insert("sparkles".to_string(), "bold".to_string());
        config.highlights = Some(vec![HighlightConfig::Pattern(
            r"(?P<number>\d+)".to_string(),
        )]);
        config.styles.insert("number".to_string(), "cyan".to_string());

        assert!(validate_config(&config).is_ok());
        assert_eq!(
            style_warnings(&config),
            vec![ThemeError::UnknownStyleTag("sparkles".to_string())]
        );
    }
}

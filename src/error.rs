//! Error types for richhelp

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for richhelp operations
pub type Result<T> = std::result::Result<T, HelpError>;

/// Main error type for richhelp
#[derive(Error, Debug)]
pub enum HelpError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `%(param)s` expansion errors
    #[error("Placeholder error: {0}")]
    Placeholder(#[from] PlaceholderError),

    /// Theme and style errors
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    /// Parser definition files that describe an impossible parser
    #[error("Invalid parser definition: {0}")]
    Definition(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find config file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid highlight pattern '{pattern}': {error}")]
    InvalidHighlight { pattern: String, error: String },

    #[error("Failed to read '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },
}

/// Raised when the usage line does not have the shape the actions imply
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedUsageError {
    #[error("unbalanced '{bracket}' at offset {offset}")]
    UnbalancedCloser { bracket: char, offset: usize },

    #[error("group opened at offset {offset} is never closed")]
    UnclosedGroup { offset: usize },

    #[error("expected {expected} bracketed groups but found {found}")]
    MissingGroup { expected: usize, found: usize },

    #[error("'{token}' not found after offset {from}")]
    TokenNotFound { token: String, from: usize },
}

/// `%(param)s` expansion errors, always naming the offending action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("help of '{action}' refers to unknown parameter '{key}'")]
    MissingKey { action: String, key: String },

    #[error("help of '{action}' uses '{spec}' without a parameter name")]
    Unnamed { action: String, spec: String },

    #[error("help of '{action}': cannot format {key}={value} with '%{conversion}'")]
    InvalidConversion {
        action: String,
        key: String,
        value: String,
        conversion: char,
    },
}

/// Theme and style errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("Invalid style '{style}': {reason}")]
    InvalidStyle { style: String, reason: String },

    #[error("Style tag '{0}' is not defined by the theme")]
    UnknownStyleTag(String),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for usage span resolution
pub type UsageResult<T> = std::result::Result<T, MalformedUsageError>;

/// Specialized result type for placeholder expansion
pub type PlaceholderResult<T> = std::result::Result<T, PlaceholderError>;

/// Specialized result type for theme operations
pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

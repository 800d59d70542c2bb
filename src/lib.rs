//! richhelp - colorful, column-aligned help for command-line parsers
//!
//! richhelp lays out command-line help (usage, descriptions, argument
//! sections) as styled text and renders it as plain text, ANSI escapes or
//! HTML, using themes and regex highlights.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod layout;
pub mod parser;
pub mod text;
pub mod theme;
pub mod usage;

// Re-export commonly used types
pub use error::{HelpError, Result};
pub use formatter::{HelpFormatter, RenderContext};

/// Current version of richhelp
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

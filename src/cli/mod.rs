//! CLI interface and argument parsing
//!
//! This module handles the `richhelp` command line: loading a parser
//! definition and configuration, then printing or exporting its help.

pub mod app;

// Re-export main types
pub use app::*;

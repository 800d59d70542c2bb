//! Parser definitions
//!
//! This module reads declarative parser descriptions from YAML and
//! builds the actions, mutex groups and sections the formatter renders.

pub mod definition;

// Re-export main types
pub use definition::*;

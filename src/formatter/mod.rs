//! Help formatting
//!
//! This module turns parser actions and texts into a styled section tree:
//! placeholder expansion, formatter policies, the render context and the
//! formatter itself.

pub mod context;
pub mod help;
pub mod placeholder;
pub mod policy;

// Re-export main types
pub use context::*;
pub use help::*;
pub use placeholder::*;
pub use policy::*;

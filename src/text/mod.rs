//! Styled text primitives
//!
//! This module holds the plain-string-plus-spans buffer every other part of
//! the crate passes around, and the markup reader and regex highlighter
//! that decorate it.

pub mod highlight;
pub mod markup;
pub mod span;
pub mod styled;

// Re-export main types
pub use highlight::*;
pub use markup::*;
pub use span::*;
pub use styled::*;

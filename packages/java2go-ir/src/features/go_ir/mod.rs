//! Go IR Feature
//!
//! Target-program data model and its text rendering.
//!
//! ## Structure
//! - `domain/` - types, expressions, statements, declarations, file root
//! - `infrastructure/` - indentation-aware writer and renderer

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::GoRenderer;

//! Shared models

mod span;

pub use span::Span;
pub use crate::errors::{MigrationError, Result};

//! Parsing Feature
//!
//! Turns Java source text into an arena-backed syntax tree.
//!
//! ## Structure
//! - `domain/` - SyntaxTree arena, SyntaxNode, closed SyntaxKind
//! - `infrastructure/` - tree-sitter adapter

pub mod domain;
pub mod infrastructure;

pub use domain::{NodeId, ParseError, SyntaxKind, SyntaxNode, SyntaxTree};
pub use infrastructure::TreeSitterParser;

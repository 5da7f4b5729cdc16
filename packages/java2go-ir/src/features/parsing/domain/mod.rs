//! Parsing domain models

mod syntax_kind;
mod syntax_tree;

pub use syntax_kind::SyntaxKind;
pub use syntax_tree::{NodeId, ParseError, SyntaxNode, SyntaxTree};

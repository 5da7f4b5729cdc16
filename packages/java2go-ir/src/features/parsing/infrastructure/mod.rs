//! Parsing infrastructure (tree-sitter lives here)

mod tree_sitter_parser;

pub use tree_sitter_parser::TreeSitterParser;

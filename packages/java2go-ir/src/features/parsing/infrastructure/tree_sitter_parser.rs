//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives. The tree-sitter tree is
//! copied into a `SyntaxTree` arena right after parsing.

use tracing::{debug, warn};
use tree_sitter::{Node as TSNode, Parser as TSParser, Tree};

use crate::features::parsing::domain::{NodeId, ParseError, SyntaxKind, SyntaxNode, SyntaxTree};
use crate::shared::models::{MigrationError, Result, Span};

/// Tree-sitter based Java parser
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterParser;

impl TreeSitterParser {
    pub fn java() -> Self {
        Self
    }

    /// Parse Java source into an arena tree
    pub fn parse(&self, source: &str, file_path: &str) -> Result<SyntaxTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&tree_sitter_java::language())
            .map_err(|e| MigrationError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| MigrationError::parse("Failed to parse source code"))?;

        Ok(self.convert_tree(&tree, source, file_path))
    }

    fn convert_tree(&self, tree: &Tree, source: &str, file_path: &str) -> SyntaxTree {
        let mut arena = SyntaxTree::new(source.to_string(), file_path.to_string());
        let root = tree.root_node();
        self.convert_node(&mut arena, &root, None, None);

        let mut errors = Vec::new();
        collect_errors(&root, &mut errors);
        for error in &errors {
            warn!(
                "{}: {}",
                error.span.location(file_path),
                error.message
            );
        }
        arena.errors = errors;

        debug!("parsed {} into {} nodes", file_path, arena.len());
        arena
    }

    fn convert_node(
        &self,
        arena: &mut SyntaxTree,
        node: &TSNode,
        parent: Option<NodeId>,
        field: Option<&'static str>,
    ) -> NodeId {
        let id = arena.push(SyntaxNode {
            kind: SyntaxKind::from_raw(node.kind(), node.is_named()),
            raw_kind: node.kind(),
            span: to_span(node),
            byte_range: node.byte_range(),
            parent,
            children: Vec::new(),
            field,
            is_named: node.is_named(),
        });

        let mut children = Vec::with_capacity(node.child_count());
        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                let child_field = cursor.field_name();
                children.push(self.convert_node(arena, &child, Some(id), child_field));
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
        arena.node_mut(id).children = children;
        id
    }
}

fn to_span(node: &TSNode) -> Span {
    Span::new(
        node.start_position().row as u32 + 1,
        node.start_position().column as u32,
        node.end_position().row as u32 + 1,
        node.end_position().column as u32,
    )
}

fn collect_errors(node: &TSNode, errors: &mut Vec<ParseError>) {
    if node.is_error() || node.is_missing() {
        errors.push(ParseError {
            message: format!("Parse error at {:?}", node.kind()),
            span: to_span(node),
        });
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_errors(&child, errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_java_class() {
        let parser = TreeSitterParser::java();
        let tree = parser
            .parse("class Foo { int a; }", "Foo.java")
            .unwrap();

        assert!(tree.errors.is_empty());
        let root = tree.root();
        assert_eq!(tree.kind(root), SyntaxKind::Program);
        let class = tree.named_children(root).next().unwrap();
        assert_eq!(tree.kind(class), SyntaxKind::ClassDeclaration);
        let name = tree.child_by_field(class, "name").unwrap();
        assert_eq!(tree.text(name), "Foo");
    }

    #[test]
    fn test_parse_records_errors() {
        let parser = TreeSitterParser::java();
        let tree = parser.parse("class { int }", "Broken.java").unwrap();
        assert!(!tree.errors.is_empty());
    }
}

//! Arena-backed syntax tree
//!
//! Nodes live in a flat `Vec` and are addressed by `NodeId`, so caches keyed
//! by node identity stay valid for the lifetime of the tree regardless of how
//! the underlying parser lays out its own nodes.

use std::ops::Range;

use super::syntax_kind::SyntaxKind;
use crate::shared::models::Span;

/// Stable index of a node inside its `SyntaxTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the arena
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    /// Grammar kind as reported by the parser
    pub raw_kind: &'static str,
    pub span: Span,
    pub byte_range: Range<usize>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Field name under which the parent holds this node
    pub field: Option<&'static str>,
    pub is_named: bool,
}

/// Parse error
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

/// Parsed Java compilation unit
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    file_path: String,
    nodes: Vec<SyntaxNode>,
    pub errors: Vec<ParseError>,
}

impl SyntaxTree {
    pub fn new(source: String, file_path: String) -> Self {
        Self {
            source,
            file_path,
            nodes: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Append a node; the caller links it into its parent's child list
    pub fn push(&mut self, node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        &mut self.nodes[id.index()]
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id.index()].kind
    }

    pub fn raw_kind(&self, id: NodeId) -> &'static str {
        self.nodes[id.index()].raw_kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Source text covered by a node
    pub fn text(&self, id: NodeId) -> &str {
        self.source
            .get(self.nodes[id.index()].byte_range.clone())
            .unwrap_or("")
    }

    /// `path:row:col`, 1-based
    pub fn location(&self, id: NodeId) -> String {
        self.span(id).location(&self.file_path)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// All children, named and anonymous
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Named children, comments excluded
    pub fn named_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).iter().copied().filter(move |c| {
            let node = self.node(*c);
            node.is_named && !node.kind.is_comment()
        })
    }

    pub fn child_by_field(&self, id: NodeId, field: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.node(*c).field == Some(field))
    }

    pub fn children_by_field(&self, id: NodeId, field: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.node(*c).field == Some(field))
            .collect()
    }

    pub fn child_of_kind(&self, id: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|c| self.kind(*c) == kind)
    }

    pub fn children_of_kind(&self, id: NodeId, kind: SyntaxKind) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.kind(*c) == kind)
            .collect()
    }

    /// True if an anonymous token with this text is a direct child
    pub fn has_token(&self, id: NodeId, token: &str) -> bool {
        self.children(id)
            .iter()
            .any(|c| !self.node(*c).is_named && self.raw_kind(*c) == token)
    }

    /// Text of the child held under `field`
    pub fn field_text(&self, id: NodeId, field: &str) -> Option<&str> {
        self.child_by_field(id, field).map(|c| self.text(c))
    }

    /// True if the node's `modifiers` child carries this keyword
    pub fn has_modifier(&self, id: NodeId, modifier: &str) -> bool {
        self.child_of_kind(id, SyntaxKind::Modifiers)
            .map_or(false, |m| self.has_token(m, modifier))
    }

    /// Unrestricted depth-first search below `id` (excluding `id` itself)
    pub fn descendants_where<F>(&self, id: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&SyntaxNode) -> bool,
    {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if pred(self.node(current)) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// Every identifier spelled anywhere below `id`
    pub fn identifiers_in(&self, id: NodeId) -> Vec<&str> {
        self.descendants_where(id, |n| n.kind == SyntaxKind::Identifier)
            .into_iter()
            .map(|n| self.text(n))
            .collect()
    }

    /// S-expression of the named subtree, with field labels
    pub fn sexp(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_sexp(id, &mut out);
        out
    }

    fn write_sexp(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push('(');
        out.push_str(node.raw_kind);
        for child in self.named_children(id) {
            out.push(' ');
            if let Some(field) = self.node(child).field {
                out.push_str(field);
                out.push_str(": ");
            }
            self.write_sexp(child, out);
        }
        out.push(')');
    }
}

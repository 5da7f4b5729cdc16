//! Lowering Feature
//!
//! Java statements and expressions → Go IR.
//!
//! Every expression converter appends any statements that must run before
//! the expression (hoisted statements) to a caller-provided buffer and
//! returns the expression itself.
//!
//! ## Structure
//! - `scope` - BodyScope (receiver style, locals, return shape)
//! - `statements` - blocks, declarations, loops, jumps
//! - `expressions` - operators, literals, names, creation
//! - `calls` - method invocations and library call patterns
//! - `control` - switch and try/catch/finally
//! - `literals` - literal spelling conversion

mod calls;
mod control;
mod expressions;
mod literals;
pub mod scope;
mod statements;

pub use scope::{BodyScope, Local, ReturnEscape, ReturnShape, SelfStyle, YieldTarget};

use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{GoExpr, GoStmt, GoType};
use crate::features::migration::{FieldInfo, MigrationContext};
use crate::features::parsing::{NodeId, SyntaxTree};
use crate::features::type_mapping::{wrap_dims, TypeScope};

/// Statement and expression converter for one body
pub struct Lowerer<'t, 'c> {
    pub(crate) tree: &'t SyntaxTree,
    pub(crate) ctx: &'c mut MigrationContext,
    pub(crate) scope: BodyScope,
}

impl<'t, 'c> Lowerer<'t, 'c> {
    pub fn new(tree: &'t SyntaxTree, ctx: &'c mut MigrationContext, scope: BodyScope) -> Self {
        Self { tree, ctx, scope }
    }

    pub fn scope_mut(&mut self) -> &mut BodyScope {
        &mut self.scope
    }

    /// Lower an initializer that may be an array initializer of a known type
    pub fn lower_initializer(
        &mut self,
        node: NodeId,
        hint: Option<&GoType>,
    ) -> Result<(GoExpr, Vec<GoStmt>)> {
        let mut pre = Vec::new();
        let expr = self.expr_with_hint(node, hint, &mut pre)?;
        Ok((expr, pre))
    }

    pub(crate) fn text(&self, node: NodeId) -> &'t str {
        self.tree.text(node)
    }

    /// Required field child
    pub(crate) fn field(&self, node: NodeId, field: &str) -> Result<NodeId> {
        self.tree
            .child_by_field(node, field)
            .ok_or_else(|| MigrationError::structural(self.tree.raw_kind(node), field))
    }

    /// Required n-th named child
    pub(crate) fn nth_named(&self, node: NodeId, n: usize) -> Result<NodeId> {
        self.tree
            .named_children(node)
            .nth(n)
            .ok_or_else(|| MigrationError::structural(self.tree.raw_kind(node), "operand"))
    }

    pub(crate) fn map_type(&self, node: NodeId) -> Result<GoType> {
        self.ctx.type_mapper(&self.scope.types).map(self.tree, node)
    }

    pub(crate) fn map_type_name(&self, name: &str) -> GoType {
        self.ctx.type_mapper(&self.scope.types).map_name(name)
    }

    /// Go type of a declared field, mapped in its owner's type scope
    pub(crate) fn field_type(&self, owner: &str, field: &FieldInfo) -> Option<GoType> {
        let type_scope = TypeScope::new(
            self.ctx
                .type_info(owner)
                .map(|t| t.type_params.clone())
                .unwrap_or_default(),
        );
        self.ctx
            .type_mapper(&type_scope)
            .map(self.tree, field.type_node)
            .ok()
            .map(|ty| wrap_dims(ty, field.extra_dims))
    }

    pub(crate) fn import(&mut self, path: &str) {
        self.ctx.file.add_import(path);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{MigrationConfig, Mode};
    use crate::features::go_ir::{GoFunction, GoRenderer};
    use crate::features::parsing::{SyntaxKind, TreeSitterParser};
    use crate::features::signatures::SignatureAnalyzer;

    /// Lower the body of the first method in `source` with a plain receiver
    /// named `r`, rendering the statements as Go text
    pub fn lower_method_body(source: &str) -> String {
        try_lower_method_body(source).unwrap()
    }

    /// Like `lower_method_body`, surfacing the lowering error
    pub fn try_lower_method_body(source: &str) -> crate::errors::Result<String> {
        let tree = TreeSitterParser::java().parse(source, "Test.java").unwrap();
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Strict);
        SignatureAnalyzer::new(&tree).analyze(&mut ctx);

        let method = tree
            .descendants_where(tree.root(), |n| n.kind == SyntaxKind::MethodDeclaration)[0];
        let owner = ctx.signature(method).unwrap().owner.clone();
        let body = tree.child_by_field(method, "body").unwrap();
        let has_value = tree
            .child_by_field(method, "type")
            .map_or(false, |t| tree.kind(t) != SyntaxKind::VoidType);

        let scope = BodyScope::new(
            Some(owner),
            SelfStyle::Receiver("r".to_string()),
            TypeScope::default(),
            ReturnShape::plain(has_value),
        );
        let mut lowerer = Lowerer::new(&tree, &mut ctx, scope);
        if let Some(params) = tree.child_by_field(method, "parameters") {
            for param in crate::features::signatures::formal_parameters(&tree, params) {
                let ty = lowerer.map_type(param.type_node).ok();
                lowerer.scope_mut().declare(&param.name, ty);
            }
        }
        let stmts = lowerer.lower_block(body)?;

        let mut function = GoFunction::new("f");
        function.body = stmts;
        let mut file = ctx.file.clone();
        file.imports.clear();
        file.functions = vec![function];
        file.methods.clear();
        file.vars.clear();
        let text = GoRenderer::new().render(&file);
        let start = text.find("func f() {\n").unwrap() + "func f() {\n".len();
        let end = text.rfind("}").unwrap();
        Ok(text[start..end]
            .lines()
            .map(|l| format!("{}\n", l.strip_prefix('\t').unwrap_or(l)))
            .collect())
    }
}

//! Member conversion shared by every declaration kind

use super::DeclarationConverter;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{
    GoExpr, GoField, GoFunction, GoParam, GoStmt, GoType, MethodSpec, Receiver, TypeParam,
    ValueSpec,
};
use crate::features::lowering::{BodyScope, Lowerer, ReturnShape, SelfStyle};
use crate::features::migration::{FieldInfo, MigrationContext, TypeKind};
use crate::features::parsing::{NodeId, SyntaxKind, SyntaxTree};
use crate::features::signatures::{fold_throws, formal_parameters, simple_type_name};
use crate::features::type_mapping::{wrap_dims, TypeScope};
use crate::shared::utils::escape_identifier;

/// Declarations satisfying `pred` that belong to `owner` itself: members of
/// its body at any depth, but not of nested types, code blocks, anonymous
/// classes or enum constant bodies
pub fn owned<F>(tree: &SyntaxTree, owner: NodeId, pred: F) -> Vec<NodeId>
where
    F: Fn(SyntaxKind) -> bool,
{
    tree.descendants_where(owner, |n| pred(n.kind))
        .into_iter()
        .filter(|n| nearest_owner(tree, *n) == Some(owner))
        .collect()
}

fn nearest_owner(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let mut current = tree.parent(node);
    while let Some(id) = current {
        let kind = tree.kind(id);
        if kind.is_type_declaration() {
            return Some(id);
        }
        if matches!(
            kind,
            SyntaxKind::Block
                | SyntaxKind::ConstructorBody
                | SyntaxKind::ObjectCreationExpression
                | SyntaxKind::EnumConstant
                | SyntaxKind::LambdaExpression
        ) {
            return None;
        }
        current = tree.parent(id);
    }
    None
}

/// What every member of one type needs to know about it
#[derive(Debug, Clone)]
pub(crate) struct TypeFrame {
    pub name: String,
    pub node: NodeId,
    pub types: TypeScope,
    pub type_params: Vec<TypeParam>,
    /// `Foo`, or `Foo[T]` for generic types
    pub self_type: GoType,
    pub receiver: String,
}

impl TypeFrame {
    pub fn pointer(&self) -> GoType {
        GoType::pointer(self.self_type.clone())
    }

    /// `self_type` with another base name (`FooBase[T]`)
    pub fn renamed(&self, base: &str) -> GoType {
        match &self.self_type {
            GoType::Generic { args, .. } => GoType::Generic {
                base: base.to_string(),
                args: args.clone(),
            },
            _ => GoType::named(base),
        }
    }
}

/// How one Java method becomes a Go function
pub(crate) struct FunctionPlan {
    pub name: String,
    pub receiver: Option<Receiver>,
    pub style: SelfStyle,
    /// Parameters placed before the Java ones
    pub leading: Vec<GoParam>,
    /// Free functions of generic interfaces keep the interface's parameters
    pub type_params: Vec<TypeParam>,
}

impl FunctionPlan {
    /// Method with a pointer receiver
    pub fn method(frame: &TypeFrame, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: Some(Receiver {
                name: frame.receiver.clone(),
                ty: frame.pointer(),
            }),
            style: SelfStyle::Receiver(frame.receiver.clone()),
            leading: Vec::new(),
            type_params: Vec::new(),
        }
    }

    /// Free function without a `this`
    pub fn free(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            style: SelfStyle::Static,
            leading: Vec::new(),
            type_params: Vec::new(),
        }
    }
}

impl<'t> DeclarationConverter<'t> {
    pub(crate) fn frame(&self, ctx: &MigrationContext, node: NodeId, name: &str) -> TypeFrame {
        let params = ctx
            .type_info(name)
            .map(|t| t.type_params.clone())
            .unwrap_or_default();
        let types = TypeScope::new(params.clone());
        let type_params = self.type_params(ctx, node, &types);
        let self_type = if params.is_empty() {
            GoType::named(name)
        } else {
            GoType::Generic {
                base: name.to_string(),
                args: params.iter().map(GoType::named).collect(),
            }
        };
        TypeFrame {
            name: name.to_string(),
            node,
            types,
            type_params,
            self_type,
            receiver: self.receiver_name(node, name),
        }
    }

    /// Type parameters of a declaration; bounds that name a declared
    /// interface become constraints, anything else is `any`
    pub(crate) fn type_params(
        &self,
        ctx: &MigrationContext,
        decl: NodeId,
        scope: &TypeScope,
    ) -> Vec<TypeParam> {
        let tree = self.tree;
        let Some(list) = tree.child_by_field(decl, "type_parameters") else {
            return Vec::new();
        };
        tree.children_of_kind(list, SyntaxKind::TypeParameter)
            .into_iter()
            .filter_map(|param| {
                let name = tree
                    .named_children(param)
                    .find(|c| {
                        matches!(tree.kind(*c), SyntaxKind::TypeIdentifier | SyntaxKind::Identifier)
                    })
                    .map(|c| tree.text(c).to_string())?;
                let constraint = tree
                    .child_of_kind(param, SyntaxKind::TypeBound)
                    .and_then(|b| tree.named_children(b).next())
                    .map(|b| simple_type_name(tree, b))
                    .filter(|b| ctx.kind_of(b) == Some(TypeKind::Interface))
                    .map(|b| ctx.type_mapper(scope).map_name(&b))
                    .unwrap_or(GoType::Any);
                Some(TypeParam { name, constraint })
            })
            .collect()
    }

    /// Lowercase initial of the type, or `this` if a Java name already uses it
    pub(crate) fn receiver_name(&self, node: NodeId, type_name: &str) -> String {
        let initial: String = type_name
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase().to_string())
            .unwrap_or_default();
        if initial.is_empty() || self.tree.identifiers_in(node).contains(&initial.as_str()) {
            return "this".to_string();
        }
        initial
    }

    /// Lower a method (or constructor-less body) into a Go function
    pub(crate) fn function(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        node: NodeId,
        plan: FunctionPlan,
    ) -> Result<GoFunction> {
        let tree = self.tree;
        let sig = ctx.signature(node)?.clone();
        let free = plan.receiver.is_none();
        // Go methods cannot declare their own type parameters
        let types = if free {
            frame.types.with_params(&sig.type_params)
        } else {
            frame.types.with_erased(&sig.type_params)
        };

        let mut function = GoFunction::new(plan.name);
        function.provenance = Some(tree.location(node));
        function.receiver = plan.receiver;
        function.params = plan.leading;
        function.type_params = plan.type_params;
        if free {
            function.type_params.extend(self.type_params(ctx, node, &types));
        }
        let result = ctx.type_mapper(&types).map_return(tree, sig.return_type)?;
        function.results = fold_throws(result.clone(), sig.throws);

        let scope = BodyScope::new(
            Some(frame.name.clone()),
            plan.style,
            types,
            ReturnShape::returning(result.is_some(), sig.throws).with_result(result.clone()),
        );
        let mut lowerer = Lowerer::new(tree, ctx, scope);

        let mut prologue = Vec::new();
        if sig.is_entry_point() {
            // `main(String[] args)` reads the process arguments instead
            for param in self.declare_params(&mut lowerer, sig.params_node)? {
                lowerer.import("os");
                prologue.push(GoStmt::define(
                    param.name.clone(),
                    GoExpr::slice_of(
                        GoExpr::ident("os").select("Args"),
                        Some(GoExpr::lit("1")),
                        None,
                    ),
                ));
                let used = tree
                    .child_by_field(node, "body")
                    .map_or(false, |b| tree.identifiers_in(b).contains(&param.name.as_str()));
                if !used {
                    prologue.push(GoStmt::assign(GoExpr::ident("_"), GoExpr::ident(param.name)));
                }
            }
        } else {
            let params = self.declare_params(&mut lowerer, sig.params_node)?;
            function.params.extend(params);
        }

        if let Some(body) = tree.child_by_field(node, "body") {
            prologue.extend(lowerer.lower_block(body)?);
            // a throwing void method still has to hand back a nil error
            if sig.throws && result.is_none() && !prologue.last().map_or(false, GoStmt::is_terminal)
            {
                prologue.push(GoStmt::Return(vec![GoExpr::nil()]));
            }
            function.body = prologue;
        }
        Ok(function)
    }

    /// Declare formal parameters as locals, returning the Go parameters
    pub(crate) fn declare_params(
        &self,
        lowerer: &mut Lowerer<'_, '_>,
        params_node: Option<NodeId>,
    ) -> Result<Vec<GoParam>> {
        let mut out = Vec::new();
        let params = params_node
            .map(|p| formal_parameters(self.tree, p))
            .unwrap_or_default();
        for param in params {
            let ty = wrap_dims(lowerer.map_type(param.type_node)?, param.extra_dims);
            let local = if param.varargs {
                GoType::slice(ty.clone())
            } else {
                ty.clone()
            };
            let name = lowerer.scope_mut().declare(&param.name, Some(local));
            out.push(GoParam {
                name,
                ty,
                variadic: param.varargs,
            });
        }
        Ok(out)
    }

    /// Interface method specification for a method declaration
    pub(crate) fn method_spec(
        &self,
        ctx: &MigrationContext,
        frame: &TypeFrame,
        node: NodeId,
    ) -> Result<MethodSpec> {
        let tree = self.tree;
        let sig = ctx.signature(node)?;
        let types = frame.types.with_erased(&sig.type_params);
        let mapper = ctx.type_mapper(&types);
        let mut params = Vec::new();
        for param in sig
            .params_node
            .map(|p| formal_parameters(tree, p))
            .unwrap_or_default()
        {
            params.push(GoParam {
                name: escape_identifier(&param.name),
                ty: wrap_dims(mapper.map(tree, param.type_node)?, param.extra_dims),
                variadic: param.varargs,
            });
        }
        let result = mapper.map_return(tree, sig.return_type)?;
        Ok(MethodSpec {
            name: sig.target_name.clone(),
            params,
            results: fold_throws(result, sig.throws),
        })
    }

    /// Forwarding method body: `return target(args)` or `target(args)`
    pub(crate) fn forwarder(
        &self,
        spec: &MethodSpec,
        receiver: Receiver,
        target: GoExpr,
        leading: Vec<GoExpr>,
    ) -> GoFunction {
        let mut args = leading;
        args.extend(spec.params.iter().map(|p| GoExpr::ident(p.name.clone())));
        let variadic = spec.params.last().map_or(false, |p| p.variadic);
        let call = GoExpr::Call {
            func: Box::new(target),
            args,
            spread: variadic,
            comment: None,
        };
        let mut function = GoFunction::new(spec.name.clone());
        function.receiver = Some(receiver);
        function.params = spec.params.clone();
        function.results = spec.results.clone();
        function.body = if spec.results.is_empty() {
            vec![GoStmt::Expr(call)]
        } else {
            vec![GoStmt::Return(vec![call])]
        };
        function
    }

    /// Instance fields as Go struct fields
    pub(crate) fn struct_fields(
        &self,
        ctx: &MigrationContext,
        frame: &TypeFrame,
    ) -> Result<Vec<GoField>> {
        let mapper = ctx.type_mapper(&frame.types);
        let mut fields = Vec::new();
        if let Some(info) = ctx.type_info(&frame.name) {
            for field in info.instance_fields() {
                let ty = wrap_dims(mapper.map(self.tree, field.type_node)?, field.extra_dims);
                fields.push(GoField::new(field.target.clone(), ty));
            }
        }
        Ok(fields)
    }

    /// Static fields as module variables, one failure boundary each;
    /// with `prefer_const`, final fields holding a literal become constants
    pub(crate) fn static_fields(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        prefer_const: bool,
    ) -> Result<()> {
        let fields: Vec<FieldInfo> = ctx
            .type_info(&frame.name)
            .map(|t| t.fields.iter().filter(|f| f.is_static).cloned().collect())
            .unwrap_or_default();
        for field in fields {
            ctx.guarded(self.tree, field.declarator, |ctx| {
                self.static_field(ctx, frame, &field, prefer_const)
            })?;
        }
        Ok(())
    }

    fn static_field(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        field: &FieldInfo,
        prefer_const: bool,
    ) -> Result<()> {
        let tree = self.tree;
        let ty = wrap_dims(
            ctx.type_mapper(&frame.types).map(tree, field.type_node)?,
            field.extra_dims,
        );
        let Some(value_node) = tree.child_by_field(field.declarator, "value") else {
            ctx.file.vars.push(ValueSpec {
                name: field.target.clone(),
                ty: Some(ty),
                value: None,
            });
            return Ok(());
        };

        let scope = BodyScope::new(
            Some(frame.name.clone()),
            SelfStyle::Static,
            frame.types.clone(),
            ReturnShape::plain(true).with_result(Some(ty.clone())),
        );
        let mut lowerer = Lowerer::new(tree, ctx, scope);
        let (value, pre) = lowerer.lower_initializer(value_node, Some(&ty))?;
        let value = if pre.is_empty() {
            value
        } else {
            let mut body = pre;
            body.push(GoStmt::Return(vec![value]));
            GoExpr::iife(vec![ty.clone()], body)
        };

        let spec = ValueSpec {
            name: field.target.clone(),
            ty: Some(ty.clone()),
            value: Some(value.clone()),
        };
        if prefer_const && field.is_final && ty.is_basic() && matches!(value, GoExpr::Lit(_)) {
            ctx.file.consts.push(spec);
        } else {
            ctx.file.vars.push(spec);
        }
        Ok(())
    }

    /// `receiver.field = initializer` for every initialized instance field,
    /// in lexicographic order of the Java names
    pub(crate) fn field_initializers(
        &self,
        lowerer: &mut Lowerer<'_, '_>,
        owner: &str,
        receiver: &GoExpr,
    ) -> Result<Vec<GoStmt>> {
        let mut fields: Vec<FieldInfo> = lowerer
            .ctx
            .type_info(owner)
            .map(|t| t.instance_fields().cloned().collect())
            .unwrap_or_default();
        fields.retain(|f| self.tree.child_by_field(f.declarator, "value").is_some());
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = Vec::new();
        for field in fields {
            let Some(value) = self.tree.child_by_field(field.declarator, "value") else {
                continue;
            };
            let ty = lowerer.field_type(owner, &field);
            let (expr, pre) = lowerer.lower_initializer(value, ty.as_ref())?;
            out.extend(pre);
            out.push(GoStmt::assign(
                receiver.clone().select(field.target.clone()),
                expr,
            ));
        }
        Ok(out)
    }

    /// Instance initializer blocks (`{ ... }` directly in a class body)
    pub(crate) fn instance_initializers(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .child_by_field(node, "body")
            .map(|body| self.tree.children_of_kind(body, SyntaxKind::Block))
            .unwrap_or_default()
    }

    /// `static { ... }` blocks as `func init()`, one boundary each
    pub(crate) fn static_initializers(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
    ) -> Result<()> {
        let tree = self.tree;
        for init in owned(tree, frame.node, |k| k == SyntaxKind::StaticInitializer) {
            ctx.guarded(tree, init, |ctx| {
                let block = tree
                    .child_of_kind(init, SyntaxKind::Block)
                    .ok_or_else(|| MigrationError::structural("static_initializer", "block"))?;
                let scope = BodyScope::new(
                    Some(frame.name.clone()),
                    SelfStyle::Static,
                    frame.types.clone(),
                    ReturnShape::plain(false),
                );
                let body = Lowerer::new(tree, ctx, scope).lower_block(block)?;
                let mut function = GoFunction::new("init");
                function.provenance = Some(tree.location(init));
                function.body = body;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::TreeSitterParser;

    #[test]
    fn test_owned_skips_nested_and_local_declarations() {
        let tree = TreeSitterParser::java()
            .parse(
                "class A { int x; void f() { class L { void g() {} } } static class B { void h() {} } }",
                "A.java",
            )
            .unwrap();
        let a = tree.descendants_where(tree.root(), |n| n.kind == SyntaxKind::ClassDeclaration)[0];
        let methods: Vec<&str> = owned(&tree, a, |k| k == SyntaxKind::MethodDeclaration)
            .into_iter()
            .filter_map(|m| tree.field_text(m, "name"))
            .collect();
        assert_eq!(methods, vec!["f"]);
        let nested: Vec<&str> = owned(&tree, a, |k| k.is_type_declaration())
            .into_iter()
            .filter_map(|m| tree.field_text(m, "name"))
            .collect();
        assert_eq!(nested, vec!["B"]);
    }

    #[test]
    fn test_receiver_name_avoids_collisions() {
        let tree = TreeSitterParser::java()
            .parse("class Circle { int c; } class Square { int side; }", "A.java")
            .unwrap();
        let classes = tree.descendants_where(tree.root(), |n| n.kind == SyntaxKind::ClassDeclaration);
        let converter = DeclarationConverter::new(&tree);
        assert_eq!(converter.receiver_name(classes[0], "Circle"), "this");
        assert_eq!(converter.receiver_name(classes[1], "Square"), "s");
    }
}

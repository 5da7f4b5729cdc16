//! Records

use super::class::{Composition, ConstructorTarget};
use super::members::{owned, FunctionPlan, TypeFrame};
use super::DeclarationConverter;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{GoExpr, GoFunction, GoStmt, GoStruct};
use crate::features::lowering::{BodyScope, Lowerer, ReturnShape, SelfStyle};
use crate::features::migration::{FieldInfo, MigrationContext};
use crate::features::parsing::{NodeId, SyntaxKind};

impl<'t> DeclarationConverter<'t> {
    pub(crate) fn record(&self, ctx: &mut MigrationContext, node: NodeId, name: &str) -> Result<()> {
        let tree = self.tree;
        let info = ctx
            .type_info(name)
            .cloned()
            .ok_or_else(|| MigrationError::internal(format!("type `{}` was not analyzed", name)))?;
        let frame = self.frame(ctx, node, name);
        let components: Vec<FieldInfo> = info.instance_fields().cloned().collect();

        let mut go_struct = GoStruct::new(name);
        go_struct.type_params = frame.type_params.clone();
        go_struct.fields = self.struct_fields(ctx, &frame)?;
        ctx.file.structs.push(go_struct);

        self.interface_assertions(ctx, &info, &frame);
        self.static_fields(ctx, &frame, false)?;

        let canonical_types = ctx.signature(node)?.param_types.clone();
        let explicit = owned(tree, node, |k| k == SyntaxKind::ConstructorDeclaration);
        let mut has_canonical = false;
        for ctor in &explicit {
            has_canonical |= ctx.signature(*ctor)?.param_types == canonical_types;
        }
        if !has_canonical {
            let compact = owned(tree, node, |k| k == SyntaxKind::CompactConstructorDeclaration)
                .into_iter()
                .next();
            ctx.guarded(tree, compact.unwrap_or(node), |ctx| {
                let function = self.canonical_constructor(ctx, &frame, node, compact, &components)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }
        let target = ConstructorTarget {
            built: frame.self_type.clone(),
            wire: false,
            synthesized: false,
        };
        for ctor in explicit {
            ctx.guarded(tree, ctor, |ctx| {
                let function =
                    self.constructor(ctx, &frame, &Composition::default(), ctor, &target)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }

        for method in owned(tree, node, |k| k == SyntaxKind::MethodDeclaration) {
            ctx.guarded(tree, method, |ctx| {
                let sig = ctx.signature(method)?.clone();
                // explicit accessors collide with the exported field
                let accessor = !sig.is_static
                    && sig.arity() == 0
                    && components.iter().any(|c| c.name == sig.name);
                if accessor {
                    return Ok(());
                }
                let plan = if sig.is_static {
                    FunctionPlan::free(sig.target_name.clone())
                } else {
                    FunctionPlan::method(&frame, sig.target_name.clone())
                };
                let function = self.function(ctx, &frame, method, plan)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }

        self.default_forwarders(ctx, &frame)?;
        self.static_initializers(ctx, &frame)?;
        self.convert_nested(ctx, node)
    }

    /// `NewR(components...)`: the compact body runs first, then every
    /// component is stored in its field
    fn canonical_constructor(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        node: NodeId,
        compact: Option<NodeId>,
        components: &[FieldInfo],
    ) -> Result<GoFunction> {
        let tree = self.tree;
        let sig = ctx.signature(node)?.clone();
        let recv = frame.receiver.clone();

        let mut function = GoFunction::new(sig.target_name.clone());
        function.provenance = Some(tree.location(compact.unwrap_or(node)));
        function.type_params = frame.type_params.clone();
        function.results = vec![frame.pointer()];

        let scope = BodyScope::new(
            Some(frame.name.clone()),
            SelfStyle::Receiver(recv.clone()),
            frame.types.clone(),
            ReturnShape::constructor(recv.clone()),
        );
        let mut lowerer = Lowerer::new(tree, ctx, scope);
        function.params = self.declare_params(&mut lowerer, sig.params_node)?;

        let mut body = vec![GoStmt::define(
            recv.clone(),
            GoExpr::call_named("new", vec![GoExpr::Raw(frame.self_type.to_string())]),
        )];
        if let Some(block) = compact.and_then(|c| tree.child_by_field(c, "body")) {
            body.extend(lowerer.lower_block(block)?);
        }
        for (param, field) in function.params.iter().zip(components) {
            body.push(GoStmt::assign(
                GoExpr::ident(recv.clone()).select(field.target.clone()),
                GoExpr::ident(param.name.clone()),
            ));
        }
        body.push(GoStmt::Return(vec![GoExpr::ident(recv)]));
        function.body = body;
        Ok(function)
    }
}

#[cfg(test)]
mod tests {
    use crate::features::declarations::test_support::convert_source;

    const POINT: &str = "record Point(int x, int y) {\n\
        Point { if (x < 0) { x = 0; } }\n\
        int sum() { return x + y; }\n\
        public int x() { return x; }\n\
        }\n\
        class Use { int first(Point pt) { return pt.x(); } }";

    #[test]
    fn test_record_fields_and_compact_constructor() {
        let go = convert_source(POINT);
        assert!(go.contains("type Point struct {\n\tX int32\n\tY int32\n}"), "{}", go);
        assert!(
            go.contains("\tp := new(Point)\n\tif x < 0 {\n\t\tx = 0\n\t}\n\tp.X = x\n\tp.Y = y\n\treturn p\n}"),
            "{}",
            go
        );
        assert!(go.contains("func (p *Point) sum() int32 {\n\treturn p.X + p.Y\n}"), "{}", go);
    }

    #[test]
    fn test_accessors_read_fields() {
        let go = convert_source(POINT);
        assert!(!go.contains("func (p *Point) X()"), "{}", go);
        assert!(go.contains("return pt.X\n"), "{}", go);
    }
}

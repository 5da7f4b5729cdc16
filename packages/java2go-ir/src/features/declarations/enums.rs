//! Enums
//!
//! Enums without instance fields become an unsigned integer type with an
//! `iota` block; enums with fields become a struct with one package
//! variable per constant. Constant names are `Enum_CONSTANT` either way.

use tracing::debug;

use super::members::{owned, FunctionPlan, TypeFrame};
use super::DeclarationConverter;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{
    ConstBlock, GoExpr, GoFunction, GoStmt, GoStruct, GoType, Receiver, SwitchCase, TypeDef,
    ValueSpec,
};
use crate::features::lowering::{BodyScope, Lowerer, ReturnShape, SelfStyle};
use crate::features::migration::{MigrationContext, TypeKind};
use crate::features::parsing::{NodeId, SyntaxKind};

impl<'t> DeclarationConverter<'t> {
    pub(crate) fn enumeration(
        &self,
        ctx: &mut MigrationContext,
        node: NodeId,
        name: &str,
    ) -> Result<()> {
        let frame = self.frame(ctx, node, name);
        let constants: Vec<NodeId> = owned(self.tree, node, |k| k == SyntaxKind::EnumConstant);
        let complex = ctx.kind_of(name) == Some(TypeKind::ComplexEnum);
        debug!(name = %name, constants = constants.len(), complex, "Converting enum");

        let targets: Vec<String> = constants
            .iter()
            .filter_map(|c| self.tree.field_text(*c, "name"))
            .map(|c| format!("{}_{}", name, c))
            .collect();

        let value_type = if complex {
            self.complex_enum(ctx, &frame, &constants)?;
            frame.pointer()
        } else {
            ctx.file.type_defs.push(TypeDef {
                name: name.to_string(),
                underlying: GoType::named("uint"),
            });
            if !targets.is_empty() {
                ctx.file.const_blocks.push(ConstBlock {
                    ty: frame.self_type.clone(),
                    names: targets.clone(),
                });
            }
            ctx.file.push_function(string_method(name, &frame.receiver, &targets));
            ctx.file.add_import("fmt");
            frame.self_type.clone()
        };
        ctx.file.push_function(values_function(name, value_type, &targets));

        self.static_fields(ctx, &frame, false)?;
        for method in owned(self.tree, node, |k| k == SyntaxKind::MethodDeclaration) {
            ctx.guarded(self.tree, method, |ctx| {
                let sig = ctx.signature(method)?.clone();
                let plan = if sig.is_static {
                    FunctionPlan::free(sig.target_name.clone())
                } else if complex {
                    FunctionPlan::method(&frame, sig.target_name.clone())
                } else {
                    // integer enums are values; a pointer receiver buys nothing
                    let mut plan = FunctionPlan::method(&frame, sig.target_name.clone());
                    plan.receiver = Some(Receiver {
                        name: frame.receiver.clone(),
                        ty: frame.self_type.clone(),
                    });
                    plan
                };
                let function = self.function(ctx, &frame, method, plan)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }
        self.static_initializers(ctx, &frame)?;
        self.convert_nested(ctx, node)
    }

    fn complex_enum(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        constants: &[NodeId],
    ) -> Result<()> {
        let mut go_struct = GoStruct::new(&frame.name);
        go_struct.fields = self.struct_fields(ctx, frame)?;
        let fields = go_struct.fields.clone();
        ctx.file.structs.push(go_struct);

        for constant in constants {
            ctx.guarded(self.tree, *constant, |ctx| {
                let name = self
                    .tree
                    .field_text(*constant, "name")
                    .ok_or_else(|| MigrationError::structural("enum_constant", "name"))?;
                let args: Vec<NodeId> = self
                    .tree
                    .child_by_field(*constant, "arguments")
                    .map(|a| self.tree.named_children(a).collect())
                    .unwrap_or_default();

                let scope = BodyScope::new(
                    Some(frame.name.clone()),
                    SelfStyle::Static,
                    frame.types.clone(),
                    ReturnShape::default(),
                );
                let mut lowerer = Lowerer::new(self.tree, ctx, scope);
                let mut elements = Vec::new();
                if args.len() == fields.len() {
                    for (i, arg) in args.iter().enumerate() {
                        let (value, pre) = lowerer.lower_initializer(*arg, Some(&fields[i].ty))?;
                        if !pre.is_empty() {
                            return Err(MigrationError::unhandled(
                                "enum constant argument that needs statements",
                            ));
                        }
                        elements.push((Some(fields[i].name.clone()), value));
                    }
                } else {
                    debug!(
                        constant = %name,
                        args = args.len(),
                        fields = fields.len(),
                        "Enum constant arguments do not match fields"
                    );
                }
                ctx.file.vars.push(ValueSpec {
                    name: format!("{}_{}", frame.name, name),
                    ty: None,
                    value: Some(GoExpr::AddressOf(Box::new(GoExpr::Composite {
                        ty: frame.self_type.clone(),
                        elements,
                    }))),
                });
                Ok(())
            })?;
        }
        Ok(())
    }
}

/// `func ColorValues() []Color` in declaration order
fn values_function(name: &str, value_type: GoType, targets: &[String]) -> GoFunction {
    let slice = GoType::slice(value_type);
    let mut function = GoFunction::new(format!("{}Values", name));
    function.results = vec![slice.clone()];
    function.body = vec![GoStmt::Return(vec![GoExpr::Composite {
        ty: slice,
        elements: targets.iter().map(|t| (None, GoExpr::ident(t.clone()))).collect(),
    }])];
    function
}

/// `String()` returning the Java constant name
fn string_method(name: &str, receiver: &str, targets: &[String]) -> GoFunction {
    let prefix = format!("{}_", name);
    let cases = targets
        .iter()
        .map(|t| SwitchCase {
            values: vec![GoExpr::ident(t.clone())],
            body: vec![GoStmt::Return(vec![GoExpr::lit(format!(
                "\"{}\"",
                t.strip_prefix(&prefix).unwrap_or(t)
            ))])],
            fallthrough: false,
        })
        .collect();

    let mut function = GoFunction::new("String");
    function.receiver = Some(Receiver {
        name: receiver.to_string(),
        ty: GoType::named(name),
    });
    function.results = vec![GoType::named("string")];
    function.body = vec![
        GoStmt::Switch {
            tag: Some(GoExpr::ident(receiver)),
            cases,
        },
        GoStmt::Return(vec![GoExpr::call(
            GoExpr::ident("fmt").select("Sprintf"),
            vec![
                GoExpr::lit(format!("\"{}(%d)\"", name)),
                GoExpr::call_named("uint", vec![GoExpr::ident(receiver)]),
            ],
        )]),
    ];
    function
}

#[cfg(test)]
mod tests {
    use crate::features::declarations::test_support::convert_source;

    #[test]
    fn test_simple_enum_is_an_iota_block() {
        let go = convert_source("enum Color { RED, BLUE, GREEN }");
        assert!(go.contains("type Color uint"), "{}", go);
        assert!(
            go.contains("const (\n\tColor_RED Color = iota\n\tColor_BLUE\n\tColor_GREEN\n)"),
            "{}",
            go
        );
        assert!(
            go.contains("return []Color{Color_RED, Color_BLUE, Color_GREEN}"),
            "{}",
            go
        );
        assert!(go.contains("case Color_BLUE:\n\t\treturn \"BLUE\""), "{}", go);
    }

    #[test]
    fn test_complex_enum_builds_one_variable_per_constant() {
        let go = convert_source(
            "enum Planet {\n\
             MERCURY(3.3e23, 2.4e6), VENUS(4.8e24, 6.0e6);\n\
             private final double mass;\n\
             private final double radius;\n\
             Planet(double mass, double radius) { this.mass = mass; this.radius = radius; }\n\
             double massOf() { return mass; }\n\
             }",
        );
        assert!(go.contains("type Planet struct {\n\tmass float64\n\tradius float64\n}"), "{}", go);
        assert!(
            go.contains("var Planet_MERCURY = &Planet{mass: 3.3e23, radius: 2.4e6}"),
            "{}",
            go
        );
        assert!(go.contains("func PlanetValues() []*Planet {"), "{}", go);
        assert!(go.contains("func (p *Planet) massOf() float64 {\n\treturn p.mass\n}"), "{}", go);
        assert!(!go.contains("func newPlanet"), "{}", go);
    }
}

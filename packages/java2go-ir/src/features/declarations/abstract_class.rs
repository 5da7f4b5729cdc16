//! Abstract classes
//!
//! `abstract class Foo` splits into four declarations:
//! - `FooData`: accessor interface over the instance fields
//! - `FooBase`: the state, with accessors and the constructors
//! - `FooMethods`: concrete methods, calling back through `Self Foo`
//! - `Foo`: the interface every subclass satisfies

use super::class::ConstructorTarget;
use super::members::{owned, FunctionPlan, TypeFrame};
use super::DeclarationConverter;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{
    GoExpr, GoField, GoFunction, GoInterface, GoParam, GoStmt, GoStruct, GoType, MethodSpec,
    Receiver,
};
use crate::features::lowering::SelfStyle;
use crate::features::migration::{MigrationContext, TypeKind};
use crate::features::parsing::{NodeId, SyntaxKind};
use crate::shared::utils::{decapitalize, escape_identifier};

impl<'t> DeclarationConverter<'t> {
    pub(crate) fn abstract_class(
        &self,
        ctx: &mut MigrationContext,
        node: NodeId,
        name: &str,
    ) -> Result<()> {
        let info = ctx
            .type_info(name)
            .cloned()
            .ok_or_else(|| MigrationError::internal(format!("type `{}` was not analyzed", name)))?;
        let mut frame = self.frame(ctx, node, name);
        frame.receiver = self.receiver_name(node, "base");
        let composition = self.composition(ctx, &info, node, &frame)?;
        let fields = self.struct_fields(ctx, &frame)?;

        let data_name = format!("{}Data", name);
        let mut data = GoInterface::new(&data_name);
        data.type_params = frame.type_params.clone();
        for field in &fields {
            data.methods.push(getter_spec(field));
            data.methods.push(setter_spec(field));
        }

        let mut iface = GoInterface::new(name);
        iface.type_params = frame.type_params.clone();
        iface.embedded.push(frame.renamed(&data_name));
        if let Some(parent) = &composition.abstract_parent {
            let parent_iface = match composition.embedded.first() {
                Some(GoType::Generic { args, .. }) => GoType::Generic {
                    base: parent.clone(),
                    args: args.clone(),
                },
                _ => GoType::named(parent),
            };
            iface.embedded.push(parent_iface);
        }
        iface.embedded.extend(self.declared_interfaces(ctx, node, &frame)?);

        let methods: Vec<NodeId> = owned(self.tree, node, |k| k == SyntaxKind::MethodDeclaration);
        for method in &methods {
            let sig = ctx.signature(*method)?;
            if sig.is_static {
                continue;
            }
            iface.methods.push(self.method_spec(ctx, &frame, *method)?);
        }

        let base_name = format!("{}Base", name);
        let mut base = GoStruct::new(&base_name);
        base.type_params = frame.type_params.clone();
        // only the parent's state; its Methods half belongs to concrete classes
        base.embedded = composition.embedded.iter().take(1).cloned().collect();
        base.fields = fields.clone();

        let methods_name = format!("{}Methods", name);
        let mut holder = GoStruct::new(&methods_name);
        holder.type_params = frame.type_params.clone();
        holder.fields.push(GoField::new("Self", frame.self_type.clone()));

        ctx.file.interfaces.push(data);
        ctx.file.interfaces.push(iface);
        ctx.file.structs.push(base);
        ctx.file.structs.push(holder);

        let base_receiver = Receiver {
            name: frame.receiver.clone(),
            ty: GoType::pointer(frame.renamed(&base_name)),
        };
        for field in &fields {
            ctx.file.push_function(getter(field, &base_receiver));
            ctx.file.push_function(setter(field, &base_receiver));
        }

        self.static_fields(ctx, &frame, false)?;

        let target = ConstructorTarget {
            built: frame.renamed(&base_name),
            wire: false,
            synthesized: false,
        };
        for ctor in owned(self.tree, node, |k| k == SyntaxKind::ConstructorDeclaration) {
            ctx.guarded(self.tree, ctor, |ctx| {
                let function = self.constructor(ctx, &frame, &composition, ctor, &target)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }

        let methods_receiver = self.receiver_name(node, "methods");
        for method in methods {
            ctx.guarded(self.tree, method, |ctx| {
                let sig = ctx.signature(method)?.clone();
                if sig.is_abstract {
                    return Ok(());
                }
                let plan = if sig.is_static {
                    FunctionPlan::free(sig.target_name.clone())
                } else {
                    FunctionPlan {
                        name: sig.target_name.clone(),
                        receiver: Some(Receiver {
                            name: methods_receiver.clone(),
                            ty: GoType::pointer(frame.renamed(&methods_name)),
                        }),
                        style: SelfStyle::AbstractSelf(methods_receiver.clone()),
                        leading: Vec::new(),
                        type_params: Vec::new(),
                    }
                };
                let function = self.function(ctx, &frame, method, plan)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }

        self.static_initializers(ctx, &frame)?;
        self.convert_nested(ctx, node)
    }

    /// Declared interfaces listed after `implements`/`extends`, mapped with
    /// their type arguments
    pub(crate) fn declared_interfaces(
        &self,
        ctx: &MigrationContext,
        node: NodeId,
        frame: &TypeFrame,
    ) -> Result<Vec<GoType>> {
        let tree = self.tree;
        let list = tree
            .child_by_field(node, "interfaces")
            .or_else(|| tree.child_of_kind(node, SyntaxKind::ExtendsInterfaces))
            .and_then(|clause| tree.child_of_kind(clause, SyntaxKind::TypeList));
        let Some(list) = list else {
            return Ok(Vec::new());
        };
        let mapper = ctx.type_mapper(&frame.types);
        let mut out = Vec::new();
        for type_node in tree.named_children(list).collect::<Vec<_>>() {
            let ty = mapper.map(tree, type_node)?;
            let declared = ty
                .base_name()
                .map_or(false, |b| ctx.kind_of(b) == Some(TypeKind::Interface));
            if declared {
                out.push(ty);
            }
        }
        Ok(out)
    }
}

fn getter_spec(field: &GoField) -> MethodSpec {
    MethodSpec {
        name: format!("Get{}", field.name),
        params: Vec::new(),
        results: vec![field.ty.clone()],
    }
}

fn setter_spec(field: &GoField) -> MethodSpec {
    MethodSpec {
        name: format!("Set{}", field.name),
        params: vec![GoParam::new(setter_param(field), field.ty.clone())],
        results: Vec::new(),
    }
}

fn setter_param(field: &GoField) -> String {
    escape_identifier(&decapitalize(&field.name))
}

fn getter(field: &GoField, receiver: &Receiver) -> GoFunction {
    let spec = getter_spec(field);
    let mut function = GoFunction::new(spec.name);
    function.receiver = Some(receiver.clone());
    function.results = spec.results;
    function.body = vec![GoStmt::Return(vec![
        GoExpr::ident(receiver.name.clone()).select(field.name.clone())
    ])];
    function
}

fn setter(field: &GoField, receiver: &Receiver) -> GoFunction {
    let spec = setter_spec(field);
    let mut function = GoFunction::new(spec.name);
    function.receiver = Some(receiver.clone());
    function.body = vec![GoStmt::assign(
        GoExpr::ident(receiver.name.clone()).select(field.name.clone()),
        GoExpr::ident(setter_param(field)),
    )];
    function.params = spec.params;
    function
}

#[cfg(test)]
mod tests {
    use crate::features::declarations::test_support::convert_source;

    const SHAPES: &str = "abstract class Shape {\n\
        protected String name;\n\
        Shape(String name) { this.name = name; }\n\
        abstract double area();\n\
        String describe() { return name + \" \" + area(); }\n\
        }\n\
        class Square extends Shape {\n\
        double side;\n\
        Square(double side) { super(\"square\"); this.side = side; }\n\
        double area() { return side * side; }\n\
        }";

    #[test]
    fn test_abstract_class_is_split() {
        let go = convert_source(SHAPES);
        assert!(
            go.contains("type ShapeData interface {\n\tGetName() string\n\tSetName(name string)\n}"),
            "{}",
            go
        );
        assert!(go.contains("type Shape interface {\n\tShapeData\n"), "{}", go);
        assert!(go.contains("type ShapeBase struct {\n\tName string\n}"), "{}", go);
        assert!(go.contains("type ShapeMethods struct {\n\tSelf Shape\n}"), "{}", go);
        assert!(go.contains("func (b *ShapeBase) GetName() string {\n\treturn b.Name\n}"), "{}", go);
        assert!(go.contains("func newShapeBase(name string) *ShapeBase {"), "{}", go);
        assert!(go.contains("m.Self.GetName()"), "{}", go);
    }

    #[test]
    fn test_concrete_subclass_composes_halves() {
        let go = convert_source(SHAPES);
        assert!(
            go.contains("type Square struct {\n\tShapeBase\n\tShapeMethods\n\tside float64\n}"),
            "{}",
            go
        );
        assert!(go.contains("s.ShapeBase = *newShapeBase(\"square\")"), "{}", go);
        assert!(go.contains("s.ShapeMethods = ShapeMethods{Self: s}"), "{}", go);
        assert!(go.contains("var _ Shape = &Square{}"), "{}", go);
        assert!(go.contains("return s.ShapeMethods.Describe()"), "{}", go);
    }

    #[test]
    fn test_collection_updates_write_back_through_setters() {
        let go = convert_source(
            "import java.util.*;\n\
             abstract class Bag {\n\
             List<Integer> xs = new ArrayList<>();\n\
             abstract int size();\n\
             void push(int a) { xs.add(a); }\n\
             void drop(int i) { xs.remove(i); }\n\
             }",
        );
        assert!(go.contains("m.Self.SetXs(append(m.Self.GetXs(), a))"), "{}", go);
        assert!(go.contains("m.Self.SetXs(slices.Delete(m.Self.GetXs(), "), "{}", go);
        assert!(!go.contains("m.Self.GetXs() = "), "{}", go);
    }
}

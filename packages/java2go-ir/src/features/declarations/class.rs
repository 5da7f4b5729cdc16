//! Concrete classes
//!
//! A class becomes a struct plus a `NewX` function per constructor and a
//! pointer-receiver method per instance method. Inheritance from a declared
//! class is embedding; an abstract parent contributes its `Base` half and
//! the `Methods` halves of every consecutive abstract ancestor.

use tracing::debug;

use super::members::{owned, FunctionPlan, TypeFrame};
use super::DeclarationConverter;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{GoExpr, GoFunction, GoStmt, GoStruct, GoType, Receiver, ValueSpec};
use crate::features::lowering::{BodyScope, Lowerer, ReturnShape, SelfStyle};
use crate::features::migration::{MigrationContext, TypeInfo, TypeKind};
use crate::features::parsing::{NodeId, SyntaxKind};

/// How a class reaches the state and behavior of its superclasses
#[derive(Debug, Default)]
pub(crate) struct Composition {
    /// Declared concrete parent, embedded by value
    pub parent: Option<String>,
    /// Declared abstract parent, embedded through `PBase`
    pub abstract_parent: Option<String>,
    /// Abstract ancestors reached without crossing a concrete class,
    /// nearest first
    pub abstract_chain: Vec<String>,
    pub embedded: Vec<GoType>,
}

impl Composition {
    /// `x.AMethods = AMethods{Self: x}` for every abstract ancestor
    fn wiring(ctx: &MigrationContext, class: &str, receiver: &str) -> Vec<GoStmt> {
        ctx.abstract_ancestors(class)
            .into_iter()
            .map(|ancestor| {
                let methods = format!("{}Methods", ancestor);
                GoStmt::assign(
                    GoExpr::ident(receiver).select(methods.clone()),
                    GoExpr::Composite {
                        ty: GoType::named(methods),
                        elements: vec![(Some("Self".to_string()), GoExpr::ident(receiver))],
                    },
                )
            })
            .collect()
    }
}

/// What a constructor allocates
pub(crate) struct ConstructorTarget {
    /// `C`, or `FooBase` for abstract classes
    pub built: GoType,
    /// Point embedded `Methods` halves back at the new value
    pub wire: bool,
    pub synthesized: bool,
}

impl<'t> DeclarationConverter<'t> {
    pub(crate) fn class(&self, ctx: &mut MigrationContext, node: NodeId, name: &str) -> Result<()> {
        let info = ctx
            .type_info(name)
            .cloned()
            .ok_or_else(|| MigrationError::internal(format!("type `{}` was not analyzed", name)))?;
        let frame = self.frame(ctx, node, name);
        let composition = self.composition(ctx, &info, node, &frame)?;

        let mut go_struct = GoStruct::new(name);
        go_struct.type_params = frame.type_params.clone();
        go_struct.embedded = composition.embedded.clone();
        go_struct.fields = self.struct_fields(ctx, &frame)?;
        ctx.file.structs.push(go_struct);

        self.interface_assertions(ctx, &info, &frame);
        self.static_fields(ctx, &frame, false)?;
        self.constructors(ctx, &frame, &composition)?;
        self.methods(ctx, &frame)?;
        self.default_forwarders(ctx, &frame)?;
        self.abstract_wrappers(ctx, &frame, &composition)?;
        self.static_initializers(ctx, &frame)?;
        self.convert_nested(ctx, node)
    }

    pub(crate) fn composition(
        &self,
        ctx: &MigrationContext,
        info: &TypeInfo,
        node: NodeId,
        frame: &TypeFrame,
    ) -> Result<Composition> {
        let Some(parent) = info.superclass.clone() else {
            return Ok(Composition::default());
        };
        let Some(parent_kind) = ctx.kind_of(&parent) else {
            debug!(class = %info.name, parent = %parent, "Superclass not declared in this unit");
            return Ok(Composition::default());
        };

        let tree = self.tree;
        let parent_type = match tree
            .child_by_field(node, "superclass")
            .and_then(|s| tree.named_children(s).next())
        {
            Some(type_node) => ctx.type_mapper(&frame.types).map(tree, type_node)?,
            None => GoType::named(&parent),
        };
        let parent_type = parent_type.pointee().clone();

        if parent_kind != TypeKind::AbstractClass {
            return Ok(Composition {
                parent: Some(parent),
                embedded: vec![parent_type],
                ..Default::default()
            });
        }

        let abstract_chain: Vec<String> = ctx
            .lineage(&info.name)
            .into_iter()
            .skip(1)
            .take_while(|t| t.kind == TypeKind::AbstractClass)
            .map(|t| t.name.clone())
            .collect();
        let base = match parent_type {
            GoType::Generic { args, .. } => GoType::Generic {
                base: format!("{}Base", parent),
                args,
            },
            _ => GoType::named(format!("{}Base", parent)),
        };
        let mut embedded = vec![base];
        embedded.extend(
            abstract_chain
                .iter()
                .map(|a| GoType::named(format!("{}Methods", a))),
        );
        Ok(Composition {
            parent: None,
            abstract_parent: Some(parent),
            abstract_chain,
            embedded,
        })
    }

    /// `var _ Iface = &C{}` for every declared interface the class satisfies
    pub(super) fn interface_assertions(&self, ctx: &mut MigrationContext, info: &TypeInfo, frame: &TypeFrame) {
        if !frame.type_params.is_empty() {
            return;
        }
        let mut targets: Vec<String> = info
            .interfaces
            .iter()
            .filter(|i| {
                ctx.type_info(i)
                    .map_or(false, |t| t.kind == TypeKind::Interface && !t.is_generic())
            })
            .cloned()
            .collect();
        targets.extend(
            ctx.abstract_ancestors(&info.name)
                .into_iter()
                .filter(|a| ctx.type_info(a).map_or(false, |t| !t.is_generic())),
        );
        for target in targets {
            ctx.file.vars.push(ValueSpec {
                name: "_".to_string(),
                ty: Some(GoType::named(target)),
                value: Some(GoExpr::AddressOf(Box::new(GoExpr::Composite {
                    ty: frame.self_type.clone(),
                    elements: Vec::new(),
                }))),
            });
        }
    }

    fn constructors(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        composition: &Composition,
    ) -> Result<()> {
        let tree = self.tree;
        let declared = owned(tree, frame.node, |k| k == SyntaxKind::ConstructorDeclaration);
        let target = ConstructorTarget {
            built: frame.self_type.clone(),
            wire: true,
            synthesized: declared.is_empty(),
        };
        if declared.is_empty() {
            return ctx.guarded(tree, frame.node, |ctx| {
                let function = self.constructor(ctx, frame, composition, frame.node, &target)?;
                ctx.file.push_function(function);
                Ok(())
            });
        }
        for node in declared {
            ctx.guarded(tree, node, |ctx| {
                let function = self.constructor(ctx, frame, composition, node, &target)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }
        Ok(())
    }

    /// `func NewC(params) *C`; `node` is the class itself for the
    /// synthesized no-argument constructor
    pub(super) fn constructor(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        composition: &Composition,
        node: NodeId,
        target: &ConstructorTarget,
    ) -> Result<GoFunction> {
        let synthesized = target.synthesized;
        let tree = self.tree;
        let sig = ctx.signature(node)?.clone();
        let recv = frame.receiver.clone();
        let this = GoExpr::ident(recv.clone());

        let mut function = GoFunction::new(sig.target_name.clone());
        function.provenance = Some(tree.location(node));
        function.type_params = frame.type_params.clone();
        function.results = vec![GoType::pointer(target.built.clone())];

        let scope = BodyScope::new(
            Some(frame.name.clone()),
            SelfStyle::Receiver(recv.clone()),
            frame.types.clone(),
            ReturnShape::constructor(recv.clone()),
        );
        let mut lowerer = Lowerer::new(tree, ctx, scope);
        if !synthesized {
            function.params = self.declare_params(&mut lowerer, sig.params_node)?;
        }

        let mut body = vec![GoStmt::define(
            recv.clone(),
            GoExpr::call_named("new", vec![GoExpr::Raw(target.built.to_string())]),
        )];

        let ctor_body = if synthesized {
            None
        } else {
            tree.child_by_field(node, "body")
        };
        let invocation = ctor_body.and_then(|b| {
            tree.named_children(b)
                .find(|c| tree.kind(*c) == SyntaxKind::ExplicitConstructorInvocation)
        });
        let delegates = invocation.map_or(false, |inv| {
            tree.child_by_field(inv, "constructor")
                .map_or(false, |c| tree.kind(c) == SyntaxKind::This)
        });

        match invocation {
            Some(inv) => {
                body.extend(self.explicit_invocation(&mut lowerer, frame, composition, inv)?)
            }
            None => body.extend(self.implicit_super(&lowerer, composition, &this)),
        }
        if target.wire {
            body.extend(Composition::wiring(lowerer.ctx, &frame.name, &recv));
        }

        if !delegates {
            body.extend(self.field_initializers(&mut lowerer, &frame.name, &this)?);
            for block in self.instance_initializers(frame.node) {
                body.extend(lowerer.lower_block(block)?);
            }
        }

        match ctor_body {
            Some(block) => {
                let skip: Vec<NodeId> = invocation.into_iter().collect();
                body.extend(lowerer.lower_block_skipping(block, &skip)?);
            }
            None => body.push(GoStmt::Comment("default constructor".to_string())),
        }
        if !body.last().map_or(false, GoStmt::is_terminal) {
            body.push(GoStmt::Return(vec![this]));
        }
        function.body = body;
        Ok(function)
    }

    /// Zero-argument parent constructor run before the body
    fn implicit_super(
        &self,
        lowerer: &Lowerer<'_, '_>,
        composition: &Composition,
        this: &GoExpr,
    ) -> Vec<GoStmt> {
        let (parent, field) = match (&composition.parent, &composition.abstract_parent) {
            (Some(p), _) => (p.clone(), p.clone()),
            (None, Some(a)) => (a.clone(), format!("{}Base", a)),
            (None, None) => return Vec::new(),
        };
        if !lowerer.ctx.constructors.contains(&parent) {
            return Vec::new();
        }
        let target = lowerer.constructor_name(&parent, 0).target;
        vec![GoStmt::assign(
            this.clone().select(field),
            GoExpr::unary("*", GoExpr::call_named(target, Vec::new())),
        )]
    }

    /// `this(...)` replaces the whole value; `super(...)` fills the embedded parent
    fn explicit_invocation(
        &self,
        lowerer: &mut Lowerer<'_, '_>,
        frame: &TypeFrame,
        composition: &Composition,
        node: NodeId,
    ) -> Result<Vec<GoStmt>> {
        let tree = self.tree;
        let mut out = Vec::new();
        let mut args = Vec::new();
        if let Some(list) = tree.child_by_field(node, "arguments") {
            for arg in tree.named_children(list).collect::<Vec<_>>() {
                args.push(lowerer.expr(arg, &mut out)?);
            }
        }
        let argc = args.len();
        let this = GoExpr::ident(frame.receiver.clone());
        let to_this = tree
            .child_by_field(node, "constructor")
            .map_or(false, |c| tree.kind(c) == SyntaxKind::This);

        if to_this {
            let resolution = lowerer.constructor_name(&frame.name, argc);
            let call = call_with_warning(resolution.target.clone(), args, resolution.warning(&frame.name, argc));
            out.push(GoStmt::assign(
                GoExpr::unary("*", this),
                GoExpr::unary("*", call),
            ));
            return Ok(out);
        }

        let (parent, field) = match (&composition.parent, &composition.abstract_parent) {
            (Some(p), _) => (p.clone(), p.clone()),
            (None, Some(a)) => (a.clone(), format!("{}Base", a)),
            (None, None) if argc == 0 => return Ok(out),
            (None, None) => {
                return Err(MigrationError::unhandled(
                    "super constructor of a class outside this unit",
                ))
            }
        };
        let resolution = lowerer.constructor_name(&parent, argc);
        let call = call_with_warning(resolution.target.clone(), args, resolution.warning(&parent, argc));
        out.push(GoStmt::assign(this.select(field), GoExpr::unary("*", call)));
        Ok(out)
    }

    fn methods(&self, ctx: &mut MigrationContext, frame: &TypeFrame) -> Result<()> {
        let tree = self.tree;
        for node in owned(tree, frame.node, |k| k == SyntaxKind::MethodDeclaration) {
            ctx.guarded(tree, node, |ctx| {
                let sig = ctx.signature(node)?.clone();
                let plan = if sig.is_static {
                    FunctionPlan::free(sig.target_name.clone())
                } else {
                    FunctionPlan::method(frame, sig.target_name.clone())
                };
                let function = self.function(ctx, frame, node, plan)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Interface default methods the class does not override forward to
    /// the interface's free function
    pub(super) fn default_forwarders(&self, ctx: &mut MigrationContext, frame: &TypeFrame) -> Result<()> {
        for iface in ctx.implemented_interfaces(&frame.name) {
            let Some(info) = ctx.type_info(&iface).cloned() else {
                continue;
            };
            if info.is_generic() {
                continue;
            }
            let iface_frame = self.frame(ctx, info.node, &iface);
            for method in info.methods.iter().filter(|m| m.is_default) {
                let overridden = ctx
                    .lineage(&frame.name)
                    .iter()
                    .any(|t| t.declares_method(&method.name, method.arity));
                if overridden {
                    continue;
                }
                let spec = self.method_spec(ctx, &iface_frame, method.node)?;
                let target = GoExpr::ident(format!("{}{}", iface, spec.name));
                let forwarder = self.forwarder(
                    &spec,
                    receiver_of(frame),
                    target,
                    vec![GoExpr::ident(frame.receiver.clone())],
                );
                ctx.file.push_function(forwarder);
            }
        }
        Ok(())
    }

    /// Concrete methods of abstract ancestors, promoted explicitly so the
    /// class satisfies the ancestor interfaces
    fn abstract_wrappers(
        &self,
        ctx: &mut MigrationContext,
        frame: &TypeFrame,
        composition: &Composition,
    ) -> Result<()> {
        for (depth, ancestor) in composition.abstract_chain.iter().enumerate() {
            let Some(info) = ctx.type_info(ancestor).cloned() else {
                continue;
            };
            let ancestor_frame = self.frame(ctx, info.node, ancestor);
            let nearer: Vec<String> = std::iter::once(frame.name.clone())
                .chain(composition.abstract_chain[..depth].iter().cloned())
                .collect();
            for method in info.methods.iter().filter(|m| !m.is_abstract && !m.is_static) {
                let shadowed = nearer.iter().any(|n| {
                    ctx.type_info(n)
                        .map_or(false, |t| t.declares_method(&method.name, method.arity))
                });
                if shadowed {
                    continue;
                }
                let spec = self.method_spec(ctx, &ancestor_frame, method.node)?;
                let target = GoExpr::ident(frame.receiver.clone())
                    .select(format!("{}Methods", ancestor))
                    .select(spec.name.clone());
                let wrapper = self.forwarder(&spec, receiver_of(frame), target, Vec::new());
                ctx.file.push_function(wrapper);
            }
        }
        Ok(())
    }
}

fn receiver_of(frame: &TypeFrame) -> Receiver {
    Receiver {
        name: frame.receiver.clone(),
        ty: frame.pointer(),
    }
}

fn call_with_warning(target: String, args: Vec<GoExpr>, warning: Option<String>) -> GoExpr {
    let call = GoExpr::call_named(target, args);
    match warning {
        Some(text) => call.with_comment(text),
        None => call,
    }
}

#[cfg(test)]
mod tests {
    use crate::features::declarations::test_support::convert_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_with_fields_constructor_and_method() {
        let go = convert_source(
            "public class Counter {\n\
             private int count = 1;\n\
             public Counter(int start) { this.count = start; }\n\
             public int next() { count++; return count; }\n\
             }",
        );
        assert!(go.contains("type Counter struct {\n\tcount int32\n}"), "{}", go);
        assert!(
            go.contains(
                "func NewCounter(start int32) *Counter {\n\tc := new(Counter)\n\tc.count = 1\n\tc.count = start\n\treturn c\n}"
            ),
            "{}",
            go
        );
        assert!(
            go.contains("func (c *Counter) Next() int32 {\n\tc.count++\n\treturn c.count\n}"),
            "{}",
            go
        );
    }

    #[test]
    fn test_default_constructor_and_embedding() {
        let go = convert_source(
            "class Animal { String name; }\n\
             class Dog extends Animal { void bark() {} }",
        );
        assert!(go.contains("type Dog struct {\n\tAnimal\n}"), "{}", go);
        assert!(
            go.contains(
                "func newDog() *Dog {\n\td := new(Dog)\n\td.Animal = *newAnimal()\n\t// default constructor\n\treturn d\n}"
            ),
            "{}",
            go
        );
    }

    #[test]
    fn test_this_and_super_invocations() {
        let go = convert_source(
            "class Base { int v; Base(int v) { this.v = v; } }\n\
             class Child extends Base {\n\
             Child() { this(1); }\n\
             Child(int x) { super(x); }\n\
             }",
        );
        assert_eq!(go.matches("*c = *newChildWithInt(1)").count(), 1, "{}", go);
        assert!(go.contains("c.Base = *newBase(x)"), "{}", go);
    }

    #[test]
    fn test_interface_default_forwarder() {
        let go = convert_source(
            "interface Greeter { String name(); default String greet() { return \"hi \" + name(); } }\n\
             class En implements Greeter { public String name() { return \"en\"; } }",
        );
        assert!(go.contains("var _ Greeter = &En{}"), "{}", go);
        assert!(
            go.contains("func (e *En) Greet() string {\n\treturn GreeterGreet(e)\n}"),
            "{}",
            go
        );
    }
}

//! Interfaces
//!
//! Abstract methods stay in the Go interface. Default methods are listed in
//! it too, and their bodies become free functions taking the interface
//! value first, which implementing classes forward to.

use super::members::{owned, FunctionPlan};
use super::DeclarationConverter;
use crate::errors::Result;
use crate::features::go_ir::{GoInterface, GoParam};
use crate::features::lowering::SelfStyle;
use crate::features::migration::MigrationContext;
use crate::features::parsing::{NodeId, SyntaxKind};

impl<'t> DeclarationConverter<'t> {
    pub(crate) fn interface(
        &self,
        ctx: &mut MigrationContext,
        node: NodeId,
        name: &str,
    ) -> Result<()> {
        let tree = self.tree;
        let frame = self.frame(ctx, node, name);

        let mut iface = GoInterface::new(name);
        iface.type_params = frame.type_params.clone();
        iface.embedded = self.declared_interfaces(ctx, node, &frame)?;

        let methods = owned(tree, node, |k| k == SyntaxKind::MethodDeclaration);
        for method in &methods {
            if ctx.signature(*method)?.is_static {
                continue;
            }
            iface.methods.push(self.method_spec(ctx, &frame, *method)?);
        }
        ctx.file.interfaces.push(iface);

        self.static_fields(ctx, &frame, true)?;

        let value = self.receiver_name(node, name);
        for method in methods {
            ctx.guarded(tree, method, |ctx| {
                let sig = ctx.signature(method)?.clone();
                let plan = if sig.is_static {
                    FunctionPlan::free(sig.target_name.clone())
                } else if sig.is_default {
                    FunctionPlan {
                        name: format!("{}{}", name, sig.target_name),
                        receiver: None,
                        style: SelfStyle::InterfaceValue(value.clone()),
                        leading: vec![GoParam::new(value.clone(), frame.self_type.clone())],
                        type_params: frame.type_params.clone(),
                    }
                } else {
                    return Ok(());
                };
                let function = self.function(ctx, &frame, method, plan)?;
                ctx.file.push_function(function);
                Ok(())
            })?;
        }

        self.convert_nested(ctx, node)
    }
}

#[cfg(test)]
mod tests {
    use crate::features::declarations::test_support::convert_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interface_with_default_static_and_constant() {
        let go = convert_source(
            "public interface Greeter {\n\
             int MAX = 3;\n\
             String name();\n\
             default String greet() { return \"hi \" + name(); }\n\
             static Greeter none() { return null; }\n\
             }",
        );
        assert!(
            go.contains("type Greeter interface {\n\tName() string\n\tGreet() string\n}"),
            "{}",
            go
        );
        assert!(
            go.contains("func GreeterGreet(g Greeter) string {\n"),
            "{}",
            go
        );
        assert!(go.contains("func None() Greeter {\n\treturn nil\n}"), "{}", go);
        assert_eq!(go.matches("const Max int32 = 3").count(), 1, "{}", go);
    }

    #[test]
    fn test_interface_embeds_declared_parents() {
        let go = convert_source(
            "interface Named { String name(); }\n\
             interface Pet extends Named, java.io.Serializable { void feed(); }",
        );
        assert!(
            go.contains("type Pet interface {\n\tNamed\n\tFeed()\n}"),
            "{}",
            go
        );
    }

    #[test]
    fn test_implementation_matches_throwing_interface_method() {
        let go = convert_source(
            "interface Loader { String load() throws Exception; }\n\
             class FileLoader implements Loader { public String load() { return \"x\"; } }",
        );
        assert!(go.contains("\tLoad() (string, error)\n"), "{}", go);
        assert!(
            go.contains("func (f *FileLoader) Load() (string, error) {\n\treturn \"x\", nil\n}"),
            "{}",
            go
        );
        assert!(go.contains("var _ Loader = &FileLoader{}"), "{}", go);
    }
}

//! Declarations Feature
//!
//! One converter per Java declaration kind. Converters append Go
//! declarations to the context's file; every member goes through the
//! failure boundary on its own so one bad method does not lose its class.
//!
//! ## Structure
//! - `class` - concrete classes: struct, constructors, methods
//! - `abstract_class` - `FooData` / `FooBase` / `FooMethods` / `Foo` split
//! - `interface` - interfaces with default and static methods
//! - `enums` - integer enums and struct enums
//! - `record` - records and compact constructors
//! - `members` - functions, fields and type parameters shared by all kinds

mod abstract_class;
mod class;
mod enums;
mod interface;
mod members;
mod record;

use tracing::debug;

use crate::errors::{MigrationError, Result};
use crate::features::migration::{MigrationContext, TypeKind};
use crate::features::parsing::{NodeId, SyntaxKind, SyntaxTree};

pub use members::owned;

/// Converts Java type declarations into Go declarations
pub struct DeclarationConverter<'t> {
    pub(crate) tree: &'t SyntaxTree,
}

impl<'t> DeclarationConverter<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self { tree }
    }

    /// Convert one type declaration together with its nested declarations
    pub fn convert(&self, ctx: &mut MigrationContext, node: NodeId) -> Result<()> {
        let tree = self.tree;
        let name = tree
            .field_text(node, "name")
            .ok_or_else(|| MigrationError::structural(tree.raw_kind(node), "name"))?
            .to_string();
        let kind = match ctx.type_info(&name) {
            Some(info) if info.node == node => info.kind,
            Some(_) => {
                return Err(MigrationError::unhandled(format!(
                    "duplicate declaration of `{}`",
                    name
                )))
            }
            None => return Err(MigrationError::internal(format!("type `{}` was not analyzed", name))),
        };
        debug!(name = %name, kind = ?kind, "Converting declaration");

        match (tree.kind(node), kind) {
            (SyntaxKind::ClassDeclaration, TypeKind::AbstractClass) => {
                self.abstract_class(ctx, node, &name)
            }
            (SyntaxKind::ClassDeclaration, _) => self.class(ctx, node, &name),
            (SyntaxKind::InterfaceDeclaration, _) => self.interface(ctx, node, &name),
            (SyntaxKind::EnumDeclaration, _) => self.enumeration(ctx, node, &name),
            (SyntaxKind::RecordDeclaration, _) => self.record(ctx, node, &name),
            (SyntaxKind::AnnotationTypeDeclaration, _) => {
                Err(MigrationError::unhandled("annotation type declaration"))
            }
            _ => Err(MigrationError::unhandled(tree.raw_kind(node))),
        }
    }

    /// Type declarations nested in `node`, each behind its own boundary
    pub(crate) fn convert_nested(&self, ctx: &mut MigrationContext, node: NodeId) -> Result<()> {
        for nested in owned(self.tree, node, |k| k.is_type_declaration()) {
            ctx.guarded(self.tree, nested, |ctx| self.convert(ctx, nested))?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::{MigrationConfig, Mode};
    use crate::features::go_ir::GoRenderer;
    use crate::features::parsing::TreeSitterParser;
    use crate::features::signatures::SignatureAnalyzer;

    /// Convert every top-level declaration of `source` in strict mode and
    /// render the resulting file
    pub fn convert_source(source: &str) -> String {
        let tree = TreeSitterParser::java().parse(source, "Test.java").unwrap();
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Strict);
        SignatureAnalyzer::new(&tree).analyze(&mut ctx);

        let converter = DeclarationConverter::new(&tree);
        let roots: Vec<NodeId> = tree
            .named_children(tree.root())
            .filter(|n| tree.kind(*n).is_type_declaration())
            .collect();
        for node in roots {
            converter.convert(&mut ctx, node).unwrap();
        }
        GoRenderer::new().render(&ctx.file)
    }
}

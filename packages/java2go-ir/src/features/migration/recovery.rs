//! Member failure boundary
//!
//! Every top-level declaration and every class member is converted through
//! `MigrationContext::guarded`. In strict mode the first error aborts the
//! run; in tolerant mode the member's partial output is rolled back and
//! replaced by a commented placeholder plus a diagnostic.

use tracing::warn;

use super::context::{Diagnostic, MigrationContext};
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::FailedMigration;
use crate::features::parsing::{NodeId, SyntaxTree};

impl MigrationContext {
    /// Run one member conversion behind the failure boundary
    pub fn guarded<F>(&mut self, tree: &SyntaxTree, node: NodeId, convert: F) -> Result<()>
    where
        F: FnOnce(&mut MigrationContext) -> Result<()>,
    {
        if self.mode.is_strict() {
            return convert(self);
        }

        let checkpoint = self.file.checkpoint();
        let diagnostics_before = self.diagnostics.len();
        match convert(self) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.file.rollback(checkpoint);
                self.diagnostics.truncate(diagnostics_before);
                self.record_failure(tree, node, &err);
                Ok(())
            }
        }
    }

    /// Append a diagnostic and a placeholder for a failed member
    pub fn record_failure(&mut self, tree: &SyntaxTree, node: NodeId, err: &MigrationError) {
        let location = tree.location(node);
        warn!(
            location = %location,
            category = err.category(),
            "Member not migrated: {}",
            err
        );

        let diagnostic = Diagnostic {
            location: location.clone(),
            category: err.category(),
            message: err.to_string(),
            source_text: tree.text(node).to_string(),
            dump: tree.sexp(node),
        };
        self.file.failed.push(FailedMigration {
            error: diagnostic.message.clone(),
            source_text: diagnostic.source_text.clone(),
            dump: diagnostic.dump.clone(),
            location,
        });
        self.push_diagnostic(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MigrationConfig, Mode};
    use crate::features::go_ir::GoFunction;
    use crate::features::parsing::TreeSitterParser;

    fn tree() -> SyntaxTree {
        TreeSitterParser::java()
            .parse("class A { void f() {} }", "A.java")
            .unwrap()
    }

    #[test]
    fn test_tolerant_rolls_back_and_records() {
        let tree = tree();
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Tolerant);

        let result = ctx.guarded(&tree, tree.root(), |ctx| {
            ctx.file.push_function(GoFunction::new("partial"));
            Err(MigrationError::unhandled("lambda_expression"))
        });

        assert!(result.is_ok());
        assert!(ctx.file.functions.is_empty());
        assert_eq!(ctx.file.failed.len(), 1);
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].location, "A.java:1:1");
        assert!(ctx.diagnostics[0].dump.starts_with("(program"));
    }

    #[test]
    fn test_strict_propagates() {
        let tree = tree();
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Strict);

        let result = ctx.guarded(&tree, tree.root(), |_| Err(MigrationError::mapping("Foo")));

        assert!(matches!(result, Err(MigrationError::Mapping(_))));
        assert!(ctx.file.failed.is_empty());
    }
}

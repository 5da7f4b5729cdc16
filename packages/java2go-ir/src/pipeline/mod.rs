//! Translation pipeline
//!
//! One Java compilation unit at a time:
//!
//! ```text
//! source ─▶ parse ─▶ analyze signatures ─▶ convert declarations ─▶ render
//!                     (whole tree)          (one boundary each)
//! ```
//!
//! Analysis runs to completion before any conversion starts, so forward
//! references and overloads declared later in the file resolve the same way
//! as earlier ones.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::{MigrationConfig, Mode};
use crate::errors::{MigrationError, Result};
use crate::features::declarations::DeclarationConverter;
use crate::features::go_ir::{GoFile, GoRenderer};
use crate::features::migration::{Diagnostic, MigrationContext};
use crate::features::parsing::{NodeId, SyntaxKind, TreeSitterParser};
use crate::features::signatures::SignatureAnalyzer;

/// Result of translating one compilation unit
#[derive(Debug, Clone)]
pub struct TranslationOutput {
    pub file: GoFile,
    /// Recovered failures (always empty in strict mode)
    pub diagnostics: Vec<Diagnostic>,
    /// Rendered Go source
    pub text: String,
}

impl TranslationOutput {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Translate Java source text into a Go file
///
/// In strict mode the first failure is returned as the error; in tolerant
/// mode failures are collected in `diagnostics` and marked in the output.
pub fn translate(
    source: &str,
    path: &str,
    config: &MigrationConfig,
    mode: Mode,
) -> Result<TranslationOutput> {
    let start = Instant::now();
    let tree = TreeSitterParser::java().parse(source, path)?;

    let mut ctx = MigrationContext::new(config.clone(), mode);
    SignatureAnalyzer::new(&tree).analyze(&mut ctx);

    let converter = DeclarationConverter::new(&tree);
    let root = tree.root();
    let roots: Vec<NodeId> = if tree.kind(root) == SyntaxKind::Error {
        vec![root]
    } else {
        tree.named_children(root).collect()
    };
    for node in roots {
        let kind = tree.kind(node);
        if kind.is_type_declaration() {
            ctx.guarded(&tree, node, |ctx| converter.convert(ctx, node))?;
        } else if kind.is_comment()
            || matches!(
                kind,
                SyntaxKind::PackageDeclaration | SyntaxKind::ImportDeclaration
            )
        {
            debug!(kind = tree.raw_kind(node), "Skipping top-level node");
        } else {
            // stray statements and parser error nodes have no Go counterpart
            let raw = tree.raw_kind(node);
            ctx.guarded(&tree, node, |_| {
                Err(MigrationError::unhandled(format!("top-level {}", raw)))
            })?;
        }
    }

    let text = GoRenderer::new().render(&ctx.file);
    info!(
        path,
        declarations = ctx.file.declaration_count(),
        failures = ctx.diagnostics.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Translated compilation unit"
    );
    Ok(TranslationOutput {
        file: ctx.file,
        diagnostics: ctx.diagnostics,
        text,
    })
}

/// Read and translate a Java file
pub fn translate_file(
    path: impl AsRef<Path>,
    config: &MigrationConfig,
    mode: Mode,
) -> Result<TranslationOutput> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)?;
    translate(&source, &path.display().to_string(), config, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_translate_hello_world() {
        let output = translate(
            "package demo;\n\
             import java.util.List;\n\
             public class Hello {\n\
                 public static void main(String[] args) {\n\
                     System.out.println(\"hello\");\n\
                 }\n\
             }",
            "Hello.java",
            &MigrationConfig::default(),
            Mode::Strict,
        )
        .unwrap();
        assert!(output.is_complete());
        assert!(output.text.starts_with("package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n"));
        assert!(output.text.contains(
            "func main() {\n\targs := os.Args[1:]\n\t_ = args\n\tfmt.Println(\"hello\")\n}"
        ));
    }

    #[test]
    fn test_license_header_and_package() {
        let config = MigrationConfig::default()
            .with_package("shapes")
            .with_license_header("// Copyright Example");
        let output = translate("class A {}", "A.java", &config, Mode::Tolerant).unwrap();
        assert_eq!(
            output.text.lines().take(3).collect::<Vec<_>>(),
            vec!["// Copyright Example", "", "package shapes"]
        );
    }

    #[test]
    fn test_stray_top_level_nodes_are_reported() {
        let output = translate(
            "// header\nclass Ok {}\nint stray = 1;",
            "Stray.java",
            &MigrationConfig::default(),
            Mode::Tolerant,
        )
        .unwrap();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.file.failed.len(), 1);
        assert_eq!(output.diagnostics[0].category, "unhandled");
        assert_eq!(output.diagnostics[0].location, "Stray.java:3:1");
        assert!(output.text.contains("// FAILED MIGRATION at Stray.java:3:1"));
        assert!(output.text.contains("type Ok struct{}"));

        let err = translate(
            "class Ok {}\nint stray = 1;",
            "Stray.java",
            &MigrationConfig::default(),
            Mode::Strict,
        )
        .unwrap_err();
        assert_eq!(err.category(), "unhandled");
    }

    #[test]
    fn test_parser_error_nodes_are_not_dropped() {
        let output = translate(
            "class { int ; ]]] ",
            "Broken.java",
            &MigrationConfig::default(),
            Mode::Tolerant,
        )
        .unwrap();
        assert!(!output.is_complete());
        assert_eq!(output.diagnostics.len(), output.file.failed.len());
        assert!(output.text.contains("// FAILED MIGRATION at Broken.java:1:"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = translate_file(
            "/definitely/not/here/A.java",
            &MigrationConfig::default(),
            Mode::Tolerant,
        )
        .unwrap_err();
        assert_eq!(err.category(), "io");
    }
}

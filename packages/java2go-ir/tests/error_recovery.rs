//! Failure boundary behaviour in tolerant and strict mode

mod common;

use common::*;
use java2go_ir::{translate, MigrationConfig, Mode};
use pretty_assertions::assert_eq;

#[test]
fn test_tolerant_mode_marks_failed_declaration() {
    let output = tolerant(fixture_with_annotation_type());

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.file.failed.len(), 1);

    let diagnostic = &output.diagnostics[0];
    assert_eq!(diagnostic.category, "unhandled");
    assert_eq!(diagnostic.location, "Test.java:2:1");
    assert!(diagnostic.source_text.starts_with("@interface Marker"));
    assert!(!diagnostic.dump.is_empty());

    assert_contains(&output, "// FAILED MIGRATION at Test.java:2:1");
    assert_contains(&output, "func (k *Kept) value() int32 {\n\treturn 1\n}");
    assert!(!output.is_complete());
}

#[test]
fn test_strict_mode_returns_first_failure() {
    let err = translate(
        fixture_with_annotation_type(),
        "Test.java",
        &MigrationConfig::default(),
        Mode::Strict,
    )
    .unwrap_err();
    assert_eq!(err.category(), "unhandled");
}

#[test]
fn test_failed_method_keeps_its_class() {
    let output = tolerant(
        "class Host {\n\
         \x20   int good() { return 1; }\n\
         \x20   Runnable bad() { return new Runnable() { public void run() {} }; }\n\
         }",
    );

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].location, "Test.java:3:5");
    assert_contains(&output, "type Host struct{}");
    assert_contains(&output, "func (h *Host) good() int32 {\n\treturn 1\n}");
    assert_contains(&output, "// FAILED MIGRATION at Test.java:3:5");
    assert_not_contains(&output, "func (h *Host) bad()");
}

#[test]
fn test_rollback_leaves_no_partial_declarations() {
    let output = tolerant(
        "class Partial {\n\
         \x20   static int seed = 4;\n\
         \x20   void broken() { Object o = new Object() { }; }\n\
         }",
    );
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.text.matches("func (p *Partial) broken").count(), 0);
    assert_contains(&output, "var seed int32 = 4");
}

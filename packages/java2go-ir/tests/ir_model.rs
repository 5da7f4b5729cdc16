//! Queries over the Go IR returned with each translation

mod common;

use common::*;
use java2go_ir::features::go_ir::{GoType, Visibility};
use pretty_assertions::assert_eq;

#[test]
fn test_decomposition_declarations_in_ir() {
    let output = strict(fixture_abstract_hierarchy());
    let file = &output.file;

    let foo = file.find_interface("Foo").unwrap();
    assert_eq!(foo.visibility(), Visibility::Exported);
    assert_eq!(foo.embedded, vec![GoType::named("FooData")]);

    let base = file.find_struct("FooBase").unwrap();
    assert_eq!(base.fields.len(), 1);
    assert_eq!(base.fields[0].name, "X");

    let bar = file.find_struct("Bar").unwrap();
    assert_eq!(bar.visibility(), Visibility::Exported);
    assert_eq!(
        bar.embedded,
        vec![GoType::named("FooBase"), GoType::named("FooMethods")]
    );
}

#[test]
fn test_functions_and_methods_are_separated() {
    let output = strict(fixture_abstract_hierarchy());
    let file = &output.file;

    let ctor = file.find_function("newBar").unwrap();
    assert!(ctor.receiver.is_none());
    assert_eq!(ctor.visibility(), Visibility::Unexported);
    assert_eq!(ctor.provenance.as_deref(), Some("Test.java:10:5"));

    let weight = file.find_method("Bar", "Weight").unwrap();
    assert_eq!(weight.visibility(), Visibility::Exported);
    assert!(file.find_function("Weight").is_none());
    assert!(file.find_method("FooMethods", "Doubled").is_some());
}

#[test]
fn test_failed_members_are_kept_in_ir() {
    let output = tolerant(fixture_with_annotation_type());
    assert_eq!(output.file.failed.len(), 1);
    assert!(output.file.failed[0].dump.starts_with("(annotation_type_declaration"));
    assert!(output.file.find_struct("Kept").is_some());
}

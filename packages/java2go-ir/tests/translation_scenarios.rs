//! End-to-end translation scenarios
//!
//! Run with: cargo test --test translation_scenarios

mod common;

use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_abstract_hierarchy_is_decomposed() {
    let output = strict(fixture_abstract_hierarchy());
    assert_complete(&output);

    assert_contains(&output, "type FooData interface {\n\tGetX() int32\n\tSetX(x int32)\n}");
    assert_contains(&output, "type Foo interface {\n\tFooData\n\tWeight() int32\n\tDoubled() int32\n}");
    assert_contains(&output, "type FooBase struct {\n\tX int32\n}");
    assert_contains(&output, "type FooMethods struct {\n\tSelf Foo\n}");
    assert_contains(&output, "func (m *FooMethods) Doubled() int32 {\n\treturn m.Self.GetX() * 2\n}");
    assert_contains(&output, "type Bar struct {\n\tFooBase\n\tFooMethods\n}");
}

#[test]
fn test_concrete_subclass_wires_methods_half() {
    let output = strict(fixture_abstract_hierarchy());

    assert_contains(
        &output,
        "\tb := new(Bar)\n\tb.FooBase = *newFooBase(x)\n\tb.FooMethods = FooMethods{Self: b}\n\treturn b\n}",
    );
    assert_contains(&output, "func (b *Bar) Weight() int32 {\n\treturn b.X + 1\n}");
    assert_contains(&output, "func (b *Bar) Doubled() int32 {\n\treturn b.FooMethods.Doubled()\n}");
    assert_contains(&output, "var _ Foo = &Bar{}");
}

#[test]
fn test_simple_enum_constants() {
    let output = strict(fixture_simple_enum());
    assert_complete(&output);
    assert_contains(&output, "type Color uint");
    assert_contains(&output, "Color_RED Color = iota");
    assert_contains(&output, "func (c Color) String() string {");
}

#[test]
fn test_ambiguous_overload_call_is_annotated() {
    let output = strict(fixture_ambiguous_overloads());
    assert_complete(&output);
    assert_contains(&output, "func (p *Printer) show(s string) {");
    assert_contains(&output, "func (p *Printer) showWithInt(n int32) {");
    assert_contains(
        &output,
        "p.show(1) /* ambiguous call: 2 overloads of `show` accept 1 argument(s) */",
    );
}

#[test]
fn test_output_layout_order() {
    let output = strict(
        "import java.util.List;\n\
         class Box { List<String> items = new ArrayList<>(); int size() { return items.size(); } }",
    );
    let first_lines: Vec<&str> = output.text.lines().take(2).collect();
    assert_eq!(first_lines, vec!["package main", ""]);
    assert!(output.text.ends_with('\n'));
    assert_contains(&output, "type Box struct {\n\titems []string\n}");
    assert_contains(&output, "return int32(len(b.items))");
}

#[test]
fn test_functions_carry_provenance_comments() {
    let output = strict("class Counter {\n    int next(int n) { return n + 1; }\n}");
    assert_contains(
        &output,
        "// migrated from Test.java:2:5\nfunc (c *Counter) next(n int32) int32 {",
    );
}

#[test]
fn test_many_methods_all_converted() {
    let source = fixture_n_methods("Many", 12);
    let output = strict(&source);
    assert_complete(&output);
    assert_eq!(output.text.matches("func (m *Many) method").count(), 12);
    assert_contains(&output, "func (m *Many) method11(a int32) int32 {\n\treturn a + 11\n}");
}

#[test]
fn test_abstract_decomposition_round_trip() {
    let output = strict("abstract class Foo { int a; abstract int f(); int b(){ return f()+a; } }");
    assert_complete(&output);

    assert_contains(&output, "type FooData interface {\n\tGetA() int32\n\tSetA(a int32)\n}");
    assert_contains(&output, "type Foo interface {\n\tFooData\n\tF() int32\n\tB() int32\n}");
    assert_contains(&output, "type FooBase struct {\n\tA int32\n}");
    assert_contains(&output, "type FooMethods struct {\n\tSelf Foo\n}");
    assert_contains(
        &output,
        "func (m *FooMethods) B() int32 {\n\treturn m.Self.F() + m.Self.GetA()\n}",
    );
    assert_eq!(output.file.interfaces.len(), 2);
    assert_eq!(output.file.structs.len(), 2);
}

#[test]
fn test_same_arity_overloads_share_first_name() {
    let output = strict(
        "class Caller {\n\
         \x20   void bar(Baz b) {}\n\
         \x20   void bar(FooBaz b) {}\n\
         \x20   void run(Object o) { bar(o); bar(o); }\n\
         }",
    );
    assert_contains(&output, "func (c *Caller) barWithFooBaz(b FooBaz) {");
    let annotated = "c.bar(o) /* ambiguous call: 2 overloads of `bar` accept 1 argument(s) */";
    assert_eq!(output.text.matches(annotated).count(), 2, "{}", output.text);
}

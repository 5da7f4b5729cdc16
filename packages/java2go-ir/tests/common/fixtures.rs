//! Java source fixtures

/// Abstract parent with one abstract and one concrete method, plus a
/// concrete subclass
pub fn fixture_abstract_hierarchy() -> &'static str {
    r#"
abstract class Foo {
    protected int x;
    Foo(int x) { this.x = x; }
    abstract int weight();
    int doubled() { return x * 2; }
}

class Bar extends Foo {
    Bar(int x) { super(x); }
    int weight() { return x + 1; }
}
"#
}

/// Enum without fields
pub fn fixture_simple_enum() -> &'static str {
    "enum Color { RED, BLUE, GREEN }"
}

/// Two overloads of the same arity called with one argument
pub fn fixture_ambiguous_overloads() -> &'static str {
    r#"
class Printer {
    void show(String s) {}
    void show(int n) {}
    void run() { show(1); }
}
"#
}

/// A class with one method per generated line of `n` methods
pub fn fixture_n_methods(class_name: &str, n: usize) -> String {
    let methods: String = (0..n)
        .map(|i| format!("    int method{i}(int a) {{ return a + {i}; }}\n"))
        .collect();
    format!("class {class_name} {{\n{methods}}}\n")
}

/// A class whose middle member uses an unsupported construct
pub fn fixture_with_annotation_type() -> &'static str {
    r#"
@interface Marker {}

class Kept {
    int value() { return 1; }
}
"#
}

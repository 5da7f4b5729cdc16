//! Built-in Java → Go tables

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::features::go_ir::GoType;

static BUILTIN_TYPES: Lazy<FxHashMap<&'static str, GoType>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    for (java, go) in [
        ("int", "int32"),
        ("Integer", "int32"),
        ("long", "int64"),
        ("Long", "int64"),
        ("short", "int16"),
        ("Short", "int16"),
        ("byte", "int8"),
        ("Byte", "int8"),
        ("char", "rune"),
        ("Character", "rune"),
        ("float", "float32"),
        ("Float", "float32"),
        ("double", "float64"),
        ("Double", "float64"),
        ("Number", "float64"),
        ("boolean", "bool"),
        ("Boolean", "bool"),
        ("String", "string"),
        ("CharSequence", "string"),
    ] {
        table.insert(java, GoType::named(go));
    }
    table.insert("Object", GoType::Any);
    table
});

const LIST_LIKE: &[&str] = &[
    "List",
    "ArrayList",
    "LinkedList",
    "Collection",
    "Iterable",
    "Set",
    "HashSet",
    "LinkedHashSet",
    "Deque",
    "ArrayDeque",
    "Queue",
];

const MAP_LIKE: &[&str] = &["Map", "HashMap", "TreeMap", "LinkedHashMap", "ConcurrentHashMap"];

/// Exception types that translate to plain panics and catch-all recovers
pub const BUILTIN_EXCEPTIONS: &[&str] = &[
    "Throwable",
    "Exception",
    "Error",
    "RuntimeException",
    "IllegalArgumentException",
    "IllegalStateException",
    "NullPointerException",
    "IndexOutOfBoundsException",
    "ArrayIndexOutOfBoundsException",
    "UnsupportedOperationException",
    "ArithmeticException",
    "ClassCastException",
    "NumberFormatException",
    "NoSuchElementException",
    "ConcurrentModificationException",
    "IOException",
    "UncheckedIOException",
    "InterruptedException",
];

/// Primitive or boxed mapping for a simple Java type name
pub fn builtin(name: &str) -> Option<GoType> {
    BUILTIN_TYPES.get(name).cloned()
}

/// Containers that lower to a slice
pub fn is_list_like(name: &str) -> bool {
    LIST_LIKE.contains(&name)
}

/// Containers that lower to a map
pub fn is_map_like(name: &str) -> bool {
    MAP_LIKE.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        assert_eq!(builtin("int"), Some(GoType::named("int32")));
        assert_eq!(builtin("Integer"), Some(GoType::named("int32")));
        assert_eq!(builtin("char"), Some(GoType::named("rune")));
        assert_eq!(builtin("Object"), Some(GoType::Any));
        assert_eq!(builtin("Shape"), None);
    }

    #[test]
    fn test_container_families() {
        assert!(is_list_like("ArrayList"));
        assert!(is_map_like("TreeMap"));
        assert!(!is_list_like("Map"));
    }
}

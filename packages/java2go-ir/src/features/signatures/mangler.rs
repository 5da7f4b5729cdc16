//! Overload name derivation
//!
//! `bar(Baz)` registered after `bar(Foo)` becomes `barWithBaz`; parameter
//! types contribute their simple name, `Array` per dimension, and
//! `NoArgs` stands in for an empty list.

use crate::shared::utils::capitalize;

/// Name fragment contributed by one normalized Java parameter type
pub fn type_fragment(java_type: &str) -> String {
    let dims = java_type.matches("[]").count();
    let without_dims = java_type.replace("[]", "");
    let base = without_dims
        .split('<')
        .next()
        .unwrap_or(&without_dims)
        .rsplit('.')
        .next()
        .unwrap_or("");
    let mut fragment: String = capitalize(base)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    for _ in 0..dims {
        fragment.push_str("Array");
    }
    fragment
}

/// Deterministic mangled name for a later overload of `base`
pub fn mangle(base: &str, param_types: &[String]) -> String {
    if param_types.is_empty() {
        return format!("{}WithNoArgs", base);
    }
    let suffix: String = param_types.iter().map(|t| type_fragment(t)).collect();
    format!("{}With{}", base, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_fragments() {
        assert_eq!(type_fragment("int"), "Int");
        assert_eq!(type_fragment("String[]"), "StringArray");
        assert_eq!(type_fragment("int[][]"), "IntArrayArray");
        assert_eq!(type_fragment("List<String>"), "List");
        assert_eq!(type_fragment("java.util.Map<K,V>"), "Map");
    }

    #[test]
    fn test_mangle() {
        assert_eq!(mangle("bar", &["Baz".to_string()]), "barWithBaz");
        assert_eq!(
            mangle("NewPoint", &["int".to_string(), "int".to_string()]),
            "NewPointWithIntInt"
        );
        assert_eq!(mangle("reset", &[]), "resetWithNoArgs");
    }
}

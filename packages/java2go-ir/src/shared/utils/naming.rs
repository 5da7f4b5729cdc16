//! Identifier helpers for Go output

/// Go keywords that are legal Java identifiers
const GO_KEYWORDS: &[&str] = &[
    "chan",
    "defer",
    "fallthrough",
    "func",
    "go",
    "map",
    "range",
    "select",
    "struct",
    "type",
    "var",
    "const",
    "package",
    "iota",
    "nil",
];

/// Uppercase the first character (`bar` -> `Bar`)
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character (`Bar` -> `bar`)
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Apply Go's export-by-case rule
pub fn exported_name(name: &str, exported: bool) -> String {
    if exported {
        capitalize(name)
    } else {
        escape_identifier(&decapitalize(name))
    }
}

/// Go name for a static field; `MAX_SIZE` becomes `maxSize` / `MaxSize`
pub fn static_name(name: &str, exported: bool) -> String {
    let screaming = name.chars().any(|c| c.is_ascii_uppercase())
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    if !screaming {
        return exported_name(name, exported);
    }
    let camel: String = name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| capitalize(&part.to_ascii_lowercase()))
        .collect();
    exported_name(&camel, exported)
}

/// Rename Java identifiers that collide with Go keywords
pub fn escape_identifier(name: &str) -> String {
    if GO_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("bar"), "Bar");
        assert_eq!(capitalize(""), "");
        assert_eq!(decapitalize("Bar"), "bar");
    }

    #[test]
    fn test_exported_name_escapes_keywords() {
        assert_eq!(exported_name("type", false), "type_");
        assert_eq!(exported_name("type", true), "Type");
        assert_eq!(exported_name("Count", false), "count");
    }

    #[test]
    fn test_static_name() {
        assert_eq!(static_name("MAX_SIZE", false), "maxSize");
        assert_eq!(static_name("MAX_SIZE", true), "MaxSize");
        assert_eq!(static_name("counter", true), "Counter");
        assert_eq!(static_name("PI", false), "pi");
    }
}

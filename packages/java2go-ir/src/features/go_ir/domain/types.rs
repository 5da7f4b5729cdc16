//! Go type expressions

use std::fmt;

/// A Go type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GoType {
    /// Predeclared or user-declared name (`int32`, `string`, `Shape`)
    Named(String),
    Pointer(Box<GoType>),
    Slice(Box<GoType>),
    Map(Box<GoType>, Box<GoType>),
    /// Instantiated generic (`Box[T]`)
    Generic { base: String, args: Vec<GoType> },
    Func {
        params: Vec<GoType>,
        results: Vec<GoType>,
    },
    Any,
}

impl GoType {
    pub fn named(name: impl Into<String>) -> Self {
        GoType::Named(name.into())
    }

    pub fn pointer(inner: GoType) -> Self {
        GoType::Pointer(Box::new(inner))
    }

    pub fn slice(elem: GoType) -> Self {
        GoType::Slice(Box::new(elem))
    }

    pub fn map(key: GoType, value: GoType) -> Self {
        GoType::Map(Box::new(key), Box::new(value))
    }

    pub fn error() -> Self {
        GoType::named("error")
    }

    /// Strip one pointer level
    pub fn pointee(&self) -> &GoType {
        match self {
            GoType::Pointer(inner) => inner,
            other => other,
        }
    }

    /// Base name of a named or generic type, ignoring pointers
    pub fn base_name(&self) -> Option<&str> {
        match self.pointee() {
            GoType::Named(name) => Some(name),
            GoType::Generic { base, .. } => Some(base),
            _ => None,
        }
    }

    pub fn is_slice(&self) -> bool {
        matches!(self, GoType::Slice(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, GoType::Map(_, _))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, GoType::Named(name) if name == "string")
    }

    /// Predeclared numeric, boolean and string types
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            GoType::Named(name) if matches!(
                name.as_str(),
                "bool" | "string" | "int" | "int8" | "int16" | "int32" | "int64" | "uint"
                    | "uint8" | "uint16" | "uint32" | "uint64" | "byte" | "rune" | "float32"
                    | "float64"
            )
        )
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoType::Named(name) => write!(f, "{}", name),
            GoType::Pointer(inner) => write!(f, "*{}", inner),
            GoType::Slice(elem) => write!(f, "[]{}", elem),
            GoType::Map(key, value) => write!(f, "map[{}]{}", key, value),
            GoType::Generic { base, args } => {
                write!(f, "{}[", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, "]")
            }
            GoType::Func { params, results } => {
                write!(f, "func(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                write!(f, ")")?;
                match results.len() {
                    0 => Ok(()),
                    1 => write!(f, " {}", results[0]),
                    _ => {
                        write!(f, " (")?;
                        for (i, r) in results.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write!(f, "{}", r)?;
                        }
                        write!(f, ")")
                    }
                }
            }
            GoType::Any => write!(f, "any"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let ty = GoType::map(
            GoType::named("string"),
            GoType::slice(GoType::pointer(GoType::named("Foo"))),
        );
        assert_eq!(ty.to_string(), "map[string][]*Foo");
    }

    #[test]
    fn test_display_generic_and_func() {
        let ty = GoType::Generic {
            base: "Pair".to_string(),
            args: vec![GoType::named("int32"), GoType::Any],
        };
        assert_eq!(ty.to_string(), "Pair[int32, any]");

        let func = GoType::Func {
            params: vec![GoType::named("int32")],
            results: vec![GoType::named("bool"), GoType::error()],
        };
        assert_eq!(func.to_string(), "func(int32) (bool, error)");
    }
}

//! Error types for java2go-ir
//!
//! Failures raised by converters travel up as `MigrationError` values until
//! they reach a member boundary (see `features::migration::recovery`).

use thiserror::Error;

/// Main error type for translation operations
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A type or generic shape has no mapping rule
    #[error("no mapping rule for type `{0}`")]
    Mapping(String),

    /// A list-like or map-like container was given too many type arguments
    #[error("`{container}` accepts at most {max} type argument(s), found {found}")]
    InvalidGenericArity {
        container: String,
        max: usize,
        found: usize,
    },

    /// An expected child or field is absent from a node
    #[error("`{kind}` node is missing its `{field}`")]
    Structural { kind: String, field: String },

    /// A node kind has no converter
    #[error("unhandled construct `{0}`")]
    Unhandled(String),

    /// Broken engine invariant (never caused by user input)
    #[error("internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parser could not produce a tree
    #[error("Parse error: {0}")]
    Parse(String),
}

impl MigrationError {
    pub fn mapping(ty: impl Into<String>) -> Self {
        MigrationError::Mapping(ty.into())
    }

    pub fn structural(kind: impl Into<String>, field: impl Into<String>) -> Self {
        MigrationError::Structural {
            kind: kind.into(),
            field: field.into(),
        }
    }

    pub fn unhandled(kind: impl Into<String>) -> Self {
        MigrationError::Unhandled(kind.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        MigrationError::Internal(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        MigrationError::Parse(msg.into())
    }

    /// Short category label used in diagnostics
    pub fn category(&self) -> &'static str {
        match self {
            MigrationError::Mapping(_) | MigrationError::InvalidGenericArity { .. } => "mapping",
            MigrationError::Structural { .. } => "structure",
            MigrationError::Unhandled(_) => "unhandled",
            MigrationError::Internal(_) => "internal",
            MigrationError::Io(_) => "io",
            MigrationError::Parse(_) => "parse",
        }
    }
}

/// Result type alias for translation operations
pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MigrationError::structural("formal_parameter", "type");
        let msg = err.to_string();
        assert!(msg.contains("formal_parameter"));
        assert!(msg.contains("type"));
        assert_eq!(err.category(), "structure");
    }

    #[test]
    fn test_generic_arity_message() {
        let err = MigrationError::InvalidGenericArity {
            container: "List".to_string(),
            max: 1,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "`List` accepts at most 1 type argument(s), found 2"
        );
    }
}

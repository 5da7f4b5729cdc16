//! Signature domain models

use crate::features::go_ir::GoType;
use crate::features::parsing::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    Method,
    Constructor,
}

/// Analyzed method or constructor header
#[derive(Debug, Clone)]
pub struct Signature {
    pub kind: SignatureKind,
    /// Java name (constructors use the type name)
    pub name: String,
    /// Declaring type
    pub owner: String,
    /// Final Go name after mangling and export casing
    pub target_name: String,
    /// Normalized Java parameter type spellings
    pub param_types: Vec<String>,
    pub param_names: Vec<String>,
    pub params_node: Option<NodeId>,
    /// Declared return type; `None` for constructors
    pub return_type: Option<NodeId>,
    pub type_params: Vec<String>,
    pub throws: bool,
    pub varargs: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_default: bool,
    pub exported: bool,
    /// Bucket key and index of the overload entry backing this signature
    pub(crate) entry: (String, usize),
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }

    /// `public static void main(String[] args)`
    pub fn is_entry_point(&self) -> bool {
        self.kind == SignatureKind::Method
            && self.name == "main"
            && self.is_static
            && self.param_types.len() == 1
            && self.param_types[0] == "String[]"
    }
}

/// One distinct parameter list registered under a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadEntry {
    pub param_types: Vec<String>,
    /// Mangled name before export casing
    pub mangled: String,
    /// OR of the export flags of every declaration merged into this entry
    pub exported: bool,
    pub varargs: bool,
}

impl OverloadEntry {
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }

    pub fn accepts(&self, argc: usize) -> bool {
        if self.varargs {
            argc + 1 >= self.arity()
        } else {
            argc == self.arity()
        }
    }

    pub fn target_name(&self) -> String {
        crate::shared::utils::exported_name(&self.mangled, self.exported)
    }
}

/// Outcome of resolving a call site against the overload table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target: String,
    pub ambiguous: bool,
    pub candidates: usize,
}

impl Resolution {
    /// Inline warning attached to ambiguous calls
    pub fn warning(&self, name: &str, argc: usize) -> Option<String> {
        self.ambiguous.then(|| {
            format!(
                "ambiguous call: {} overloads of `{}` accept {} argument(s)",
                self.candidates, name, argc
            )
        })
    }
}

/// Append `error` to a return type for methods that declare `throws`
pub fn fold_throws(ret: Option<GoType>, throws: bool) -> Vec<GoType> {
    let mut results: Vec<GoType> = ret.into_iter().collect();
    if throws {
        results.push(GoType::error());
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_throws() {
        assert!(fold_throws(None, false).is_empty());
        assert_eq!(fold_throws(None, true), vec![GoType::error()]);
        assert_eq!(
            fold_throws(Some(GoType::named("int32")), true),
            vec![GoType::named("int32"), GoType::error()]
        );
    }

    #[test]
    fn test_varargs_entry_accepts_trailing_arguments() {
        let entry = OverloadEntry {
            param_types: vec!["String".to_string(), "Object[]".to_string()],
            mangled: "format".to_string(),
            exported: false,
            varargs: true,
        };
        assert!(entry.accepts(1));
        assert!(entry.accepts(3));
        assert!(!entry.accepts(0));
        assert_eq!(entry.target_name(), "format");
    }
}

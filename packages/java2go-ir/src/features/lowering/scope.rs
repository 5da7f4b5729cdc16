//! Body context threaded through statement and expression lowering

use rustc_hash::FxHashMap;

use crate::features::go_ir::{GoExpr, GoType};
use crate::features::type_mapping::TypeScope;
use crate::shared::utils::escape_identifier;

/// How `this` and bare field names are spelled inside a body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfStyle {
    /// Method or constructor with a receiver variable
    Receiver(String),
    /// Interface default method; the value is an explicit first parameter
    InterfaceValue(String),
    /// Abstract-class default method on `XMethods`; state goes through `Self`
    AbstractSelf(String),
    Static,
}

/// What a `return` inside the body has to produce
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnShape {
    pub has_value: bool,
    /// Append a nil `error` result
    pub throws: bool,
    /// Constructors return their receiver
    pub constructor: Option<String>,
    /// Go type of the returned value, where known
    pub result: Option<GoType>,
    /// Set while lowering the closure of a try statement
    pub escape: Option<ReturnEscape>,
}

/// Locals through which a `return` inside a try closure reaches the
/// enclosing function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnEscape {
    pub done: String,
    pub value: Option<String>,
}

impl ReturnShape {
    pub fn plain(has_value: bool) -> Self {
        Self {
            has_value,
            ..Default::default()
        }
    }

    pub fn returning(has_value: bool, throws: bool) -> Self {
        Self {
            has_value,
            throws,
            ..Default::default()
        }
    }

    pub fn constructor(receiver: impl Into<String>) -> Self {
        Self {
            has_value: true,
            constructor: Some(receiver.into()),
            ..Default::default()
        }
    }

    pub fn with_result(mut self, result: Option<GoType>) -> Self {
        self.result = result;
        self
    }
}

/// Where `yield` (and arrow-case expressions) deliver their value
#[derive(Debug, Clone, PartialEq)]
pub enum YieldTarget {
    Return,
    Assign(GoExpr),
}

/// A local variable or parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Local {
    pub go_name: String,
    pub ty: Option<GoType>,
}

#[derive(Debug, Clone)]
pub struct BodyScope {
    /// Declaring type of the body
    pub owner: Option<String>,
    pub style: SelfStyle,
    pub types: TypeScope,
    pub returns: ReturnShape,
    pub yield_target: Option<YieldTarget>,
    frames: Vec<FxHashMap<String, Local>>,
}

impl BodyScope {
    pub fn new(owner: Option<String>, style: SelfStyle, types: TypeScope, returns: ReturnShape) -> Self {
        Self {
            owner,
            style,
            types,
            returns,
            yield_target: None,
            frames: vec![FxHashMap::default()],
        }
    }

    /// Static context with no enclosing type
    pub fn detached() -> Self {
        Self::new(None, SelfStyle::Static, TypeScope::default(), ReturnShape::default())
    }

    pub fn push_frame(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Declare a local in the innermost frame, returning its Go spelling
    pub fn declare(&mut self, name: &str, ty: Option<GoType>) -> String {
        let go_name = escape_identifier(name);
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(
                name.to_string(),
                Local {
                    go_name: go_name.clone(),
                    ty,
                },
            );
        }
        go_name
    }

    pub fn lookup(&self, name: &str) -> Option<&Local> {
        self.frames.iter().rev().find_map(|f| f.get(name))
    }

    /// Expression denoting `this`, if the body has one
    pub fn this_expr(&self) -> Option<GoExpr> {
        match &self.style {
            SelfStyle::Receiver(name) | SelfStyle::InterfaceValue(name) => Some(GoExpr::ident(name)),
            SelfStyle::AbstractSelf(name) => Some(GoExpr::ident(name).select("Self")),
            SelfStyle::Static => None,
        }
    }

    pub fn is_abstract_self(&self) -> bool {
        matches!(self.style, SelfStyle::AbstractSelf(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_shadow_and_unwind() {
        let mut scope = BodyScope::detached();
        scope.declare("x", Some(GoType::named("int32")));
        scope.push_frame();
        scope.declare("x", Some(GoType::named("string")));
        assert_eq!(scope.lookup("x").unwrap().ty, Some(GoType::named("string")));
        scope.pop_frame();
        assert_eq!(scope.lookup("x").unwrap().ty, Some(GoType::named("int32")));
        scope.pop_frame();
        assert!(scope.lookup("x").is_some());
    }

    #[test]
    fn test_keyword_locals_are_escaped() {
        let mut scope = BodyScope::detached();
        assert_eq!(scope.declare("type", None), "type_");
        assert_eq!(scope.lookup("type").unwrap().go_name, "type_");
    }

    #[test]
    fn test_this_expr_by_style() {
        let scope = BodyScope::new(
            Some("Foo".into()),
            SelfStyle::AbstractSelf("m".into()),
            TypeScope::default(),
            ReturnShape::plain(true),
        );
        assert_eq!(scope.this_expr(), Some(GoExpr::ident("m").select("Self")));
        assert!(BodyScope::detached().this_expr().is_none());
    }
}

//! Go expressions

use super::declarations::GoParam;
use super::statements::GoStmt;
use super::types::GoType;

/// A Go expression
#[derive(Debug, Clone, PartialEq)]
pub enum GoExpr {
    Ident(String),
    /// Literal spelled exactly as it should appear in Go
    Lit(String),
    Selector(Box<GoExpr>, String),
    Call {
        func: Box<GoExpr>,
        args: Vec<GoExpr>,
        /// Spread the last argument (`f(xs...)`)
        spread: bool,
        /// Inline warning rendered after the call
        comment: Option<String>,
    },
    Binary {
        op: String,
        left: Box<GoExpr>,
        right: Box<GoExpr>,
    },
    Unary {
        op: String,
        operand: Box<GoExpr>,
    },
    Index {
        target: Box<GoExpr>,
        index: Box<GoExpr>,
    },
    /// `target[low:high]`
    SliceOf {
        target: Box<GoExpr>,
        low: Option<Box<GoExpr>>,
        high: Option<Box<GoExpr>>,
    },
    /// `Type{a, b}` or `Type{Key: a}`
    Composite {
        ty: GoType,
        elements: Vec<(Option<String>, GoExpr)>,
    },
    /// `&Type{...}`
    AddressOf(Box<GoExpr>),
    TypeAssert {
        target: Box<GoExpr>,
        ty: GoType,
    },
    FuncLit {
        params: Vec<GoParam>,
        results: Vec<GoType>,
        body: Vec<GoStmt>,
    },
    Paren(Box<GoExpr>),
    /// Verbatim text
    Raw(String),
}

impl GoExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        GoExpr::Ident(name.into())
    }

    pub fn lit(text: impl Into<String>) -> Self {
        GoExpr::Lit(text.into())
    }

    pub fn nil() -> Self {
        GoExpr::Ident("nil".to_string())
    }

    pub fn select(self, field: impl Into<String>) -> Self {
        GoExpr::Selector(Box::new(self), field.into())
    }

    pub fn call(func: GoExpr, args: Vec<GoExpr>) -> Self {
        GoExpr::Call {
            func: Box::new(func),
            args,
            spread: false,
            comment: None,
        }
    }

    /// Call a function by name
    pub fn call_named(name: impl Into<String>, args: Vec<GoExpr>) -> Self {
        GoExpr::call(GoExpr::ident(name), args)
    }

    /// Call a method on `self`
    pub fn method(self, name: impl Into<String>, args: Vec<GoExpr>) -> Self {
        GoExpr::call(self.select(name), args)
    }

    pub fn binary(op: impl Into<String>, left: GoExpr, right: GoExpr) -> Self {
        GoExpr::Binary {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: impl Into<String>, operand: GoExpr) -> Self {
        GoExpr::Unary {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    pub fn index(target: GoExpr, index: GoExpr) -> Self {
        GoExpr::Index {
            target: Box::new(target),
            index: Box::new(index),
        }
    }

    pub fn slice_of(target: GoExpr, low: Option<GoExpr>, high: Option<GoExpr>) -> Self {
        GoExpr::SliceOf {
            target: Box::new(target),
            low: low.map(Box::new),
            high: high.map(Box::new),
        }
    }

    /// `int(x)`, for Go APIs indexed by `int`
    pub fn as_int(value: GoExpr) -> Self {
        GoExpr::call_named("int", vec![value])
    }

    /// `int32(len(x))`
    pub fn len_of(target: GoExpr) -> Self {
        GoExpr::call_named("int32", vec![GoExpr::call_named("len", vec![target])])
    }

    /// Immediately invoked function literal
    pub fn iife(results: Vec<GoType>, body: Vec<GoStmt>) -> Self {
        GoExpr::call(
            GoExpr::FuncLit {
                params: Vec::new(),
                results,
                body,
            },
            Vec::new(),
        )
    }

    /// Attach an inline warning to a call
    pub fn with_comment(self, text: impl Into<String>) -> Self {
        match self {
            GoExpr::Call {
                func, args, spread, ..
            } => GoExpr::Call {
                func,
                args,
                spread,
                comment: Some(text.into()),
            },
            other => other,
        }
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, GoExpr::Ident(n) if n == name)
    }
}

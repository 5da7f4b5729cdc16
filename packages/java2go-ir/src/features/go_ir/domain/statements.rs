//! Go statements

use super::expressions::GoExpr;
use super::types::GoType;

/// One `case`/`default` arm
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Empty for `default`
    pub values: Vec<GoExpr>,
    pub body: Vec<GoStmt>,
    pub fallthrough: bool,
}

/// A Go statement
#[derive(Debug, Clone, PartialEq)]
pub enum GoStmt {
    Expr(GoExpr),
    /// `a, b := x, y`
    Define {
        names: Vec<String>,
        values: Vec<GoExpr>,
    },
    /// `a = x`, `a += x`, `a, b = x, y`
    Assign {
        targets: Vec<GoExpr>,
        op: String,
        values: Vec<GoExpr>,
    },
    VarDecl {
        name: String,
        ty: Option<GoType>,
        value: Option<GoExpr>,
    },
    IncDec {
        target: GoExpr,
        op: String,
    },
    Return(Vec<GoExpr>),
    If {
        init: Option<Box<GoStmt>>,
        cond: GoExpr,
        body: Vec<GoStmt>,
        /// Either another `If` or a `Block`
        otherwise: Option<Box<GoStmt>>,
    },
    For {
        init: Option<Box<GoStmt>>,
        cond: Option<GoExpr>,
        post: Option<Box<GoStmt>>,
        body: Vec<GoStmt>,
    },
    Range {
        key: Option<String>,
        value: Option<String>,
        iterable: GoExpr,
        body: Vec<GoStmt>,
    },
    Switch {
        tag: Option<GoExpr>,
        cases: Vec<SwitchCase>,
    },
    Block(Vec<GoStmt>),
    Break(Option<String>),
    Continue(Option<String>),
    Labeled {
        label: String,
        body: Box<GoStmt>,
    },
    Defer(GoExpr),
    Comment(String),
    Raw(String),
}

impl GoStmt {
    pub fn assign(target: GoExpr, value: GoExpr) -> Self {
        GoStmt::Assign {
            targets: vec![target],
            op: "=".to_string(),
            values: vec![value],
        }
    }

    pub fn define(name: impl Into<String>, value: GoExpr) -> Self {
        GoStmt::Define {
            names: vec![name.into()],
            values: vec![value],
        }
    }

    pub fn panic(value: GoExpr) -> Self {
        GoStmt::Expr(GoExpr::call_named("panic", vec![value]))
    }

    /// Statements after which control never reaches the next statement
    pub fn is_terminal(&self) -> bool {
        match self {
            GoStmt::Return(_) | GoStmt::Break(_) | GoStmt::Continue(_) => true,
            GoStmt::Expr(GoExpr::Call { func, .. }) => func.is_ident("panic"),
            _ => false,
        }
    }
}

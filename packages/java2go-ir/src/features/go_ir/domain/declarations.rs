//! Go top-level declarations

use super::expressions::GoExpr;
use super::statements::GoStmt;
use super::types::GoType;

/// Export status, derived from the case of the first letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Exported,
    Unexported,
}

impl Visibility {
    pub fn of(name: &str) -> Self {
        if name.chars().next().map_or(false, |c| c.is_uppercase()) {
            Visibility::Exported
        } else {
            Visibility::Unexported
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoParam {
    pub name: String,
    pub ty: GoType,
    pub variadic: bool,
}

impl GoParam {
    pub fn new(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            name: name.into(),
            ty,
            variadic: false,
        }
    }
}

/// Generic type parameter (`T any`)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub constraint: GoType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoField {
    pub name: String,
    pub ty: GoType,
}

impl GoField {
    pub fn new(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Method signature inside an interface
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub name: String,
    pub params: Vec<GoParam>,
    pub results: Vec<GoType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoInterface {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub embedded: Vec<GoType>,
    pub methods: Vec<MethodSpec>,
}

impl GoInterface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            embedded: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::of(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoStruct {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub embedded: Vec<GoType>,
    pub fields: Vec<GoField>,
}

impl GoStruct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            embedded: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::of(&self.name)
    }
}

/// Method receiver (`func (c *Circle)`)
#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: String,
    pub ty: GoType,
}

/// Function or method
#[derive(Debug, Clone, PartialEq)]
pub struct GoFunction {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub receiver: Option<Receiver>,
    pub params: Vec<GoParam>,
    pub results: Vec<GoType>,
    pub body: Vec<GoStmt>,
    /// `path:row:col` of the Java declaration
    pub provenance: Option<String>,
}

impl GoFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            receiver: None,
            params: Vec::new(),
            results: Vec::new(),
            body: Vec::new(),
            provenance: None,
        }
    }

    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::of(&self.name)
    }
}

/// `type Color uint`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    pub name: String,
    pub underlying: GoType,
}

/// Module-level `var` or `const`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub name: String,
    pub ty: Option<GoType>,
    pub value: Option<GoExpr>,
}

/// Sequential constant block; the first entry carries `Type = iota`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstBlock {
    pub ty: GoType,
    pub names: Vec<String>,
}

/// Placeholder for a declaration that could not be translated
#[derive(Debug, Clone, PartialEq)]
pub struct FailedMigration {
    pub error: String,
    pub source_text: String,
    pub dump: String,
    pub location: String,
}

//! Declared-type registry
//!
//! Facts about every type declared in the translation unit, collected by the
//! analysis pass so converters can resolve forward references.

use crate::features::parsing::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    AbstractClass,
    Interface,
    /// Enum without instance fields (lowered to an integer type)
    SimpleEnum,
    /// Enum with instance fields (lowered to a struct)
    ComplexEnum,
    Record,
    Annotation,
}

impl TypeKind {
    /// Values of this type are referenced through a pointer in Go
    pub fn is_pointer(&self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::ComplexEnum | TypeKind::Record)
    }

    pub fn is_interface_like(&self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::AbstractClass)
    }
}

#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Java name
    pub name: String,
    /// Go name (struct field or module variable)
    pub target: String,
    pub type_node: NodeId,
    /// Extra `[]` written after the declarator name (`int a[]`)
    pub extra_dims: usize,
    pub declarator: NodeId,
    pub is_static: bool,
    pub is_final: bool,
}

#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name: String,
    pub node: NodeId,
    pub arity: usize,
    pub varargs: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    /// Interface method carrying a body
    pub is_default: bool,
}

#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
    pub node: NodeId,
    pub exported: bool,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub type_params: Vec<String>,
    pub fields: Vec<FieldInfo>,
    pub methods: Vec<MethodInfo>,
    /// Enum constant names in declaration order
    pub constants: Vec<String>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, kind: TypeKind, node: NodeId) -> Self {
        Self {
            name: name.into(),
            kind,
            node,
            exported: false,
            superclass: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constants: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn instance_fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|f| !f.is_static)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// True if some method accepts `arity` arguments under this name
    pub fn declares_method(&self, name: &str, arity: usize) -> bool {
        self.methods_named(name)
            .any(|m| m.arity == arity || (m.varargs && arity + 1 >= m.arity))
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_method_with_varargs() {
        let mut info = TypeInfo::new("Logger", TypeKind::Class, NodeId(0));
        info.methods.push(MethodInfo {
            name: "log".to_string(),
            node: NodeId(1),
            arity: 2,
            varargs: true,
            is_static: false,
            is_abstract: false,
            is_default: false,
        });
        assert!(info.declares_method("log", 1));
        assert!(info.declares_method("log", 4));
        assert!(!info.declares_method("warn", 1));
        assert!(TypeKind::Record.is_pointer());
        assert!(TypeKind::AbstractClass.is_interface_like());
    }
}

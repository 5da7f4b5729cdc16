//! Migration context
//!
//! Single owner of all mutable translation state: symbol tables filled by
//! the analysis pass, the signature cache, collected diagnostics and the Go
//! IR root that converters append to.

use rustc_hash::{FxHashMap, FxHashSet};

use super::registry::{FieldInfo, MethodInfo, TypeInfo, TypeKind};
use crate::config::{MigrationConfig, Mode};
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::GoFile;
use crate::features::parsing::NodeId;
use crate::features::signatures::{OverloadTable, Signature};
use crate::features::type_mapping::{TypeMapper, TypeScope};

/// A recoverable failure recorded in tolerant mode
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// `path:row:col`
    pub location: String,
    pub category: &'static str,
    pub message: String,
    pub source_text: String,
    /// S-expression of the failing subtree
    pub dump: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}] {}", self.location, self.category, self.message)
    }
}

pub struct MigrationContext {
    pub mode: Mode,
    pub config: MigrationConfig,
    /// Method overloads keyed by Java name
    pub methods: OverloadTable,
    /// Constructor overloads keyed by Go type name
    pub constructors: OverloadTable,
    /// `RED` and `Color.RED` → `Color_RED`
    pub enum_constants: FxHashMap<String, String>,
    pub abstract_types: FxHashSet<String>,
    pub types: FxHashMap<String, TypeInfo>,
    pub signatures: FxHashMap<NodeId, Signature>,
    pub diagnostics: Vec<Diagnostic>,
    pub file: GoFile,
    next_temp: usize,
}

impl MigrationContext {
    pub fn new(config: MigrationConfig, mode: Mode) -> Self {
        let mut file = GoFile::new(config.package_name.clone());
        file.license_header = config.license_header.clone();
        Self {
            mode,
            config,
            methods: OverloadTable::new(),
            constructors: OverloadTable::new(),
            enum_constants: FxHashMap::default(),
            abstract_types: FxHashSet::default(),
            types: FxHashMap::default(),
            signatures: FxHashMap::default(),
            diagnostics: Vec::new(),
            file,
            next_temp: 0,
        }
    }

    pub fn type_mappings(&self) -> &FxHashMap<String, String> {
        &self.config.type_mappings
    }

    pub fn type_mapper<'a>(&'a self, scope: &'a TypeScope) -> TypeMapper<'a> {
        TypeMapper::new(self.type_mappings(), &self.types, scope)
    }

    /// Cached signature of a method or constructor node
    ///
    /// Every declaration is analyzed before conversion starts, so a miss
    /// means the analysis pass and the converters disagree.
    pub fn signature(&self, node: NodeId) -> Result<&Signature> {
        self.signatures.get(&node).ok_or_else(|| {
            MigrationError::internal(format!("no cached signature for node {}", node.0))
        })
    }

    pub fn type_info(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(|t| t.kind)
    }

    pub fn is_abstract(&self, name: &str) -> bool {
        self.abstract_types.contains(name)
    }

    /// Record `Enum.CONST` (and bare `CONST` if still free), returning the Go name
    pub fn register_enum_constant(&mut self, enum_name: &str, constant: &str) -> String {
        let target = format!("{}_{}", enum_name, constant);
        self.enum_constants
            .insert(format!("{}.{}", enum_name, constant), target.clone());
        self.enum_constants
            .entry(constant.to_string())
            .or_insert_with(|| target.clone());
        target
    }

    pub fn enum_constant(&self, reference: &str) -> Option<&str> {
        self.enum_constants.get(reference).map(String::as_str)
    }

    /// Fresh temporary name (`tmp1`, `tmp2`, ...)
    pub fn fresh_name(&mut self, prefix: &str) -> String {
        self.next_temp += 1;
        format!("{}{}", prefix, self.next_temp)
    }

    /// `name` followed by its declared superclasses, nearest first
    pub fn lineage(&self, name: &str) -> Vec<&TypeInfo> {
        let mut chain = Vec::new();
        let mut current = self.types.get(name);
        while let Some(info) = current {
            if chain.iter().any(|seen: &&TypeInfo| seen.name == info.name) {
                break;
            }
            chain.push(info);
            current = info.superclass.as_deref().and_then(|s| self.types.get(s));
        }
        chain
    }

    /// Abstract superclasses of `name`, nearest first
    pub fn abstract_ancestors(&self, name: &str) -> Vec<String> {
        self.lineage(name)
            .into_iter()
            .skip(1)
            .filter(|t| t.kind == TypeKind::AbstractClass)
            .map(|t| t.name.clone())
            .collect()
    }

    /// Field declared on `owner` or inherited from a declared superclass
    pub fn find_field(&self, owner: &str, field: &str) -> Option<(&TypeInfo, &FieldInfo)> {
        self.lineage(owner)
            .into_iter()
            .find_map(|t| t.field(field).map(|f| (t, f)))
    }

    /// Method callable on `owner` with `arity` arguments
    pub fn find_method(
        &self,
        owner: &str,
        name: &str,
        arity: usize,
    ) -> Option<(&TypeInfo, &MethodInfo)> {
        let mut visited = FxHashSet::default();
        let mut pending = vec![owner.to_string()];
        while let Some(current) = pending.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(info) = self.types.get(&current) else {
                continue;
            };
            let mut named = info.methods.iter().filter(|m| m.name == name);
            let found = named
                .clone()
                .find(|m| m.arity == arity || (m.varargs && arity + 1 >= m.arity))
                .or_else(|| named.next());
            if let Some(method) = found {
                return Some((info, method));
            }
            pending.extend(info.interfaces.iter().rev().cloned());
            pending.extend(info.superclass.iter().cloned());
        }
        None
    }

    /// Interfaces declared in this unit that `name` implements, transitively
    pub fn implemented_interfaces(&self, name: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut pending: Vec<String> = self
            .lineage(name)
            .iter()
            .flat_map(|t| t.interfaces.iter().cloned())
            .collect();
        pending.reverse();
        while let Some(iface) = pending.pop() {
            if found.contains(&iface) {
                continue;
            }
            if let Some(info) = self.types.get(&iface) {
                if info.kind == TypeKind::Interface {
                    pending.extend(info.interfaces.iter().rev().cloned());
                    found.push(iface);
                }
            }
        }
        found
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, kind: TypeKind, parent: Option<&str>) -> TypeInfo {
        let mut info = TypeInfo::new(name, kind, NodeId(0));
        info.superclass = parent.map(String::from);
        info
    }

    #[test]
    fn test_enum_constant_first_bare_name_wins() {
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Tolerant);
        assert_eq!(ctx.register_enum_constant("Color", "RED"), "Color_RED");
        ctx.register_enum_constant("Light", "RED");

        assert_eq!(ctx.enum_constant("RED"), Some("Color_RED"));
        assert_eq!(ctx.enum_constant("Light.RED"), Some("Light_RED"));
    }

    #[test]
    fn test_missing_signature_is_internal_error() {
        let ctx = MigrationContext::new(MigrationConfig::default(), Mode::Strict);
        let err = ctx.signature(NodeId(7)).unwrap_err();
        assert_eq!(err.category(), "internal");
    }

    #[test]
    fn test_lineage_and_abstract_ancestors() {
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Tolerant);
        ctx.types.insert("Shape".into(), class("Shape", TypeKind::AbstractClass, None));
        ctx.types.insert("Circle".into(), class("Circle", TypeKind::Class, Some("Shape")));
        ctx.types.insert("Ring".into(), class("Ring", TypeKind::Class, Some("Circle")));

        let names: Vec<&str> = ctx.lineage("Ring").iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Ring", "Circle", "Shape"]);
        assert_eq!(ctx.abstract_ancestors("Ring"), vec!["Shape".to_string()]);
    }

    fn method(name: &str, arity: usize) -> MethodInfo {
        MethodInfo {
            name: name.to_string(),
            node: NodeId(0),
            arity,
            varargs: false,
            is_static: false,
            is_abstract: false,
            is_default: false,
        }
    }

    #[test]
    fn test_find_method_walks_superclasses_and_interfaces() {
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Tolerant);
        let mut named = class("Named", TypeKind::Interface, None);
        named.methods.push(method("label", 0));
        let mut base = class("Base", TypeKind::Class, None);
        base.methods.push(method("put", 1));
        base.methods.push(method("put", 2));
        let mut leaf = class("Leaf", TypeKind::Class, Some("Base"));
        leaf.interfaces.push("Named".to_string());
        ctx.types.insert("Named".into(), named);
        ctx.types.insert("Base".into(), base);
        ctx.types.insert("Leaf".into(), leaf);

        let (owner, found) = ctx.find_method("Leaf", "put", 2).unwrap();
        assert_eq!((owner.name.as_str(), found.arity), ("Base", 2));
        let (owner, _) = ctx.find_method("Leaf", "label", 0).unwrap();
        assert_eq!(owner.name, "Named");
        // no arity match falls back to the first declaration
        assert_eq!(ctx.find_method("Leaf", "put", 5).unwrap().1.arity, 1);
        assert!(ctx.find_method("Leaf", "missing", 0).is_none());
    }

    #[test]
    fn test_new_context_carries_header() {
        let config = MigrationConfig::default()
            .with_package("shapes")
            .with_license_header("// MIT");
        let mut ctx = MigrationContext::new(config, Mode::Tolerant);
        assert_eq!(ctx.file.package, "shapes");
        assert_eq!(ctx.file.license_header.as_deref(), Some("// MIT"));
        assert_eq!(ctx.fresh_name("tmp"), "tmp1".to_string());
    }
}

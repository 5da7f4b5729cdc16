//! Signature analysis pass
//!
//! One depth-first traversal of the whole tree, before any conversion:
//! registers declared types with their fields and methods, every method and
//! constructor signature (whatever its nesting), and enum constants. Later
//! passes only read what this pass records.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::domain::{Signature, SignatureKind};
use crate::features::migration::{FieldInfo, MethodInfo, MigrationContext, TypeInfo, TypeKind};
use crate::features::parsing::{NodeId, SyntaxKind, SyntaxTree};
use crate::shared::utils::{capitalize, exported_name, static_name};

/// One declared parameter
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub node: NodeId,
    pub name: String,
    pub type_node: NodeId,
    /// Extra dimensions written after the name (`int a[]`)
    pub extra_dims: usize,
    pub varargs: bool,
}

impl ParamDecl {
    /// Normalized Java spelling used as the overload identity
    pub fn java_type(&self, tree: &SyntaxTree) -> String {
        let mut text = normalized(tree.text(self.type_node));
        let dims = self.extra_dims + usize::from(self.varargs);
        for _ in 0..dims {
            text.push_str("[]");
        }
        text
    }
}

/// Parameters of a `formal_parameters` node (receiver parameters skipped)
pub fn formal_parameters(tree: &SyntaxTree, params: NodeId) -> Vec<ParamDecl> {
    let mut out = Vec::new();
    for param in tree.named_children(params) {
        match tree.kind(param) {
            SyntaxKind::FormalParameter => {
                let (Some(type_node), Some(name)) = (
                    tree.child_by_field(param, "type"),
                    tree.field_text(param, "name"),
                ) else {
                    continue;
                };
                out.push(ParamDecl {
                    node: param,
                    name: name.to_string(),
                    type_node,
                    extra_dims: dims_of(tree, param),
                    varargs: false,
                });
            }
            SyntaxKind::SpreadParameter => {
                let type_node = tree.named_children(param).find(|c| tree.kind(*c).is_type());
                let declarator = tree.child_of_kind(param, SyntaxKind::VariableDeclarator);
                let name = declarator.and_then(|d| tree.field_text(d, "name"));
                if let (Some(type_node), Some(name)) = (type_node, name) {
                    out.push(ParamDecl {
                        node: param,
                        name: name.to_string(),
                        type_node,
                        extra_dims: 0,
                        varargs: true,
                    });
                }
            }
            _ => {}
        }
    }
    out
}

/// Names declared by a `type_parameters` field
pub fn type_parameter_names(tree: &SyntaxTree, decl: NodeId) -> Vec<String> {
    tree.child_by_field(decl, "type_parameters")
        .map(|tp| {
            tree.children_of_kind(tp, SyntaxKind::TypeParameter)
                .into_iter()
                .filter_map(|p| {
                    tree.named_children(p)
                        .find(|c| {
                            matches!(
                                tree.kind(*c),
                                SyntaxKind::TypeIdentifier | SyntaxKind::Identifier
                            )
                        })
                        .map(|c| tree.text(c).to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

/// `java.util.List<String>` → `List`
pub fn simple_type_name(tree: &SyntaxTree, type_node: NodeId) -> String {
    let text = normalized(tree.text(type_node));
    let base = text.split('<').next().unwrap_or(&text);
    base.rsplit('.').next().unwrap_or(base).to_string()
}

/// Count of `[]` pairs in the `dimensions` field of a declarator
pub fn dims_of(tree: &SyntaxTree, node: NodeId) -> usize {
    tree.child_by_field(node, "dimensions")
        .map(|d| tree.text(d).matches('[').count())
        .unwrap_or(0)
}

fn normalized(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Enclosing type during traversal
struct Owner {
    name: String,
    node: NodeId,
    kind: TypeKind,
    exported: bool,
}

pub struct SignatureAnalyzer<'t> {
    tree: &'t SyntaxTree,
}

impl<'t> SignatureAnalyzer<'t> {
    pub fn new(tree: &'t SyntaxTree) -> Self {
        Self { tree }
    }

    /// Populate the context's tables from the whole tree
    pub fn analyze(&self, ctx: &mut MigrationContext) {
        let mut with_constructor = FxHashSet::default();
        self.visit(ctx, self.tree.root(), None, &mut with_constructor);
        self.classify_enums(ctx);
        self.synthesize_default_constructors(ctx, &with_constructor);
        finalize_targets(ctx);
        inherit_throws(ctx);

        debug!(
            types = ctx.types.len(),
            signatures = ctx.signatures.len(),
            method_names = ctx.methods.len(),
            "Signature analysis complete"
        );
    }

    fn visit(
        &self,
        ctx: &mut MigrationContext,
        node: NodeId,
        owner: Option<&Owner>,
        with_constructor: &mut FxHashSet<String>,
    ) {
        let tree = self.tree;
        let kind = tree.kind(node);

        if kind.is_type_declaration() {
            if let Some(frame) = self.declare_type(ctx, node) {
                for child in tree.children(node) {
                    self.visit(ctx, *child, Some(&frame), with_constructor);
                }
                return;
            }
        }

        if let Some(owner) = owner {
            match kind {
                SyntaxKind::MethodDeclaration => self.register_method(ctx, node, owner),
                SyntaxKind::ConstructorDeclaration | SyntaxKind::CompactConstructorDeclaration => {
                    // enum constructors are folded into the constant initializers
                    if !matches!(owner.kind, TypeKind::SimpleEnum | TypeKind::ComplexEnum) {
                        with_constructor.insert(owner.name.clone());
                        self.register_constructor(ctx, node, owner);
                    }
                }
                SyntaxKind::FieldDeclaration | SyntaxKind::ConstantDeclaration => {
                    if self.is_direct_member(node, owner) {
                        self.register_fields(ctx, node, owner);
                    }
                }
                SyntaxKind::EnumConstant => {
                    if let Some(name) = tree.field_text(node, "name") {
                        ctx.register_enum_constant(&owner.name, name);
                        if let Some(info) = ctx.types.get_mut(&owner.name) {
                            info.constants.push(name.to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        for child in tree.children(node) {
            self.visit(ctx, *child, owner, with_constructor);
        }
    }

    fn declare_type(&self, ctx: &mut MigrationContext, node: NodeId) -> Option<Owner> {
        let tree = self.tree;
        let name = tree.field_text(node, "name")?.to_string();

        let kind = match tree.kind(node) {
            SyntaxKind::ClassDeclaration if tree.has_modifier(node, "abstract") => {
                TypeKind::AbstractClass
            }
            SyntaxKind::ClassDeclaration => TypeKind::Class,
            SyntaxKind::InterfaceDeclaration => TypeKind::Interface,
            SyntaxKind::EnumDeclaration => TypeKind::SimpleEnum,
            SyntaxKind::RecordDeclaration => TypeKind::Record,
            _ => TypeKind::Annotation,
        };

        let mut info = TypeInfo::new(name.clone(), kind, node);
        info.exported = tree.has_modifier(node, "public");
        info.type_params = type_parameter_names(tree, node);
        info.superclass = tree
            .child_by_field(node, "superclass")
            .and_then(|s| tree.named_children(s).find(|c| tree.kind(*c).is_type()))
            .map(|t| simple_type_name(tree, t));
        info.interfaces = self.interface_names(node);

        if ctx.types.contains_key(&name) {
            debug!(name = %name, "Duplicate type declaration, keeping the first");
        } else {
            if kind == TypeKind::AbstractClass {
                ctx.abstract_types.insert(name.clone());
            }
            ctx.types.insert(name.clone(), info);
        }

        let owner = Owner {
            name,
            node,
            kind,
            exported: tree.has_modifier(node, "public"),
        };
        if kind == TypeKind::Record {
            self.register_record_components(ctx, &owner);
        }
        Some(owner)
    }

    fn interface_names(&self, node: NodeId) -> Vec<String> {
        let tree = self.tree;
        let holder = tree
            .child_by_field(node, "interfaces")
            .or_else(|| tree.child_of_kind(node, SyntaxKind::ExtendsInterfaces));
        holder
            .and_then(|h| tree.child_of_kind(h, SyntaxKind::TypeList))
            .map(|list| {
                tree.named_children(list)
                    .map(|t| simple_type_name(tree, t))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Members directly inside the owner's body (not anonymous or constant bodies)
    fn is_direct_member(&self, node: NodeId, owner: &Owner) -> bool {
        let tree = self.tree;
        let Some(body) = tree.parent(node) else {
            return false;
        };
        match tree.kind(body) {
            SyntaxKind::ClassBody | SyntaxKind::InterfaceBody | SyntaxKind::Other(_) => {
                tree.parent(body) == Some(owner.node)
            }
            SyntaxKind::EnumBodyDeclarations => tree
                .parent(body)
                .and_then(|enum_body| tree.parent(enum_body))
                == Some(owner.node),
            _ => false,
        }
    }

    fn register_method(&self, ctx: &mut MigrationContext, node: NodeId, owner: &Owner) {
        let tree = self.tree;
        let Some(name) = tree.field_text(node, "name").map(str::to_string) else {
            return;
        };
        let params = tree
            .child_by_field(node, "parameters")
            .map(|p| formal_parameters(tree, p))
            .unwrap_or_default();
        let param_types: Vec<String> = params.iter().map(|p| p.java_type(tree)).collect();
        let varargs = params.last().map_or(false, |p| p.varargs);

        let has_body = tree.child_by_field(node, "body").is_some();
        let is_static = tree.has_modifier(node, "static");
        let in_interface = owner.kind == TypeKind::Interface;
        let is_abstract =
            tree.has_modifier(node, "abstract") || (in_interface && !has_body && !is_static);
        let is_default = in_interface && has_body && !is_static;
        let exported = tree.has_modifier(node, "public")
            || tree.has_modifier(node, "protected")
            || owner.kind.is_interface_like();

        let index = ctx
            .methods
            .insert(&name, param_types.clone(), exported, varargs);

        if self.is_direct_member(node, owner) {
            if let Some(info) = ctx.types.get_mut(&owner.name) {
                info.methods.push(MethodInfo {
                    name: name.clone(),
                    node,
                    arity: param_types.len(),
                    varargs,
                    is_static,
                    is_abstract,
                    is_default,
                });
            }
        }

        ctx.signatures.insert(
            node,
            Signature {
                kind: SignatureKind::Method,
                name: name.clone(),
                owner: owner.name.clone(),
                target_name: String::new(),
                param_types,
                param_names: params.iter().map(|p| p.name.clone()).collect(),
                params_node: tree.child_by_field(node, "parameters"),
                return_type: tree.child_by_field(node, "type"),
                type_params: type_parameter_names(tree, node),
                throws: tree.child_of_kind(node, SyntaxKind::Throws).is_some(),
                varargs,
                is_static,
                is_abstract,
                is_default,
                exported,
                entry: (name, index),
            },
        );
    }

    fn register_constructor(&self, ctx: &mut MigrationContext, node: NodeId, owner: &Owner) {
        let tree = self.tree;
        let params_node = if tree.kind(node) == SyntaxKind::CompactConstructorDeclaration {
            tree.child_by_field(owner.node, "parameters")
        } else {
            tree.child_by_field(node, "parameters")
        };
        let params = params_node
            .map(|p| formal_parameters(tree, p))
            .unwrap_or_default();
        let exported = owner.exported || tree.has_modifier(node, "public");
        self.insert_constructor(ctx, node, owner, params_node, &params, exported);
    }

    fn insert_constructor(
        &self,
        ctx: &mut MigrationContext,
        node: NodeId,
        owner: &Owner,
        params_node: Option<NodeId>,
        params: &[ParamDecl],
        exported: bool,
    ) {
        let tree = self.tree;
        let param_types: Vec<String> = params.iter().map(|p| p.java_type(tree)).collect();
        let varargs = params.last().map_or(false, |p| p.varargs);
        let base = constructor_base(&owner.name, owner.kind);
        let index = ctx.constructors.insert_with_base(
            &owner.name,
            &base,
            param_types.clone(),
            exported,
            varargs,
        );

        ctx.signatures.insert(
            node,
            Signature {
                kind: SignatureKind::Constructor,
                name: owner.name.clone(),
                owner: owner.name.clone(),
                target_name: String::new(),
                param_types,
                param_names: params.iter().map(|p| p.name.clone()).collect(),
                params_node,
                return_type: None,
                type_params: Vec::new(),
                throws: tree.child_of_kind(node, SyntaxKind::Throws).is_some(),
                varargs,
                is_static: true,
                is_abstract: false,
                is_default: false,
                exported,
                entry: (owner.name.clone(), index),
            },
        );
    }

    /// Components become exported fields plus the canonical constructor
    fn register_record_components(&self, ctx: &mut MigrationContext, owner: &Owner) {
        let tree = self.tree;
        let params_node = tree.child_by_field(owner.node, "parameters");
        let params = params_node
            .map(|p| formal_parameters(tree, p))
            .unwrap_or_default();

        if let Some(info) = ctx.types.get_mut(&owner.name) {
            for param in &params {
                info.fields.push(FieldInfo {
                    name: param.name.clone(),
                    target: capitalize(&param.name),
                    type_node: param.type_node,
                    extra_dims: param.extra_dims,
                    declarator: param.node,
                    is_static: false,
                    is_final: true,
                });
            }
        }
        self.insert_constructor(ctx, owner.node, owner, params_node, &params, true);
    }

    fn register_fields(&self, ctx: &mut MigrationContext, node: NodeId, owner: &Owner) {
        let tree = self.tree;
        let Some(type_node) = tree.child_by_field(node, "type") else {
            return;
        };
        let in_interface = owner.kind == TypeKind::Interface;
        let is_static = in_interface || tree.has_modifier(node, "static");
        let is_final = in_interface || tree.has_modifier(node, "final");
        let visible = in_interface
            || tree.has_modifier(node, "public")
            || tree.has_modifier(node, "protected");

        let Some(info) = ctx.types.get_mut(&owner.name) else {
            return;
        };
        for declarator in tree.children_by_field(node, "declarator") {
            let Some(name) = tree.field_text(declarator, "name") else {
                continue;
            };
            let target = if is_static {
                static_name(name, visible)
            } else {
                let exported = visible
                    || matches!(owner.kind, TypeKind::AbstractClass | TypeKind::Record);
                exported_name(name, exported)
            };
            info.fields.push(FieldInfo {
                name: name.to_string(),
                target,
                type_node,
                extra_dims: dims_of(tree, declarator),
                declarator,
                is_static,
                is_final,
            });
        }
    }

    fn classify_enums(&self, ctx: &mut MigrationContext) {
        for info in ctx.types.values_mut() {
            if info.kind == TypeKind::SimpleEnum && info.instance_fields().next().is_some() {
                info.kind = TypeKind::ComplexEnum;
            }
        }
    }

    /// Concrete classes without constructors get an implicit no-arg one,
    /// cached under the class node
    fn synthesize_default_constructors(
        &self,
        ctx: &mut MigrationContext,
        with_constructor: &FxHashSet<String>,
    ) {
        let mut pending: Vec<Owner> = ctx
            .types
            .values()
            .filter(|t| t.kind == TypeKind::Class && !with_constructor.contains(&t.name))
            .map(|t| Owner {
                name: t.name.clone(),
                node: t.node,
                kind: t.kind,
                exported: t.exported,
            })
            .collect();
        pending.sort_by_key(|o| o.node);
        for owner in pending {
            self.insert_constructor(ctx, owner.node, &owner, None, &[], owner.exported);
        }
    }
}

/// `NewFoo`, or `NewFooBase` for abstract types
pub fn constructor_base(type_name: &str, kind: TypeKind) -> String {
    if kind == TypeKind::AbstractClass {
        format!("New{}Base", type_name)
    } else {
        format!("New{}", type_name)
    }
}

/// Resolve every cached signature to its final Go name
fn finalize_targets(ctx: &mut MigrationContext) {
    let methods = &ctx.methods;
    let constructors = &ctx.constructors;
    for sig in ctx.signatures.values_mut() {
        let table = match sig.kind {
            SignatureKind::Method => methods,
            SignatureKind::Constructor => constructors,
        };
        let (key, index) = &sig.entry;
        if let Some(entry) = table.entry(key, *index) {
            sig.exported = entry.exported;
            sig.target_name = entry.target_name();
        }
        if sig.is_entry_point() {
            sig.target_name = "main".to_string();
        }
    }
}

/// Overrides take the `(T, error)` shape of a throwing supertype method so
/// that implementations still satisfy the folded interface
fn inherit_throws(ctx: &mut MigrationContext) {
    let mut widened = Vec::new();
    for info in ctx.types.values().filter(|t| t.kind != TypeKind::Interface) {
        let ancestors = supertypes(ctx, &info.name);
        for method in info.methods.iter().filter(|m| !m.is_static) {
            if ctx.signatures.get(&method.node).map_or(true, |s| s.throws) {
                continue;
            }
            let throwing_parent = ancestors
                .iter()
                .filter_map(|a| ctx.types.get(a))
                .flat_map(|a| a.methods.iter())
                .filter(|m| m.name == method.name && m.arity == method.arity)
                .any(|m| ctx.signatures.get(&m.node).map_or(false, |s| s.throws));
            if throwing_parent {
                widened.push(method.node);
            }
        }
    }
    if !widened.is_empty() {
        debug!(count = widened.len(), "Overrides widened to throwing results");
    }
    for node in widened {
        if let Some(sig) = ctx.signatures.get_mut(&node) {
            sig.throws = true;
        }
    }
}

/// Declared superclasses and interfaces of `name`, transitively
fn supertypes(ctx: &MigrationContext, name: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut pending = vec![name.to_string()];
    let mut out = Vec::new();
    while let Some(current) = pending.pop() {
        let Some(info) = ctx.types.get(&current) else {
            continue;
        };
        for parent in info.superclass.iter().chain(info.interfaces.iter()) {
            if parent != name && seen.insert(parent.clone()) {
                out.push(parent.clone());
                pending.push(parent.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MigrationConfig, Mode};
    use crate::features::parsing::TreeSitterParser;

    fn analyze(source: &str) -> (SyntaxTree, MigrationContext) {
        let tree = TreeSitterParser::java().parse(source, "Test.java").unwrap();
        let mut ctx = MigrationContext::new(MigrationConfig::default(), Mode::Tolerant);
        SignatureAnalyzer::new(&tree).analyze(&mut ctx);
        (tree, ctx)
    }

    fn target_of(tree: &SyntaxTree, ctx: &MigrationContext, method: &str) -> Vec<String> {
        let mut nodes = tree.descendants_where(tree.root(), |n| n.kind == SyntaxKind::MethodDeclaration);
        nodes.retain(|n| tree.field_text(*n, "name") == Some(method));
        nodes
            .into_iter()
            .map(|n| ctx.signature(n).unwrap().target_name.clone())
            .collect()
    }

    #[test]
    fn test_overloads_are_mangled_in_order() {
        let (tree, ctx) = analyze(
            "class Foo { void bar(Foo f) {} void bar(Baz b) {} public int size() { return 0; } }",
        );
        assert_eq!(target_of(&tree, &ctx, "bar"), vec!["bar", "barWithBaz"]);
        assert_eq!(target_of(&tree, &ctx, "size"), vec!["Size"]);
    }

    #[test]
    fn test_export_flags_merge_across_classes() {
        let (tree, ctx) = analyze(
            "interface Shape { double area(); } class Sq implements Shape { double area() { return 1; } }",
        );
        assert_eq!(target_of(&tree, &ctx, "area"), vec!["Area", "Area"]);
    }

    #[test]
    fn test_types_fields_and_constants() {
        let (_, ctx) = analyze(
            "abstract class Foo { int a; static final int MAX_SIZE = 3; abstract int f(); }
             enum Color { RED, GREEN }
             enum Planet { EARTH(1.0); final double mass; Planet(double m) { mass = m; } }
             record Point(int x, int y) {}",
        );

        let foo = ctx.type_info("Foo").unwrap();
        assert_eq!(foo.kind, TypeKind::AbstractClass);
        assert!(ctx.is_abstract("Foo"));
        assert_eq!(foo.field("a").unwrap().target, "A");
        assert_eq!(foo.field("MAX_SIZE").unwrap().target, "maxSize");

        assert_eq!(ctx.kind_of("Color"), Some(TypeKind::SimpleEnum));
        assert_eq!(ctx.kind_of("Planet"), Some(TypeKind::ComplexEnum));
        assert_eq!(ctx.enum_constant("Color.GREEN"), Some("Color_GREEN"));

        let point = ctx.type_info("Point").unwrap();
        assert_eq!(point.field("y").unwrap().target, "Y");
        assert_eq!(ctx.constructors.resolve("Point", 2).unwrap().target, "NewPoint");
    }

    #[test]
    fn test_default_constructor_and_entry_point() {
        let (tree, ctx) = analyze(
            "public class App { public static void main(String[] args) {} }",
        );
        assert_eq!(ctx.constructors.resolve("App", 0).unwrap().target, "NewApp");
        assert_eq!(target_of(&tree, &ctx, "main"), vec!["main"]);
        let app = ctx.type_info("App").unwrap();
        assert!(ctx.signature(app.node).is_ok());
    }

    #[test]
    fn test_throws_and_nested_methods_are_cached() {
        let (tree, ctx) = analyze(
            "class Outer { class Inner { void load() throws IOException {} } }",
        );
        let load = tree
            .descendants_where(tree.root(), |n| n.kind == SyntaxKind::MethodDeclaration)[0];
        let sig = ctx.signature(load).unwrap();
        assert!(sig.throws);
        assert_eq!(sig.owner, "Inner");
        assert_eq!(ctx.type_info("Inner").unwrap().methods.len(), 1);
    }

    #[test]
    fn test_override_inherits_throwing_shape() {
        let (tree, ctx) = analyze(
            "interface Loader { String load() throws Exception; String name(); }\n\
             abstract class Base implements Loader {}\n\
             class FileLoader extends Base { public String load() { return \"x\"; } public String name() { return \"f\"; } }",
        );
        let methods = tree
            .descendants_where(tree.root(), |n| n.kind == SyntaxKind::MethodDeclaration);
        let by_owner = |owner: &str, name: &str| {
            methods
                .iter()
                .map(|m| ctx.signature(*m).unwrap())
                .find(|s| s.owner == owner && s.name == name)
                .unwrap()
        };
        assert!(by_owner("FileLoader", "load").throws);
        assert!(!by_owner("FileLoader", "name").throws);
    }
}

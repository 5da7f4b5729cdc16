//! Type mapper

use rustc_hash::FxHashMap;

use super::builtins::{builtin, is_list_like, is_map_like};
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::GoType;
use crate::features::migration::TypeInfo;
use crate::features::parsing::{NodeId, SyntaxKind, SyntaxTree};

/// Package qualifiers redirected to a Go package of the same name
const RESERVED_PREFIXES: &[(&str, &str)] = &[("internal.", "internal")];

/// Type parameters visible at a use site
#[derive(Debug, Clone, Default)]
pub struct TypeScope {
    /// Parameters that exist in Go (type and function type parameters)
    pub params: Vec<String>,
    /// Method-level parameters Go cannot express; they map to `any`
    pub erased: Vec<String>,
}

impl TypeScope {
    pub fn new(params: Vec<String>) -> Self {
        Self {
            params,
            erased: Vec::new(),
        }
    }

    pub fn with_params(&self, more: &[String]) -> Self {
        let mut scope = self.clone();
        scope.params.extend(more.iter().cloned());
        scope
    }

    pub fn with_erased(&self, more: &[String]) -> Self {
        let mut scope = self.clone();
        scope.erased.extend(more.iter().cloned());
        scope
    }
}

pub struct TypeMapper<'a> {
    overrides: &'a FxHashMap<String, String>,
    types: &'a FxHashMap<String, TypeInfo>,
    scope: &'a TypeScope,
}

impl<'a> TypeMapper<'a> {
    pub fn new(
        overrides: &'a FxHashMap<String, String>,
        types: &'a FxHashMap<String, TypeInfo>,
        scope: &'a TypeScope,
    ) -> Self {
        Self {
            overrides,
            types,
            scope,
        }
    }

    /// Map a type node
    pub fn map(&self, tree: &SyntaxTree, node: NodeId) -> Result<GoType> {
        let text = normalize(tree.text(node));
        if let Some(target) = self.overrides.get(&text) {
            return Ok(GoType::named(target.clone()));
        }

        match tree.kind(node) {
            SyntaxKind::IntegralType | SyntaxKind::FloatingPointType | SyntaxKind::BooleanType => {
                builtin(&text).ok_or_else(|| MigrationError::mapping(text))
            }
            SyntaxKind::TypeIdentifier => Ok(self.map_name(&text)),
            SyntaxKind::ScopedTypeIdentifier => Ok(self.map_scoped(&text)),
            SyntaxKind::GenericType => self.map_generic(tree, node),
            SyntaxKind::ArrayType => {
                let element = tree
                    .child_by_field(node, "element")
                    .ok_or_else(|| MigrationError::structural("array_type", "element"))?;
                let dims = tree
                    .child_by_field(node, "dimensions")
                    .map(|d| tree.text(d).matches('[').count())
                    .unwrap_or(1);
                Ok(wrap_dims(self.map(tree, element)?, dims))
            }
            SyntaxKind::Wildcard => Ok(GoType::Any),
            SyntaxKind::Other("annotated_type") => {
                let inner = tree
                    .named_children(node)
                    .filter(|c| tree.kind(*c).is_type() || tree.kind(*c) == SyntaxKind::Other("annotated_type"))
                    .last()
                    .ok_or_else(|| MigrationError::structural("annotated_type", "type"))?;
                self.map(tree, inner)
            }
            SyntaxKind::VoidType => Err(MigrationError::mapping("void")),
            _ => Err(MigrationError::mapping(text)),
        }
    }

    /// Map the `type` field of a declaration node
    pub fn map_field(&self, tree: &SyntaxTree, owner: NodeId, field: &str) -> Result<GoType> {
        let node = tree
            .child_by_field(owner, field)
            .ok_or_else(|| MigrationError::structural(tree.raw_kind(owner), field))?;
        self.map(tree, node)
    }

    /// Map a return type; `void` has no Go result
    pub fn map_return(&self, tree: &SyntaxTree, node: Option<NodeId>) -> Result<Option<GoType>> {
        match node {
            None => Ok(None),
            Some(n) if tree.kind(n) == SyntaxKind::VoidType => Ok(None),
            Some(n) => self.map(tree, n).map(Some),
        }
    }

    /// Map a simple (unqualified, non-generic) type name
    pub fn map_name(&self, name: &str) -> GoType {
        if let Some(target) = self.overrides.get(name) {
            return GoType::named(target.clone());
        }
        if let Some(ty) = builtin(name) {
            return ty;
        }
        if self.scope.params.iter().any(|p| p == name) {
            return GoType::named(name);
        }
        if self.scope.erased.iter().any(|p| p == name) {
            return GoType::Any;
        }
        if let Some(info) = self.types.get(name) {
            return if info.kind.is_pointer() {
                GoType::pointer(GoType::named(name))
            } else {
                GoType::named(name)
            };
        }
        if is_list_like(name) {
            return GoType::slice(GoType::Any);
        }
        if is_map_like(name) {
            return GoType::map(GoType::Any, GoType::Any);
        }
        GoType::named(name)
    }

    fn map_scoped(&self, text: &str) -> GoType {
        let last = last_segment(text);
        for (prefix, package) in RESERVED_PREFIXES {
            if text.starts_with(prefix) {
                return GoType::named(format!("{}.{}", package, last));
            }
        }
        self.map_name(last)
    }

    fn map_generic(&self, tree: &SyntaxTree, node: NodeId) -> Result<GoType> {
        let base_node = tree
            .named_children(node)
            .find(|c| {
                matches!(
                    tree.kind(*c),
                    SyntaxKind::TypeIdentifier | SyntaxKind::ScopedTypeIdentifier
                )
            })
            .ok_or_else(|| MigrationError::structural("generic_type", "type"))?;
        let base_text = normalize(tree.text(base_node));
        let simple = last_segment(&base_text).to_string();

        if let Some(target) = self
            .overrides
            .get(&base_text)
            .or_else(|| self.overrides.get(&simple))
        {
            return Ok(GoType::named(target.clone()));
        }

        let args: Vec<NodeId> = tree
            .child_of_kind(node, SyntaxKind::TypeArguments)
            .map(|a| tree.named_children(a).collect())
            .unwrap_or_default();

        if is_list_like(&simple) {
            check_arity(&simple, 1, args.len())?;
            let elem = match args.first() {
                Some(a) => self.map(tree, *a)?,
                None => GoType::Any,
            };
            return Ok(GoType::slice(elem));
        }
        if is_map_like(&simple) {
            check_arity(&simple, 2, args.len())?;
            let key = match args.first() {
                Some(a) => self.map(tree, *a)?,
                None => GoType::Any,
            };
            let value = match args.get(1) {
                Some(a) => self.map(tree, *a)?,
                None => GoType::Any,
            };
            return Ok(GoType::map(key, value));
        }

        if args.is_empty() {
            return Ok(if tree.kind(base_node) == SyntaxKind::ScopedTypeIdentifier {
                self.map_scoped(&base_text)
            } else {
                self.map_name(&simple)
            });
        }

        let mapped = args
            .iter()
            .map(|a| self.map(tree, *a))
            .collect::<Result<Vec<_>>>()?;
        let base = RESERVED_PREFIXES
            .iter()
            .find(|(prefix, _)| base_text.starts_with(prefix))
            .map(|(_, package)| format!("{}.{}", package, simple))
            .unwrap_or_else(|| simple.clone());
        let generic = GoType::Generic { base, args: mapped };

        Ok(match self.types.get(&simple) {
            Some(info) if info.kind.is_pointer() => GoType::pointer(generic),
            _ => generic,
        })
    }
}

/// Wrap `ty` in `dims` slice levels
pub fn wrap_dims(mut ty: GoType, dims: usize) -> GoType {
    for _ in 0..dims {
        ty = GoType::slice(ty);
    }
    ty
}

fn check_arity(container: &str, max: usize, found: usize) -> Result<()> {
    if found > max {
        return Err(MigrationError::InvalidGenericArity {
            container: container.to_string(),
            max,
            found,
        });
    }
    Ok(())
}

fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn last_segment(text: &str) -> &str {
    text.rsplit('.').next().unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::migration::TypeKind;
    use crate::features::parsing::TreeSitterParser;
    use pretty_assertions::assert_eq;

    /// Map the declared type of every field in `class_body`, in order
    fn map_fields(
        class_body: &str,
        overrides: &FxHashMap<String, String>,
        types: &FxHashMap<String, TypeInfo>,
    ) -> Vec<Result<GoType>> {
        let source = format!("class Holder<T> {{ {} }}", class_body);
        let tree = TreeSitterParser::java().parse(&source, "Holder.java").unwrap();
        let scope = TypeScope::new(vec!["T".to_string()]);
        let mapper = TypeMapper::new(overrides, types, &scope);
        tree.descendants_where(tree.root(), |n| n.kind == SyntaxKind::FieldDeclaration)
            .into_iter()
            .map(|field| mapper.map_field(&tree, field, "type"))
            .collect()
    }

    fn rendered(results: Vec<Result<GoType>>) -> Vec<String> {
        results
            .into_iter()
            .map(|r| r.map(|t| t.to_string()).unwrap_or_else(|e| format!("error: {}", e)))
            .collect()
    }

    #[test]
    fn test_structural_rules() {
        let mut types = FxHashMap::default();
        types.insert("Foo".to_string(), TypeInfo::new("Foo", TypeKind::Class, NodeId(0)));
        types.insert("Shape".to_string(), TypeInfo::new("Shape", TypeKind::Interface, NodeId(0)));
        types.insert("Color".to_string(), TypeInfo::new("Color", TypeKind::SimpleEnum, NodeId(0)));

        let out = rendered(map_fields(
            "int a; Integer b; String c; int[][] d; List<String> e; Map<String, Integer> f; \
             Foo g; Shape h; Color i; T j; Pair<String, T> k; List<?> l; java.util.List<Foo> m; \
             internal.Widget n; Object o;",
            &FxHashMap::default(),
            &types,
        ));

        assert_eq!(
            out,
            vec![
                "int32",
                "int32",
                "string",
                "[][]int32",
                "[]string",
                "map[string]int32",
                "*Foo",
                "Shape",
                "Color",
                "T",
                "Pair[string, T]",
                "[]any",
                "[]*Foo",
                "internal.Widget",
                "any",
            ]
        );
    }

    #[test]
    fn test_generic_arity_violation() {
        let out = map_fields("List<String, String> bad;", &FxHashMap::default(), &FxHashMap::default());
        assert!(matches!(
            out[0],
            Err(MigrationError::InvalidGenericArity { max: 1, found: 2, .. })
        ));
    }

    #[test]
    fn test_override_wins_and_is_idempotent() {
        let mut overrides = FxHashMap::default();
        overrides.insert("BigDecimal".to_string(), "decimal.Decimal".to_string());
        overrides.insert("int".to_string(), "int".to_string());

        let first = rendered(map_fields("BigDecimal a; int b;", &overrides, &FxHashMap::default()));
        let second = rendered(map_fields("BigDecimal a; int b;", &overrides, &FxHashMap::default()));
        assert_eq!(first, vec!["decimal.Decimal", "int"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_erased_method_params_become_any() {
        let scope = TypeScope::default().with_erased(&["U".to_string()]);
        let overrides = FxHashMap::default();
        let types = FxHashMap::default();
        let mapper = TypeMapper::new(&overrides, &types, &scope);
        assert_eq!(mapper.map_name("U"), GoType::Any);
        assert_eq!(mapper.map_name("Widget"), GoType::named("Widget"));
    }
}

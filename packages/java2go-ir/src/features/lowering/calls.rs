//! Method invocation and object creation
//!
//! User-declared methods resolve through the overload table. Calls into the
//! Java standard library that have a direct Go counterpart are rewritten
//! (printing, string helpers, collection operations, `Math`).

use super::expressions::Place;
use super::Lowerer;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{GoExpr, GoStmt, GoType};
use crate::features::migration::{FieldInfo, TypeKind};
use crate::features::parsing::{NodeId, SyntaxKind};
use crate::features::signatures::{simple_type_name, Resolution};
use crate::features::type_mapping::BUILTIN_EXCEPTIONS;
use crate::shared::utils::escape_identifier;

/// `Math.x(a)` → `math.X(a)`
const MATH_FUNCTIONS: &[(&str, &str)] = &[
    ("sqrt", "Sqrt"),
    ("pow", "Pow"),
    ("floor", "Floor"),
    ("ceil", "Ceil"),
    ("sin", "Sin"),
    ("cos", "Cos"),
    ("tan", "Tan"),
    ("log", "Log"),
    ("log10", "Log10"),
    ("exp", "Exp"),
    ("hypot", "Hypot"),
];

/// `s.x(a)` → `strings.X(s, a)`
const STRING_FUNCTIONS: &[(&str, &str)] = &[
    ("contains", "Contains"),
    ("startsWith", "HasPrefix"),
    ("endsWith", "HasSuffix"),
    ("toUpperCase", "ToUpper"),
    ("toLowerCase", "ToLower"),
    ("trim", "TrimSpace"),
    ("strip", "TrimSpace"),
    ("split", "Split"),
    ("replace", "ReplaceAll"),
    ("equalsIgnoreCase", "EqualFold"),
    ("repeat", "Repeat"),
];

impl<'t, 'c> Lowerer<'t, 'c> {
    fn arguments(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<Vec<GoExpr>> {
        let Some(args) = self.tree.child_by_field(node, "arguments") else {
            return Ok(Vec::new());
        };
        let mut out = Vec::new();
        for arg in self.tree.named_children(args).collect::<Vec<_>>() {
            out.push(self.expr(arg, pre)?);
        }
        Ok(out)
    }

    fn argument_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.tree
            .child_by_field(node, "arguments")
            .map(|a| self.tree.named_children(a).collect())
            .unwrap_or_default()
    }

    /// Go name for a call to `name`, with an inline warning when ambiguous
    fn resolve_method(&self, name: &str, argc: usize) -> (String, Option<String>) {
        match self.ctx.methods.resolve(name, argc) {
            Some(res) => {
                let warning = res.warning(name, argc);
                (res.target, warning)
            }
            None => (escape_identifier(name), None),
        }
    }

    pub(crate) fn constructor_name(&self, type_name: &str, argc: usize) -> Resolution {
        self.ctx
            .constructors
            .resolve(type_name, argc)
            .unwrap_or_else(|| Resolution {
                target: format!("New{}", type_name),
                ambiguous: false,
                candidates: 0,
            })
    }

    /// Calls that only make sense as statements in Go (`append`, map
    /// stores, `delete`); `None` when the call is an ordinary expression
    pub(crate) fn call_statement(
        &mut self,
        node: NodeId,
        pre: &mut Vec<GoStmt>,
    ) -> Result<Option<GoStmt>> {
        let Some(object) = self.tree.child_by_field(node, "object") else {
            return Ok(None);
        };
        let name = self.text(self.field(node, "name")?);
        let Some(ty) = self.static_type(object) else {
            return Ok(None);
        };
        let argc = self.argument_nodes(node).len();

        let stmt = match (&ty, name, argc) {
            (GoType::Slice(_), "add", 1) => {
                let place = self.collection_place(object, pre)?;
                let args = self.arguments(node, pre)?;
                let appended = GoExpr::call_named("append", [vec![place.read()], args].concat());
                self.store(place, "=", appended)
            }
            (GoType::Slice(_), "add", 2) => {
                self.import("slices");
                let place = self.collection_place(object, pre)?;
                let mut args = self.arguments(node, pre)?;
                let value = args.pop().unwrap_or_else(GoExpr::nil);
                let index = args.pop().unwrap_or_else(|| GoExpr::lit("0"));
                let inserted = GoExpr::call(
                    GoExpr::ident("slices").select("Insert"),
                    vec![place.read(), GoExpr::as_int(index), value],
                );
                self.store(place, "=", inserted)
            }
            (GoType::Slice(_), "set", 2) => {
                let recv = self.collection_place(object, pre)?.read();
                let mut args = self.arguments(node, pre)?;
                let value = args.pop().unwrap_or_else(GoExpr::nil);
                let index = args.pop().unwrap_or_else(|| GoExpr::lit("0"));
                GoStmt::assign(GoExpr::index(recv, index), value)
            }
            (GoType::Slice(_), "remove", 1) => {
                self.import("slices");
                let place = self.collection_place(object, pre)?;
                let index = self.arguments(node, pre)?.remove(0);
                let start = GoExpr::as_int(index.clone());
                let end = GoExpr::binary("+", GoExpr::as_int(index), GoExpr::lit("1"));
                let deleted = GoExpr::call(
                    GoExpr::ident("slices").select("Delete"),
                    vec![place.read(), start, end],
                );
                self.store(place, "=", deleted)
            }
            (GoType::Slice(_), "clear", 0) => {
                let place = self.collection_place(object, pre)?;
                let emptied = GoExpr::slice_of(place.read(), None, Some(GoExpr::lit("0")));
                self.store(place, "=", emptied)
            }
            (GoType::Map(_, _), "put", 2) => {
                let recv = self.collection_place(object, pre)?.read();
                let mut args = self.arguments(node, pre)?;
                let value = args.pop().unwrap_or_else(GoExpr::nil);
                let key = args.pop().unwrap_or_else(GoExpr::nil);
                GoStmt::assign(GoExpr::index(recv, key), value)
            }
            (GoType::Map(_, _), "remove", 1) => {
                let recv = self.collection_place(object, pre)?.read();
                let args = self.arguments(node, pre)?;
                GoStmt::Expr(GoExpr::call_named("delete", [vec![recv], args].concat()))
            }
            (GoType::Map(_, _), "clear", 0) => {
                let recv = self.collection_place(object, pre)?.read();
                GoStmt::Expr(GoExpr::call_named("clear", vec![recv]))
            }
            _ => return Ok(None),
        };
        Ok(Some(stmt))
    }

    /// Collection receiver that can be written back: variables and fields go
    /// through `place`, anything else is read as a value
    fn collection_place(&mut self, object: NodeId, pre: &mut Vec<GoStmt>) -> Result<Place> {
        match self.tree.kind(object) {
            SyntaxKind::Identifier
            | SyntaxKind::FieldAccess
            | SyntaxKind::ArrayAccess
            | SyntaxKind::ParenthesizedExpression => self.place(object, pre),
            _ => Ok(Place::Expr(self.expr(object, pre)?)),
        }
    }

    pub(crate) fn call(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let name = self.text(self.field(node, "name")?);
        let argc = self.argument_nodes(node).len();

        let Some(object) = self.tree.child_by_field(node, "object") else {
            return self.bare_call(node, name, pre);
        };

        // statement-shaped collection updates used as values
        if let Some(stmt) = self.call_statement(node, pre)? {
            pre.push(stmt);
            let value = match name {
                "put" | "set" => self.argument_nodes(node).last().copied(),
                _ => None,
            };
            return match value {
                Some(v) => self.expr(v, &mut Vec::new()),
                None => Ok(GoExpr::lit("true")),
            };
        }

        match self.tree.kind(object) {
            SyntaxKind::This => return self.self_call(node, name, pre),
            SyntaxKind::Super => return self.super_call(node, name, pre),
            _ => {}
        }

        let object_text = self.text(object);
        if let Some(expr) = self.print_call(node, object_text, name, pre)? {
            return Ok(expr);
        }
        if self.tree.kind(object) == SyntaxKind::Identifier
            && self.scope.lookup(object_text).is_none()
            && self.own_field(object_text).is_none()
        {
            if let Some(expr) = self.library_static(node, object_text, name, pre)? {
                return Ok(expr);
            }
            if self.ctx.type_info(object_text).is_some() {
                return self.static_call(node, object_text, name, pre);
            }
        }

        let ty = self.static_type(object);
        let recv = self.expr(object, pre)?;
        let user_type = ty
            .as_ref()
            .and_then(|t| t.base_name())
            .map_or(false, |b| self.ctx.type_info(b).is_some());
        if argc == 0 {
            if let Some(field) = self.record_component(ty.as_ref(), name) {
                return Ok(recv.select(field.target));
            }
        }
        if !user_type {
            let args = self.argument_nodes(node);
            if let Some(expr) = self.library_method(ty.as_ref(), recv.clone(), name, &args, pre)? {
                return Ok(expr);
            }
        }

        let args = self.arguments(node, pre)?;
        let (target, warning) = self.resolve_method(name, argc);
        let call = recv.method(target, args);
        Ok(match warning {
            Some(w) => call.with_comment(w),
            None => call,
        })
    }

    fn bare_call(&mut self, node: NodeId, name: &str, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let argc = self.argument_nodes(node).len();
        if let Some(owner) = self.scope.owner.clone() {
            // record component accessor
            let is_record = self.ctx.kind_of(&owner) == Some(TypeKind::Record);
            if argc == 0 && (is_record || self.ctx.find_method(&owner, name, 0).is_none()) {
                if let Some(field) = self.own_field(name) {
                    return self.read_field(&field);
                }
            }
            if let Some((_, method)) = self.ctx.find_method(&owner, name, argc) {
                if !method.is_static && self.scope.this_expr().is_some() {
                    return self.self_call(node, name, pre);
                }
            }
        }
        let args = self.arguments(node, pre)?;
        let (target, warning) = self.resolve_method(name, argc);
        let call = GoExpr::call_named(target, args);
        Ok(match warning {
            Some(w) => call.with_comment(w),
            None => call,
        })
    }

    /// Component of a record-typed receiver read through its accessor
    fn record_component(&self, ty: Option<&GoType>, name: &str) -> Option<FieldInfo> {
        let base = ty?.base_name()?;
        let info = self.ctx.type_info(base)?;
        if info.kind != TypeKind::Record {
            return None;
        }
        info.field(name).filter(|f| !f.is_static).cloned()
    }

    fn self_call(&mut self, node: NodeId, name: &str, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let argc = self.argument_nodes(node).len();
        if let Some(owner) = self.scope.owner.clone() {
            if let Some((_, method)) = self.ctx.find_method(&owner, name, argc) {
                if method.is_static {
                    let args = self.arguments(node, pre)?;
                    let (target, warning) = self.resolve_method(name, argc);
                    let call = GoExpr::call_named(target, args);
                    return Ok(match warning {
                        Some(w) => call.with_comment(w),
                        None => call,
                    });
                }
            }
        }
        let this = self.this_value()?;
        let args = self.arguments(node, pre)?;
        let (target, warning) = self.resolve_method(name, argc);
        let call = this.method(target, args);
        Ok(match warning {
            Some(w) => call.with_comment(w),
            None => call,
        })
    }

    fn super_call(&mut self, node: NodeId, name: &str, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let parent = self
            .scope
            .owner
            .as_deref()
            .and_then(|o| self.ctx.type_info(o))
            .and_then(|t| t.superclass.clone())
            .filter(|p| self.ctx.type_info(p).is_some())
            .ok_or_else(|| MigrationError::unhandled("super call into an undeclared type"))?;
        let argc = self.argument_nodes(node).len();
        let holder = if self.ctx.is_abstract(&parent) {
            format!("{}Methods", parent)
        } else {
            parent
        };
        let this = self.this_value()?;
        let args = self.arguments(node, pre)?;
        let (target, _) = self.resolve_method(name, argc);
        Ok(this.select(holder).method(target, args))
    }

    fn static_call(
        &mut self,
        node: NodeId,
        type_name: &str,
        name: &str,
        pre: &mut Vec<GoStmt>,
    ) -> Result<GoExpr> {
        let argc = self.argument_nodes(node).len();
        let is_enum = self
            .ctx
            .type_info(type_name)
            .map_or(false, |t| !t.constants.is_empty());
        if is_enum && name == "values" && argc == 0 {
            return Ok(GoExpr::call_named(format!("{}Values", type_name), Vec::new()));
        }
        let args = self.arguments(node, pre)?;
        let (target, warning) = self.resolve_method(name, argc);
        let call = GoExpr::call_named(target, args);
        Ok(match warning {
            Some(w) => call.with_comment(w),
            None => call,
        })
    }

    /// `System.out.println` and friends
    fn print_call(
        &mut self,
        node: NodeId,
        object: &str,
        name: &str,
        pre: &mut Vec<GoStmt>,
    ) -> Result<Option<GoExpr>> {
        let stderr = match object {
            "System.out" => false,
            "System.err" => true,
            _ => return Ok(None),
        };
        let func = match name {
            "println" => "ln",
            "print" => "",
            "printf" | "format" => "f",
            _ => return Ok(None),
        };
        self.import("fmt");
        let mut args = self.arguments(node, pre)?;
        if stderr {
            self.import("os");
            args.insert(0, GoExpr::ident("os").select("Stderr"));
            return Ok(Some(GoExpr::call(
                GoExpr::ident("fmt").select(format!("Fprint{}", func)),
                args,
            )));
        }
        Ok(Some(GoExpr::call(
            GoExpr::ident("fmt").select(format!("Print{}", func)),
            args,
        )))
    }

    /// Static helpers of `java.lang`/`java.util` classes
    fn library_static(
        &mut self,
        node: NodeId,
        class: &str,
        name: &str,
        pre: &mut Vec<GoStmt>,
    ) -> Result<Option<GoExpr>> {
        let arg_nodes = self.argument_nodes(node);
        let expr = match (class, name) {
            ("String", "format") => {
                self.import("fmt");
                let args = self.arguments(node, pre)?;
                GoExpr::call(GoExpr::ident("fmt").select("Sprintf"), args)
            }
            ("String", "valueOf") | ("Integer", "toString") | ("Objects", "toString") => {
                self.import("fmt");
                let args = self.arguments(node, pre)?;
                GoExpr::call(GoExpr::ident("fmt").select("Sprint"), args)
            }
            ("String", "join") if arg_nodes.len() == 2 => {
                self.import("strings");
                let mut args = self.arguments(node, pre)?;
                let parts = args.pop().unwrap_or_else(GoExpr::nil);
                let sep = args.pop().unwrap_or_else(|| GoExpr::lit("\"\""));
                GoExpr::call(GoExpr::ident("strings").select("Join"), vec![parts, sep])
            }
            ("Math", "max") | ("Math", "min") => {
                let args = self.arguments(node, pre)?;
                GoExpr::call_named(name, args)
            }
            ("Math", "abs") if arg_nodes.len() == 1 => {
                let simple = matches!(
                    self.tree.kind(arg_nodes[0]),
                    SyntaxKind::Identifier | SyntaxKind::FieldAccess
                );
                let value = self.expr(arg_nodes[0], pre)?;
                if simple {
                    GoExpr::call_named("max", vec![value.clone(), GoExpr::unary("-", value)])
                } else {
                    self.import("math");
                    GoExpr::call(
                        GoExpr::ident("math").select("Abs"),
                        vec![GoExpr::call_named("float64", vec![value])],
                    )
                }
            }
            ("Math", "round") => {
                self.import("math");
                let args = self.arguments(node, pre)?;
                GoExpr::call_named(
                    "int64",
                    vec![GoExpr::call(GoExpr::ident("math").select("Round"), args)],
                )
            }
            ("Math", "random") => {
                self.import("math/rand");
                GoExpr::call(GoExpr::ident("rand").select("Float64"), Vec::new())
            }
            ("Math", other) => match MATH_FUNCTIONS.iter().find(|(j, _)| *j == other) {
                Some((_, go)) => {
                    self.import("math");
                    let args = self.arguments(node, pre)?;
                    GoExpr::call(GoExpr::ident("math").select(*go), args)
                }
                None => return Ok(None),
            },
            ("Objects", "equals") if arg_nodes.len() == 2 => {
                let mut args = self.arguments(node, pre)?;
                let right = args.pop().unwrap_or_else(GoExpr::nil);
                let left = args.pop().unwrap_or_else(GoExpr::nil);
                GoExpr::binary("==", left, right)
            }
            ("Integer", "parseInt") | ("Long", "parseLong") if arg_nodes.len() == 1 => {
                self.import("strconv");
                let value = self.expr(arg_nodes[0], pre)?;
                let ty = if class == "Integer" { "int32" } else { "int64" };
                parse_number(
                    GoExpr::call(GoExpr::ident("strconv").select("Atoi"), vec![value]),
                    ty,
                )
            }
            ("Double", "parseDouble") if arg_nodes.len() == 1 => {
                self.import("strconv");
                let value = self.expr(arg_nodes[0], pre)?;
                parse_number(
                    GoExpr::call(
                        GoExpr::ident("strconv").select("ParseFloat"),
                        vec![value, GoExpr::lit("64")],
                    ),
                    "float64",
                )
            }
            ("Character", "isDigit") | ("Character", "isLetter") | ("Character", "isWhitespace") => {
                self.import("unicode");
                let func = match name {
                    "isDigit" => "IsDigit",
                    "isLetter" => "IsLetter",
                    _ => "IsSpace",
                };
                let args = self.arguments(node, pre)?;
                GoExpr::call(GoExpr::ident("unicode").select(func), args)
            }
            ("Thread", "sleep") if arg_nodes.len() == 1 => {
                self.import("time");
                let millis = self.expr(arg_nodes[0], pre)?;
                GoExpr::call(
                    GoExpr::ident("time").select("Sleep"),
                    vec![GoExpr::binary(
                        "*",
                        GoExpr::call(GoExpr::ident("time").select("Duration"), vec![millis]),
                        GoExpr::ident("time").select("Millisecond"),
                    )],
                )
            }
            ("List", "of") | ("Arrays", "asList") | ("Set", "of") => {
                let elem = arg_nodes
                    .first()
                    .and_then(|a| self.static_type(*a))
                    .unwrap_or(GoType::Any);
                let args = self.arguments(node, pre)?;
                GoExpr::Composite {
                    ty: GoType::slice(elem),
                    elements: args.into_iter().map(|a| (None, a)).collect(),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(expr))
    }

    /// Instance methods of strings, slices and maps
    fn library_method(
        &mut self,
        ty: Option<&GoType>,
        recv: GoExpr,
        name: &str,
        args: &[NodeId],
        pre: &mut Vec<GoStmt>,
    ) -> Result<Option<GoExpr>> {
        // arguments are lowered aside and only kept when a pattern applies
        let mut arg_pre = Vec::new();
        let mut lowered = Vec::new();
        for arg in args {
            lowered.push(self.expr(*arg, &mut arg_pre)?);
        }
        let argc = lowered.len();
        let zero = || GoExpr::lit("0");

        let expr = match (ty, name, argc) {
            (_, "equals", 1) => GoExpr::binary("==", recv, lowered.remove(0)),
            (Some(t), "length" | "size", 0) if t.is_string() || t.is_slice() || t.is_map() => {
                GoExpr::len_of(recv)
            }
            (None, "length", 0) => GoExpr::len_of(recv),
            (Some(t), "isEmpty", 0) if t.is_string() || t.is_slice() || t.is_map() => {
                GoExpr::binary("==", GoExpr::call_named("len", vec![recv]), zero())
            }
            (Some(t), "charAt", 1) if t.is_string() => GoExpr::call_named(
                "rune",
                vec![GoExpr::index(recv, lowered.remove(0))],
            ),
            (Some(t), "substring", 1 | 2) if t.is_string() => {
                let mut it = lowered.into_iter();
                let low = it.next();
                let high = it.next();
                GoExpr::slice_of(recv, low, high)
            }
            (Some(t), "indexOf", 1) if t.is_string() => {
                self.import("strings");
                GoExpr::call_named(
                    "int32",
                    vec![GoExpr::call(
                        GoExpr::ident("strings").select("Index"),
                        vec![recv, lowered.remove(0)],
                    )],
                )
            }
            (Some(t), "toString", 0) if t.is_string() => recv,
            (Some(t), other, _) if t.is_string() => {
                match STRING_FUNCTIONS.iter().find(|(j, _)| *j == other) {
                    Some((_, go)) => {
                        self.import("strings");
                        GoExpr::call(
                            GoExpr::ident("strings").select(*go),
                            [vec![recv], lowered].concat(),
                        )
                    }
                    None => return Ok(None),
                }
            }
            (Some(t), "get", 1) if t.is_slice() || t.is_map() => {
                GoExpr::index(recv, lowered.remove(0))
            }
            (Some(t), "contains", 1) if t.is_slice() => {
                self.import("slices");
                GoExpr::call(
                    GoExpr::ident("slices").select("Contains"),
                    vec![recv, lowered.remove(0)],
                )
            }
            (Some(t), "indexOf", 1) if t.is_slice() => {
                self.import("slices");
                GoExpr::call_named(
                    "int32",
                    vec![GoExpr::call(
                        GoExpr::ident("slices").select("Index"),
                        vec![recv, lowered.remove(0)],
                    )],
                )
            }
            (Some(GoType::Map(_, _)), "containsKey", 1) => GoExpr::iife(
                vec![GoType::named("bool")],
                vec![
                    GoStmt::Define {
                        names: vec!["_".to_string(), "ok".to_string()],
                        values: vec![GoExpr::index(recv, lowered.remove(0))],
                    },
                    GoStmt::Return(vec![GoExpr::ident("ok")]),
                ],
            ),
            (Some(GoType::Map(_, value)), "getOrDefault", 2) => {
                let fallback = lowered.pop().unwrap_or_else(GoExpr::nil);
                let key = lowered.pop().unwrap_or_else(GoExpr::nil);
                GoExpr::iife(
                    vec![value.as_ref().clone()],
                    vec![
                        GoStmt::If {
                            init: Some(Box::new(GoStmt::Define {
                                names: vec!["v".to_string(), "ok".to_string()],
                                values: vec![GoExpr::index(recv, key)],
                            })),
                            cond: GoExpr::ident("ok"),
                            body: vec![GoStmt::Return(vec![GoExpr::ident("v")])],
                            otherwise: None,
                        },
                        GoStmt::Return(vec![fallback]),
                    ],
                )
            }
            (Some(GoType::Any) | None, "getMessage", 0)
                if !self.ctx.methods.contains("getMessage") =>
            {
                self.import("fmt");
                GoExpr::call(GoExpr::ident("fmt").select("Sprint"), vec![recv])
            }
            _ => return Ok(None),
        };
        pre.extend(arg_pre);
        Ok(Some(expr))
    }

    pub(crate) fn object_creation(
        &mut self,
        node: NodeId,
        hint: Option<&GoType>,
        pre: &mut Vec<GoStmt>,
    ) -> Result<GoExpr> {
        if self.tree.child_of_kind(node, SyntaxKind::ClassBody).is_some() {
            return Err(MigrationError::unhandled("anonymous class"));
        }
        let type_node = self.field(node, "type")?;
        let simple = simple_type_name(self.tree, type_node);
        let arg_nodes = self.argument_nodes(node);

        if BUILTIN_EXCEPTIONS.contains(&simple.as_str()) {
            let args = self.arguments(node, pre)?;
            return Ok(exception_value(self, &simple, args, &arg_nodes));
        }

        let mapped = self.map_type(type_node)?;
        // diamond: take element types from the declaration
        let mapped = match (&mapped, hint) {
            (GoType::Slice(e), Some(h @ GoType::Slice(_))) if **e == GoType::Any => h.clone(),
            (GoType::Map(k, v), Some(h @ GoType::Map(_, _)))
                if **k == GoType::Any && **v == GoType::Any =>
            {
                h.clone()
            }
            _ => mapped,
        };

        match &mapped {
            GoType::Slice(_) => {
                if arg_nodes.is_empty() {
                    return Ok(GoExpr::Composite {
                        ty: mapped,
                        elements: Vec::new(),
                    });
                }
                let capacity = self
                    .static_type(arg_nodes[0])
                    .map_or(false, |t| t.is_basic() && !t.is_string());
                let arg = self.expr(arg_nodes[0], pre)?;
                if capacity {
                    return Ok(GoExpr::call_named(
                        "make",
                        vec![GoExpr::Raw(mapped.to_string()), GoExpr::lit("0"), arg],
                    ));
                }
                return Ok(GoExpr::Call {
                    func: Box::new(GoExpr::ident("append")),
                    args: vec![
                        GoExpr::Composite {
                            ty: mapped,
                            elements: Vec::new(),
                        },
                        arg,
                    ],
                    spread: true,
                    comment: None,
                });
            }
            GoType::Map(_, _) => {
                if let Some(first) = arg_nodes.first() {
                    self.import("maps");
                    let arg = self.expr(*first, pre)?;
                    return Ok(GoExpr::call(GoExpr::ident("maps").select("Clone"), vec![arg]));
                }
                return Ok(GoExpr::Composite {
                    ty: mapped,
                    elements: Vec::new(),
                });
            }
            GoType::Any => return Ok(GoExpr::Raw("struct{}{}".to_string())),
            _ => {}
        }

        let args = self.arguments(node, pre)?;
        let resolution = self.constructor_name(&simple, args.len());
        let func = match mapped.pointee() {
            GoType::Generic { args: type_args, .. } if !type_args.is_empty() => {
                let rendered: Vec<String> = type_args.iter().map(|t| t.to_string()).collect();
                GoExpr::Raw(format!("{}[{}]", resolution.target, rendered.join(", ")))
            }
            _ => GoExpr::ident(resolution.target.clone()),
        };
        let call = GoExpr::call(func, args);
        Ok(match resolution.warning(&simple, arg_nodes.len()) {
            Some(w) => call.with_comment(w),
            None => call,
        })
    }
}

/// `strconv` result unpacked, panicking on malformed input
fn parse_number(call: GoExpr, ty: &str) -> GoExpr {
    GoExpr::iife(
        vec![GoType::named(ty)],
        vec![
            GoStmt::Define {
                names: vec!["v".to_string(), "err".to_string()],
                values: vec![call],
            },
            GoStmt::If {
                init: None,
                cond: GoExpr::binary("!=", GoExpr::ident("err"), GoExpr::nil()),
                body: vec![GoStmt::panic(GoExpr::ident("err"))],
                otherwise: None,
            },
            GoStmt::Return(vec![GoExpr::call_named(ty, vec![GoExpr::ident("v")])]),
        ],
    )
}

/// Built-in exception constructed outside a `throw`
fn exception_value(
    lowerer: &mut Lowerer<'_, '_>,
    type_name: &str,
    mut args: Vec<GoExpr>,
    arg_nodes: &[NodeId],
) -> GoExpr {
    let message_is_string = arg_nodes
        .first()
        .and_then(|a| lowerer.static_type(*a))
        .map_or(false, |t| t.is_string());
    if args.is_empty() {
        lowerer.import("errors");
        return GoExpr::call(
            GoExpr::ident("errors").select("New"),
            vec![GoExpr::lit(format!("\"{}\"", type_name))],
        );
    }
    if args.len() == 1 && message_is_string {
        lowerer.import("errors");
        return GoExpr::call(GoExpr::ident("errors").select("New"), vec![args.remove(0)]);
    }
    lowerer.import("fmt");
    GoExpr::call(
        GoExpr::ident("fmt").select("Errorf"),
        [vec![GoExpr::lit("\"%v\"")], args].concat(),
    )
}

#[cfg(test)]
mod tests {
    use crate::features::lowering::test_support::lower_method_body;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_println_and_format() {
        let out = lower_method_body(
            "class A { void f(String name) { System.out.println(String.format(\"hi %s\", name)); System.err.println(name); } }",
        );
        assert_eq!(
            out,
            "fmt.Println(fmt.Sprintf(\"hi %s\", name))\nfmt.Fprintln(os.Stderr, name)\n"
        );
    }

    #[test]
    fn test_list_and_map_patterns() {
        let out = lower_method_body(
            "class A { int f(List<String> xs, Map<String, Integer> m) { xs.add(\"a\"); m.put(\"k\", 1); return xs.size() + m.get(\"k\"); } }",
        );
        assert_eq!(
            out,
            "xs = append(xs, \"a\")\nm[\"k\"] = 1\nreturn int32(len(xs)) + m[\"k\"]\n"
        );
    }

    #[test]
    fn test_overloaded_calls_resolve_by_arity() {
        let out = lower_method_body(
            "class A { void f() { add(1); add(1, 2); } void add(int a) {} void add(int a, int b) {} }",
        );
        assert_eq!(out, "r.add(1)\nr.addWithIntInt(1, 2)\n");
    }

    #[test]
    fn test_ambiguous_call_carries_comment() {
        let out = lower_method_body(
            "class A { void f(Foo x) { bar(x); } static void bar(Foo f) {} static void bar(Baz b) {} }",
        );
        assert_eq!(
            out,
            "bar(x) /* ambiguous call: 2 overloads of `bar` accept 1 argument(s) */\n"
        );
    }

    #[test]
    fn test_object_creation_uses_constructor_table() {
        let out = lower_method_body(
            "class A { void f() { Point p = new Point(1, 2); List<Integer> xs = new ArrayList<>(); } }
             class Point { Point(int x, int y) {} }",
        );
        assert_eq!(
            out,
            "var p *Point = newPoint(1, 2)\nvar xs []int32 = []int32{}\n"
        );
    }
}

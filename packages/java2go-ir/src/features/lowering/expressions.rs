//! Expression lowering

use super::literals;
use super::scope::ReturnShape;
use super::Lowerer;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{GoExpr, GoParam, GoStmt, GoType};
use crate::features::migration::FieldInfo;
use crate::features::parsing::{NodeId, SyntaxKind};
use crate::features::signatures::simple_type_name;
use crate::features::type_mapping::wrap_dims;
use crate::shared::utils::{capitalize, escape_identifier};

/// Assignable location
pub(crate) enum Place {
    Expr(GoExpr),
    /// Field reached through `GetX`/`SetX` on an abstract-class value
    Accessor { receiver: GoExpr, field: String },
}

impl Place {
    /// The current value held by the place
    pub(crate) fn read(&self) -> GoExpr {
        match self {
            Place::Expr(expr) => expr.clone(),
            Place::Accessor { receiver, field } => {
                receiver.clone().method(format!("Get{}", field), Vec::new())
            }
        }
    }
}

/// Constants of `java.lang` wrapper types and `Math`
const LIBRARY_CONSTANTS: &[(&str, &str, &str)] = &[
    ("Math.PI", "math", "math.Pi"),
    ("Math.E", "math", "math.E"),
    ("Integer.MAX_VALUE", "math", "math.MaxInt32"),
    ("Integer.MIN_VALUE", "math", "math.MinInt32"),
    ("Long.MAX_VALUE", "math", "math.MaxInt64"),
    ("Long.MIN_VALUE", "math", "math.MinInt64"),
    ("Double.MAX_VALUE", "math", "math.MaxFloat64"),
];

impl<'t, 'c> Lowerer<'t, 'c> {
    pub(crate) fn expr(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        self.expr_with_hint(node, None, pre)
    }

    /// Lower an expression; `hint` is the expected Go type where known
    pub(crate) fn expr_with_hint(
        &mut self,
        node: NodeId,
        hint: Option<&GoType>,
        pre: &mut Vec<GoStmt>,
    ) -> Result<GoExpr> {
        let text = self.text(node);
        match self.tree.kind(node) {
            SyntaxKind::Identifier => self.identifier(node),
            SyntaxKind::This => self.this_value(),
            SyntaxKind::DecimalIntegerLiteral
            | SyntaxKind::HexIntegerLiteral
            | SyntaxKind::OctalIntegerLiteral
            | SyntaxKind::BinaryIntegerLiteral => Ok(GoExpr::lit(literals::integer(text))),
            SyntaxKind::DecimalFloatingPointLiteral | SyntaxKind::HexFloatingPointLiteral => {
                Ok(GoExpr::lit(literals::floating(text)))
            }
            SyntaxKind::True | SyntaxKind::False => Ok(GoExpr::lit(text)),
            SyntaxKind::NullLiteral => Ok(GoExpr::nil()),
            SyntaxKind::StringLiteral => Ok(GoExpr::lit(literals::string(text))),
            SyntaxKind::TextBlock => Ok(GoExpr::lit(literals::text_block(text))),
            SyntaxKind::CharacterLiteral => Ok(GoExpr::lit(literals::character(text))),
            SyntaxKind::ParenthesizedExpression => {
                let inner = self.nth_named(node, 0)?;
                Ok(GoExpr::Paren(Box::new(self.expr_with_hint(inner, hint, pre)?)))
            }
            SyntaxKind::BinaryExpression => self.binary(node, pre),
            SyntaxKind::UnaryExpression => self.unary(node, pre),
            SyntaxKind::UpdateExpression => self.update_value(node, pre),
            SyntaxKind::AssignmentExpression => {
                let stmt = self.assignment(node, pre)?;
                pre.push(stmt);
                let left = self.field(node, "left")?;
                self.expr(left, &mut Vec::new())
            }
            SyntaxKind::TernaryExpression => self.ternary(node, hint, pre),
            SyntaxKind::CastExpression => self.cast(node, pre),
            SyntaxKind::InstanceofExpression => self.instanceof(node, pre),
            SyntaxKind::LambdaExpression => self.lambda(node),
            SyntaxKind::MethodReference => self.method_reference(node),
            SyntaxKind::MethodInvocation => self.call(node, pre),
            SyntaxKind::ObjectCreationExpression => self.object_creation(node, hint, pre),
            SyntaxKind::ArrayCreationExpression => self.array_creation(node, pre),
            SyntaxKind::ArrayInitializer => self.array_initializer(node, hint, pre),
            SyntaxKind::ArrayAccess => {
                let array = self.field(node, "array")?;
                let index = self.field(node, "index")?;
                let target = self.expr(array, pre)?;
                let index = self.expr(index, pre)?;
                Ok(GoExpr::index(target, index))
            }
            SyntaxKind::FieldAccess => self.field_access(node, pre),
            SyntaxKind::SwitchExpression => self.switch_value(node, hint),
            other => Err(MigrationError::unhandled(match other {
                SyntaxKind::Other(raw) | SyntaxKind::Token(raw) => raw,
                _ => self.tree.raw_kind(node),
            })),
        }
    }

    pub(crate) fn this_value(&self) -> Result<GoExpr> {
        self.scope
            .this_expr()
            .ok_or_else(|| MigrationError::unhandled("`this` in a static context"))
    }

    fn identifier(&mut self, node: NodeId) -> Result<GoExpr> {
        let name = self.text(node);
        if let Some(local) = self.scope.lookup(name) {
            return Ok(GoExpr::ident(local.go_name.clone()));
        }
        if let Some(field) = self.own_field(name) {
            return self.read_field(&field);
        }
        if let Some(constant) = self.ctx.enum_constant(name) {
            return Ok(GoExpr::ident(constant));
        }
        Ok(GoExpr::ident(escape_identifier(name)))
    }

    /// Field visible through `this` (own or inherited)
    pub(crate) fn own_field(&self, name: &str) -> Option<FieldInfo> {
        let owner = self.scope.owner.as_deref()?;
        self.ctx.find_field(owner, name).map(|(_, f)| f.clone())
    }

    pub(crate) fn read_field(&self, field: &FieldInfo) -> Result<GoExpr> {
        Ok(self.place_of_field(field)?.read())
    }

    fn place_of_field(&self, field: &FieldInfo) -> Result<Place> {
        if field.is_static {
            return Ok(Place::Expr(GoExpr::ident(field.target.clone())));
        }
        let this = self.this_value()?;
        if self.scope.is_abstract_self() {
            return Ok(Place::Accessor {
                receiver: this,
                field: capitalize(&field.name),
            });
        }
        Ok(Place::Expr(this.select(field.target.clone())))
    }

    /// Resolve an assignment target
    pub(crate) fn place(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<Place> {
        match self.tree.kind(node) {
            SyntaxKind::Identifier => {
                let name = self.text(node);
                if let Some(local) = self.scope.lookup(name) {
                    return Ok(Place::Expr(GoExpr::ident(local.go_name.clone())));
                }
                match self.own_field(name) {
                    Some(field) => self.place_of_field(&field),
                    None => Ok(Place::Expr(GoExpr::ident(escape_identifier(name)))),
                }
            }
            SyntaxKind::FieldAccess => {
                let object = self.field(node, "object")?;
                let name = self.text(self.field(node, "field")?);
                if matches!(self.tree.kind(object), SyntaxKind::This | SyntaxKind::Super) {
                    if let Some(field) = self.own_field(name) {
                        return self.place_of_field(&field);
                    }
                }
                Ok(Place::Expr(self.field_access(node, pre)?))
            }
            SyntaxKind::ArrayAccess => Ok(Place::Expr(self.expr(node, pre)?)),
            SyntaxKind::ParenthesizedExpression => {
                let inner = self.nth_named(node, 0)?;
                self.place(inner, pre)
            }
            _ => Err(MigrationError::unhandled(format!(
                "assignment to {}",
                self.tree.raw_kind(node)
            ))),
        }
    }

    /// `target op value` as a statement
    pub(crate) fn store(&self, place: Place, op: &str, value: GoExpr) -> GoStmt {
        let op = if op == ">>>=" { ">>=" } else { op };
        match place {
            Place::Expr(target) => GoStmt::Assign {
                targets: vec![target],
                op: op.to_string(),
                values: vec![value],
            },
            Place::Accessor { receiver, field } => {
                let value = match op.strip_suffix('=').filter(|o| !o.is_empty()) {
                    Some(bin) => GoExpr::binary(
                        bin,
                        receiver.clone().method(format!("Get{}", field), Vec::new()),
                        value,
                    ),
                    None => value,
                };
                GoStmt::Expr(receiver.method(format!("Set{}", field), vec![value]))
            }
        }
    }

    pub(crate) fn assignment(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoStmt> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let op = self.text(self.field(node, "operator")?);
        let place = self.place(left, pre)?;
        let hint = self.static_type(left);
        let value = self.expr_with_hint(right, hint.as_ref(), pre)?;
        Ok(self.store(place, op, value))
    }

    /// `i++` / `--i` as a statement
    pub(crate) fn update_stmt(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoStmt> {
        let operand = self.nth_named(node, 0)?;
        let op = if self.tree.has_token(node, "++") { "++" } else { "--" };
        Ok(match self.place(operand, pre)? {
            Place::Expr(target) => GoStmt::IncDec {
                target,
                op: op.to_string(),
            },
            accessor => {
                let compound = if op == "++" { "+=" } else { "-=" };
                self.store(accessor, compound, GoExpr::lit("1"))
            }
        })
    }

    fn update_value(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let operand = self.nth_named(node, 0)?;
        let prefix = self
            .tree
            .children(node)
            .first()
            .map_or(false, |c| !self.tree.node(*c).is_named);
        let current = self.expr(operand, pre)?;
        if prefix {
            let stmt = self.update_stmt(node, pre)?;
            pre.push(stmt);
            return Ok(current);
        }
        let temp = self.ctx.fresh_name("tmp");
        pre.push(GoStmt::define(temp.clone(), current));
        let stmt = self.update_stmt(node, pre)?;
        pre.push(stmt);
        Ok(GoExpr::ident(temp))
    }

    fn binary(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let left_node = self.field(node, "left")?;
        let right_node = self.field(node, "right")?;
        let op = self.text(self.field(node, "operator")?);
        let mut left = self.expr(left_node, pre)?;
        let mut right = self.expr(right_node, pre)?;

        if op == "+" {
            let (lt, rt) = (self.static_type(left_node), self.static_type(right_node));
            let is_string = |t: &Option<GoType>| t.as_ref().map_or(false, GoType::is_string);
            let is_other = |t: &Option<GoType>| t.as_ref().map_or(false, |t| !t.is_string());
            if is_string(&lt) && is_other(&rt) {
                self.import("fmt");
                right = GoExpr::call(GoExpr::ident("fmt").select("Sprint"), vec![right]);
            } else if is_other(&lt) && is_string(&rt) {
                self.import("fmt");
                left = GoExpr::call(GoExpr::ident("fmt").select("Sprint"), vec![left]);
            }
        }

        let op = match op {
            ">>>" => ">>",
            other => other,
        };
        Ok(GoExpr::binary(op, left, right))
    }

    fn unary(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let operand = self.field(node, "operand")?;
        let op = self.text(self.field(node, "operator")?);
        let value = self.expr(operand, pre)?;
        let op = if op == "~" { "^" } else { op };
        Ok(GoExpr::unary(op, value))
    }

    fn ternary(
        &mut self,
        node: NodeId,
        hint: Option<&GoType>,
        pre: &mut Vec<GoStmt>,
    ) -> Result<GoExpr> {
        let condition = self.field(node, "condition")?;
        let consequence = self.field(node, "consequence")?;
        let alternative = self.field(node, "alternative")?;

        let result = hint
            .cloned()
            .or_else(|| self.static_type(consequence))
            .or_else(|| self.static_type(alternative))
            .unwrap_or(GoType::Any);

        let cond = self.expr(condition, pre)?;
        let mut then_body = Vec::new();
        let then_value = self.expr_with_hint(consequence, Some(&result), &mut then_body)?;
        then_body.push(GoStmt::Return(vec![then_value]));
        let mut body = vec![GoStmt::If {
            init: None,
            cond,
            body: then_body,
            otherwise: None,
        }];
        let else_value = self.expr_with_hint(alternative, Some(&result), &mut body)?;
        body.push(GoStmt::Return(vec![else_value]));

        Ok(GoExpr::iife(vec![result], body))
    }

    fn cast(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let ty_node = self.field(node, "type")?;
        let value_node = self.field(node, "value")?;
        let target = self.map_type(ty_node)?;
        let value = self.expr(value_node, pre)?;

        if target.is_basic() {
            return Ok(GoExpr::call_named(target.to_string(), vec![value]));
        }
        if target == GoType::Any {
            return Ok(value);
        }
        Ok(GoExpr::TypeAssert {
            target: Box::new(self.as_interface(value_node, value)),
            ty: target,
        })
    }

    /// Wrap in `any(..)` unless the value is already an interface
    fn as_interface(&self, node: NodeId, value: GoExpr) -> GoExpr {
        let is_interface = match self.static_type(node) {
            Some(GoType::Any) => true,
            Some(GoType::Named(name)) => self
                .ctx
                .kind_of(&name)
                .map_or(false, |k| k.is_interface_like()),
            _ => false,
        };
        if is_interface {
            value
        } else {
            GoExpr::call_named("any", vec![value])
        }
    }

    fn instanceof(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let left = self.field(node, "left")?;
        let right = self.field(node, "right")?;
        let ty = self.map_type(right)?;
        let subject = self.expr(left, pre)?;
        let assertion = GoExpr::TypeAssert {
            target: Box::new(self.as_interface(left, subject)),
            ty: ty.clone(),
        };

        if let Some(binding) = self.tree.field_text(node, "name") {
            let name = self.scope.declare(binding, Some(ty));
            let ok = format!("{}Ok", name);
            pre.push(GoStmt::Define {
                names: vec![name.clone(), ok.clone()],
                values: vec![assertion],
            });
            pre.push(GoStmt::assign(GoExpr::ident("_"), GoExpr::ident(name)));
            return Ok(GoExpr::ident(ok));
        }

        Ok(GoExpr::iife(
            vec![GoType::named("bool")],
            vec![
                GoStmt::Define {
                    names: vec!["_".to_string(), "ok".to_string()],
                    values: vec![assertion],
                },
                GoStmt::Return(vec![GoExpr::ident("ok")]),
            ],
        ))
    }

    fn lambda(&mut self, node: NodeId) -> Result<GoExpr> {
        let params_node = self.field(node, "parameters")?;
        let body_node = self.field(node, "body")?;

        self.scope.push_frame();
        let mut params = Vec::new();
        match self.tree.kind(params_node) {
            SyntaxKind::Identifier => {
                let name = self.scope.declare(self.text(params_node), None);
                params.push(GoParam::new(name, GoType::Any));
            }
            SyntaxKind::InferredParameters => {
                for ident in self.tree.named_children(params_node).collect::<Vec<_>>() {
                    let name = self.scope.declare(self.text(ident), None);
                    params.push(GoParam::new(name, GoType::Any));
                }
            }
            _ => {
                for param in crate::features::signatures::formal_parameters(self.tree, params_node)
                {
                    let ty = wrap_dims(self.map_type(param.type_node)?, param.extra_dims);
                    let name = self.scope.declare(&param.name, Some(ty.clone()));
                    params.push(GoParam {
                        name,
                        ty,
                        variadic: param.varargs,
                    });
                }
            }
        }

        let saved_returns = self.scope.returns.clone();
        let saved_yield = self.scope.yield_target.take();
        let lowered = if self.tree.kind(body_node) == SyntaxKind::Block {
            let has_value = self
                .tree
                .descendants_where(body_node, |n| n.kind == SyntaxKind::ReturnStatement)
                .into_iter()
                .any(|r| self.tree.named_children(r).next().is_some());
            self.scope.returns = ReturnShape::plain(has_value);
            self.lower_block(body_node).map(|body| {
                let results = if has_value { vec![GoType::Any] } else { Vec::new() };
                (results, body)
            })
        } else {
            self.scope.returns = ReturnShape::plain(true);
            self.lambda_expression_body(body_node)
        };
        self.scope.returns = saved_returns;
        self.scope.yield_target = saved_yield;
        self.scope.pop_frame();

        let (results, body) = lowered?;
        Ok(GoExpr::FuncLit {
            params,
            results,
            body,
        })
    }

    fn lambda_expression_body(&mut self, body: NodeId) -> Result<(Vec<GoType>, Vec<GoStmt>)> {
        if matches!(
            self.tree.kind(body),
            SyntaxKind::AssignmentExpression | SyntaxKind::UpdateExpression
        ) {
            let mut stmts = Vec::new();
            self.expression_statement(body, &mut stmts)?;
            return Ok((Vec::new(), stmts));
        }
        if self.tree.kind(body) == SyntaxKind::MethodInvocation {
            let mut stmts = Vec::new();
            if let Some(stmt) = self.call_statement(body, &mut stmts)? {
                stmts.push(stmt);
                return Ok((Vec::new(), stmts));
            }
        }
        let mut stmts = Vec::new();
        let value = self.expr(body, &mut stmts)?;
        stmts.push(GoStmt::Return(vec![value]));
        Ok((vec![GoType::Any], stmts))
    }

    fn method_reference(&mut self, node: NodeId) -> Result<GoExpr> {
        let target = self.nth_named(node, 0)?;
        let method_name = self
            .tree
            .named_children(node)
            .skip(1)
            .find(|c| self.tree.kind(*c) == SyntaxKind::Identifier)
            .map(|c| self.text(c));

        if self.tree.has_token(node, "new") {
            let type_name = simple_type_name(self.tree, target);
            return Ok(GoExpr::ident(self.constructor_name(&type_name, 0).target));
        }
        let method = method_name
            .ok_or_else(|| MigrationError::structural("method_reference", "name"))?;
        let go_method = self
            .ctx
            .methods
            .entries(method)
            .first()
            .map(|e| e.target_name())
            .unwrap_or_else(|| method.to_string());

        match self.tree.kind(target) {
            SyntaxKind::This => Ok(self.this_value()?.select(go_method)),
            SyntaxKind::Identifier | SyntaxKind::TypeIdentifier
                if self.names_type(self.text(target)) =>
            {
                Ok(GoExpr::ident(go_method))
            }
            _ => {
                let mut pre = Vec::new();
                let receiver = self.expr(target, &mut pre)?;
                if !pre.is_empty() {
                    return Err(MigrationError::unhandled("method reference with side effects"));
                }
                Ok(receiver.select(go_method))
            }
        }
    }

    /// True if `name` denotes a declared type rather than a variable
    pub(crate) fn names_type(&self, name: &str) -> bool {
        self.scope.lookup(name).is_none()
            && self.own_field(name).is_none()
            && self.ctx.type_info(name).is_some()
    }

    fn array_creation(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let elem = self.map_type(self.field(node, "type")?)?;
        let sized: Vec<NodeId> = self
            .tree
            .children_of_kind(node, SyntaxKind::DimensionsExpr);
        let extra = self
            .tree
            .children_of_kind(node, SyntaxKind::Dimensions)
            .iter()
            .map(|d| self.text(*d).matches('[').count())
            .sum::<usize>();
        let array_ty = wrap_dims(elem, sized.len() + extra);

        if let Some(init) = self.tree.child_by_field(node, "value") {
            return self.array_initializer(init, Some(&array_ty), pre);
        }
        let first = sized
            .first()
            .ok_or_else(|| MigrationError::structural("array_creation_expression", "dimensions"))?;
        let len_node = self.nth_named(*first, 0)?;
        let len = self.expr(len_node, pre)?;
        Ok(GoExpr::call_named(
            "make",
            vec![GoExpr::Raw(array_ty.to_string()), len],
        ))
    }

    fn array_initializer(
        &mut self,
        node: NodeId,
        hint: Option<&GoType>,
        pre: &mut Vec<GoStmt>,
    ) -> Result<GoExpr> {
        let ty = hint.cloned().unwrap_or_else(|| GoType::slice(GoType::Any));
        let elem_ty = match &ty {
            GoType::Slice(inner) => Some(inner.as_ref().clone()),
            _ => None,
        };
        let mut elements = Vec::new();
        for child in self.tree.named_children(node).collect::<Vec<_>>() {
            let value = self.expr_with_hint(child, elem_ty.as_ref(), pre)?;
            elements.push((None, value));
        }
        Ok(GoExpr::Composite { ty, elements })
    }

    fn field_access(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        let object = self.field(node, "object")?;
        let name = self.text(self.field(node, "field")?);
        let object_text = self.text(object);

        if matches!(self.tree.kind(object), SyntaxKind::This | SyntaxKind::Super) {
            if let Some(field) = self.own_field(name) {
                return self.read_field(&field);
            }
            return Ok(self.this_value()?.select(escape_identifier(name)));
        }

        let qualified = format!("{}.{}", object_text, name);
        if let Some((_, import, go)) = LIBRARY_CONSTANTS.iter().find(|(j, _, _)| *j == qualified) {
            self.import(import);
            return Ok(GoExpr::Raw(go.to_string()));
        }

        if self.tree.kind(object) == SyntaxKind::Identifier && self.names_type(object_text) {
            if let Some(constant) = self.ctx.enum_constant(&qualified) {
                return Ok(GoExpr::ident(constant));
            }
            if let Some((_, field)) = self.ctx.find_field(object_text, name) {
                return Ok(GoExpr::ident(field.target.clone()));
            }
        }

        let object_type = self.static_type(object);
        let receiver = self.expr(object, pre)?;
        if name == "length"
            && object_type.as_ref().map_or(true, |t| t.is_slice())
        {
            return Ok(GoExpr::len_of(receiver));
        }
        let field_name = object_type
            .as_ref()
            .and_then(|t| t.base_name())
            .and_then(|base| self.ctx.find_field(base, name))
            .map(|(_, f)| f.target.clone())
            .unwrap_or_else(|| escape_identifier(name));
        Ok(receiver.select(field_name))
    }

    /// Best-effort Go type of a Java expression
    pub(crate) fn static_type(&self, node: NodeId) -> Option<GoType> {
        let tree = self.tree;
        match tree.kind(node) {
            SyntaxKind::StringLiteral | SyntaxKind::TextBlock => Some(GoType::named("string")),
            SyntaxKind::DecimalIntegerLiteral
            | SyntaxKind::HexIntegerLiteral
            | SyntaxKind::OctalIntegerLiteral
            | SyntaxKind::BinaryIntegerLiteral => {
                let text = self.text(node);
                Some(GoType::named(if text.ends_with(['l', 'L']) { "int64" } else { "int32" }))
            }
            SyntaxKind::DecimalFloatingPointLiteral | SyntaxKind::HexFloatingPointLiteral => {
                let text = self.text(node);
                Some(GoType::named(if text.ends_with(['f', 'F']) { "float32" } else { "float64" }))
            }
            SyntaxKind::CharacterLiteral => Some(GoType::named("rune")),
            SyntaxKind::True | SyntaxKind::False | SyntaxKind::InstanceofExpression => {
                Some(GoType::named("bool"))
            }
            SyntaxKind::Identifier => {
                let name = self.text(node);
                if let Some(local) = self.scope.lookup(name) {
                    return local.ty.clone();
                }
                let owner = self.scope.owner.as_deref()?;
                let (decl, field) = self.ctx.find_field(owner, name)?;
                self.field_type(&decl.name, field)
            }
            SyntaxKind::FieldAccess => {
                let object = tree.child_by_field(node, "object")?;
                let name = tree.field_text(node, "field")?;
                let base = if matches!(tree.kind(object), SyntaxKind::This | SyntaxKind::Super) {
                    self.scope.owner.clone()?
                } else {
                    self.static_type(object)?.base_name()?.to_string()
                };
                let (decl, field) = self.ctx.find_field(&base, name)?;
                self.field_type(&decl.name, field)
            }
            SyntaxKind::ParenthesizedExpression => {
                tree.named_children(node).next().and_then(|n| self.static_type(n))
            }
            SyntaxKind::CastExpression => {
                let ty = tree.child_by_field(node, "type")?;
                self.map_type(ty).ok()
            }
            SyntaxKind::ObjectCreationExpression => {
                let ty = tree.child_by_field(node, "type")?;
                self.map_type(ty).ok()
            }
            SyntaxKind::ArrayAccess => match self.static_type(tree.child_by_field(node, "array")?)? {
                GoType::Slice(inner) => Some(*inner),
                _ => None,
            },
            SyntaxKind::BinaryExpression => {
                let op = tree.field_text(node, "operator")?;
                match op {
                    "==" | "!=" | "<" | "<=" | ">" | ">=" | "&&" | "||" => {
                        Some(GoType::named("bool"))
                    }
                    _ => {
                        let left = self.static_type(tree.child_by_field(node, "left")?);
                        let right = self.static_type(tree.child_by_field(node, "right")?);
                        if op == "+" && right.as_ref().map_or(false, GoType::is_string) {
                            return right;
                        }
                        left.or(right)
                    }
                }
            }
            SyntaxKind::MethodInvocation => self.call_result_type(node),
            SyntaxKind::This => {
                let owner = self.scope.owner.as_deref()?;
                Some(self.map_type_name(owner))
            }
            _ => None,
        }
    }

    /// Return type of a call to a method declared on the current type
    fn call_result_type(&self, node: NodeId) -> Option<GoType> {
        let tree = self.tree;
        let name = tree.field_text(node, "name")?;
        let argc = tree
            .child_by_field(node, "arguments")
            .map(|a| tree.named_children(a).count())
            .unwrap_or(0);
        let owner = match tree.child_by_field(node, "object") {
            None => self.scope.owner.clone()?,
            Some(obj) if tree.kind(obj) == SyntaxKind::This => self.scope.owner.clone()?,
            Some(obj) => {
                let ty = self.static_type(obj)?;
                if ty.is_string() && matches!(name, "length" | "indexOf") {
                    return Some(GoType::named("int32"));
                }
                if (ty.is_slice() || ty.is_map()) && name == "size" {
                    return Some(GoType::named("int32"));
                }
                ty.base_name()?.to_string()
            }
        };
        let (_, method) = self.ctx.find_method(&owner, name, argc)?;
        let sig = self.ctx.signatures.get(&method.node)?;
        let ret = sig.return_type?;
        self.ctx
            .type_mapper(&self.scope.types)
            .map_return(tree, Some(ret))
            .ok()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use crate::features::lowering::test_support::lower_method_body;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ternary_becomes_typed_iife() {
        let out = lower_method_body("class A { int f(boolean c) { return c ? 1 : 2; } }");
        assert_eq!(
            out,
            "return func() int32 {\n\tif c {\n\t\treturn 1\n\t}\n\treturn 2\n}()\n"
        );
    }

    #[test]
    fn test_fields_through_receiver_and_casts() {
        let out = lower_method_body(
            "class A { private int count; double f(long x) { count += 2; return (double) x; } }",
        );
        assert_eq!(out, "r.count += 2\nreturn float64(x)\n");
    }

    #[test]
    fn test_postfix_increment_in_expression_hoists_temp() {
        let out = lower_method_body("class A { void f(int[] a, int i) { a[i++] = 0; } }");
        assert_eq!(out, "tmp1 := i\ni++\na[tmp1] = 0\n");
    }

    #[test]
    fn test_instanceof_and_string_concat() {
        let out = lower_method_body(
            "class A { String f(Object o, int n) { if (o instanceof String) { return \"n=\" + n; } return \"\"; } }",
        );
        assert_eq!(
            out,
            "if func() bool {\n\t_, ok := o.(string)\n\treturn ok\n}() {\n\treturn \"n=\" + fmt.Sprint(n)\n}\nreturn \"\"\n"
        );
    }

    #[test]
    fn test_array_creation_and_length() {
        let out = lower_method_body(
            "class A { int f() { int[] xs = new int[] {1, 2}; int[] ys = new int[4]; return xs.length + ys.length; } }",
        );
        assert_eq!(
            out,
            "var xs []int32 = []int32{1, 2}\nvar ys []int32 = make([]int32, 4)\nreturn int32(len(xs)) + int32(len(ys))\n"
        );
    }
}

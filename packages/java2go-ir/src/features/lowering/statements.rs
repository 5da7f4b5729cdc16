//! Statement lowering

use super::scope::YieldTarget;
use super::Lowerer;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{GoExpr, GoStmt, GoType};
use crate::features::parsing::{NodeId, SyntaxKind};
use crate::features::signatures::{dims_of, simple_type_name};
use crate::features::type_mapping::{wrap_dims, BUILTIN_EXCEPTIONS};

impl<'t, 'c> Lowerer<'t, 'c> {
    /// Lower a block (or any statement container) in a fresh frame
    pub fn lower_block(&mut self, node: NodeId) -> Result<Vec<GoStmt>> {
        self.lower_block_skipping(node, &[])
    }

    /// Like `lower_block`, leaving out the given children
    pub fn lower_block_skipping(&mut self, node: NodeId, skip: &[NodeId]) -> Result<Vec<GoStmt>> {
        self.scope.push_frame();
        let mut out = Vec::new();
        let result = self.block_items(node, skip, &mut out);
        self.scope.pop_frame();
        result.map(|_| out)
    }

    fn block_items(&mut self, node: NodeId, skip: &[NodeId], out: &mut Vec<GoStmt>) -> Result<()> {
        let children: Vec<NodeId> = self.tree.children(node).to_vec();
        for child in children {
            if skip.contains(&child) || !self.tree.node(child).is_named {
                continue;
            }
            self.statement(child, out)?;
        }
        Ok(())
    }

    /// Body of a loop or branch; a braceless statement still gets a frame
    pub(crate) fn lower_body(&mut self, node: NodeId) -> Result<Vec<GoStmt>> {
        if self.tree.kind(node) == SyntaxKind::Block {
            return self.lower_block(node);
        }
        self.scope.push_frame();
        let mut out = Vec::new();
        let result = self.statement(node, &mut out);
        self.scope.pop_frame();
        result.map(|_| out)
    }

    pub(crate) fn statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        match self.tree.kind(node) {
            SyntaxKind::LineComment | SyntaxKind::BlockComment => {
                out.push(GoStmt::Comment(comment_text(self.text(node))));
            }
            SyntaxKind::Block => {
                let inner = self.lower_block(node)?;
                out.push(GoStmt::Block(inner));
            }
            SyntaxKind::LocalVariableDeclaration => self.local_declaration(node, out)?,
            SyntaxKind::ExpressionStatement => {
                let expr = self.nth_named(node, 0)?;
                self.expression_statement(expr, out)?;
            }
            SyntaxKind::IfStatement => {
                let stmt = self.if_chain(node, out)?;
                out.push(stmt);
            }
            SyntaxKind::WhileStatement => self.while_statement(node, out)?,
            SyntaxKind::ForStatement => self.for_statement(node, out)?,
            SyntaxKind::EnhancedForStatement => self.enhanced_for(node, out)?,
            SyntaxKind::DoStatement => self.do_statement(node, out)?,
            SyntaxKind::ReturnStatement => self.return_statement(node, out)?,
            SyntaxKind::BreakStatement => {
                let label = self.label_of(node);
                out.push(GoStmt::Break(label));
            }
            SyntaxKind::ContinueStatement => {
                let label = self.label_of(node);
                out.push(GoStmt::Continue(label));
            }
            SyntaxKind::ThrowStatement => self.throw_statement(node, out)?,
            SyntaxKind::YieldStatement => {
                let value = self.nth_named(node, 0)?;
                self.yield_value(value, out)?;
            }
            SyntaxKind::SwitchExpression => self.switch_statement(node, None, out)?,
            SyntaxKind::TryStatement | SyntaxKind::TryWithResourcesStatement => {
                self.try_statement(node, out)?
            }
            SyntaxKind::LabeledStatement => self.labeled_statement(node, out)?,
            SyntaxKind::AssertStatement => self.assert_statement(node, out)?,
            SyntaxKind::SynchronizedStatement => {
                let body = self.field(node, "body")?;
                out.push(GoStmt::Comment("synchronized".to_string()));
                out.push(GoStmt::Block(self.lower_block(body)?));
            }
            SyntaxKind::ClassDeclaration
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::EnumDeclaration
            | SyntaxKind::RecordDeclaration => {
                return Err(MigrationError::unhandled("local type declaration"));
            }
            SyntaxKind::ExplicitConstructorInvocation => {
                return Err(MigrationError::unhandled(
                    "constructor invocation outside a constructor prologue",
                ));
            }
            other => {
                return Err(MigrationError::unhandled(match other {
                    SyntaxKind::Other(raw) | SyntaxKind::Token(raw) => raw,
                    _ => self.tree.raw_kind(node),
                }))
            }
        }
        Ok(())
    }

    /// Lower an expression evaluated only for its effect
    pub(crate) fn expression_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let mut pre = Vec::new();
        let stmt = match self.tree.kind(node) {
            SyntaxKind::AssignmentExpression => self.assignment(node, &mut pre)?,
            SyntaxKind::UpdateExpression => self.update_stmt(node, &mut pre)?,
            SyntaxKind::MethodInvocation => match self.call_statement(node, &mut pre)? {
                Some(stmt) => stmt,
                None => GoStmt::Expr(self.call(node, &mut pre)?),
            },
            SyntaxKind::SwitchExpression => return self.switch_statement(node, None, out),
            SyntaxKind::ParenthesizedExpression => {
                let inner = self.nth_named(node, 0)?;
                return self.expression_statement(inner, out);
            }
            _ => {
                let value = self.expr(node, &mut pre)?;
                match value {
                    call @ GoExpr::Call { .. } => GoStmt::Expr(call),
                    other => GoStmt::assign(GoExpr::ident("_"), other),
                }
            }
        };
        out.extend(pre);
        out.push(stmt);
        Ok(())
    }

    fn local_declaration(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let type_node = self.field(node, "type")?;
        let inferred = self.text(type_node) == "var";
        let base = if inferred {
            None
        } else {
            Some(self.map_type(type_node)?)
        };

        for decl in self.tree.children_by_field(node, "declarator") {
            let name = self
                .tree
                .field_text(decl, "name")
                .ok_or_else(|| MigrationError::structural("variable_declarator", "name"))?;
            let ty = base.clone().map(|t| wrap_dims(t, dims_of(self.tree, decl)));

            match self.tree.child_by_field(decl, "value") {
                Some(value) if self.tree.kind(value) == SyntaxKind::SwitchExpression => {
                    let ty = ty.or_else(|| self.switch_result_type(value));
                    let go_name = self.scope.declare(name, ty.clone());
                    out.push(GoStmt::VarDecl {
                        name: go_name.clone(),
                        ty: Some(ty.unwrap_or(GoType::Any)),
                        value: None,
                    });
                    self.switch_statement(
                        value,
                        Some(YieldTarget::Assign(GoExpr::ident(go_name))),
                        out,
                    )?;
                }
                Some(value) => {
                    let mut pre = Vec::new();
                    let lowered = self.expr_with_hint(value, ty.as_ref(), &mut pre)?;
                    let local_type = ty.clone().or_else(|| self.static_type(value));
                    out.extend(pre);
                    let go_name = self.scope.declare(name, local_type);
                    if inferred {
                        out.push(GoStmt::define(go_name, lowered));
                    } else {
                        out.push(GoStmt::VarDecl {
                            name: go_name,
                            ty,
                            value: Some(lowered),
                        });
                    }
                }
                None => {
                    let go_name = self.scope.declare(name, ty.clone());
                    out.push(GoStmt::VarDecl {
                        name: go_name,
                        ty,
                        value: None,
                    });
                }
            }
        }
        Ok(())
    }

    /// Condition of `if`/`while`/`do`, without the Java parentheses
    pub(crate) fn condition(&mut self, node: NodeId, pre: &mut Vec<GoStmt>) -> Result<GoExpr> {
        if self.tree.kind(node) == SyntaxKind::ParenthesizedExpression {
            let inner = self.nth_named(node, 0)?;
            return self.expr(inner, pre);
        }
        self.expr(node, pre)
    }

    fn if_chain(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<GoStmt> {
        let mut pre = Vec::new();
        let cond = self.condition(self.field(node, "condition")?, &mut pre)?;
        out.extend(pre);
        let body = self.lower_body(self.field(node, "consequence")?)?;

        let otherwise = match self.tree.child_by_field(node, "alternative") {
            None => None,
            Some(alt) if self.tree.kind(alt) == SyntaxKind::IfStatement => {
                // hoisted statements of an else-if condition stay inside the else
                let mut alt_pre = Vec::new();
                let nested = self.if_chain(alt, &mut alt_pre)?;
                if alt_pre.is_empty() {
                    Some(Box::new(nested))
                } else {
                    alt_pre.push(nested);
                    Some(Box::new(GoStmt::Block(alt_pre)))
                }
            }
            Some(alt) => Some(Box::new(GoStmt::Block(self.lower_body(alt)?))),
        };

        Ok(GoStmt::If {
            init: None,
            cond,
            body,
            otherwise,
        })
    }

    fn while_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let mut pre = Vec::new();
        let cond = self.condition(self.field(node, "condition")?, &mut pre)?;
        let body = self.lower_body(self.field(node, "body")?)?;

        if pre.is_empty() {
            let cond = if matches!(&cond, GoExpr::Lit(t) if t == "true") {
                None
            } else {
                Some(cond)
            };
            out.push(GoStmt::For {
                init: None,
                cond,
                post: None,
                body,
            });
            return Ok(());
        }

        let mut looped = pre;
        looped.push(break_unless(cond));
        looped.extend(body);
        out.push(GoStmt::For {
            init: None,
            cond: None,
            post: None,
            body: looped,
        });
        Ok(())
    }

    fn do_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let mut body = self.lower_body(self.field(node, "body")?)?;
        let mut pre = Vec::new();
        let cond = self.condition(self.field(node, "condition")?, &mut pre)?;
        body.extend(pre);
        body.push(break_unless(cond));
        out.push(GoStmt::For {
            init: None,
            cond: None,
            post: None,
            body,
        });
        Ok(())
    }

    fn for_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        self.scope.push_frame();
        let result = self.for_parts(node);
        self.scope.pop_frame();
        out.push(result?);
        Ok(())
    }

    fn for_parts(&mut self, node: NodeId) -> Result<GoStmt> {
        let mut inits = Vec::new();
        for init in self.tree.children_by_field(node, "init") {
            if self.tree.kind(init) == SyntaxKind::LocalVariableDeclaration {
                let mut decls = Vec::new();
                self.local_declaration(init, &mut decls)?;
                inits.extend(decls.into_iter().map(short_declaration));
            } else {
                self.expression_statement(init, &mut inits)?;
            }
        }

        let mut cond_pre = Vec::new();
        let cond = match self.tree.child_by_field(node, "condition") {
            Some(c) => Some(self.condition(c, &mut cond_pre)?),
            None => None,
        };

        let updates = self.tree.children_by_field(node, "update");
        let post = match updates.as_slice() {
            [] => None,
            [single] => {
                let mut stmts = Vec::new();
                self.expression_statement(*single, &mut stmts)?;
                match stmts.as_slice() {
                    [only] => Some(Box::new(only.clone())),
                    _ => return Err(MigrationError::unhandled("for update with side effects")),
                }
            }
            many => {
                let mut targets = Vec::new();
                let mut values = Vec::new();
                for update in many {
                    let mut stmts = Vec::new();
                    self.expression_statement(*update, &mut stmts)?;
                    let [stmt] = stmts.as_slice() else {
                        return Err(MigrationError::unhandled("for update with side effects"));
                    };
                    let (target, value) = parallel_part(stmt)
                        .ok_or_else(|| MigrationError::unhandled("for update list"))?;
                    targets.push(target);
                    values.push(value);
                }
                Some(Box::new(GoStmt::Assign {
                    targets,
                    op: "=".to_string(),
                    values,
                }))
            }
        };

        let mut body = self.lower_body(self.field(node, "body")?)?;
        let cond = if cond_pre.is_empty() {
            cond
        } else {
            let mut guarded = cond_pre;
            if let Some(c) = cond {
                guarded.push(break_unless(c));
            }
            guarded.extend(body);
            body = guarded;
            None
        };

        let single_init = inits.len() == 1
            && matches!(
                inits[0],
                GoStmt::Define { .. } | GoStmt::Assign { .. } | GoStmt::IncDec { .. }
            );
        if single_init || inits.is_empty() {
            return Ok(GoStmt::For {
                init: inits.pop().map(Box::new),
                cond,
                post,
                body,
            });
        }
        inits.push(GoStmt::For {
            init: None,
            cond,
            post,
            body,
        });
        Ok(GoStmt::Block(inits))
    }

    fn enhanced_for(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let name = self
            .tree
            .field_text(node, "name")
            .ok_or_else(|| MigrationError::structural("enhanced_for_statement", "name"))?;
        let type_node = self.field(node, "type")?;
        let value = self.field(node, "value")?;
        let body_node = self.field(node, "body")?;

        // map.keySet() / map.values()
        let mut map_view = None;
        if self.tree.kind(value) == SyntaxKind::MethodInvocation {
            if let (Some(object), Some(method)) = (
                self.tree.child_by_field(value, "object"),
                self.tree.field_text(value, "name"),
            ) {
                if let Some(GoType::Map(key, val)) = self.static_type(object) {
                    map_view = match method {
                        "keySet" => Some((object, true, *key)),
                        "values" => Some((object, false, *val)),
                        "entrySet" => {
                            return Err(MigrationError::unhandled("iteration over entrySet"))
                        }
                        _ => None,
                    };
                }
            }
        }

        let mut pre = Vec::new();
        let (iterable, keyed, elem) = match map_view {
            Some((object, keyed, elem)) => (self.expr(object, &mut pre)?, keyed, Some(elem)),
            None => {
                let elem = match self.static_type(value) {
                    Some(GoType::Slice(inner)) => Some(*inner),
                    _ => None,
                };
                (self.expr(value, &mut pre)?, false, elem)
            }
        };
        let declared = if self.text(type_node) == "var" {
            elem
        } else {
            self.map_type(type_node).ok().or(elem)
        };
        out.extend(pre);

        self.scope.push_frame();
        let go_name = self.scope.declare(name, declared);
        let body = self.lower_body(body_node);
        self.scope.pop_frame();

        let (key, value) = if keyed {
            (Some(go_name), None)
        } else {
            (None, Some(go_name))
        };
        out.push(GoStmt::Range {
            key,
            value,
            iterable,
            body: body?,
        });
        Ok(())
    }

    /// `return` statements in the current body's return shape
    pub(crate) fn return_with(&self, value: Option<GoExpr>) -> Vec<GoStmt> {
        let shape = &self.scope.returns;
        if let Some(escape) = &shape.escape {
            let mut targets = vec![GoExpr::ident(escape.done.clone())];
            let mut values = vec![GoExpr::lit("true")];
            if let (Some(slot), Some(v)) = (&escape.value, value) {
                targets.push(GoExpr::ident(slot.clone()));
                values.push(v);
            }
            return vec![
                GoStmt::Assign {
                    targets,
                    op: "=".to_string(),
                    values,
                },
                GoStmt::Return(Vec::new()),
            ];
        }
        if let Some(receiver) = &shape.constructor {
            return vec![GoStmt::Return(vec![GoExpr::ident(receiver.clone())])];
        }
        let mut values: Vec<GoExpr> = value.into_iter().collect();
        if shape.throws {
            values.push(GoExpr::nil());
        }
        vec![GoStmt::Return(values)]
    }

    fn return_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let Some(value) = self.tree.named_children(node).next() else {
            out.extend(self.return_with(None));
            return Ok(());
        };
        if self.tree.kind(value) == SyntaxKind::SwitchExpression {
            return self.switch_statement(value, Some(YieldTarget::Return), out);
        }
        let hint = self.scope.returns.result.clone();
        let mut pre = Vec::new();
        let lowered = self.expr_with_hint(value, hint.as_ref(), &mut pre)?;
        out.extend(pre);
        out.extend(self.return_with(Some(lowered)));
        Ok(())
    }

    /// Deliver a switch-expression arm value to the active yield target
    pub(crate) fn yield_value(&mut self, value: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let target = self
            .scope
            .yield_target
            .clone()
            .ok_or_else(|| MigrationError::unhandled("yield outside a switch expression"))?;
        let mut pre = Vec::new();
        match target {
            YieldTarget::Return => {
                let hint = self.scope.returns.result.clone();
                let lowered = self.expr_with_hint(value, hint.as_ref(), &mut pre)?;
                out.extend(pre);
                out.extend(self.return_with(Some(lowered)));
            }
            YieldTarget::Assign(target) => {
                let lowered = self.expr(value, &mut pre)?;
                out.extend(pre);
                out.push(GoStmt::assign(target, lowered));
            }
        }
        Ok(())
    }

    fn throw_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let value = self.nth_named(node, 0)?;
        let mut pre = Vec::new();

        if self.tree.kind(value) == SyntaxKind::ObjectCreationExpression {
            let type_name = simple_type_name(self.tree, self.field(value, "type")?);
            if BUILTIN_EXCEPTIONS.contains(&type_name.as_str()) {
                let mut args = Vec::new();
                if let Some(list) = self.tree.child_by_field(value, "arguments") {
                    for arg in self.tree.named_children(list).collect::<Vec<_>>() {
                        args.push(self.expr(arg, &mut pre)?);
                    }
                }
                let payload = match args.len() {
                    0 => GoExpr::lit(format!("\"{}\"", type_name)),
                    1 => args.remove(0),
                    _ => {
                        self.import("fmt");
                        GoExpr::call(GoExpr::ident("fmt").select("Sprint"), args)
                    }
                };
                out.extend(pre);
                out.push(GoStmt::panic(payload));
                return Ok(());
            }
        }

        let thrown = self.expr(value, &mut pre)?;
        out.extend(pre);
        out.push(GoStmt::panic(thrown));
        Ok(())
    }

    fn label_of(&self, node: NodeId) -> Option<String> {
        self.tree
            .named_children(node)
            .find(|c| self.tree.kind(*c) == SyntaxKind::Identifier)
            .map(|c| self.text(c).to_string())
    }

    fn labeled_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let label = self
            .label_of(node)
            .ok_or_else(|| MigrationError::structural("labeled_statement", "label"))?;
        let inner = self
            .tree
            .named_children(node)
            .find(|c| self.tree.kind(*c) != SyntaxKind::Identifier)
            .ok_or_else(|| MigrationError::structural("labeled_statement", "statement"))?;
        let mut stmts = Vec::new();
        self.statement(inner, &mut stmts)?;
        attach_label(label, &mut stmts);
        out.extend(stmts);
        Ok(())
    }

    fn assert_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let mut parts = self.tree.named_children(node);
        let cond_node = parts
            .next()
            .ok_or_else(|| MigrationError::structural("assert_statement", "condition"))?;
        let message_node = parts.next();

        let mut pre = Vec::new();
        let cond = self.expr(cond_node, &mut pre)?;
        let message = match message_node {
            Some(m) => self.expr(m, &mut pre)?,
            None => GoExpr::lit("\"assertion failed\""),
        };
        out.extend(pre);
        out.push(GoStmt::If {
            init: None,
            cond: GoExpr::unary("!", GoExpr::Paren(Box::new(cond))),
            body: vec![GoStmt::panic(message)],
            otherwise: None,
        });
        Ok(())
    }
}

/// `if !cond { break }`
pub(crate) fn break_unless(cond: GoExpr) -> GoStmt {
    GoStmt::If {
        init: None,
        cond: GoExpr::unary("!", cond),
        body: vec![GoStmt::Break(None)],
        otherwise: None,
    }
}

/// `var i int32 = 0` in a for header becomes `i := int32(0)`
fn short_declaration(stmt: GoStmt) -> GoStmt {
    match stmt {
        GoStmt::VarDecl {
            name,
            ty: Some(ty),
            value: Some(value),
        } => {
            let value = match value {
                lit @ GoExpr::Lit(_) if ty.is_basic() && !ty.is_string() => {
                    GoExpr::call_named(ty.to_string(), vec![lit])
                }
                other => other,
            };
            GoStmt::define(name, value)
        }
        other => other,
    }
}

/// One element of a parallel assignment built from a for-update list
fn parallel_part(stmt: &GoStmt) -> Option<(GoExpr, GoExpr)> {
    match stmt {
        GoStmt::IncDec { target, op } => {
            let arith = if op == "++" { "+" } else { "-" };
            Some((
                target.clone(),
                GoExpr::binary(arith, target.clone(), GoExpr::lit("1")),
            ))
        }
        GoStmt::Assign {
            targets,
            op,
            values,
        } if targets.len() == 1 && values.len() == 1 => {
            let target = targets[0].clone();
            let value = values[0].clone();
            match op.strip_suffix('=') {
                Some("") => Some((target, value)),
                Some(arith) => Some((target.clone(), GoExpr::binary(arith, target, value))),
                None => None,
            }
        }
        _ => None,
    }
}

fn attach_label(label: String, stmts: &mut Vec<GoStmt>) {
    let Some(last) = stmts.pop() else {
        return;
    };
    let labeled = match last {
        GoStmt::Block(mut inner) => {
            attach_label(label, &mut inner);
            GoStmt::Block(inner)
        }
        other => GoStmt::Labeled {
            label,
            body: Box::new(other),
        },
    };
    stmts.push(labeled);
}

fn comment_text(raw: &str) -> String {
    if let Some(line) = raw.strip_prefix("//") {
        return line.trim().to_string();
    }
    let inner = raw
        .trim_start_matches("/*")
        .trim_start_matches('*')
        .trim_end_matches("*/");
    inner
        .lines()
        .map(|l| l.trim().trim_start_matches('*').trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::comment_text;
    use crate::features::lowering::test_support::lower_method_body;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_comment_text() {
        assert_eq!(comment_text("// hello "), "hello");
        assert_eq!(comment_text("/** one\n * two\n */"), "one\ntwo");
    }

    #[test]
    fn test_counting_loop_and_else_if() {
        let out = lower_method_body(
            "class A { int f(int n) { int s = 0; for (int i = 0; i < n; i++) { if (i % 2 == 0) { s += i; } else if (i > 5) { break; } else { continue; } } return s; } }",
        );
        assert_eq!(
            out,
            "var s int32 = 0\n\
             for i := int32(0); i < n; i++ {\n\
             \tif i % 2 == 0 {\n\
             \t\ts += i\n\
             \t} else if i > 5 {\n\
             \t\tbreak\n\
             \t} else {\n\
             \t\tcontinue\n\
             \t}\n\
             }\n\
             return s\n"
        );
    }

    #[test]
    fn test_enhanced_for_and_while() {
        let out = lower_method_body(
            "class A { void f(List<String> names, int n) { for (String name : names) { System.out.println(name); } while (n > 0) { n--; } } }",
        );
        assert_eq!(
            out,
            "for _, name := range names {\n\tfmt.Println(name)\n}\nfor n > 0 {\n\tn--\n}\n"
        );
    }

    #[test]
    fn test_do_while_and_labels() {
        let out = lower_method_body(
            "class A { void f(int n) { do { n--; } while (n > 0); outer: while (true) { break outer; } } }",
        );
        assert_eq!(
            out,
            "for {\n\tn--\n\tif !(n > 0) {\n\t\tbreak\n\t}\n}\nouter:\nfor {\n\tbreak outer\n}\n"
        );
    }

    #[test]
    fn test_throw_builtin_and_assert() {
        let out = lower_method_body(
            "class A { void f(int n) { assert n > 0 : \"positive\"; if (n > 10) throw new IllegalArgumentException(\"too big\"); } }",
        );
        assert_eq!(
            out,
            "if !(n > 0) {\n\tpanic(\"positive\")\n}\nif n > 10 {\n\tpanic(\"too big\")\n}\n"
        );
    }
}

//! Switch and try/catch/finally lowering

use super::scope::{ReturnEscape, ReturnShape, YieldTarget};
use super::Lowerer;
use crate::errors::{MigrationError, Result};
use crate::features::go_ir::{GoExpr, GoStmt, GoType, SwitchCase};
use crate::features::parsing::{NodeId, SyntaxKind};
use crate::features::signatures::simple_type_name;
use crate::features::type_mapping::BUILTIN_EXCEPTIONS;

/// Catch parameter types that match any recovered value
const CATCH_ALL: &[&str] = &["Exception", "Throwable", "RuntimeException", "Error"];

impl<'t, 'c> Lowerer<'t, 'c> {
    /// Lower a switch; `target` is set when the switch produces a value
    pub(crate) fn switch_statement(
        &mut self,
        node: NodeId,
        target: Option<YieldTarget>,
        out: &mut Vec<GoStmt>,
    ) -> Result<()> {
        let mut pre = Vec::new();
        let tag = self.condition(self.field(node, "condition")?, &mut pre)?;
        out.extend(pre);
        let body = self.field(node, "body")?;

        let saved = self.scope.yield_target.clone();
        if target.is_some() {
            self.scope.yield_target = target.clone();
        }
        let cases = self.switch_cases(body, target.is_some());
        self.scope.yield_target = saved;
        let mut cases = cases?;

        let has_default = cases.iter().any(|c| c.values.is_empty());
        if target == Some(YieldTarget::Return) && !has_default {
            cases.push(SwitchCase {
                values: Vec::new(),
                body: vec![GoStmt::panic(GoExpr::lit("\"unreachable\""))],
                fallthrough: false,
            });
        }
        out.push(GoStmt::Switch {
            tag: Some(tag),
            cases,
        });
        Ok(())
    }

    fn switch_cases(&mut self, body: NodeId, produces_value: bool) -> Result<Vec<SwitchCase>> {
        let groups: Vec<NodeId> = self
            .tree
            .named_children(body)
            .filter(|c| {
                matches!(
                    self.tree.kind(*c),
                    SyntaxKind::SwitchBlockStatementGroup | SyntaxKind::SwitchRule
                )
            })
            .collect();

        let mut cases = Vec::new();
        for (i, group) in groups.iter().enumerate() {
            let is_last = i + 1 == groups.len();
            let mut values = Vec::new();
            let mut is_default = false;
            for label in self.tree.children_of_kind(*group, SyntaxKind::SwitchLabel) {
                if self.tree.has_token(label, "default") {
                    is_default = true;
                }
                for value in self.tree.named_children(label).collect::<Vec<_>>() {
                    values.push(self.case_value(value)?);
                }
            }
            if is_default {
                values.clear();
            }

            self.scope.push_frame();
            let lowered = if self.tree.kind(*group) == SyntaxKind::SwitchRule {
                self.rule_body(*group, produces_value)
            } else {
                self.group_body(*group)
            };
            self.scope.pop_frame();
            let mut body = lowered?;

            let mut fallthrough = false;
            if self.tree.kind(*group) == SyntaxKind::SwitchBlockStatementGroup {
                if matches!(body.last(), Some(GoStmt::Break(None))) {
                    body.pop();
                } else {
                    let terminal = body.last().map_or(false, GoStmt::is_terminal);
                    fallthrough = !terminal && !is_last;
                }
            }
            cases.push(SwitchCase {
                values,
                body,
                fallthrough,
            });
        }
        Ok(cases)
    }

    /// Case label value; bare enum constants resolve through the constant table
    fn case_value(&mut self, value: NodeId) -> Result<GoExpr> {
        match self.tree.kind(value) {
            SyntaxKind::Identifier => {
                let name = self.text(value);
                if self.scope.lookup(name).is_none() {
                    if let Some(constant) = self.ctx.enum_constant(name) {
                        return Ok(GoExpr::ident(constant));
                    }
                }
                self.expr(value, &mut Vec::new())
            }
            SyntaxKind::Other(raw) if raw.ends_with("pattern") => {
                Err(MigrationError::unhandled("pattern case label"))
            }
            _ => {
                let mut pre = Vec::new();
                let lowered = self.expr(value, &mut pre)?;
                if !pre.is_empty() {
                    return Err(MigrationError::unhandled("case label with side effects"));
                }
                Ok(lowered)
            }
        }
    }

    fn group_body(&mut self, group: NodeId) -> Result<Vec<GoStmt>> {
        let mut body = Vec::new();
        let statements: Vec<NodeId> = self
            .tree
            .children(group)
            .iter()
            .copied()
            .filter(|c| {
                self.tree.node(*c).is_named && self.tree.kind(*c) != SyntaxKind::SwitchLabel
            })
            .collect();
        for stmt in statements {
            self.statement(stmt, &mut body)?;
        }
        Ok(body)
    }

    /// `case X -> ...`; an expression arm yields its value in a switch expression
    fn rule_body(&mut self, rule: NodeId, produces_value: bool) -> Result<Vec<GoStmt>> {
        let arm = self
            .tree
            .named_children(rule)
            .find(|c| self.tree.kind(*c) != SyntaxKind::SwitchLabel)
            .ok_or_else(|| MigrationError::structural("switch_rule", "body"))?;
        let mut body = Vec::new();
        match self.tree.kind(arm) {
            SyntaxKind::ExpressionStatement if produces_value => {
                let value = self.nth_named(arm, 0)?;
                self.yield_value(value, &mut body)?;
            }
            SyntaxKind::Block => body = self.lower_block(arm)?,
            _ => self.statement(arm, &mut body)?,
        }
        Ok(body)
    }

    /// Switch expression in value position: a typed immediately-invoked func
    pub(crate) fn switch_value(&mut self, node: NodeId, hint: Option<&GoType>) -> Result<GoExpr> {
        let ty = hint
            .cloned()
            .or_else(|| self.switch_result_type(node))
            .unwrap_or(GoType::Any);
        let saved = std::mem::replace(
            &mut self.scope.returns,
            ReturnShape::plain(true).with_result(Some(ty.clone())),
        );
        let mut body = Vec::new();
        let lowered = self.switch_statement(node, Some(YieldTarget::Return), &mut body);
        self.scope.returns = saved;
        lowered?;
        Ok(GoExpr::iife(vec![ty], body))
    }

    /// Type of the first arm whose value type can be guessed
    pub(crate) fn switch_result_type(&self, node: NodeId) -> Option<GoType> {
        let body = self.tree.child_by_field(node, "body")?;
        self.tree
            .named_children(body)
            .filter(|c| self.tree.kind(*c) == SyntaxKind::SwitchRule)
            .filter_map(|rule| {
                self.tree
                    .named_children(rule)
                    .find(|c| self.tree.kind(*c) == SyntaxKind::ExpressionStatement)
            })
            .filter_map(|arm| self.tree.named_children(arm).next())
            .find_map(|value| self.static_type(value))
    }

    /// try/catch/finally as a closure: `finally` and the catch chain are
    /// deferred, resources are closed by their own defers
    pub(crate) fn try_statement(&mut self, node: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        self.check_jumps_stay_inside(node)?;

        let escapes = self.returns_inside(node);
        let outer_returns = self.scope.returns.clone();
        let escape = if escapes {
            let done = self.ctx.fresh_name("returned");
            out.push(GoStmt::VarDecl {
                name: done.clone(),
                ty: Some(GoType::named("bool")),
                value: None,
            });
            let value = if outer_returns.has_value && outer_returns.constructor.is_none() {
                let slot = self.ctx.fresh_name("result");
                out.push(GoStmt::VarDecl {
                    name: slot.clone(),
                    ty: Some(outer_returns.result.clone().unwrap_or(GoType::Any)),
                    value: None,
                });
                Some(slot)
            } else {
                None
            };
            Some(ReturnEscape { done, value })
        } else {
            None
        };

        let mut inner_returns = outer_returns.clone();
        inner_returns.escape = escape.clone();
        let saved_yield = self.scope.yield_target.take();
        self.scope.returns = inner_returns;
        self.scope.push_frame();
        let closure = self.try_closure(node);
        self.scope.pop_frame();
        self.scope.returns = outer_returns;
        self.scope.yield_target = saved_yield;

        out.push(GoStmt::Expr(GoExpr::iife(Vec::new(), closure?)));

        if let Some(escape) = escape {
            let value = escape.value.map(GoExpr::ident);
            out.push(GoStmt::If {
                init: None,
                cond: GoExpr::ident(escape.done),
                body: self.return_with(value),
                otherwise: None,
            });
        }
        // Go requires a terminating statement even when every path returned
        if self.scope.returns.has_value && self.try_always_exits(node) {
            out.push(GoStmt::panic(GoExpr::lit("\"unreachable\"")));
        }
        Ok(())
    }

    /// The try block and every catch block end in a return or throw
    fn try_always_exits(&self, node: NodeId) -> bool {
        let Some(body) = self.tree.child_by_field(node, "body") else {
            return false;
        };
        self.block_always_exits(body)
            && self
                .tree
                .children_of_kind(node, SyntaxKind::CatchClause)
                .into_iter()
                .all(|clause| {
                    self.tree
                        .child_by_field(clause, "body")
                        .map_or(false, |block| self.block_always_exits(block))
                })
    }

    fn block_always_exits(&self, block: NodeId) -> bool {
        self.tree
            .named_children(block)
            .filter(|n| !self.tree.kind(*n).is_comment())
            .last()
            .map_or(false, |last| {
                matches!(
                    self.tree.kind(last),
                    SyntaxKind::ReturnStatement | SyntaxKind::ThrowStatement
                )
            })
    }

    fn try_closure(&mut self, node: NodeId) -> Result<Vec<GoStmt>> {
        let mut closure = Vec::new();

        if let Some(finally) = self.tree.child_of_kind(node, SyntaxKind::FinallyClause) {
            let block = self.nth_named(finally, 0)?;
            let body = self.lower_block(block)?;
            closure.push(GoStmt::Defer(GoExpr::iife(Vec::new(), body)));
        }

        let catches = self.tree.children_of_kind(node, SyntaxKind::CatchClause);
        if !catches.is_empty() {
            let chain = self.catch_chain(&catches)?;
            closure.push(GoStmt::Defer(GoExpr::iife(
                Vec::new(),
                vec![GoStmt::If {
                    init: Some(Box::new(GoStmt::define(
                        "recovered",
                        GoExpr::call_named("recover", Vec::new()),
                    ))),
                    cond: GoExpr::binary("!=", GoExpr::ident("recovered"), GoExpr::nil()),
                    body: chain,
                    otherwise: None,
                }],
            )));
        }

        if let Some(spec) = self.tree.child_by_field(node, "resources") {
            for resource in self.tree.named_children(spec).collect::<Vec<_>>() {
                self.resource(resource, &mut closure)?;
            }
        }

        let body = self.field(node, "body")?;
        closure.extend(self.lower_block(body)?);
        Ok(closure)
    }

    fn resource(&mut self, resource: NodeId, out: &mut Vec<GoStmt>) -> Result<()> {
        let handle = match (
            self.tree.field_text(resource, "name"),
            self.tree.child_by_field(resource, "value"),
        ) {
            (Some(name), Some(value)) => {
                let mut pre = Vec::new();
                let lowered = self.expr(value, &mut pre)?;
                let ty = match self.tree.child_by_field(resource, "type") {
                    Some(t) if self.text(t) != "var" => self.map_type(t).ok(),
                    _ => self.static_type(value),
                };
                out.extend(pre);
                let go_name = self.scope.declare(name, ty);
                out.push(GoStmt::define(go_name.clone(), lowered));
                GoExpr::ident(go_name)
            }
            _ => {
                // `try (existing)`: an effectively final variable
                let inner = self.tree.named_children(resource).next().unwrap_or(resource);
                let mut pre = Vec::new();
                let lowered = self.expr(inner, &mut pre)?;
                out.extend(pre);
                lowered
            }
        };
        out.push(GoStmt::Defer(handle.method("Close", Vec::new())));
        Ok(())
    }

    /// One branch per catch type, in declaration order, re-panicking when
    /// nothing matches
    fn catch_chain(&mut self, catches: &[NodeId]) -> Result<Vec<GoStmt>> {
        enum Branch {
            Typed(GoType, String, Vec<GoStmt>),
            Any(String, Vec<GoStmt>),
        }

        let mut branches = Vec::new();
        // recovered values of built-in exceptions carry no Go type, so
        // nothing after an untyped branch could ever be selected
        let mut untyped: Option<String> = None;
        for clause in catches {
            let param = self
                .tree
                .child_of_kind(*clause, SyntaxKind::CatchFormalParameter)
                .ok_or_else(|| MigrationError::structural("catch_clause", "parameter"))?;
            let name = self
                .tree
                .field_text(param, "name")
                .ok_or_else(|| MigrationError::structural("catch_formal_parameter", "name"))?;
            let types: Vec<NodeId> = self
                .tree
                .child_of_kind(param, SyntaxKind::CatchType)
                .map(|t| self.tree.named_children(t).collect())
                .unwrap_or_default();
            let block = self.field(*clause, "body")?;

            for type_node in types {
                let simple = simple_type_name(self.tree, type_node);
                if let Some(earlier) = &untyped {
                    return Err(MigrationError::unhandled(format!(
                        "catch of {} after catch of {}",
                        simple, earlier
                    )));
                }
                let catch_all = CATCH_ALL.contains(&simple.as_str())
                    || (BUILTIN_EXCEPTIONS.contains(&simple.as_str())
                        && self.ctx.type_info(&simple).is_none());
                let ty = if catch_all {
                    GoType::Any
                } else {
                    self.map_type_name(&simple)
                };

                self.scope.push_frame();
                let go_name = self.scope.declare(name, Some(ty.clone()));
                let body = self.lower_block(block);
                self.scope.pop_frame();
                let mut body = body?;
                body.insert(0, GoStmt::assign(GoExpr::ident("_"), GoExpr::ident(go_name.clone())));

                if catch_all {
                    branches.push(Branch::Any(go_name, body));
                    untyped = Some(simple);
                    continue;
                }
                branches.push(Branch::Typed(ty, go_name, body));
            }
        }

        let mut tail = match branches.last() {
            Some(Branch::Any(..)) => None,
            _ => Some(vec![GoStmt::panic(GoExpr::ident("recovered"))]),
        };
        for branch in branches.into_iter().rev() {
            tail = Some(match branch {
                Branch::Any(name, body) => {
                    let mut block = vec![GoStmt::define(name, GoExpr::ident("recovered"))];
                    block.extend(body);
                    block
                }
                Branch::Typed(ty, name, body) => vec![GoStmt::If {
                    init: Some(Box::new(GoStmt::Define {
                        names: vec![name, "ok".to_string()],
                        values: vec![GoExpr::TypeAssert {
                            target: Box::new(GoExpr::ident("recovered")),
                            ty,
                        }],
                    })),
                    cond: GoExpr::ident("ok"),
                    body,
                    otherwise: tail.map(|t| Box::new(else_branch(t))),
                }],
            });
        }
        Ok(tail.unwrap_or_default())
    }

    /// True if a `return` in this try statement belongs to the enclosing body
    fn returns_inside(&self, node: NodeId) -> bool {
        self.tree
            .descendants_where(node, |n| n.kind == SyntaxKind::ReturnStatement)
            .into_iter()
            .any(|r| !self.crosses(r, node, &[SyntaxKind::LambdaExpression, SyntaxKind::ClassBody]))
    }

    /// `break`/`continue` may not leave the try closure
    fn check_jumps_stay_inside(&self, node: NodeId) -> Result<()> {
        let loops = [
            SyntaxKind::WhileStatement,
            SyntaxKind::ForStatement,
            SyntaxKind::EnhancedForStatement,
            SyntaxKind::DoStatement,
            SyntaxKind::LambdaExpression,
            SyntaxKind::ClassBody,
        ];
        for jump in self.tree.descendants_where(node, |n| {
            matches!(n.kind, SyntaxKind::BreakStatement | SyntaxKind::ContinueStatement)
        }) {
            let labeled = self.tree.named_children(jump).next().is_some();
            let mut stops = loops.to_vec();
            if self.tree.kind(jump) == SyntaxKind::BreakStatement && !labeled {
                stops.push(SyntaxKind::SwitchBlock);
            }
            if labeled || !self.crosses(jump, node, &stops) {
                return Err(MigrationError::unhandled("jump out of a try block"));
            }
        }
        Ok(())
    }

    /// True if a node of one of `kinds` lies between `from` and `until`
    fn crosses(&self, from: NodeId, until: NodeId, kinds: &[SyntaxKind]) -> bool {
        let mut current = self.tree.parent(from);
        while let Some(id) = current {
            if id == until {
                return false;
            }
            if kinds.contains(&self.tree.kind(id)) {
                return true;
            }
            current = self.tree.parent(id);
        }
        false
    }
}

fn else_branch(mut stmts: Vec<GoStmt>) -> GoStmt {
    if stmts.len() == 1 && matches!(stmts[0], GoStmt::If { .. }) {
        return stmts.remove(0);
    }
    GoStmt::Block(stmts)
}

#[cfg(test)]
mod tests {
    use crate::features::lowering::test_support::{lower_method_body, try_lower_method_body};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_switch_statement_strips_break_and_falls_through() {
        let out = lower_method_body(
            "class A { void f(int n) { switch (n) { case 1: System.out.println(1); break; case 2: n++; default: n--; } } }",
        );
        assert_eq!(
            out,
            "switch n {\n\
             case 1:\n\
             \tfmt.Println(1)\n\
             case 2:\n\
             \tn++\n\
             \tfallthrough\n\
             default:\n\
             \tn--\n\
             }\n"
        );
    }

    #[test]
    fn test_return_switch_is_flattened() {
        let out = lower_method_body(
            "class A { String f(int n) { return switch (n) { case 1 -> \"one\"; default -> \"many\"; }; } }",
        );
        assert_eq!(
            out,
            "switch n {\ncase 1:\n\treturn \"one\"\ndefault:\n\treturn \"many\"\n}\n"
        );
    }

    #[test]
    fn test_switch_expression_initializer_assigns() {
        let out = lower_method_body(
            "class A { void f(int n) { int x = switch (n) { case 1 -> 10; default -> { yield 20; } }; } }",
        );
        assert_eq!(
            out,
            "var x int32\nswitch n {\ncase 1:\n\tx = 10\ndefault:\n\tx = 20\n}\n"
        );
    }

    #[test]
    fn test_try_catch_finally_closure() {
        let out = lower_method_body(
            "class A { void f() { try { work(); } catch (IllegalStateException e) { System.out.println(e); } finally { done(); } } static void work() {} static void done() {} }",
        );
        assert_eq!(
            out,
            "func() {\n\
             \tdefer func() {\n\
             \t\tdone()\n\
             \t}()\n\
             \tdefer func() {\n\
             \t\tif recovered := recover(); recovered != nil {\n\
             \t\t\te := recovered\n\
             \t\t\t_ = e\n\
             \t\t\tfmt.Println(e)\n\
             \t\t}\n\
             \t}()\n\
             \twork()\n\
             }()\n"
        );
    }

    #[test]
    fn test_return_inside_try_escapes_through_flag() {
        let out = lower_method_body(
            "class A { void f() { try { return; } finally { done(); } } static void done() {} }",
        );
        assert_eq!(
            out,
            "var returned1 bool\n\
             func() {\n\
             \tdefer func() {\n\
             \t\tdone()\n\
             \t}()\n\
             \treturned1 = true\n\
             \treturn\n\
             }()\n\
             if returned1 {\n\
             \treturn\n\
             }\n"
        );
    }

    #[test]
    fn test_every_catch_clause_gets_a_branch() {
        let out = lower_method_body(
            "class A { int f() { try { return risky(); } catch (Bad e) { return 2; } catch (Exception e) { return 3; } } static int risky() { return 1; } } class Bad extends RuntimeException {}",
        );
        assert!(out.contains("ok := recovered.("), "{}", out);
        assert!(out.contains("= true, 2\n"), "{}", out);
        assert!(out.contains("} else {"), "{}", out);
        assert!(out.contains("= true, 3\n"), "{}", out);
        assert!(!out.contains("panic(recovered)"), "{}", out);
    }

    #[test]
    fn test_catch_after_untyped_builtin_is_unhandled() {
        let err = try_lower_method_body(
            "class A { int f() { try { return 1; } catch (IllegalStateException e) { return 2; } catch (RuntimeException e) { return 3; } } }",
        )
        .unwrap_err();
        assert_eq!(err.category(), "unhandled");
        assert!(err.to_string().contains("RuntimeException"), "{}", err);
        assert!(err.to_string().contains("IllegalStateException"), "{}", err);
    }

    #[test]
    fn test_terminal_try_ends_with_a_terminating_statement() {
        let out = lower_method_body(
            "class A { int f() { try { return 1; } catch (Exception e) { return 2; } } }",
        );
        assert!(out.starts_with("var returned1 bool\nvar result2 "), "{}", out);
        assert!(out.contains("if returned1 {\n\treturn result2\n}\n"), "{}", out);
        assert!(out.ends_with("panic(\"unreachable\")\n"), "{}", out);
    }

    #[test]
    fn test_try_that_may_fall_through_has_no_trailing_panic() {
        let out = lower_method_body(
            "class A { int f() { try { work(); } catch (Exception e) { return 2; } return 0; } static void work() {} }",
        );
        assert!(!out.contains("unreachable"), "{}", out);
        assert!(out.ends_with("return 0\n"), "{}", out);
    }
}

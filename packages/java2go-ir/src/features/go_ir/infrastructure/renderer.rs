//! Go IR → Go source text
//!
//! Output order: license header, package clause, imports, interfaces,
//! structs, type definitions, constant blocks, constants, variables,
//! functions, methods, then failed-migration blocks.

use super::writer::GoWriter;
use crate::features::go_ir::domain::{
    ConstBlock, FailedMigration, GoExpr, GoFile, GoFunction, GoInterface, GoParam, GoStmt,
    GoStruct, GoType, MethodSpec, SwitchCase, TypeParam, ValueSpec,
};

/// Renders a `GoFile` to text
#[derive(Debug, Default, Clone, Copy)]
pub struct GoRenderer;

impl GoRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, file: &GoFile) -> String {
        let mut w = GoWriter::new();

        if let Some(header) = &file.license_header {
            let normalized = header.replace("\r\n", "\n").replace('\r', "\n");
            let trimmed = normalized.trim_end_matches('\n');
            if !trimmed.is_empty() {
                w.push(trimmed);
                w.push("\n\n");
            }
        }

        w.push_line(&format!("package {}", file.package));

        match file.imports.len() {
            0 => {}
            1 => {
                w.blank_line();
                if let Some(path) = file.imports.iter().next() {
                    w.push_line(&format!("import \"{}\"", path));
                }
            }
            _ => {
                w.blank_line();
                w.push_line("import (");
                w.indent();
                for path in &file.imports {
                    w.push_line(&format!("\"{}\"", path));
                }
                w.dedent();
                w.push_line(")");
            }
        }

        for iface in &file.interfaces {
            w.blank_line();
            self.write_interface(&mut w, iface);
        }
        for st in &file.structs {
            w.blank_line();
            self.write_struct(&mut w, st);
        }
        for def in &file.type_defs {
            w.blank_line();
            w.push_line(&format!("type {} {}", def.name, def.underlying));
        }
        for block in &file.const_blocks {
            w.blank_line();
            self.write_const_block(&mut w, block);
        }
        for spec in &file.consts {
            w.blank_line();
            w.push_line(&self.value_spec("const", spec, 0));
        }
        for spec in &file.vars {
            w.blank_line();
            w.push_line(&self.value_spec("var", spec, 0));
        }
        for function in file.functions.iter().chain(file.methods.iter()) {
            w.blank_line();
            self.write_function(&mut w, function);
        }
        for failed in &file.failed {
            w.blank_line();
            self.write_failed(&mut w, failed);
        }

        w.build()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Declarations
    // ═══════════════════════════════════════════════════════════════════

    fn write_interface(&self, w: &mut GoWriter, iface: &GoInterface) {
        let header = format!(
            "type {}{} interface",
            iface.name,
            self.type_params(&iface.type_params)
        );
        if iface.embedded.is_empty() && iface.methods.is_empty() {
            w.push_line(&format!("{}{{}}", header));
            return;
        }
        w.push_line(&format!("{} {{", header));
        w.indent();
        for embedded in &iface.embedded {
            w.push_line(&embedded.to_string());
        }
        for method in &iface.methods {
            w.push_line(&self.method_spec(method));
        }
        w.dedent();
        w.push_line("}");
    }

    fn write_struct(&self, w: &mut GoWriter, st: &GoStruct) {
        let header = format!("type {}{} struct", st.name, self.type_params(&st.type_params));
        if st.embedded.is_empty() && st.fields.is_empty() {
            w.push_line(&format!("{}{{}}", header));
            return;
        }
        w.push_line(&format!("{} {{", header));
        w.indent();
        for embedded in &st.embedded {
            w.push_line(&embedded.to_string());
        }
        for field in &st.fields {
            w.push_line(&format!("{} {}", field.name, field.ty));
        }
        w.dedent();
        w.push_line("}");
    }

    fn write_const_block(&self, w: &mut GoWriter, block: &ConstBlock) {
        w.push_line("const (");
        w.indent();
        for (i, name) in block.names.iter().enumerate() {
            if i == 0 {
                w.push_line(&format!("{} {} = iota", name, block.ty));
            } else {
                w.push_line(name);
            }
        }
        w.dedent();
        w.push_line(")");
    }

    fn value_spec(&self, keyword: &str, spec: &ValueSpec, depth: usize) -> String {
        let mut line = format!("{} {}", keyword, spec.name);
        if let Some(ty) = &spec.ty {
            line.push(' ');
            line.push_str(&ty.to_string());
        }
        if let Some(value) = &spec.value {
            line.push_str(" = ");
            line.push_str(&self.expr(value, depth));
        }
        line
    }

    fn write_function(&self, w: &mut GoWriter, function: &GoFunction) {
        if let Some(location) = &function.provenance {
            w.push_line(&format!("// migrated from {}", location));
        }
        let receiver = function
            .receiver
            .as_ref()
            .map(|r| format!("({} {}) ", r.name, r.ty))
            .unwrap_or_default();
        w.push_line(&format!(
            "func {}{}{}({}){} {{",
            receiver,
            function.name,
            self.type_params(&function.type_params),
            self.params(&function.params),
            self.results(&function.results),
        ));
        w.indent();
        self.write_block(w, &function.body);
        w.dedent();
        w.push_line("}");
    }

    fn write_failed(&self, w: &mut GoWriter, failed: &FailedMigration) {
        w.push_line(&format!("// FAILED MIGRATION at {}", failed.location));
        for line in failed.error.lines() {
            w.push_line(&format!("// error: {}", line));
        }
        w.push_line("// source:");
        for line in failed.source_text.lines() {
            w.push_line(&format!("//\t{}", line));
        }
        w.push_line("// tree:");
        for line in failed.dump.lines() {
            w.push_line(&format!("//\t{}", line));
        }
    }

    fn method_spec(&self, method: &MethodSpec) -> String {
        format!(
            "{}({}){}",
            method.name,
            self.params(&method.params),
            self.results(&method.results)
        )
    }

    fn type_params(&self, params: &[TypeParam]) -> String {
        if params.is_empty() {
            return String::new();
        }
        let inner: Vec<String> = params
            .iter()
            .map(|p| format!("{} {}", p.name, p.constraint))
            .collect();
        format!("[{}]", inner.join(", "))
    }

    fn params(&self, params: &[GoParam]) -> String {
        params
            .iter()
            .map(|p| {
                if p.variadic {
                    format!("{} ...{}", p.name, p.ty)
                } else {
                    format!("{} {}", p.name, p.ty)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn results(&self, results: &[GoType]) -> String {
        match results.len() {
            0 => String::new(),
            1 => format!(" {}", results[0]),
            _ => format!(
                " ({})",
                results
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════

    fn write_block(&self, w: &mut GoWriter, stmts: &[GoStmt]) {
        for stmt in stmts {
            self.write_stmt(w, stmt);
        }
    }

    fn write_stmt(&self, w: &mut GoWriter, stmt: &GoStmt) {
        let depth = w.level();
        match stmt {
            GoStmt::If { .. } => {
                w.push_indent();
                self.write_if(w, stmt);
                w.push("\n");
            }
            GoStmt::For {
                init,
                cond,
                post,
                body,
            } => {
                let header = match (init, cond, post) {
                    (None, None, None) => "for {".to_string(),
                    (None, Some(cond), None) => format!("for {} {{", self.expr(cond, depth)),
                    _ => format!(
                        "for {}; {}; {} {{",
                        init.as_ref()
                            .map(|s| self.simple_stmt(s, depth))
                            .unwrap_or_default(),
                        cond.as_ref().map(|c| self.expr(c, depth)).unwrap_or_default(),
                        post.as_ref()
                            .map(|s| self.simple_stmt(s, depth))
                            .unwrap_or_default(),
                    ),
                };
                self.write_braced(w, &header, body);
            }
            GoStmt::Range {
                key,
                value,
                iterable,
                body,
            } => {
                let target = self.expr(iterable, depth);
                let header = match (key, value) {
                    (None, None) => format!("for range {} {{", target),
                    (Some(k), None) => format!("for {} := range {} {{", k, target),
                    (k, Some(v)) => format!(
                        "for {}, {} := range {} {{",
                        k.as_deref().unwrap_or("_"),
                        v,
                        target
                    ),
                };
                self.write_braced(w, &header, body);
            }
            GoStmt::Switch { tag, cases } => {
                let header = match tag {
                    Some(tag) => format!("switch {} {{", self.expr(tag, depth)),
                    None => "switch {".to_string(),
                };
                w.push_line(&header);
                for case in cases {
                    self.write_case(w, case);
                }
                w.push_line("}");
            }
            GoStmt::Block(stmts) => self.write_braced(w, "{", stmts),
            GoStmt::Labeled { label, body } => {
                w.push_line(&format!("{}:", label));
                self.write_stmt(w, body);
            }
            GoStmt::Comment(text) => {
                for line in text.lines() {
                    w.push_line(&format!("// {}", line));
                }
            }
            GoStmt::Raw(text) => {
                for line in text.lines() {
                    w.push_line(line);
                }
            }
            other => {
                let line = self.simple_stmt(other, depth);
                w.push_line(&line);
            }
        }
    }

    fn write_braced(&self, w: &mut GoWriter, header: &str, body: &[GoStmt]) {
        w.push_line(header);
        w.indent();
        self.write_block(w, body);
        w.dedent();
        w.push_line("}");
    }

    fn write_case(&self, w: &mut GoWriter, case: &SwitchCase) {
        let depth = w.level();
        if case.values.is_empty() {
            w.push_line("default:");
        } else {
            let values: Vec<String> = case.values.iter().map(|v| self.expr(v, depth)).collect();
            w.push_line(&format!("case {}:", values.join(", ")));
        }
        w.indent();
        self.write_block(w, &case.body);
        if case.fallthrough {
            w.push_line("fallthrough");
        }
        w.dedent();
    }

    /// Writes `if ... { } else ...` starting at the current column
    fn write_if(&self, w: &mut GoWriter, stmt: &GoStmt) {
        let depth = w.level();
        if let GoStmt::If {
            init,
            cond,
            body,
            otherwise,
        } = stmt
        {
            let init = init
                .as_ref()
                .map(|s| format!("{}; ", self.simple_stmt(s, depth)))
                .unwrap_or_default();
            w.push(&format!("if {}{} {{\n", init, self.expr(cond, depth)));
            w.indent();
            self.write_block(w, body);
            w.dedent();
            w.push_indent();
            w.push("}");
            match otherwise.as_deref() {
                Some(nested @ GoStmt::If { .. }) => {
                    w.push(" else ");
                    self.write_if(w, nested);
                }
                Some(GoStmt::Block(stmts)) => {
                    w.push(" else {\n");
                    w.indent();
                    self.write_block(w, stmts);
                    w.dedent();
                    w.push_indent();
                    w.push("}");
                }
                Some(other) => {
                    w.push(" else {\n");
                    w.indent();
                    self.write_stmt(w, other);
                    w.dedent();
                    w.push_indent();
                    w.push("}");
                }
                None => {}
            }
        }
    }

    /// Single-line statements (also used in `for` headers)
    fn simple_stmt(&self, stmt: &GoStmt, depth: usize) -> String {
        match stmt {
            GoStmt::Expr(expr) => self.expr(expr, depth),
            GoStmt::Define { names, values } => format!(
                "{} := {}",
                names.join(", "),
                self.expr_list(values, depth)
            ),
            GoStmt::Assign {
                targets,
                op,
                values,
            } => format!(
                "{} {} {}",
                self.expr_list(targets, depth),
                op,
                self.expr_list(values, depth)
            ),
            GoStmt::VarDecl { name, ty, value } => self.value_spec(
                "var",
                &ValueSpec {
                    name: name.clone(),
                    ty: ty.clone(),
                    value: value.clone(),
                },
                depth,
            ),
            GoStmt::IncDec { target, op } => format!("{}{}", self.expr(target, depth), op),
            GoStmt::Return(values) if values.is_empty() => "return".to_string(),
            GoStmt::Return(values) => format!("return {}", self.expr_list(values, depth)),
            GoStmt::Break(None) => "break".to_string(),
            GoStmt::Break(Some(label)) => format!("break {}", label),
            GoStmt::Continue(None) => "continue".to_string(),
            GoStmt::Continue(Some(label)) => format!("continue {}", label),
            GoStmt::Defer(expr) => format!("defer {}", self.expr(expr, depth)),
            GoStmt::Comment(text) => format!("/* {} */", text),
            GoStmt::Raw(text) => text.clone(),
            compound => {
                let mut w = GoWriter::with_indent(depth);
                self.write_stmt(&mut w, compound);
                w.build().trim().to_string()
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════

    fn expr_list(&self, exprs: &[GoExpr], depth: usize) -> String {
        exprs
            .iter()
            .map(|e| self.expr(e, depth))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render an expression; `depth` is the indentation of the enclosing line
    pub fn expr(&self, expr: &GoExpr, depth: usize) -> String {
        match expr {
            GoExpr::Ident(name) => name.clone(),
            GoExpr::Lit(text) | GoExpr::Raw(text) => text.clone(),
            GoExpr::Selector(target, field) => {
                format!("{}.{}", self.operand(target, depth), field)
            }
            GoExpr::Call {
                func,
                args,
                spread,
                comment,
            } => {
                let mut out = format!(
                    "{}({}{})",
                    self.operand(func, depth),
                    self.expr_list(args, depth),
                    if *spread { "..." } else { "" }
                );
                if let Some(comment) = comment {
                    out.push_str(&format!(" /* {} */", comment));
                }
                out
            }
            GoExpr::Binary { op, left, right } => {
                let prec = precedence(op);
                let l = self.binary_side(left, prec, false, depth);
                let r = self.binary_side(right, prec, true, depth);
                format!("{} {} {}", l, op, r)
            }
            GoExpr::Unary { op, operand } => {
                format!("{}{}", op, self.operand(operand, depth))
            }
            GoExpr::Index { target, index } => format!(
                "{}[{}]",
                self.operand(target, depth),
                self.expr(index, depth)
            ),
            GoExpr::SliceOf { target, low, high } => format!(
                "{}[{}:{}]",
                self.operand(target, depth),
                low.as_ref().map(|e| self.expr(e, depth)).unwrap_or_default(),
                high.as_ref().map(|e| self.expr(e, depth)).unwrap_or_default()
            ),
            GoExpr::Composite { ty, elements } => {
                let inner: Vec<String> = elements
                    .iter()
                    .map(|(key, value)| match key {
                        Some(key) => format!("{}: {}", key, self.expr(value, depth)),
                        None => self.expr(value, depth),
                    })
                    .collect();
                format!("{}{{{}}}", ty, inner.join(", "))
            }
            GoExpr::AddressOf(inner) => format!("&{}", self.operand(inner, depth)),
            GoExpr::TypeAssert { target, ty } => {
                format!("{}.({})", self.operand(target, depth), ty)
            }
            GoExpr::FuncLit {
                params,
                results,
                body,
            } => {
                let mut w = GoWriter::with_indent(depth + 1);
                self.write_block(&mut w, body);
                let mut out = format!(
                    "func({}){} {{\n",
                    self.params(params),
                    self.results(results)
                );
                out.push_str(&w.build());
                out.push_str(&"\t".repeat(depth));
                out.push('}');
                out
            }
            GoExpr::Paren(inner) => format!("({})", self.expr(inner, depth)),
        }
    }

    /// Operand position: wrap anything that would bind looser than a selector
    fn operand(&self, expr: &GoExpr, depth: usize) -> String {
        match expr {
            GoExpr::Binary { .. } | GoExpr::Unary { .. } | GoExpr::AddressOf(_) => {
                format!("({})", self.expr(expr, depth))
            }
            _ => self.expr(expr, depth),
        }
    }

    fn binary_side(&self, side: &GoExpr, parent: u8, right: bool, depth: usize) -> String {
        if let GoExpr::Binary { op, .. } = side {
            let own = precedence(op);
            if own < parent || (right && own == parent) {
                return format!("({})", self.expr(side, depth));
            }
        }
        self.expr(side, depth)
    }
}

/// Go binary operator precedence
fn precedence(op: &str) -> u8 {
    match op {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "+" | "-" | "|" | "^" => 4,
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        _ => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::go_ir::domain::{GoField, Receiver};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_struct_and_method() {
        let mut file = GoFile::new("main");
        let mut st = GoStruct::new("FooBase");
        st.fields.push(GoField::new("A", GoType::named("int32")));
        file.structs.push(st);

        let mut getter = GoFunction::new("GetA");
        getter.receiver = Some(Receiver {
            name: "b".to_string(),
            ty: GoType::pointer(GoType::named("FooBase")),
        });
        getter.results.push(GoType::named("int32"));
        getter.body.push(GoStmt::Return(vec![GoExpr::ident("b").select("A")]));
        getter.provenance = Some("Foo.java:2:5".to_string());
        file.push_function(getter);

        let expected = "package main\n\ntype FooBase struct {\n\tA int32\n}\n\n// migrated from Foo.java:2:5\nfunc (b *FooBase) GetA() int32 {\n\treturn b.A\n}\n";
        assert_eq!(GoRenderer::new().render(&file), expected);
    }

    #[test]
    fn test_precedence_parenthesizes_java_grouping() {
        // Java `a + b << 2` groups as `(a + b) << 2`
        let expr = GoExpr::binary(
            "<<",
            GoExpr::binary("+", GoExpr::ident("a"), GoExpr::ident("b")),
            GoExpr::lit("2"),
        );
        assert_eq!(GoRenderer::new().expr(&expr, 0), "(a + b) << 2");

        let sub = GoExpr::binary(
            "-",
            GoExpr::ident("a"),
            GoExpr::binary("-", GoExpr::ident("b"), GoExpr::ident("c")),
        );
        assert_eq!(GoRenderer::new().expr(&sub, 0), "a - (b - c)");
    }

    #[test]
    fn test_render_if_else_chain() {
        let stmt = GoStmt::If {
            init: None,
            cond: GoExpr::ident("a"),
            body: vec![GoStmt::Return(vec![GoExpr::lit("1")])],
            otherwise: Some(Box::new(GoStmt::Block(vec![GoStmt::Return(vec![
                GoExpr::lit("2"),
            ])]))),
        };
        let mut w = GoWriter::new();
        GoRenderer::new().write_stmt(&mut w, &stmt);
        assert_eq!(w.build(), "if a {\n\treturn 1\n} else {\n\treturn 2\n}\n");
    }

    #[test]
    fn test_license_header_and_imports() {
        let mut file = GoFile::new("shapes");
        file.license_header = Some("// Copyright\r\n// MIT\r\n".to_string());
        file.add_import("fmt");
        file.add_import("os");
        let out = GoRenderer::new().render(&file);
        assert!(out.starts_with("// Copyright\n// MIT\n\npackage shapes\n"));
        assert!(out.contains("import (\n\t\"fmt\"\n\t\"os\"\n)"));
    }

    #[test]
    fn test_failed_block_is_commented() {
        let mut file = GoFile::new("main");
        file.failed.push(FailedMigration {
            error: "unhandled construct `annotation_type_declaration`".to_string(),
            source_text: "@interface Marker {\n}".to_string(),
            dump: "(annotation_type_declaration)".to_string(),
            location: "T.java:1:1".to_string(),
        });
        let out = GoRenderer::new().render(&file);
        let block: Vec<&str> = out.lines().skip(2).collect();
        assert!(block.iter().all(|l| l.starts_with("//")));
        assert!(out.contains("// FAILED MIGRATION at T.java:1:1"));
        assert!(out.contains("//\t@interface Marker {"));
    }
}

//! Line-based writer with tab indentation

/// Incrementally builds Go source text
#[derive(Debug, Default, Clone)]
pub struct GoWriter {
    content: String,
    indent_level: usize,
}

impl GoWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(indent_level: usize) -> Self {
        Self {
            content: String::new(),
            indent_level,
        }
    }

    pub fn level(&self) -> usize {
        self.indent_level
    }

    pub fn push_line(&mut self, line: &str) {
        if !line.is_empty() {
            self.push_indent();
            self.content.push_str(line);
        }
        self.content.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.content.push('\n');
    }

    pub fn push(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub fn push_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.content.push('\t');
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn build(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = GoWriter::new();
        w.push_line("func f() {");
        w.indent();
        w.push_line("return");
        w.dedent();
        w.push_line("}");
        assert_eq!(w.build(), "func f() {\n\treturn\n}\n");
    }
}

//! Source location types

/// Span in source code: 1-based lines, 0-based columns (tree-sitter rows + 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// `path:row:col` with both row and column 1-based
    pub fn location(&self, path: &str) -> String {
        format!("{}:{}:{}", path, self.start_line, self.start_col + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_one_based() {
        let span = Span::new(3, 4, 5, 1);
        assert_eq!(span.location("Foo.java"), "Foo.java:3:5");
    }

    #[test]
    fn test_first_column_is_one() {
        assert_eq!(Span::new(1, 0, 1, 9).location("A.java"), "A.java:1:1");
    }
}

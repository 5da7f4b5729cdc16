//! Literal spelling conversion

/// `10L` → `10`
pub(crate) fn integer(text: &str) -> String {
    text.trim_end_matches(['l', 'L']).to_string()
}

/// `1.5f` → `1.5`
pub(crate) fn floating(text: &str) -> String {
    let trimmed = text.trim_end_matches(['f', 'F', 'd', 'D']);
    if trimmed.starts_with("0x") || trimmed.starts_with("0X") || trimmed.is_empty() {
        return text.to_string();
    }
    trimmed.to_string()
}

/// Java string literal → Go interpreted string literal
pub(crate) fn string(text: &str) -> String {
    let body = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    format!("\"{}\"", convert_escapes(body, '"'))
}

/// Java char literal → Go rune literal
pub(crate) fn character(text: &str) -> String {
    let body = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);
    format!("'{}'", convert_escapes(body, '\''))
}

/// Text block → Go interpreted string with incidental indentation removed
pub(crate) fn text_block(text: &str) -> String {
    let inner = text
        .strip_prefix("\"\"\"")
        .and_then(|t| t.strip_suffix("\"\"\""))
        .unwrap_or(text);
    let content = inner.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    let lines: Vec<&str> = content.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, l)| !l.trim().is_empty() || *i == last)
        .map(|(_, l)| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let dedented: Vec<&str> = lines
        .iter()
        .map(|l| l.get(indent..).unwrap_or("").trim_end())
        .collect();
    let joined = dedented.join("\n");

    let mut out = String::with_capacity(joined.len() + 2);
    out.push('"');
    for c in convert_escapes(&joined, '"').chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Rewrite Java escapes into their Go spelling; `quote` is the delimiter
fn convert_escapes(body: &str, quote: char) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '\\' {
            if c == quote {
                out.push('\\');
            }
            out.push(c);
            i += 1;
            continue;
        }
        let Some(&next) = chars.get(i + 1) else {
            out.push_str("\\\\");
            break;
        };
        match next {
            '\'' | '"' if next != quote => {
                out.push(next);
                i += 2;
            }
            's' => {
                out.push(' ');
                i += 2;
            }
            '0'..='7' => {
                let digits: String = chars[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|d| d.is_digit(8))
                    .collect();
                let value = u32::from_str_radix(&digits, 8).unwrap_or(0);
                out.push_str(&format!("\\{:03o}", value.min(0o377)));
                i += 1 + digits.len();
            }
            'u' => {
                let mut j = i + 1;
                while chars.get(j) == Some(&'u') {
                    j += 1;
                }
                let hex: String = chars[j..].iter().take(4).collect();
                out.push_str("\\u");
                out.push_str(&hex);
                i = j + hex.chars().count();
            }
            other => {
                out.push('\\');
                out.push(other);
                i += 2;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_suffixes() {
        assert_eq!(integer("100L"), "100");
        assert_eq!(integer("0xFF"), "0xFF");
        assert_eq!(floating("1.5f"), "1.5");
        assert_eq!(floating("2d"), "2");
        assert_eq!(floating("3.0e10"), "3.0e10");
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(string(r#""it\'s""#), r#""it's""#);
        assert_eq!(string(r#""a\tb\0""#), r#""a\tb\000""#);
        assert_eq!(string(r#""A""#), r#""A""#);
        assert_eq!(character(r#"'\"'"#), "'\"'");
        assert_eq!(character(r"'\''"), r"'\''");
    }

    #[test]
    fn test_text_block_dedents() {
        let block = "\"\"\"\n        Hello\n          \"World\"\n        \"\"\"";
        assert_eq!(text_block(block), r#""Hello\n  \"World\"\n""#);
    }
}

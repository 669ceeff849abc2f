//! Line lexer shared by the location and material description languages
//!
//! Splits description text into statements. Semicolons are noise anywhere on
//! a line, and lines starting with `#` or `/` are comments.

/// One non-empty, non-comment line of a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// 1-based line number in the original text
    pub line: usize,
    /// Line text with `;` removed and surrounding whitespace trimmed
    pub text: String,
}

impl Statement {
    /// Create a statement directly, mostly useful in tests
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self { line, text: text.into() }
    }
}

/// Iterate the statements of a description block
pub fn statements(text: &str) -> impl Iterator<Item = Statement> + '_ {
    text.lines().enumerate().filter_map(|(index, raw)| {
        let cleaned: String = raw.chars().filter(|&c| c != ';').collect();
        let trimmed = cleaned.trim();

        if trimmed.is_empty() || is_comment(trimmed) {
            return None;
        }

        Some(Statement {
            line: index + 1,
            text: trimmed.to_string(),
        })
    })
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_semicolons_and_whitespace() {
        let found: Vec<_> = statements("  int a = 1;  \n").collect();
        assert_eq!(found, vec![Statement::new(1, "int a = 1")]);
    }

    #[test]
    fn test_semicolons_removed_everywhere() {
        let found: Vec<_> = statements("string s = a;b;").collect();
        assert_eq!(found[0].text, "string s = ab");
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let text = "\n   \n# hash comment\n// slash comment\n/ single slash\n;;;\nfloat x = 2.0;\n";
        let found: Vec<_> = statements(text).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 7);
        assert_eq!(found[0].text, "float x = 2.0");
    }

    #[test]
    fn test_comment_after_leading_whitespace() {
        assert_eq!(statements("    # indented").count(), 0);
    }
}

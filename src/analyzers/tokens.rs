//! Lightweight source tokenizer.
//!
//! A structural scanner, not a parser: it splits source text into identifier,
//! number, string, punctuation and comment tokens while tracking which lines
//! carry code and which carry only comments. Comments (`//`, `#`, `/* */`)
//! and single/double-quoted string literals are consumed as whole tokens so
//! keywords inside them are never mistaken for declarations.

/// Kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,
    Number,
    Str,
    Punct,
    Comment,
}

/// A scanned token with its 1-based starting line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

/// Classification of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    Comment,
    Code,
}

/// Result of scanning one file.
#[derive(Debug, Clone, Default)]
pub struct TokenizedSource {
    pub tokens: Vec<Token>,
    /// One entry per source line, in order.
    pub line_classes: Vec<LineClass>,
    /// Recoverable scan problems (unterminated comment or string).
    pub diagnostics: Vec<String>,
}

fn mark(flags: &mut [bool], line: usize) {
    if line >= 1 && line <= flags.len() {
        flags[line - 1] = true;
    }
}

/// Scan source text into tokens and per-line classes.
///
/// Never fails: malformed input (an unterminated string or block comment)
/// is consumed to end of input and recorded as a diagnostic.
pub fn tokenize(source: &str) -> TokenizedSource {
    let total_lines = source.lines().count();
    let mut has_code = vec![false; total_lines];
    let mut has_comment = vec![false; total_lines];
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    let chars: Vec<char> = source.chars().collect();
    let n = chars.len();
    let mut i = 0;
    let mut line = 1usize;

    while i < n {
        let c = chars[i];
        match c {
            '\n' => {
                line += 1;
                i += 1;
            }
            c if c.is_whitespace() => {
                i += 1;
            }
            // Line comments: `//` and `#`.
            '/' if i + 1 < n && chars[i + 1] == '/' => {
                let start = i;
                while i < n && chars[i] != '\n' {
                    i += 1;
                }
                mark(&mut has_comment, line);
                tokens.push(Token {
                    kind: TokenKind::Comment,
                    text: chars[start..i].iter().collect(),
                    line,
                });
            }
            '#' => {
                let start = i;
                while i < n && chars[i] != '\n' {
                    i += 1;
                }
                mark(&mut has_comment, line);
                tokens.push(Token {
                    kind: TokenKind::Comment,
                    text: chars[start..i].iter().collect(),
                    line,
                });
            }
            // Block comment, possibly spanning lines.
            '/' if i + 1 < n && chars[i + 1] == '*' => {
                let start = i;
                let start_line = line;
                mark(&mut has_comment, line);
                i += 2;
                let mut closed = false;
                while i < n {
                    if chars[i] == '\n' {
                        line += 1;
                        mark(&mut has_comment, line);
                        i += 1;
                    } else if chars[i] == '*' && i + 1 < n && chars[i + 1] == '/' {
                        i += 2;
                        closed = true;
                        break;
                    } else {
                        i += 1;
                    }
                }
                if !closed {
                    diagnostics.push(format!("unterminated block comment at line {start_line}"));
                }
                tokens.push(Token {
                    kind: TokenKind::Comment,
                    text: chars[start..i].iter().collect(),
                    line: start_line,
                });
            }
            // String literals with backslash escapes, possibly spanning lines.
            '\'' | '"' => {
                let quote = c;
                let start = i;
                let start_line = line;
                mark(&mut has_code, line);
                i += 1;
                let mut closed = false;
                while i < n {
                    if chars[i] == '\\' {
                        // An escaped newline still ends a physical line.
                        if i + 1 < n && chars[i + 1] == '\n' {
                            line += 1;
                            mark(&mut has_code, line);
                        }
                        i = (i + 2).min(n);
                    } else if chars[i] == '\n' {
                        line += 1;
                        mark(&mut has_code, line);
                        i += 1;
                    } else if chars[i] == quote {
                        i += 1;
                        closed = true;
                        break;
                    } else {
                        i += 1;
                    }
                }
                if !closed {
                    diagnostics.push(format!("unterminated string literal at line {start_line}"));
                }
                tokens.push(Token {
                    kind: TokenKind::Str,
                    text: chars[start..i.min(n)].iter().collect(),
                    line: start_line,
                });
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                i += 1;
                while i < n && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                mark(&mut has_code, line);
                tokens.push(Token {
                    kind: TokenKind::Ident,
                    text: chars[start..i].iter().collect(),
                    line,
                });
            }
            c if c.is_ascii_digit() => {
                let start = i;
                i += 1;
                while i < n && (chars[i].is_alphanumeric() || chars[i] == '.' || chars[i] == '_') {
                    i += 1;
                }
                mark(&mut has_code, line);
                tokens.push(Token {
                    kind: TokenKind::Number,
                    text: chars[start..i].iter().collect(),
                    line,
                });
            }
            _ => {
                mark(&mut has_code, line);
                tokens.push(Token {
                    kind: TokenKind::Punct,
                    text: c.to_string(),
                    line,
                });
                i += 1;
            }
        }
    }

    let line_classes = (0..total_lines)
        .map(|l| {
            if has_code[l] {
                LineClass::Code
            } else if has_comment[l] {
                LineClass::Comment
            } else {
                LineClass::Blank
            }
        })
        .collect();

    TokenizedSource {
        tokens,
        line_classes,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        let scanned = tokenize("function foo() { return 42; }");
        let texts: Vec<&str> = scanned.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["function", "foo", "(", ")", "{", "return", "42", ";", "}"]
        );
        assert_eq!(scanned.line_classes, vec![LineClass::Code]);
    }

    #[test]
    fn test_keyword_inside_string_is_one_token() {
        let scanned = tokenize("$x = \"class Foo function bar\";");
        let strs: Vec<&Token> = scanned
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Str)
            .collect();
        assert_eq!(strs.len(), 1);
        assert!(!scanned
            .tokens
            .iter()
            .any(|t| t.kind == TokenKind::Ident && t.text == "class"));
    }

    #[test]
    fn test_keyword_inside_comment_not_tokenized() {
        assert_eq!(
            kinds("// class Foo\n"),
            vec![TokenKind::Comment],
        );
        assert_eq!(
            kinds("# def foo\n"),
            vec![TokenKind::Comment],
        );
    }

    #[test]
    fn test_line_classes() {
        let src = "// header\n\n$x = 1; // trailing\n/* block\n   spans */\n";
        let scanned = tokenize(src);
        assert_eq!(
            scanned.line_classes,
            vec![
                LineClass::Comment,
                LineClass::Blank,
                LineClass::Code,
                LineClass::Comment,
                LineClass::Comment,
            ]
        );
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let scanned = tokenize(r#"$s = "a \" b";"#);
        let s = scanned
            .tokens
            .iter()
            .find(|t| t.kind == TokenKind::Str)
            .unwrap();
        assert_eq!(s.text, r#""a \" b""#);
        assert!(scanned.diagnostics.is_empty());
    }

    #[test]
    fn test_escaped_newline_in_string_keeps_line_sync() {
        let scanned = tokenize("$s = \"a\\\nb\";\n$x = 1;\n");
        assert_eq!(
            scanned.line_classes,
            vec![LineClass::Code, LineClass::Code, LineClass::Code]
        );
        // Tokens after the string land on their true lines.
        assert_eq!(scanned.tokens.last().unwrap().line, 3);
        assert!(scanned.diagnostics.is_empty());
    }

    #[test]
    fn test_trailing_backslash_in_string_is_diagnostic() {
        let scanned = tokenize("$s = \"abc\\");
        assert_eq!(scanned.diagnostics.len(), 1);
        assert!(scanned.diagnostics[0].contains("unterminated string"));
    }

    #[test]
    fn test_unterminated_string_is_diagnostic() {
        let scanned = tokenize("$s = \"never closed\n$y = 2;");
        assert_eq!(scanned.diagnostics.len(), 1);
        assert!(scanned.diagnostics[0].contains("unterminated string"));
    }

    #[test]
    fn test_unterminated_block_comment_is_diagnostic() {
        let scanned = tokenize("/* open\nstill open");
        assert_eq!(scanned.diagnostics.len(), 1);
        assert!(scanned.diagnostics[0].contains("unterminated block comment"));
    }

    #[test]
    fn test_empty_input() {
        let scanned = tokenize("");
        assert!(scanned.tokens.is_empty());
        assert!(scanned.line_classes.is_empty());
        assert!(scanned.diagnostics.is_empty());
    }

    #[test]
    fn test_token_lines_are_one_based() {
        let scanned = tokenize("$a = 1;\n$b = 2;\n");
        assert_eq!(scanned.tokens.first().unwrap().line, 1);
        assert_eq!(scanned.tokens.last().unwrap().line, 2);
    }
}

//! Schema tokenizer.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::SchemaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    /// String literal contents, escapes kept as written.
    Str(String),
    Number(String),
    /// `///` comment text, trimmed.
    Doc(String),
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Question,
    Equals,
    Dot,
    At,
    AtAt,
}

impl TokenKind {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Equals => "=",
            TokenKind::Dot => ".",
            TokenKind::At => "@",
            TokenKind::AtAt => "@@",
            TokenKind::Ident(_) | TokenKind::Str(_) | TokenKind::Number(_) | TokenKind::Doc(_) => "",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::Str(s) => write!(f, "string \"{}\"", s),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Doc(_) => f.write_str("documentation comment"),
            other => write!(f, "'{}'", other.symbol()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Tokenize schema text. Ordinary `//` comments are dropped; `///` comments
/// are kept as [`TokenKind::Doc`].
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, SchemaError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(ch) = chars.next() {
        let kind = match ch {
            '\n' => {
                line += 1;
                continue;
            }
            c if c.is_whitespace() => continue,
            '/' if chars.peek() == Some(&'/') => {
                chars.next();
                let is_doc = chars.peek() == Some(&'/');
                if is_doc {
                    chars.next();
                }
                let text = take_while(&mut chars, |c| c != '\n');
                if !is_doc {
                    continue;
                }
                TokenKind::Doc(text.trim().to_string())
            }
            '"' => TokenKind::Str(read_string(&mut chars, line)?),
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '=' => TokenKind::Equals,
            '.' => TokenKind::Dot,
            '@' => {
                if chars.peek() == Some(&'@') {
                    chars.next();
                    TokenKind::AtAt
                } else {
                    TokenKind::At
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                let rest = take_while(&mut chars, |c| c.is_alphanumeric() || c == '_');
                TokenKind::Ident(format!("{}{}", c, rest))
            }
            c if c.is_ascii_digit() || (c == '-' && chars.peek().is_some_and(|n| n.is_ascii_digit())) => {
                let rest = take_while(&mut chars, |c| c.is_alphanumeric() || c == '.' || c == '_');
                TokenKind::Number(format!("{}{}", c, rest))
            }
            other => return Err(SchemaError::UnexpectedChar { line, ch: other }),
        };
        tokens.push(Token { kind, line });
    }

    Ok(tokens)
}

fn take_while(chars: &mut Peekable<Chars<'_>>, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !keep(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

fn read_string(chars: &mut Peekable<Chars<'_>>, line: usize) -> Result<String, SchemaError> {
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(out),
            '\\' => {
                out.push('\\');
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '\n' => break,
            _ => out.push(c),
        }
    }
    Err(SchemaError::UnterminatedString { line })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn field_with_attributes() {
        assert_eq!(
            kinds("id Int @id @default(autoincrement())"),
            vec![
                TokenKind::Ident("id".into()),
                TokenKind::Ident("Int".into()),
                TokenKind::At,
                TokenKind::Ident("id".into()),
                TokenKind::At,
                TokenKind::Ident("default".into()),
                TokenKind::LParen,
                TokenKind::Ident("autoincrement".into()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn comments_and_docs() {
        assert_eq!(
            kinds("// plain\n/// doc text \n@@map(\"users\")"),
            vec![
                TokenKind::Doc("doc text".into()),
                TokenKind::AtAt,
                TokenKind::Ident("map".into()),
                TokenKind::LParen,
                TokenKind::Str("users".into()),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn numbers_and_lines() {
        let tokens = tokenize("a\n@default(-1.5)").unwrap();
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[4].kind, TokenKind::Number("-1.5".into()));
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            tokenize("x String @default(\"oops\n)"),
            Err(SchemaError::UnterminatedString { line: 1 })
        );
    }

    #[test]
    fn unexpected_char() {
        assert_eq!(
            tokenize("model A {\n  x Int $\n}"),
            Err(SchemaError::UnexpectedChar { line: 2, ch: '$' })
        );
    }
}

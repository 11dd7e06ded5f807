//! Structural schema parser.
//!
//! Understands the block layout of a Prisma-style schema:
//!
//! ```text
//! /// A registered account.
//! model User {
//!   id    Int     @id @default(autoincrement())
//!   email String  @unique
//!   posts Post[]
//! }
//!
//! enum Role { USER ADMIN }
//! datasource db { provider = "postgresql" url = env("DATABASE_URL") }
//! ```
//!
//! The grammar is newline-insensitive, so a whole model may sit on one line.
//! `datasource`, `generator` and `type` blocks are skipped; enum names are
//! collected so fields can be classified.

use crate::error::SchemaError;
use crate::lexer::{self, Token, TokenKind};

/// Parses schema text into its structural parts.
///
/// [`PrismaParser`] is the built-in implementation; another parser can be
/// injected into [`crate::extract_with`].
pub trait SchemaParser {
    fn parse(&self, source: &str) -> Result<StructuralSchema, SchemaError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralSchema {
    pub models: Vec<StructuralModel>,
    pub enums: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralModel {
    pub name: String,
    pub documentation: Option<String>,
    pub fields: Vec<StructuralField>,
    /// Line of the `model` keyword.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralField {
    pub name: String,
    pub ty: String,
    /// `?` modifier.
    pub optional: bool,
    /// `[]` modifier.
    pub list: bool,
    pub attributes: Vec<Attribute>,
    pub documentation: Option<String>,
}

impl StructuralField {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// A field attribute such as `@relation("Author", fields: [authorId])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name without `@` (e.g. `relation`, `db.VarChar`).
    pub name: String,
    pub args: Vec<AttributeArg>,
}

impl Attribute {
    /// Named argument (`fields: [...]`).
    pub fn arg(&self, name: &str) -> Option<&AttributeArg> {
        self.args.iter().find(|a| a.name.as_deref() == Some(name))
    }

    /// First unnamed argument.
    pub fn positional(&self) -> Option<&AttributeArg> {
        self.args.iter().find(|a| a.name.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeArg {
    pub name: Option<String>,
    /// Argument text re-rendered from tokens (e.g. `autoincrement()`, `[a, b]`).
    pub value: String,
}

impl AttributeArg {
    /// The value with surrounding quotes removed.
    pub fn as_str(&self) -> &str {
        self.value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(&self.value)
    }

    /// Elements of a `[a, b]` list value. A bare value is a one-element list.
    pub fn as_list(&self) -> Vec<String> {
        let inner = self
            .value
            .strip_prefix('[')
            .and_then(|v| v.strip_suffix(']'))
            .unwrap_or(&self.value);
        inner
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Parser for Prisma-style schema files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismaParser;

impl SchemaParser for PrismaParser {
    fn parse(&self, source: &str) -> Result<StructuralSchema, SchemaError> {
        let tokens = lexer::tokenize(source)?;
        Parser::new(&tokens).parse_schema()
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), SchemaError> {
        match self.advance() {
            Some(t) if t.kind == kind => Ok(()),
            Some(t) => Err(unexpected(t, expected)),
            None => Err(SchemaError::UnexpectedEof { expected }),
        }
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<String, SchemaError> {
        match self.advance() {
            Some(Token { kind: TokenKind::Ident(name), .. }) => Ok(name.clone()),
            Some(t) => Err(unexpected(t, expected)),
            None => Err(SchemaError::UnexpectedEof { expected }),
        }
    }

    fn parse_schema(mut self) -> Result<StructuralSchema, SchemaError> {
        let mut schema = StructuralSchema::default();
        let mut docs = Vec::new();

        while let Some(token) = self.advance() {
            let keyword = match &token.kind {
                TokenKind::Doc(text) => {
                    docs.push(text.clone());
                    continue;
                }
                TokenKind::Ident(keyword) => keyword.as_str(),
                _ => return Err(unexpected(token, "a top-level block")),
            };
            let documentation = take_docs(&mut docs);

            match keyword {
                "model" | "view" => {
                    let model = self.parse_model(token.line, documentation)?;
                    schema.models.push(model);
                }
                "enum" => {
                    let name = self.expect_ident("enum name")?;
                    self.skip_block(&name, token.line)?;
                    schema.enums.push(name);
                }
                "type" | "datasource" | "generator" => {
                    let name = self.expect_ident("block name")?;
                    self.skip_block(&name, token.line)?;
                }
                _ => return Err(unexpected(token, "a top-level block")),
            }
        }

        Ok(schema)
    }

    fn parse_model(
        &mut self,
        line: usize,
        documentation: Option<String>,
    ) -> Result<StructuralModel, SchemaError> {
        let name = self.expect_ident("model name")?;
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut fields = Vec::new();
        let mut docs = Vec::new();
        loop {
            let Some(token) = self.advance() else {
                return Err(SchemaError::UnterminatedBlock { line, name });
            };
            match &token.kind {
                TokenKind::RBrace => break,
                TokenKind::Doc(text) => docs.push(text.clone()),
                TokenKind::AtAt => {
                    // Block attributes (@@id, @@unique, @@map, ...) carry no field data.
                    self.parse_attribute()?;
                    docs.clear();
                }
                TokenKind::Ident(field) => {
                    let field = self.parse_field(field.clone(), token.line, take_docs(&mut docs))?;
                    fields.push(field);
                }
                _ => return Err(unexpected(token, "a field or '}'")),
            }
        }

        Ok(StructuralModel {
            name,
            documentation,
            fields,
            line,
        })
    }

    fn parse_field(
        &mut self,
        name: String,
        line: usize,
        documentation: Option<String>,
    ) -> Result<StructuralField, SchemaError> {
        let ty = match self.peek() {
            Some(TokenKind::Ident(ty)) => {
                self.pos += 1;
                ty.clone()
            }
            _ => return Err(SchemaError::MissingType { line, field: name }),
        };
        // Unsupported("circle")
        if self.peek() == Some(&TokenKind::LParen) {
            self.parse_args()?;
        }

        let mut list = false;
        if self.eat(&TokenKind::LBracket) {
            self.expect(TokenKind::RBracket, "']'")?;
            list = true;
        }
        let optional = self.eat(&TokenKind::Question);

        let mut attributes = Vec::new();
        while self.eat(&TokenKind::At) {
            attributes.push(self.parse_attribute()?);
        }

        Ok(StructuralField {
            name,
            ty,
            optional,
            list,
            attributes,
            documentation,
        })
    }

    /// Parses the part after `@` / `@@`: a dotted name and optional arguments.
    fn parse_attribute(&mut self) -> Result<Attribute, SchemaError> {
        let mut name = self.expect_ident("attribute name")?;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_ident("attribute name")?);
        }
        let args = if self.peek() == Some(&TokenKind::LParen) {
            self.parse_args()?
        } else {
            Vec::new()
        };
        Ok(Attribute { name, args })
    }

    /// Parses `( value, name: value, ... )`, keeping nested brackets intact.
    fn parse_args(&mut self) -> Result<Vec<AttributeArg>, SchemaError> {
        self.expect(TokenKind::LParen, "'('")?;

        let mut args = Vec::new();
        let mut current: Vec<&'a TokenKind> = Vec::new();
        let mut depth = 0usize;
        loop {
            let Some(token) = self.advance() else {
                return Err(SchemaError::UnexpectedEof { expected: "')'" });
            };
            let kind = &token.kind;
            match kind {
                TokenKind::RParen if depth == 0 => {
                    if !current.is_empty() {
                        args.push(arg_from(&current));
                    }
                    break;
                }
                TokenKind::Comma if depth == 0 => {
                    args.push(arg_from(&current));
                    current.clear();
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    depth += 1;
                    current.push(kind);
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    current.push(kind);
                }
                _ => current.push(kind),
            }
        }
        Ok(args)
    }

    fn skip_block(&mut self, name: &str, line: usize) -> Result<(), SchemaError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut depth = 1usize;
        while let Some(token) = self.advance() {
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(SchemaError::UnterminatedBlock {
            line,
            name: name.to_string(),
        })
    }
}

fn unexpected(token: &Token, expected: &'static str) -> SchemaError {
    SchemaError::Unexpected {
        line: token.line,
        found: token.kind.to_string(),
        expected,
    }
}

fn take_docs(docs: &mut Vec<String>) -> Option<String> {
    if docs.is_empty() {
        None
    } else {
        Some(std::mem::take(docs).join("\n"))
    }
}

fn arg_from(tokens: &[&TokenKind]) -> AttributeArg {
    match tokens {
        [TokenKind::Ident(name), TokenKind::Colon, rest @ ..] => AttributeArg {
            name: Some(name.clone()),
            value: render(rest),
        },
        _ => AttributeArg {
            name: None,
            value: render(tokens),
        },
    }
}

fn render(tokens: &[&TokenKind]) -> String {
    let mut out = String::new();
    for kind in tokens {
        match kind {
            TokenKind::Ident(s) | TokenKind::Number(s) => out.push_str(s),
            TokenKind::Str(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            TokenKind::Comma => out.push_str(", "),
            TokenKind::Colon => out.push_str(": "),
            TokenKind::Doc(_) => {}
            other => out.push_str(other.symbol()),
        }
    }
    out
}

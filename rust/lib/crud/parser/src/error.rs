use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("line {line}: unexpected character '{ch}'")]
    UnexpectedChar { line: usize, ch: char },

    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },

    #[error("line {line}: unexpected {found}, expected {expected}")]
    Unexpected {
        line: usize,
        found: String,
        expected: &'static str,
    },

    #[error("line {line}: field '{field}' has no type")]
    MissingType { line: usize, field: String },

    #[error("line {line}: block '{name}' is never closed")]
    UnterminatedBlock { line: usize, name: String },

    #[error("unexpected end of schema, expected {expected}")]
    UnexpectedEof { expected: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("model '{model}': malformed @crudAuth annotation: {reason}")]
    Malformed { model: String, reason: String },
}

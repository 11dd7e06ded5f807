use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodegenError {
    /// Schema text is empty or cannot be parsed. Fatal for the run.
    #[error("schema is unreadable: {0}")]
    SchemaUnreadable(String),

    /// Schema parsed, but declares no model with fields.
    #[error("schema declares no models to generate")]
    NothingToGenerate,

    /// Two models map to the same generated file names.
    #[error("models '{first}' and '{second}' both generate '{stem}' files")]
    NameCollision {
        stem: String,
        first: String,
        second: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::Io {
            path: path.into(),
            source,
        }
    }
}

//! crudgen schema parser
//!
//! Turns raw schema text into IR records. Used by:
//! - the codegen engine (extract models, then attach `@crudAuth` policies)
//! - the CLI `inspect` command
//!
//! Two independent passes over the same text:
//! - [`schema`]: token-based structural parse (models, fields, attributes)
//! - [`annotation`]: line-based scan of `///` documentation before each model

pub mod annotation;
pub mod error;
pub mod extract;
pub mod line;
pub mod schema;

mod lexer;

pub use annotation::{annotate, resolve_auth_for_model, AnnotationParser, CRUD_AUTH_MARKER};
pub use error::{AnnotationError, SchemaError};
pub use extract::{extract, extract_with, try_extract};
pub use schema::{PrismaParser, SchemaParser, StructuralSchema};

//! crudgen Intermediate Representation (IR)
//!
//! Data structures shared between:
//! - the schema parser (extraction + `@crudAuth` annotations)
//! - the codegen library (resolver / service / module synthesis)
//! - the CLI (`crudgen inspect` prints these as JSON)
//!
//! Three parts:
//! 1. Model - models and fields extracted from the schema
//! 2. Auth - CRUD operations and per-operation auth levels
//! 3. Naming - case conversion and the pluralization policy

pub mod auth;
pub mod model;
pub mod naming;

pub use auth::*;
pub use model::*;

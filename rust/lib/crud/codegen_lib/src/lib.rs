//! Codegen Library - CRUD source synthesis from schema models.
//!
//! Pipeline:
//!
//! ```text
//! schema text ─▶ extract ─▶ annotate (@crudAuth) ─▶ ResolverGenerator ─┐
//!                                                 ├▶ ServiceGenerator  ├▶ GeneratedCode ─▶ FileWriter
//!                                                 └▶ ModuleGenerator  ─┘
//! ```
//!
//! Output targets NestJS GraphQL resolvers backed by the Prisma client.
//! Generation is deterministic: unchanged input gives byte-identical files.

pub mod config;
pub mod engine;
pub mod error;
pub mod guard;
pub mod module;
pub mod output;
pub mod resolver;
pub mod service;

pub use crudgen_ir as ir;

pub use config::CodegenConfig;
pub use engine::Engine;
pub use error::CodegenError;
pub use guard::{guard_for, GuardConventions};
pub use module::{synthesize_index, synthesize_module, ModuleGenerator};
pub use output::{write_generated, FileWriter, FsWriter, WritePolicy, WriteReport};
pub use resolver::{synthesize_resolver, ResolverGenerator};
pub use service::{synthesize_service, ServiceGenerator};

use crudgen_ir::{ModelRecord, Operation};

/// Extension of every generated source file.
pub const SOURCE_EXT: &str = "ts";

/// Codegen trait - implement this for each generated artifact kind.
pub trait Codegen {
    fn generate(&self, models: &[ModelRecord]) -> GeneratedCode;
    fn target(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedCode {
    pub fn extend(&mut self, other: GeneratedCode) {
        self.files.extend(other.files);
    }

    pub fn get(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root (e.g. `user-profile.resolver.ts`).
    pub path: String,
    pub content: String,
}

/// `user-profile.resolver` - import specifier stem of a model's resolver.
pub fn resolver_stem(model: &ModelRecord) -> String {
    format!("{}.resolver", model.kebab_name())
}

/// `user-profile.service` - import specifier stem of a model's service.
pub fn service_stem(model: &ModelRecord) -> String {
    format!("{}.service", model.kebab_name())
}

pub fn resolver_class(model: &ModelRecord) -> String {
    format!("{}Resolver", model.name)
}

pub fn service_class(model: &ModelRecord) -> String {
    format!("{}Service", model.name)
}

/// GraphQL args type accepted by an operation (`FindManyUserArgs`, ...).
pub fn args_type(model: &ModelRecord, op: Operation) -> String {
    let prefix = match op {
        Operation::ReadMany | Operation::Count => "FindMany",
        Operation::ReadOne => "FindUnique",
        Operation::Create => "CreateOne",
        Operation::Update => "UpdateOne",
        Operation::Delete => "DeleteOne",
    };
    format!("{}{}Args", prefix, model.name)
}

/// Imported type names of a unit, joined for an `import { ... }` line.
pub(crate) fn import_list<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen.join(", ")
}

//! Generator configuration.
//!
//! Reads/writes `crudgen.toml`. Every key is optional:
//!
//! ```toml
//! module_name = "CrudModule"
//! module_file = "crud.module"
//! guards_import = "../auth/guards"
//! types_import = "../@generated"
//! prisma_import = "../prisma/prisma.service"
//!
//! [guards]
//! user = "JwtAuthGuard"
//! admin = "AdminGuard"
//! custom_prefix = "Auth"
//! custom_suffix = "Guard"
//!
//! [default_policy]
//! readOne = "user"
//! ```

use std::path::Path;

use crudgen_ir::{AuthOverrides, AuthPolicy};
use serde::{Deserialize, Serialize};

use crate::error::CodegenError;
use crate::guard::GuardConventions;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_FILE: &str = "crudgen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Class name of the aggregate module.
    pub module_name: String,

    /// File stem of the aggregate module (without extension).
    pub module_file: String,

    /// Import specifier the guard classes are loaded from.
    pub guards_import: String,

    /// Import specifier of the generated GraphQL model and args types.
    pub types_import: String,

    /// Import specifier of the injectable Prisma client.
    pub prisma_import: String,

    pub guards: GuardConventions,

    /// Base policy for unannotated keys. Admin-only when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<AuthOverrides>,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            module_name: "CrudModule".to_string(),
            module_file: "crud.module".to_string(),
            guards_import: "../auth/guards".to_string(),
            types_import: "../@generated".to_string(),
            prisma_import: "../prisma/prisma.service".to_string(),
            guards: GuardConventions::default(),
            default_policy: None,
        }
    }
}

impl CodegenConfig {
    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, CodegenError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        toml::from_str(&content).map_err(|e| CodegenError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> Result<(), CodegenError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| CodegenError::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| CodegenError::io(path, e))
    }

    /// Policy that annotations are merged over.
    pub fn base_policy(&self) -> AuthPolicy {
        match &self.default_policy {
            Some(overrides) => AuthPolicy::default().merge(overrides),
            None => AuthPolicy::default(),
        }
    }

    /// File name of the aggregate module, e.g. `crud.module.ts`.
    pub fn module_path(&self) -> String {
        format!("{}.{}", self.module_file, crate::SOURCE_EXT)
    }
}

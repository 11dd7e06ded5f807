//! Writing generated files.
//!
//! Generation is idempotent, so skipping files that already exist is safe:
//! a rerun on an unchanged schema would write the same bytes.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::CodegenError;
use crate::GeneratedCode;

/// Destination of generated files, keyed by relative path.
pub trait FileWriter {
    fn exists(&self, path: &str) -> bool;
    fn write(&mut self, path: &str, content: &str) -> Result<(), CodegenError>;
}

/// Writes under a root directory, creating parent directories as needed.
#[derive(Debug, Clone)]
pub struct FsWriter {
    root: PathBuf,
}

impl FsWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileWriter for FsWriter {
    fn exists(&self, path: &str) -> bool {
        self.root.join(path).exists()
    }

    fn write(&mut self, path: &str, content: &str) -> Result<(), CodegenError> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
        }
        std::fs::write(&full, content).map_err(|e| CodegenError::io(&full, e))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Leave existing files untouched.
    #[default]
    SkipExisting,
    Overwrite,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Write every generated file through `writer`, in generation order.
pub fn write_generated(
    code: &GeneratedCode,
    writer: &mut dyn FileWriter,
    policy: WritePolicy,
) -> Result<WriteReport, CodegenError> {
    let mut report = WriteReport::default();
    for file in &code.files {
        if policy == WritePolicy::SkipExisting && writer.exists(&file.path) {
            debug!("{} exists, skipping", file.path);
            report.skipped.push(file.path.clone());
            continue;
        }
        writer.write(&file.path, &file.content)?;
        debug!("wrote {} ({} bytes)", file.path, file.content.len());
        report.written.push(file.path.clone());
    }
    info!(
        "{} file(s) written, {} skipped",
        report.written.len(),
        report.skipped.len()
    );
    Ok(report)
}

//! Schema text assembly.
//!
//! Every argument is a schema file or a directory. Directories contribute
//! each `*.prisma` file found recursively, sorted by path. The fragments
//! are joined with a newline into the single text the engine consumes.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

pub const SCHEMA_EXT: &str = "prisma";

/// Schema files named by `paths`, in load order.
pub fn schema_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            collect(path, &mut found)?;
            if found.is_empty() {
                bail!("no .{} files found in {}", SCHEMA_EXT, path.display());
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Concatenated schema text of every file named by `paths`.
pub fn load(paths: &[PathBuf]) -> Result<String> {
    let mut parts = Vec::new();
    for file in schema_files(paths)? {
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("failed to read schema {}", file.display()))?;
        debug!("loaded {} ({} bytes)", file.display(), text.len());
        parts.push(text);
    }
    Ok(parts.join("\n"))
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == SCHEMA_EXT) {
            out.push(path);
        }
    }
    Ok(())
}

//! `crudgen init` - write the default config file.

use std::path::Path;

use anyhow::{bail, Result};
use crudgen_lib::CodegenConfig;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }
    CodegenConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

//! `crudgen generate` - schema files in, source files out.

use std::path::{Path, PathBuf};

use anyhow::Result;
use crudgen_lib::{write_generated, CodegenConfig, Engine, FsWriter, WritePolicy, WriteReport};
use tracing::info;

use crate::schema_source;

/// Generate into `out`. Nothing is written unless the whole pipeline succeeds.
pub fn run(
    schema: &[PathBuf],
    out: &Path,
    force: bool,
    dry_run: bool,
    config: CodegenConfig,
) -> Result<()> {
    let source = schema_source::load(schema)?;
    let code = Engine::new(config).generate(&source)?;

    if dry_run {
        for file in &code.files {
            println!("{}", out.join(&file.path).display());
        }
        return Ok(());
    }

    let policy = if force {
        WritePolicy::Overwrite
    } else {
        WritePolicy::SkipExisting
    };
    info!("writing {} file(s) to {}", code.files.len(), out.display());
    let mut writer = FsWriter::new(out);
    let report = write_generated(&code, &mut writer, policy)?;
    print_report(out, &report);
    Ok(())
}

fn print_report(out: &Path, report: &WriteReport) {
    for path in &report.written {
        println!("wrote    {}", out.join(path).display());
    }
    for path in &report.skipped {
        println!("skipped  {} (exists, use --force to overwrite)", out.join(path).display());
    }
}

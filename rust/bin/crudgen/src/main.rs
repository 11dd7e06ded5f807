//! `crudgen` - guarded CRUD resolvers from Prisma schemas.
//!
//! Reads one or more schema files, resolves each model's `@crudAuth`
//! policy and writes NestJS GraphQL resolvers, services and a module.

mod commands;
mod schema_source;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crudgen_lib::CodegenConfig;

#[derive(Parser, Debug)]
#[command(name = "crudgen", about = "Generate guarded CRUD resolvers from Prisma schemas")]
struct Cli {
    /// Path to the generator config file.
    #[arg(long = "config", global = true, default_value = crudgen_lib::config::DEFAULT_FILE)]
    config: PathBuf,

    /// Debug logging (RUST_LOG still takes precedence).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate resolver, service and module sources.
    Generate {
        /// Schema file or directory of `.prisma` files. Repeatable.
        #[arg(long = "schema", short = 's', required = true)]
        schema: Vec<PathBuf>,

        /// Output directory.
        #[arg(long = "out", short = 'o', default_value = "src/generated")]
        out: PathBuf,

        /// Overwrite files that already exist.
        #[arg(long)]
        force: bool,

        /// Print the files that would be generated without writing them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print extracted models with their resolved policies and guards as JSON.
    Inspect {
        /// Schema file or directory of `.prisma` files. Repeatable.
        #[arg(long = "schema", short = 's', required = true)]
        schema: Vec<PathBuf>,
    },

    /// Write a config file with the default settings.
    Init {
        /// Replace an existing config file.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            schema,
            out,
            force,
            dry_run,
        } => {
            let config = CodegenConfig::load(&cli.config)?;
            commands::generate::run(&schema, &out, force, dry_run, config)?;
        }

        Commands::Inspect { schema } => {
            let config = CodegenConfig::load(&cli.config)?;
            commands::inspect::run(&schema, config)?;
        }

        Commands::Init { force } => {
            commands::init::run(&cli.config, force)?;
        }
    }

    Ok(())
}

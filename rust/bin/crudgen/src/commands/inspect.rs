//! `crudgen inspect` - extracted models, policies and guards as JSON.

use std::path::PathBuf;

use anyhow::Result;
use crudgen_lib::ir::{AuthLevel, ModelRecord, Operation};
use crudgen_lib::{CodegenConfig, Engine};
use serde::Serialize;

use crate::schema_source;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelReport<'a> {
    #[serde(flatten)]
    model: &'a ModelRecord,
    operations: Vec<OperationReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationReport {
    operation: Operation,
    name: String,
    level: AuthLevel,
    /// `null` for public operations.
    guard: Option<String>,
}

pub fn run(schema: &[PathBuf], config: CodegenConfig) -> Result<()> {
    let source = schema_source::load(schema)?;
    let engine = Engine::new(config);
    let models = engine.models(&source)?;
    let reports = build_reports(&models, engine.config());
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

fn build_reports<'a>(models: &'a [ModelRecord], config: &CodegenConfig) -> Vec<ModelReport<'a>> {
    models
        .iter()
        .map(|model| {
            let policy = model.auth_policy();
            let operations = policy
                .iter()
                .map(|(op, level)| OperationReport {
                    operation: op,
                    name: model.operation_name(op),
                    level: level.clone(),
                    guard: config.guards.resolve(level),
                })
                .collect();
            ModelReport { model, operations }
        })
        .collect()
}

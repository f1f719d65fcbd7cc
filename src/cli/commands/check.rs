//! Check command - report migration state without writing.
//!
//! Every file is classified by the idempotency gate: untouched, partially
//! migrated or fully migrated. Files without any occurrence count as fully
//! migrated.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use super::super::{
    args::CheckCommand,
    exit_status::ExitStatus,
    report::{self, CheckRow},
};
use super::context::MigrationContext;
use crate::core::{Engine, GateReport, MigrationState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFileReport {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<MigrationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occurrences: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enriched: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    files: Vec<JsonFileReport>,
    total_pending: usize,
}

fn classify_file(engine: &Engine, path: &Path) -> Result<GateReport> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(engine.classify(&content))
}

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let ctx = MigrationContext::new(&cmd.common)?;

    let results: Vec<(String, Result<GateReport, String>)> = ctx
        .files
        .par_iter()
        .map(|path| {
            let result = classify_file(&ctx.engine, path).map_err(|e| format!("{:#}", e));
            (ctx.display_path(path), result)
        })
        .collect();

    let total_pending: usize = results
        .iter()
        .filter_map(|(_, r)| r.as_ref().ok())
        .map(GateReport::pending)
        .sum();
    let has_errors = results.iter().any(|(_, r)| r.is_err());

    if cmd.json {
        let report = JsonReport {
            files: results
                .iter()
                .map(|(path, result)| match result {
                    Ok(gate) => JsonFileReport {
                        path: path.clone(),
                        state: Some(gate.state()),
                        occurrences: Some(gate.occurrences),
                        enriched: Some(gate.enriched),
                        pending: Some(gate.pending()),
                        error: None,
                    },
                    Err(message) => JsonFileReport {
                        path: path.clone(),
                        state: None,
                        occurrences: None,
                        enriched: None,
                        pending: None,
                        error: Some(message.clone()),
                    },
                })
                .collect(),
            total_pending,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let rows: Vec<CheckRow<'_>> = results
            .iter()
            .map(|(path, result)| CheckRow {
                path,
                result: result.clone(),
            })
            .collect();
        report::print_check(&rows);
    }

    if has_errors {
        Ok(ExitStatus::Error)
    } else if total_pending > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

//! Per-file migration.
//!
//! A file is read in full, gated, rewritten in memory and written back only
//! when the rewritten text differs. Any I/O error is captured in the outcome
//! so a batch can continue with the next file.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{gate::GateReport, rewrite::Engine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Apply,
    DryRun,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file carries the enriched marker and no block is pending.
    AlreadyMigrated,
    /// The file was rewritten.
    Updated {
        pending: Option<usize>,
        replaced: usize,
        skipped: usize,
    },
    /// Dry run: the file would be rewritten.
    WouldUpdate {
        pending: Option<usize>,
        replaced: usize,
        skipped: usize,
    },
    /// The rewrite produced identical text.
    Unchanged {
        pending: Option<usize>,
        skipped: usize,
    },
    /// Reading or writing failed.
    Failed { message: String },
}

impl FileOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, FileOutcome::Updated { .. } | FileOutcome::WouldUpdate { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }

    /// Pending block count, when the gate was consulted.
    pub fn pending(&self) -> Option<usize> {
        match self {
            FileOutcome::Updated { pending, .. }
            | FileOutcome::WouldUpdate { pending, .. }
            | FileOutcome::Unchanged { pending, .. } => *pending,
            FileOutcome::AlreadyMigrated | FileOutcome::Failed { .. } => None,
        }
    }

    pub fn skipped(&self) -> usize {
        match self {
            FileOutcome::Updated { skipped, .. }
            | FileOutcome::WouldUpdate { skipped, .. }
            | FileOutcome::Unchanged { skipped, .. } => *skipped,
            FileOutcome::AlreadyMigrated | FileOutcome::Failed { .. } => 0,
        }
    }
}

/// Migrate the text of one document without touching the filesystem.
///
/// Returns the outcome and, when the text changed, the new text.
pub fn migrate_text(engine: &Engine, content: &str, mode: Mode) -> (FileOutcome, Option<String>) {
    let pending = if engine.idiom().has_enriched_marker(content) {
        let report: GateReport = engine.classify(content);
        if report.pending() == 0 {
            return (FileOutcome::AlreadyMigrated, None);
        }
        Some(report.pending())
    } else {
        None
    };

    let rewrite = engine.rewrite(content);
    if !rewrite.is_changed() {
        return (
            FileOutcome::Unchanged {
                pending,
                skipped: rewrite.skipped,
            },
            None,
        );
    }

    let outcome = match mode {
        Mode::Apply => FileOutcome::Updated {
            pending,
            replaced: rewrite.replaced,
            skipped: rewrite.skipped,
        },
        Mode::DryRun => FileOutcome::WouldUpdate {
            pending,
            replaced: rewrite.replaced,
            skipped: rewrite.skipped,
        },
    };
    (outcome, Some(rewrite.text.into_owned()))
}

/// Read, migrate and (in apply mode) write back one file.
pub fn process_file(engine: &Engine, path: &Path, mode: Mode) -> FileOutcome {
    match try_process_file(engine, path, mode) {
        Ok(outcome) => outcome,
        Err(err) => FileOutcome::Failed {
            message: format!("{:#}", err),
        },
    }
}

fn try_process_file(engine: &Engine, path: &Path, mode: Mode) -> Result<FileOutcome> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let (outcome, updated) = migrate_text(engine, &content, mode);

    if let (Mode::Apply, Some(updated)) = (mode, updated) {
        fs::write(path, updated)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }

    Ok(outcome)
}

//! Report formatting and printing utilities.
//!
//! Separate from the engine so catchfix can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::{FileOutcome, GateReport, MigrationState};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const RULE_WIDTH: usize = 60;

/// Print the outcome of one file to stdout.
pub fn print_outcome(path: &str, outcome: &FileOutcome, verbose: bool) {
    print_outcome_to(path, outcome, verbose, &mut io::stdout().lock());
}

/// Print the outcome of one file to a custom writer.
pub fn print_outcome_to<W: Write>(path: &str, outcome: &FileOutcome, verbose: bool, writer: &mut W) {
    let _ = writeln!(writer, "Processing {}...", path);

    if let Some(pending) = outcome.pending() {
        let _ = writeln!(
            writer,
            "  Found {} catch {} still needing update",
            pending,
            plural(pending, "block", "blocks")
        );
    }

    match outcome {
        FileOutcome::AlreadyMigrated => {
            let _ = writeln!(writer, "  {} Already fully updated", SUCCESS_MARK.green());
        }
        FileOutcome::Updated { replaced, .. } => {
            let _ = writeln!(writer, "  {} Updated successfully", SUCCESS_MARK.green());
            if verbose {
                let _ = writeln!(
                    writer,
                    "  - rewrote: {} {}",
                    replaced,
                    plural(*replaced, "block", "blocks")
                );
            }
        }
        FileOutcome::WouldUpdate { replaced, .. } => {
            let _ = writeln!(
                writer,
                "  {} {} {}",
                "Would update".yellow().bold(),
                replaced,
                plural(*replaced, "block", "blocks")
            );
        }
        FileOutcome::Unchanged { .. } => {
            let _ = writeln!(writer, "  {} No changes made", FAILURE_MARK.red());
        }
        FileOutcome::Failed { message } => {
            let _ = writeln!(writer, "  {} Error: {}", FAILURE_MARK.red(), message);
        }
    }

    let skipped = outcome.skipped();
    if skipped > 0 {
        let _ = writeln!(
            writer,
            "  - skipped: {} {} without a literal description",
            skipped,
            plural(skipped, "block", "blocks")
        );
    }
}

/// Print the final `Updated X/Y files` summary to stdout.
pub fn print_summary(updated: usize, total: usize, dry_run: bool) {
    print_summary_to(updated, total, dry_run, &mut io::stdout().lock());
}

pub fn print_summary_to<W: Write>(updated: usize, total: usize, dry_run: bool, writer: &mut W) {
    let rule = "=".repeat(RULE_WIDTH);
    let verb = if dry_run { "Would update" } else { "Updated" };

    let _ = writeln!(writer);
    let _ = writeln!(writer, "{}", rule);
    let _ = writeln!(writer, "{} {}/{} files", verb, updated, total);
    let _ = writeln!(writer, "{}", rule);

    if dry_run && updated > 0 {
        let _ = writeln!(writer, "Run without {} to write these changes.", "--dry-run".cyan());
    }
}

/// One row of the `check` report.
pub struct CheckRow<'a> {
    pub path: &'a str,
    pub result: Result<GateReport, String>,
}

/// Print the `check` table to stdout.
pub fn print_check(rows: &[CheckRow<'_>]) {
    print_check_to(rows, &mut io::stdout().lock());
}

pub fn print_check_to<W: Write>(rows: &[CheckRow<'_>], writer: &mut W) {
    let width = rows
        .iter()
        .map(|row| UnicodeWidthStr::width(row.path))
        .max()
        .unwrap_or(0);

    for row in rows {
        let padding = width - UnicodeWidthStr::width(row.path);
        match &row.result {
            Ok(report) => {
                let state = match report.state() {
                    MigrationState::FullyMigrated => report.state().to_string().green(),
                    MigrationState::PartiallyMigrated => report.state().to_string().yellow(),
                    MigrationState::Untouched => report.state().to_string().red(),
                };
                let _ = writeln!(
                    writer,
                    "{}{:padding$}  {}  ({}/{} enriched, {} pending)",
                    row.path,
                    "",
                    state,
                    report.enriched,
                    report.occurrences,
                    report.pending(),
                    padding = padding
                );
            }
            Err(message) => {
                let _ = writeln!(
                    writer,
                    "{}{:padding$}  {} {}",
                    row.path,
                    "",
                    "error:".bold().red(),
                    message,
                    padding = padding
                );
            }
        }
    }

    let pending: usize = rows
        .iter()
        .filter_map(|row| row.result.as_ref().ok())
        .map(GateReport::pending)
        .sum();
    let files = rows
        .iter()
        .filter(|row| matches!(&row.result, Ok(report) if report.pending() > 0))
        .count();

    let _ = writeln!(writer);
    if pending == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} {} - all catch blocks are up to date",
                rows.len(),
                plural(rows.len(), "file", "files")
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} {} in {} {} need update",
            FAILURE_MARK.red(),
            pending,
            plural(pending, "catch block", "catch blocks"),
            files,
            plural(files, "file", "files")
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

//! Fix command - rewrite pending catch blocks into the enriched idiom.
//!
//! Each target file is read, gated and rewritten in memory; the file is only
//! written when the text changed. A failure on one file is reported and the
//! remaining files are still processed.
//!
//! Use `--dry-run` to report without writing.

use anyhow::Result;

use super::super::{args::FixCommand, exit_status::ExitStatus, report};
use super::context::MigrationContext;
use crate::core::Mode;

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let ctx = MigrationContext::new(&cmd.common)?;
    let mode = if cmd.dry_run { Mode::DryRun } else { Mode::Apply };

    let outcomes = ctx.migrate(mode);

    for (path, outcome) in &outcomes {
        report::print_outcome(&ctx.display_path(path), outcome, ctx.verbose);
    }

    let updated = outcomes.iter().filter(|(_, o)| o.is_updated()).count();
    let failed = outcomes.iter().filter(|(_, o)| o.is_failed()).count();
    report::print_summary(updated, outcomes.len(), cmd.dry_run);

    if failed > 0 {
        Ok(ExitStatus::Error)
    } else if cmd.dry_run && updated > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

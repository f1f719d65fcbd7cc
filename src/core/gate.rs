//! Idempotency gate.
//!
//! Counts idiom occurrences and how many of them already carry the enriched
//! marker. The count is looser than [`BlockMatcher`](super::matcher::BlockMatcher):
//! it spans any text between the message helper, the logger call and the
//! raise, so enriched blocks are counted too.

use std::fmt;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use super::idiom::Idiom;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationState {
    Untouched,
    PartiallyMigrated,
    FullyMigrated,
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MigrationState::Untouched => "untouched",
            MigrationState::PartiallyMigrated => "partially migrated",
            MigrationState::FullyMigrated => "fully migrated",
        };
        write!(f, "{}", s)
    }
}

/// Occurrence counts for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateReport {
    pub occurrences: usize,
    pub enriched: usize,
}

impl GateReport {
    pub fn pending(&self) -> usize {
        self.occurrences.saturating_sub(self.enriched)
    }

    /// Zero occurrences counts as fully migrated: nothing is pending.
    pub fn state(&self) -> MigrationState {
        if self.pending() == 0 {
            MigrationState::FullyMigrated
        } else if self.enriched == 0 {
            MigrationState::Untouched
        } else {
            MigrationState::PartiallyMigrated
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdempotencyGate {
    occurrence: Regex,
    marker: String,
}

impl IdempotencyGate {
    pub fn new(idiom: &Idiom) -> Result<Self> {
        let source = format!(
            r"(?s){message}.*?\n.*?logger->error.*?\n.*?throw\s+new\s+{domain}.*?\$e->getCode.*?;",
            message = regex::escape(&idiom.message_helper),
            domain = regex::escape(&idiom.domain_exception),
        );
        let occurrence = Regex::new(&source)
            .with_context(|| format!("Failed to compile occurrence pattern for {:?}", idiom))?;

        Ok(Self {
            occurrence,
            marker: idiom.data_helper.clone(),
        })
    }

    pub fn classify(&self, text: &str) -> GateReport {
        self.occurrence
            .find_iter(text)
            .fold(GateReport::default(), |mut report, m| {
                report.occurrences += 1;
                if m.as_str().contains(&self.marker) {
                    report.enriched += 1;
                }
                report
            })
    }
}

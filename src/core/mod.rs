//! Catch-block migration engine.
//!
//! ## Pipeline
//!
//! ```text
//! document text
//!     ↓
//! IdempotencyGate (only when the enriched marker is present)
//!     ↓
//! BlockMatcher → CandidateBlock*
//!     ↓
//! ReplacementBuilder → EnrichedBlock | original text
//!     ↓
//! Rewrite (new text, replaced, skipped)
//! ```
//!
//! ## Module Structure
//!
//! - `idiom`: names that make up the idiom
//! - `matcher`: lazy structural matching of pending blocks
//! - `builder`: descriptor extraction and enriched block synthesis
//! - `gate`: occurrence counting and migration state
//! - `rewrite`: whole-document substitution
//! - `document`: per-file read / rewrite / write
//! - `scan`: target file enumeration

pub mod builder;
pub mod document;
pub mod gate;
pub mod idiom;
pub mod matcher;
pub mod rewrite;
pub mod scan;

pub use builder::{EnrichedBlock, ErrorDescriptor, ReplacementBuilder};
pub use document::{FileOutcome, Mode, migrate_text, process_file};
pub use gate::{GateReport, IdempotencyGate, MigrationState};
pub use idiom::Idiom;
pub use matcher::{BlockMatcher, CandidateBlock};
pub use rewrite::{Engine, Rewrite};
pub use scan::{ScanOptions, ScanResult, scan_files};

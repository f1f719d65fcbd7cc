//! Whole-document rewriting.

use std::borrow::Cow;

use anyhow::Result;

use super::{
    builder::ReplacementBuilder,
    gate::{GateReport, IdempotencyGate},
    idiom::Idiom,
    matcher::BlockMatcher,
};

/// Result of rewriting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite<'t> {
    /// The new text; borrowed when nothing was replaced.
    pub text: Cow<'t, str>,
    /// Candidates replaced with an enriched block.
    pub replaced: usize,
    /// Candidates left untouched because the builder declined.
    pub skipped: usize,
}

impl Rewrite<'_> {
    pub fn is_changed(&self) -> bool {
        self.replaced > 0
    }
}

/// The compiled engine for one idiom.
///
/// Holds no per-document state, so one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct Engine {
    idiom: Idiom,
    matcher: BlockMatcher,
    gate: IdempotencyGate,
}

impl Engine {
    pub fn new(idiom: Idiom) -> Result<Self> {
        let matcher = BlockMatcher::new(&idiom)?;
        let gate = IdempotencyGate::new(&idiom)?;
        Ok(Self {
            idiom,
            matcher,
            gate,
        })
    }

    pub fn idiom(&self) -> &Idiom {
        &self.idiom
    }

    pub fn classify(&self, text: &str) -> GateReport {
        self.gate.classify(text)
    }

    /// Replace every eligible candidate in `text`.
    ///
    /// The output is built completely before it is returned; text between
    /// candidates is copied through unchanged.
    pub fn rewrite<'t>(&self, text: &'t str) -> Rewrite<'t> {
        let builder = ReplacementBuilder::new(&self.idiom);
        let mut out = String::new();
        let mut last = 0;
        let mut replaced = 0;
        let mut skipped = 0;

        for block in self.matcher.candidates(text) {
            match builder.build(&block) {
                Some(enriched) => {
                    if out.is_empty() {
                        out.reserve(text.len() + text.len() / 2);
                    }
                    out.push_str(&text[last..block.span.start]);
                    out.push_str(&enriched.render());
                    last = block.span.end;
                    replaced += 1;
                }
                None => skipped += 1,
            }
        }

        if replaced == 0 {
            return Rewrite {
                text: Cow::Borrowed(text),
                replaced,
                skipped,
            };
        }

        out.push_str(&text[last..]);
        Rewrite {
            text: Cow::Owned(out),
            replaced,
            skipped,
        }
    }
}

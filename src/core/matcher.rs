//! Structural matching of pending catch blocks.
//!
//! A candidate is the three statements that follow a `catch` opening:
//! the message extraction, the logger call carrying only the `error` field,
//! and the re-raise of the domain exception wrapping `$e`. Matching is
//! textual; nothing here understands PHP beyond this skeleton.

use std::ops::Range;

use anyhow::{Context, Result};
use regex::{CaptureMatches, Captures, Regex};

use super::idiom::Idiom;

/// One pending occurrence of the idiom, borrowed from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBlock<'t> {
    /// Byte range of the whole match in the document.
    pub span: Range<usize>,
    /// The whole matched text, from the closing `}` of the try block
    /// through the `;` of the raise statement.
    pub text: &'t str,
    /// `} catch (...) {` plus the extraction line, verbatim.
    pub head: &'t str,
    /// Leading whitespace of the extraction line.
    pub indent: &'t str,
    /// Logger call up to and including `$errorMessage`, without `])`.
    pub logging_line: &'t str,
    /// Raise statement up to its closing parenthesis, without `;`.
    pub raise_line: &'t str,
    /// Raw first argument of the raise statement.
    pub description: &'t str,
}

impl<'t> CandidateBlock<'t> {
    fn from_captures(caps: Captures<'t>) -> Option<Self> {
        let whole = caps.get(0)?;
        let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());

        Some(Self {
            span: whole.range(),
            text: whole.as_str(),
            head: group("head"),
            indent: group("indent"),
            logging_line: group("logging"),
            raise_line: group("raise"),
            description: group("description"),
        })
    }

    /// Line terminator used by the block (`\r\n` or `\n`).
    pub fn newline(&self) -> &'static str {
        if self.head.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }
}

/// Finds [`CandidateBlock`]s for one [`Idiom`].
///
/// The regex is compiled once and can be reused across documents.
#[derive(Debug, Clone)]
pub struct BlockMatcher {
    pattern: Regex,
}

impl BlockMatcher {
    pub fn new(idiom: &Idiom) -> Result<Self> {
        let source = format!(
            concat!(
                r"(?P<head>\}}\s+catch\s+\(\s*{caught}\s+\$e\s*\)\s+\{{\s*\n",
                r"(?P<indent>[ \t]*)\$errorMessage\s+=\s+\$this->{message}\(\$e\);)",
                r"\s*\n",
                r#"(?P<logging>[ \t]*\$this->logger->error\([^,]+,\s+\[['"]error['"]\s+=>\s+\$errorMessage)"#,
                r"\s*\]\s*\)\s*;\s*\n",
                r"(?P<raise>[ \t]*throw\s+new\s+{domain}\((?P<description>[^,]+),\s+\$e->getCode\(\),\s+\$e\))",
                r"\s*;",
            ),
            caught = regex::escape(&idiom.caught_exception),
            message = regex::escape(&idiom.message_helper),
            domain = regex::escape(&idiom.domain_exception),
        );

        let pattern = Regex::new(&source)
            .with_context(|| format!("Failed to compile block pattern for {:?}", idiom))?;

        Ok(Self { pattern })
    }

    /// Lazily scan `text` for candidates in document order.
    ///
    /// Matches never overlap: once a block is matched, scanning resumes
    /// after its final `;`.
    pub fn candidates<'r, 't>(&'r self, text: &'t str) -> Candidates<'r, 't> {
        Candidates {
            inner: self.pattern.captures_iter(text),
        }
    }
}

/// Iterator returned by [`BlockMatcher::candidates`].
pub struct Candidates<'r, 't> {
    inner: CaptureMatches<'r, 't>,
}

impl<'t> Iterator for Candidates<'_, 't> {
    type Item = CandidateBlock<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().and_then(CandidateBlock::from_captures)
    }
}

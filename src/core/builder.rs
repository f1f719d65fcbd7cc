//! Synthesis of enriched catch blocks.
//!
//! When the first argument of the raise statement is anything other than a
//! single-quoted literal, the builder declines and the candidate is kept
//! byte-for-byte.

use std::{borrow::Cow, fmt, sync::LazyLock};

use regex::Regex;

use super::{idiom::Idiom, matcher::CandidateBlock};

/// A whole-argument single-quoted literal: `'Unable to fetch: '`.
static QUOTED_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'([^']+)'$").unwrap());

/// The literal error description passed as the first raise argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDescriptor<'t>(pub &'t str);

impl fmt::Display for ErrorDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

/// Replacement text for one [`CandidateBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedBlock<'a, 't> {
    idiom: &'a Idiom,
    block: CandidateBlock<'t>,
    descriptor: ErrorDescriptor<'t>,
}

impl EnrichedBlock<'_, '_> {
    /// The six positional arguments of the rewritten raise, in order:
    /// description, native code, cause, reserved, code, data.
    pub fn raise_arguments(&self) -> [String; 6] {
        [
            format!("{} . $errorMessage", self.descriptor),
            "$e->getCode()".to_string(),
            "$e".to_string(),
            "null".to_string(),
            "$errorCode".to_string(),
            "$errorData".to_string(),
        ]
    }

    pub fn render(&self) -> String {
        let indent = self.block.indent;
        let nl = self.block.newline();
        let idiom = self.idiom;

        let mut out = String::with_capacity(self.block.text.len() * 2);
        out.push_str(self.block.head);
        out.push_str(nl);
        out.push_str(&format!(
            "{indent}$errorData = $this->{}($e);{nl}",
            idiom.data_helper
        ));
        out.push_str(&format!(
            "{indent}$errorCode = $this->{}($e);{nl}",
            idiom.code_helper
        ));
        out.push_str(&format!(
            "{}, '{}' => $errorCode]);{nl}",
            self.block.logging_line, idiom.code_field
        ));
        out.push_str(&format!(
            "{indent}throw new {}({nl}",
            idiom.domain_exception
        ));

        let args = self.raise_arguments();
        let last = args.len() - 1;
        for (i, arg) in args.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            out.push_str(&format!("{indent}    {arg}{sep}{nl}"));
        }
        out.push_str(&format!("{indent});"));

        out
    }
}

/// Turns candidates into enriched blocks for one idiom.
#[derive(Debug, Clone, Copy)]
pub struct ReplacementBuilder<'a> {
    idiom: &'a Idiom,
}

impl<'a> ReplacementBuilder<'a> {
    pub fn new(idiom: &'a Idiom) -> Self {
        Self { idiom }
    }

    /// Recover the literal description, if the first raise argument is one.
    pub fn descriptor<'t>(&self, block: &CandidateBlock<'t>) -> Option<ErrorDescriptor<'t>> {
        QUOTED_LITERAL_REGEX
            .captures(block.description.trim())
            .and_then(|caps| caps.get(1))
            .map(|m| ErrorDescriptor(m.as_str()))
    }

    pub fn build<'t>(&self, block: &CandidateBlock<'t>) -> Option<EnrichedBlock<'a, 't>> {
        let descriptor = self.descriptor(block)?;
        Some(EnrichedBlock {
            idiom: self.idiom,
            block: block.clone(),
            descriptor,
        })
    }

    /// Replacement text for `block`; the original text when the builder declines.
    pub fn replace<'t>(&self, block: &CandidateBlock<'t>) -> Cow<'t, str> {
        match self.build(block) {
            Some(enriched) => Cow::Owned(enriched.render()),
            None => Cow::Borrowed(block.text),
        }
    }
}

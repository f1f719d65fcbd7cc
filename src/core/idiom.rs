//! Names that make up the catch-block idiom.
//!
//! The defaults describe the Guzzle client idiom:
//!
//! ```text
//! } catch (GuzzleException $e) {
//!     $errorMessage = $this->extractErrorMessage($e);
//!     $this->logger->error('...', ['error' => $errorMessage]);
//!     throw new RagApiException('...', $e->getCode(), $e);
//! ```
//!
//! Every name is interpolated into the matcher regex through `regex::escape`,
//! so only identifiers are accepted (see [`Idiom::validate`]).

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Idiom {
    /// Exception type named in the `catch (...)` clause.
    #[serde(default = "default_caught_exception")]
    pub caught_exception: String,
    /// Exception type raised with `throw new ...`.
    #[serde(default = "default_domain_exception")]
    pub domain_exception: String,
    /// Helper that turns the caught error into `$errorMessage`.
    #[serde(default = "default_message_helper")]
    pub message_helper: String,
    /// Helper that produces `$errorData`. Its presence marks an enriched block.
    #[serde(default = "default_data_helper")]
    pub data_helper: String,
    /// Helper that produces `$errorCode`.
    #[serde(default = "default_code_helper")]
    pub code_helper: String,
    /// Log context key bound to `$errorCode`.
    #[serde(default = "default_code_field")]
    pub code_field: String,
}

fn default_caught_exception() -> String {
    "GuzzleException".to_string()
}

fn default_domain_exception() -> String {
    "RagApiException".to_string()
}

fn default_message_helper() -> String {
    "extractErrorMessage".to_string()
}

fn default_data_helper() -> String {
    "extractErrorData".to_string()
}

fn default_code_helper() -> String {
    "extractErrorCode".to_string()
}

fn default_code_field() -> String {
    "error_code".to_string()
}

impl Default for Idiom {
    fn default() -> Self {
        Self {
            caught_exception: default_caught_exception(),
            domain_exception: default_domain_exception(),
            message_helper: default_message_helper(),
            data_helper: default_data_helper(),
            code_helper: default_code_helper(),
            code_field: default_code_field(),
        }
    }
}

impl Idiom {
    /// Reject names that are empty or not plain identifiers.
    ///
    /// `caughtException` and `domainException` may be namespace-qualified
    /// (`\Foo\BarException`).
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("caughtException", &self.caught_exception, true),
            ("domainException", &self.domain_exception, true),
            ("messageHelper", &self.message_helper, false),
            ("dataHelper", &self.data_helper, false),
            ("codeHelper", &self.code_helper, false),
            ("codeField", &self.code_field, false),
        ];

        for (field, value, qualified) in names {
            if !is_identifier(value, qualified) {
                bail!("Invalid name in 'idiom.{}': \"{}\"", field, value);
            }
        }

        Ok(())
    }

    /// Whether the text already contains the enriched marker anywhere.
    pub fn has_enriched_marker(&self, text: &str) -> bool {
        text.contains(&self.data_helper)
    }
}

fn is_identifier(name: &str, qualified: bool) -> bool {
    let segments: Vec<&str> = if qualified {
        name.strip_prefix('\\').unwrap_or(name).split('\\').collect()
    } else {
        vec![name]
    };

    segments.iter().all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() || first == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}

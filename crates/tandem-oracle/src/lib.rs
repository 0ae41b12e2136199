//! # tandem-oracle
//!
//! The oracle is the external text-to-structured-data service both agents
//! query. It is unreliable by assumption: unreachable, slow, and malformed
//! responses are routine.
//!
//! - [`OracleGateway`] is the contract the agents consume
//! - [`ChatCompletionsClient`] implements it over an OpenAI-style endpoint
//! - [`GuardedGateway`] bounds concurrent queries and enforces timeouts
//! - [`parse_records`] turns free-form model output into [`OracleRecord`]s

mod client;
mod error;
mod guard;
mod http;
mod parse;
mod record;

pub use client::{ChatCompletionsClient, system_message};
pub use error::OracleError;
pub use guard::GuardedGateway;
pub use parse::parse_records;
pub use record::OracleRecord;

use std::future::Future;
use std::time::Duration;

// ── Types ──────────────────────────────────────────────────────────

/// What the oracle is being asked to act as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextHint {
    /// Extraction for an industry label (free-form, possibly `general`).
    Industry(String),
    /// Adversarial re-derivation of an existing claim.
    Verification,
}

impl ContextHint {
    #[must_use]
    pub fn industry(label: impl Into<String>) -> Self {
        Self::Industry(label.into())
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Industry(label) => label,
            Self::Verification => "verification",
        }
    }
}

/// A single oracle query.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// Instructions, including the required response format.
    pub prompt: String,
    /// Page text the oracle should search.
    pub text: String,
    /// Page the text came from, for diagnostics.
    pub page_number: u32,
    pub context: ContextHint,
    pub timeout: Duration,
}

// ── Contract ───────────────────────────────────────────────────────

/// Capability that answers a prompt with zero or more structured records.
pub trait OracleGateway: Send + Sync {
    /// Run one query.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] when the oracle is unreachable, times out, or
    /// answers with nothing that parses as structured records.
    fn query(
        &self,
        request: &OracleRequest,
    ) -> impl Future<Output = Result<Vec<OracleRecord>, OracleError>> + Send;
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

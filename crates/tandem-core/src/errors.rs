//! Cross-cutting error types for Tandem.
//!
//! Domain-specific errors (`OracleError`, `ConfigError`) live in their own
//! crates. Nothing in the verification pipeline is fatal, so `CoreError` only
//! surfaces at construction boundaries.

use thiserror::Error;

/// Errors that can be raised while building core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An evidence field failed its provenance invariant.
    #[error("Invalid evidence field '{field}': {reason}")]
    InvalidEvidence { field: &'static str, reason: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

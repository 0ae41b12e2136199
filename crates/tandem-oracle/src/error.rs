//! Oracle error types.
//!
//! Every variant is a routine condition for the agents: they log it and fall
//! back to an empty or absent result.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when querying the oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The query did not finish within its timeout.
    #[error("oracle query timed out after {0:?}")]
    Timeout(Duration),

    /// Oracle endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The endpoint returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response could not be turned into structured records.
    #[error("malformed oracle response: {0}")]
    Malformed(String),

    /// The oracle endpoint or credentials are missing.
    #[error("oracle is not configured")]
    NotConfigured,
}

impl OracleError {
    /// Map a transport error, distinguishing timeouts.
    pub(crate) fn transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Http(error)
        }
    }
}

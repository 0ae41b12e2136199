//! Dual-agent verification settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_extraction_timeout_secs() -> u64 {
    120
}

const fn default_verification_timeout_secs() -> u64 {
    90
}

/// Default bound on in-flight oracle queries.
const fn default_max_concurrent_queries() -> usize {
    4
}

/// Default number of page-text characters embedded in the verification prompt.
const fn default_verifier_text_chars() -> usize {
    8000
}

fn default_extractor_agent_id() -> String {
    String::from("extractor_v1")
}

fn default_verifier_agent_id() -> String {
    String::from("verifier_v1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,

    #[serde(default = "default_verification_timeout_secs")]
    pub verification_timeout_secs: u64,

    /// Maximum oracle queries in flight at once, across pages and claims.
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,

    #[serde(default = "default_verifier_text_chars")]
    pub verifier_text_chars: usize,

    #[serde(default = "default_extractor_agent_id")]
    pub extractor_agent_id: String,

    #[serde(default = "default_verifier_agent_id")]
    pub verifier_agent_id: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            extraction_timeout_secs: default_extraction_timeout_secs(),
            verification_timeout_secs: default_verification_timeout_secs(),
            max_concurrent_queries: default_max_concurrent_queries(),
            verifier_text_chars: default_verifier_text_chars(),
            extractor_agent_id: default_extractor_agent_id(),
            verifier_agent_id: default_verifier_agent_id(),
        }
    }
}

impl VerificationConfig {
    #[must_use]
    pub const fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    #[must_use]
    pub const fn verification_timeout(&self) -> Duration {
        Duration::from_secs(self.verification_timeout_secs)
    }

    /// Reject settings the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero concurrency bound, a
    /// zero timeout, or identical agent ids.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent_queries == 0 {
            return Err(invalid("verification.max_concurrent_queries", "must be at least 1"));
        }
        if self.extraction_timeout_secs == 0 {
            return Err(invalid("verification.extraction_timeout_secs", "must be positive"));
        }
        if self.verification_timeout_secs == 0 {
            return Err(invalid("verification.verification_timeout_secs", "must be positive"));
        }
        if self.extractor_agent_id == self.verifier_agent_id {
            return Err(invalid(
                "verification.verifier_agent_id",
                "must differ from extractor_agent_id",
            ));
        }
        Ok(())
    }
}

const fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = VerificationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction_timeout(), Duration::from_secs(120));
        assert_eq!(config.verification_timeout(), Duration::from_secs(90));
        assert_eq!(config.verifier_text_chars, 8000);
    }

    #[test]
    fn zero_concurrency_rejected() {
        let config = VerificationConfig {
            max_concurrent_queries: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "verification.max_concurrent_queries", .. }));
    }

    #[test]
    fn shared_agent_id_rejected() {
        let config = VerificationConfig {
            verifier_agent_id: "extractor_v1".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = VerificationConfig {
            verification_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

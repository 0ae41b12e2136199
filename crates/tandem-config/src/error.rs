//! Errors raised while loading Tandem settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be read into settings.
    #[error("failed to load settings: {0}")]
    Figment(#[from] figment::Error),

    /// A section the caller needs has empty required fields.
    #[error("settings section [{section}] is incomplete")]
    NotConfigured { section: &'static str },

    /// A loaded value is outside what the pipeline can run with.
    #[error("{field} {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

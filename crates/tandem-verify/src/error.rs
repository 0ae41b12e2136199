//! Errors raised while assembling the pipeline.
//!
//! Running the pipeline never fails; only construction from configuration can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("config error: {0}")]
    Config(#[from] tandem_config::ConfigError),

    #[error("oracle error: {0}")]
    Oracle(#[from] tandem_oracle::OracleError),
}

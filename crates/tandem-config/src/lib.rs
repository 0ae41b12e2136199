//! # tandem-config
//!
//! Layered configuration loading for Tandem using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TANDEM_*` prefix, `__` as separator)
//! 2. Project-level `.tandem/config.toml`
//! 3. User-level `~/.config/tandem/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TANDEM_ORACLE__API_KEY` -> `oracle.api_key`,
//! `TANDEM_VERIFICATION__MAX_CONCURRENT_QUERIES` ->
//! `verification.max_concurrent_queries`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tandem_config::TandemConfig;
//!
//! let config = TandemConfig::load_with_dotenv().expect("config");
//! if config.oracle.is_configured() {
//!     println!("Oracle endpoint: {}", config.oracle.base_url);
//! }
//! ```

mod error;
mod oracle;
mod verification;

pub use error::ConfigError;
pub use oracle::OracleConfig;
pub use verification::VerificationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TandemConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl TandemConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if the merged values are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.verification.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".tandem/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TANDEM_").split("__"))
    }

    /// Oracle settings, or an error if the endpoint is missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `api_key` or `base_url` is
    /// empty.
    pub fn require_oracle(&self) -> Result<&OracleConfig, ConfigError> {
        if self.oracle.is_configured() {
            Ok(&self.oracle)
        } else {
            Err(ConfigError::NotConfigured { section: "oracle" })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tandem").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current
    /// directory. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    dotenvy::from_path(&env_path).ok();
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        dotenvy::dotenv().ok();
    }
}

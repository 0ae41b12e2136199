//! Oracle endpoint configuration (OpenAI-style chat completions).

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    String::from("mistral-small3.2:latest")
}

const fn default_max_tokens() -> u32 {
    3000
}

const fn default_top_p() -> f64 {
    0.1
}

/// Default number of page-text characters sent with each query.
const fn default_max_text_chars() -> usize {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleConfig {
    /// Bearer token for the chat-completions endpoint.
    #[serde(default)]
    pub api_key: String,

    /// Full chat-completions URL (e.g. `https://host/api/chat/completions`).
    #[serde(default)]
    pub base_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Page text longer than this is truncated before it is sent.
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model: default_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl OracleConfig {
    /// Check if the endpoint and credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = OracleConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.model, "mistral-small3.2:latest");
        assert_eq!(config.max_tokens, 3000);
        assert_eq!(config.max_text_chars, 5000);
    }

    #[test]
    fn configured_with_key_and_url() {
        let config = OracleConfig {
            api_key: "sk-test".into(),
            base_url: "http://localhost:11434/api/chat/completions".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn not_configured_without_url() {
        let config = OracleConfig {
            api_key: "sk-test".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}

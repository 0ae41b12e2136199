//! OpenAI-style chat-completions oracle.

use serde::Serialize;
use tandem_config::OracleConfig;

use crate::error::OracleError;
use crate::http::read_completion;
use crate::parse::parse_records;
use crate::record::OracleRecord;
use crate::{ContextHint, OracleGateway, OracleRequest, truncate_chars};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// System message for a context hint.
#[must_use]
pub fn system_message(context: &ContextHint) -> &'static str {
    match context {
        ContextHint::Verification => {
            "You are an independent verification agent. Rigorously challenge and verify metric claims. Be thorough and skeptical."
        }
        ContextHint::Industry(label) => match label.trim().to_ascii_lowercase().as_str() {
            "airlines" => {
                "You are an expert airline industry analyst. Focus on operational metrics, fleet data, and passenger statistics."
            }
            "banking" => {
                "You are an expert banking analyst. Focus on deposits, loans, branches, and capital metrics."
            }
            "technology" => {
                "You are an expert technology analyst. Focus on user metrics, recurring revenue, and growth indicators."
            }
            _ => {
                "You are an expert financial analyst. Extract all relevant financial and operational metrics."
            }
        },
    }
}

/// HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    config: OracleConfig,
}

impl ChatCompletionsClient {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::NotConfigured`] if the API key or URL is
    /// missing, or [`OracleError::Http`] if the HTTP client fails to build.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        if !config.is_configured() {
            return Err(OracleError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent("tandem/0.1")
            .build()?;
        Self::with_http(config, http)
    }

    /// Create a client around a caller-built `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::NotConfigured`] if the API key or URL is missing.
    pub fn with_http(config: OracleConfig, http: reqwest::Client) -> Result<Self, OracleError> {
        if !config.is_configured() {
            return Err(OracleError::NotConfigured);
        }
        Ok(Self { http, config })
    }

    fn build_body<'a>(&'a self, request: &OracleRequest) -> ChatRequest<'a> {
        let text = truncate_chars(&request.text, self.config.max_text_chars);
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_message(&request.context).to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("{}\n\nText:\n{text}", request.prompt),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            top_p: self.config.top_p,
        }
    }
}

impl OracleGateway for ChatCompletionsClient {
    async fn query(&self, request: &OracleRequest) -> Result<Vec<OracleRecord>, OracleError> {
        let body = self.build_body(request);
        let resp = self
            .http
            .post(&self.config.base_url)
            .bearer_auth(&self.config.api_key)
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| OracleError::transport(e, request.timeout))?;
        let content = read_completion(resp, request.timeout).await?;

        tracing::debug!(
            page = request.page_number,
            context = request.context.label(),
            chars = content.len(),
            "oracle responded"
        );
        parse_records(&content)
    }
}

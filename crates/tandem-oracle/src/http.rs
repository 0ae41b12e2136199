//! Response handling for the chat-completions endpoint.

use std::time::Duration;

use serde::Deserialize;

use crate::error::OracleError;

/// Used when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Turn an endpoint response into the assistant's text.
///
/// A 429 becomes [`OracleError::RateLimited`], any other non-success status
/// becomes [`OracleError::Api`] carrying the body. A success without a first
/// choice, or with empty content, is [`OracleError::Malformed`].
pub async fn read_completion(resp: reqwest::Response, timeout: Duration) -> Result<String, OracleError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(OracleError::RateLimited {
            retry_after_secs: retry_after_secs(&resp),
        });
    }
    if !status.is_success() {
        return Err(OracleError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }

    let completion: Completion = resp
        .json()
        .await
        .map_err(|e| OracleError::transport(e, timeout))?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| OracleError::Malformed("completion has no content".to_string()))
}

fn retry_after_secs(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

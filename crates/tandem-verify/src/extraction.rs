//! Evidence-mandating extraction agent.

use std::sync::Arc;
use std::time::Duration;

use tandem_core::MetricClaim;
use tandem_oracle::{ContextHint, OracleGateway, OracleRequest};

use crate::candidate::ExtractionCandidate;
use crate::prompts::extraction_prompt;

/// Turns page text into evidence-backed claims.
///
/// Candidates without a verbatim quote, a confidence in `[0, 1]` and a
/// substantive reasoning are dropped. Oracle failures yield no claims.
pub struct ExtractionAgent<G> {
    gateway: Arc<G>,
    agent_id: String,
    timeout: Duration,
}

impl<G: OracleGateway> ExtractionAgent<G> {
    #[must_use]
    pub fn new(gateway: Arc<G>, agent_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            gateway,
            agent_id: agent_id.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Extract claims from one page.
    pub async fn extract(&self, text: &str, page_number: u32, industry: &str) -> Vec<MetricClaim> {
        if text.trim().is_empty() || page_number == 0 {
            tracing::debug!(page = page_number, "nothing to extract");
            return Vec::new();
        }

        let request = OracleRequest {
            prompt: extraction_prompt(industry),
            text: text.to_string(),
            page_number,
            context: ContextHint::industry(industry),
            timeout: self.timeout,
        };

        let records = match self.gateway.query(&request).await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(page = page_number, industry, %error, "extraction query failed");
                return Vec::new();
            }
        };

        let offered = records.len();
        let claims: Vec<MetricClaim> = records
            .iter()
            .filter_map(|record| {
                let candidate = record
                    .decode::<ExtractionCandidate>()
                    .inspect_err(|error| {
                        tracing::debug!(page = page_number, %error, "undecodable extraction record");
                    })
                    .ok()?;
                candidate
                    .into_claim(page_number, &self.agent_id)
                    .inspect_err(|error| {
                        tracing::debug!(page = page_number, %error, "dropping candidate without valid evidence");
                    })
                    .ok()
            })
            .collect();

        tracing::info!(
            page = page_number,
            industry,
            offered,
            accepted = claims.len(),
            "extraction finished"
        );
        claims
    }
}

//! Adversarial re-derivation of extraction claims.

use std::sync::Arc;
use std::time::Duration;

use tandem_core::MetricClaim;
use tandem_oracle::{ContextHint, OracleGateway, OracleRequest};

use crate::candidate::VerificationCandidate;
use crate::prompts::verification_prompt;

/// Challenges a claim with a second, independent oracle query.
pub struct VerificationAgent<G> {
    gateway: Arc<G>,
    agent_id: String,
    timeout: Duration,
    max_text_chars: usize,
}

impl<G: OracleGateway> VerificationAgent<G> {
    #[must_use]
    pub fn new(
        gateway: Arc<G>,
        agent_id: impl Into<String>,
        timeout: Duration,
        max_text_chars: usize,
    ) -> Self {
        Self {
            gateway,
            agent_id: agent_id.into(),
            timeout,
            max_text_chars,
        }
    }

    #[must_use]
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Independently re-derive `claim` from the page it came from.
    ///
    /// The first record carrying a value is used. Returns `None` when the
    /// oracle fails or gives nothing with a value.
    pub async fn verify(&self, claim: &MetricClaim, full_text: &str) -> Option<MetricClaim> {
        let page = claim.evidence.page_number;
        if claim.agent_id == self.agent_id {
            tracing::warn!(
                page,
                metric = %claim.metric_name,
                agent_id = %self.agent_id,
                "refusing to verify a claim produced under the verifier's own id"
            );
            return None;
        }

        let request = OracleRequest {
            prompt: verification_prompt(claim, full_text, self.max_text_chars),
            text: full_text.to_string(),
            page_number: page,
            context: ContextHint::Verification,
            timeout: self.timeout,
        };

        let records = match self.gateway.query(&request).await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(page, metric = %claim.metric_name, %error, "verification query failed");
                return None;
            }
        };

        let candidate = records
            .iter()
            .filter_map(|record| {
                record
                    .decode::<VerificationCandidate>()
                    .inspect_err(|error| {
                        tracing::debug!(page, metric = %claim.metric_name, %error, "undecodable verification record");
                    })
                    .ok()
            })
            .find(|candidate| candidate.your_value.is_some())?;
        if let Some(hint) = candidate.status_hint() {
            tracing::debug!(page, metric = %claim.metric_name, %hint, "verifier status hint");
        }

        candidate.into_claim(claim, &self.agent_id)
    }
}

//! Pipeline driver: extraction, per-claim verification, consensus and logging.

use std::sync::Arc;

use futures::future::join_all;
use parking_lot::Mutex;
use tandem_config::{TandemConfig, VerificationConfig};
use tandem_core::{LogEntry, MetricClaim, VerificationResult, VerificationSummary};
use tandem_oracle::{ChatCompletionsClient, GuardedGateway, OracleGateway};

use crate::consensus;
use crate::error::VerifyError;
use crate::extraction::ExtractionAgent;
use crate::verification::VerificationAgent;

/// One page submitted to [`VerificationOrchestrator::extract_and_verify_pages`].
#[derive(Debug, Clone)]
pub struct PageInput {
    pub page_number: u32,
    pub text: String,
    pub industry: String,
}

impl PageInput {
    #[must_use]
    pub fn new(page_number: u32, text: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            industry: industry.into(),
        }
    }
}

/// Owns both agents and the append-only verification log.
///
/// Both agents share one [`GuardedGateway`], so every oracle query, across
/// pages and claims, counts against `max_concurrent_queries` and is cut off
/// at its agent's timeout. The log lock is never held across an oracle query.
pub struct VerificationOrchestrator<G> {
    extractor: ExtractionAgent<GuardedGateway<G>>,
    verifier: VerificationAgent<GuardedGateway<G>>,
    log: Mutex<Vec<LogEntry>>,
}

impl<G: OracleGateway> VerificationOrchestrator<G> {
    #[must_use]
    pub fn new(gateway: G, settings: &VerificationConfig) -> Self {
        let gateway = Arc::new(GuardedGateway::new(gateway, settings.max_concurrent_queries));
        Self {
            extractor: ExtractionAgent::new(
                Arc::clone(&gateway),
                settings.extractor_agent_id.clone(),
                settings.extraction_timeout(),
            ),
            verifier: VerificationAgent::new(
                gateway,
                settings.verifier_agent_id.clone(),
                settings.verification_timeout(),
                settings.verifier_text_chars,
            ),
            log: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn extractor(&self) -> &ExtractionAgent<GuardedGateway<G>> {
        &self.extractor
    }

    #[must_use]
    pub const fn verifier(&self) -> &VerificationAgent<GuardedGateway<G>> {
        &self.verifier
    }

    /// Extract claims from one page and verify each of them.
    ///
    /// Results come back in extraction order, one per claim. Every result
    /// is also appended to the verification log.
    pub async fn extract_and_verify(
        &self,
        text: &str,
        page_number: u32,
        industry: &str,
    ) -> Vec<VerificationResult> {
        tracing::info!(page = page_number, industry, "starting dual-agent verification");

        let claims = self.extractor.extract(text, page_number, industry).await;
        if claims.is_empty() {
            tracing::info!(page = page_number, "no claims extracted");
            return Vec::new();
        }
        tracing::info!(page = page_number, claims = claims.len(), "verifying extracted claims");

        let results = join_all(claims.into_iter().map(|claim| self.verify_claim(claim, text))).await;

        let verified = results.iter().filter(|r| r.is_verified()).count();
        tracing::info!(
            page = page_number,
            verified,
            total = results.len(),
            "page verification finished"
        );
        results
    }

    /// Run [`Self::extract_and_verify`] over several pages concurrently.
    ///
    /// The outer vector follows the order of `pages`.
    pub async fn extract_and_verify_pages(&self, pages: &[PageInput]) -> Vec<Vec<VerificationResult>> {
        join_all(
            pages
                .iter()
                .map(|page| self.extract_and_verify(&page.text, page.page_number, &page.industry)),
        )
        .await
    }

    async fn verify_claim(&self, claim: MetricClaim, text: &str) -> VerificationResult {
        let verification = self.verifier.verify(&claim, text).await;
        let result = consensus::resolve(claim, verification);

        tracing::info!(
            page = result.page_number(),
            metric = %result.metric_name(),
            status = %result.status,
            confidence = result.confidence_score,
            "claim resolved"
        );
        self.log.lock().push(LogEntry::from_result(&result));
        result
    }

    /// Snapshot of every logged outcome, in completion order.
    #[must_use]
    pub fn verification_log(&self) -> Vec<LogEntry> {
        self.log.lock().clone()
    }

    #[must_use]
    pub fn verification_summary(&self) -> VerificationSummary {
        VerificationSummary::from_entries(&self.log.lock())
    }
}

impl VerificationOrchestrator<ChatCompletionsClient> {
    /// Build a production orchestrator from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Config`] if the oracle endpoint is missing or
    /// verification settings are invalid, and [`VerifyError::Oracle`] if the
    /// HTTP client cannot be built.
    pub fn from_config(config: &TandemConfig) -> Result<Self, VerifyError> {
        config.verification.validate()?;
        let oracle = config.require_oracle()?;
        let client = ChatCompletionsClient::new(oracle.clone())?;
        Ok(Self::new(client, &config.verification))
    }
}

//! Terminal output of the consensus engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::claim::MetricClaim;
use crate::enums::VerificationStatus;

/// Result of reconciling an extraction claim with its verification.
///
/// Created once per claim per verification pass and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationResult {
    pub original_claim: MetricClaim,
    /// `None` when the verification agent produced nothing usable.
    pub verification_claim: Option<MetricClaim>,
    pub status: VerificationStatus,
    /// `None` marks "no reconcilable single value" (disputed claims).
    pub consensus_value: Option<f64>,
    /// Trust in the consensus value, `0.0..=1.0`.
    pub confidence_score: f64,
    /// Human-readable diagnostic of how the two claims compare.
    pub conflict_analysis: String,
    /// Justification for the chosen status.
    pub resolution_reasoning: String,
}

impl VerificationResult {
    #[must_use]
    pub fn metric_name(&self) -> &str {
        &self.original_claim.metric_name
    }

    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.original_claim.evidence.page_number
    }

    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self.status, VerificationStatus::Verified)
    }
}

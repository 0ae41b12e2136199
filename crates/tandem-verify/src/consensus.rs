//! Reconciles an extraction claim with its verification claim.
//!
//! Pure and deterministic: no I/O, no hidden state. Outcomes:
//! - no verification → `uncertain`, original value at half confidence
//! - agreement > 0.95 and both confidences > 0.7 → `verified`
//! - agreement < 0.8, or confident quotes that barely overlap → `disputed`
//! - anything else → `uncertain` with a confidence-weighted consensus
//!
//! `rejected` is never produced here.

use std::collections::HashSet;

use tandem_core::{Evidence, MetricClaim, VerificationResult, VerificationStatus};

/// Agreement above which two strongly evidenced claims count as verified.
pub const VERIFIED_AGREEMENT: f64 = 0.95;
/// Agreement below which the claims are disputed.
pub const DISPUTED_AGREEMENT: f64 = 0.8;
/// Both confidences must exceed this for the evidence to be strong.
pub const STRONG_CONFIDENCE: f64 = 0.7;
/// Both confidences must exceed this for a quote mismatch to be a conflict.
pub const CONFLICT_CONFIDENCE: f64 = 0.8;
/// Quotes sharing more than this many tokens overlap.
pub const OVERLAP_MIN_SHARED: usize = 3;
/// Confident quotes sharing fewer than this many tokens conflict.
pub const CONFLICT_MAX_SHARED: usize = 2;
/// Multiplier applied to both weights when quotes overlap.
pub const OVERLAP_BOOST: f64 = 1.2;

const UNVERIFIED_PENALTY: f64 = 0.5;
const DISPUTED_CONFIDENCE: f64 = 0.3;
const MODERATE_CONFIDENCE: f64 = 0.6;

/// Symmetric similarity of two values in `[0, 1]`.
///
/// Both zero → 1, exactly one zero → 0, otherwise
/// `min(|a|, |b|) / max(|a|, |b|)`.
#[must_use]
pub fn value_agreement(a: f64, b: f64) -> f64 {
    match (a == 0.0, b == 0.0) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let (a, b) = (a.abs(), b.abs());
            a.min(b) / a.max(b)
        }
    }
}

/// Qualitative comparison of two claims' provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvidenceStrength {
    /// Both confidences exceed [`STRONG_CONFIDENCE`].
    pub both_strong: bool,
    /// The quotes share more than [`OVERLAP_MIN_SHARED`] tokens.
    pub source_overlap: bool,
    /// Both agents are confident yet quote different text.
    pub conflict: bool,
    /// Distinct whitespace-delimited tokens the quotes have in common.
    pub shared_tokens: usize,
}

impl EvidenceStrength {
    #[must_use]
    pub fn assess(original: &Evidence, verification: &Evidence) -> Self {
        let shared_tokens = shared_token_count(&original.source_quote, &verification.source_quote);
        Self {
            both_strong: original.confidence > STRONG_CONFIDENCE
                && verification.confidence > STRONG_CONFIDENCE,
            source_overlap: shared_tokens > OVERLAP_MIN_SHARED,
            conflict: original.confidence > CONFLICT_CONFIDENCE
                && verification.confidence > CONFLICT_CONFIDENCE
                && shared_tokens < CONFLICT_MAX_SHARED,
            shared_tokens,
        }
    }
}

/// Number of distinct whitespace-delimited tokens present in both quotes.
#[must_use]
pub fn shared_token_count(a: &str, b: &str) -> usize {
    let left: HashSet<&str> = a.split_whitespace().collect();
    let right: HashSet<&str> = b.split_whitespace().collect();
    left.intersection(&right).count()
}

/// Confidence-weighted mean of the two values.
///
/// Overlapping quotes scale both weights by [`OVERLAP_BOOST`]; with two zero
/// weights the plain mean is used.
#[must_use]
pub fn weighted_consensus(
    original: &MetricClaim,
    verification: &MetricClaim,
    strength: &EvidenceStrength,
) -> f64 {
    let boost = if strength.source_overlap { OVERLAP_BOOST } else { 1.0 };
    let w1 = original.evidence.confidence * boost;
    let w2 = verification.evidence.confidence * boost;

    let total = w1 + w2;
    if total == 0.0 {
        return f64::midpoint(original.value, verification.value);
    }
    original.value.mul_add(w1, verification.value * w2) / total
}

/// Reconcile `original` with the verifier's claim, if any.
#[must_use]
pub fn resolve(original: MetricClaim, verification: Option<MetricClaim>) -> VerificationResult {
    let Some(verification) = verification else {
        return VerificationResult {
            consensus_value: Some(original.value),
            confidence_score: original.evidence.confidence * UNVERIFIED_PENALTY,
            status: VerificationStatus::Uncertain,
            conflict_analysis: "Verification failed".to_string(),
            resolution_reasoning: "No independent verification was available; using the original claim at reduced confidence".to_string(),
            original_claim: original,
            verification_claim: None,
        };
    };

    let agreement = value_agreement(original.value, verification.value);
    let strength = EvidenceStrength::assess(&original.evidence, &verification.evidence);

    if agreement > VERIFIED_AGREEMENT && strength.both_strong {
        return VerificationResult {
            consensus_value: Some(original.value),
            confidence_score: original.evidence.confidence.min(verification.evidence.confidence),
            status: VerificationStatus::Verified,
            conflict_analysis: format!(
                "Strong agreement between agents (value agreement {:.2}%, {} shared quote tokens)",
                agreement * 100.0,
                strength.shared_tokens
            ),
            resolution_reasoning: "Both agents found consistent, confident evidence".to_string(),
            original_claim: original,
            verification_claim: Some(verification),
        };
    }

    if agreement < DISPUTED_AGREEMENT || strength.conflict {
        let conflict = if strength.conflict {
            "evidence conflict detected"
        } else {
            "no evidence conflict detected"
        };
        return VerificationResult {
            consensus_value: None,
            confidence_score: DISPUTED_CONFIDENCE,
            status: VerificationStatus::Disputed,
            conflict_analysis: format!("Value agreement: {:.2}%, {conflict}", agreement * 100.0),
            resolution_reasoning: "Significant disagreement between agents; manual review required"
                .to_string(),
            original_claim: original,
            verification_claim: Some(verification),
        };
    }

    let consensus = weighted_consensus(&original, &verification, &strength);
    VerificationResult {
        consensus_value: Some(consensus),
        confidence_score: MODERATE_CONFIDENCE,
        status: VerificationStatus::Uncertain,
        conflict_analysis: format!(
            "Moderate agreement with some uncertainty (value agreement {:.2}%)",
            agreement * 100.0
        ),
        resolution_reasoning: "Using the confidence-weighted consensus of both agents".to_string(),
        original_claim: original,
        verification_claim: Some(verification),
    }
}

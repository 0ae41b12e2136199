//! Append-only verification log entries and the summary derived from them.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::VerificationStatus;
use crate::result::VerificationResult;

/// One row of the per-document verification log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogEntry {
    pub page: u32,
    pub metric_name: String,
    pub status: VerificationStatus,
    pub confidence: f64,
    pub original_value: f64,
    pub consensus_value: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl LogEntry {
    /// Summarize a result at the current time.
    #[must_use]
    pub fn from_result(result: &VerificationResult) -> Self {
        Self {
            page: result.page_number(),
            metric_name: result.original_claim.metric_name.clone(),
            status: result.status,
            confidence: result.confidence_score,
            original_value: result.original_claim.value,
            consensus_value: result.consensus_value,
            recorded_at: Utc::now(),
        }
    }
}

/// Aggregate statistics over a verification log.
///
/// The default value is the empty summary returned for an empty log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VerificationSummary {
    pub total_extractions: usize,
    pub verified_count: usize,
    pub disputed_count: usize,
    /// `verified_count / total_extractions`.
    pub verification_rate: f64,
    pub average_confidence: f64,
    /// Number of results needing manual triage (the disputed count).
    pub requires_review: usize,
}

impl VerificationSummary {
    /// Compute the summary of `entries`.
    #[must_use]
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let total = entries.len();
        let count = |status: VerificationStatus| entries.iter().filter(|e| e.status == status).count();
        let verified = count(VerificationStatus::Verified);
        let disputed = count(VerificationStatus::Disputed);
        let confidence_sum: f64 = entries.iter().map(|e| e.confidence).sum();

        #[allow(clippy::cast_precision_loss)]
        let (total_f, verified_f) = (total as f64, verified as f64);

        Self {
            total_extractions: total,
            verified_count: verified,
            disputed_count: disputed,
            verification_rate: verified_f / total_f,
            average_confidence: confidence_sum / total_f,
            requires_review: disputed,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_extractions == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(status: VerificationStatus, confidence: f64) -> LogEntry {
        LogEntry {
            page: 1,
            metric_name: "total_revenue".into(),
            status,
            confidence,
            original_value: 100.0,
            consensus_value: Some(100.0),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn empty_log_gives_empty_summary() {
        let summary = VerificationSummary::from_entries(&[]);
        assert_eq!(summary, VerificationSummary::default());
        assert!(summary.is_empty());
    }

    #[test]
    fn counts_and_averages() {
        let entries = vec![
            entry(VerificationStatus::Verified, 0.9),
            entry(VerificationStatus::Disputed, 0.3),
            entry(VerificationStatus::Uncertain, 0.6),
            entry(VerificationStatus::Verified, 0.8),
        ];
        let summary = VerificationSummary::from_entries(&entries);
        assert_eq!(summary.total_extractions, 4);
        assert_eq!(summary.verified_count, 2);
        assert_eq!(summary.disputed_count, 1);
        assert_eq!(summary.requires_review, 1);
        assert!((summary.verification_rate - 0.5).abs() < 1e-12);
        assert!((summary.average_confidence - 0.65).abs() < 1e-12);
        assert!(summary.verified_count + summary.disputed_count <= summary.total_extractions);
    }
}

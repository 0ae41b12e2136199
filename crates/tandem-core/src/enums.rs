//! Verification status of a reconciled claim.
//!
//! Serialized as `snake_case` strings, matching what downstream persistence
//! stores.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of reconciling an extraction claim with its verification claim.
///
/// ```text
/// no verification           → uncertain (half confidence)
/// strong agreement          → verified
/// strong disagreement       → disputed
/// moderate agreement        → uncertain (weighted consensus)
/// ```
///
/// `Rejected` is reserved: the consensus engine never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Disputed,
    Uncertain,
    Rejected,
}

impl VerificationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Disputed => "disputed",
            Self::Uncertain => "uncertain",
            Self::Rejected => "rejected",
        }
    }

    /// Whether a human should look at a result with this status.
    #[must_use]
    pub const fn needs_review(self) -> bool {
        matches!(self, Self::Disputed | Self::Rejected)
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&VerificationStatus::Disputed).unwrap();
        assert_eq!(json, "\"disputed\"");
        let back: VerificationStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(back, VerificationStatus::Rejected);
    }

    #[test]
    fn display_matches_as_str() {
        for status in [
            VerificationStatus::Verified,
            VerificationStatus::Disputed,
            VerificationStatus::Uncertain,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn only_disputed_and_rejected_need_review() {
        assert!(VerificationStatus::Disputed.needs_review());
        assert!(VerificationStatus::Rejected.needs_review());
        assert!(!VerificationStatus::Verified.needs_review());
        assert!(!VerificationStatus::Uncertain.needs_review());
    }
}

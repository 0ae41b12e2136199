//! Provenance attached to a single metric claim.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Textual evidence fields must be longer than this many characters
/// (after trimming) to count as substantive.
pub const MIN_EVIDENCE_TEXT_LEN: usize = 10;

/// Structured evidence backing one [`MetricClaim`](crate::MetricClaim).
///
/// Extraction output is always built through [`Evidence::validated`], so a
/// claim produced by the extraction agent carries a verbatim quote, a
/// confidence in `[0, 1]`, and a non-trivial reasoning. Evidence produced by
/// the verification agent is taken as the oracle returned it and may be weak;
/// the consensus engine scores it accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Evidence {
    /// Exact text copied from the document.
    pub source_quote: String,
    /// One-based page the quote was found on.
    pub page_number: u32,
    /// The agent's own confidence, `0.0..=1.0`.
    pub confidence: f64,
    /// Why the agent believes the value is correct.
    pub reasoning: String,
    /// Assumptions made while interpreting the quote. Verification evidence
    /// carries its conflict points here.
    #[serde(default)]
    pub assumptions: Vec<String>,
    /// Surrounding text, possibly empty.
    #[serde(default)]
    pub context_window: String,
}

impl Evidence {
    /// Build evidence, enforcing the provenance invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidEvidence`] if the quote or reasoning is not
    /// substantive, the confidence is not a finite value in `[0, 1]`, or the
    /// page number is zero.
    pub fn validated(
        source_quote: impl Into<String>,
        page_number: u32,
        confidence: f64,
        reasoning: impl Into<String>,
        assumptions: Vec<String>,
        context_window: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let evidence = Self {
            source_quote: source_quote.into(),
            page_number,
            confidence,
            reasoning: reasoning.into(),
            assumptions,
            context_window: context_window.into(),
        };
        evidence.check()?;
        Ok(evidence)
    }

    /// Check the provenance invariants on an existing value.
    ///
    /// # Errors
    ///
    /// See [`Evidence::validated`].
    pub fn check(&self) -> Result<(), CoreError> {
        require_substantive("source_quote", &self.source_quote)?;
        require_substantive("reasoning", &self.reasoning)?;
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(CoreError::InvalidEvidence {
                field: "confidence",
                reason: format!("{} is outside [0, 1]", self.confidence),
            });
        }
        if self.page_number == 0 {
            return Err(CoreError::InvalidEvidence {
                field: "page_number",
                reason: "page numbers start at 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Whether `text` is long enough to count as evidence.
#[must_use]
pub fn is_substantive(text: &str) -> bool {
    text.trim().chars().count() > MIN_EVIDENCE_TEXT_LEN
}

fn require_substantive(field: &'static str, text: &str) -> Result<(), CoreError> {
    if is_substantive(text) {
        Ok(())
    } else {
        Err(CoreError::InvalidEvidence {
            field,
            reason: format!("must be longer than {MIN_EVIDENCE_TEXT_LEN} characters"),
        })
    }
}

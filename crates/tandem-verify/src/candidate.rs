//! Typed views of oracle records.
//!
//! Raw [`OracleRecord`](tandem_oracle::OracleRecord)s stop here: each agent
//! decodes them into a candidate and either promotes it to a
//! [`MetricClaim`] or drops it.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tandem_core::claim::{LLM_EVIDENCE_EXTRACTION, VERIFICATION_CHECK};
use tandem_core::{CoreError, Evidence, MetricClaim, VerificationStatus};

/// Parse a number the way models write them: JSON numbers, or strings with
/// currency symbols, thousands separators and spaces.
#[must_use]
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| !matches!(c, '€' | '$' | '£' | ',') && !c.is_whitespace())
                .collect();
            cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

/// Accept a list of strings, a single string, or null.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                Value::Null | Value::String(_) => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// A metric proposed by the extraction oracle, before evidence validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionCandidate {
    #[serde(default, alias = "metric", alias = "name")]
    pub metric_name: Option<String>,
    #[serde(default, alias = "amount", alias = "number", deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default, alias = "source_text")]
    pub source_quote: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub context_window: Option<String>,
}

impl ExtractionCandidate {
    /// Promote the candidate to a claim if its evidence holds up.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the metric name or value is
    /// missing, or [`CoreError::InvalidEvidence`] when the evidence fails its
    /// invariants.
    pub fn into_claim(self, page_number: u32, agent_id: &str) -> Result<MetricClaim, CoreError> {
        let metric_name = self
            .metric_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| CoreError::Validation("missing metric_name".to_string()))?;
        let value = self
            .value
            .ok_or_else(|| CoreError::Validation(format!("missing value for {metric_name}")))?;
        let confidence = self.confidence.ok_or_else(|| CoreError::InvalidEvidence {
            field: "confidence",
            reason: "missing".to_string(),
        })?;

        let evidence = Evidence::validated(
            self.source_quote.unwrap_or_default(),
            page_number,
            confidence,
            self.reasoning.unwrap_or_default(),
            self.assumptions,
            self.context_window.unwrap_or_default(),
        )?;

        Ok(MetricClaim {
            metric_name,
            value,
            unit: non_empty_or_unknown(self.unit),
            period: non_empty_or_unknown(self.period),
            evidence,
            extraction_method: LLM_EVIDENCE_EXTRACTION.to_string(),
            agent_id: agent_id.to_string(),
        })
    }
}

/// The verification oracle's independent reading of a claim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationCandidate {
    #[serde(default, alias = "status")]
    pub verification_status: Option<String>,
    #[serde(default, alias = "source_quote")]
    pub your_source_quote: Option<String>,
    #[serde(default, alias = "value", deserialize_with = "lenient_number")]
    pub your_value: Option<f64>,
    #[serde(default, alias = "confidence", deserialize_with = "lenient_number")]
    pub your_confidence: Option<f64>,
    #[serde(default, alias = "reasoning")]
    pub your_reasoning: Option<String>,
    #[serde(default)]
    pub agreement_analysis: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub conflict_points: Vec<String>,
}

impl VerificationCandidate {
    /// The oracle's own verdict, if it gave a recognizable one.
    #[must_use]
    pub fn status_hint(&self) -> Option<VerificationStatus> {
        match self.verification_status.as_deref()?.trim().to_ascii_lowercase().as_str() {
            "verified" => Some(VerificationStatus::Verified),
            "disputed" => Some(VerificationStatus::Disputed),
            "uncertain" => Some(VerificationStatus::Uncertain),
            "rejected" => Some(VerificationStatus::Rejected),
            _ => None,
        }
    }

    /// Build the verifier's own claim about `original`'s metric.
    ///
    /// Only the metric identity (name, unit, period, page) is carried over.
    /// Value, quote, confidence and reasoning come from the oracle alone;
    /// conflict points are stored as the evidence's assumptions. Returns
    /// `None` when the oracle gave no value.
    #[must_use]
    pub fn into_claim(self, original: &MetricClaim, agent_id: &str) -> Option<MetricClaim> {
        let value = self.your_value?;
        let confidence = self.your_confidence.unwrap_or(0.0).clamp(0.0, 1.0);

        Some(MetricClaim {
            metric_name: original.metric_name.clone(),
            value,
            unit: original.unit.clone(),
            period: original.period.clone(),
            evidence: Evidence {
                source_quote: self.your_source_quote.unwrap_or_default(),
                page_number: original.evidence.page_number,
                confidence,
                reasoning: self.your_reasoning.unwrap_or_default(),
                assumptions: self.conflict_points,
                context_window: String::new(),
            },
            extraction_method: VERIFICATION_CHECK.to_string(),
            agent_id: agent_id.to_string(),
        })
    }
}

fn non_empty_or_unknown(field: Option<String>) -> String {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn decode<T: for<'de> Deserialize<'de>>(value: Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case(json!(1200), Some(1200.0))]
    #[case(json!("€2,400"), Some(2400.0))]
    #[case(json!("$ 1,000.50"), Some(1000.5))]
    #[case(json!("£12"), Some(12.0))]
    #[case(json!("about twelve"), None)]
    #[case(json!(null), None)]
    #[case(json!([1]), None)]
    fn numbers_are_parsed_leniently(#[case] input: Value, #[case] expected: Option<f64>) {
        assert_eq!(number_from_value(&input), expected);
    }

    #[test]
    fn extraction_aliases_are_accepted() {
        let candidate: ExtractionCandidate = decode(json!({
            "metric": "fleet_size",
            "amount": "310",
            "source_text": "The fleet comprised 310 aircraft",
            "confidence": 0.92,
            "reasoning": "Fleet count stated in operations review",
        }));
        let claim = candidate.into_claim(5, "extractor_v1").unwrap();
        assert_eq!(claim.metric_name, "fleet_size");
        assert!((claim.value - 310.0).abs() < f64::EPSILON);
        assert_eq!(claim.unit, "unknown");
        assert_eq!(claim.period, "unknown");
        assert_eq!(claim.evidence.page_number, 5);
        assert_eq!(claim.extraction_method, LLM_EVIDENCE_EXTRACTION);
    }

    #[test]
    fn single_string_assumption_becomes_list() {
        let candidate: ExtractionCandidate = decode(json!({ "assumptions": "figures in EUR" }));
        assert_eq!(candidate.assumptions, vec!["figures in EUR".to_string()]);
    }

    #[rstest]
    #[case(json!({"value": 1, "source_quote": "Revenue was 1 million", "confidence": 0.9, "reasoning": "stated directly in text"}))]
    #[case(json!({"metric_name": "x", "source_quote": "Revenue was 1 million", "confidence": 0.9, "reasoning": "stated directly in text"}))]
    #[case(json!({"metric_name": "x", "value": 1, "confidence": 0.9, "reasoning": "stated directly in text"}))]
    #[case(json!({"metric_name": "x", "value": 1, "source_quote": "Revenue was 1 million", "reasoning": "stated directly in text"}))]
    #[case(json!({"metric_name": "x", "value": 1, "source_quote": "Revenue was 1 million", "confidence": 0.9, "reasoning": "obvious"}))]
    #[case(json!({"metric_name": "x", "value": 1, "source_quote": "Revenue was 1 million", "confidence": 85, "reasoning": "stated directly in text"}))]
    fn incomplete_candidates_are_rejected(#[case] record: Value) {
        let candidate: ExtractionCandidate = decode(record);
        assert!(candidate.into_claim(1, "extractor_v1").is_err());
    }

    fn original() -> MetricClaim {
        decode::<ExtractionCandidate>(json!({
            "metric_name": "deposits",
            "value": 1200,
            "unit": "millions_eur",
            "period": "FY2024",
            "source_quote": "Customer deposits reached EUR 1.2 billion",
            "confidence": 0.9,
            "reasoning": "Balance sheet highlight on this page",
        }))
        .into_claim(2, "extractor_v1")
        .unwrap()
    }

    #[test]
    fn verification_claim_is_independently_sourced() {
        let candidate: VerificationCandidate = decode(json!({
            "verification_status": "disputed",
            "your_source_quote": "deposits of EUR 1.15 billion at year end",
            "your_value": "1,150",
            "your_confidence": 0.7,
            "your_reasoning": "Year-end balance differs from average",
            "conflict_points": ["average vs year-end balance"],
        }));
        assert_eq!(candidate.status_hint(), Some(VerificationStatus::Disputed));

        let original = original();
        let claim = candidate.into_claim(&original, "verifier_v1").unwrap();
        assert_eq!(claim.metric_name, "deposits");
        assert!((claim.value - 1150.0).abs() < f64::EPSILON);
        assert_eq!(claim.agent_id, "verifier_v1");
        assert_eq!(claim.extraction_method, VERIFICATION_CHECK);
        assert_eq!(claim.evidence.assumptions, vec!["average vs year-end balance".to_string()]);
        assert_ne!(claim.evidence.source_quote, original.evidence.source_quote);
        assert!(claim.evidence.context_window.is_empty());
    }

    #[test]
    fn verification_without_value_is_absent() {
        let candidate: VerificationCandidate = decode(json!({
            "verification_status": "uncertain",
            "your_reasoning": "Could not find the figure",
        }));
        assert!(candidate.into_claim(&original(), "verifier_v1").is_none());
    }

    #[test]
    fn verification_confidence_defaults_and_clamps() {
        let missing: VerificationCandidate = decode(json!({ "your_value": 1200 }));
        let claim = missing.into_claim(&original(), "verifier_v1").unwrap();
        assert!(claim.evidence.confidence.abs() < f64::EPSILON);
        assert!(claim.evidence.source_quote.is_empty());

        let percent: VerificationCandidate = decode(json!({ "your_value": 1200, "your_confidence": 95 }));
        let claim = percent.into_claim(&original(), "verifier_v1").unwrap();
        assert!((claim.evidence.confidence - 1.0).abs() < f64::EPSILON);
    }
}

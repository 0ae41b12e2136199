//! Serde roundtrip and JsonSchema validation for the types handed to
//! downstream persistence and display layers.

use chrono::Utc;
use schemars::schema_for;
use tandem_core::claim::{LLM_EVIDENCE_EXTRACTION, VERIFICATION_CHECK};
use tandem_core::{
    Evidence, LogEntry, MetricClaim, VerificationResult, VerificationStatus, VerificationSummary,
};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn revenue_claim() -> MetricClaim {
    MetricClaim {
        metric_name: "total_revenue".into(),
        value: 2400.0,
        unit: "millions_eur".into(),
        period: "FY2024".into(),
        evidence: Evidence::validated(
            "Total revenue for 2024 was EUR 2.4 billion",
            4,
            0.9,
            "Headline figure in the income statement summary",
            vec!["billion converted to millions".into()],
            "Group results at a glance",
        )
        .unwrap(),
        extraction_method: LLM_EVIDENCE_EXTRACTION.into(),
        agent_id: "extractor_v1".into(),
    }
}

fn revenue_check() -> MetricClaim {
    MetricClaim {
        metric_name: "total_revenue".into(),
        value: 2410.0,
        unit: "millions_eur".into(),
        period: "FY2024".into(),
        evidence: Evidence {
            source_quote: "revenue for 2024 was EUR 2.41 billion".into(),
            page_number: 4,
            confidence: 0.8,
            reasoning: "Rounded differently in the segment note".into(),
            assumptions: vec!["rounding differs".into()],
            context_window: String::new(),
        },
        extraction_method: VERIFICATION_CHECK.into(),
        agent_id: "verifier_v1".into(),
    }
}

roundtrip_and_validate!(claim_roundtrip, MetricClaim, revenue_claim());

roundtrip_and_validate!(
    verified_result_roundtrip,
    VerificationResult,
    VerificationResult {
        original_claim: revenue_claim(),
        verification_claim: Some(revenue_check()),
        status: VerificationStatus::Verified,
        consensus_value: Some(2400.0),
        confidence_score: 0.8,
        conflict_analysis: "Strong agreement between agents".into(),
        resolution_reasoning: "Both agents found consistent evidence".into(),
    }
);

roundtrip_and_validate!(
    disputed_result_roundtrip,
    VerificationResult,
    VerificationResult {
        original_claim: revenue_claim(),
        verification_claim: None,
        status: VerificationStatus::Disputed,
        consensus_value: None,
        confidence_score: 0.3,
        conflict_analysis: "Value agreement: 70.00%".into(),
        resolution_reasoning: "Manual review required".into(),
    }
);

roundtrip_and_validate!(
    log_entry_roundtrip,
    LogEntry,
    LogEntry {
        page: 4,
        metric_name: "total_revenue".into(),
        status: VerificationStatus::Uncertain,
        confidence: 0.6,
        original_value: 2400.0,
        consensus_value: Some(2404.0),
        recorded_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    summary_roundtrip,
    VerificationSummary,
    VerificationSummary {
        total_extractions: 3,
        verified_count: 1,
        disputed_count: 1,
        verification_rate: 1.0 / 3.0,
        average_confidence: 0.55,
        requires_review: 1,
    }
);

#[test]
fn result_json_uses_snake_case_status() {
    let result = VerificationResult {
        original_claim: revenue_claim(),
        verification_claim: None,
        status: VerificationStatus::Uncertain,
        consensus_value: Some(2400.0),
        confidence_score: 0.45,
        conflict_analysis: "Verification failed".into(),
        resolution_reasoning: "Using original claim with reduced confidence".into(),
    };
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["status"], "uncertain");
    assert!(value["verification_claim"].is_null());
}

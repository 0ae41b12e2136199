//! A single agent's assertion about one metric.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::evidence::Evidence;

/// `extraction_method` tag of claims produced by the extraction agent.
pub const LLM_EVIDENCE_EXTRACTION: &str = "llm_evidence_extraction";

/// `extraction_method` tag of claims produced by the verification agent.
pub const VERIFICATION_CHECK: &str = "verification_check";

/// One agent's claim about a metric value, bound to its evidence.
///
/// Claims are never edited after creation; a later stage builds a new claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricClaim {
    pub metric_name: String,
    pub value: f64,
    pub unit: String,
    /// Period label as written by the agent (e.g. `FY2024`), not computed.
    pub period: String,
    pub evidence: Evidence,
    /// Which agent/technique produced the claim.
    pub extraction_method: String,
    pub agent_id: String,
}

//! Test doubles shared by the unit tests of this crate.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use tandem_core::claim::LLM_EVIDENCE_EXTRACTION;
use tandem_core::{Evidence, MetricClaim};
use tandem_oracle::{OracleError, OracleGateway, OracleRecord, OracleRequest};

type Script = dyn Fn(&OracleRequest) -> Result<Vec<Value>, OracleError> + Send + Sync;

/// Gateway that answers every query with a closure.
pub struct ScriptedGateway {
    script: Box<Script>,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new(
        script: impl Fn(&OracleRequest) -> Result<Vec<Value>, OracleError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            script: Box::new(script),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OracleGateway for ScriptedGateway {
    async fn query(&self, request: &OracleRequest) -> Result<Vec<OracleRecord>, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let values = (self.script)(request)?;
        Ok(values.into_iter().filter_map(OracleRecord::from_value).collect())
    }
}

/// An extraction claim on page 1 with the given quote.
pub fn claim(metric: &str, value: f64, confidence: f64, quote: &str) -> MetricClaim {
    MetricClaim {
        metric_name: metric.to_string(),
        value,
        unit: "aircraft".to_string(),
        period: "FY2024".to_string(),
        evidence: Evidence {
            source_quote: quote.to_string(),
            page_number: 1,
            confidence,
            reasoning: "Stated directly in the operating review".to_string(),
            assumptions: Vec::new(),
            context_window: String::new(),
        },
        extraction_method: LLM_EVIDENCE_EXTRACTION.to_string(),
        agent_id: "extractor_v1".to_string(),
    }
}

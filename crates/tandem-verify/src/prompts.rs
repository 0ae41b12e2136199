//! Prompt builders for both agents.

use tandem_core::MetricClaim;
use tandem_oracle::truncate_chars;

use crate::industry::metric_hints;

/// Extraction prompt that makes provenance mandatory and tells the oracle to
/// omit anything it cannot quote.
#[must_use]
pub fn extraction_prompt(industry: &str) -> String {
    let industry = industry.trim();
    let industry = if industry.is_empty() { "general" } else { industry };

    let hints: String = metric_hints(industry)
        .into_iter()
        .map(|hint| {
            let unit = hint.unit.map(|unit| format!(" [unit: {unit}]")).unwrap_or_default();
            format!("- {} (also written as: {}){unit}\n", hint.key, hint.synonyms.join(", "))
        })
        .collect();

    format!(
        r#"Extract {industry} metrics with a MANDATORY evidence chain. Respond with a JSON array; each element MUST have:

{{
    "metric_name": "exact_name",
    "value": numeric_value,
    "unit": "unit_type",
    "period": "time_period",
    "source_quote": "EXACT text from the document containing this number",
    "confidence": 0.0_to_1.0,
    "reasoning": "Why you believe this extraction is correct",
    "assumptions": ["list", "of", "assumptions"],
    "context_window": "surrounding text for context"
}}

RULES:
1. source_quote MUST be copied verbatim from the document.
2. If you cannot find exact source text, DO NOT include the metric.
3. reasoning must explain your interpretation step by step.
4. confidence must reflect how certain you are that the extraction is accurate.
5. Include context_window showing the text around the metric.

OMIT a metric entirely if:
- there is no clear source text
- the number is ambiguous
- you are uncertain about its meaning

Do not guess. An empty array is a valid answer.

Metrics to look for in {industry} reports:
{hints}"#
    )
}

/// Adversarial prompt asking for an independent re-derivation of `claim`.
#[must_use]
pub fn verification_prompt(claim: &MetricClaim, full_text: &str, max_text_chars: usize) -> String {
    let text = truncate_chars(full_text, max_text_chars);
    format!(
        r#"VERIFICATION TASK: Independently verify this metric claim.

CLAIM TO VERIFY:
- Metric: {metric}
- Value: {value} {unit}
- Period: {period}
- Original Source Quote: "{quote}"
- Original Reasoning: "{reasoning}"

YOUR TASK:
1. Search the provided text for this metric independently.
2. Find your own source quote and evidence. Do not reuse the original quote unless you found it yourself.
3. Determine whether the original claim is accurate.
4. List every point on which you disagree with the claim.

RESPONSE FORMAT (JSON object):
{{
    "verification_status": "verified|disputed|uncertain",
    "your_source_quote": "exact text you found",
    "your_value": numeric_value_you_found,
    "your_confidence": 0.0_to_1.0,
    "your_reasoning": "your independent analysis",
    "agreement_analysis": "comparison with the original claim",
    "conflict_points": ["specific disagreements, if any"]
}}

TEXT TO SEARCH:
{text}

Be thorough and independent. Challenge the original claim rigorously."#,
        metric = claim.metric_name,
        value = claim.value,
        unit = claim.unit,
        period = claim.period,
        quote = claim.evidence.source_quote,
        reasoning = claim.evidence.reasoning,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::claim;

    #[test]
    fn extraction_prompt_lists_sector_metrics() {
        let prompt = extraction_prompt("airlines");
        assert!(prompt.starts_with("Extract airlines metrics"));
        assert!(prompt.contains("- load_factor (also written as: load factor"));
        assert!(prompt.contains("[unit: aircraft]"));
        assert!(prompt.contains("- total_revenue"));
        assert!(prompt.contains("\"source_quote\""));
        assert!(prompt.contains("DO NOT include the metric"));
    }

    #[test]
    fn every_hint_gets_its_own_line() {
        let prompt = extraction_prompt("airlines");
        let (_, hints) = prompt
            .split_once("Metrics to look for in airlines reports:\n")
            .unwrap();
        let lines: Vec<&str> = hints.lines().filter(|line| !line.is_empty()).collect();
        assert_eq!(lines.len(), metric_hints("airlines").len());
        assert!(lines
            .iter()
            .all(|line| line.starts_with("- ") && line.contains(" (also written as: ")));
    }

    #[test]
    fn blank_industry_reads_as_general() {
        let prompt = extraction_prompt("  ");
        assert!(prompt.starts_with("Extract general metrics"));
        assert!(!prompt.contains("fleet_size"));
    }

    #[test]
    fn verification_prompt_states_claim_and_truncates_text() {
        let original = claim("fleet_size", 310.0, 0.9, "The fleet comprised 310 aircraft at year end");
        let text = "x".repeat(50);
        let prompt = verification_prompt(&original, &text, 20);
        assert!(prompt.contains("- Metric: fleet_size"));
        assert!(prompt.contains("- Value: 310 aircraft"));
        assert!(prompt.contains("Original Source Quote: \"The fleet comprised 310 aircraft at year end\""));
        assert!(prompt.contains(&format!("TEXT TO SEARCH:\n{}\n", "x".repeat(20))));
        assert!(!prompt.contains(&"x".repeat(21)));
        assert!(prompt.contains("Challenge the original claim rigorously"));
    }
}

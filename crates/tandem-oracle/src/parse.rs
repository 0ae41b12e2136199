//! Recover structured records from free-form model output.
//!
//! Models wrap JSON in prose, code fences, and near-JSON. Strategies, in order:
//! 1. the whole (fence-stripped) text as JSON
//! 2. the span from the first `{` to the last `}` as a single object
//! 3. the span from the first `[` to the last `]` as an array
//! 4. every line that is itself a JSON object
//!
//! Spans that fail to parse get one repair attempt (trailing commas removed,
//! single quotes swapped when the span has no double quotes).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::OracleError;
use crate::record::OracleRecord;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));

/// Parse model output into records.
///
/// An explicit empty array is a valid answer ("nothing found") and yields an
/// empty list. Non-object items inside arrays are discarded.
///
/// # Errors
///
/// Returns [`OracleError::Malformed`] if no strategy recovers any JSON.
pub fn parse_records(content: &str) -> Result<Vec<OracleRecord>, OracleError> {
    let text = strip_code_fences(content);
    let text = text.trim();

    if let Some(value) = parse_lenient(text) {
        return Ok(records_from_value(value));
    }

    if let Some(value) = span(text, '{', '}').and_then(parse_lenient) {
        if value.is_object() {
            return Ok(records_from_value(value));
        }
    }

    if let Some(value) = span(text, '[', ']').and_then(parse_lenient) {
        if let Value::Array(items) = &value {
            if items.is_empty() || items.iter().any(Value::is_object) {
                return Ok(records_from_value(value));
            }
        }
    }

    let line_records: Vec<OracleRecord> = text
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{') && line.ends_with('}'))
        .filter_map(parse_lenient)
        .filter_map(OracleRecord::from_value)
        .collect();
    if !line_records.is_empty() {
        return Ok(line_records);
    }

    Err(OracleError::Malformed(format!(
        "no JSON found in {} chars of output",
        content.len()
    )))
}

/// Flatten a parsed value into records.
///
/// A lone object whose only field is an array of objects
/// (`{"metrics": [...]}`) is unwrapped.
fn records_from_value(value: Value) -> Vec<OracleRecord> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(OracleRecord::from_value)
            .collect(),
        Value::Object(map) => {
            if map.len() == 1 {
                if let Some(Value::Array(items)) = map.values().next() {
                    if !items.is_empty() && items.iter().all(Value::is_object) {
                        return items
                            .iter()
                            .cloned()
                            .filter_map(OracleRecord::from_value)
                            .collect();
                    }
                }
            }
            vec![OracleRecord::from(map)]
        }
        _ => Vec::new(),
    }
}

fn parse_lenient(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }
    let mut repaired = TRAILING_COMMA.replace_all(text, "$1").into_owned();
    if !repaired.contains('"') {
        repaired = repaired.replace('\'', "\"");
    }
    serde_json::from_str(&repaired).ok()
}

fn span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (start < end).then(|| &text[start..=end])
}

fn strip_code_fences(content: &str) -> String {
    if !content.contains("```") {
        return content.to_string();
    }
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

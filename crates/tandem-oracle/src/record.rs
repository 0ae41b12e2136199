//! Structured records returned by the oracle.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::OracleError;

/// One JSON object returned by the oracle.
///
/// Records are untyped at this boundary; consumers decode them into their
/// own typed candidates with [`OracleRecord::decode`] and must not pass the
/// raw map further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OracleRecord(Map<String, Value>);

impl OracleRecord {
    /// Wrap a JSON value if it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Decode the record into a typed candidate.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Malformed`] if the fields do not fit `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, OracleError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| OracleError::Malformed(e.to_string()))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for OracleRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

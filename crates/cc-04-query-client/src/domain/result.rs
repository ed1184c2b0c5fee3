//! # Query Results
//!
//! Raw ledger response kept next to its decoded JSON form.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::Partition;

use super::errors::QueryError;

/// One evaluated query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub partition: Partition,
    /// Bytes exactly as returned by the ledger.
    pub raw: Vec<u8>,
    pub value: Value,
}

impl QueryResult {
    /// Decode `raw`. An empty response is treated as `null`.
    pub fn from_bytes(partition: Partition, raw: Vec<u8>) -> Result<Self, QueryError> {
        let value = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&raw).map_err(|e| QueryError::Decode {
                partition,
                message: e.to_string(),
            })?
        };
        Ok(Self {
            partition,
            raw,
            value,
        })
    }

    /// Pretty JSON with two-space indentation.
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        match self.value.serialize(&mut serializer) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(_) => String::from_utf8_lossy(&self.raw).into_owned(),
        }
    }

    /// Number of documents: array length, 1 for an object, 0 for `null`.
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Array(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode as a list of `R`. A single object becomes a one-element list.
    pub fn records<R: DeserializeOwned>(&self) -> Result<Vec<R>, QueryError> {
        let decode = |value: &Value| {
            serde_json::from_value::<R>(value.clone()).map_err(|e| QueryError::Decode {
                partition: self.partition,
                message: e.to_string(),
            })
        };
        match &self.value {
            Value::Array(items) => items.iter().map(decode).collect(),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![decode(other)?]),
        }
    }
}

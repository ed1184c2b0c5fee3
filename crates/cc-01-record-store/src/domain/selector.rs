//! # Field Selector
//!
//! Equality predicate over an embedded document field. The value is held as
//! data and compared after decoding, never spliced into a query string.

use serde_json::Value;

/// Matches documents whose `field` equals `value`.
///
/// Dotted field names address nested objects, e.g. `Bill.Bill_Number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    field: String,
    value: String,
}

impl FieldSelector {
    /// Select on `field == value`.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Field being filtered.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value being searched for.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// JSON pointer for the field.
    fn pointer(&self) -> String {
        self.field
            .split('.')
            .fold(String::new(), |mut acc, segment| {
                acc.push('/');
                acc.push_str(&segment.replace('~', "~0").replace('/', "~1"));
                acc
            })
    }

    /// True when the document carries the field with exactly this value.
    pub fn matches(&self, document: &Value) -> bool {
        match document.pointer(&self.pointer()) {
            Some(Value::String(found)) => *found == self.value,
            _ => false,
        }
    }
}

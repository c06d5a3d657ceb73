use serde_json::Value;

use crate::errors::DecodeError;

/// The records carried by one blob, in input order.
///
/// A top-level array contributes its elements; any other JSON value is a
/// single record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBatch {
    records: Vec<Value>,
}

impl RecordBatch {
    /// Decodes blob bytes as UTF-8 JSON and normalizes the result.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(bytes)?;
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.records.iter()
    }
}

impl From<Value> for RecordBatch {
    fn from(value: Value) -> Self {
        let records = match value {
            Value::Array(items) => items,
            other => vec![other],
        };
        Self { records }
    }
}

impl IntoIterator for RecordBatch {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordBatch {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

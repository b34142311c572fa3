// src/table/types.rs

use serde_json::Value;

/// One flattened entry, before the value has been coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Position of the entry in the source list.
    pub index: usize,
    pub area: String,
    pub measure: String,
    pub year: String,
    pub value: Value,
}

/// A normalized row: value coerced to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub area: String,
    pub measure: String,
    pub year: String,
    pub value: f64,
}

impl Record {
    /// Measure name as used in the grouping key.
    pub fn measure_key(&self) -> String {
        self.measure.to_lowercase()
    }
}

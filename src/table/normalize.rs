// src/table/normalize.rs

use serde_json::Value;
use tracing::debug;

use super::{RawRecord, Record};
use crate::error::{Error, Result};

fn coerce(raw: &RawRecord) -> Result<f64> {
    let parsed = match &raw.value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| Error::ValueFormat {
        record: raw.index,
        area: raw.area.clone(),
        measure: raw.measure.clone(),
        year: raw.year.clone(),
        raw: match &raw.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    })
}

/// Coerce every value to `f64`, then sort by (area, measure, year).
///
/// The sort is stable and compares all three keys as plain strings, so year
/// `"10"` orders before `"9"`.
pub fn normalize(raw: Vec<RawRecord>) -> Result<Vec<Record>> {
    let mut rows = raw
        .into_iter()
        .map(|r| -> Result<Record> {
            let value = coerce(&r)?;
            Ok(Record {
                area: r.area,
                measure: r.measure,
                year: r.year,
                value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by(|a, b| {
        (a.area.as_str(), a.measure.as_str(), a.year.as_str()).cmp(&(
            b.area.as_str(),
            b.measure.as_str(),
            b.year.as_str(),
        ))
    });

    debug!(rows = rows.len(), "normalized");
    Ok(rows)
}

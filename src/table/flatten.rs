// src/table/flatten.rs

use serde_json::{Map, Value};
use tracing::debug;

use super::RawRecord;
use crate::error::{Error, Result};
use crate::source::{ColumnMap, MeasureSource};

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render a scalar JSON token as text. Strings are taken verbatim, numbers keep
/// their JSON spelling (so integer years have no fractional part).
fn scalar_text(entry: &Map<String, Value>, index: usize, field: &str) -> Result<String> {
    match entry.get(field) {
        None => Err(Error::missing_field(index, field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(Error::bad_field(index, field, kind(other))),
    }
}

/// Extract the nested list named by `columns.list_field` into flat records.
pub fn flatten(doc: &Value, columns: &ColumnMap) -> Result<Vec<RawRecord>> {
    let list_err = |reason: String| Error::Schema {
        record: "document".into(),
        field: columns.list_field.clone(),
        reason,
    };

    let root = doc
        .as_object()
        .ok_or_else(|| list_err(format!("cannot be read from {}", kind(doc))))?;
    let entries = match root.get(&columns.list_field) {
        None => return Err(list_err("is missing".into())),
        Some(Value::Array(a)) => a,
        Some(other) => return Err(list_err(format!("must be an array, found {}", kind(other)))),
    };

    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry = entry.as_object().ok_or_else(|| Error::Schema {
            record: format!("record #{}", index),
            field: columns.list_field.clone(),
            reason: format!("entries must be objects, found {}", kind(entry)),
        })?;

        let area = scalar_text(entry, index, &columns.area)?;
        let measure = match columns.measure_source() {
            MeasureSource::Column(col) => scalar_text(entry, index, col)?,
            MeasureSource::Fixed(name) => name.to_string(),
        };
        let year = scalar_text(entry, index, &columns.year)?;
        let value = entry
            .get(&columns.value)
            .cloned()
            .ok_or_else(|| Error::missing_field(index, &columns.value))?;

        out.push(RawRecord {
            index,
            area,
            measure,
            year,
            value,
        });
    }

    debug!(records = out.len(), list = %columns.list_field, "flattened");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::builtin;
    use anyhow::Result;
    use serde_json::json;

    fn aqi_entry(area: &str, pollutant: &str, year: &str, data: Value) -> Value {
        json!({
            "Area_Code": area,
            "Area_ItemName_ENG": "Somewhere",
            "Pollutant_ItemName_ENG": pollutant,
            "Year_Code": year,
            "Data": data,
        })
    }

    #[test]
    fn flattens_each_entry_in_order() -> Result<()> {
        let doc = json!({
            "odata.metadata": "ignored",
            "value": [
                aqi_entry("W06000011", "NO2", "2015", json!("12.5")),
                aqi_entry("W06000001", "PM10", "2004", json!(3)),
            ]
        });
        let rows = flatten(&doc, &builtin("aqi")?)?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].area, "W06000011");
        assert_eq!(rows[0].measure, "NO2");
        assert_eq!(rows[0].year, "2015");
        assert_eq!(rows[0].value, json!("12.5"));
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].value, json!(3));
        Ok(())
    }

    #[test]
    fn integer_year_keeps_json_spelling() -> Result<()> {
        let mut entry = aqi_entry("A", "SO2", "x", json!(1.0));
        entry["Year_Code"] = json!(2016);
        let rows = flatten(&json!({ "value": [entry] }), &builtin("aqi")?)?;
        assert_eq!(rows[0].year, "2016");
        Ok(())
    }

    #[test]
    fn missing_field_is_named() -> Result<()> {
        let doc = json!({
            "value": [
                aqi_entry("A", "SO2", "2015", json!(1)),
                { "Area_Code": "A", "Pollutant_ItemName_ENG": "SO2", "Data": 2 },
            ]
        });
        match flatten(&doc, &builtin("aqi")?).unwrap_err() {
            Error::Schema { record, field, .. } => {
                assert_eq!(record, "record #1");
                assert_eq!(field, "Year_Code");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn missing_value_field_is_schema_error() -> Result<()> {
        let doc = json!({ "value": [ { "Area_Code": "A", "Pollutant_ItemName_ENG": "SO2", "Year_Code": "2015" } ] });
        match flatten(&doc, &builtin("aqi")?).unwrap_err() {
            Error::Schema { field, .. } => assert_eq!(field, "Data"),
            other => panic!("unexpected error: {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn nested_area_is_rejected() -> Result<()> {
        let mut entry = aqi_entry("A", "SO2", "2015", json!(1));
        entry["Area_Code"] = json!({ "code": "A" });
        let err = flatten(&json!({ "value": [entry] }), &builtin("aqi")?).unwrap_err();
        assert!(err.to_string().contains("an object"), "{}", err);
        Ok(())
    }

    #[test]
    fn missing_list_field_is_schema_error() -> Result<()> {
        let err = flatten(&json!({ "rows": [] }), &builtin("aqi")?).unwrap_err();
        match err {
            Error::Schema { record, field, .. } => {
                assert_eq!(record, "document");
                assert_eq!(field, "value");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(flatten(&json!([1, 2]), &builtin("aqi")?).is_err());
        assert!(flatten(&json!({ "value": 4 }), &builtin("aqi")?).is_err());
        Ok(())
    }

    #[test]
    fn fixed_measure_ignores_entry_keys() -> Result<()> {
        let doc = json!({
            "value": [ { "LocalAuthority_Code": "W06000015", "Year_Code": "2010", "Data": "1.5" } ]
        });
        let rows = flatten(&doc, &builtin("trains")?)?;
        assert_eq!(rows[0].measure, "rail");
        Ok(())
    }
}

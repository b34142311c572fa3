// src/source/mod.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

use crate::error::{Error, Result};

fn default_list_field() -> String {
    "value".into()
}

/// Names of the JSON keys that make up one dataset.
///
/// Exactly one of `measure` (read the measure name from each entry) or
/// `fixed_measure` (every entry belongs to the same measure) must be set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ColumnMap {
    #[serde(default = "default_list_field")]
    pub list_field: String,
    pub area: String,
    #[serde(default)]
    pub measure: Option<String>,
    #[serde(default)]
    pub fixed_measure: Option<String>,
    pub year: String,
    pub value: String,
}

/// Where a record's measure name comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSource<'a> {
    Column(&'a str),
    Fixed(&'a str),
}

impl ColumnMap {
    pub fn measure_source(&self) -> MeasureSource<'_> {
        match (&self.measure, &self.fixed_measure) {
            (_, Some(fixed)) => MeasureSource::Fixed(fixed),
            (Some(col), None) => MeasureSource::Column(col),
            // validate() rejects this; fall back to the conventional column name
            (None, None) => MeasureSource::Column("Measure_Code"),
        }
    }

    fn validate(&self, origin: &str) -> Result<()> {
        let cfg_err = |message: &str| Error::Config {
            path: origin.to_string(),
            message: message.to_string(),
        };
        match (&self.measure, &self.fixed_measure) {
            (Some(_), Some(_)) => Err(cfg_err("set only one of `measure` and `fixed_measure`")),
            (None, None) => Err(cfg_err("one of `measure` or `fixed_measure` is required")),
            _ => Ok(()),
        }?;
        for (name, v) in [
            ("list_field", &self.list_field),
            ("area", &self.area),
            ("year", &self.year),
            ("value", &self.value),
        ] {
            if v.trim().is_empty() {
                return Err(cfg_err(&format!("`{}` must not be empty", name)));
            }
        }
        Ok(())
    }
}

/// A dataset shipped with the tool: its short code and column map.
struct Builtin {
    code: &'static str,
    name: &'static str,
    area: &'static str,
    measure: Option<&'static str>,
    fixed_measure: Option<&'static str>,
}

impl Builtin {
    // Stats Wales JSON exports all share the `value` list, `Year_Code` and `Data`.
    fn column_map(&self) -> ColumnMap {
        ColumnMap {
            list_field: default_list_field(),
            area: self.area.into(),
            measure: self.measure.map(Into::into),
            fixed_measure: self.fixed_measure.map(Into::into),
            year: "Year_Code".into(),
            value: "Data".into(),
        }
    }
}

const AQI: Builtin = Builtin {
    code: "aqi",
    name: "Air Quality Indicators",
    area: "Area_Code",
    measure: Some("Pollutant_ItemName_ENG"),
    fixed_measure: None,
};

const BUILTINS: &[Builtin] = &[
    Builtin {
        code: "popden",
        name: "Population density",
        area: "Localauthority_Code",
        measure: Some("Measure_Code"),
        fixed_measure: None,
    },
    Builtin {
        code: "biz",
        name: "Active Businesses",
        area: "Area_Code",
        measure: Some("Variable_Code"),
        fixed_measure: None,
    },
    AQI,
    Builtin {
        code: "trains",
        name: "Rail passenger journeys",
        area: "LocalAuthority_Code",
        measure: None,
        fixed_measure: Some("rail"),
    },
];

/// Short codes of the built-in datasets, with their descriptive names.
pub fn builtin_codes() -> impl Iterator<Item = (&'static str, &'static str)> {
    BUILTINS.iter().map(|b| (b.code, b.name))
}

/// Column map of a built-in dataset, looked up case-insensitively by code.
pub fn builtin(code: &str) -> Result<ColumnMap> {
    let b = BUILTINS
        .iter()
        .find(|b| b.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| Error::Config {
            path: "<builtin>".into(),
            message: format!(
                "unknown dataset `{}` (known: {})",
                code,
                BUILTINS.iter().map(|b| b.code).collect::<Vec<_>>().join(", ")
            ),
        })?;
    Ok(b.column_map())
}

/// The air quality dataset.
impl Default for ColumnMap {
    fn default() -> Self {
        AQI.column_map()
    }
}

/// Load a column map from a YAML file.
pub fn load_column_map<P: AsRef<Path>>(path: P) -> Result<ColumnMap> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| Error::Config {
        path: origin.clone(),
        message: e.to_string(),
    })?;
    let map: ColumnMap = serde_yaml::from_str(&text).map_err(|e| Error::Config {
        path: origin.clone(),
        message: e.to_string(),
    })?;
    map.validate(&origin)?;
    debug!(path = %origin, ?map, "loaded column map");
    Ok(map)
}

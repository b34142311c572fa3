// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a generation run. All variants are fatal.
#[derive(Error, Debug)]
pub enum Error {
    /// Input file missing, unreadable or not valid JSON.
    #[error("data format error in {}: {}", .path.display(), .source)]
    DataFormat {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A record (or the document itself) lacks an expected field, or the field has the wrong shape.
    #[error("schema error at {record}: field `{field}` {reason}")]
    Schema {
        record: String,
        field: String,
        reason: String,
    },

    /// A value field that cannot be coerced to a floating point number.
    #[error(
        "value format error at record #{record} (area `{area}`, measure `{measure}`, year `{year}`): `{raw}` is not a number"
    )]
    ValueFormat {
        record: usize,
        area: String,
        measure: String,
        year: String,
        raw: String,
    },

    /// Column map could not be loaded or named an unknown dataset.
    #[error("config error in {path}: {message}")]
    Config { path: String, message: String },

    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn missing_field(record: usize, field: &str) -> Self {
        Error::Schema {
            record: format!("record #{}", record),
            field: field.to_string(),
            reason: "is missing".into(),
        }
    }

    pub(crate) fn bad_field(record: usize, field: &str, found: &str) -> Self {
        Error::Schema {
            record: format!("record #{}", record),
            field: field.to_string(),
            reason: format!("must be a scalar, found {}", found),
        }
    }
}

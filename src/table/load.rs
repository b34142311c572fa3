// src/table/load.rs

use serde_json::Value;
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

use crate::error::{Error, Result};

/// Read and parse the JSON document at `path`.
///
/// A missing file and malformed JSON both surface as [`Error::DataFormat`].
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let data_err = |e: Box<dyn std::error::Error + Send + Sync>| Error::DataFormat {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::open(path).map_err(|e| data_err(e.into()))?;
    let doc: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| data_err(e.into()))?;

    debug!(
        top_level_keys = doc.as_object().map(|o| o.len()).unwrap_or(0),
        "parsed document"
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_object_document() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, r#"{{"value": [{{"Area_Code": "W06000001"}}]}}"#)?;
        let doc = load_document(tmp.path())?;
        assert_eq!(doc["value"][0]["Area_Code"], "W06000001");
        Ok(())
    }

    #[test]
    fn missing_file_is_data_format_error() {
        let err = load_document("/no/such/envi0201.json").unwrap_err();
        match err {
            Error::DataFormat { path, .. } => {
                assert!(path.ends_with("envi0201.json"))
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_data_format_error() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        write!(tmp, r#"{{"value": [ "#)?;
        let err = load_document(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { .. }));
        Ok(())
    }
}

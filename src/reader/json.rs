//! JSON payload reader
//!
//! Materializes records from the JSON shapes the query backend produces:
//!
//! - a bare array of row objects: `[{"name": "A", "amt": 10}, ...]`
//! - a result envelope: `{"results": [...]}`
//! - the backend's success envelope: `{"data": {"results": [...]}}`
//!
//! Rows must be objects with scalar cells; nested arrays or objects are
//! rejected, since the inference engine has no meaning for them.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::reader::Reader;
use crate::record::{Record, Scalar};
use crate::{Result, VizhintError};

/// Where the JSON payload comes from.
enum Source {
    Text(String),
    File(PathBuf),
    Stdin,
}

/// Reader for JSON row payloads.
pub struct JsonReader {
    source: Source,
}

impl JsonReader {
    /// Read from an in-memory JSON string.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: Source::Text(text.into()),
        }
    }

    /// Read from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
        }
    }

    /// Read the payload from standard input.
    pub fn from_stdin() -> Self {
        Self {
            source: Source::Stdin,
        }
    }

    fn payload(&self) -> Result<String> {
        match &self.source {
            Source::Text(text) => Ok(text.clone()),
            Source::File(path) => std::fs::read_to_string(path).map_err(|e| {
                VizhintError::InputError(format!("Failed to read '{}': {}", path.display(), e))
            }),
            Source::Stdin => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .map_err(|e| VizhintError::InputError(format!("Failed to read stdin: {}", e)))?;
                Ok(buf)
            }
        }
    }
}

impl Reader for JsonReader {
    fn read(&self) -> Result<Vec<Record>> {
        let payload = self.payload()?;
        let value: Value = serde_json::from_str(&payload)
            .map_err(|e| VizhintError::ReaderError(format!("Invalid JSON payload: {}", e)))?;

        let rows = extract_rows(&value)?;
        let records = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| row_to_record(idx, row))
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = records.len(), "materialized JSON record batch");
        Ok(records)
    }
}

/// Locate the row array inside the payload, unwrapping known envelopes.
fn extract_rows(value: &Value) -> Result<&Vec<Value>> {
    if let Value::Array(rows) = value {
        return Ok(rows);
    }
    if let Value::Object(obj) = value {
        // `{"results": [...]}` or `{"data": {"results": [...]}}`
        let nested = obj
            .get("results")
            .or_else(|| obj.get("data").and_then(|d| d.get("results")));
        if let Some(Value::Array(rows)) = nested {
            return Ok(rows);
        }
    }
    Err(VizhintError::ReaderError(
        "Expected a JSON array of rows or a results envelope".to_string(),
    ))
}

fn row_to_record(idx: usize, row: &Value) -> Result<Record> {
    let Value::Object(obj) = row else {
        return Err(VizhintError::ReaderError(format!(
            "Row {} is not a JSON object",
            idx
        )));
    };

    obj.iter()
        .map(|(column, cell)| Ok((column.clone(), cell_to_scalar(idx, column, cell)?)))
        .collect()
}

fn cell_to_scalar(idx: usize, column: &str, cell: &Value) -> Result<Scalar> {
    match cell {
        Value::Null => Ok(Scalar::Null),
        Value::Bool(b) => Ok(Scalar::Boolean(*b)),
        Value::Number(n) => Ok(Scalar::Number(n.as_f64().unwrap_or(f64::NAN))),
        Value::String(s) => Ok(Scalar::String(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(VizhintError::ReaderError(format!(
            "Row {} column '{}' holds a nested value, expected a scalar",
            idx, column
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array() {
        let reader = JsonReader::from_text(r#"[{"name": "A", "amt": 10}, {"name": "B", "amt": 20}]"#);
        let records = reader.read().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name"), Some(&Scalar::String("A".to_string())));
        assert_eq!(records[1].get("amt"), Some(&Scalar::Number(20.0)));
    }

    #[test]
    fn test_results_envelope() {
        let reader = JsonReader::from_text(r#"{"results": [{"a": 1, "b": "x"}]}"#);
        let records = reader.read().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&Scalar::Number(1.0)));
    }

    #[test]
    fn test_backend_success_envelope() {
        let reader = JsonReader::from_text(
            r#"{"success": true, "data": {"sql": "SELECT 1", "results": [{"a": null}]}}"#,
        );
        let records = reader.read().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("a"), Some(&Scalar::Null));
    }

    #[test]
    fn test_empty_array_is_empty_batch() {
        let reader = JsonReader::from_text("[]");
        assert!(reader.read().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_reader_error() {
        let reader = JsonReader::from_text("{not json");
        let err = reader.read().unwrap_err();
        assert!(err.to_string().contains("Invalid JSON payload"));
    }

    #[test]
    fn test_non_array_payload_rejected() {
        let reader = JsonReader::from_text(r#"{"message": "ok"}"#);
        let err = reader.read().unwrap_err();
        assert!(err.to_string().contains("results envelope"));
    }

    #[test]
    fn test_non_object_row_rejected() {
        let reader = JsonReader::from_text(r#"[1, 2, 3]"#);
        let err = reader.read().unwrap_err();
        assert!(err.to_string().contains("Row 0 is not a JSON object"));
    }

    #[test]
    fn test_nested_cell_rejected() {
        let reader = JsonReader::from_text(r#"[{"a": {"nested": true}, "b": 1}]"#);
        let err = reader.read().unwrap_err();
        assert!(err.to_string().contains("nested value"));
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let reader = JsonReader::from_path("/nonexistent/rows.json");
        let err = reader.read().unwrap_err();
        assert!(matches!(err, VizhintError::InputError(_)));
    }

    #[test]
    fn test_column_order_preserved() {
        let reader = JsonReader::from_text(r#"[{"z": 1, "a": 2, "m": 3}]"#);
        let records = reader.read().unwrap();
        let cols: Vec<&str> = records[0].columns().collect();
        assert_eq!(cols, vec!["z", "a", "m"]);
    }
}

//! Dataset loading for the in-memory source.
//!
//! Accepts either a bare JSON array of records or an object wrapping
//! them under `"items"` (the shape a list endpoint dump usually has).

use crate::model::error::DatasetError;
use serde_json::Value;
use std::path::Path;

/// Load records from a JSON file.
///
/// # Errors
///
/// Returns `DatasetError::NotFound` if the file does not exist,
/// `DatasetError::Parse` for invalid JSON, and `DatasetError::NotAnArray`
/// when the JSON has neither accepted shape.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<Value>, DatasetError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| DatasetError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(DatasetError::NotAnArray {
                path: path.to_path_buf(),
            }),
        },
        _ => Err(DatasetError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

//! JSON encoding of output records.

use crate::error::{IoError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::Path;

/// Encodes `data` as compact JSON.
///
/// # Returns
/// The JSON text, or `IoError::Serialization` when `data` cannot be encoded.
pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string(data).map_err(|e| IoError::serialization(e.to_string()))
}

/// Encodes `data` as indented JSON, the layout used for run output files.
///
/// # Returns
/// The JSON text, or `IoError::Serialization` on failure.
pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| IoError::serialization(e.to_string()))
}

/// Decodes a JSON document.
///
/// # Parameters
/// - `json`: The document text
///
/// # Returns
/// The decoded value. Blank input is reported as `IoError::EmptyInput`
/// rather than a parse error; anything else that fails is `IoError::Json`.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    if json.trim().is_empty() {
        return Err(IoError::EmptyInput("JSON document".to_string()));
    }
    Ok(serde_json::from_str(json)?)
}

/// Writes `data` as pretty JSON to `path`.
///
/// The text goes to a `.partial` sibling first and is renamed into place, so
/// readers never see a half-written file.
///
/// # Parameters
/// - `data`: The value to write
/// - `path`: Destination file
///
/// # Returns
/// `Ok(())`, or the filesystem error wrapped with the destination path.
pub fn write_json_file<T: Serialize, P: AsRef<Path>>(data: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = to_json_pretty(data)?;
    let partial = path.with_extension("partial");
    fs::write(&partial, json)
        .and_then(|_| fs::rename(&partial, path))
        .map_err(|e| IoError::from(e).with_context(format!("writing {}", path.display())))
}

/// Reads and decodes a JSON file written by [`write_json_file`].
///
/// # Parameters
/// - `path`: The file to read
///
/// # Returns
/// The decoded value, `IoError::NotFound` when `path` does not exist, or the
/// underlying error wrapped with the path.
pub fn read_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::not_found(path));
    }
    let json = fs::read_to_string(path)
        .map_err(|e| IoError::from(e).with_context(format!("reading {}", path.display())))?;
    from_json(&json).map_err(|e| e.with_context(format!("decoding {}", path.display())))
}

//! JSON document loading and writing
//!
//! Documents are kept as dynamic `serde_json::Value` trees so the fixer can
//! round-trip fields it knows nothing about. The `preserve_order` feature
//! keeps object keys in construction order across a read-modify-write cycle.

use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// A failure to read or parse a single document.
///
/// Both engines record these per file and continue with the rest of the run.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),
}

/// Load a JSON document from disk.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)?;
    Ok(value)
}

/// Write a JSON document back to disk.
///
/// Keys keep their in-memory order, indentation is 2 spaces, and a trailing
/// newline is appended.
pub fn write_document(path: &Path, value: &Value) -> Result<(), DocumentError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

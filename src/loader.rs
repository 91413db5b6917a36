//! Reading tree descriptor files from disk
//!
//! The loader only checks what it needs to hand a JSON value to the builder:
//! the file name, the file size, and that the contents parse as JSON.

use std::fs::File;
use std::io::{self, BufReader};
use std::ops::Deref;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;

/// Default maximum descriptor size (16MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Configuration for the file loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Files larger than this many bytes are rejected before reading.
    pub max_file_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// A parsed descriptor.
///
/// Nesting is unbounded, so dropping releases nested arrays and objects
/// from a work list instead of through the recursive drop of `Value`.
#[derive(Debug, Default)]
pub struct JsonDocument(Value);

impl JsonDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }
}

impl Deref for JsonDocument {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

impl Drop for JsonDocument {
    fn drop(&mut self) {
        let mut pending = vec![std::mem::take(&mut self.0)];
        while let Some(value) = pending.pop() {
            match value {
                Value::Array(items) => pending.extend(items),
                Value::Object(fields) => pending.extend(fields.into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

/// Check whether a path names a `.json` file, ignoring ASCII case.
///
/// Compares raw bytes so names that are not valid UTF-8 still qualify.
pub fn has_json_extension(path: &Path) -> bool {
    const SUFFIX: &[u8] = b".json";
    path.file_name().is_some_and(|name| {
        let bytes = name.as_encoded_bytes();
        bytes.len() >= SUFFIX.len() && bytes[bytes.len() - SUFFIX.len()..].eq_ignore_ascii_case(SUFFIX)
    })
}

/// Read and parse a JSON file with the default configuration.
pub fn read_json_file(path: &Path) -> Result<JsonDocument, LoadError> {
    read_json_file_with(path, &LoaderConfig::default())
}

/// Read and parse a JSON file.
///
/// Returns the parsed value whatever its shape; tree validation is left to
/// the builder.
pub fn read_json_file_with(
    path: &Path,
    config: &LoaderConfig,
) -> Result<JsonDocument, LoadError> {
    if !has_json_extension(path) {
        return Err(LoadError::Extension(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let metadata = file.metadata().map_err(|e| io_error(path, e))?;
    if metadata.is_dir() {
        return Err(LoadError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("is a directory"),
        });
    }
    if metadata.len() > config.max_file_size {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: config.max_file_size,
        });
    }

    debug!(path = %path.display(), bytes = metadata.len(), "parsing tree descriptor");
    Ok(parse_json_reader(BufReader::new(file))?)
}

/// Parse JSON text with unbounded nesting depth.
pub fn parse_json_str(text: &str) -> Result<JsonDocument, LoadError> {
    Ok(parse_json_reader(text.as_bytes())?)
}

fn parse_json_reader(reader: impl io::Read) -> serde_json::Result<JsonDocument> {
    let mut de = serde_json::Deserializer::from_reader(reader);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    let document = JsonDocument::new(value);
    de.end()?;
    Ok(document)
}

fn io_error(path: &Path, source: io::Error) -> LoadError {
    if source.kind() == io::ErrorKind::NotFound {
        LoadError::NotFound(path.to_path_buf())
    } else {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

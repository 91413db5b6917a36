//! Error types for loading and building trees

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while turning a file path into a parsed JSON value.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file does not have a .json extension: {0}")]
    Extension(PathBuf),

    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file is too large: {path} ({size} bytes, limit {limit})")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("file contains invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Stable name of the failure kind, used as the diagnostic label.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Extension(_) => "ExtensionError",
            LoadError::NotFound(_) | LoadError::Io { .. } => "FileNotFoundError",
            LoadError::TooLarge { .. } => "FileTooLargeError",
            LoadError::Parse(_) => "ParseError",
        }
    }
}

/// What was wrong with a node descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    MissingValue,
    NonScalarValue,
    NotAnObject,
}

impl BuildErrorKind {
    fn describe(self) -> &'static str {
        match self {
            BuildErrorKind::MissingValue => "node has no \"value\" field",
            BuildErrorKind::NonScalarValue => "node \"value\" must be a string, number, boolean or null",
            BuildErrorKind::NotAnObject => "node must be a JSON object",
        }
    }
}

/// A node descriptor that cannot be turned into a tree node.
///
/// `path` locates the node from the document root, e.g. `$.left.right`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} at {path}", .kind.describe())]
pub struct BuildError {
    pub path: String,
    pub kind: BuildErrorKind,
}

impl BuildError {
    pub fn new(path: impl Into<String>, kind: BuildErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        "StructureError"
    }
}

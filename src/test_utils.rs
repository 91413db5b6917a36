//! Test utilities for writing descriptor fixtures to a temporary directory.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding fixture files.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestFiles {
    dir: TempDir,
}

impl TestFiles {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}

impl Default for TestFiles {
    fn default() -> Self {
        Self::new()
    }
}

/// Descriptor for a complete tree with `depth` levels, values numbered in
/// breadth-first order starting at 1.
pub fn complete_tree_json(depth: u32) -> String {
    fn node(index: u64, depth: u32) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("value".to_string(), index.into());
        if depth > 1 {
            obj.insert("left".to_string(), node(index * 2, depth - 1));
            obj.insert("right".to_string(), node(index * 2 + 1, depth - 1));
        }
        serde_json::Value::Object(obj)
    }
    node(1, depth.max(1)).to_string()
}

/// Descriptor for a tree of `depth` nodes where each node has only a left
/// child, values numbered from 1 at the root.
///
/// Built as text so arbitrarily deep fixtures need no recursion.
pub fn left_spine_json(depth: usize) -> String {
    let depth = depth.max(1);
    let mut json = String::new();
    for value in 1..depth {
        json.push_str(&format!(r#"{{"value": {}, "left": "#, value));
    }
    json.push_str(&format!(r#"{{"value": {}}}"#, depth));
    json.push_str(&"}".repeat(depth - 1));
    json
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_tree_json() {
        let value: serde_json::Value = serde_json::from_str(&complete_tree_json(2)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"value": 1, "left": {"value": 2}, "right": {"value": 3}})
        );
    }

    #[test]
    fn test_left_spine_json() {
        let value: serde_json::Value = serde_json::from_str(&left_spine_json(3)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"value": 1, "left": {"value": 2, "left": {"value": 3}}})
        );
        assert_eq!(left_spine_json(1), r#"{"value": 1}"#);
    }
}

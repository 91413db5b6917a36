//! jsontree - Load a binary tree from a JSON descriptor and print it

pub mod error;
pub mod loader;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{BuildError, BuildErrorKind, LoadError};
pub use loader::{JsonDocument, LoaderConfig, parse_json_str, read_json_file, read_json_file_with};
pub use output::{OutputConfig, PLACEHOLDER, TreeFormatter, print_json};
pub use tree::{NodeValue, Side, TreeNode, build_tree};

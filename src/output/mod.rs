//! Tree formatting and display
//!
//! - `config` - Output configuration types
//! - `tree` - Console formatter with box-drawing connectors
//! - `json` - JSON output

mod config;
mod json;
mod tree;

pub use config::OutputConfig;
pub use json::{print_json, to_json_string};
pub use tree::{PLACEHOLDER, TreeFormatter};

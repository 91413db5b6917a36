//! JSON output formatting

use std::io;

use crate::tree::TreeNode;

/// Serialize a tree back to its descriptor form, `null` when there is no tree.
pub fn to_json_string(node: Option<&TreeNode>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&node)
}

/// Print tree as pretty-printed JSON to stdout.
pub fn print_json(node: Option<&TreeNode>) -> io::Result<()> {
    let json = to_json_string(node).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

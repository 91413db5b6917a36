//! Binary tree model and construction from JSON descriptors
//!
//! - `node`: the owned `TreeNode` type and its scalar `NodeValue`
//! - `builder`: depth-first conversion from a parsed `serde_json::Value`
//! - `stack`: stack growth shared by every recursive walk

mod builder;
mod node;
mod stack;

pub use builder::build_tree;
pub use node::{NodeValue, Side, TreeNode};

pub(crate) use stack::with_stack;

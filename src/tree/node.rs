//! In-memory binary tree types

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Number;

use super::stack::with_stack;

/// Scalar payload of a tree node.
///
/// Serializes back to the JSON scalar it was read from.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeValue::Null => f.write_str("null"),
            NodeValue::Bool(b) => write!(f, "{}", b),
            NodeValue::Number(n) => write!(f, "{}", n),
            NodeValue::String(s) => f.write_str(s),
        }
    }
}

impl From<i32> for NodeValue {
    fn from(n: i32) -> Self {
        NodeValue::Number(n.into())
    }
}

impl From<bool> for NodeValue {
    fn from(b: bool) -> Self {
        NodeValue::Bool(b)
    }
}

impl From<&str> for NodeValue {
    fn from(s: &str) -> Self {
        NodeValue::String(s.to_string())
    }
}

/// Which child slot a node occupies under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Descriptor key for this side.
    pub fn key(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Short tag used when rendering.
    pub fn tag(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }
}

/// A binary tree node that owns its children.
///
/// Serializes to the descriptor format, omitting absent children. Walks that
/// recurse into children (equality, serialization, drop) grow the stack as
/// needed, so arbitrarily deep trees are safe.
#[derive(Debug)]
pub struct TreeNode {
    pub value: NodeValue,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(value: impl Into<NodeValue>) -> Self {
        Self {
            value: value.into(),
            left: None,
            right: None,
        }
    }

    pub fn with_left(mut self, child: TreeNode) -> Self {
        self.left = Some(Box::new(child));
        self
    }

    pub fn with_right(mut self, child: TreeNode) -> Self {
        self.right = Some(Box::new(child));
        self
    }

    pub fn child(&self, side: Side) -> Option<&TreeNode> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    /// Present children, left before right.
    pub fn children(&self) -> impl Iterator<Item = (Side, &TreeNode)> {
        [Side::Left, Side::Right]
            .into_iter()
            .filter_map(move |side| self.child(side).map(|c| (side, c)))
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        with_stack(|| 1 + self.children().map(|(_, c)| c.node_count()).sum::<usize>())
    }

    /// Number of levels in this subtree; a leaf has height 1.
    pub fn height(&self) -> usize {
        with_stack(|| 1 + self.children().map(|(_, c)| c.height()).max().unwrap_or(0))
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        with_stack(|| {
            self.value == other.value && self.left == other.left && self.right == other.right
        })
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        with_stack(|| {
            let fields = 1 + self.children().count();
            let mut node = serializer.serialize_struct("TreeNode", fields)?;
            node.serialize_field("value", &self.value)?;
            for (side, child) in self.children() {
                node.serialize_field(side.key(), child)?;
            }
            node.end()
        })
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let children = (self.left.take(), self.right.take());
        if children.0.is_some() || children.1.is_some() {
            with_stack(move || drop(children));
        }
    }
}

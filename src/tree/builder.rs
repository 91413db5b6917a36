//! Building trees from parsed descriptors

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{BuildError, BuildErrorKind};

use super::node::{NodeValue, Side, TreeNode};
use super::stack::with_stack;

const VALUE_KEY: &str = "value";

/// Build a tree from a parsed descriptor.
///
/// `None` and a `null` root both mean there is nothing to build and yield
/// `Ok(None)`. A `left`/`right` key that is missing or `null` leaves that
/// child empty.
pub fn build_tree(data: Option<&Value>) -> Result<Option<TreeNode>, BuildError> {
    let Some(data) = data else {
        return Ok(None);
    };
    if data.is_null() {
        return Ok(None);
    }

    let mut path = String::from("$");
    let tree = build_node(data, &mut path)?;
    debug!(
        nodes = tree.node_count(),
        height = tree.height(),
        "built tree"
    );
    Ok(Some(tree))
}

fn build_node(data: &Value, path: &mut String) -> Result<TreeNode, BuildError> {
    let Value::Object(fields) = data else {
        return Err(BuildError::new(path.as_str(), BuildErrorKind::NotAnObject));
    };
    trace!(path = %path, "building node");

    let value = match fields.get(VALUE_KEY) {
        Some(v) => scalar(v).ok_or_else(|| {
            BuildError::new(path.as_str(), BuildErrorKind::NonScalarValue)
        })?,
        None => return Err(BuildError::new(path.as_str(), BuildErrorKind::MissingValue)),
    };

    Ok(TreeNode {
        value,
        left: build_child(fields, Side::Left, path)?,
        right: build_child(fields, Side::Right, path)?,
    })
}

fn build_child(
    fields: &Map<String, Value>,
    side: Side,
    path: &mut String,
) -> Result<Option<Box<TreeNode>>, BuildError> {
    let child = match fields.get(side.key()) {
        None | Some(Value::Null) => return Ok(None),
        Some(child) => child,
    };

    let parent_len = path.len();
    path.push('.');
    path.push_str(side.key());
    let node = with_stack(|| build_node(child, path));
    path.truncate(parent_len);

    node.map(|n| Some(Box::new(n)))
}

fn scalar(value: &Value) -> Option<NodeValue> {
    match value {
        Value::Null => Some(NodeValue::Null),
        Value::Bool(b) => Some(NodeValue::Bool(*b)),
        Value::Number(n) => Some(NodeValue::Number(n.clone())),
        Value::String(s) => Some(NodeValue::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_json_str;
    use crate::test_utils::left_spine_json;
    use serde_json::json;

    fn build(value: Value) -> Result<Option<TreeNode>, BuildError> {
        build_tree(Some(&value))
    }

    #[test]
    fn test_absent_input_builds_nothing() {
        assert_eq!(build_tree(None), Ok(None));
    }

    #[test]
    fn test_null_root_builds_nothing() {
        assert_eq!(build(Value::Null), Ok(None));
    }

    #[test]
    fn test_single_node() {
        let tree = build(json!({"value": 5})).unwrap().unwrap();
        assert_eq!(tree, TreeNode::leaf(5));
    }

    #[test]
    fn test_nested_shape() {
        let tree = build(json!({
            "value": 1,
            "left": {"value": 2},
            "right": {"value": 3, "left": {"value": 4}}
        }))
        .unwrap()
        .unwrap();

        let expected = TreeNode::leaf(1)
            .with_left(TreeNode::leaf(2))
            .with_right(TreeNode::leaf(3).with_left(TreeNode::leaf(4)));
        assert_eq!(tree, expected);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_right_only_child_keeps_its_side() {
        let tree = build(json!({"value": "a", "right": {"value": "b"}}))
            .unwrap()
            .unwrap();
        assert!(tree.left.is_none());
        assert_eq!(tree.right.as_ref().unwrap().value, NodeValue::from("b"));
    }

    #[test]
    fn test_scalar_values_are_kept() {
        let tree = build(json!({
            "value": "root",
            "left": {"value": true},
            "right": {"value": null, "left": {"value": 1.5}}
        }))
        .unwrap()
        .unwrap();

        assert_eq!(tree.value, NodeValue::from("root"));
        assert_eq!(tree.left.as_ref().unwrap().value, NodeValue::Bool(true));
        let right = tree.right.as_ref().unwrap();
        assert_eq!(right.value, NodeValue::Null);
        assert_eq!(right.left.as_ref().unwrap().value.to_string(), "1.5");
    }

    #[test]
    fn test_null_child_is_no_child() {
        let tree = build(json!({"value": 1, "left": null, "right": {"value": 2}}))
            .unwrap()
            .unwrap();
        assert!(tree.left.is_none());
        assert!(tree.right.is_some());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let tree = build(json!({"value": 1, "label": "x", "children": []}))
            .unwrap()
            .unwrap();
        assert!(tree.is_leaf());
    }

    #[test]
    fn test_missing_value_reports_path() {
        let err = build(json!({
            "value": 1,
            "right": {"value": 3, "left": {"name": "oops"}}
        }))
        .unwrap_err();
        assert_eq!(err.kind, BuildErrorKind::MissingValue);
        assert_eq!(err.path, "$.right.left");
    }

    #[test]
    fn test_missing_value_at_root() {
        let err = build(json!({"left": {"value": 1}})).unwrap_err();
        assert_eq!(err, BuildError::new("$", BuildErrorKind::MissingValue));
    }

    #[test]
    fn test_non_scalar_value() {
        let err = build(json!({"value": [1, 2]})).unwrap_err();
        assert_eq!(err.kind, BuildErrorKind::NonScalarValue);

        let err = build(json!({"value": 1, "left": {"value": {"nested": true}}})).unwrap_err();
        assert_eq!(err, BuildError::new("$.left", BuildErrorKind::NonScalarValue));
    }

    #[test]
    fn test_non_object_nodes() {
        let err = build(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, BuildError::new("$", BuildErrorKind::NotAnObject));

        let err = build(json!({"value": 1, "left": 2})).unwrap_err();
        assert_eq!(err, BuildError::new("$.left", BuildErrorKind::NotAnObject));
    }

    #[test]
    fn test_build_is_repeatable() {
        let data = json!({"value": 1, "left": {"value": 2, "right": {"value": 3}}});
        let first = build_tree(Some(&data)).unwrap();
        let second = build_tree(Some(&data)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_tree_rebuilds_identically() {
        let data = json!({
            "value": 10,
            "left": {"value": 5, "left": {"value": 2}, "right": {"value": 7}},
            "right": {"value": 15, "right": {"value": 20}}
        });
        let tree = build(data.clone()).unwrap().unwrap();
        let reserialized = serde_json::to_value(&tree).unwrap();
        assert_eq!(reserialized, data);
        assert_eq!(build(reserialized).unwrap().unwrap(), tree);
    }

    #[test]
    fn test_deep_spine_builds() {
        let depth = 100_000;
        let document = parse_json_str(&left_spine_json(depth)).unwrap();
        let tree = build_tree(Some(&*document)).unwrap().unwrap();
        assert_eq!(tree.node_count(), depth);
        assert_eq!(tree.height(), depth);
    }

    #[test]
    fn test_deep_error_reports_full_path() {
        let depth = 500;
        let json = left_spine_json(depth).replacen(&format!(r#""value": {}"#, depth), r#""name": 0"#, 1);
        let document = parse_json_str(&json).unwrap();
        let err = build_tree(Some(&*document)).unwrap_err();
        assert_eq!(err.kind, BuildErrorKind::MissingValue);
        assert_eq!(err.path, format!("${}", ".left".repeat(depth - 1)));
    }
}

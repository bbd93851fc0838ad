//! RFC 6902 JSON Patch rendering.
//!
//! Paths are RFC 6901 JSON pointers built while walking the tree: object
//! keys are escaped (`~` as `~0`, `/` as `~1`) and array elements use their
//! index. The document root is the empty pointer. Multiline strings are
//! replaced whole rather than line by line.

use serde::Serialize;

use crate::diff::{DiffNode, Status};
use crate::error::{DiffnestError, Result};
use crate::value::Value;

/// A single patch operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOp {
    pub op: &'static str,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Collect the patch operations for a diff forest, in tree order.
pub fn patch_operations(results: &[DiffNode<'_>]) -> Vec<PatchOp> {
    let mut ops = Vec::new();
    for result in results {
        collect(result, String::new(), &mut ops);
    }
    ops
}

/// Render the patch as a pretty-printed JSON array (`[]` when empty).
///
/// # Errors
///
/// Returns [`DiffnestError::Patch`] if serialization fails.
pub fn render_patch(results: &[DiffNode<'_>]) -> Result<String> {
    let ops = patch_operations(results);
    if ops.is_empty() {
        return Ok("[]\n".to_string());
    }
    let mut json =
        serde_json::to_string_pretty(&ops).map_err(|e| DiffnestError::Patch(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

fn collect(node: &DiffNode<'_>, pointer: String, ops: &mut Vec<PatchOp>) {
    match node.status {
        Status::Same => {}
        Status::Modified if !node.children.is_empty() && !node.is_multiline() => {
            let in_array = matches!(node.from_value(), Some(Value::Array(_)));
            for child in &node.children {
                let segment = if in_array {
                    child
                        .key()
                        .trim_start_matches('[')
                        .trim_end_matches(']')
                        .to_string()
                } else {
                    escape(child.key())
                };
                collect(child, format!("{}/{}", pointer, segment), ops);
            }
        }
        Status::Modified => ops.push(PatchOp {
            op: "replace",
            path: pointer,
            value: Some(json_value(node.to_value())),
        }),
        Status::Added => ops.push(PatchOp {
            op: "add",
            path: pointer,
            value: Some(json_value(node.to_value())),
        }),
        Status::Deleted => ops.push(PatchOp {
            op: "remove",
            path: pointer,
            value: None,
        }),
    }
}

fn json_value(value: Option<&Value>) -> serde_json::Value {
    value.map(serde_json::Value::from).unwrap_or(serde_json::Value::Null)
}

fn escape(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

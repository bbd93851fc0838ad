//! Diff result tree and comparison options.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// How two (sub)values relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Same,
    Modified,
    Added,
    Deleted,
}

/// Strategy used to reconcile two arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArrayStrategy {
    /// Compare elements position by position.
    Index,
    /// Pair elements by best content match, ignoring order.
    #[default]
    Value,
}

/// Tunable comparison behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffOptions {
    /// A key missing on one side may be treated as omitted.
    pub ignore_empty_fields: bool,
    /// `0`, `false`, `""`, `[]`, `{}` and `null` count as absent.
    pub ignore_zero_values: bool,
    /// Object keys differing only in case share a slot.
    pub ignore_key_case: bool,
    /// Strings differing only in case are equal.
    pub ignore_value_case: bool,
    pub array_strategy: ArrayStrategy,
}

/// One node of the diff tree.
///
/// `from`/`to` borrow the compared input where possible. Synthetic values
/// (the per-line strings of a multiline diff) are owned.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffNode<'a> {
    pub status: Status,
    /// Segments from the comparison root: object keys, `[i]` array indices
    /// or `line i` labels.
    pub path: Vec<String>,
    pub from: Option<Cow<'a, Value>>,
    pub to: Option<Cow<'a, Value>>,
    /// Populated only for compared containers and multiline strings.
    pub children: Vec<DiffNode<'a>>,
    /// Recursively summed count of atomic differences. Used as a matching
    /// cost, never for display.
    pub diff_count: usize,
}

impl<'a> DiffNode<'a> {
    pub(crate) fn leaf(
        status: Status,
        path: Vec<String>,
        from: Option<&'a Value>,
        to: Option<&'a Value>,
        diff_count: usize,
    ) -> Self {
        Self {
            status,
            path,
            from: from.map(Cow::Borrowed),
            to: to.map(Cow::Borrowed),
            children: Vec::new(),
            diff_count,
        }
    }

    /// Container node whose status and cost are derived from `children`.
    pub(crate) fn container(
        path: Vec<String>,
        from: Option<&'a Value>,
        to: Option<&'a Value>,
        children: Vec<DiffNode<'a>>,
    ) -> Self {
        let mut status = Status::Same;
        let mut diff_count = 0;
        for child in &children {
            if child.status != Status::Same {
                status = Status::Modified;
                diff_count += child.diff_count;
            }
        }
        Self {
            status,
            path,
            from: from.map(Cow::Borrowed),
            to: to.map(Cow::Borrowed),
            children,
            diff_count,
        }
    }

    pub fn is_same(&self) -> bool {
        self.status == Status::Same
    }

    /// Whether this node or any descendant differs.
    pub fn has_changes(&self) -> bool {
        self.status != Status::Same || self.children.iter().any(DiffNode::has_changes)
    }

    pub fn from_value(&self) -> Option<&Value> {
        self.from.as_deref()
    }

    pub fn to_value(&self) -> Option<&Value> {
        self.to.as_deref()
    }

    /// The last path segment, or `""` at the root.
    pub fn key(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or("")
    }

    /// Dotted display label with array indices attached:
    /// `spec.containers[0].image`.
    pub fn label(&self) -> String {
        let mut out = String::new();
        for seg in &self.path {
            if !out.is_empty() && !seg.starts_with('[') {
                out.push('.');
            }
            out.push_str(seg);
        }
        out
    }

    /// Whether this node is a line-by-line diff of two strings.
    pub fn is_multiline(&self) -> bool {
        !self.children.is_empty()
            && matches!(self.from_value(), Some(Value::String(_)))
            && matches!(self.to_value(), Some(Value::String(_)))
    }

    /// Detach from the compared input by cloning borrowed values.
    pub fn into_owned(self) -> DiffNode<'static> {
        DiffNode {
            status: self.status,
            path: self.path,
            from: self.from.map(|v| Cow::Owned(v.into_owned())),
            to: self.to.map(|v| Cow::Owned(v.into_owned())),
            children: self.children.into_iter().map(DiffNode::into_owned).collect(),
            diff_count: self.diff_count,
        }
    }
}

/// Whether any result in the forest reports a difference.
pub fn has_differences(results: &[DiffNode<'_>]) -> bool {
    results.iter().any(|r| r.status != Status::Same)
}

pub(crate) fn child_path(path: &[String], segment: String) -> Vec<String> {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(segment);
    out
}

pub(crate) fn index_segment(i: usize) -> String {
    format!("[{}]", i)
}

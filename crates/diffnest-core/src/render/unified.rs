//! Unified-diff-like text rendering.
//!
//! Each line starts with a two-column marker (`"  "` unchanged, `"- "`
//! removed, `"+ "` added) followed by the dotted path and the value:
//!
//! ```text
//!   metadata.name: web
//! - spec.replicas: 2
//! + spec.replicas: 3
//! ```
//!
//! Multiline strings render per line under a header, with markers
//! `"   "`, `"-  "` and `"+  "`. Which siblings appear at every level is
//! decided by [`crate::context::window`].

use crate::context::{window, ContextMode, Visible};
use crate::diff::{DiffNode, Status};
use crate::value::Value;

const SAME: &str = "  ";
const REMOVED: &str = "- ";
const ADDED: &str = "+ ";

/// Render a diff forest; documents are separated by `---` lines.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use diffnest_core::{render_unified, Comparator, ContextMode, Value};
///
/// let a = Value::from(json!({"name": "John"}));
/// let b = Value::from(json!({"name": "Jane"}));
/// let diff = Comparator::default().compare(Some(&a), Some(&b));
/// let text = render_unified(&[diff], ContextMode::Lines(3));
/// assert_eq!(text, "- name: John\n+ name: Jane\n");
/// ```
pub fn render_unified(results: &[DiffNode<'_>], mode: ContextMode) -> String {
    let renderer = Unified { mode };
    let mut out = String::new();
    let mut rendered = false;
    let mut elided = false;
    for entry in window(results, mode) {
        match entry {
            Visible::Elision => elided = true,
            Visible::Node(i) => {
                if rendered {
                    out.push_str("---\n");
                }
                if elided {
                    out.push_str("  ...\n");
                    elided = false;
                }
                renderer.node(&results[i], "", &mut out);
                rendered = true;
            }
        }
    }
    out
}

struct Unified {
    mode: ContextMode,
}

impl Unified {
    fn node(&self, node: &DiffNode<'_>, indent: &str, out: &mut String) {
        let label = node.label();
        match node.status {
            Status::Same if node.children.is_empty() || self.mode != ContextMode::ShowAll => {
                // As context, a container collapses to its summary.
                line(out, SAME, indent, &label, node.from_value());
            }
            Status::Same => self.children(&node.children, indent, out),
            Status::Modified if node.is_multiline() && label.is_empty() => {
                self.lines(&node.children, indent, out);
            }
            Status::Modified if node.is_multiline() => {
                header(out, SAME, indent, &label);
                self.lines(&node.children, &format!("{}  ", indent), out);
            }
            Status::Modified if !node.children.is_empty() => {
                self.children(&node.children, indent, out);
            }
            Status::Modified => {
                value_block(out, REMOVED, indent, &label, node.from_value());
                value_block(out, ADDED, indent, &label, node.to_value());
            }
            Status::Added => value_block(out, ADDED, indent, &label, node.to_value()),
            Status::Deleted => value_block(out, REMOVED, indent, &label, node.from_value()),
        }
    }

    fn children(&self, children: &[DiffNode<'_>], indent: &str, out: &mut String) {
        for entry in window(children, self.mode) {
            match entry {
                Visible::Node(i) => self.node(&children[i], indent, out),
                Visible::Elision => {
                    out.push_str(SAME);
                    out.push_str(indent);
                    out.push_str("...\n");
                }
            }
        }
    }

    fn lines(&self, lines: &[DiffNode<'_>], indent: &str, out: &mut String) {
        for entry in window(lines, self.mode) {
            let Visible::Node(i) = entry else {
                text_line(out, " ", indent, "...");
                continue;
            };
            let line = &lines[i];
            let old = line.from_value().and_then(Value::as_str);
            let new = line.to_value().and_then(Value::as_str);
            match line.status {
                Status::Same => text_line(out, " ", indent, old.unwrap_or("")),
                Status::Deleted => text_line(out, "-", indent, old.unwrap_or("")),
                Status::Added => text_line(out, "+", indent, new.unwrap_or("")),
                Status::Modified => {
                    text_line(out, "-", indent, old.unwrap_or(""));
                    text_line(out, "+", indent, new.unwrap_or(""));
                }
            }
        }
    }
}

fn line(out: &mut String, marker: &str, indent: &str, label: &str, value: Option<&Value>) {
    out.push_str(marker);
    out.push_str(indent);
    match (label.is_empty(), value) {
        (true, Some(v)) => out.push_str(&v.to_string()),
        (true, None) => {}
        (false, Some(v)) => {
            out.push_str(label);
            out.push_str(": ");
            out.push_str(&v.to_string());
        }
        (false, None) => out.push_str(label),
    }
    out.push('\n');
}

fn header(out: &mut String, marker: &str, indent: &str, label: &str) {
    out.push_str(marker);
    out.push_str(indent);
    out.push_str(label);
    out.push_str(":\n");
}

fn text_line(out: &mut String, marker: &str, indent: &str, text: &str) {
    out.push_str(marker);
    out.push_str("  ");
    out.push_str(indent);
    out.push_str(text);
    out.push('\n');
}

/// A whole value under one marker: scalars and empty containers on one
/// line, otherwise a header followed by every nested entry.
fn value_block(out: &mut String, marker: &str, indent: &str, label: &str, value: Option<&Value>) {
    match value {
        Some(v) if has_entries(v) => {
            if label.is_empty() {
                structure(out, marker, indent, v);
            } else {
                header(out, marker, indent, label);
                structure(out, marker, &format!("{}  ", indent), v);
            }
        }
        _ => line(out, marker, indent, label, value),
    }
}

fn structure(out: &mut String, marker: &str, indent: &str, value: &Value) {
    let entries: Vec<(String, &Value)> = match value {
        Value::Object(fields) => fields.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("[{}]", i), v))
            .collect(),
        _ => return,
    };
    for (key, child) in entries {
        value_block(out, marker, indent, &key, Some(child));
    }
}

fn has_entries(value: &Value) -> bool {
    match value {
        Value::Object(fields) => !fields.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

//! Context windowing: which siblings of a diff level get rendered.
//!
//! The same rule applies to top-level documents, object fields, array
//! elements and the lines of a multiline string, giving uniform
//! "N lines of context" behaviour throughout the tree.

use serde::{Deserialize, Serialize};

use crate::diff::DiffNode;

/// How much unchanged material to show around changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextMode {
    /// Render every sibling.
    ShowAll,
    /// Render only siblings that contain a change.
    DiffOnly,
    /// Render changed siblings plus up to N neighbours on each side.
    Lines(usize),
}

impl ContextMode {
    /// Map a context-line count to a mode; negative means no context.
    pub fn from_lines(lines: i64) -> Self {
        if lines < 0 {
            ContextMode::DiffOnly
        } else {
            ContextMode::Lines(lines as usize)
        }
    }
}

/// One rendered slot of a sibling sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visible {
    /// Render the sibling at this index.
    Node(usize),
    /// One or more siblings were skipped between two rendered runs.
    Elision,
}

/// Select the siblings to render and where elision markers go.
///
/// With [`ContextMode::Lines`], every sibling whose subtree contains a change
/// is an anchor, widened by the context size and clipped to the sequence.
/// An elision marker separates two rendered runs; skipped siblings before
/// the first run or after the last are dropped without a marker.
pub fn window(nodes: &[DiffNode<'_>], mode: ContextMode) -> Vec<Visible> {
    match mode {
        ContextMode::ShowAll => (0..nodes.len()).map(Visible::Node).collect(),
        ContextMode::DiffOnly => nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.has_changes())
            .map(|(i, _)| Visible::Node(i))
            .collect(),
        ContextMode::Lines(context) => {
            let mut shown = vec![false; nodes.len()];
            for (i, node) in nodes.iter().enumerate() {
                if node.has_changes() {
                    let start = i.saturating_sub(context);
                    let end = i.saturating_add(context).min(nodes.len() - 1);
                    shown[start..=end].iter_mut().for_each(|s| *s = true);
                }
            }

            let mut out = Vec::new();
            let mut gap = false;
            for (i, &show) in shown.iter().enumerate() {
                if show {
                    if gap && !out.is_empty() {
                        out.push(Visible::Elision);
                    }
                    gap = false;
                    out.push(Visible::Node(i));
                } else {
                    gap = true;
                }
            }
            out
        }
    }
}

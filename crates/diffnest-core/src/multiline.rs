//! Line-by-line comparison of strings containing line breaks.

use std::borrow::Cow;

use crate::compare::Comparator;
use crate::diff::{DiffNode, Status};
use crate::value::Value;

impl Comparator {
    /// Split both strings on `\n`, compare the lines positionally and
    /// relabel the children `line i`.
    ///
    /// Lines are always compared by index, whatever the configured array
    /// strategy, so their order is preserved. The returned node keeps the
    /// unsplit strings in `from`/`to`; children are present only when some
    /// line differs.
    pub(crate) fn compare_multiline<'a>(
        &self,
        a: &'a Value,
        b: &'a Value,
        text_a: &str,
        text_b: &str,
        path: Vec<String>,
    ) -> DiffNode<'a> {
        let lines_a = split_lines(text_a);
        let lines_b = split_lines(text_b);

        let DiffNode {
            status,
            children,
            diff_count,
            ..
        } = DiffNode::container(
            path.clone(),
            None,
            None,
            self.compare_by_index(&lines_a, &lines_b, &path),
        );

        let children = if status == Status::Same {
            Vec::new()
        } else {
            children
                .into_iter()
                .map(|line| relabel(line.into_owned()))
                .collect()
        };

        DiffNode {
            status,
            path,
            from: Some(Cow::Borrowed(a)),
            to: Some(Cow::Borrowed(b)),
            children,
            diff_count,
        }
    }
}

fn split_lines(text: &str) -> Vec<Value> {
    text.split('\n')
        .map(|line| Value::String(line.to_string()))
        .collect()
}

/// Rewrite a trailing `[i]` segment to `line i`.
fn relabel(mut node: DiffNode<'static>) -> DiffNode<'static> {
    if let Some(last) = node.path.last_mut() {
        if let Some(index) = last.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            *last = format!("line {}", index);
        }
    }
    node
}

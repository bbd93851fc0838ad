//! Document matcher: optimal pairing of two multi-document streams.
//!
//! Every document on one side may pair with one on the other side, or be
//! reported as deleted/added on its own. The choice is made by an exact
//! assignment solve over an `(|A|+|B|)²` cost matrix:
//!
//! ```text
//!            B[0..m]                 dummy[0..n]
//! A[0..n]    pair cost + penalty     delete A[i] on the diagonal
//! dummy[m]   add B[j] on the diagonal   0
//! ```
//!
//! Off-diagonal cells of the delete/add quadrants hold [`FORBIDDEN`].
//! Unlike array elements, whole documents are paired exactly rather than
//! greedily because a wrong pairing misreports an entire document.

use tracing::debug;

use crate::assignment;
use crate::compare::Comparator;
use crate::diff::{DiffNode, DiffOptions};
use crate::value::Value;

/// Cost of a cell that must never be chosen.
pub const FORBIDDEN: i64 = 1 << 40;

/// Penalty for pairing documents of a different `kind`.
pub const KIND_PENALTY: i64 = 1 << 20;
/// Penalty for a differing `apiVersion`.
pub const API_VERSION_PENALTY: i64 = 1 << 4;
/// Penalty for a differing `metadata.name`.
pub const NAME_PENALTY: i64 = 1 << 2;
/// Penalty for a differing `metadata.namespace`.
pub const NAMESPACE_PENALTY: i64 = 1;

/// Pair the documents of two streams and diff each pairing.
///
/// A single document on each side is compared directly. Otherwise the result
/// lists, in order, one entry per `docs_a` document (its pairing or its
/// deletion), followed by additions for unpaired `docs_b` documents in their
/// original order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use diffnest_core::{match_documents, DiffOptions, Status, Value};
///
/// let a = vec![Value::from(json!({"name": "x"})), Value::from(json!({"name": "y"}))];
/// let b = vec![Value::from(json!({"name": "y"})), Value::from(json!({"name": "x"}))];
/// let results = match_documents(&a, &b, DiffOptions::default());
/// assert!(results.iter().all(|r| r.status == Status::Same));
/// ```
pub fn match_documents<'a>(
    docs_a: &'a [Value],
    docs_b: &'a [Value],
    options: DiffOptions,
) -> Vec<DiffNode<'a>> {
    let comparator = Comparator::new(options);

    if docs_a.len() == 1 && docs_b.len() == 1 {
        debug!("single document on each side, comparing directly");
        return vec![comparator.compare(Some(&docs_a[0]), Some(&docs_b[0]))];
    }

    let (n, m) = (docs_a.len(), docs_b.len());
    let size = n + m;
    debug!(from = n, to = m, size, "building document cost matrix");

    let mut pairs: Vec<Option<DiffNode<'a>>> = Vec::with_capacity(n * m);
    let mut deletions: Vec<Option<DiffNode<'a>>> = Vec::with_capacity(n);
    let mut additions: Vec<Option<DiffNode<'a>>> = Vec::with_capacity(m);
    let mut cost = vec![vec![0i64; size]; size];

    for (i, a) in docs_a.iter().enumerate() {
        for (j, b) in docs_b.iter().enumerate() {
            let diff = comparator.compare(Some(a), Some(b));
            cost[i][j] = diff.diff_count as i64 + mismatch_penalty(&comparator, a, b);
            pairs.push(Some(diff));
        }
    }

    for (i, a) in docs_a.iter().enumerate() {
        let diff = comparator.compare(Some(a), None);
        for j in m..size {
            cost[i][j] = if j == m + i {
                diff.diff_count as i64
            } else {
                FORBIDDEN
            };
        }
        deletions.push(Some(diff));
    }

    for (j, b) in docs_b.iter().enumerate() {
        let diff = comparator.compare(None, Some(b));
        for (i, row) in cost.iter_mut().enumerate().skip(n) {
            row[j] = if i == n + j {
                diff.diff_count as i64
            } else {
                FORBIDDEN
            };
        }
        additions.push(Some(diff));
    }

    let assignment = assignment::solve(&cost);

    let mut results = Vec::with_capacity(size);
    let mut paired = vec![false; m];
    for (i, &j) in assignment.iter().take(n).enumerate() {
        if j < m {
            debug!(from = i, to = j, "paired documents");
            paired[j] = true;
            results.extend(pairs[i * m + j].take());
        } else {
            debug!(from = i, "document deleted");
            results.extend(deletions[i].take());
        }
    }
    for (j, addition) in additions.iter_mut().enumerate() {
        if !paired[j] {
            debug!(to = j, "document added");
            results.extend(addition.take());
        }
    }
    results
}

/// Bias pairings of record-like documents toward the same resource.
///
/// Applies only when both documents are objects and at least one carries a
/// `kind` field. A field absent on both sides counts as matching; absent on
/// one side counts as differing.
pub fn mismatch_penalty(comparator: &Comparator, a: &Value, b: &Value) -> i64 {
    if !matches!((a, b), (Value::Object(_), Value::Object(_))) {
        return 0;
    }
    if a.get("kind").is_none() && b.get("kind").is_none() {
        return 0;
    }

    let mut penalty = 0;
    if !same_field(comparator, a.get("kind"), b.get("kind")) {
        penalty += KIND_PENALTY;
    }
    if !same_field(comparator, a.get("apiVersion"), b.get("apiVersion")) {
        penalty += API_VERSION_PENALTY;
    }
    let (meta_a, meta_b) = (a.get("metadata"), b.get("metadata"));
    if !same_field(
        comparator,
        meta_a.and_then(|m| m.get("name")),
        meta_b.and_then(|m| m.get("name")),
    ) {
        penalty += NAME_PENALTY;
    }
    if !same_field(
        comparator,
        meta_a.and_then(|m| m.get("namespace")),
        meta_b.and_then(|m| m.get("namespace")),
    ) {
        penalty += NAMESPACE_PENALTY;
    }
    penalty
}

fn same_field(comparator: &Comparator, a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(_), Some(_)) => comparator.compare(a, b).is_same(),
        _ => false,
    }
}

//! Node comparator: pairwise structural comparison of two optional values.
//!
//! [`Comparator`] holds only the immutable [`DiffOptions`]; every call is a
//! pure function of its inputs. Arrays are handed to the array matcher
//! (`array.rs`) and strings containing line breaks to the multiline splitter
//! (`multiline.rs`).

use std::borrow::Cow;
use std::collections::HashMap;

use crate::diff::{child_path, DiffNode, DiffOptions, Status};
use crate::value::Value;

/// Maps an object key to the slot it shares with keys on the other side.
type KeyFold = for<'k> fn(&'k str) -> Cow<'k, str>;

fn exact_key(key: &str) -> Cow<'_, str> {
    Cow::Borrowed(key)
}

fn folded_key(key: &str) -> Cow<'_, str> {
    if key.chars().any(char::is_uppercase) {
        Cow::Owned(key.to_lowercase())
    } else {
        Cow::Borrowed(key)
    }
}

/// Structural comparator configured by [`DiffOptions`].
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    options: DiffOptions,
}

impl Comparator {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compare two possibly-absent values from the root.
    ///
    /// - both absent: `Same`
    /// - only `b`: `Added`, costing the leaf count of `b`
    /// - only `a`: `Deleted`, costing the leaf count of `a`
    /// - different types: `Modified`, costing both leaf counts
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use diffnest_core::{Comparator, Status, Value};
    ///
    /// let a = Value::from(json!({"replicas": 3}));
    /// let b = Value::from(json!({"replicas": 3.0}));
    /// let diff = Comparator::default().compare(Some(&a), Some(&b));
    /// assert_eq!(diff.status, Status::Same);
    /// ```
    pub fn compare<'a>(&self, a: Option<&'a Value>, b: Option<&'a Value>) -> DiffNode<'a> {
        self.compare_at(a, b, Vec::new())
    }

    pub(crate) fn compare_at<'a>(
        &self,
        a: Option<&'a Value>,
        b: Option<&'a Value>,
        path: Vec<String>,
    ) -> DiffNode<'a> {
        match (a, b) {
            (None, None) => DiffNode::leaf(Status::Same, path, None, None, 0),
            (None, Some(b)) => DiffNode::leaf(Status::Added, path, None, Some(b), b.leaf_count()),
            (Some(a), None) => {
                DiffNode::leaf(Status::Deleted, path, Some(a), None, a.leaf_count())
            }
            (Some(a), Some(b)) => self.compare_values(a, b, path),
        }
    }

    fn compare_values<'a>(&self, a: &'a Value, b: &'a Value, path: Vec<String>) -> DiffNode<'a> {
        let equal = match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x.numeric_eq(*y),
            (Value::String(x), Value::String(y)) if x.contains('\n') || y.contains('\n') => {
                return self.compare_multiline(a, b, x, y, path);
            }
            (Value::String(x), Value::String(y)) => self.strings_equal(x, y),
            (Value::Array(xs), Value::Array(ys)) => {
                return self.compare_arrays(a, b, xs, ys, path);
            }
            (Value::Object(xs), Value::Object(ys)) => {
                return self.compare_objects(a, b, xs, ys, path);
            }
            // No partial matching across types.
            _ => {
                let cost = a.leaf_count() + b.leaf_count();
                return DiffNode::leaf(Status::Modified, path, Some(a), Some(b), cost);
            }
        };

        if equal {
            DiffNode::leaf(Status::Same, path, Some(a), Some(b), 0)
        } else {
            DiffNode::leaf(Status::Modified, path, Some(a), Some(b), 1)
        }
    }

    pub(crate) fn strings_equal(&self, x: &str, y: &str) -> bool {
        x == y || (self.options.ignore_value_case && x.to_lowercase() == y.to_lowercase())
    }

    fn compare_objects<'a>(
        &self,
        a: &'a Value,
        b: &'a Value,
        xs: &'a [(String, Value)],
        ys: &'a [(String, Value)],
        path: Vec<String>,
    ) -> DiffNode<'a> {
        let fold: KeyFold = if self.options.ignore_key_case {
            folded_key
        } else {
            exact_key
        };

        let children = key_slots(xs, ys, fold)
            .into_iter()
            .filter(|slot| !(self.is_ignorable(slot.from) && self.is_ignorable(slot.to)))
            .map(|slot| self.compare_at(slot.from, slot.to, child_path(&path, slot.label.to_string())))
            .collect();

        DiffNode::container(path, Some(a), Some(b), children)
    }

    /// Whether one side of a key pair may be dropped from the comparison.
    /// A pair is skipped only when both sides qualify.
    fn is_ignorable(&self, value: Option<&Value>) -> bool {
        match value {
            None => self.options.ignore_empty_fields || self.options.ignore_zero_values,
            Some(v) => self.options.ignore_zero_values && v.is_zero(),
        }
    }
}

/// One key position in the union of two objects.
#[derive(Debug)]
struct KeySlot<'a> {
    label: &'a str,
    sort_key: Cow<'a, str>,
    from: Option<&'a Value>,
    to: Option<&'a Value>,
}

/// Union the keys of both objects into slots sorted by their folded form.
///
/// A slot takes its label from the first side that has the key. Keys that
/// fold to the same form pair up in source order; any surplus on either
/// side keeps a slot of its own.
fn key_slots<'a>(
    xs: &'a [(String, Value)],
    ys: &'a [(String, Value)],
    fold: KeyFold,
) -> Vec<KeySlot<'a>> {
    let mut slots: Vec<KeySlot<'a>> = Vec::with_capacity(xs.len() + ys.len());
    let mut index: HashMap<Cow<'a, str>, Vec<usize>> = HashMap::with_capacity(xs.len());

    for (key, value) in xs {
        let folded = fold(key);
        index.entry(folded.clone()).or_default().push(slots.len());
        slots.push(KeySlot {
            label: key,
            sort_key: folded,
            from: Some(value),
            to: None,
        });
    }

    for (key, value) in ys {
        let folded = fold(key);
        let open = index
            .get(&folded)
            .and_then(|ids| ids.iter().copied().find(|&i| slots[i].to.is_none()));
        match open {
            Some(i) => slots[i].to = Some(value),
            None => slots.push(KeySlot {
                label: key,
                sort_key: folded,
                from: None,
                to: Some(value),
            }),
        }
    }

    // Stable: colliding labels keep source order.
    slots.sort_by(|x, y| x.sort_key.cmp(&y.sort_key));
    slots
}

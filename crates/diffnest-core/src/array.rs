//! Array matcher: positional and best-match reconciliation of two arrays.

use crate::compare::Comparator;
use crate::diff::{child_path, index_segment, ArrayStrategy, DiffNode};
use crate::value::Value;

impl Comparator {
    pub(crate) fn compare_arrays<'a>(
        &self,
        a: &'a Value,
        b: &'a Value,
        xs: &'a [Value],
        ys: &'a [Value],
        path: Vec<String>,
    ) -> DiffNode<'a> {
        let children = match self.options().array_strategy {
            ArrayStrategy::Index => self.compare_by_index(xs, ys, &path),
            ArrayStrategy::Value => self.compare_by_value(xs, ys, &path),
        };
        DiffNode::container(path, Some(a), Some(b), children)
    }

    /// Element-wise comparison; the shorter side is padded with absent
    /// slots, so extra elements come out `Added` or `Deleted`.
    pub(crate) fn compare_by_index<'a>(
        &self,
        xs: &'a [Value],
        ys: &'a [Value],
        path: &[String],
    ) -> Vec<DiffNode<'a>> {
        (0..xs.len().max(ys.len()))
            .map(|i| self.compare_at(xs.get(i), ys.get(i), child_path(path, index_segment(i))))
            .collect()
    }

    /// Order-insensitive comparison pairing each element with its cheapest
    /// unused counterpart.
    ///
    /// Every (i, j) pair is compared, pairs are sorted by `diff_count`
    /// (ties keep row-major discovery order) and taken greedily while both
    /// ends are free. This is an approximation of min-cost bipartite
    /// matching, not the optimum the document matcher computes.
    ///
    /// Children come out in `xs` order (matched pairs labelled with their
    /// `xs` index, unmatched elements as `Deleted`), followed by unmatched
    /// `ys` elements as `Added` at their own index.
    pub(crate) fn compare_by_value<'a>(
        &self,
        xs: &'a [Value],
        ys: &'a [Value],
        path: &[String],
    ) -> Vec<DiffNode<'a>> {
        let mut candidates: Vec<Option<DiffNode<'a>>> = Vec::with_capacity(xs.len() * ys.len());
        for (i, x) in xs.iter().enumerate() {
            let element_path = child_path(path, index_segment(i));
            for y in ys {
                candidates.push(Some(self.compare_at(Some(x), Some(y), element_path.clone())));
            }
        }

        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by_key(|&k| candidates[k].as_ref().map_or(0, |c| c.diff_count));

        let mut matched: Vec<Option<DiffNode<'a>>> = (0..xs.len()).map(|_| None).collect();
        let mut used = vec![false; ys.len()];
        let mut remaining = xs.len().min(ys.len());
        for k in order {
            if remaining == 0 {
                break;
            }
            let (i, j) = (k / ys.len(), k % ys.len());
            if matched[i].is_none() && !used[j] {
                matched[i] = candidates[k].take();
                used[j] = true;
                remaining -= 1;
            }
        }

        let mut children = Vec::with_capacity(xs.len() + ys.len());
        for (i, pair) in matched.into_iter().enumerate() {
            match pair {
                Some(node) => children.push(node),
                None => children.push(self.compare_at(
                    Some(&xs[i]),
                    None,
                    child_path(path, index_segment(i)),
                )),
            }
        }
        for (j, y) in ys.iter().enumerate() {
            if !used[j] {
                children.push(self.compare_at(None, Some(y), child_path(path, index_segment(j))));
            }
        }
        children
    }
}

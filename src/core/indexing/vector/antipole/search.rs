// src/core/indexing/vector/antipole/search.rs

//! Best-first nearest-vector search over an antipole tree.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use super::error::AntipoleError;
use super::metric::squared_distance;
use super::tree::{AntipoleNode, AntipoleTree};
use crate::core::vector::VectorStore;

/// A node waiting in the search frontier together with the smallest squared
/// distance any of its vectors could have to the probe.
#[derive(Debug)]
struct Candidate<'a> {
    lower_bound: f32,
    node: &'a AntipoleNode,
}

impl PartialEq for Candidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.lower_bound.total_cmp(&other.lower_bound) == Ordering::Equal
    }
}

impl Eq for Candidate<'_> {}

// BinaryHeap is a max-heap; reversing the comparison pops the smallest bound
// first. Equal bounds come out in arbitrary order.
impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.lower_bound.total_cmp(&self.lower_bound)
    }
}

/// Finds the stored vector nearest to `query_vector`.
///
/// # Arguments
/// * `tree`: The tree to search.
/// * `query_vector`: The probe, already converted like the stored vectors.
/// * `store`: The store the tree was built from. Leaf members index into it.
///
/// # Returns
/// `(global_index, squared_distance)` of the nearest vector, or `None` when the
/// tree is empty.
///
/// # Errors
/// `DimensionMismatch` if the probe length differs from the tree's,
/// `InvalidInput` if the probe has a NaN or infinite component, and
/// `EmptyIndex` or `InternalError` if the tree is malformed.
pub fn find_closest_with_distance(
    tree: &AntipoleTree,
    query_vector: &[f32],
    store: &VectorStore,
) -> Result<Option<(usize, f32)>, AntipoleError> {
    let Some(root) = tree.root.as_deref() else {
        return Ok(None);
    };
    if query_vector.len() != tree.dimension {
        return Err(AntipoleError::DimensionMismatch {
            expected: tree.dimension,
            actual: query_vector.len(),
        });
    }
    if query_vector.iter().any(|c| !c.is_finite()) {
        return Err(AntipoleError::InvalidInput(
            "query vector has a NaN or infinite component".to_string(),
        ));
    }

    let mut frontier = BinaryHeap::new();
    // The root is always visited, whatever its sphere says.
    frontier.push(Candidate { lower_bound: 0.0, node: root });

    let mut best: Option<(usize, f32)> = None;
    let mut best_distance = f32::INFINITY;
    let mut visited_leaves = 0_usize;

    while let Some(candidate) = frontier.pop() {
        // Every remaining bound is at least this one, so nothing left can win.
        if candidate.lower_bound >= best_distance {
            break;
        }

        match candidate.node {
            AntipoleNode::Leaf { members, .. } => {
                if members.is_empty() {
                    return Err(AntipoleError::EmptyIndex(
                        "search reached a leaf with no members".to_string(),
                    ));
                }
                visited_leaves += 1;
                for &global_idx in members {
                    let Some(vector) = store.get(global_idx) else {
                        return Err(AntipoleError::InternalError(format!(
                            "Leaf member {} is out of bounds for a store of {} vectors",
                            global_idx,
                            store.len()
                        )));
                    };
                    let dist_sq = squared_distance(query_vector, vector);
                    // Overflowed distances are `inf`; the first one still counts.
                    if best.is_none() || dist_sq < best_distance {
                        best_distance = dist_sq;
                        best = Some((global_idx, dist_sq));
                    }
                }
            }
            AntipoleNode::Internal { left, right, .. } => {
                for child in [left.as_ref(), right.as_ref()] {
                    let lower_bound = child.sphere().lower_bound(query_vector);
                    // A NaN bound must keep the child.
                    if lower_bound.is_nan() || lower_bound < best_distance {
                        frontier.push(Candidate { lower_bound, node: child });
                    }
                }
            }
        }
    }

    debug!("Antipole search visited {} leaves", visited_leaves);
    Ok(best)
}

/// Global index of the stored vector nearest to `query_vector`, or `None` when
/// the tree is empty.
///
/// # Errors
/// See [`find_closest_with_distance`].
pub fn find_closest(
    tree: &AntipoleTree,
    query_vector: &[f32],
    store: &VectorStore,
) -> Result<Option<usize>, AntipoleError> {
    Ok(find_closest_with_distance(tree, query_vector, store)?.map(|(idx, _)| idx))
}

/// Exhaustive scan over the store; on ties the lowest global index wins.
/// Reference answer for the tree search.
#[must_use]
pub fn linear_scan_closest(store: &VectorStore, query_vector: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, vector) in store.iter().enumerate() {
        let dist_sq = squared_distance(query_vector, vector);
        if best.map_or(true, |(_, d)| dist_sq < d) {
            best = Some((idx, dist_sq));
        }
    }
    best
}

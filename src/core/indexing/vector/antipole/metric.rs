// src/core/indexing/vector/antipole/metric.rs

//! Metric primitives: squared distance, 1-median and the approximate antipole.

use std::collections::VecDeque;

use super::error::AntipoleError;
use crate::core::vector::VectorStore;

/// Tournament window used when none is configured.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// Sum of per-component squared differences.
///
/// Lengths are assumed equal; extra components of the longer slice are
/// ignored. Use [`checked_squared_distance`] where the inputs are untrusted.
#[inline]
#[must_use]
pub fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// # Errors
/// Returns `AntipoleError::DimensionMismatch` if the lengths differ.
pub fn checked_squared_distance(a: &[f32], b: &[f32]) -> Result<f32, AntipoleError> {
    if a.len() != b.len() {
        return Err(AntipoleError::DimensionMismatch { expected: a.len(), actual: b.len() });
    }
    Ok(squared_distance(a, b))
}

/// Index (within `objects`) of the element with the smallest total Euclidean
/// distance to the other elements.
///
/// Centrality is scored with true distances, not squared ones, so a single far
/// outlier does not dominate the sum. On exact ties the earliest element wins.
///
/// # Errors
/// Returns `AntipoleError::EmptyInput` if `objects` is empty.
pub fn one_median(objects: &[&[f32]]) -> Result<usize, AntipoleError> {
    if objects.is_empty() {
        return Err(AntipoleError::EmptyInput("1-median of an empty set".to_string()));
    }

    let mut best_index = 0;
    let mut best_sum = f32::INFINITY;
    for (i, candidate) in objects.iter().enumerate() {
        let sum: f32 = objects
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, other)| squared_distance(candidate, other).sqrt())
            .sum();
        if sum < best_sum {
            best_sum = sum;
            best_index = i;
        }
    }
    Ok(best_index)
}

/// Approximates the farthest pair of vectors among `matching` by tournament
/// elimination.
///
/// Candidates sit on a circular list with a cursor. Each round takes the next
/// `tournament_size` candidates from the cursor, drops their 1-median for good
/// and moves the cursor past the window. Two survivors remain. Rotating the
/// list so the cursor is always at the front turns each round into: pop the
/// window from the front, push the survivors to the back.
///
/// Returns the global indices of the pair. A singleton set yields its only
/// member twice.
///
/// # Errors
/// Returns `AntipoleError::EmptyInput` if `matching` is empty.
pub fn approx_antipole(
    store: &VectorStore,
    matching: &[usize],
    tournament_size: usize,
) -> Result<(usize, usize), AntipoleError> {
    match matching {
        [] => Err(AntipoleError::EmptyInput("antipole of an empty matching set".to_string())),
        [only] => Ok((*only, *only)),
        [first, second] => Ok((*first, *second)),
        _ => {
            let window_size = tournament_size.max(2);
            let mut candidates: VecDeque<usize> = matching.iter().copied().collect();
            let mut window: Vec<usize> = Vec::with_capacity(window_size);

            while candidates.len() > 2 {
                let take = window_size.min(candidates.len());
                window.clear();
                window.extend(candidates.drain(..take));

                let objects: Vec<&[f32]> = window.iter().map(|&idx| store.vector(idx)).collect();
                let median = one_median(&objects)?;

                candidates.extend(
                    window.iter().enumerate().filter(|(pos, _)| *pos != median).map(|(_, &idx)| idx),
                );
            }

            match (candidates.pop_front(), candidates.pop_front()) {
                (Some(a), Some(b)) => Ok((a, b)),
                _ => Err(AntipoleError::InternalError(
                    "tournament ended with fewer than two candidates".to_string(),
                )),
            }
        }
    }
}

// src/core/indexing/vector/antipole/builder.rs

//! Logic for building an antipole tree from a vector store.

use log::{debug, info};

use super::error::AntipoleError;
use super::metric::{approx_antipole, squared_distance};
use super::tree::{AntipoleNode, AntipoleTree, BoundingSphere};
use crate::core::vector::VectorStore;

/// Leaf threshold used when none is configured.
pub const DEFAULT_MIN_LEAF_SIZE: usize = 100;

/// Parameters shared by every recursive build call.
#[derive(Debug, Clone, Copy)]
pub struct BuildParams {
    /// Matching sets of at most this many members become leaves.
    pub min_leaf_size: usize,
    /// Window size of the antipole tournament.
    pub tournament_size: usize,
}

/// Builds an antipole tree over every vector in `store`.
///
/// The root matching set is `0..store.len()`. Each oversized set is split
/// around an approximate antipole pair and both halves are built concurrently
/// on the rayon pool. The store is only read, so the tasks share it freely.
///
/// # Returns
/// The built tree; its root is `None` when the store is empty.
///
/// # Errors
/// Returns `AntipoleError::InvalidInput` for a zero `min_leaf_size`, and
/// propagates any error raised while building a subtree.
pub fn build_antipole_tree(
    store: &VectorStore,
    params: BuildParams,
) -> Result<AntipoleTree, AntipoleError> {
    if params.min_leaf_size == 0 {
        return Err(AntipoleError::InvalidInput("min_leaf_size must be at least 1".to_string()));
    }

    let mut tree = AntipoleTree::new(store.dimension());
    if store.is_empty() {
        return Ok(tree);
    }

    let root = build_node(store, store.all_indices(), params)?;
    tree.set_root(root);

    let stats = tree.stats();
    info!(
        "Built antipole tree over {} vectors: {} nodes, {} leaves, depth {}, largest leaf {}",
        stats.indexed_vectors, stats.nodes, stats.leaves, stats.depth, stats.largest_leaf
    );
    Ok(tree)
}

/// Recursively builds the node owning `matching`.
fn build_node(
    store: &VectorStore,
    matching: Vec<usize>,
    params: BuildParams,
) -> Result<AntipoleNode, AntipoleError> {
    if matching.is_empty() {
        return Err(AntipoleError::InternalError(
            "Attempted to build node from empty matching set.".to_string(),
        ));
    }

    let sphere = BoundingSphere::enclosing(store, &matching)?;
    if matching.len() <= params.min_leaf_size {
        return Ok(AntipoleNode::Leaf { sphere, members: matching });
    }

    let (left_pole, right_pole) = approx_antipole(store, &matching, params.tournament_size)?;
    let (left_matching, right_matching) = partition(store, &matching, left_pole, right_pole);

    // Only an antipole pair of two identical vectors sends everything to one
    // side; recursing would see the same set again.
    if left_matching.is_empty() || right_matching.is_empty() {
        debug!(
            "Degenerate split of {} members around coincident poles {} and {}; keeping a leaf",
            matching.len(),
            left_pole,
            right_pole
        );
        return Ok(AntipoleNode::Leaf { sphere, members: matching });
    }

    let (left, right) = rayon::join(
        || build_node(store, left_matching, params),
        || build_node(store, right_matching, params),
    );

    Ok(AntipoleNode::Internal { sphere, left: Box::new(left?), right: Box::new(right?) })
}

/// Splits `matching` between the two poles. A member goes right when it is
/// strictly farther from the right pole than from the left one, so the right
/// child gathers the left pole's neighbourhood and vice versa. Ties stay left.
fn partition(
    store: &VectorStore,
    matching: &[usize],
    left_pole: usize,
    right_pole: usize,
) -> (Vec<usize>, Vec<usize>) {
    let left_center = store.vector(left_pole);
    let right_center = store.vector(right_pole);

    matching.iter().partition(|&&idx| {
        let v = store.vector(idx);
        let goes_right = squared_distance(v, right_center) > squared_distance(v, left_center);
        !goes_right
    })
}

// src/core/indexing/vector/mod.rs

use crate::core::common::IndexError;
use std::fmt::Debug;

pub mod antipole;

/// Trait for vector indexes answering nearest-vector queries.
pub trait VectorIndex: Debug + Send + Sync {
    /// Returns the name of the index.
    fn name(&self) -> &str;

    /// Returns the dimension of the indexed vectors (0 while nothing is indexed).
    fn dimension(&self) -> usize;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the indexed vectors with `vectors` and rebuilds the index.
    /// The position of a vector in `vectors` is its global index.
    fn build(&mut self, vectors: Vec<Vec<f32>>) -> Result<(), IndexError>;

    /// Global index of the indexed vector nearest to `query_vector`, or `None`
    /// if nothing is indexed.
    fn closest(&self, query_vector: &[f32]) -> Result<Option<usize>, IndexError>;
}

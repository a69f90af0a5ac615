//! Vector storage for the antipole index.
//!
//! The store is the flat table of indexed vectors. A vector's position in the
//! store is its *global index*, which is what leaves record and what queries
//! return. The store is replaced wholesale on every build and is read-only
//! afterwards, so build tasks can share it by reference.

use crate::core::common::IndexError;

/// Ordered table of equal-length vectors addressed by global index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorStore {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self { dimension: 0, vectors: Vec::new() }
    }

    /// Takes ownership of `vectors`, checking that they all share the length
    /// of the first one.
    ///
    /// # Errors
    /// Returns `IndexError::DimensionMismatch` if any vector differs in length,
    /// or `IndexError::InvalidInput` if the vectors are zero-length or hold a
    /// non-finite component.
    pub fn from_vectors(vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        let Some(first) = vectors.first() else {
            return Ok(Self::new());
        };
        let dimension = first.len();
        if dimension == 0 {
            return Err(IndexError::invalid_input("cannot index zero-length vectors"));
        }

        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(IndexError::DimensionMismatch { expected: dimension, actual: bad.len() });
        }

        if let Some(position) = vectors.iter().position(|v| v.iter().any(|c| !c.is_finite())) {
            return Err(IndexError::invalid_input(format!(
                "vector {} has a NaN or infinite component",
                position
            )));
        }

        Ok(Self { dimension, vectors })
    }

    /// Length shared by every stored vector (0 for an empty store).
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Returns the vector at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        self.vectors.get(index).map(Vec::as_slice)
    }

    /// Returns the vector at `index`.
    ///
    /// Only called with indices the store itself handed out (`0..len`);
    /// panics otherwise.
    #[must_use]
    pub fn vector(&self, index: usize) -> &[f32] {
        &self.vectors[index]
    }

    /// Iterate over the vectors in global index order
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.vectors.iter().map(Vec::as_slice)
    }

    /// All global indices, in order. Seeds the root matching set.
    #[must_use]
    pub fn all_indices(&self) -> Vec<usize> {
        (0..self.vectors.len()).collect()
    }
}

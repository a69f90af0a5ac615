// src/core/indexing/vector/antipole/mod.rs

//! Antipole tree implementation for vector indexing.
//!
//! The tree recursively splits the indexed vectors around approximate
//! farthest pairs ("antipoles") and keeps a bounding sphere per node, which
//! lets the search skip whole subtrees that cannot hold a closer vector.

pub use self::error::AntipoleError;
pub use self::tree::{AntipoleNode, AntipoleTree, BoundingSphere, TreeStats};
use self::builder::BuildParams;
use super::VectorIndex;
use crate::core::common::IndexError;
use crate::core::config::IndexConfig;
use crate::core::vector::{ConversionMethod, Thumbnail, VectorStore};
use log::info;
use rayon::prelude::*;
use std::time::Instant;

pub mod builder;
mod error;
pub mod metric;
pub mod search;
pub mod tree;

#[cfg(test)]
mod tests;

/// `AntipoleTreeIndex`: Implements the `VectorIndex` trait using an antipole tree.
///
/// The index owns the vector store and the tree built over it. Building
/// replaces both; queries only read them and may run concurrently.
#[derive(Debug)]
pub struct AntipoleTreeIndex {
    name: String,
    config: IndexConfig,
    store: VectorStore,
    tree: Option<AntipoleTree>,
}

impl AntipoleTreeIndex {
    /// Creates a new, empty `AntipoleTreeIndex`.
    ///
    /// # Errors
    /// Returns `IndexError::Configuration` if `config` does not validate.
    pub fn new(name: impl Into<String>, config: IndexConfig) -> Result<Self, IndexError> {
        config.validate()?;
        Ok(Self { name: name.into(), config, store: VectorStore::new(), tree: None })
    }

    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    #[must_use]
    pub const fn conversion_method(&self) -> ConversionMethod {
        self.config.conversion_method
    }

    #[must_use]
    pub const fn store(&self) -> &VectorStore {
        &self.store
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&AntipoleTree> {
        self.tree.as_ref()
    }

    /// The indexed vector with the given global index.
    #[must_use]
    pub fn vector(&self, global_index: usize) -> Option<&[f32]> {
        self.store.get(global_index)
    }

    #[must_use]
    pub fn stats(&self) -> Option<TreeStats> {
        self.tree.as_ref().map(AntipoleTree::stats)
    }

    const fn build_params(&self) -> BuildParams {
        BuildParams {
            min_leaf_size: self.config.min_leaf_size,
            tournament_size: self.config.tournament_size,
        }
    }

    /// Converts a thumbnail with this index's method, after checking it against
    /// the configured thumbnail size.
    ///
    /// # Errors
    /// Returns `IndexError::InvalidInput` for a thumbnail of the wrong size.
    pub fn convert(&self, thumbnail: &Thumbnail) -> Result<Vec<f32>, IndexError> {
        let width_ok = self.config.thumbnail_width.map_or(true, |w| w == thumbnail.width());
        let height_ok = self.config.thumbnail_height.map_or(true, |h| h == thumbnail.height());
        if !width_ok || !height_ok {
            return Err(IndexError::invalid_input(format!(
                "thumbnail is {}x{}, index '{}' expects {}x{}",
                thumbnail.width(),
                thumbnail.height(),
                self.name,
                self.config.thumbnail_width.unwrap_or(thumbnail.width()),
                self.config.thumbnail_height.unwrap_or(thumbnail.height()),
            )));
        }
        Ok(self.config.conversion_method.convert(thumbnail))
    }

    /// Converts every thumbnail (in parallel) and builds the index over the
    /// results. Thumbnail `i` becomes global index `i`.
    pub fn build_from_thumbnails(&mut self, thumbnails: &[Thumbnail]) -> Result<(), IndexError> {
        let vectors = thumbnails
            .par_iter()
            .map(|thumbnail| self.convert(thumbnail))
            .collect::<Result<Vec<_>, _>>()?;
        self.build(vectors)
    }

    /// Nearest indexed vector and its squared distance to `query_vector`.
    pub fn closest_with_distance(
        &self,
        query_vector: &[f32],
    ) -> Result<Option<(usize, f32)>, IndexError> {
        match &self.tree {
            Some(tree) => Ok(search::find_closest_with_distance(tree, query_vector, &self.store)?),
            None => Ok(None),
        }
    }

    /// Converts `thumbnail` like the indexed ones and returns its closest match.
    pub fn closest_thumbnail(&self, thumbnail: &Thumbnail) -> Result<Option<usize>, IndexError> {
        let probe = self.convert(thumbnail)?;
        self.closest(&probe)
    }

    /// Answers many queries at once on the rayon pool. Results keep the order
    /// of `query_vectors`.
    pub fn closest_batch(
        &self,
        query_vectors: &[Vec<f32>],
    ) -> Result<Vec<Option<usize>>, IndexError> {
        query_vectors.par_iter().map(|probe| self.closest(probe)).collect()
    }
}

impl VectorIndex for AntipoleTreeIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.store.dimension()
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn build(&mut self, vectors: Vec<Vec<f32>>) -> Result<(), IndexError> {
        // The previous tree is discarded even if the new build fails.
        self.tree = None;
        self.store = VectorStore::new();

        let started = Instant::now();
        let store = VectorStore::from_vectors(vectors)?;
        let tree = builder::build_antipole_tree(&store, self.build_params())?;

        info!(
            "Index '{}' built over {} vectors of dimension {} in {:?}",
            self.name,
            store.len(),
            store.dimension(),
            started.elapsed()
        );
        self.store = store;
        self.tree = Some(tree);
        Ok(())
    }

    fn closest(&self, query_vector: &[f32]) -> Result<Option<usize>, IndexError> {
        Ok(self.closest_with_distance(query_vector)?.map(|(idx, _)| idx))
    }
}

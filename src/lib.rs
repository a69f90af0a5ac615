#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![forbid(unsafe_code)]

//! # antipole_index: nearest-thumbnail search with antipole trees
//!
//! `antipole_index` indexes a fixed set of feature vectors, typically derived
//! from image thumbnails, and answers exact nearest-vector queries.
//! It features:
//! - Divisive construction around approximate farthest pairs, found by
//!   tournament elimination instead of a quadratic scan
//! - Fork-join parallel builds on the rayon pool
//! - Bounding spheres on every node and best-first branch-and-bound search
//! - RGB, CIE Lab and CIE LCh thumbnail conversion
//!
//! ```
//! use antipole_index::{AntipoleTreeIndex, IndexConfig, VectorIndex};
//!
//! let config = IndexConfig::builder().min_leaf_size(1).build().unwrap();
//! let mut index = AntipoleTreeIndex::new("tiles", config).unwrap();
//! index.build(vec![vec![0.0, 0.0], vec![5.0, 5.0]]).unwrap();
//! assert_eq!(index.closest(&[4.0, 4.5]).unwrap(), Some(1));
//! ```

pub mod core;

// Re-export key types for easier use by library consumers
pub use crate::core::common::IndexError;
pub use crate::core::config::IndexConfig;
pub use crate::core::indexing::{AntipoleTreeIndex, VectorIndex};
pub use crate::core::vector::{ConversionMethod, Rgb, Thumbnail, VectorStore};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, IndexError>;

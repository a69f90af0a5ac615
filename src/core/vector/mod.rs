// src/core/vector/mod.rs

//! Vector storage and thumbnail conversion.
//!
//! The store holds the vectors an index is built over; the conversion module
//! turns raw thumbnails into those vectors.

pub mod conversion;
pub mod storage;

pub use conversion::{ConversionMethod, Rgb, Thumbnail};
pub use storage::VectorStore;

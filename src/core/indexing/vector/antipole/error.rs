// src/core/indexing/vector/antipole/error.rs

use std::fmt;

/// Error types for antipole tree construction and search.
#[derive(Debug, Clone, PartialEq)]
pub enum AntipoleError {
    /// A metric primitive was invoked on an empty collection.
    EmptyInput(String),
    /// A query reached a leaf without members. Indicates a construction bug.
    EmptyIndex(String),
    /// Vectors of unequal length were compared.
    DimensionMismatch { expected: usize, actual: usize },
    /// Build parameters or input vectors were rejected.
    InvalidInput(String),
    /// Error for general issues, e.g. an out-of-range member index.
    InternalError(String),
}

impl fmt::Display for AntipoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AntipoleError::EmptyInput(msg) => write!(f, "Antipole Tree Empty Input: {}", msg),
            AntipoleError::EmptyIndex(msg) => write!(f, "Antipole Tree Empty Index: {}", msg),
            AntipoleError::DimensionMismatch { expected, actual } => write!(
                f,
                "Antipole Tree Dimension Mismatch: expected {}, got {}",
                expected, actual
            ),
            AntipoleError::InvalidInput(msg) => write!(f, "Antipole Tree Invalid Input: {}", msg),
            AntipoleError::InternalError(msg) => write!(f, "Antipole Tree Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for AntipoleError {}

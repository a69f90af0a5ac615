use std::fmt;

use crate::core::indexing::vector::antipole::AntipoleError;

/// Crate-level error returned by the public index API.
#[derive(Debug)]
pub enum IndexError {
    Io(std::io::Error),
    Configuration(String),
    InvalidConversionMethod(String),
    InvalidInput { message: String },
    DimensionMismatch { expected: usize, actual: usize },
    Index(AntipoleError),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO Error: {}", e),
            Self::Configuration(s) => write!(f, "Configuration error: {}", s),
            Self::InvalidConversionMethod(s) => write!(f, "Invalid conversion method: {}", s),
            Self::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "Vector dimension mismatch: expected {}, got {}", expected, actual)
            }
            Self::Index(e) => write!(f, "Index Error: {}", e),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Index(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for IndexError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

// Dimension mismatches are lifted to the crate-level variant so callers can
// match on them without unwrapping the tree error.
impl From<AntipoleError> for IndexError {
    fn from(err: AntipoleError) -> Self {
        match err {
            AntipoleError::DimensionMismatch { expected, actual } => {
                Self::DimensionMismatch { expected, actual }
            }
            other => Self::Index(other),
        }
    }
}

impl IndexError {
    /// Create an invalid input error with a custom message
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    /// True when the error reports a tree invariant violation (an empty leaf
    /// reached during a query, or a construction bug).
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::Index(AntipoleError::EmptyIndex(_)) | Self::Index(AntipoleError::InternalError(_))
        )
    }
}

pub mod error;
pub use error::IndexError;

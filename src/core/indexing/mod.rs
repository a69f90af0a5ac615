pub mod vector;

// Re-export the index trait and its antipole implementation for convenience.
pub use vector::antipole::AntipoleTreeIndex;
pub use vector::VectorIndex;

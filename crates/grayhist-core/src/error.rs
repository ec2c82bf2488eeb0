//! Error types for grayhist-core
//!
//! Provides a unified error type for grid construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Grayhist core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Coordinate access outside the grid
    #[error("index out of bounds: ({x}, {y}) not in {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Sample buffer does not match the requested dimensions
    #[error("dimension mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Result type alias for grayhist core operations
pub type Result<T> = std::result::Result<T, Error>;

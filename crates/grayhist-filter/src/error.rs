//! Error types for grayhist-filter

use thiserror::Error;

/// Errors that can occur while building tone curves
#[derive(Debug, Error)]
pub enum FilterError {
    /// Input has no spread to map (constant or all-zero image)
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

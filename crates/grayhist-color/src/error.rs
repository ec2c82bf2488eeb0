//! Error types for grayhist-color

use thiserror::Error;

/// Errors that can occur during thresholding operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for thresholding operations
pub type ColorResult<T> = Result<T, ColorError>;

//! grayhist - Histogram-based contrast and binarization for grayscale images
//!
//! # Overview
//!
//! Every operation takes an immutable [`GrayGrid`] and returns a new one of
//! the same size:
//!
//! - [`stretch`] - linear range stretch to `[0, 255]`
//! - [`equalize`] - histogram equalization through the cumulative distribution
//! - [`binarize_manual`] - fixed threshold
//! - [`binarize_percent_black`] - threshold from a target black fraction
//! - [`binarize_mean_iterative`] - iterative mean-split threshold
//!
//! Decoding and encoding live in [`io`]; color sources are read through
//! [`color::intensity`] (red channel).
//!
//! # Example
//!
//! ```
//! use grayhist::{GrayGrid, binarize_manual, stretch};
//!
//! let grid = GrayGrid::from_rows(&[&[10, 10], &[200, 200]]).unwrap();
//! assert_eq!(binarize_manual(&grid, 100).data(), &[0, 0, 255, 255]);
//! assert_eq!(stretch(&grid).data(), &[0, 0, 255, 255]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use grayhist_core::*;

// Re-export domain crates as modules
pub use grayhist_color as binarize;
pub use grayhist_filter as filter;
pub use grayhist_io as io;

// The five grid transforms
pub use grayhist_color::{binarize_manual, binarize_mean_iterative, binarize_percent_black};
pub use grayhist_filter::{equalize, stretch};

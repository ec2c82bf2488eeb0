//! grayhist-filter - Contrast enhancement for grayscale grids
//!
//! This crate provides the histogram-driven tone mappings:
//!
//! - Linear range stretching ([`stretch`])
//! - Histogram equalization through the cumulative distribution ([`equalize`])
//!
//! Both are built as 256-entry tone reproduction curves ([`TrcLut`]) that
//! are then applied with [`trc_map`].

pub mod enhance;
mod error;

pub use error::{FilterError, FilterResult};

pub use enhance::{
    TrcLut, equalize, equalize_trc, grid_extremes, identity_trc, stretch, stretch_trc, trc_map,
};

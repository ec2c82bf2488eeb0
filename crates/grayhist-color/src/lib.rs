//! grayhist-color - Binarization of grayscale grids
//!
//! Every policy picks one global threshold and funnels into
//! [`apply_threshold`]: samples below the threshold become black (0),
//! the rest become white (255).
//!
//! - **Manual** ([`binarize_manual`]): caller-supplied threshold
//! - **Percentile** ([`binarize_percent_black`]): threshold chosen so a
//!   target fraction of pixels turns black
//! - **Iterative mean** ([`binarize_mean_iterative`]): fixed point of the
//!   mean-split iteration, a simplified two-class Otsu selection

mod error;
pub mod threshold;

// Re-export core types
pub use grayhist_core;

pub use error::{ColorError, ColorResult};

pub use threshold::{
    // Types
    MeanIterativeOptions,
    // Constants
    BLACK,
    WHITE,
    // Functions
    apply_threshold,
    binarize_manual,
    binarize_mean_iterative,
    binarize_mean_iterative_with,
    binarize_percent_black,
    mean_iterative_threshold,
    mean_iterative_threshold_with,
    percent_black_threshold,
};

//! Global thresholding
//!
//! Threshold selection policies and the single primitive that applies a
//! threshold to a grid:
//! - Fixed (manual) threshold
//! - Percentile threshold (target fraction of black pixels)
//! - Iterative mean-split threshold (simplified Otsu)
//!
//! Thresholds are carried as `i32`. Values outside `[0, 255]` are accepted
//! without validation and stay well-defined: a threshold `<= 0` makes every
//! pixel white, one `> 255` makes every pixel black.

use crate::{ColorError, ColorResult};
use grayhist_core::{GrayGrid, Histogram};
use log::{debug, trace, warn};

/// Output intensity of pixels below the threshold.
pub const BLACK: u8 = 0;
/// Output intensity of pixels at or above the threshold.
pub const WHITE: u8 = 255;

/// Options for the iterative mean-split threshold
#[derive(Debug, Clone)]
pub struct MeanIterativeOptions {
    /// Threshold the iteration starts from
    pub initial_threshold: i32,
    /// Upper bound on iterations before giving up on a fixed point
    pub max_iterations: u32,
}

impl Default for MeanIterativeOptions {
    fn default() -> Self {
        Self {
            initial_threshold: 128,
            max_iterations: 1000,
        }
    }
}

impl MeanIterativeOptions {
    /// Check the options before running the iteration.
    pub fn validate(&self) -> ColorResult<()> {
        if !(0..=255).contains(&self.initial_threshold) {
            return Err(ColorError::InvalidParameters(format!(
                "initial_threshold must be in [0, 255], got {}",
                self.initial_threshold
            )));
        }
        if self.max_iterations == 0 {
            return Err(ColorError::InvalidParameters(
                "max_iterations must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Map every pixel to [`BLACK`] if `intensity < threshold`, else [`WHITE`].
///
/// Total for any threshold; the input grid is not modified.
pub fn apply_threshold(grid: &GrayGrid, threshold: i32) -> GrayGrid {
    grid.map(|v| {
        if i32::from(v) < threshold {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Binarize with a caller-supplied threshold.
///
/// No validation is performed; see the module docs for out-of-range values.
///
/// ```
/// use grayhist_core::GrayGrid;
/// use grayhist_color::binarize_manual;
///
/// let grid = GrayGrid::from_rows(&[&[10, 10], &[200, 200]]).unwrap();
/// let bin = binarize_manual(&grid, 100);
/// assert_eq!(bin.data(), &[0, 0, 255, 255]);
/// ```
pub fn binarize_manual(grid: &GrayGrid, threshold: i32) -> GrayGrid {
    apply_threshold(grid, threshold)
}

/// Threshold at which a target fraction of pixels falls below it.
///
/// `percent` is a FRACTION in `[0, 1]` (0.5 for half the pixels), not a
/// percentage. The target count is `trunc(percent * total)`; the result is
/// the first intensity whose cumulative count reaches the target.
///
/// If no intensity reaches it (`percent > 1`, which includes callers
/// passing `50` for 50 %), the threshold falls back to 0 and every pixel
/// comes out white. A target of 0 or less also yields 0.
pub fn percent_black_threshold(hist: &Histogram, percent: f64) -> i32 {
    let total = hist.total();
    // Saturating cast: NaN becomes 0, huge values clamp.
    let target = (percent * total as f64) as i64;

    let mut cumulative = 0i64;
    for (val, count) in hist.iter() {
        cumulative += i64::from(count);
        if cumulative >= target {
            return i32::from(val);
        }
    }

    debug!(
        "percent_black: target {} exceeds {} pixels, falling back to threshold 0",
        target, total
    );
    0
}

/// Binarize so that roughly `percent` of the pixels become black.
///
/// `percent` is a fraction, see [`percent_black_threshold`].
pub fn binarize_percent_black(grid: &GrayGrid, percent: f64) -> GrayGrid {
    let threshold = percent_black_threshold(&grid.histogram(), percent);
    debug!("percent_black({}): threshold {}", percent, threshold);
    binarize_manual(grid, threshold)
}

/// One mean-split step: the average of the two class means at `t`.
///
/// An empty lower class contributes 0 and an empty upper class 255.
/// Class means and the average use truncating integer division.
fn mean_split_step(hist: &Histogram, t: i32) -> i32 {
    let (mut sum_below, mut count_below) = (0u64, 0u64);
    let (mut sum_above, mut count_above) = (0u64, 0u64);

    for (val, count) in hist.iter() {
        let count = u64::from(count);
        if i32::from(val) < t {
            sum_below += u64::from(val) * count;
            count_below += count;
        } else {
            sum_above += u64::from(val) * count;
            count_above += count;
        }
    }

    let mean_below = if count_below == 0 {
        0
    } else {
        sum_below / count_below
    };
    let mean_above = if count_above == 0 {
        255
    } else {
        sum_above / count_above
    };

    ((mean_below + mean_above) / 2) as i32
}

/// Iterative mean-split threshold with explicit options.
///
/// Starting from `initial_threshold`, repeatedly replaces the threshold by
/// the average of the mean below it and the mean at or above it, stopping
/// when the value no longer changes. If `max_iterations` is reached first,
/// the last threshold is returned and a warning is logged.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if the options are invalid.
pub fn mean_iterative_threshold_with(
    hist: &Histogram,
    options: &MeanIterativeOptions,
) -> ColorResult<i32> {
    options.validate()?;
    Ok(iterate_mean_split(
        hist,
        options.initial_threshold,
        options.max_iterations,
    ))
}

fn iterate_mean_split(hist: &Histogram, initial: i32, max_iterations: u32) -> i32 {
    let mut threshold = initial;
    for iteration in 1..=max_iterations {
        let next = mean_split_step(hist, threshold);
        trace!(
            "mean_iterative: iteration {} threshold {} -> {}",
            iteration, threshold, next
        );
        if next == threshold {
            debug!(
                "mean_iterative: converged to {} after {} iterations",
                threshold, iteration
            );
            return threshold;
        }
        threshold = next;
    }

    warn!(
        "mean_iterative: no fixed point within {} iterations, using {}",
        max_iterations, threshold
    );
    threshold
}

/// Iterative mean-split threshold with default options (start 128, cap 1000).
pub fn mean_iterative_threshold(hist: &Histogram) -> i32 {
    let options = MeanIterativeOptions::default();
    iterate_mean_split(hist, options.initial_threshold, options.max_iterations)
}

/// Binarize with the iterative mean-split threshold.
pub fn binarize_mean_iterative(grid: &GrayGrid) -> GrayGrid {
    let threshold = mean_iterative_threshold(&grid.histogram());
    debug!("mean_iterative: threshold {}", threshold);
    binarize_manual(grid, threshold)
}

/// Binarize with the iterative mean-split threshold and explicit options.
pub fn binarize_mean_iterative_with(
    grid: &GrayGrid,
    options: &MeanIterativeOptions,
) -> ColorResult<GrayGrid> {
    let threshold = mean_iterative_threshold_with(&grid.histogram(), options)?;
    Ok(binarize_manual(grid, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> GrayGrid {
        GrayGrid::from_vec(256, 1, (0..=255u8).collect()).unwrap()
    }

    fn is_binary(grid: &GrayGrid) -> bool {
        grid.pixels().all(|v| v == BLACK || v == WHITE)
    }

    #[test]
    fn test_apply_threshold_basic() {
        let grid = GrayGrid::from_rows(&[&[10, 10], &[200, 200]]).unwrap();
        let bin = apply_threshold(&grid, 100);
        assert_eq!(bin.data(), &[0, 0, 255, 255]);
        assert_eq!(grid.data(), &[10, 10, 200, 200]);
    }

    #[test]
    fn test_apply_threshold_edges() {
        let grid = ramp();
        assert!(apply_threshold(&grid, 0).pixels().all(|v| v == WHITE));
        assert!(apply_threshold(&grid, -5).pixels().all(|v| v == WHITE));
        assert!(apply_threshold(&grid, 256).pixels().all(|v| v == BLACK));

        let top = apply_threshold(&grid, 255);
        assert_eq!(top.pixels().filter(|&v| v == WHITE).count(), 1);
        assert_eq!(top.get(255, 0).unwrap(), WHITE);
    }

    #[test]
    fn test_apply_threshold_is_idempotent() {
        let grid = ramp();
        for t in [1, 64, 128, 200, 255] {
            let once = apply_threshold(&grid, t);
            assert!(is_binary(&once));
            assert_eq!(apply_threshold(&once, t), once);
        }
    }

    #[test]
    fn test_percent_black_threshold() {
        let grid = GrayGrid::from_vec(4, 1, vec![10, 20, 30, 40]).unwrap();
        let hist = grid.histogram();
        assert_eq!(percent_black_threshold(&hist, 0.0), 0);
        assert_eq!(percent_black_threshold(&hist, 0.25), 10);
        assert_eq!(percent_black_threshold(&hist, 0.5), 20);
        assert_eq!(percent_black_threshold(&hist, 0.6), 20);
        assert_eq!(percent_black_threshold(&hist, 1.0), 40);
    }

    #[test]
    fn test_percent_black_fallback() {
        let grid = GrayGrid::from_vec(4, 1, vec![10, 20, 30, 40]).unwrap();
        let hist = grid.histogram();
        // A percentage instead of a fraction overshoots every bin.
        assert_eq!(percent_black_threshold(&hist, 50.0), 0);
        assert_eq!(percent_black_threshold(&hist, f64::NAN), 0);
        assert_eq!(percent_black_threshold(&hist, -1.0), 0);

        let bin = binarize_percent_black(&grid, 50.0);
        assert!(bin.pixels().all(|v| v == WHITE));
    }

    #[test]
    fn test_percent_black_zero_matches_manual_zero() {
        let grid = ramp();
        assert_eq!(
            binarize_percent_black(&grid, 0.0),
            binarize_manual(&grid, 0)
        );
    }

    #[test]
    fn test_percent_black_half() {
        let grid = GrayGrid::from_vec(4, 1, vec![10, 20, 30, 40]).unwrap();
        let bin = binarize_percent_black(&grid, 0.5);
        // Threshold 20: only pixels strictly below it turn black.
        assert_eq!(bin.data(), &[0, 255, 255, 255]);
    }

    #[test]
    fn test_mean_iterative_two_levels() {
        let grid = GrayGrid::from_rows(&[&[10, 10], &[200, 200]]).unwrap();
        assert_eq!(mean_iterative_threshold(&grid.histogram()), 105);
        let bin = binarize_mean_iterative(&grid);
        assert_eq!(bin.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_mean_iterative_ramp() {
        assert_eq!(mean_iterative_threshold(&ramp().histogram()), 127);
    }

    #[test]
    fn test_mean_iterative_empty_class_defaults() {
        let white = GrayGrid::new_filled(3, 3, 255).unwrap();
        assert_eq!(mean_iterative_threshold(&white.histogram()), 127);
        assert!(binarize_mean_iterative(&white).pixels().all(|v| v == WHITE));

        let black = GrayGrid::new(3, 3).unwrap();
        assert_eq!(mean_iterative_threshold(&black.histogram()), 127);
        assert!(binarize_mean_iterative(&black).pixels().all(|v| v == BLACK));
    }

    #[test]
    fn test_mean_iterative_single_pixel_terminates() {
        for v in [0u8, 1, 77, 128, 254, 255] {
            let grid = GrayGrid::new_filled(1, 1, v).unwrap();
            let bin = binarize_mean_iterative(&grid);
            assert!(is_binary(&bin));
        }
    }

    #[test]
    fn test_mean_iterative_with_options() {
        let hist = ramp().histogram();
        let capped = MeanIterativeOptions {
            max_iterations: 1,
            ..Default::default()
        };
        // One step moves 128 -> 127 and then the cap stops the loop.
        assert_eq!(mean_iterative_threshold_with(&hist, &capped).unwrap(), 127);

        let default = MeanIterativeOptions::default();
        assert_eq!(
            mean_iterative_threshold_with(&hist, &default).unwrap(),
            mean_iterative_threshold(&hist)
        );
    }

    #[test]
    fn test_mean_iterative_options_validation() {
        let hist = ramp().histogram();
        let bad_cap = MeanIterativeOptions {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(mean_iterative_threshold_with(&hist, &bad_cap).is_err());

        let bad_start = MeanIterativeOptions {
            initial_threshold: 300,
            ..Default::default()
        };
        assert!(matches!(
            binarize_mean_iterative_with(&ramp(), &bad_start),
            Err(ColorError::InvalidParameters(_))
        ));
    }
}

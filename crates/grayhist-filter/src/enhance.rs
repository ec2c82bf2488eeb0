//! Histogram-based contrast enhancement
//!
//! Tone reproduction curve (TRC) construction for linear range stretching
//! and histogram equalization, plus the mapping that applies a TRC to a grid.
//!
//! Both mappings scale with `f64` arithmetic and truncate toward zero when
//! converting back to an intensity. Outputs are bit-exact with integer-cast
//! reference results; do not switch to round-to-nearest.
//!
//! # Degenerate inputs
//!
//! A constant grid has no range to stretch, and a grid whose pixels are all
//! 0 has no distribution to equalize. The TRC builders report these as
//! [`FilterError::DegenerateInput`]; [`stretch`] and [`equalize`] answer
//! them with an unchanged copy of the input.

use crate::{FilterError, FilterResult};
use grayhist_core::{GrayGrid, GrayGridMut, Histogram};
use log::debug;

/// A 256-entry lookup table for tone reproduction curve mapping.
///
/// Maps input intensities [0..255] to output intensities [0..255].
pub type TrcLut = [u8; 256];

/// The identity TRC: every intensity maps to itself.
pub fn identity_trc() -> TrcLut {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = i as u8;
    }
    lut
}

/// Generate a linear stretch TRC lookup table.
///
/// Maps `g` in `[minval, maxval]` to `trunc((g - minval) / (maxval - minval) * 255)`.
/// Entries below `minval` map to 0 and entries above `maxval` to 255.
///
/// # Errors
///
/// Returns [`FilterError::DegenerateInput`] if `minval >= maxval`.
pub fn stretch_trc(minval: u8, maxval: u8) -> FilterResult<TrcLut> {
    if minval >= maxval {
        return Err(FilterError::DegenerateInput(format!(
            "stretch range is empty: min {} >= max {}",
            minval, maxval
        )));
    }

    let range = f64::from(maxval - minval);
    let mut lut = [0u8; 256];

    for (i, entry) in lut.iter_mut().enumerate() {
        let g = i as i32;
        let val = if g < i32::from(minval) {
            0
        } else if g > i32::from(maxval) {
            255
        } else {
            (f64::from(g - i32::from(minval)) / range * 255.0) as i32
        };
        *entry = val as u8;
    }

    Ok(lut)
}

/// Generate a histogram equalization TRC lookup table.
///
/// With `cdf` the cumulative distribution of `hist`, `cdf_min = cdf[0]` and
/// `total` the sample count, intensity `g` maps to
/// `trunc((cdf[g] - cdf_min) / (total - cdf_min) * 255)`.
///
/// # Errors
///
/// Returns [`FilterError::DegenerateInput`] if `total == cdf_min`, which
/// happens when every sample is 0 (or the histogram is empty).
pub fn equalize_trc(hist: &Histogram) -> FilterResult<TrcLut> {
    let cdf = hist.cumulative();
    let total = cdf.total();
    let cdf_min = cdf.first();

    if total == cdf_min {
        return Err(FilterError::DegenerateInput(format!(
            "all {} samples sit in bin 0",
            total
        )));
    }

    let denom = (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    for (g, entry) in lut.iter_mut().enumerate() {
        let num = (cdf[g] - cdf_min) as f64;
        *entry = (num / denom * 255.0) as i32 as u8;
    }

    Ok(lut)
}

/// Apply a TRC lookup table to a grid in-place.
pub fn trc_map(grid: &mut GrayGridMut, lut: &TrcLut) {
    for v in grid.data_mut() {
        *v = lut[*v as usize];
    }
}

/// Minimum and maximum intensity of a grid.
///
/// The scan starts from `(255, 0)`, so any grid updates both.
pub fn grid_extremes(grid: &GrayGrid) -> (u8, u8) {
    grid.pixels()
        .fold((255u8, 0u8), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Linearly stretch the intensity range of a grid to `[0, 255]`.
///
/// The darkest sample becomes 0, the brightest becomes 255, and the rest
/// are scaled in between with truncation. A constant grid is returned
/// unchanged.
///
/// ```
/// use grayhist_core::GrayGrid;
/// use grayhist_filter::stretch;
///
/// let grid = GrayGrid::from_vec(3, 1, vec![50, 100, 150]).unwrap();
/// assert_eq!(stretch(&grid).data(), &[0, 127, 255]);
/// ```
pub fn stretch(grid: &GrayGrid) -> GrayGrid {
    let (minval, maxval) = grid_extremes(grid);
    let lut = match stretch_trc(minval, maxval) {
        Ok(lut) => lut,
        Err(e) => {
            debug!("stretch: returning input unchanged ({})", e);
            return grid.clone();
        }
    };

    debug!("stretch: mapping [{}, {}] onto [0, 255]", minval, maxval);
    let mut gm = grid.to_mut();
    trc_map(&mut gm, &lut);
    gm.into()
}

/// Equalize the histogram of a grid.
///
/// Redistributes intensities through the cumulative distribution so the
/// output histogram approximates a uniform one. A grid whose samples are
/// all 0 is returned unchanged.
pub fn equalize(grid: &GrayGrid) -> GrayGrid {
    let hist = grid.histogram();
    let lut = match equalize_trc(&hist) {
        Ok(lut) => lut,
        Err(e) => {
            debug!("equalize: returning input unchanged ({})", e);
            return grid.clone();
        }
    };

    let mut gm = grid.to_mut();
    trc_map(&mut gm, &lut);
    gm.into()
}

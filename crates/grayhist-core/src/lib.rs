//! Grayhist Core - Basic data structures for grayscale histogram processing
//!
//! This crate provides the fundamental data structures shared by every
//! grayhist algorithm:
//!
//! - [`GrayGrid`] / [`GrayGridMut`] - 8-bit grayscale sample grid (immutable / mutable)
//! - [`Histogram`] - 256-bin intensity frequency table
//! - [`CumulativeDistribution`] - running sum of a [`Histogram`]
//! - [`color`] - the single rule for reading intensity out of a color pixel

pub mod error;
pub mod grid;
pub mod histogram;

pub use error::{Error, Result};
pub use grid::{GrayGrid, GrayGridMut};
pub use histogram::{CumulativeDistribution, HISTOGRAM_BINS, Histogram};

/// Color channel helpers for packed 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
///
/// # Intensity extraction
///
/// Source rasters may carry full color even when they are meant to be
/// grayscale. [`intensity`] is the only place that decides how a color
/// pixel becomes an intensity; every decoder and grid constructor goes
/// through it. It reads the red channel, which is exact for images whose
/// channels are already equal and silently misreads true color images.
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Compose a 32-bit gray pixel with all three channels set to `val`.
    #[inline]
    pub fn compose_gray(val: u8) -> u32 {
        compose_rgb(val, val, val)
    }

    /// Intensity of a packed color pixel.
    ///
    /// Reads the red channel. Replace this function (and only this one)
    /// to switch every algorithm to a luminance-weighted conversion.
    #[inline]
    pub fn intensity(pixel: u32) -> u8 {
        red(pixel)
    }

    /// Intensity of an unpacked RGB triple, using the same rule as [`intensity`].
    #[inline]
    pub fn intensity_rgb(r: u8, g: u8, b: u8) -> u8 {
        intensity(compose_rgb(r, g, b))
    }

}

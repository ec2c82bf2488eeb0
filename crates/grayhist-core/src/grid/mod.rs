//! GrayGrid - The grayscale image container
//!
//! `GrayGrid` is the image type consumed and produced by every grayhist
//! algorithm: a `width x height` array of 8-bit intensities.
//!
//! # Sample layout
//!
//! - Samples are stored row-major, one byte per pixel
//! - Row `y` occupies `data[y * width .. (y + 1) * width]`
//!
//! # Ownership model
//!
//! `GrayGrid` uses `Arc` for cheap cloning (shared ownership) and is never
//! modified in place. To build or edit pixel data, convert to
//! [`GrayGridMut`] via [`GrayGrid::try_into_mut`] or [`GrayGrid::to_mut`],
//! then convert back with `Into<GrayGrid>`.

mod access;

use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal grid data
#[derive(Debug, Clone, PartialEq, Eq)]
struct GridData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major intensity samples
    data: Vec<u8>,
}

impl GridData {
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::IndexOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Grayscale grid
///
/// # Examples
///
/// ```
/// use grayhist_core::GrayGrid;
///
/// let grid = GrayGrid::new(640, 480).unwrap();
/// assert_eq!(grid.width(), 640);
/// assert_eq!(grid.height(), 480);
/// assert_eq!(grid.get(10, 10).unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayGrid {
    inner: Arc<GridData>,
}

impl GrayGrid {
    /// Create a new grid with all samples set to 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new grid with every sample set to `val`.
    pub fn new_filled(width: u32, height: u32, val: u8) -> Result<Self> {
        let len = Self::sample_count(width, height)?;
        Ok(Self::from_data(GridData {
            width,
            height,
            data: vec![val; len],
        }))
    }

    /// Create a grid from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, and
    /// [`Error::DimensionMismatch`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let len = Self::sample_count(width, height)?;
        if data.len() != len {
            return Err(Error::DimensionMismatch {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(Self::from_data(GridData {
            width,
            height,
            data,
        }))
    }

    /// Create a grid from a slice of equally long rows.
    ///
    /// ```
    /// use grayhist_core::GrayGrid;
    ///
    /// let grid = GrayGrid::from_rows(&[&[10, 10], &[200, 200]]).unwrap();
    /// assert_eq!(grid.get(0, 1).unwrap(), 200);
    /// ```
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            if row.len() != width as usize {
                return Err(Error::DimensionMismatch {
                    expected: width as usize,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(width, height, data)
    }

    /// Create a grid from packed `0xRRGGBBAA` pixels.
    ///
    /// Each pixel is reduced with [`color::intensity`].
    pub fn from_rgb_pixels(width: u32, height: u32, pixels: &[u32]) -> Result<Self> {
        let data = pixels.iter().map(|&p| color::intensity(p)).collect();
        Self::from_vec(width, height, data)
    }

    fn sample_count(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(width as usize * height as usize)
    }

    fn from_data(inner: GridData) -> Self {
        GrayGrid {
            inner: Arc::new(inner),
        }
    }

    /// Get the grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Total number of samples (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.data.len()
    }

    /// Get raw access to the row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Iterate over all samples in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = u8> + '_ {
        self.inner.data.iter().copied()
    }

    /// Get the number of strong references to this grid.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two grids have the same width and height.
    pub fn sizes_equal(&self, other: &GrayGrid) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a new grid with every sample passed through `f`.
    ///
    /// The source grid is left untouched.
    pub fn map<F>(&self, f: F) -> GrayGrid
    where
        F: Fn(u8) -> u8,
    {
        Self::from_data(GridData {
            width: self.inner.width,
            height: self.inner.height,
            data: self.inner.data.iter().map(|&v| f(v)).collect(),
        })
    }

    /// Try to get mutable access to the grid data.
    ///
    /// Succeeds only when this is the sole reference; otherwise the
    /// grid is handed back unchanged.
    pub fn try_into_mut(self) -> std::result::Result<GrayGridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GrayGridMut { inner: data }),
            Err(arc) => Err(GrayGrid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    pub fn to_mut(&self) -> GrayGridMut {
        GrayGridMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable grayscale grid
///
/// Allows modification of sample data. Convert back to an immutable
/// [`GrayGrid`] with `Into`.
#[derive(Debug)]
pub struct GrayGridMut {
    inner: GridData,
}

impl GrayGridMut {
    /// Get the grid width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the row-major samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get mutable access to row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set every sample to `val`.
    pub fn fill(&mut self, val: u8) {
        self.inner.data.fill(val);
    }
}

impl From<GrayGridMut> for GrayGrid {
    fn from(grid_mut: GrayGridMut) -> Self {
        GrayGrid {
            inner: Arc::new(grid_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = GrayGrid::new(100, 200).unwrap();
        assert_eq!(grid.width(), 100);
        assert_eq!(grid.height(), 200);
        assert_eq!(grid.pixel_count(), 20000);
        assert!(grid.pixels().all(|v| v == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            GrayGrid::new(0, 100),
            Err(Error::InvalidDimension {
                width: 0,
                height: 100
            })
        );
        assert!(GrayGrid::new(100, 0).is_err());
        assert!(GrayGrid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = GrayGrid::from_vec(2, 2, vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: [&[u8]; 2] = [&[1, 2], &[3]];
        assert!(GrayGrid::from_rows(&rows).is_err());
    }

    #[test]
    fn test_from_rgb_pixels_uses_red_channel() {
        let pixels = [
            color::compose_rgb(10, 99, 99),
            color::compose_rgb(20, 0, 0),
            color::compose_gray(30),
            color::compose_rgb(40, 255, 255),
        ];
        let grid = GrayGrid::from_rgb_pixels(2, 2, &pixels).unwrap();
        assert_eq!(grid.data(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_clone_shares_data() {
        let grid = GrayGrid::new(10, 10).unwrap();
        let grid2 = grid.clone();
        assert_eq!(grid.ref_count(), 2);
        drop(grid2);
        assert_eq!(grid.ref_count(), 1);
    }

    #[test]
    fn test_try_into_mut_requires_unique() {
        let grid = GrayGrid::new(4, 4).unwrap();
        let shared = grid.clone();
        let grid = grid.try_into_mut().unwrap_err();
        drop(shared);
        let mut gm = grid.try_into_mut().unwrap();
        gm.fill(9);
        let grid: GrayGrid = gm.into();
        assert!(grid.pixels().all(|v| v == 9));
    }

    #[test]
    fn test_to_mut_leaves_source_untouched() {
        let grid = GrayGrid::new_filled(3, 2, 50).unwrap();
        let mut gm = grid.to_mut();
        gm.row_mut(1).fill(7);
        let edited: GrayGrid = gm.into();
        assert_eq!(grid.row(1), &[50, 50, 50]);
        assert_eq!(edited.row(1), &[7, 7, 7]);
        assert_eq!(edited.row(0), &[50, 50, 50]);
    }

    #[test]
    fn test_map_leaves_source_untouched() {
        let grid = GrayGrid::from_rows(&[&[1, 2, 3]]).unwrap();
        let doubled = grid.map(|v| v * 2);
        assert_eq!(doubled.data(), &[2, 4, 6]);
        assert_eq!(grid.data(), &[1, 2, 3]);
    }
}

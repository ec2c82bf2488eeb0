//! Sample access functions
//!
//! Coordinate-based getters and setters. Out-of-range coordinates are a
//! programming error: the checked forms return [`Error::IndexOutOfBounds`],
//! the `_unchecked` forms panic. Coordinates are never clamped.

use super::{GrayGrid, GrayGridMut};
use crate::error::Result;

impl GrayGrid {
    /// Get the intensity at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] if `x >= width` or `y >= height`.
    pub fn get(&self, x: u32, y: u32) -> Result<u8> {
        self.inner
            .index(x, y)
            .map(|i| self.inner.data[i])
            .ok_or_else(|| self.inner.out_of_bounds(x, y))
    }

    /// Get the intensity at (x, y) without a recoverable bounds check.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        match self.inner.index(x, y) {
            Some(i) => self.inner.data[i],
            None => panic!("{}", self.inner.out_of_bounds(x, y)),
        }
    }
}

impl GrayGridMut {
    /// Get the intensity at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Result<u8> {
        self.inner
            .index(x, y)
            .map(|i| self.inner.data[i])
            .ok_or_else(|| self.inner.out_of_bounds(x, y))
    }

    /// Set the intensity at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        match self.inner.index(x, y) {
            Some(i) => {
                self.inner.data[i] = val;
                Ok(())
            }
            None => Err(self.inner.out_of_bounds(x, y)),
        }
    }

    /// Set the intensity at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, val: u8) {
        match self.inner.index(x, y) {
            Some(i) => self.inner.data[i] = val,
            None => panic!("{}", self.inner.out_of_bounds(x, y)),
        }
    }
}

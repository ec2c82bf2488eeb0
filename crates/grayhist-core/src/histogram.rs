//! Histogram generation for grayscale grids
//!
//! A [`Histogram`] counts how many samples of a grid take each of the 256
//! intensity values. A [`CumulativeDistribution`] is its running sum.
//! Both are built fresh per call and never cached on the grid.

use crate::grid::GrayGrid;
use std::ops::Index;

/// Number of bins in an 8-bit intensity histogram.
pub const HISTOGRAM_BINS: usize = 256;

/// 256-bin intensity frequency table
///
/// Invariant: the sum of all bins equals the pixel count of the source grid.
///
/// # Example
///
/// ```
/// use grayhist_core::{GrayGrid, Histogram};
///
/// let grid = GrayGrid::from_vec(2, 2, vec![0, 0, 255, 255]).unwrap();
/// let hist = Histogram::from_grid(&grid);
/// assert_eq!(hist[0], 2);
/// assert_eq!(hist[255], 2);
/// assert_eq!(hist.total(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u32; HISTOGRAM_BINS],
}

impl Histogram {
    /// Count every sample of `grid` exactly once.
    pub fn from_grid(grid: &GrayGrid) -> Self {
        let mut bins = [0u32; HISTOGRAM_BINS];
        for v in grid.pixels() {
            bins[v as usize] += 1;
        }
        Histogram { bins }
    }

    /// Create a histogram from raw bin counts.
    pub fn from_bins(bins: [u32; HISTOGRAM_BINS]) -> Self {
        Histogram { bins }
    }

    /// Get the count of intensity `val`.
    #[inline]
    pub fn count(&self, val: u8) -> u32 {
        self.bins[val as usize]
    }

    /// Get all bins.
    #[inline]
    pub fn bins(&self) -> &[u32; HISTOGRAM_BINS] {
        &self.bins
    }

    /// Iterate over `(intensity, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.bins.iter().enumerate().map(|(i, &c)| (i as u8, c))
    }

    /// Total number of counted samples.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| u64::from(c)).sum()
    }

    /// Lowest intensity with a non-zero count.
    ///
    /// Returns `None` for an empty histogram.
    pub fn min_value(&self) -> Option<u8> {
        self.bins.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Highest intensity with a non-zero count.
    pub fn max_value(&self) -> Option<u8> {
        self.bins.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Mean intensity, or `None` for an empty histogram.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: u64 = self.iter().map(|(v, c)| u64::from(v) * u64::from(c)).sum();
        Some(weighted as f64 / total as f64)
    }

    /// Running sum of the bins.
    pub fn cumulative(&self) -> CumulativeDistribution {
        CumulativeDistribution::from_histogram(self)
    }
}

impl Index<usize> for Histogram {
    type Output = u32;

    fn index(&self, index: usize) -> &u32 {
        &self.bins[index]
    }
}

impl GrayGrid {
    /// Get the intensity histogram of the grid.
    pub fn histogram(&self) -> Histogram {
        Histogram::from_grid(self)
    }
}

/// Cumulative distribution of a [`Histogram`]
///
/// Entry `i` is the number of samples with intensity `<= i`. The sequence
/// is non-decreasing and its last entry equals the total sample count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeDistribution {
    sums: [u64; HISTOGRAM_BINS],
}

impl CumulativeDistribution {
    /// Build the running sum `cdf[0] = h[0]`, `cdf[i] = cdf[i - 1] + h[i]`.
    pub fn from_histogram(hist: &Histogram) -> Self {
        let mut sums = [0u64; HISTOGRAM_BINS];
        let mut acc = 0u64;
        for (slot, &count) in sums.iter_mut().zip(hist.bins.iter()) {
            acc += u64::from(count);
            *slot = acc;
        }
        CumulativeDistribution { sums }
    }

    /// Get the cumulative count at intensity `val`.
    #[inline]
    pub fn at(&self, val: u8) -> u64 {
        self.sums[val as usize]
    }

    /// First entry of the distribution (`cdf[0]`).
    #[inline]
    pub fn first(&self) -> u64 {
        self.sums[0]
    }

    /// Last entry, equal to the total sample count.
    #[inline]
    pub fn total(&self) -> u64 {
        self.sums[HISTOGRAM_BINS - 1]
    }

    /// Get all entries.
    #[inline]
    pub fn sums(&self) -> &[u64; HISTOGRAM_BINS] {
        &self.sums
    }
}

impl Index<usize> for CumulativeDistribution {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.sums[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_uniform() {
        let grid = GrayGrid::new(100, 100).unwrap();
        let hist = grid.histogram();

        assert_eq!(hist[0], 10000);
        for i in 1..256 {
            assert_eq!(hist[i], 0);
        }
    }

    #[test]
    fn test_histogram_two_levels() {
        let grid = GrayGrid::from_vec(4, 1, vec![0, 0, 255, 255]).unwrap();
        let hist = Histogram::from_grid(&grid);
        assert_eq!(hist[0], 2);
        assert_eq!(hist[255], 2);
        assert_eq!(hist.iter().filter(|&(_, c)| c > 0).count(), 2);
    }

    #[test]
    fn test_histogram_sum_equals_pixel_count() {
        let data: Vec<u8> = (0..37u32 * 23).map(|i| (i * 7 % 256) as u8).collect();
        let grid = GrayGrid::from_vec(37, 23, data).unwrap();
        let hist = grid.histogram();
        assert_eq!(hist.total(), grid.pixel_count() as u64);
    }

    #[test]
    fn test_histogram_ignores_scan_order() {
        let a = GrayGrid::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let b = GrayGrid::from_vec(2, 3, vec![6, 5, 4, 3, 2, 1]).unwrap();
        assert_eq!(a.histogram(), b.histogram());
    }

    #[test]
    fn test_min_max_mean() {
        let grid = GrayGrid::from_rows(&[&[10, 20], &[30, 40]]).unwrap();
        let hist = grid.histogram();
        assert_eq!(hist.min_value(), Some(10));
        assert_eq!(hist.max_value(), Some(40));
        assert_eq!(hist.mean(), Some(25.0));

        let empty = Histogram::from_bins([0; HISTOGRAM_BINS]);
        assert_eq!(empty.min_value(), None);
        assert_eq!(empty.max_value(), None);
        assert_eq!(empty.mean(), None);
    }

    #[test]
    fn test_cumulative_distribution() {
        let grid = GrayGrid::from_vec(5, 1, vec![0, 1, 1, 3, 255]).unwrap();
        let cdf = grid.histogram().cumulative();
        assert_eq!(cdf.first(), 1);
        assert_eq!(cdf.at(1), 3);
        assert_eq!(cdf.at(2), 3);
        assert_eq!(cdf.at(3), 4);
        assert_eq!(cdf[254], 4);
        assert_eq!(cdf.total(), 5);
        assert!(cdf.sums().windows(2).all(|w| w[0] <= w[1]));
    }
}

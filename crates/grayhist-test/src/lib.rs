//! grayhist-test - Regression test framework for grayhist
//!
//! Supports three modes, selected through the `REGTEST_MODE` environment
//! variable:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use grayhist_test::RegParams;
//!
//! let mut rp = RegParams::new("binarize");
//! rp.compare_values(128.0, threshold as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use grayhist_core::GrayGrid;

/// Install an `env_logger` for the current test binary.
///
/// Honors `RUST_LOG`; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Load a test image from the test data directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "ramp.pgm")
pub fn load_test_image(name: &str) -> TestResult<GrayGrid> {
    let path = test_data_path(name);
    grayhist_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Build a `width x height` grid whose intensity ramps 0..=255 along x.
pub fn make_ramp(width: u32, height: u32) -> GrayGrid {
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..height {
        for x in 0..width {
            let val = if width == 1 { 0 } else { x * 255 / (width - 1) };
            data.push(val as u8);
        }
    }
    GrayGrid::from_vec(width, height, data).expect("ramp dimensions")
}

/// Build a low-contrast grid with values confined to `[lo, hi]`.
///
/// Values follow a deterministic diagonal pattern so every test run
/// sees the same image.
pub fn make_low_contrast(width: u32, height: u32, lo: u8, hi: u8) -> GrayGrid {
    let span = u32::from(hi - lo) + 1;
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(lo + ((x + 2 * y) % span) as u8);
        }
    }
    GrayGrid::from_vec(width, height, data).expect("low contrast dimensions")
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // grayhist-test is at crates/grayhist-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

//! pcseg-test - Regression test framework for page segmentation
//!
//! Tests run in one of three modes, chosen by `REGTEST_MODE`:
//!
//! - **generate**: write golden files
//! - **compare** (default): compare results with golden files
//! - **display**: write results for inspection only
//!
//! Segmentation fixtures are synthetic masks built in memory with
//! [`MaskBuilder`], so most checks go through [`RegParams::compare_values`]
//! and [`RegParams::compare_boxes`] rather than golden images.
//!
//! ```ignore
//! use pcseg_test::{MaskBuilder, RegParams};
//!
//! let mut rp = RegParams::new("xycut");
//! let mask = MaskBuilder::new(100, 100)?.block(40, 40, 60, 60, Color::RED).build();
//! rp.compare_values(1.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod mask;
mod params;

pub use error::{TestError, TestResult};
pub use mask::MaskBuilder;
pub use params::{RegParams, RegTestMode};

/// pcseg-test lives at crates/pcseg-test
fn workspace_root() -> String {
    format!("{}/../..", env!("CARGO_MANIFEST_DIR"))
}

/// Directory holding golden files
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Directory receiving regression output
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

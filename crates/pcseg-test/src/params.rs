//! Regression test state and checks

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use pcseg_core::{Box, ImageFormat, Pix};
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Write golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Write outputs without comparing
    Display,
}

impl RegTestMode {
    /// Read the mode from `REGTEST_MODE`.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// State of one regression test.
///
/// Every check bumps the index, so failures can be traced back to the
/// n-th check of the test.
pub struct RegParams {
    pub test_name: String,
    index: usize,
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a test named `test_name`, taking the mode from the
    /// environment.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two values, allowing a difference of `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            return false;
        }
        true
    }

    /// Compare two box lists, in order, allowing each coordinate to differ
    /// by `delta` pixels.
    pub fn compare_boxes(&mut self, expected: &[Box], actual: &[Box], delta: i32) -> bool {
        self.index += 1;
        if expected.len() != actual.len() {
            self.fail(format!(
                "Failure in {}_reg: box comparison for index {} - count {} vs {}\n\
                 expected = {:?}\n\
                 actual = {:?}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len(),
                expected,
                actual
            ));
            return false;
        }

        for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
            let close = (e.x - a.x).abs() <= delta
                && (e.y - a.y).abs() <= delta
                && (e.right() - a.right()).abs() <= delta
                && (e.bottom() - a.bottom()).abs() <= delta;
            if !close {
                self.fail(format!(
                    "Failure in {}_reg: box comparison for index {} - box {}: \
                     expected {:?}, actual {:?}, delta {}",
                    self.test_name, self.index, i, e, a, delta
                ));
                return false;
            }
        }
        true
    }

    /// Compare two images for identical size and pixels.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;
        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - size {}x{} vs {}x{}",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix2.width(),
                pix2.height()
            ));
            return false;
        }
        if let Some(pos) = first_difference(pix1, pix2) {
            let (x, y) = (pos as u32 % pix1.width(), pos as u32 / pix1.width());
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - pixel mismatch at ({}, {})",
                self.test_name, self.index, x, y
            ));
            return false;
        }
        true
    }

    /// Write an image to the regout directory and check it against its
    /// golden file.
    pub fn write_pix_and_check(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        self.index += 1;
        let local_path = self.local_path(format.extension());
        pcseg_io::write_image(pix, &local_path, format).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;
        self.check_file(&local_path)
    }

    /// Compare two byte strings for equality.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;
        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ));
            return false;
        }
        true
    }

    fn local_path(&self, ext: &str) -> String {
        format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        )
    }

    /// Generate copies the file to golden, compare checks it, display
    /// leaves it alone.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    ));
                    return Ok(());
                }
                let same = fs::read(local_path)? == fs::read(&golden_path)?
                    || same_image_files(local_path, &golden_path);
                if !same {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }
        Ok(())
    }

    /// Report the outcome and return `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();
        self.success
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

/// Index of the first differing pixel of two same-sized images
fn first_difference(pix1: &Pix, pix2: &Pix) -> Option<usize> {
    pix1.data()
        .iter()
        .zip(pix2.data())
        .position(|(a, b)| a != b)
}

/// Decode both files and compare pixels, for encodings that differ only
/// in metadata or compression.
fn same_image_files(path1: &str, path2: &str) -> bool {
    match (pcseg_io::read_image(path1), pcseg_io::read_image(path2)) {
        (Ok(p1), Ok(p2)) => p1.sizes_equal(&p2) && first_difference(&p1, &p2).is_none(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcseg_core::Color;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params_values");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 3);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_boxes() {
        let mut rp = RegParams::new("params_boxes");
        let a = [Box::new_unchecked(10, 10, 20, 20)];
        let b = [Box::new_unchecked(11, 10, 19, 21)];
        assert!(rp.compare_boxes(&a, &b, 1));
        assert!(rp.is_success());
        assert!(!rp.compare_boxes(&a, &b, 0));
        assert!(!rp.compare_boxes(&a, &[], 5));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_compare_pix() {
        let mut rp = RegParams::new("params_pix");
        let p1 = Pix::new_filled(4, 3, Color::WHITE).unwrap();
        assert!(rp.compare_pix(&p1, &p1.to_mut().into()));
        let mut pm = p1.to_mut();
        pm.set_rgb(2, 1, 0, 0, 0).unwrap();
        assert!(!rp.compare_pix(&p1, &pm.into()));
        assert!(rp.failures()[0].contains("(2, 1)"));
    }
}

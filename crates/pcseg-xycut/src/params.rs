//! Cut thresholds derived from the nominal character height

use crate::{XyCutError, XyCutResult};

/// Thresholds used by the row and column cuts.
///
/// All four values are derived once per page from the nominal character
/// height, scaled into the working resolution:
///
/// ```text
/// resize_factor         = working_height / original_height
/// px_threshold_*        = round(char_height * resize_factor)
/// split_size_horizontal = round(char_height * 2 * resize_factor)
/// split_size_vertical   = round(char_height * resize_factor)
/// ```
///
/// Rounding is half-to-even.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutParams {
    /// Matching pixels a row needs to count as occupied
    pub px_threshold_line: u32,
    /// Matching pixels a column needs to count as occupied
    pub px_threshold_column: u32,
    /// Separator width for the row cut (gaps between text blocks)
    pub split_size_horizontal: u32,
    /// Separator width for the column cut
    pub split_size_vertical: u32,
}

impl CutParams {
    /// Derive the thresholds for a page.
    ///
    /// # Errors
    ///
    /// Returns [`XyCutError::InvalidParameter`] if either height is 0.
    pub fn from_char_height(
        char_height: u32,
        working_height: u32,
        original_height: u32,
    ) -> XyCutResult<Self> {
        let factor = resize_factor(working_height, original_height)?;
        let scaled = |v: f64| (v * factor).round_ties_even() as u32;
        let ch = char_height as f64;
        Ok(Self {
            px_threshold_line: scaled(ch),
            px_threshold_column: scaled(ch),
            split_size_horizontal: scaled(ch * 2.0),
            split_size_vertical: scaled(ch),
        })
    }

    /// Use the same value for every threshold.
    ///
    /// Handy when the mask is already at the nominal resolution.
    pub fn uniform(value: u32) -> Self {
        Self {
            px_threshold_line: value,
            px_threshold_column: value,
            split_size_horizontal: value,
            split_size_vertical: value,
        }
    }
}

/// `working_height / original_height`
pub fn resize_factor(working_height: u32, original_height: u32) -> XyCutResult<f64> {
    if working_height == 0 || original_height == 0 {
        return Err(XyCutError::InvalidParameter(format!(
            "heights must be positive, got working {} / original {}",
            working_height, original_height
        )));
    }
    Ok(working_height as f64 / original_height as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_page() {
        // 3000 px page, 300 px working height, 30 px glyphs
        let p = CutParams::from_char_height(30, 300, 3000).unwrap();
        assert_eq!(p.px_threshold_line, 3);
        assert_eq!(p.px_threshold_column, 3);
        assert_eq!(p.split_size_horizontal, 6);
        assert_eq!(p.split_size_vertical, 3);
    }

    #[test]
    fn test_rounding_half_even() {
        // 10 * 0.25 = 2.5 -> 2, 14 * 0.25 = 3.5 -> 4
        let p = CutParams::from_char_height(10, 100, 400).unwrap();
        assert_eq!(p.px_threshold_line, 2);
        assert_eq!(p.split_size_horizontal, 5);
        let p = CutParams::from_char_height(14, 100, 400).unwrap();
        assert_eq!(p.px_threshold_line, 4);
        assert_eq!(p.split_size_horizontal, 7);
    }

    #[test]
    fn test_rounding_up() {
        // 27 * 0.1 = 2.7
        let p = CutParams::from_char_height(27, 300, 3000).unwrap();
        assert_eq!(p.px_threshold_column, 3);
        assert_eq!(p.split_size_horizontal, 5);
    }

    #[test]
    fn test_zero_heights_rejected() {
        assert!(CutParams::from_char_height(30, 0, 3000).is_err());
        assert!(CutParams::from_char_height(30, 300, 0).is_err());
    }

    #[test]
    fn test_uniform() {
        let p = CutParams::uniform(4);
        assert_eq!(p.split_size_horizontal, 4);
        assert_eq!(p.px_threshold_line, 4);
    }
}

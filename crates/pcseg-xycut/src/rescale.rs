//! Mapping working-resolution rectangles back to the original page

use crate::params::resize_factor;
use crate::region::Region;
use crate::XyCutResult;

/// Rescales working-resolution coordinates by `original_height /
/// working_height`.
///
/// Each coordinate is rounded on its own, half to even, and clamped to
/// the original page bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rescaler {
    inverse: f64,
    original_width: Option<u32>,
    original_height: u32,
}

impl Rescaler {
    /// # Errors
    ///
    /// Returns [`XyCutError::InvalidParameter`](crate::XyCutError) if
    /// either height is 0.
    pub fn new(working_height: u32, original_height: u32) -> XyCutResult<Self> {
        resize_factor(working_height, original_height)?;
        Ok(Self {
            inverse: original_height as f64 / working_height as f64,
            original_width: None,
            original_height,
        })
    }

    /// Clamp x coordinates to the original page width.
    pub fn with_original_width(mut self, width: u32) -> Self {
        self.original_width = Some(width);
        self
    }

    /// `original_height / working_height`
    pub fn inverse(&self) -> f64 {
        self.inverse
    }

    /// Rescale a single coordinate, rounding half to even.
    pub fn scale(&self, v: u32) -> u32 {
        (v as f64 * self.inverse).round_ties_even() as u32
    }

    /// Rescale a single coordinate, truncating toward zero.
    ///
    /// Used when cropping the page image.
    pub fn scale_truncated(&self, v: u32) -> u32 {
        (v as f64 * self.inverse) as u32
    }

    /// Rescale a rectangle into original-page pixels.
    ///
    /// Returns `None` when the rescaled rectangle has no area.
    pub fn rescale(&self, region: &Region) -> Option<Region> {
        let max_x = self.original_width.unwrap_or(u32::MAX);
        let max_y = self.original_height;
        let out = Region {
            x_start: self.scale(region.x_start).min(max_x),
            y_start: self.scale(region.y_start).min(max_y),
            x_end: self.scale(region.x_end).min(max_x),
            y_end: self.scale(region.y_end).min(max_y),
            finalized: region.finalized,
        };
        (!out.is_empty()).then_some(out)
    }

    /// Crop rectangle in original-page pixels, truncating each coordinate.
    pub fn crop_box(&self, region: &Region) -> pcseg_core::Box {
        pcseg_core::Box::from_corners(
            self.scale_truncated(region.x_start) as i32,
            self.scale_truncated(region.y_start) as i32,
            self.scale_truncated(region.x_end) as i32,
            self.scale_truncated(region.y_end) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_factor() {
        let r = Rescaler::new(300, 3000).unwrap();
        assert_eq!(r.inverse(), 10.0);
        let out = r.rescale(&Region::new(40, 40, 60, 60)).unwrap();
        assert_eq!(
            (out.x_start, out.y_start, out.x_end, out.y_end),
            (400, 400, 600, 600)
        );
    }

    #[test]
    fn test_half_even_per_coordinate() {
        // inverse 2.5
        let r = Rescaler::new(2, 5).unwrap();
        assert_eq!(r.scale(1), 2); // 2.5
        assert_eq!(r.scale(3), 8); // 7.5
        assert_eq!(r.scale(2), 5);
        assert_eq!(r.scale_truncated(3), 7);
    }

    #[test]
    fn test_clamped_to_page() {
        let r = Rescaler::new(3, 10).unwrap().with_original_width(7);
        // both ends rescale to 10; x is clamped to the page width
        let out = r.rescale(&Region::new(0, 0, 3, 3)).unwrap();
        assert_eq!((out.x_end, out.y_end), (7, 10));
    }

    #[test]
    fn test_degenerate_dropped() {
        // 1 * 0.25 rounds to 0
        let r = Rescaler::new(4, 1).unwrap();
        assert!(r.rescale(&Region::new(0, 0, 1, 4)).is_none());
    }

    #[test]
    fn test_crop_box() {
        let r = Rescaler::new(300, 1000).unwrap();
        let b = r.crop_box(&Region::new(10, 20, 31, 40));
        // 33.3, 66.6, 103.3, 133.3
        assert_eq!((b.x, b.y, b.right(), b.bottom()), (33, 66, 103, 133));
    }
}

//! Projection profiles
//!
//! Scans a region of the mask along rows or columns and marks each line
//! as occupied once enough pixels of the target class have been seen.

use crate::palette::ColorMatch;
use crate::region::{Axis, Region};
use crate::{XyCutError, XyCutResult};
use pcseg_core::{Color, Pix};

/// Occupied flags for the rows or columns of one region.
///
/// Index `i` describes absolute row/column `offset + i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indication {
    offset: u32,
    occupied: Vec<bool>,
}

impl Indication {
    /// Build an indication from explicit flags.
    pub fn new(offset: u32, occupied: Vec<bool>) -> Self {
        Self { offset, occupied }
    }

    /// Absolute index of the first flag
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// One past the absolute index of the last flag
    pub fn end(&self) -> u32 {
        self.offset + self.occupied.len() as u32
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Flag of absolute row/column `index`, `None` outside the region.
    pub fn get(&self, index: u32) -> Option<bool> {
        index
            .checked_sub(self.offset)
            .and_then(|i| self.occupied.get(i as usize).copied())
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.occupied
    }

    /// Number of occupied lines
    pub fn count_occupied(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }
}

/// Count matching pixels until `px_threshold` is reached.
///
/// The count is compared after each match, so a threshold of 0 still
/// needs one matching pixel.
#[inline]
fn reaches_threshold(
    pixels: impl Iterator<Item = u32>,
    target: Color,
    px_threshold: u32,
    color_match: ColorMatch,
) -> bool {
    let mut count = 0u32;
    for pixel in pixels {
        if color_match.matches(pixel, target) {
            count += 1;
            if count >= px_threshold {
                return true;
            }
        }
    }
    false
}

/// Build the projection profile of `region` along `axis`.
///
/// For [`Axis::Rows`] the result has one flag per row of the region, each
/// row being scanned across the region's columns; [`Axis::Columns`] is the
/// transpose.
///
/// # Errors
///
/// Returns [`XyCutError::InvalidRegion`] for an empty region and
/// [`XyCutError::InvalidParameter`] if the region exceeds the mask.
pub fn indicate(
    mask: &Pix,
    region: &Region,
    axis: Axis,
    target: Color,
    px_threshold: u32,
    color_match: ColorMatch,
) -> XyCutResult<Indication> {
    region.validate()?;
    if region.x_end > mask.width() || region.y_end > mask.height() {
        return Err(XyCutError::InvalidParameter(format!(
            "region {:?} exceeds mask {}x{}",
            region,
            mask.width(),
            mask.height()
        )));
    }

    let (xs, xe) = (region.x_start as usize, region.x_end as usize);
    let occupied = match axis {
        Axis::Rows => (region.y_start..region.y_end)
            .map(|y| {
                let row = &mask.row_data(y)[xs..xe];
                reaches_threshold(row.iter().copied(), target, px_threshold, color_match)
            })
            .collect(),
        Axis::Columns => (region.x_start..region.x_end)
            .map(|x| {
                let column =
                    (region.y_start..region.y_end).map(|y| mask.get_pixel_unchecked(x, y));
                reaches_threshold(column, target, px_threshold, color_match)
            })
            .collect(),
    };

    let offset = match axis {
        Axis::Rows => region.y_start,
        Axis::Columns => region.x_start,
    };
    Ok(Indication::new(offset, occupied))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// White 10x6 mask with a red run of `len` pixels on row 2 from x = 1,
    /// and a red column of 4 pixels at x = 8.
    fn mask_with_run(len: u32) -> Pix {
        let mut pm = Pix::new_filled(10, 6, Color::WHITE).unwrap().to_mut();
        for x in 1..1 + len {
            pm.set_rgb(x, 2, 255, 0, 0).unwrap();
        }
        for y in 1..5 {
            pm.set_rgb(8, y, 255, 0, 0).unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_row_threshold_boundary() {
        let pix = mask_with_run(5);
        let region = Region::new(0, 0, 8, 6);
        // run of 5 against thresholds 5 and 6
        let ind = indicate(&pix, &region, Axis::Rows, Color::RED, 5, ColorMatch::Exact).unwrap();
        assert_eq!(ind.get(2), Some(true));
        let ind = indicate(&pix, &region, Axis::Rows, Color::RED, 6, ColorMatch::Exact).unwrap();
        assert_eq!(ind.get(2), Some(false));
        assert_eq!(ind.count_occupied(), 0);
    }

    #[test]
    fn test_columns_scan_region_rows_only() {
        let pix = mask_with_run(3);
        // rows 1..3 cover two pixels of the x = 8 column
        let region = Region::new(0, 1, 10, 3);
        let ind =
            indicate(&pix, &region, Axis::Columns, Color::RED, 2, ColorMatch::Exact).unwrap();
        assert_eq!(ind.len(), 10);
        assert_eq!(ind.get(8), Some(true));
        assert_eq!(ind.get(1), Some(false));
        let ind =
            indicate(&pix, &region, Axis::Columns, Color::RED, 3, ColorMatch::Exact).unwrap();
        assert_eq!(ind.get(8), Some(false));
    }

    #[test]
    fn test_offset_and_length() {
        let pix = mask_with_run(3);
        let region = Region::new(2, 1, 9, 5);
        let ind = indicate(&pix, &region, Axis::Rows, Color::RED, 1, ColorMatch::Exact).unwrap();
        assert_eq!(ind.offset(), 1);
        assert_eq!(ind.end(), 5);
        assert_eq!(ind.as_slice(), &[true, true, true, true]);
        assert_eq!(ind.get(0), None);
        assert_eq!(ind.get(5), None);
    }

    #[test]
    fn test_zero_threshold_needs_a_match() {
        let pix = Pix::new_filled(4, 4, Color::WHITE).unwrap();
        let region = Region::full(&pix);
        let ind = indicate(&pix, &region, Axis::Rows, Color::RED, 0, ColorMatch::Exact).unwrap();
        assert_eq!(ind.count_occupied(), 0);
    }

    #[test]
    fn test_other_class_ignored() {
        let pix = mask_with_run(6);
        let region = Region::full(&pix);
        let ind =
            indicate(&pix, &region, Axis::Rows, Color::GREEN, 1, ColorMatch::Exact).unwrap();
        assert_eq!(ind.count_occupied(), 0);
    }

    #[test]
    fn test_invalid_regions() {
        let pix = mask_with_run(2);
        let empty = Region::new(3, 0, 3, 6);
        assert!(matches!(
            indicate(&pix, &empty, Axis::Rows, Color::RED, 1, ColorMatch::Exact),
            Err(XyCutError::InvalidRegion { .. })
        ));
        let outside = Region::new(0, 0, 11, 6);
        assert!(matches!(
            indicate(&pix, &outside, Axis::Columns, Color::RED, 1, ColorMatch::Exact),
            Err(XyCutError::InvalidParameter(_))
        ));
    }
}

//! Box - Rectangle regions
//!
//! A `Box` is the image-space rectangle used for cropping and rendering.
//! Coordinates are signed so that boxes partially outside an image can be
//! represented and then clipped.

use crate::error::{Error, Result};

/// A rectangle region
///
/// The right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box from two corner points
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x, w) = if x1 <= x2 {
            (x1, x2 - x1)
        } else {
            (x2, x1 - x2)
        };
        let (y, h) = if y1 <= y2 {
            (y1, y2 - y1)
        } else {
            (y2, y1 - y2)
        };
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Box {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }

    /// Clip the box to fit within bounds
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        self.intersect(&Box::new_unchecked(0, 0, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_new() {
        assert!(Box::new(0, 0, -1, 5).is_err());
        let b = Box::new(10, 20, 30, 40).unwrap();
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 60);
        assert_eq!(b.area(), 1200);
    }

    #[test]
    fn test_from_corners() {
        let b = Box::from_corners(50, 60, 10, 20);
        assert_eq!(b, Box::new_unchecked(10, 20, 40, 40));
    }

    #[test]
    fn test_intersect_and_clip() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        let b = Box::new_unchecked(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Box::new_unchecked(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Box::new_unchecked(10, 0, 5, 5)), None);

        let c = Box::new_unchecked(-5, 8, 20, 20);
        assert_eq!(c.clip(10, 10), Some(Box::new_unchecked(0, 8, 10, 2)));
    }

    #[test]
    fn test_empty() {
        assert!(Box::new_unchecked(3, 3, 0, 5).is_empty());
        assert!(Box::new_unchecked(3, 3, 2, 0).is_empty());
        assert!(!Box::new_unchecked(3, 3, 2, 2).is_empty());
    }
}

//! Rectangles, intervals and gaps
//!
//! All coordinates are working-resolution pixels with exclusive ends:
//! a [`Region`] covers columns `x_start..x_end` and rows `y_start..y_end`.

use crate::{XyCutError, XyCutResult};
use pcseg_core::Pix;

/// Scan direction of a cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// One indicator per row; cuts along y
    Rows,
    /// One indicator per column; cuts along x
    Columns,
}

/// Candidate rectangle of the cut controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x_start: u32,
    pub y_start: u32,
    pub x_end: u32,
    pub y_end: u32,
    /// Set once the rectangle could not be subdivided further
    pub finalized: bool,
}

impl Region {
    /// Create a pending region.
    pub const fn new(x_start: u32, y_start: u32, x_end: u32, y_end: u32) -> Self {
        Self {
            x_start,
            y_start,
            x_end,
            y_end,
            finalized: false,
        }
    }

    /// Pending region spanning the whole image.
    pub fn full(pix: &Pix) -> Self {
        Self::new(0, 0, pix.width(), pix.height())
    }

    /// Region spanning a row interval and a column interval.
    pub fn from_intervals(rows: Interval, columns: Interval) -> Self {
        Self::new(columns.start, rows.start, columns.end, rows.end)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x_end.saturating_sub(self.x_start)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y_end.saturating_sub(self.y_start)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check for zero area or inverted bounds
    pub fn is_empty(&self) -> bool {
        self.x_start >= self.x_end || self.y_start >= self.y_end
    }

    /// Extent of the region along an axis
    pub fn extent(&self, axis: Axis) -> Interval {
        match axis {
            Axis::Rows => Interval::new(self.y_start, self.y_end),
            Axis::Columns => Interval::new(self.x_start, self.x_end),
        }
    }

    /// Check that `other` lies within this region.
    pub fn contains(&self, other: &Region) -> bool {
        other.x_start >= self.x_start
            && other.y_start >= self.y_start
            && other.x_end <= self.x_end
            && other.y_end <= self.y_end
    }

    /// Reject zero-area or inverted regions.
    pub(crate) fn validate(&self) -> XyCutResult<()> {
        if self.x_start >= self.x_end {
            return Err(XyCutError::InvalidRegion {
                start: self.x_start,
                end: self.x_end,
            });
        }
        if self.y_start >= self.y_end {
            return Err(XyCutError::InvalidRegion {
                start: self.y_start,
                end: self.y_end,
            });
        }
        Ok(())
    }

    /// Convert to a core [`Box`](pcseg_core::Box).
    pub fn to_box(&self) -> pcseg_core::Box {
        pcseg_core::Box::new_unchecked(
            self.x_start as i32,
            self.y_start as i32,
            self.width() as i32,
            self.height() as i32,
        )
    }
}

/// Kept sub-range `start..end` of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Maximal run of unoccupied rows or columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gap {
    /// First unoccupied index (absolute image coordinate)
    pub start: u32,
    /// Run length, at least 1
    pub length: u32,
}

impl Gap {
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// One past the last unoccupied index
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.length
    }
}

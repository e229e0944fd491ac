//! Synthetic classifier masks

use crate::TestResult;
use pcseg_core::{Box, Color, Pix, PixMut};

/// Builds a mask the way a pixel classifier would paint it: a background
/// color with solid class-colored blocks on top.
///
/// Block coordinates are `(x0, y0, x1, y1)` with exclusive ends and are
/// clipped to the mask.
pub struct MaskBuilder {
    pix: PixMut,
}

impl MaskBuilder {
    /// White mask of the given size
    pub fn new(width: u32, height: u32) -> TestResult<Self> {
        Self::with_background(width, height, Color::WHITE)
    }

    pub fn with_background(width: u32, height: u32, background: Color) -> TestResult<Self> {
        Ok(Self {
            pix: Pix::new_filled(width, height, background)?.to_mut(),
        })
    }

    /// Paint a solid block.
    pub fn block(mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) -> Self {
        let b = Box::from_corners(x0 as i32, y0 as i32, x1 as i32, y1 as i32);
        self.pix.fill_box_color(&b, color);
        self
    }

    /// Paint a horizontal run of `len` pixels starting at `(x, y)`.
    pub fn hrun(self, x: u32, y: u32, len: u32, color: Color) -> Self {
        self.block(x, y, x + len, y + 1, color)
    }

    /// Paint a vertical run of `len` pixels starting at `(x, y)`.
    pub fn vrun(self, x: u32, y: u32, len: u32, color: Color) -> Self {
        self.block(x, y, x + 1, y + len, color)
    }

    /// Paint single pixels.
    pub fn dots(mut self, points: &[(u32, u32)], color: Color) -> Self {
        let val = color.to_pixel32();
        for &(x, y) in points {
            let _ = self.pix.set_pixel(x, y, val);
        }
        self
    }

    pub fn build(self) -> Pix {
        self.pix.into()
    }
}

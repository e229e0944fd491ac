//! Rendering of rectangle outlines
//!
//! Used to paint segment outlines onto a copy of a classifier mask for
//! visual inspection.

use super::PixMut;
use crate::box_::Box;
use crate::color;
use crate::error::{Error, Result};

/// RGB color for matching and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red color
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    /// Green color
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    /// Blue color
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };

    /// Compose as 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        color::compose_rgb(self.r, self.g, self.b)
    }

    /// Read the RGB part of a 32-bit pixel
    pub fn from_pixel32(pixel: u32) -> Self {
        let (r, g, b) = color::extract_rgb(pixel);
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl PixMut {
    /// Fill a box (clipped to the image) with a color.
    pub fn fill_box_color(&mut self, b: &Box, color: Color) {
        let Some(clipped) = b.clip(self.width() as i32, self.height() as i32) else {
            return;
        };
        let val = color.to_pixel32();
        for y in clipped.y..clipped.bottom() {
            let row = self.row_data_mut(y as u32);
            row[clipped.x as usize..clipped.right() as usize].fill(val);
        }
    }

    /// Render a box outline with a specific color.
    ///
    /// The outline is drawn inside the box, `width` pixels thick. Parts of
    /// the outline outside the image are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `width` is 0.
    pub fn render_box_color(&mut self, b: &Box, width: u32, color: Color) -> Result<()> {
        if width == 0 {
            return Err(Error::InvalidParameter(
                "outline width must be positive".to_string(),
            ));
        }
        if b.is_empty() {
            return Ok(());
        }
        let t = (width as i32).min(b.w).min(b.h);

        // top, bottom, left, right bands
        self.fill_box_color(&Box::new_unchecked(b.x, b.y, b.w, t), color);
        self.fill_box_color(&Box::new_unchecked(b.x, b.bottom() - t, b.w, t), color);
        self.fill_box_color(&Box::new_unchecked(b.x, b.y, t, b.h), color);
        self.fill_box_color(&Box::new_unchecked(b.right() - t, b.y, t, b.h), color);
        Ok(())
    }
}

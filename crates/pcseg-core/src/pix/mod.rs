//! PIX - The image container
//!
//! The `Pix` structure holds a color-coded classifier mask or a page image.
//! Every pixel is a packed 32-bit `0xRRGGBBAA` word, one word per pixel,
//! rows stored top to bottom without padding.
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership), so the same mask
//! can be read concurrently by several segmentation passes. To modify pixel
//! data, copy it into a `PixMut` with [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.

mod access;
mod clip;
pub mod graphics;

pub use graphics::Color;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// PNM format (PPM/PGM)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel (3 for RGB, 4 for RGBA)
    spp: u32,
    /// Input file format
    informat: ImageFormat,
    /// The image data, one packed word per pixel
    data: Vec<u32>,
}

/// PIX - Image container
///
/// # Examples
///
/// ```
/// use pcseg_core::{Color, Pix};
///
/// let pix = Pix::new_filled(640, 300, Color::WHITE).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.get_rgb(10, 10), Some((255, 255, 255)));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new RGB PIX with the specified dimensions.
    ///
    /// The image data is initialized to zero (transparent black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let data = vec![0u32; width as usize * height as usize];
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                spp: 3,
                informat: ImageFormat::Unknown,
                data,
            }),
        })
    }

    /// Create a new RGB PIX with every pixel set to `color`.
    pub fn new_filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut pix = Pix::new(width, height)?.to_mut();
        pix.fill(color);
        Ok(pix.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Set the samples per pixel (3 for RGB, 4 for RGBA).
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        if spp != 3 && spp != 4 {
            return Err(Error::InvalidSpp(spp));
        }
        self.inner.spp = spp;
        Ok(())
    }

    /// Set the input file format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get mutable access to the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        let val = color.to_pixel32();
        self.inner.data.fill(val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}

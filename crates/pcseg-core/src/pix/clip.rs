//! Rectangular extraction

use super::Pix;
use crate::box_::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Extract a rectangular sub-region from the image.
    ///
    /// The box is clipped to the image bounds first; the result has the
    /// size of the clipped box and keeps the samples per pixel of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the box does not intersect
    /// the image.
    pub fn clip_rectangle(&self, region: &Box) -> Result<Pix> {
        let clipped = region
            .clip(self.width() as i32, self.height() as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "clip region {:?} does not intersect {}x{} image",
                    region,
                    self.width(),
                    self.height()
                ))
            })?;

        let (bx, by) = (clipped.x as u32, clipped.y as u32);
        let (bw, bh) = (clipped.w as u32, clipped.h as u32);

        let mut out = Pix::new(bw, bh)?.to_mut();
        out.set_spp(self.spp())?;
        out.set_informat(self.informat());
        for y in 0..bh {
            let src = &self.row_data(by + y)[bx as usize..(bx + bw) as usize];
            out.row_data_mut(y).copy_from_slice(src);
        }
        Ok(out.into())
    }
}

//! Image scaling operations
//!
//! | Rust function | Purpose |
//! |---|---|
//! | `scale_to_height` | Resize to a fixed height keeping the aspect ratio |
//! | `scale_to_size` | Resize to an explicit width and height |
//! | `scaled_width` | Width that `scale_to_height` produces |

use crate::{TransformError, TransformResult};
use pcseg_core::{Pix, color};

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling; output colors are always input colors
    #[default]
    Sampling,
    /// Area mapping: each output pixel is the coverage-weighted mean of the
    /// input pixels under it. Enlargement falls back to sampling.
    AreaMap,
}

/// Width of an image of `width x height` scaled to `target_height`.
///
/// Uses the truncating conversion of `width * (target_height / height)`,
/// never returning less than 1.
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    let factor = target_height as f64 / height as f64;
    ((width as f64 * factor) as u32).max(1)
}

/// Scale an image to the given height, keeping the aspect ratio.
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] if `height` is 0.
pub fn scale_to_height(pix: &Pix, height: u32, method: ScaleMethod) -> TransformResult<Pix> {
    if height == 0 {
        return Err(TransformError::InvalidScaleFactor(
            "target height must be positive".to_string(),
        ));
    }
    let width = scaled_width(pix.width(), pix.height(), height);
    scale_to_size(pix, width, height, method)
}

/// Scale an image to an explicit size.
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] if either target
/// dimension is 0.
pub fn scale_to_size(
    pix: &Pix,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Pix> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "target size must be positive, got {}x{}",
            width, height
        )));
    }
    if width == pix.width() && height == pix.height() {
        return Ok(pix.clone());
    }

    let enlarging = width > pix.width() || height > pix.height();
    match method {
        ScaleMethod::AreaMap if !enlarging => scale_area_map(pix, width, height),
        _ => scale_by_sampling(pix, width, height),
    }
}

/// Nearest-neighbor scaling: output pixel `d` reads input pixel
/// `floor(d * src / dst)`.
fn scale_by_sampling(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let (sw, sh) = (pix.width() as u64, pix.height() as u64);
    let xmap: Vec<usize> = (0..width as u64)
        .map(|x| ((x * sw / width as u64).min(sw - 1)) as usize)
        .collect();

    let mut out = Pix::new(width, height)?.to_mut();
    out.set_spp(pix.spp())?;
    for y in 0..height {
        let sy = ((y as u64 * sh / height as u64).min(sh - 1)) as u32;
        let src = pix.row_data(sy);
        let dst = out.row_data_mut(y);
        for (d, &sx) in dst.iter_mut().zip(&xmap) {
            *d = src[sx];
        }
    }
    Ok(out.into())
}

/// Coverage of the input cells `[first, first + weights.len())` by one
/// output cell.
struct Span {
    first: usize,
    weights: Vec<f64>,
}

/// For each output index, the input indices it covers and by how much.
fn area_spans(src_len: u32, dst_len: u32) -> Vec<Span> {
    let ratio = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * ratio;
            let end = ((d + 1) as f64 * ratio).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len as usize);
            let weights = (first..last)
                .map(|i| end.min((i + 1) as f64) - start.max(i as f64))
                .collect();
            Span { first, weights }
        })
        .collect()
}

fn scale_area_map(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let xspans = area_spans(pix.width(), width);
    let yspans = area_spans(pix.height(), height);

    let mut out = Pix::new(width, height)?.to_mut();
    out.set_spp(pix.spp())?;
    for (y, ys) in yspans.iter().enumerate() {
        for (x, xs) in xspans.iter().enumerate() {
            let mut acc = [0.0f64; 4];
            let mut total = 0.0;
            for (j, wy) in ys.weights.iter().enumerate() {
                let row = pix.row_data((ys.first + j) as u32);
                for (i, wx) in xs.weights.iter().enumerate() {
                    let w = wy * wx;
                    let (r, g, b, a) = color::extract_rgba(row[xs.first + i]);
                    acc[0] += w * r as f64;
                    acc[1] += w * g as f64;
                    acc[2] += w * b as f64;
                    acc[3] += w * a as f64;
                    total += w;
                }
            }
            let c = |v: f64| (v / total).round().clamp(0.0, 255.0) as u8;
            out.set_pixel_unchecked(
                x as u32,
                y as u32,
                color::compose_rgba(c(acc[0]), c(acc[1]), c(acc[2]), c(acc[3])),
            );
        }
    }
    Ok(out.into())
}

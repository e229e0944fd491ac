//! PNG image format support
//!
//! Every PNG flavour is decoded into a 32 bpp `Pix`: palette and
//! sub-byte grayscale images are expanded by the decoder, grayscale is
//! replicated into the three color channels, and 16-bit samples keep
//! their high byte.

use crate::{IoError, IoResult};
use pcseg_core::{ImageFormat, Pix, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let color_type = output_info.color_type;
    let bit_depth = output_info.bit_depth;

    // Bytes per sample after expansion
    let bps = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG bit depth after expansion: {:?}",
                bit_depth
            )));
        }
    };
    let (samples, spp) = match color_type {
        ColorType::Grayscale => (1, 3),
        ColorType::GrayscaleAlpha => (2, 4),
        ColorType::Rgb => (3, 3),
        ColorType::Rgba => (4, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let mut pix_mut = Pix::new(width, height)?.to_mut();
    pix_mut.set_spp(spp)?;
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        let row = pix_mut.row_data_mut(y);
        for (x, out) in row.iter_mut().enumerate() {
            let idx = row_start + x * samples * bps;
            // High byte of sample `s`
            let sample = |s: usize| data[idx + s * bps];
            *out = match color_type {
                ColorType::Grayscale => {
                    let g = sample(0);
                    color::compose_rgb(g, g, g)
                }
                ColorType::GrayscaleAlpha => {
                    let g = sample(0);
                    color::compose_rgba(g, g, g, sample(1))
                }
                ColorType::Rgb => color::compose_rgb(sample(0), sample(1), sample(2)),
                _ => color::compose_rgba(sample(0), sample(1), sample(2), sample(3)),
            };
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image
///
/// Writes 8-bit RGB, or RGBA when the image has 4 samples per pixel.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let (color_type, samples) = if pix.spp() == 4 {
        (ColorType::Rgba, 4)
    } else {
        (ColorType::Rgb, 3)
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(width as usize * height as usize * samples);
    for &pixel in pix.data() {
        let (r, g, b, a) = color::extract_rgba(pixel);
        data.extend_from_slice(&[r, g, b]);
        if samples == 4 {
            data.push(a);
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with a
//! maxval up to 255, and writes binary PPM (P6). Grayscale input is
//! replicated into the three color channels.

use crate::{IoError, IoResult};
use pcseg_core::{ImageFormat, Pix, color};
use std::io::{Read, Write};

/// Parsed PNM header
struct PnmHeader {
    magic: [u8; 2],
    width: u32,
    height: u32,
    maxval: u32,
    /// Offset of the first raster byte
    data_offset: usize,
}

/// Read a whitespace-delimited decimal token, skipping `#` comments.
fn next_token(data: &[u8], pos: &mut usize) -> IoResult<u32> {
    loop {
        while *pos < data.len() && data[*pos].is_ascii_whitespace() {
            *pos += 1;
        }
        if *pos < data.len() && data[*pos] == b'#' {
            while *pos < data.len() && data[*pos] != b'\n' {
                *pos += 1;
            }
            continue;
        }
        break;
    }

    let start = *pos;
    while *pos < data.len() && data[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if start == *pos {
        return Err(IoError::InvalidData(format!(
            "expected a number at byte {}",
            start
        )));
    }
    std::str::from_utf8(&data[start..*pos])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| IoError::InvalidData(format!("number out of range at byte {}", start)))
}

fn read_header(data: &[u8]) -> IoResult<PnmHeader> {
    if data.len() < 2 || data[0] != b'P' {
        return Err(IoError::InvalidData("missing PNM magic".to_string()));
    }
    let magic = [data[0], data[1]];
    if !matches!(magic[1], b'2' | b'3' | b'5' | b'6') {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM variant P{} is not supported",
            magic[1] as char
        )));
    }

    let mut pos = 2;
    let width = next_token(data, &mut pos)?;
    let height = next_token(data, &mut pos)?;
    let maxval = next_token(data, &mut pos)?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} is not supported",
            maxval
        )));
    }
    // Exactly one whitespace byte separates the header from binary data
    pos += 1;

    Ok(PnmHeader {
        magic,
        width,
        height,
        maxval,
        data_offset: pos,
    })
}

/// Scale a sample with the given maxval to the 0..=255 range.
#[inline]
fn scale_sample(val: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        val.min(255) as u8
    } else {
        ((val.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PNM image (P2/P3/P5/P6) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let header = read_header(&data)?;
    let channels = if matches!(header.magic[1], b'3' | b'6') {
        3
    } else {
        1
    };
    let n_samples = (header.width as usize)
        .checked_mul(header.height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "PNM size {}x{} is too large",
                header.width, header.height
            ))
        })?;
    let ascii = matches!(header.magic[1], b'2' | b'3');

    // Every sample takes at least one byte in either encoding
    let raster = data.get(header.data_offset..).unwrap_or(&[]);
    if raster.len() < n_samples {
        return Err(IoError::InvalidData(format!(
            "PNM raster truncated: expected {} samples, got {} bytes",
            n_samples,
            raster.len()
        )));
    }

    let samples: Vec<u8> = if ascii {
        let mut pos = header.data_offset.saturating_sub(1);
        (0..n_samples)
            .map(|_| next_token(&data, &mut pos).map(|v| scale_sample(v, header.maxval)))
            .collect::<IoResult<_>>()?
    } else {
        raster[..n_samples]
            .iter()
            .map(|&v| scale_sample(v as u32, header.maxval))
            .collect()
    };

    let mut pix_mut = Pix::new(header.width, header.height)?.to_mut();
    pix_mut.set_informat(ImageFormat::Pnm);
    for (out, px) in pix_mut
        .data_mut()
        .iter_mut()
        .zip(samples.chunks_exact(channels))
    {
        *out = if channels == 3 {
            color::compose_rgb(px[0], px[1], px[2])
        } else {
            color::compose_rgb(px[0], px[0], px[0])
        };
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PPM (P6). Alpha is dropped.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", pix.width(), pix.height())?;
    let mut raster = Vec::with_capacity(pix.data().len() * 3);
    for &pixel in pix.data() {
        let (r, g, b) = color::extract_rgb(pixel);
        raster.extend_from_slice(&[r, g, b]);
    }
    writer.write_all(&raster)?;
    Ok(())
}

//! pcseg-io - Image I/O for page segmentation
//!
//! Reads classifier masks and page images into [`Pix`] and writes
//! overlays and segment crops back out.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | yes  | yes   | `png-format` |
//! | PNM    | P2/P3/P5/P6 | P6 | `pnm` |

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use pcseg_core::ImageFormat;

use pcseg_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// Read an image from a file path, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    read_with_format(BufReader::new(file), format)
}

/// Read an image from memory, detecting the format from its header.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_with_format(Cursor::new(data), format)
}

fn read_with_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        other => Err(IoError::UnsupportedFormat(format!(
            "reading {:?} is not enabled",
            other
        ))),
    }
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    write_with_format(pix, BufWriter::new(file), format)
}

/// Encode an image into memory in the given format.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_with_format(pix, &mut buf, format)?;
    Ok(buf)
}

fn write_with_format<W: std::io::Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not enabled",
            other
        ))),
    }
}

/// Choose an output format from a file extension (`png`, `pnm`/`ppm`/`pgm`).
pub fn format_from_extension(ext: &str) -> ImageFormat {
    match ext.to_ascii_lowercase().as_str() {
        "png" => ImageFormat::Png,
        "pnm" | "ppm" | "pgm" => ImageFormat::Pnm,
        _ => ImageFormat::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension("PNG"), ImageFormat::Png);
        assert_eq!(format_from_extension("ppm"), ImageFormat::Pnm);
        assert_eq!(format_from_extension("tif"), ImageFormat::Unknown);
    }

    #[test]
    fn test_write_unknown_format() {
        let pix = Pix::new(2, 2).unwrap();
        assert!(matches!(
            write_image_mem(&pix, ImageFormat::Unknown),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}

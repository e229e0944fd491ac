//! pcseg - Page segmentation from pixel-classifier masks
//!
//! A pixel classifier colors each pixel of a scanned page by its semantic
//! class. This crate turns that mask into rectangular text and image
//! regions with a recursive XY-cut and maps them back onto the original
//! page.
//!
//! # Overview
//!
//! - [`xycut`]: the segmentation engine, one pass per class
//! - [`transform`]: scaling masks to the working height
//! - [`io`]: PNG and PNM reading and writing
//! - [`PageSegmenter`]: the whole page pipeline, including debug overlays
//!   and text crops for OCR
//!
//! # Example
//!
//! ```
//! use pcseg::{Color, PageSegmenter, Pix, PipelineOptions};
//!
//! let page = Pix::new_filled(400, 600, Color::WHITE).unwrap();
//! let mask = Pix::new_filled(200, 300, Color::WHITE).unwrap();
//! let segmenter = PageSegmenter::new(PipelineOptions::new().with_char_height(20)).unwrap();
//! let result = segmenter.segment_images(&page, &mask).unwrap();
//! assert_eq!(result.segments.all_segments().count(), 0);
//! ```

mod error;
pub mod norm;
pub mod pipeline;

pub use pcseg_core::*;

pub use pcseg_io as io;
pub use pcseg_transform as transform;
pub use pcseg_xycut as xycut;

pub use error::{PipelineError, PipelineResult};
pub use norm::{NormFile, find_char_height};
pub use pipeline::{
    PageOutput, PageSegmentation, PageSegmenter, PipelineOptions, TextCrop, crop_file_name,
    crop_text_segments, render_overlay, split_basename,
};
pub use pcseg_xycut::{ClassPalette, Segment, SegmentClass, SegmentMap, XyCutOptions};

/// Install a `tracing` subscriber that honors `RUST_LOG`.
///
/// Meant for binaries and tests; the library itself only emits events.
/// Calling it again after a subscriber is set has no effect.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

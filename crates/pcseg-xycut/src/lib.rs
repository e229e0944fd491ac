//! pcseg-xycut - Recursive XY-cut segmentation of classifier masks
//!
//! A pixel classifier paints every pixel of a page with the color of its
//! semantic class. This crate partitions such a mask, one class at a time,
//! into axis-aligned rectangles by alternating row and column projection
//! cuts until no rectangle splits any further.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |---|---|
//! | Projection profile per row/column | [`profile`] |
//! | Gaps (maximal unoccupied runs) and margin trimming | [`gaps`] |
//! | Splitting at separator gaps | [`split`] |
//! | Worklist controller | [`xycut`] |
//! | Mapping back to page pixels | [`rescale`] |
//!
//! [`segment()`] ties these together for a whole [`ClassPalette`].
//!
//! # Example
//!
//! ```
//! use pcseg_core::{Color, Pix};
//! use pcseg_xycut::{ClassPalette, segment};
//!
//! let mask = Pix::new_filled(200, 100, Color::WHITE).unwrap();
//! let map = segment(&mask, 1000, 30, 100, &ClassPalette::default()).unwrap();
//! assert!(map.segments("text").unwrap().is_empty());
//! ```

mod error;
pub mod gaps;
pub mod lines;
pub mod options;
pub mod palette;
pub mod params;
pub mod profile;
pub mod region;
pub mod rescale;
pub mod segment;
pub mod split;
pub mod xycut;

pub use error::{XyCutError, XyCutResult};
pub use gaps::{find_gaps, trim_bounds};
pub use lines::{LineBox, translate_line};
pub use options::{ConvergenceCheck, XyCutOptions};
pub use palette::{ClassColor, ClassPalette, ColorMatch, SegmentClass};
pub use params::{CutParams, resize_factor};
pub use profile::{Indication, indicate};
pub use region::{Axis, Gap, Interval, Region};
pub use rescale::Rescaler;
pub use segment::{
    ClassSegments, Segment, SegmentMap, SegmentParams, segment, segment_class,
    segment_with_options,
};
pub use split::split_intervals;
pub use xycut::XyCut;

//! pcseg-transform - Scaling to the working resolution
//!
//! Classifier masks are segmented at a fixed, reduced height. This crate
//! provides the resize step:
//!
//! - Sampling (nearest neighbor), which keeps class colors exact
//! - Area mapping (box filter), for anti-aliased downscaling of page images

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{ScaleMethod, scale_to_height, scale_to_size, scaled_width};

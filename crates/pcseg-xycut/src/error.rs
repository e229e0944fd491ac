//! Error types for pcseg-xycut

use thiserror::Error;

/// Errors that can occur during XY-cut segmentation
#[derive(Debug, Error)]
pub enum XyCutError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pcseg_core::Error),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A zero-area or inverted extent reached the cutter
    #[error("invalid region: extent {start}..{end} is empty or inverted")]
    InvalidRegion { start: u32, end: u32 },

    /// The cut loop did not reach a fixed point within the iteration guard
    #[error("class '{class}' did not converge after {iterations} iterations")]
    NonConvergence { class: String, iterations: u32 },
}

/// Result type for XY-cut operations
pub type XyCutResult<T> = Result<T, XyCutError>;

//! Error types for the page pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while segmenting a page
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pcseg_core::Error),

    /// Image decoding or encoding failed
    #[error("image I/O error: {0}")]
    Image(#[from] pcseg_io::IoError),

    /// Scaling to the working height failed
    #[error("transform error: {0}")]
    Transform(#[from] pcseg_transform::TransformError),

    /// Segmentation failed
    #[error("segmentation error: {0}")]
    XyCut(#[from] pcseg_xycut::XyCutError),

    /// A normalization file could not be parsed
    #[error("invalid normalization file '{path}': {source}")]
    Norm {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Neither the options nor a normalization file give a character height
    #[error("no character height given and no .norm file found in '{0}'")]
    MissingCharHeight(PathBuf),

    /// The page file name has no usable base name or extension
    #[error("cannot derive output names from '{0}'")]
    InvalidFileName(String),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

//! Error types for pcseg-transform

use thiserror::Error;

/// Errors that can occur during scaling
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pcseg_core::Error),

    /// Invalid scale factor or target size
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;

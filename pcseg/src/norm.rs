//! Normalization files
//!
//! A normalization step run before segmentation measures the average
//! glyph height of a page and stores it as JSON in a `*.norm` file:
//!
//! ```json
//! { "char_height": 31 }
//! ```
//!
//! Other keys are ignored.

use crate::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Extension of normalization files
pub const NORM_EXTENSION: &str = "norm";

/// Contents of a `.norm` file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormFile {
    /// Average glyph height in original-page pixels
    pub char_height: u32,
}

impl NormFile {
    /// Parse a normalization document.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Read and parse a normalization file.
    pub fn read<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text).map_err(|source| PipelineError::Norm {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write this record as JSON.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> PipelineResult<()> {
        let text = serde_json::to_string_pretty(self).map_err(|source| PipelineError::Norm {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        fs::write(path, text)?;
        Ok(())
    }
}

/// Character height from the first readable `.norm` file in `dir`.
///
/// Files are visited in name order; unreadable ones are skipped. Returns
/// `Ok(None)` if no file yields a height.
pub fn find_char_height<P: AsRef<Path>>(dir: P) -> PipelineResult<Option<u32>> {
    let mut candidates: Vec<_> = fs::read_dir(dir.as_ref())?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == NORM_EXTENSION))
        .collect();
    candidates.sort();

    for path in candidates {
        match NormFile::read(&path) {
            Ok(norm) => {
                tracing::debug!("char height {} from {}", norm.char_height, path.display());
                return Ok(Some(norm.char_height));
            }
            Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
        }
    }
    Ok(None)
}

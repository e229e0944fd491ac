//! Options for the XY-cut controller

use crate::palette::ColorMatch;
use crate::{XyCutError, XyCutResult};

/// Fixed-point test of the cut loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvergenceCheck {
    /// Stop when the worklist size is unchanged between two iterations.
    ///
    /// Two different worklists of equal size also stop the loop. Rectangles
    /// still pending at that point are discarded rather than returned next
    /// to the finalized ones, so output may lack segments a longer run
    /// would find. [`ConvergenceCheck::Content`] finalizes them instead.
    #[default]
    Count,
    /// Stop when the worklist content is unchanged, i.e. every rectangle
    /// is finalized.
    Content,
}

/// Options for XY-cut segmentation
#[derive(Debug, Clone)]
pub struct XyCutOptions {
    /// Maximum number of cut iterations per class (default: 1000)
    pub max_iterations: u32,
    /// Fixed-point test (default: [`ConvergenceCheck::Count`])
    pub convergence: ConvergenceCheck,
    /// Mask pixel comparison (default: [`ColorMatch::Exact`])
    pub color_match: ColorMatch,
    /// Run the class passes on the rayon thread pool (default: false)
    pub parallel: bool,
}

impl Default for XyCutOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            convergence: ConvergenceCheck::Count,
            color_match: ColorMatch::Exact,
            parallel: false,
        }
    }
}

impl XyCutOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration guard
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the fixed-point test
    pub fn with_convergence(mut self, convergence: ConvergenceCheck) -> Self {
        self.convergence = convergence;
        self
    }

    /// Set the mask pixel comparison
    pub fn with_color_match(mut self, color_match: ColorMatch) -> Self {
        self.color_match = color_match;
        self
    }

    /// Enable or disable parallel class passes
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub(crate) fn validate(&self) -> XyCutResult<()> {
        if self.max_iterations == 0 {
            return Err(XyCutError::InvalidParameter(
                "max_iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

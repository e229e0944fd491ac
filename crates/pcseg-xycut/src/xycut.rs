//! Recursive XY-cut controller
//!
//! Each pending rectangle is cut along rows, then every surviving row band
//! is combined with the column cut of the whole rectangle. A rectangle
//! that yields a single child cannot be split further and is finalized;
//! one that yields several is replaced by its children; one that yields
//! none is dropped. The worklist is processed until it reaches a fixed
//! point.

use crate::gaps::{find_gaps, trim_bounds};
use crate::options::{ConvergenceCheck, XyCutOptions};
use crate::params::CutParams;
use crate::profile::indicate;
use crate::region::{Axis, Interval, Region};
use crate::split::split_intervals;
use crate::{XyCutError, XyCutResult};
use pcseg_core::{Color, Pix};

/// One class pass of the XY-cut over a working-resolution mask
#[derive(Debug, Clone)]
pub struct XyCut<'a> {
    mask: &'a Pix,
    target: Color,
    params: CutParams,
    options: &'a XyCutOptions,
}

impl<'a> XyCut<'a> {
    pub fn new(mask: &'a Pix, target: Color, params: CutParams, options: &'a XyCutOptions) -> Self {
        Self {
            mask,
            target,
            params,
            options,
        }
    }

    /// Cut `region` along one axis into the intervals that carry content.
    ///
    /// Builds the projection profile, finds its gaps, strips the margins
    /// and splits at separator gaps. Rows use `px_threshold_line` and
    /// `split_size_horizontal`; columns use `px_threshold_column` and
    /// `split_size_vertical`.
    pub fn cut_axis(&self, region: &Region, axis: Axis) -> XyCutResult<Vec<Interval>> {
        let (px_threshold, split_size) = match axis {
            Axis::Rows => (self.params.px_threshold_line, self.params.split_size_horizontal),
            Axis::Columns => (self.params.px_threshold_column, self.params.split_size_vertical),
        };
        let indication = indicate(
            self.mask,
            region,
            axis,
            self.target,
            px_threshold,
            self.options.color_match,
        )?;
        let gaps = find_gaps(&indication);
        let extent = region.extent(axis);
        let bounds = trim_bounds(&gaps, extent.start, extent.end);
        split_intervals(&gaps, bounds, px_threshold, split_size)
    }

    /// Children of one pending rectangle.
    ///
    /// The column cut is taken over the full rectangle, not over each row
    /// band, and is shared by all bands.
    pub fn subdivide(&self, region: &Region) -> XyCutResult<Vec<Region>> {
        let rows = self.cut_axis(region, Axis::Rows)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let columns = self.cut_axis(region, Axis::Columns)?;

        let mut children = Vec::with_capacity(rows.len() * columns.len());
        for &row in &rows {
            for &column in &columns {
                children.push(Region::from_intervals(row, column));
            }
        }
        Ok(children)
    }

    /// One pass over the worklist.
    fn step(&self, worklist: &[Region]) -> XyCutResult<Vec<Region>> {
        let mut next = Vec::with_capacity(worklist.len());
        for region in worklist {
            if region.finalized {
                next.push(*region);
                continue;
            }
            let mut children = self.subdivide(region)?;
            match children.len() {
                0 => tracing::trace!("dropping {:?}: no content", region),
                1 => {
                    let mut child = children.remove(0);
                    child.finalized = true;
                    next.push(child);
                }
                _ => next.append(&mut children),
            }
        }
        Ok(next)
    }

    fn converged(&self, previous: &[Region], current: &[Region]) -> bool {
        match self.options.convergence {
            ConvergenceCheck::Count => previous.len() == current.len(),
            ConvergenceCheck::Content => previous == current,
        }
    }

    /// Run the cut over the whole mask and return the finalized rectangles
    /// in discovery order.
    ///
    /// `class` only labels log records and errors.
    ///
    /// # Errors
    ///
    /// Returns [`XyCutError::NonConvergence`] if no fixed point is reached
    /// within `max_iterations` passes.
    pub fn run(&self, class: &str) -> XyCutResult<Vec<Region>> {
        self.options.validate()?;
        self.run_from(class, vec![Region::full(self.mask)])
    }

    /// Run the cut starting from an explicit worklist.
    ///
    /// # Errors
    ///
    /// Returns [`XyCutError::InvalidRegion`] if a starting rectangle is
    /// empty, and [`XyCutError::NonConvergence`] as for [`XyCut::run`].
    pub fn run_from(&self, class: &str, worklist: Vec<Region>) -> XyCutResult<Vec<Region>> {
        for region in &worklist {
            region.validate()?;
        }

        let mut previous: Vec<Region> = Vec::new();
        let mut current = worklist;
        let mut iterations = 0u32;

        while !self.converged(&previous, &current) {
            if iterations >= self.options.max_iterations {
                tracing::warn!(
                    "class '{}': no fixed point after {} iterations ({} rectangles)",
                    class,
                    iterations,
                    current.len()
                );
                return Err(XyCutError::NonConvergence {
                    class: class.to_string(),
                    iterations,
                });
            }
            iterations += 1;
            let next = self.step(&current)?;
            tracing::debug!(
                "class '{}' iteration {}: {} -> {} rectangles",
                class,
                iterations,
                current.len(),
                next.len()
            );
            previous = std::mem::replace(&mut current, next);
        }

        let total = current.len();
        let finalized: Vec<Region> = current.into_iter().filter(|r| r.finalized).collect();
        if finalized.len() < total {
            tracing::debug!(
                "class '{}': discarding {} pending rectangles at convergence",
                class,
                total - finalized.len()
            );
        }
        tracing::debug!(
            "class '{}': {} segments after {} iterations",
            class,
            finalized.len(),
            iterations
        );
        Ok(finalized)
    }
}

//! Interval splitting at separator gaps

use crate::region::{Gap, Interval};
use crate::{XyCutError, XyCutResult};

/// Cut `bounds` into intervals at interior gaps wider than `split_size`.
///
/// A gap is interior when it starts after `bounds.start` and ends before
/// `bounds.end`. The interval closed by such a gap is kept only when
/// `segment_start + gap.start > px_threshold`; otherwise it is not closed
/// and grows across the gap into the next one. The remainder up to
/// `bounds.end` is kept under the same sum test.
///
/// The sum (rather than span) comparison is the established behavior and
/// is part of the segmentation output.
///
/// # Errors
///
/// Returns [`XyCutError::InvalidRegion`] if `bounds` is inverted.
pub fn split_intervals(
    gaps: &[Gap],
    bounds: Interval,
    px_threshold: u32,
    split_size: u32,
) -> XyCutResult<Vec<Interval>> {
    if bounds.start > bounds.end {
        return Err(XyCutError::InvalidRegion {
            start: bounds.start,
            end: bounds.end,
        });
    }

    let threshold = px_threshold as u64;
    let mut intervals = Vec::new();
    let mut segment_start = bounds.start;

    for gap in gaps {
        let interior = gap.start > bounds.start && gap.end() < bounds.end;
        if interior
            && gap.length > split_size
            && segment_start as u64 + gap.start as u64 > threshold
        {
            intervals.push(Interval::new(segment_start, gap.start));
            segment_start = gap.end();
        }
    }

    if segment_start < bounds.end && segment_start as u64 + bounds.end as u64 > threshold {
        intervals.push(Interval::new(segment_start, bounds.end));
    }
    Ok(intervals)
}

//! Gap detection and margin trimming

use crate::profile::Indication;
use crate::region::{Gap, Interval};

/// List every maximal run of unoccupied lines, in order.
///
/// Gap starts are absolute image coordinates. Runs of occupied lines at
/// either end produce no entry.
pub fn find_gaps(indication: &Indication) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut current: Option<Gap> = None;

    for (i, &occupied) in indication.as_slice().iter().enumerate() {
        let index = indication.offset() + i as u32;
        if occupied {
            gaps.extend(current.take());
        } else if let Some(gap) = current.as_mut() {
            gap.length += 1;
        } else {
            current = Some(Gap::new(index, 1));
        }
    }
    gaps.extend(current);
    gaps
}

/// Strip a leading and a trailing gap from `default_start..default_end`.
///
/// A gap starting at `default_start` moves the start past it. Any other
/// gap reaching `default_end` moves the end to its start. Interior gaps
/// are left to the splitter.
///
/// A region without any occupied line trims to an empty interval at
/// `default_end`.
pub fn trim_bounds(gaps: &[Gap], default_start: u32, default_end: u32) -> Interval {
    let mut bounds = Interval::new(default_start, default_end);
    for gap in gaps {
        if gap.start == default_start {
            bounds.start = gap.end();
        } else if gap.end() >= default_end {
            bounds.end = gap.start;
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indication(offset: u32, pattern: &str) -> Indication {
        Indication::new(offset, pattern.chars().map(|c| c == '#').collect())
    }

    #[test]
    fn test_find_gaps() {
        let ind = indication(0, "..##.#...#");
        assert_eq!(
            find_gaps(&ind),
            vec![Gap::new(0, 2), Gap::new(4, 1), Gap::new(6, 3)]
        );
    }

    #[test]
    fn test_find_gaps_offset_and_trailing() {
        let ind = indication(20, "#..#..");
        assert_eq!(find_gaps(&ind), vec![Gap::new(21, 2), Gap::new(24, 2)]);
    }

    #[test]
    fn test_find_gaps_edge_cases() {
        assert!(find_gaps(&indication(0, "####")).is_empty());
        assert!(find_gaps(&indication(0, "")).is_empty());
        assert_eq!(find_gaps(&indication(5, "...")), vec![Gap::new(5, 3)]);
    }

    #[test]
    fn test_trim_margins() {
        // 0..2 leading, 8..10 trailing, 4..5 interior
        let gaps = [Gap::new(0, 2), Gap::new(4, 1), Gap::new(8, 2)];
        assert_eq!(trim_bounds(&gaps, 0, 10), Interval::new(2, 8));
    }

    #[test]
    fn test_trim_relative_to_region() {
        let gaps = [Gap::new(30, 5), Gap::new(50, 10)];
        assert_eq!(trim_bounds(&gaps, 30, 60), Interval::new(35, 50));
        // no leading gap when the region starts occupied
        let gaps = [Gap::new(40, 2)];
        assert_eq!(trim_bounds(&gaps, 30, 60), Interval::new(30, 60));
    }

    #[test]
    fn test_trim_blank_region() {
        let gaps = [Gap::new(10, 20)];
        let bounds = trim_bounds(&gaps, 10, 30);
        assert_eq!(bounds, Interval::new(30, 30));
        assert!(bounds.is_empty());
    }
}

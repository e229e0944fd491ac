//! Segmentation entry point
//!
//! Runs one XY-cut pass per palette class over the working-resolution
//! mask and rescales the finalized rectangles to the original page.

use crate::options::XyCutOptions;
use crate::palette::{ClassColor, ClassPalette, SegmentClass};
use crate::params::CutParams;
use crate::region::Region;
use crate::rescale::Rescaler;
use crate::xycut::XyCut;
use crate::{XyCutError, XyCutResult};
use pcseg_core::{Color, Pix};
use rayon::prelude::*;

/// A finalized rectangle of one class, in original-page pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub class: SegmentClass,
    pub x_start: u32,
    pub y_start: u32,
    pub x_end: u32,
    pub y_end: u32,
    /// The same rectangle in working-resolution pixels
    pub working: Region,
}

impl Segment {
    pub fn width(&self) -> u32 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> u32 {
        self.y_end - self.y_start
    }

    pub fn to_box(&self) -> pcseg_core::Box {
        pcseg_core::Box::new_unchecked(
            self.x_start as i32,
            self.y_start as i32,
            self.width() as i32,
            self.height() as i32,
        )
    }

    /// Corners clockwise from the top left.
    pub fn points(&self) -> [(u32, u32); 4] {
        [
            (self.x_start, self.y_start),
            (self.x_end, self.y_start),
            (self.x_end, self.y_end),
            (self.x_start, self.y_end),
        ]
    }

    /// Corners formatted as `"x,y x,y x,y x,y"`.
    pub fn points_string(&self) -> String {
        self.points()
            .iter()
            .map(|(x, y)| format!("{},{}", x, y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Page geometry and scale hints for [`segment_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentParams {
    /// Height of the original page in pixels
    pub original_height: u32,
    /// Width of the original page; derived from the mask when absent
    pub original_width: Option<u32>,
    /// Average glyph height in original-page pixels
    pub char_height: u32,
    /// Height the mask was scaled to
    pub working_height: u32,
}

impl SegmentParams {
    pub fn new(original_height: u32, char_height: u32, working_height: u32) -> Self {
        Self {
            original_height,
            original_width: None,
            char_height,
            working_height,
        }
    }

    pub fn with_original_width(mut self, width: u32) -> Self {
        self.original_width = Some(width);
        self
    }

    fn validate(&self, mask: &Pix) -> XyCutResult<()> {
        if self.original_height == 0 || self.working_height == 0 {
            return Err(XyCutError::InvalidParameter(
                "page heights must be positive".to_string(),
            ));
        }
        if mask.height() != self.working_height {
            return Err(XyCutError::InvalidParameter(format!(
                "mask height {} does not match working height {}",
                mask.height(),
                self.working_height
            )));
        }
        Ok(())
    }

    fn rescaler(&self, mask: &Pix) -> XyCutResult<Rescaler> {
        let rescaler = Rescaler::new(self.working_height, self.original_height)?;
        let width = self
            .original_width
            .unwrap_or_else(|| rescaler.scale(mask.width()));
        Ok(rescaler.with_original_width(width))
    }
}

/// Outcome of one class pass
#[derive(Debug)]
pub struct ClassSegments {
    pub name: String,
    pub class: SegmentClass,
    pub color: Color,
    /// Segments in discovery order, or the error that failed the pass
    pub result: XyCutResult<Vec<Segment>>,
}

/// Segments of every palette class, in palette order
#[derive(Debug, Default)]
pub struct SegmentMap {
    classes: Vec<ClassSegments>,
}

impl SegmentMap {
    /// Outcome of a class by name
    pub fn get(&self, name: &str) -> Option<&ClassSegments> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Segments of a class, `None` if the class is unknown or failed.
    pub fn segments(&self, name: &str) -> Option<&[Segment]> {
        self.get(name)
            .and_then(|c| c.result.as_ref().ok())
            .map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassSegments> {
        self.classes.iter()
    }

    /// Every segment of the successful classes, palette order first.
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment> {
        self.classes
            .iter()
            .filter_map(|c| c.result.as_ref().ok())
            .flatten()
    }

    /// Segments with running ids `region0000`, `region0001`, ...
    pub fn labeled(&self) -> impl Iterator<Item = (String, &Segment)> {
        self.all_segments()
            .enumerate()
            .map(|(i, s)| (format!("region{:04}", i), s))
    }

    /// Classes whose pass failed
    pub fn failures(&self) -> impl Iterator<Item = &ClassSegments> {
        self.classes.iter().filter(|c| c.result.is_err())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl IntoIterator for SegmentMap {
    type Item = ClassSegments;
    type IntoIter = std::vec::IntoIter<ClassSegments>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.into_iter()
    }
}

/// Segment a working-resolution mask with default options.
///
/// `mask` must already be scaled to `working_height`. Coordinates of the
/// returned segments are in original-page pixels.
///
/// # Examples
///
/// ```
/// use pcseg_core::{Color, Pix};
/// use pcseg_xycut::{ClassPalette, segment};
///
/// let mut mask = Pix::new_filled(100, 100, Color::WHITE).unwrap().to_mut();
/// for y in 40..60 {
///     for x in 40..60 {
///         mask.set_rgb(x, y, 255, 0, 0).unwrap();
///     }
/// }
/// let map = segment(&mask.into(), 1000, 20, 100, &ClassPalette::default()).unwrap();
/// let text = map.segments("text").unwrap();
/// assert_eq!(text.len(), 1);
/// assert_eq!(text[0].points_string(), "400,400 600,400 600,600 400,600");
/// ```
///
/// # Errors
///
/// Returns [`XyCutError::InvalidParameter`] if the mask height differs
/// from `working_height` or a height is 0. Failures of a single class
/// are reported in its [`ClassSegments::result`].
pub fn segment(
    mask: &Pix,
    original_height: u32,
    char_height: u32,
    working_height: u32,
    palette: &ClassPalette,
) -> XyCutResult<SegmentMap> {
    let params = SegmentParams::new(original_height, char_height, working_height);
    segment_with_options(mask, &params, palette, &XyCutOptions::default())
}

/// Segment a working-resolution mask with explicit options.
///
/// Class passes are independent; with `options.parallel` they run on the
/// rayon thread pool.
pub fn segment_with_options(
    mask: &Pix,
    params: &SegmentParams,
    palette: &ClassPalette,
    options: &XyCutOptions,
) -> XyCutResult<SegmentMap> {
    params.validate(mask)?;
    options.validate()?;

    let run = |entry: &ClassColor| ClassSegments {
        name: entry.name.clone(),
        class: entry.class(),
        color: entry.color,
        result: segment_class(mask, params, entry, options),
    };
    let classes: Vec<ClassSegments> = if options.parallel {
        palette.entries().par_iter().map(run).collect()
    } else {
        palette.iter().map(run).collect()
    };

    for c in &classes {
        match &c.result {
            Ok(segments) => tracing::debug!("class '{}': {} segments", c.name, segments.len()),
            Err(e) => tracing::warn!("class '{}' failed: {}", c.name, e),
        }
    }
    Ok(SegmentMap { classes })
}

/// Run a single class pass and rescale its rectangles.
///
/// A class whose color never occurs yields an empty list.
pub fn segment_class(
    mask: &Pix,
    params: &SegmentParams,
    entry: &ClassColor,
    options: &XyCutOptions,
) -> XyCutResult<Vec<Segment>> {
    params.validate(mask)?;
    let cut_params = CutParams::from_char_height(
        params.char_height,
        params.working_height,
        params.original_height,
    )?;
    let rescaler = params.rescaler(mask)?;
    let class = entry.class();

    let regions = XyCut::new(mask, entry.color, cut_params, options).run(&entry.name)?;
    let segments = regions
        .iter()
        .filter_map(|working| {
            let page = rescaler.rescale(working);
            if page.is_none() {
                tracing::debug!("class '{}': {:?} vanishes when rescaled", entry.name, working);
            }
            page.map(|r| Segment {
                class,
                x_start: r.x_start,
                y_start: r.y_start,
                x_end: r.x_end,
                y_end: r.y_end,
                working: *working,
            })
        })
        .collect();
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with(w: u32, h: u32, blocks: &[(u32, u32, u32, u32, Color)]) -> Pix {
        let mut pm = Pix::new_filled(w, h, Color::WHITE).unwrap().to_mut();
        for &(x0, y0, x1, y1, c) in blocks {
            for y in y0..y1 {
                for x in x0..x1 {
                    pm.set_rgb(x, y, c.r, c.g, c.b).unwrap();
                }
            }
        }
        pm.into()
    }

    #[test]
    fn test_points() {
        let s = Segment {
            class: SegmentClass::Text,
            x_start: 1,
            y_start: 2,
            x_end: 30,
            y_end: 40,
            working: Region::new(0, 0, 3, 4),
        };
        assert_eq!(s.points(), [(1, 2), (30, 2), (30, 40), (1, 40)]);
        assert_eq!(s.points_string(), "1,2 30,2 30,40 1,40");
        let b = s.to_box();
        assert_eq!((b.x, b.y, b.w, b.h), (1, 2, 29, 38));
    }

    #[test]
    fn test_classes_in_palette_order() {
        let pix = mask_with(
            100,
            100,
            &[(10, 10, 40, 40, Color::GREEN), (60, 60, 90, 90, Color::RED)],
        );
        let map = segment(&pix, 200, 4, 100, &ClassPalette::default()).unwrap();
        let names: Vec<_> = map.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["text", "image"]);

        let text = map.segments("text").unwrap();
        assert_eq!(text.len(), 1);
        assert_eq!(text[0].class, SegmentClass::Text);
        assert_eq!(
            (text[0].x_start, text[0].y_start, text[0].x_end, text[0].y_end),
            (120, 120, 180, 180)
        );
        let image = map.segments("image").unwrap();
        assert_eq!(image[0].working, Region { finalized: true, ..Region::new(10, 10, 40, 40) });

        let ids: Vec<_> = map.labeled().map(|(id, _)| id).collect();
        assert_eq!(ids, ["region0000", "region0001"]);
    }

    #[test]
    fn test_empty_class_is_not_an_error() {
        let pix = mask_with(50, 50, &[(5, 5, 20, 20, Color::RED)]);
        let map = segment(&pix, 50, 2, 50, &ClassPalette::default()).unwrap();
        assert_eq!(map.segments("image"), Some(&[][..]));
        assert_eq!(map.failures().count(), 0);
    }

    #[test]
    fn test_mask_height_must_match() {
        let pix = mask_with(50, 40, &[]);
        assert!(matches!(
            segment(&pix, 400, 10, 50, &ClassPalette::default()),
            Err(XyCutError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_failed_class_leaves_others() {
        // Two text blocks need a second pass; the single image block
        // converges in one.
        let pix = mask_with(
            100,
            100,
            &[
                (10, 10, 90, 30, Color::RED),
                (10, 60, 90, 80, Color::RED),
                (20, 40, 50, 50, Color::GREEN),
            ],
        );
        let params = SegmentParams::new(100, 3, 100);
        let opts = XyCutOptions::default().with_max_iterations(1);
        let map = segment_with_options(&pix, &params, &ClassPalette::default(), &opts).unwrap();
        assert!(matches!(
            map.get("text").unwrap().result,
            Err(XyCutError::NonConvergence { .. })
        ));
        assert!(map.segments("text").is_none());
        assert_eq!(map.segments("image").unwrap().len(), 1);
        assert_eq!(map.failures().count(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pix = mask_with(
            120,
            80,
            &[
                (5, 5, 50, 20, Color::RED),
                (5, 40, 50, 70, Color::RED),
                (70, 10, 110, 60, Color::GREEN),
            ],
        );
        let params = SegmentParams::new(160, 4, 80).with_original_width(240);
        let palette = ClassPalette::default();
        let seq = segment_with_options(&pix, &params, &palette, &XyCutOptions::default()).unwrap();
        let par = segment_with_options(
            &pix,
            &params,
            &palette,
            &XyCutOptions::default().with_parallel(true),
        )
        .unwrap();
        let a: Vec<_> = seq.all_segments().copied().collect();
        let b: Vec<_> = par.all_segments().copied().collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }
}

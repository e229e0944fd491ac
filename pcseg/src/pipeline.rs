//! Page segmentation pipeline
//!
//! Reads the original page and its classifier mask, brings the mask to
//! the working height, runs the XY-cut for every palette class and
//! optionally produces a debug overlay and one crop per text segment.

use crate::norm::find_char_height;
use crate::{PipelineError, PipelineResult};
use pcseg_core::{Box, ImageFormat, Pix};
use pcseg_io::format_from_extension;
use pcseg_transform::{ScaleMethod, scale_to_height};
use pcseg_xycut::{
    ClassPalette, Rescaler, Segment, SegmentClass, SegmentMap, SegmentParams, XyCutOptions,
    segment_with_options,
};
use std::path::{Path, PathBuf};

/// Options for [`PageSegmenter`]
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Height the mask is scaled to before cutting (default: 300)
    pub working_height: u32,
    /// Average glyph height in page pixels; read from a `.norm` file when
    /// `None` (default: `None`)
    pub char_height: Option<u32>,
    /// Mask scaling method (default: sampling, which keeps class colors)
    pub scale_method: ScaleMethod,
    /// Classes to segment (default: text red, image green)
    pub palette: ClassPalette,
    /// XY-cut options
    pub xycut: XyCutOptions,
    /// Draw segment outlines on the working mask (default: true)
    pub render_overlay: bool,
    /// Crop text segments out of the page (default: true)
    pub crop_text_segments: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            working_height: 300,
            char_height: None,
            scale_method: ScaleMethod::Sampling,
            palette: ClassPalette::default(),
            xycut: XyCutOptions::default(),
            render_overlay: true,
            crop_text_segments: true,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_height(mut self, height: u32) -> Self {
        self.working_height = height;
        self
    }

    pub fn with_char_height(mut self, char_height: u32) -> Self {
        self.char_height = Some(char_height);
        self
    }

    pub fn with_scale_method(mut self, method: ScaleMethod) -> Self {
        self.scale_method = method;
        self
    }

    pub fn with_palette(mut self, palette: ClassPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_xycut(mut self, xycut: XyCutOptions) -> Self {
        self.xycut = xycut;
        self
    }

    pub fn with_render_overlay(mut self, render: bool) -> Self {
        self.render_overlay = render;
        self
    }

    pub fn with_crop_text_segments(mut self, crop: bool) -> Self {
        self.crop_text_segments = crop;
        self
    }

    fn validate(&self) -> PipelineResult<()> {
        if self.working_height == 0 {
            return Err(PipelineError::InvalidParameter(
                "working_height must be positive".to_string(),
            ));
        }
        if self.palette.is_empty() {
            return Err(PipelineError::InvalidParameter(
                "palette has no classes".to_string(),
            ));
        }
        Ok(())
    }
}

/// A text segment cut out of the original page
#[derive(Debug, Clone)]
pub struct TextCrop {
    /// Position among the text segments
    pub index: usize,
    pub segment: Segment,
    pub pix: Pix,
}

/// Result of segmenting one page
#[derive(Debug)]
pub struct PageSegmentation {
    pub original_width: u32,
    pub original_height: u32,
    pub char_height: u32,
    /// The mask at working resolution
    pub working_mask: Pix,
    pub segments: SegmentMap,
    /// Working mask with segment outlines, when enabled
    pub overlay: Option<Pix>,
    /// Text crops, when enabled
    pub crops: Vec<TextCrop>,
}

/// Files written by [`PageSegmenter::segment_files`]
#[derive(Debug)]
pub struct PageOutput {
    pub segmentation: PageSegmentation,
    pub overlay_path: Option<PathBuf>,
    pub crop_paths: Vec<PathBuf>,
}

/// Segments whole pages
#[derive(Debug, Clone)]
pub struct PageSegmenter {
    options: PipelineOptions,
}

impl PageSegmenter {
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParameter`] for a zero working
    /// height or an empty palette.
    pub fn new(options: PipelineOptions) -> PipelineResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Segment a page held in memory.
    ///
    /// `page` is the original (usually binarized) page and fixes the
    /// original resolution; `mask` is the classifier output at any
    /// resolution with the page's aspect ratio.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingCharHeight`] if the options carry
    /// no character height.
    pub fn segment_images(&self, page: &Pix, mask: &Pix) -> PipelineResult<PageSegmentation> {
        let char_height = self
            .options
            .char_height
            .ok_or_else(|| PipelineError::MissingCharHeight(PathBuf::new()))?;
        self.run(page, mask, char_height)
    }

    /// Segment a page from files and write the results to `output_dir`.
    ///
    /// Without a configured character height, the first `.norm` file next
    /// to the page is used. The overlay is written as
    /// `{basename}_cut{ext}` and text crops as
    /// `{basename}__{index:03}__paragraph{ext}`, where `ext` may be a
    /// double extension such as `.bin.png`.
    pub fn segment_files<P, Q, R>(
        &self,
        page_path: P,
        mask_path: Q,
        output_dir: R,
    ) -> PipelineResult<PageOutput>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: AsRef<Path>,
    {
        let page_path = page_path.as_ref();
        let output_dir = output_dir.as_ref();
        let (basename, ext) = split_basename(page_path)
            .ok_or_else(|| PipelineError::InvalidFileName(page_path.display().to_string()))?;
        let format = output_format(&ext)?;

        let char_height = match self.options.char_height {
            Some(h) => h,
            None => {
                let dir = page_path
                    .parent()
                    .filter(|d| !d.as_os_str().is_empty())
                    .unwrap_or(Path::new("."));
                find_char_height(dir)?
                    .ok_or_else(|| PipelineError::MissingCharHeight(dir.to_path_buf()))?
            }
        };

        let page = pcseg_io::read_image(page_path)?;
        let mask = pcseg_io::read_image(mask_path)?;
        let segmentation = self.run(&page, &mask, char_height)?;

        std::fs::create_dir_all(output_dir)?;
        let overlay_path = match &segmentation.overlay {
            Some(overlay) => {
                let path = output_dir.join(format!("{}_cut{}", basename, ext));
                pcseg_io::write_image(overlay, &path, format)?;
                Some(path)
            }
            None => None,
        };
        let mut crop_paths = Vec::with_capacity(segmentation.crops.len());
        for crop in &segmentation.crops {
            let path = output_dir.join(crop_file_name(&basename, crop.index, &ext));
            pcseg_io::write_image(&crop.pix, &path, format)?;
            crop_paths.push(path);
        }
        tracing::info!(
            "{}: {} segments, {} crops written to {}",
            page_path.display(),
            segmentation.segments.all_segments().count(),
            crop_paths.len(),
            output_dir.display()
        );

        Ok(PageOutput {
            segmentation,
            overlay_path,
            crop_paths,
        })
    }

    fn run(&self, page: &Pix, mask: &Pix, char_height: u32) -> PipelineResult<PageSegmentation> {
        let opts = &self.options;
        let working_mask = if mask.height() == opts.working_height {
            mask.clone()
        } else {
            scale_to_height(mask, opts.working_height, opts.scale_method)?
        };
        tracing::debug!(
            "mask {}x{} -> working {}x{}, page {}x{}, char height {}",
            mask.width(),
            mask.height(),
            working_mask.width(),
            working_mask.height(),
            page.width(),
            page.height(),
            char_height
        );

        let params = SegmentParams::new(page.height(), char_height, opts.working_height)
            .with_original_width(page.width());
        let segments = segment_with_options(&working_mask, &params, &opts.palette, &opts.xycut)?;
        for failed in segments.failures() {
            if let Err(e) = &failed.result {
                tracing::warn!("class '{}' produced no segments: {}", failed.name, e);
            }
        }

        let overlay = if opts.render_overlay {
            Some(render_overlay(&working_mask, &segments)?)
        } else {
            None
        };
        let crops = if opts.crop_text_segments {
            let rescaler = Rescaler::new(opts.working_height, page.height())?;
            crop_text_segments(page, &segments, &rescaler)
        } else {
            Vec::new()
        };

        Ok(PageSegmentation {
            original_width: page.width(),
            original_height: page.height(),
            char_height,
            working_mask,
            segments,
            overlay,
            crops,
        })
    }
}

/// Outline every segment in its class color on a copy of the working
/// mask.
///
/// The outline runs through the corners `(x_start, y_start)` and
/// `(x_end, y_end)`, so its right and bottom edges lie one pixel past the
/// segment and stay visible against a solid block of the same color.
pub fn render_overlay(working_mask: &Pix, segments: &SegmentMap) -> PipelineResult<Pix> {
    let mut out = working_mask.to_mut();
    for class in segments.iter() {
        let Ok(list) = &class.result else {
            continue;
        };
        for seg in list {
            let b = seg.working.to_box();
            let outline = Box::new_unchecked(b.x, b.y, b.w + 1, b.h + 1);
            out.render_box_color(&outline, 1, class.color)?;
        }
    }
    Ok(out.into())
}

/// Cut every text segment out of the original page.
///
/// Crop bounds truncate the rescaled working coordinates. Segments whose
/// crop falls outside the page are skipped but keep their index.
pub fn crop_text_segments(page: &Pix, segments: &SegmentMap, rescaler: &Rescaler) -> Vec<TextCrop> {
    segments
        .all_segments()
        .filter(|s| s.class == SegmentClass::Text)
        .enumerate()
        .filter_map(|(index, seg)| {
            let region = rescaler.crop_box(&seg.working);
            match page.clip_rectangle(&region) {
                Ok(pix) => Some(TextCrop {
                    index,
                    segment: *seg,
                    pix,
                }),
                Err(e) => {
                    tracing::warn!("skipping text segment {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Split a file name into base name and extension.
///
/// Up to two trailing extensions are kept together, so `page.bin.png`
/// gives `("page", ".bin.png")` and `scan.png` gives `("scan", ".png")`.
/// Returns `None` when either part would be empty.
pub fn split_basename<P: AsRef<Path>>(path: P) -> Option<(String, String)> {
    let name = path.as_ref().file_name()?.to_str()?;
    let last = name.rfind('.')?;
    let cut = name[..last].rfind('.').unwrap_or(last);
    let (base, ext) = name.split_at(cut);
    (!base.is_empty() && ext.len() > 1).then(|| (base.to_string(), ext.to_string()))
}

/// `{basename}__{index:03}__paragraph{ext}`
pub fn crop_file_name(basename: &str, index: usize, ext: &str) -> String {
    format!("{}__{:03}__paragraph{}", basename, index, ext)
}

/// Image format of the last component of an extension
fn output_format(ext: &str) -> PipelineResult<ImageFormat> {
    let last = ext.rsplit('.').next().unwrap_or("");
    match format_from_extension(last) {
        ImageFormat::Unknown => Err(PipelineError::Image(pcseg_io::IoError::UnsupportedFormat(
            format!("cannot write '{}' files", ext),
        ))),
        format => Ok(format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcseg_core::Color;

    fn page_and_mask() -> (Pix, Pix) {
        let page = Pix::new_filled(400, 600, Color::WHITE).unwrap();
        let mut mask = Pix::new_filled(200, 300, Color::WHITE).unwrap().to_mut();
        for y in 30..90 {
            for x in 20..180 {
                mask.set_rgb(x, y, 255, 0, 0).unwrap();
            }
        }
        for y in 150..250 {
            for x in 40..160 {
                mask.set_rgb(x, y, 0, 255, 0).unwrap();
            }
        }
        (page, mask.into())
    }

    #[test]
    fn test_split_basename() {
        assert_eq!(
            split_basename("dir/page.bin.png"),
            Some(("page".to_string(), ".bin.png".to_string()))
        );
        assert_eq!(
            split_basename("scan.png"),
            Some(("scan".to_string(), ".png".to_string()))
        );
        assert_eq!(
            split_basename("a.b.c.png"),
            Some(("a.b".to_string(), ".c.png".to_string()))
        );
        assert_eq!(split_basename("noext"), None);
        assert_eq!(split_basename(".png"), None);
    }

    #[test]
    fn test_crop_file_name() {
        assert_eq!(crop_file_name("p", 7, ".bin.png"), "p__007__paragraph.bin.png");
    }

    #[test]
    fn test_output_format() {
        assert_eq!(output_format(".bin.png").unwrap(), ImageFormat::Png);
        assert_eq!(output_format(".ppm").unwrap(), ImageFormat::Pnm);
        assert!(output_format(".tif").is_err());
    }

    #[test]
    fn test_segment_images() {
        let (page, mask) = page_and_mask();
        let seg = PageSegmenter::new(PipelineOptions::new().with_char_height(20)).unwrap();
        let result = seg.segment_images(&page, &mask).unwrap();

        let text = result.segments.segments("text").unwrap();
        assert_eq!(text.len(), 1);
        assert_eq!(
            (text[0].x_start, text[0].y_start, text[0].x_end, text[0].y_end),
            (40, 60, 360, 180)
        );
        let image = result.segments.segments("image").unwrap();
        assert_eq!(image.len(), 1);

        assert_eq!(result.crops.len(), 1);
        assert_eq!((result.crops[0].pix.width(), result.crops[0].pix.height()), (320, 120));

        let overlay = result.overlay.unwrap();
        assert_eq!(overlay.get_rgb(20, 30), Some((255, 0, 0)));
        assert_eq!(overlay.get_rgb(40, 150), Some((0, 255, 0)));
    }

    #[test]
    fn test_overlay_marks_segment_corners() {
        let (page, mask) = page_and_mask();
        let seg = PageSegmenter::new(PipelineOptions::new().with_char_height(20)).unwrap();
        let result = seg.segment_images(&page, &mask).unwrap();
        let overlay = result.overlay.unwrap();

        // right and bottom edges sit on x_end / y_end, outside the blocks
        assert_eq!(overlay.get_rgb(180, 30), Some((255, 0, 0)));
        assert_eq!(overlay.get_rgb(100, 90), Some((255, 0, 0)));
        assert_eq!(overlay.get_rgb(180, 90), Some((255, 0, 0)));
        assert_eq!(overlay.get_rgb(160, 200), Some((0, 255, 0)));
        assert_eq!(overlay.get_rgb(100, 250), Some((0, 255, 0)));
        // nothing beyond the outline
        assert_eq!(overlay.get_rgb(181, 30), Some((255, 255, 255)));
        assert_eq!(overlay.get_rgb(100, 91), Some((255, 255, 255)));

        let changed = overlay
            .data()
            .iter()
            .zip(result.working_mask.data())
            .filter(|(a, b)| a != b)
            .count();
        // (160 + 60 + 1) red plus (120 + 100 + 1) green outline pixels
        assert_eq!(changed, 221 + 221);
    }

    #[test]
    fn test_missing_char_height() {
        let (page, mask) = page_and_mask();
        let seg = PageSegmenter::new(PipelineOptions::default()).unwrap();
        assert!(matches!(
            seg.segment_images(&page, &mask),
            Err(PipelineError::MissingCharHeight(_))
        ));
    }

    #[test]
    fn test_invalid_options() {
        assert!(PageSegmenter::new(PipelineOptions::new().with_working_height(0)).is_err());
        assert!(PageSegmenter::new(PipelineOptions::new().with_palette(ClassPalette::new())).is_err());
    }
}

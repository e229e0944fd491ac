//! Translating text lines found inside a segment crop into page
//! coordinates

use crate::segment::Segment;
use crate::{XyCutError, XyCutResult};

/// Line rectangle relative to the top-left corner of a segment crop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBox {
    pub x_start: u32,
    pub y_start: u32,
    pub x_end: u32,
    pub y_end: u32,
}

impl LineBox {
    pub fn new(x_start: u32, y_start: u32, x_end: u32, y_end: u32) -> Self {
        Self {
            x_start,
            y_start,
            x_end,
            y_end,
        }
    }

    /// Parse the `y0,x0,y1,x1` coordinate records written by line finders.
    ///
    /// # Errors
    ///
    /// Returns [`XyCutError::InvalidParameter`] unless the record holds
    /// exactly four non-negative integers.
    pub fn parse_coords(record: &str) -> XyCutResult<Self> {
        let values = record
            .trim()
            .split(',')
            .map(|v| v.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                XyCutError::InvalidParameter(format!("bad line record '{}': {}", record, e))
            })?;
        match values[..] {
            [y0, x0, y1, x1] => Ok(Self::new(x0, y0, x1, y1)),
            _ => Err(XyCutError::InvalidParameter(format!(
                "line record '{}' needs 4 values, got {}",
                record,
                values.len()
            ))),
        }
    }

    /// Offset this line by the origin of `segment`.
    ///
    /// # Errors
    ///
    /// See [`translate_line`].
    pub fn to_page(&self, segment: &Segment) -> XyCutResult<LineBox> {
        translate_line(self, segment.x_start, segment.y_start)
    }

    /// Corners formatted as `"x,y x,y x,y x,y"`, clockwise from top left.
    pub fn points_string(&self) -> String {
        format!(
            "{},{} {},{} {},{} {},{}",
            self.x_start,
            self.y_start,
            self.x_end,
            self.y_start,
            self.x_end,
            self.y_end,
            self.x_start,
            self.y_end
        )
    }
}

/// Translate a crop-relative line by the crop origin.
///
/// # Errors
///
/// Returns [`XyCutError::InvalidParameter`] if a translated coordinate
/// does not fit in `u32`.
pub fn translate_line(line: &LineBox, origin_x: u32, origin_y: u32) -> XyCutResult<LineBox> {
    let shift = |v: u32, origin: u32| {
        v.checked_add(origin).ok_or_else(|| {
            XyCutError::InvalidParameter(format!(
                "line coordinate {} overflows when offset by {}",
                v, origin
            ))
        })
    };
    Ok(LineBox::new(
        shift(line.x_start, origin_x)?,
        shift(line.y_start, origin_y)?,
        shift(line.x_end, origin_x)?,
        shift(line.y_end, origin_y)?,
    ))
}

//! Class palette
//!
//! The pixel classifier paints every mask pixel with the color of its
//! semantic class. A [`ClassPalette`] lists the classes to segment, in the
//! order their segments are reported, together with their exact colors.

use pcseg_core::{Color, color};

/// Semantic class of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentClass {
    /// Body text, later passed to line finding and OCR
    Text,
    /// Illustrations and other graphics
    Image,
    /// Any other class
    Noise,
}

impl SegmentClass {
    /// Map a palette class name to its segment class.
    ///
    /// `text` and `image` are recognized; every other name is noise.
    pub fn from_name(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "image" => Self::Image,
            _ => Self::Noise,
        }
    }

    /// Short lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Noise => "noise",
        }
    }
}

/// How a mask pixel is compared with a class color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMatch {
    /// All three channels must be equal
    #[default]
    Exact,
    /// Each channel must agree on being zero or non-zero.
    ///
    /// Tolerates intensity drift introduced by interpolating resizes as
    /// long as no channel turns on or off.
    ZeroPattern,
}

impl ColorMatch {
    /// Check whether a packed mask pixel belongs to `target`.
    #[inline]
    pub fn matches(self, pixel: u32, target: Color) -> bool {
        let (r, g, b) = color::extract_rgb(pixel);
        match self {
            Self::Exact => r == target.r && g == target.g && b == target.b,
            Self::ZeroPattern => {
                (r == 0) == (target.r == 0)
                    && (g == 0) == (target.g == 0)
                    && (b == 0) == (target.b == 0)
            }
        }
    }
}

/// One palette entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassColor {
    /// Class name as reported in the output
    pub name: String,
    /// Exact mask color of the class
    pub color: Color,
}

impl ClassColor {
    /// Segment class derived from the name
    pub fn class(&self) -> SegmentClass {
        SegmentClass::from_name(&self.name)
    }
}

/// Ordered mapping from class name to mask color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPalette {
    entries: Vec<ClassColor>,
}

impl Default for ClassPalette {
    /// Text in red, then image in green.
    fn default() -> Self {
        Self::new()
            .with_class("text", Color::RED)
            .with_class("image", Color::GREEN)
    }
}

impl ClassPalette {
    /// Create an empty palette
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a class, or recolor it if the name is already present.
    pub fn with_class(mut self, name: &str, color: Color) -> Self {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.color = color,
            None => self.entries.push(ClassColor {
                name: name.to_string(),
                color,
            }),
        }
        self
    }

    /// Color of a class by name
    pub fn color_of(&self, name: &str) -> Option<Color> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.color)
    }

    /// Iterate over the entries in order
    pub fn iter(&self) -> impl Iterator<Item = &ClassColor> {
        self.entries.iter()
    }

    /// Entries in order
    pub fn entries(&self) -> &[ClassColor] {
        &self.entries
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the palette has no classes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_order() {
        let palette = ClassPalette::default();
        let names: Vec<_> = palette.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["text", "image"]);
        assert_eq!(palette.color_of("text"), Some(Color::RED));
        assert_eq!(palette.color_of("image"), Some(Color::GREEN));
        assert_eq!(palette.color_of("noise"), None);
    }

    #[test]
    fn test_with_class_replaces() {
        let palette = ClassPalette::default().with_class("text", Color::BLUE);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color_of("text"), Some(Color::BLUE));
    }

    #[test]
    fn test_class_from_name() {
        assert_eq!(SegmentClass::from_name("text"), SegmentClass::Text);
        assert_eq!(SegmentClass::from_name("image"), SegmentClass::Image);
        assert_eq!(SegmentClass::from_name("separator"), SegmentClass::Noise);
        assert_eq!(SegmentClass::Noise.as_str(), "noise");
    }

    #[test]
    fn test_exact_match() {
        let red = Color::RED;
        assert!(ColorMatch::Exact.matches(color::compose_rgb(255, 0, 0), red));
        assert!(!ColorMatch::Exact.matches(color::compose_rgb(254, 0, 0), red));
        assert!(!ColorMatch::Exact.matches(color::compose_rgb(255, 1, 0), red));
    }

    #[test]
    fn test_zero_pattern_match() {
        let red = Color::RED;
        assert!(ColorMatch::ZeroPattern.matches(color::compose_rgb(180, 0, 0), red));
        assert!(!ColorMatch::ZeroPattern.matches(color::compose_rgb(180, 3, 0), red));
        assert!(!ColorMatch::ZeroPattern.matches(color::compose_rgb(0, 0, 0), red));
        // white never matches a primary class color
        assert!(!ColorMatch::ZeroPattern.matches(color::compose_rgb(255, 255, 255), red));
    }
}

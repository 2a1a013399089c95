//! Backend-independent paginated document
//!
//! Coordinates are in PDF points with the origin at the top-left corner of
//! the page and y growing downwards. Text `y` is the baseline. The writer
//! flips to PDF user space when serializing.

use crate::photo::EmbeddedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(110, 110, 110);
    pub const LIGHT_GRAY: Rgb = Rgb(240, 240, 240);
    pub const BORDER: Rgb = Rgb(200, 200, 200);
    pub const HEADER_BLUE: Rgb = Rgb(41, 128, 185);

    pub fn from_tuple((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }

    /// Components scaled to the 0-1 range PDF color operators expect
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

/// What a photo slot shows when the actual image cannot be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Reference has no inline image data (session-only or unsupported type)
    NoPreview,
    /// Inline data was present but failed to decode
    ImageError,
}

impl PlaceholderKind {
    pub fn label(&self) -> &'static str {
        match self {
            PlaceholderKind::NoPreview => "No preview",
            PlaceholderKind::ImageError => "Image error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        font: Font,
        color: Rgb,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: EmbeddedImage,
    },
    Placeholder {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        kind: PlaceholderKind,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Text runs on this page in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub pages: Vec<Page>,
}

impl ReportDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

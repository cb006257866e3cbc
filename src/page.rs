use crate::model::RemoteImage;
use crate::style::{Rgb, StrokeStyle, TextStyle};

/// Index into [`Composition::images`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

/// One drawing command. Coordinates are millimetres measured from the top-left
/// page corner; `Text::baseline` is the baseline, boxes are given by their top edge.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        text: String,
        style: TextStyle,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: StrokeStyle,
    },
    FillRect {
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        fill: Rgb,
    },
    Image {
        id: ImageId,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub index: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            ops: Vec::new(),
        }
    }

    /// Text strings on this page in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    pub fn images(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Image { .. }))
    }
}

/// The composed document: pages plus the images they reference.
#[derive(Clone, Debug)]
pub struct Composition {
    pub title: String,
    pub pages: Vec<Page>,
    pub images: Vec<RemoteImage>,
    pub page_width: f32,
    pub page_height: f32,
}

impl Composition {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text across all pages, page by page.
    pub fn texts(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.texts()).collect()
    }
}

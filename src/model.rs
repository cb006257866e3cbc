use serde::Deserialize;

use crate::error::ImageLoadError;
use crate::style::TextAlign;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TimecardEntry {
    pub employee_name: String,
    pub time_in: String,
    pub time_out: String,
    pub lunch_minutes: Option<f64>,
    pub total_hours: f64,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Timecard {
    pub project_name: String,
    pub date: String, // ISO date or empty
    pub address: String,
    pub entries: Vec<TimecardEntry>,
    pub grand_total_hours: f64,
    pub logo_url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Receipt {
    pub vendor_name: String,
    pub receipt_date: String, // ISO date or empty
    pub total_amount: f64,
    pub category: String,
    pub photo_url: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Timecard,
    Receipt,
}

impl DocumentKind {
    pub fn slug(self) -> &'static str {
        match self {
            DocumentKind::Timecard => "timecard",
            DocumentKind::Receipt => "receipt",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImageData {
    /// Untouched DCT stream and its colour component count (1, 3 or 4).
    Jpeg { stream: Vec<u8>, components: u8 },
    /// Decoded 8-bit RGB samples, plus an alpha plane when any pixel is translucent.
    Png { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RemoteImage {
    pub data: ImageData,
    pub format: ImageFormat,
    pub natural_width: u32,
    pub natural_height: u32,
}

/// Outcome of an optional image request.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSlot {
    Loaded(RemoteImage),
    Skipped(ImageLoadError),
    NotRequested,
}

impl ImageSlot {
    pub fn image(&self) -> Option<&RemoteImage> {
        match self {
            ImageSlot::Loaded(img) => Some(img),
            _ => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ImageSlot::Skipped(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub x_offset: f32, // from the left content edge
    pub width: f32,
    pub align: TextAlign,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub summary: Option<Vec<String>>,
}

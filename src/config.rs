use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Paper {
    A4,
    Letter,
}

impl Paper {
    /// Width and height in millimetres.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Paper::A4 => (210.0, 297.0),
            Paper::Letter => (215.9, 279.4),
        }
    }
}

/// Page geometry and the fixed block heights the layout cursor reserves.
/// All lengths are millimetres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub line_height: f32,
    pub label_column_width: f32,
    pub title_block_height: f32,
    pub section_gap: f32,
    pub table_row_height: f32,
    pub logo_max_width: f32,
    pub logo_max_height: f32,
    pub photo_max_height: f32,
    pub header_gap: f32,
    pub footer_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::for_paper(Paper::A4)
    }
}

impl LayoutConfig {
    pub fn for_paper(paper: Paper) -> Self {
        let (page_width, page_height) = paper.dimensions();
        Self {
            page_width,
            page_height,
            margin: 15.0,
            line_height: 5.5,
            label_column_width: 38.0,
            title_block_height: 12.0,
            section_gap: 4.0,
            table_row_height: 7.0,
            logo_max_width: 40.0,
            logo_max_height: 20.0,
            photo_max_height: 150.0,
            header_gap: 4.0,
            footer_offset: 7.0,
        }
    }

    /// Read a JSON layout file. Keys it omits keep the value from `base`.
    pub fn from_json_file(path: &Path, base: &LayoutConfig) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_over(base, &text)?;
        config.validate()?;
        Ok(config)
    }

    /// Lay the keys of a JSON object over `base`.
    pub fn from_json_over(base: &LayoutConfig, text: &str) -> Result<Self, Error> {
        let mut merged = serde_json::to_value(base)?;
        let overrides: serde_json::Value = serde_json::from_str(text)?;
        match (&mut merged, overrides) {
            (serde_json::Value::Object(fields), serde_json::Value::Object(keys)) => {
                fields.extend(keys)
            }
            _ => return Err(Error::Config("layout file must hold a JSON object".to_string())),
        }
        Ok(serde_json::from_value(merged)?)
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Usable height between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("line_height", self.line_height),
            ("title_block_height", self.title_block_height),
            ("table_row_height", self.table_row_height),
            ("logo_max_width", self.logo_max_width),
            ("logo_max_height", self.logo_max_height),
            ("photo_max_height", self.photo_max_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {value}")));
            }
        }
        let non_negative = [
            ("margin", self.margin),
            ("label_column_width", self.label_column_width),
            ("section_gap", self.section_gap),
            ("header_gap", self.header_gap),
            ("footer_offset", self.footer_offset),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::Config(format!("{name} must not be negative, got {value}")));
            }
        }
        if self.content_width() <= self.label_column_width {
            return Err(Error::Config(format!(
                "margin {} leaves no room for values beside a {}mm label column",
                self.margin, self.label_column_width
            )));
        }
        if self.footer_offset >= self.margin && self.margin > 0.0 {
            return Err(Error::Config(format!(
                "footer_offset {} must sit inside the {}mm bottom margin",
                self.footer_offset, self.margin
            )));
        }
        if self.content_height() < self.title_block_height + self.table_row_height {
            return Err(Error::Config(format!(
                "page height {} is too small for margin {}",
                self.page_height, self.margin
            )));
        }
        Ok(())
    }
}

#![allow(dead_code)]

use std::io::Cursor;

use chrono::NaiveDate;
use fieldreport_pdf::{
    Composition, DrawOp, LayoutConfig, MemoryFetcher, Receipt, RenderOptions, Timecard,
    TimecardEntry,
};

pub const LOGO_URL: &str = "https://cdn.example.com/brand/logo.png";
pub const PHOTO_URL: &str = "https://storage.example.com/receipts/4411.jpg";

pub fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn options() -> RenderOptions {
    RenderOptions {
        layout: LayoutConfig::default(),
        generated_on: generated_on(),
        ..RenderOptions::default()
    }
}

pub fn employee(i: usize) -> String {
    format!("Worker {i:02}")
}

pub fn timecard(entries: usize) -> Timecard {
    Timecard {
        project_name: "North Yard Expansion".to_string(),
        date: "2025-03-14".to_string(),
        address: "1200 Industrial Way, Tacoma WA".to_string(),
        entries: (1..=entries)
            .map(|i| TimecardEntry {
                employee_name: employee(i),
                time_in: "07:00".to_string(),
                time_out: "15:30".to_string(),
                lunch_minutes: Some(30.0),
                total_hours: 8.0,
            })
            .collect(),
        grand_total_hours: 8.0 * entries as f64,
        logo_url: None,
    }
}

pub fn receipt() -> Receipt {
    Receipt {
        vendor_name: "Ace Hardware & Co.".to_string(),
        receipt_date: "2025-03-14".to_string(),
        total_amount: 1284.5,
        category: "Materials".to_string(),
        photo_url: None,
        logo_url: None,
    }
}

pub fn png_bytes(width: u32, height: u32, translucent: bool) -> Vec<u8> {
    let alpha = if translucent { 128 } else { 255 };
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([30, 90, 200, alpha]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 180, 120]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    out.into_inner()
}

pub fn fetcher() -> MemoryFetcher {
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert(LOGO_URL, png_bytes(300, 100, true), Some("image/png"));
    fetcher.insert(PHOTO_URL, jpeg_bytes(640, 480), Some("image/jpeg"));
    fetcher
}

/// (page index, baseline) of every text op equal to `needle`.
pub fn find_text(composition: &Composition, needle: &str) -> Vec<(usize, f32)> {
    composition
        .pages
        .iter()
        .flat_map(|page| {
            page.ops.iter().filter_map(move |op| match op {
                DrawOp::Text { text, baseline, .. } if text == needle => {
                    Some((page.index, *baseline))
                }
                _ => None,
            })
        })
        .collect()
}

/// (x, top, width, height) of every image op on `page`.
pub fn image_boxes(composition: &Composition, page: usize) -> Vec<(f32, f32, f32, f32)> {
    composition.pages[page]
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image {
                x,
                top,
                width,
                height,
                ..
            } => Some((*x, *top, *width, *height)),
            _ => None,
        })
        .collect()
}

pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

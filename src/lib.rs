mod compose;
mod config;
mod cursor;
mod error;
mod finalize;
mod fonts;
mod format;
mod loader;
mod model;
mod page;
mod pdf;
mod render;
mod style;

pub use compose::{DocumentImages, RenderOptions, compose_receipt, compose_timecard};
pub use config::{LayoutConfig, Paper};
pub use cursor::DocumentContext;
pub use error::{Error, ImageLoadError};
pub use finalize::stamp_footers;
pub use fonts::{fit_text, text_width, wrap_text};
pub use format::{
    PLACEHOLDER, display_date, display_time, document_filename, format_currency, format_hours,
    slugify,
};
#[cfg(feature = "http")]
pub use loader::HttpFetcher;
pub use loader::{
    FetchedResource, MemoryFetcher, ResourceFetcher, format_from_content_type, load_image,
    load_optional,
};
pub use model::{
    Column, DocumentKind, Field, ImageData, ImageFormat, ImageSlot, Receipt, RemoteImage, Table,
    Timecard, TimecardEntry,
};
pub use page::{Composition, DrawOp, ImageId, Page};
pub use render::{aspect_fit, draw_field, draw_fields, draw_image_block, draw_table};
pub use style::{FontFace, Rgb, StrokeStyle, TextAlign, TextStyle, Theme};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// A finished document ready to be saved.
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub images: DocumentImages,
}

fn write_document(
    kind: DocumentKind,
    composition: Composition,
    filename: String,
    images: DocumentImages,
) -> RenderedDocument {
    let bytes = pdf::write(&composition);
    log::info!(
        "Rendered {} '{}' ({} page(s), {} bytes)",
        kind.slug(),
        filename,
        composition.page_count(),
        bytes.len()
    );
    RenderedDocument {
        filename,
        bytes,
        page_count: composition.page_count(),
        images,
    }
}

pub fn render_timecard(
    timecard: &Timecard,
    fetcher: &dyn ResourceFetcher,
    options: &RenderOptions,
) -> RenderedDocument {
    let images = DocumentImages {
        logo: load_optional(fetcher, options.logo_url(timecard.logo_url.as_deref())),
        photo: ImageSlot::NotRequested,
    };
    let composition = compose_timecard(timecard, &images, options);
    let filename = document_filename(DocumentKind::Timecard, &timecard.project_name, &timecard.date);
    write_document(DocumentKind::Timecard, composition, filename, images)
}

pub fn render_receipt(
    receipt: &Receipt,
    fetcher: &dyn ResourceFetcher,
    options: &RenderOptions,
) -> RenderedDocument {
    // Logo first, then photo: fetches run one at a time in document order.
    let images = DocumentImages {
        logo: load_optional(fetcher, options.logo_url(receipt.logo_url.as_deref())),
        photo: load_optional(fetcher, receipt.photo_url.as_deref()),
    };
    let composition = compose_receipt(receipt, &images, options);
    let filename = document_filename(DocumentKind::Receipt, &receipt.vendor_name, &receipt.receipt_date);
    write_document(DocumentKind::Receipt, composition, filename, images)
}

/// Read a JSON record, render it and save it as `<output_dir>/<filename>`.
/// Returns the written path.
pub fn render_json_file(
    kind: DocumentKind,
    input: &Path,
    output_dir: &Path,
    fetcher: &dyn ResourceFetcher,
    options: &RenderOptions,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();

    let text = std::fs::read_to_string(input)?;
    let (doc, t_parse) = match kind {
        DocumentKind::Timecard => {
            let record: Timecard = serde_json::from_str(&text)?;
            let t_parse = t0.elapsed();
            let doc = render_timecard(&record, fetcher, options);
            (doc, t_parse)
        }
        DocumentKind::Receipt => {
            let record: Receipt = serde_json::from_str(&text)?;
            let t_parse = t0.elapsed();
            let doc = render_receipt(&record, fetcher, options);
            (doc, t_parse)
        }
    };
    let t_render = t0.elapsed();

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(&doc.filename);
    std::fs::write(&path, &doc.bytes)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.bytes.len(),
    );

    Ok(path)
}

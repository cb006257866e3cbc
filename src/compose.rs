use chrono::NaiveDate;

use crate::config::LayoutConfig;
use crate::cursor::DocumentContext;
use crate::finalize::stamp_footers;
use crate::fonts::fit_text;
use crate::format::{display_date, display_time, format_currency, format_hours};
use crate::model::{Column, Field, ImageSlot, Receipt, RemoteImage, Table, Timecard};
use crate::page::Composition;
use crate::render::{aspect_fit, draw_fields, draw_image_block, draw_table};
use crate::style::{TextAlign, Theme};

const SUBTITLE_GAP: f32 = 7.0;

/// Everything about a render that is not the record itself.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub layout: LayoutConfig,
    pub theme: Theme,
    pub generated_on: NaiveDate,
    /// Logo used when the record does not name one.
    pub default_logo_url: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            theme: Theme::default(),
            generated_on: chrono::Local::now().date_naive(),
            default_logo_url: None,
        }
    }
}

impl RenderOptions {
    pub(crate) fn logo_url<'a>(&'a self, record_logo: Option<&'a str>) -> Option<&'a str> {
        record_logo
            .filter(|u| !u.trim().is_empty())
            .or(self.default_logo_url.as_deref())
    }
}

/// Optional imagery already resolved by the loader.
#[derive(Clone, Debug)]
pub struct DocumentImages {
    pub logo: ImageSlot,
    pub photo: ImageSlot,
}

impl Default for DocumentImages {
    fn default() -> Self {
        Self {
            logo: ImageSlot::NotRequested,
            photo: ImageSlot::NotRequested,
        }
    }
}

/// Title, subtitle and right-aligned logo, closed by an accent rule.
fn draw_header(ctx: &mut DocumentContext, title: &str, subtitle: &str, logo: Option<&RemoteImage>) {
    let theme = ctx.theme;
    let config = ctx.config;
    let top = ctx.y();

    let logo_bottom = match logo {
        Some(img) => {
            let (w, h) = aspect_fit(
                img.natural_width,
                img.natural_height,
                config.logo_max_width,
                config.logo_max_height,
            );
            ctx.draw_image(img, ctx.right() - w, top, w, h);
            top + h
        }
        None => top,
    };

    let text_w = match logo {
        Some(_) => ctx.content_width() - config.logo_max_width - config.header_gap,
        None => ctx.content_width(),
    };
    let title_baseline = DocumentContext::baseline_for(top, &theme.title);
    ctx.draw_text(
        ctx.left(),
        title_baseline,
        &fit_text(title, &theme.title, text_w),
        theme.title,
    );
    let mut text_bottom = title_baseline + 2.0;
    if !subtitle.trim().is_empty() {
        let sub_baseline = title_baseline + SUBTITLE_GAP;
        ctx.draw_text(
            ctx.left(),
            sub_baseline,
            &fit_text(subtitle, &theme.subtitle, text_w),
            theme.subtitle,
        );
        text_bottom = sub_baseline + 2.0;
    }

    let rule_y = logo_bottom.max(text_bottom) + config.header_gap;
    ctx.draw_rule(ctx.left(), ctx.right(), rule_y, theme.accent_rule);
    let next = rule_y + config.header_gap + config.section_gap;
    ctx.advance(next - top);
}

fn timecard_table(timecard: &Timecard, content_width: f32) -> Table {
    let layout: [(&str, f32, TextAlign); 5] = [
        ("Employee", 0.36, TextAlign::Left),
        ("Time In", 0.16, TextAlign::Left),
        ("Time Out", 0.16, TextAlign::Left),
        ("Lunch (min)", 0.14, TextAlign::Right),
        ("Hours", 0.18, TextAlign::Right),
    ];
    let mut x = 0.0;
    let columns = layout
        .iter()
        .map(|&(name, share, align)| {
            let width = content_width * share;
            let col = Column {
                name: name.to_string(),
                x_offset: x,
                width,
                align,
            };
            x += width;
            col
        })
        .collect();

    let rows = timecard
        .entries
        .iter()
        .map(|e| {
            vec![
                e.employee_name.clone(),
                display_time(&e.time_in),
                display_time(&e.time_out),
                e.lunch_minutes.map(|m| format!("{m}")).unwrap_or_default(),
                format_hours(e.total_hours),
            ]
        })
        .collect();

    let summary = vec![
        "Grand Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        format_hours(timecard.grand_total_hours),
    ];

    Table {
        columns,
        rows,
        summary: Some(summary),
    }
}

/// Lay out a timecard: header, details, employee log; then stamp footers.
pub fn compose_timecard(
    timecard: &Timecard,
    images: &DocumentImages,
    options: &RenderOptions,
) -> Composition {
    let mut ctx = DocumentContext::new(&options.layout, &options.theme);

    draw_header(&mut ctx, "Timecard", &timecard.project_name, images.logo.image());

    ctx.draw_section_title("Timecard Details");
    draw_fields(
        &mut ctx,
        &[
            Field::new("Project", timecard.project_name.as_str()),
            Field::new("Date", display_date(&timecard.date)),
            Field::new("Address", timecard.address.as_str()),
            Field::new("Employees", timecard.entries.len().to_string()),
            Field::new("Total Hours", format_hours(timecard.grand_total_hours)),
        ],
    );

    ctx.draw_section_title("Employee Log");
    let table = timecard_table(timecard, ctx.content_width());
    draw_table(&mut ctx, &table);

    finish(ctx, format!("Timecard - {}", timecard.project_name), options)
}

/// Lay out a receipt: header, details and, when it loaded, the photo.
pub fn compose_receipt(
    receipt: &Receipt,
    images: &DocumentImages,
    options: &RenderOptions,
) -> Composition {
    let mut ctx = DocumentContext::new(&options.layout, &options.theme);

    draw_header(&mut ctx, "Receipt", &receipt.vendor_name, images.logo.image());

    ctx.draw_section_title("Receipt Details");
    draw_fields(
        &mut ctx,
        &[
            Field::new("Vendor", receipt.vendor_name.as_str()),
            Field::new("Date", display_date(&receipt.receipt_date)),
            Field::new("Category", receipt.category.as_str()),
            Field::new("Total Amount", format_currency(receipt.total_amount)),
        ],
    );

    if let Some(photo) = images.photo.image() {
        let max_w = ctx.content_width();
        let max_h = options
            .layout
            .photo_max_height
            .min(options.layout.content_height() - options.layout.title_block_height);
        // Keep the title on the same page as the photo.
        let (_, h) = aspect_fit(photo.natural_width, photo.natural_height, max_w, max_h);
        ctx.ensure_space(options.layout.title_block_height + h);
        ctx.draw_section_title("Receipt Photo");
        draw_image_block(&mut ctx, photo, max_w, max_h);
    }

    finish(ctx, format!("Receipt - {}", receipt.vendor_name), options)
}

fn finish(ctx: DocumentContext, title: String, options: &RenderOptions) -> Composition {
    let mut composition = ctx.into_composition(title);
    stamp_footers(
        &mut composition,
        &options.layout,
        &options.theme,
        options.generated_on,
    );
    composition
}

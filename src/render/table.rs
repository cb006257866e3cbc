use crate::cursor::DocumentContext;
use crate::fonts::{MM_PER_PT, fit_text};
use crate::format::or_placeholder;
use crate::model::{Column, Table};
use crate::style::{Rgb, TextStyle};

const CELL_PADDING: f32 = 1.5;

fn draw_cells(
    ctx: &mut DocumentContext,
    columns: &[Column],
    cells: &[String],
    style: TextStyle,
    fill: Option<Rgb>,
    placeholder: bool,
) {
    let row_h = ctx.config.table_row_height;
    let top = ctx.y();
    if let Some(fill) = fill {
        let width = ctx.content_width();
        ctx.fill_rect(ctx.left(), top, width, row_h, fill);
    }

    // Vertically centre a line of `style` text in the row.
    let baseline = DocumentContext::baseline_for(top, &style) + (row_h - style.size * MM_PER_PT) / 2.0;
    for (col, cell) in columns.iter().zip(cells) {
        let cell = if placeholder { or_placeholder(cell) } else { cell.as_str() };
        let inner_w = (col.width - 2.0 * CELL_PADDING).max(0.0);
        let text = fit_text(cell, &style, inner_w);
        let x = ctx.left() + col.x_offset + CELL_PADDING;
        ctx.draw_text_aligned(x, inner_w, baseline, &text, style, col.align);
    }
    ctx.advance(row_h);
}

/// Shaded header, zebra-striped body rows and an optional summary row.
///
/// Rows are placed one at a time; a row that would cross the bottom margin
/// starts a new page. The summary row always shares a page with the last
/// data row. The column header is drawn once, on the page where the
/// table starts, and is not repeated on continuation pages.
pub fn draw_table(ctx: &mut DocumentContext, table: &Table) {
    let row_h = ctx.config.table_row_height;
    let theme = ctx.theme;

    let has_summary = table.summary.is_some();
    let last = table.rows.len().checked_sub(1);

    // Header plus the first row, so a header never sits alone at a page foot.
    // A one-row (or empty) table also keeps its summary with the header.
    let mut lead = if table.rows.is_empty() { row_h } else { 2.0 * row_h };
    if has_summary && table.rows.len() <= 1 {
        lead += row_h;
    }
    ctx.ensure_space(lead);
    let header: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
    draw_cells(ctx, &table.columns, &header, theme.table_header, Some(theme.header_fill), false);

    for (ri, row) in table.rows.iter().enumerate() {
        // The last row travels with the summary row.
        let need = if has_summary && Some(ri) == last { 2.0 * row_h } else { row_h };
        if ctx.ensure_space(need) {
            log::debug!(
                "TABLE row={} continues on page {}",
                ri,
                ctx.page_index() + 1
            );
        }
        let fill = (ri % 2 == 1).then_some(theme.zebra_fill);
        draw_cells(ctx, &table.columns, row, theme.table_cell, fill, true);
    }

    if let Some(summary) = &table.summary {
        ctx.ensure_space(row_h);
        draw_cells(ctx, &table.columns, summary, theme.table_summary, Some(theme.summary_fill), false);
    }

    ctx.advance(ctx.config.section_gap);
}

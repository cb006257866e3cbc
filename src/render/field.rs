use crate::cursor::DocumentContext;
use crate::fonts::{fit_text, wrap_text};
use crate::model::Field;

/// Draw a bold label and its wrapped value. Each wrapped line is an atomic
/// unit, so a long value may continue on the next page.
///
/// Returns false (and draws nothing, label included) when the value is blank.
pub fn draw_field(ctx: &mut DocumentContext, field: &Field) -> bool {
    let label_style = ctx.theme.label;
    let value_style = ctx.theme.value;
    let label_w = ctx.config.label_column_width;
    let line_h = ctx.config.line_height;
    let value_x = ctx.left() + label_w;
    let value_w = ctx.content_width() - label_w;

    let lines = wrap_text(&field.value, &value_style, value_w);
    if lines.is_empty() {
        return false;
    }

    let label = fit_text(&field.label, &label_style, label_w - 2.0);
    for (i, line) in lines.iter().enumerate() {
        ctx.ensure_space(line_h);
        let baseline = DocumentContext::baseline_for(ctx.y(), &value_style);
        if i == 0 {
            ctx.draw_text(ctx.left(), baseline, &label, label_style);
        }
        ctx.draw_text(value_x, baseline, line, value_style);
        ctx.advance(line_h);
    }
    true
}

/// Draw fields in order, then the section gap. Returns how many were drawn.
pub fn draw_fields(ctx: &mut DocumentContext, fields: &[Field]) -> usize {
    let drawn = fields.iter().filter(|f| draw_field(ctx, f)).count();
    ctx.advance(ctx.config.section_gap);
    drawn
}

use chrono::NaiveDate;

use crate::config::LayoutConfig;
use crate::fonts::text_width;
use crate::format::format_date;
use crate::page::{Composition, DrawOp};
use crate::style::Theme;

/// Stamp footers once the page count is final: a rule, the generation date on
/// the left and, for multi-page documents only, `Page p of N` on the right.
///
/// Only appends to pages that composition has already closed.
pub fn stamp_footers(
    composition: &mut Composition,
    config: &LayoutConfig,
    theme: &Theme,
    generated_on: NaiveDate,
) {
    let total = composition.pages.len();
    let left = config.margin;
    let right = config.page_width - config.margin;
    let rule_y = config.page_height - config.margin + 2.0;
    let baseline = config.page_height - config.margin + config.footer_offset;
    let style = theme.footer;
    let stamp = format!("Generated {}", format_date(generated_on));

    for page in &mut composition.pages {
        page.ops.push(DrawOp::Rule {
            x1: left,
            y1: rule_y,
            x2: right,
            y2: rule_y,
            stroke: theme.footer_rule,
        });
        page.ops.push(DrawOp::Text {
            x: left,
            baseline,
            text: stamp.clone(),
            style,
        });
        if total > 1 {
            let label = format!("Page {} of {}", page.index + 1, total);
            page.ops.push(DrawOp::Text {
                x: right - text_width(&label, &style),
                baseline,
                text: label,
                style,
            });
        }
    }
    log::debug!("stamped footers on {total} page(s)");
}

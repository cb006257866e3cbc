use crate::config::LayoutConfig;
use crate::fonts::{MM_PER_PT, text_width};
use crate::model::RemoteImage;
use crate::page::{Composition, DrawOp, ImageId, Page};
use crate::style::{Rgb, StrokeStyle, TextAlign, TextStyle, Theme};

/// Baseline sits this fraction of the font size below the top of its line box.
const ASCENT_RATIO: f32 = 0.78;

/// Layout state for one in-flight render. Pages are append-only.
pub struct DocumentContext<'a> {
    pub(crate) config: &'a LayoutConfig,
    pub(crate) theme: &'a Theme,
    y: f32,
    pages: Vec<Page>,
    images: Vec<RemoteImage>,
}

impl<'a> DocumentContext<'a> {
    pub fn new(config: &'a LayoutConfig, theme: &'a Theme) -> Self {
        Self {
            config,
            theme,
            y: config.margin,
            pages: vec![Page::new(0)],
            images: Vec::new(),
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    pub fn left(&self) -> f32 {
        self.config.margin
    }

    pub fn right(&self) -> f32 {
        self.config.page_width - self.config.margin
    }

    pub fn content_width(&self) -> f32 {
        self.config.content_width()
    }

    pub fn bottom_limit(&self) -> f32 {
        self.config.page_height - self.config.margin
    }

    fn at_page_top(&self) -> bool {
        (self.y - self.config.margin).abs() < 0.01
    }

    /// Start a new page when `height` does not fit below the cursor.
    /// Returns true when a break was inserted.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.y + height <= self.bottom_limit() {
            return false;
        }
        if self.at_page_top() {
            // Taller than a whole page: a fresh page is the best there is.
            log::debug!(
                "element of {height:.1}mm exceeds page {} content height",
                self.page_index() + 1
            );
            return false;
        }
        self.new_page();
        true
    }

    pub fn new_page(&mut self) {
        let index = self.pages.len();
        log::debug!("page break at y={:.1} -> page {}", self.y, index + 1);
        self.pages.push(Page::new(index));
        self.y = self.config.margin;
    }

    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Baseline for text whose line box starts at `top`.
    pub fn baseline_for(top: f32, style: &TextStyle) -> f32 {
        top + style.size * MM_PER_PT * ASCENT_RATIO
    }

    pub fn draw_text(&mut self, x: f32, baseline: f32, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.push(DrawOp::Text {
            x,
            baseline,
            text: text.to_string(),
            style,
        });
    }

    /// Text aligned inside the horizontal span `[x, x + width]`.
    pub fn draw_text_aligned(
        &mut self,
        x: f32,
        width: f32,
        baseline: f32,
        text: &str,
        style: TextStyle,
        align: TextAlign,
    ) {
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Right => x + width - text_width(text, &style),
        };
        self.draw_text(x, baseline, text, style);
    }

    pub fn draw_rule(&mut self, x1: f32, x2: f32, y: f32, stroke: StrokeStyle) {
        self.push(DrawOp::Rule {
            x1,
            y1: y,
            x2,
            y2: y,
            stroke,
        });
    }

    pub fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, fill: Rgb) {
        self.push(DrawOp::FillRect {
            x,
            top,
            width,
            height,
            fill,
        });
    }

    pub fn draw_image(&mut self, image: &RemoteImage, x: f32, top: f32, width: f32, height: f32) {
        let id = self.register_image(image);
        self.push(DrawOp::Image {
            id,
            x,
            top,
            width,
            height,
        });
    }

    fn register_image(&mut self, image: &RemoteImage) -> ImageId {
        if let Some(pos) = self.images.iter().position(|i| i == image) {
            return ImageId(pos);
        }
        self.images.push(image.clone());
        ImageId(self.images.len() - 1)
    }

    /// Title, accent underline and spacing, kept together on one page.
    pub fn draw_section_title(&mut self, text: &str) {
        let style = self.theme.section_title;
        let rule = self.theme.section_rule;
        let block = self.config.title_block_height;

        self.ensure_space(block);
        let top = self.y;
        let baseline = Self::baseline_for(top, &style);
        self.draw_text(self.left(), baseline, text, style);
        let rule_y = baseline + 2.0;
        self.draw_rule(self.left(), self.right(), rule_y, rule);
        self.advance(block - 2.0);
    }

    pub fn into_composition(self, title: String) -> Composition {
        Composition {
            title,
            pages: self.pages,
            images: self.images,
            page_width: self.config.page_width,
            page_height: self.config.page_height,
        }
    }
}

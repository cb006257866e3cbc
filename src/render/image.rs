use crate::cursor::DocumentContext;
use crate::model::RemoteImage;

/// Uniform scale that fits `natural` inside `max` without distortion.
/// The image may grow or shrink; it never exceeds either bound.
pub fn aspect_fit(natural_w: u32, natural_h: u32, max_w: f32, max_h: f32) -> (f32, f32) {
    if natural_w == 0 || natural_h == 0 {
        return (0.0, 0.0);
    }
    let (w, h) = (natural_w as f32, natural_h as f32);
    let scale = (max_w / w).min(max_h / h);
    (w * scale, h * scale)
}

/// Draw `image` at the left content edge, scaled into the bounding box, and
/// move the cursor below it. Returns the drawn size.
pub fn draw_image_block(
    ctx: &mut DocumentContext,
    image: &RemoteImage,
    max_w: f32,
    max_h: f32,
) -> (f32, f32) {
    // Keep the block placeable on a single page.
    let max_h = max_h.min(ctx.config.content_height());
    let (w, h) = aspect_fit(image.natural_width, image.natural_height, max_w, max_h);
    ctx.ensure_space(h);
    let top = ctx.y();
    ctx.draw_image(image, ctx.left(), top, w, h);
    ctx.advance(h + ctx.config.section_gap);
    (w, h)
}

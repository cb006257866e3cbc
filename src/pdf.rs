use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::fonts::{MM_PER_PT, to_winansi_bytes};
use crate::model::{ImageData, RemoteImage};
use crate::page::{Composition, DrawOp, Page};
use crate::style::FontFace;

const FACES: [FontFace; 2] = [FontFace::Regular, FontFace::Bold];

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn embed_image(pdf: &mut Pdf, img: &RemoteImage, alloc: &mut impl FnMut() -> Ref) -> Ref {
    let xobj_ref = alloc();
    let (w, h) = (img.natural_width as i32, img.natural_height as i32);

    match &img.data {
        ImageData::Jpeg { stream, components } => {
            let mut xobj = pdf.image_xobject(xobj_ref, stream);
            xobj.filter(Filter::DctDecode);
            xobj.width(w);
            xobj.height(h);
            match *components {
                1 => xobj.color_space().device_gray(),
                4 => xobj.color_space().device_cmyk(),
                _ => xobj.color_space().device_rgb(),
            };
            xobj.bits_per_component(8);
        }
        ImageData::Png { rgb, alpha } => {
            let smask_ref = alpha.as_ref().map(|alpha| {
                let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w);
                mask.height(h);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                mask_ref
            });

            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(rgb, 6);
            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w);
            xobj.height(h);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }
    xobj_ref
}

/// Emit one page's ops. Each op sets its own state inside a save/restore pair.
fn page_content(page: &Page, page_height: f32) -> Content {
    let mut content = Content::new();
    let flip = |y: f32| pt(page_height - y);

    for op in &page.ops {
        content.save_state();
        match op {
            DrawOp::Text {
                x,
                baseline,
                text,
                style,
            } => {
                let (r, g, b) = style.color.components();
                content.set_fill_rgb(r, g, b);
                content.begin_text();
                content.set_font(Name(style.face.pdf_name()), style.size);
                content.next_line(pt(*x), flip(*baseline));
                content.show(Str(&to_winansi_bytes(text)));
                content.end_text();
            }
            DrawOp::Rule {
                x1,
                y1,
                x2,
                y2,
                stroke,
            } => {
                let (r, g, b) = stroke.color.components();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(pt(stroke.width));
                content.move_to(pt(*x1), flip(*y1));
                content.line_to(pt(*x2), flip(*y2));
                content.stroke();
            }
            DrawOp::FillRect {
                x,
                top,
                width,
                height,
                fill,
            } => {
                let (r, g, b) = fill.components();
                content.set_fill_rgb(r, g, b);
                content.rect(pt(*x), flip(top + height), pt(*width), pt(*height));
                content.fill_nonzero();
            }
            DrawOp::Image {
                id,
                x,
                top,
                width,
                height,
            } => {
                content.transform([
                    pt(*width),
                    0.0,
                    0.0,
                    pt(*height),
                    pt(*x),
                    flip(top + height),
                ]);
                content.x_object(Name(image_name(id.0).as_bytes()));
            }
        }
        content.restore_state();
    }
    content
}

/// Serialize a finalized composition into PDF bytes.
pub fn write(composition: &Composition) -> Vec<u8> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    let font_refs: Vec<(FontFace, Ref)> = FACES
        .iter()
        .map(|&face| {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(face.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            (face, font_ref)
        })
        .collect();

    let image_refs: Vec<Ref> = composition
        .images
        .iter()
        .map(|img| embed_image(&mut pdf, img, &mut alloc))
        .collect();

    let n = composition.pages.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, page) in composition.pages.iter().enumerate() {
        let raw = page_content(page, composition.page_height).finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let media_box = Rect::new(
        0.0,
        0.0,
        pt(composition.page_width),
        pt(composition.page_height),
    );
    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(media_box)
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (face, font_ref) in &font_refs {
                fonts.pair(Name(face.pdf_name()), *font_ref);
            }
        }
        if !image_refs.is_empty() {
            let mut xobjects = resources.x_objects();
            for (idx, xobj_ref) in image_refs.iter().enumerate() {
                xobjects.pair(Name(image_name(idx).as_bytes()), *xobj_ref);
            }
        }
    }

    pdf.document_info(info_id)
        .title(TextStr(&composition.title))
        .producer(TextStr(concat!("fieldreport-pdf ", env!("CARGO_PKG_VERSION"))));

    let bytes = pdf.finish();
    log::debug!(
        "PDF written: {} page(s), {} image(s), {} bytes in {:.1}ms",
        n,
        image_refs.len(),
        bytes.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );
    bytes
}

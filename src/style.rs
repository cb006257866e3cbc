//! Immutable drawing descriptors. Every draw operation carries its own style,
//! so nothing set for one element can leak into the next.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub(crate) fn components(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32, // points
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f32, color: Rgb) -> Self {
        Self { face, size, color }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f32, // logical units
    pub color: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAlign {
    Left,
    Right,
}

/// The document palette and type scale.
#[derive(Clone, Debug)]
pub struct Theme {
    pub title: TextStyle,
    pub subtitle: TextStyle,
    pub section_title: TextStyle,
    pub label: TextStyle,
    pub value: TextStyle,
    pub table_header: TextStyle,
    pub table_cell: TextStyle,
    pub table_summary: TextStyle,
    pub footer: TextStyle,
    pub accent_rule: StrokeStyle,
    pub section_rule: StrokeStyle,
    pub footer_rule: StrokeStyle,
    pub header_fill: Rgb,
    pub zebra_fill: Rgb,
    pub summary_fill: Rgb,
}

const ACCENT: Rgb = Rgb(37, 99, 235);
const INK: Rgb = Rgb(17, 24, 39);
const MUTED: Rgb = Rgb(107, 114, 128);

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: TextStyle::new(FontFace::Bold, 18.0, INK),
            subtitle: TextStyle::new(FontFace::Regular, 11.0, MUTED),
            section_title: TextStyle::new(FontFace::Bold, 12.0, ACCENT),
            label: TextStyle::new(FontFace::Bold, 10.0, INK),
            value: TextStyle::new(FontFace::Regular, 10.0, INK),
            table_header: TextStyle::new(FontFace::Bold, 9.0, INK),
            table_cell: TextStyle::new(FontFace::Regular, 9.0, INK),
            table_summary: TextStyle::new(FontFace::Bold, 9.0, INK),
            footer: TextStyle::new(FontFace::Regular, 8.0, MUTED),
            accent_rule: StrokeStyle {
                width: 0.6,
                color: ACCENT,
            },
            section_rule: StrokeStyle {
                width: 0.3,
                color: ACCENT,
            },
            footer_rule: StrokeStyle {
                width: 0.2,
                color: Rgb(209, 213, 219),
            },
            header_fill: Rgb(229, 231, 235),
            zebra_fill: Rgb(249, 250, 251),
            summary_fill: Rgb(219, 234, 254),
        }
    }
}

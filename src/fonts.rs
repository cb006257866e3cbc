use crate::style::{FontFace, TextStyle};

/// Millimetres per PDF point. Layout runs in millimetres, font sizes in points.
pub(crate) const MM_PER_PT: f32 = 25.4 / 72.0;

const ELLIPSIS: char = '\u{2026}';

impl FontFace {
    /// Resource name used inside content streams.
    pub(crate) fn pdf_name(self) -> &'static [u8] {
        match self {
            FontFace::Regular => b"F1",
            FontFace::Bold => b"F2",
        }
    }

    pub(crate) fn base_font(self) -> &'static [u8] {
        match self {
            FontFace::Regular => b"Helvetica",
            FontFace::Bold => b"Helvetica-Bold",
        }
    }

    /// Width of one WinAnsi byte in 1000-units.
    fn byte_width_1000(self, b: u8) -> f32 {
        let regular = match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            0x85 => 1000.0,                       // ellipsis
            0x97 => 1000.0,                       // em dash
            _ => 556.0,
        };
        match self {
            FontFace::Regular => regular,
            // Helvetica-Bold runs about 5% wider on average, digits excepted.
            FontFace::Bold if (48..=57).contains(&b) => regular,
            FontFace::Bold => regular * 1.05,
        }
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page become `?`.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match char_to_winansi(c) {
            0 if c == '\t' => b' ',
            0 => b'?',
            b => b,
        })
        .collect()
}

/// Rendered width of `text` in millimetres.
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    to_winansi_bytes(text)
        .into_iter()
        .map(|b| style.face.byte_width_1000(b))
        .sum::<f32>()
        * style.size
        / 1000.0
        * MM_PER_PT
}

/// Truncate `text` with an ellipsis so it fits in `max_width` millimetres.
pub fn fit_text(text: &str, style: &TextStyle, max_width: f32) -> String {
    if text_width(text, style) <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let mut candidate = out.clone();
        candidate.push(ch);
        candidate.push(ELLIPSIS);
        if text_width(&candidate, style) > max_width {
            break;
        }
        out.push(ch);
    }
    let trimmed = out.trim_end();
    let mut out = trimmed.to_string();
    out.push(ELLIPSIS);
    out
}

/// Greedy word wrap measured with font metrics. Words wider than the column are
/// broken by character. Always returns at least one line for non-blank text.
pub fn wrap_text(text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let space_w = text_width(" ", style);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            // One blank line between paragraphs; none leading.
            if lines.last().is_some_and(|l: &String| !l.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }
        let mut current = String::new();
        let mut current_w = 0.0f32;

        for word in paragraph.split_whitespace() {
            let word_w = text_width(word, style);
            let proposed = if current.is_empty() {
                word_w
            } else {
                current_w + space_w + word_w
            };

            if proposed <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_w = proposed;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_w = 0.0;
            }

            if word_w <= max_width {
                current.push_str(word);
                current_w = word_w;
                continue;
            }

            for ch in word.chars() {
                let ch_w = text_width(ch.encode_utf8(&mut [0; 4]), style);
                if !current.is_empty() && current_w + ch_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_w = 0.0;
                }
                current.push(ch);
                current_w += ch_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

//! Minimal single-font PDF writer used by the plan export.
//!
//! Produces an uncompressed PDF 1.3 file on A4 paper using the standard
//! Type 1 fonts Helvetica and Helvetica-Bold with `WinAnsiEncoding`, so text
//! is written as single-byte strings and no font program is embedded.
//! Layout follows the classic "cell" model: a centered bold header at the
//! top of every page, then word-wrapped rows of fixed height with an
//! automatic page break near the bottom margin.

use chrono::{DateTime, Utc};

const MM: f64 = 72.0 / 25.4;

pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;
pub const MARGIN: f64 = 10.0 * MM;
pub const LINE_HEIGHT: f64 = 10.0 * MM;
pub const CELL_PADDING: f64 = 1.0 * MM;
pub const FONT_SIZE: f64 = 12.0;
const PAGE_BREAK_AT: f64 = PAGE_HEIGHT - 20.0 * MM;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    fn resource(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
        }
    }
}

// Glyph widths in 1/1000 em for bytes 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// Upper Latin-1 glyphs are not tabulated; an average digit width is close enough.
const DEFAULT_WIDTH: u16 = 556;

fn glyph_width(byte: u8, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Regular => &HELVETICA_WIDTHS,
        FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match byte {
        0..=31 => 0,
        32..=126 => table[(byte - 32) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Width of a WinAnsi-encoded string in points.
pub fn text_width(text: &[u8], style: FontStyle, size: f64) -> f64 {
    text.iter()
        .map(|b| f64::from(glyph_width(*b, style)))
        .sum::<f64>()
        * size
        / 1000.0
}

/// Splits one row of text into pieces that fit `max_width`, preferring to
/// break at the last space. Always yields at least one (possibly empty) piece.
pub fn wrap_line(text: &[u8], max_width: f64, style: FontStyle, size: f64) -> Vec<&[u8]> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut width = 0.0;
    let mut i = 0;

    while i < text.len() {
        let byte = text[i];
        if byte == b' ' {
            last_space = Some(i);
        }
        width += f64::from(glyph_width(byte, style)) * size / 1000.0;

        if width > max_width {
            match last_space {
                Some(space) => {
                    pieces.push(&text[start..space]);
                    start = space + 1;
                }
                None => {
                    if i == start {
                        i += 1;
                    }
                    pieces.push(&text[start..i]);
                    start = i;
                }
            }
            last_space = None;
            width = 0.0;
            i = start;
            continue;
        }
        i += 1;
    }

    if start < text.len() || pieces.is_empty() {
        pieces.push(&text[start..]);
    }

    pieces
}

fn escape_string(text: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for &byte in text {
        match byte {
            b'\\' | b'(' | b')' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\r' => out.extend_from_slice(b"\\r"),
            _ => out.push(byte),
        }
    }
    out
}

/// Lays out a titled document page by page and serializes it.
pub struct PdfWriter<'a> {
    title: &'a [u8],
    pages: Vec<Vec<u8>>,
    y: f64,
}

impl<'a> PdfWriter<'a> {
    pub fn new(title: &'a [u8]) -> Self {
        let mut writer = Self {
            title,
            pages: Vec::new(),
            y: MARGIN,
        };
        writer.add_page();
        writer
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = MARGIN;

        let content_width = PAGE_WIDTH - 2.0 * MARGIN;
        let title_width = text_width(self.title, FontStyle::Bold, FONT_SIZE);
        let x = MARGIN + (content_width - title_width) / 2.0;
        let title = self.title;
        self.put_text(x, title, FontStyle::Bold);
        self.y += LINE_HEIGHT;
    }

    fn put_text(&mut self, x: f64, text: &[u8], style: FontStyle) {
        if text.is_empty() {
            return;
        }
        let baseline = self.y + 0.5 * LINE_HEIGHT + 0.3 * FONT_SIZE;
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        page.extend_from_slice(
            format!(
                "BT /{} {:.2} Tf {:.2} {:.2} Td (",
                style.resource(),
                FONT_SIZE,
                x,
                PAGE_HEIGHT - baseline
            )
            .as_bytes(),
        );
        page.extend_from_slice(&escape_string(text));
        page.extend_from_slice(b") Tj ET\n");
    }

    /// Writes one paragraph, wrapping it across as many rows (and pages) as needed.
    pub fn paragraph(&mut self, text: &[u8]) {
        let max_width = PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING;
        for row in wrap_line(text, max_width, FontStyle::Regular, FONT_SIZE) {
            if self.y + LINE_HEIGHT > PAGE_BREAK_AT {
                self.add_page();
            }
            self.put_text(MARGIN + CELL_PADDING, row, FontStyle::Regular);
            self.y += LINE_HEIGHT;
        }
    }

    pub fn finish(self, created_at: DateTime<Utc>) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = Vec::new();

        out.extend_from_slice(b"%PDF-1.3\n");

        // 1 catalog, 2 page tree, 3-4 fonts, 5 info, then (page, contents) pairs
        let first_page_obj = 6;
        let kids = (0..self.pages.len())
            .map(|i| format!("{} 0 R", first_page_obj + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut begin = |out: &mut Vec<u8>, id: usize| {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        };

        begin(&mut out, 1);
        out.extend_from_slice(b"<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        begin(&mut out, 2);
        out.extend_from_slice(
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} /MediaBox [0 0 {:.2} {:.2}] >>\nendobj\n",
                kids,
                self.pages.len(),
                PAGE_WIDTH,
                PAGE_HEIGHT
            )
            .as_bytes(),
        );

        for (id, base_font) in [(3, "Helvetica"), (4, "Helvetica-Bold")] {
            begin(&mut out, id);
            out.extend_from_slice(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj\n",
                    base_font
                )
                .as_bytes(),
            );
        }

        begin(&mut out, 5);
        out.extend_from_slice(b"<< /Producer (financial-goal-planner) /Title (");
        out.extend_from_slice(&escape_string(self.title));
        out.extend_from_slice(
            format!(
                ") /CreationDate (D:{}) >>\nendobj\n",
                created_at.format("%Y%m%d%H%M%S")
            )
            .as_bytes(),
        );

        for (i, content) in self.pages.iter().enumerate() {
            let page_id = first_page_obj + 2 * i;
            begin(&mut out, page_id);
            out.extend_from_slice(
                format!(
                    "<< /Type /Page /Parent 2 0 R /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                    page_id + 1
                )
                .as_bytes(),
            );

            begin(&mut out, page_id + 1);
            out.extend_from_slice(format!("<< /Length {} >>\nstream\n", content.len()).as_bytes());
            out.extend_from_slice(content);
            out.extend_from_slice(b"\nendstream\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info 5 0 R >>\nstartxref\n{}\n%%EOF\n",
                offsets.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );

        out
    }
}

// src/render/pdf.rs

//! `pdf-writer` backed implementation of the drawing capability: one
//! A4 page, base-14 Helvetica / Helvetica-Bold, WinAnsi text encoding.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use super::surface::{DrawSurface, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const MM_TO_PT: f32 = 72.0 / 25.4;

const FONT_REGULAR: &[u8] = b"F1";
const FONT_BOLD: &[u8] = b"F2";

/// Helvetica has no fixed advance; 0.5 em per glyph is close enough
/// for centering short title lines.
const AVG_GLYPH_EM: f32 = 0.5;

pub struct PdfSurface {
    content: Content,
    metadata: Option<(String, String, String)>,
    font_size: f32,
    bold: bool,
    text_color: Rgb,
}

impl PdfSurface {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            metadata: None,
            font_size: 10.0,
            bold: false,
            text_color: Rgb(0, 0, 0),
        }
    }

    fn show_text_at(&mut self, text: &str, x_mm: f32, y_mm: f32) {
        let Rgb(r, g, b) = self.text_color;
        let font = if self.bold { FONT_BOLD } else { FONT_REGULAR };
        let bytes = to_winansi_bytes(text);

        self.content
            .set_fill_rgb(
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
            )
            .begin_text()
            .set_font(Name(font), self.font_size)
            .next_line(mm_x(x_mm), mm_y(y_mm))
            .show(Str(&bytes))
            .end_text();
    }
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for PdfSurface {
    fn set_metadata(&mut self, title: &str, subject: &str, author: &str) {
        self.metadata = Some((title.to_string(), subject.to_string(), author.to_string()));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let Rgb(r, g, b) = color;
        // y is the rect's top in mm; PDF wants the bottom-left corner.
        self.content
            .save_state()
            .set_fill_rgb(
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
            )
            .rect(mm_x(x), mm_y(y + h), w * MM_TO_PT, h * MM_TO_PT)
            .fill_nonzero()
            .restore_state();
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_font(&mut self, size: f32, bold: bool) {
        self.font_size = size;
        self.bold = bold;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.show_text_at(text, x, y);
    }

    fn draw_text_centered(&mut self, text: &str, x: f32, y: f32) {
        let width_pt = text.chars().count() as f32 * self.font_size * AVG_GLYPH_EM;
        let x_mm = x - (width_pt / MM_TO_PT) / 2.0;
        self.show_text_at(text, x_mm.max(0.0), y);
    }

    fn finish(&mut self) -> Vec<u8> {
        let mut next = 0;
        let mut alloc = || {
            next += 1;
            Ref::new(next)
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let page_id = alloc();
        let content_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let info_id = alloc();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);

        {
            let mut page = pdf.page(page_id);
            page.parent(pages_id)
                .media_box(Rect::new(
                    0.0,
                    0.0,
                    PAGE_WIDTH_MM * MM_TO_PT,
                    PAGE_HEIGHT_MM * MM_TO_PT,
                ))
                .contents(content_id);

            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            fonts.pair(Name(FONT_REGULAR), regular_id);
            fonts.pair(Name(FONT_BOLD), bold_id);
        }

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let content = std::mem::replace(&mut self.content, Content::new());
        pdf.stream(content_id, &content.finish());

        if let Some((title, subject, author)) = self.metadata.take() {
            pdf.document_info(info_id)
                .title(TextStr(&title))
                .subject(TextStr(&subject))
                .author(TextStr(&author));
        }

        pdf.finish()
    }
}

fn mm_x(x: f32) -> f32 {
    x * MM_TO_PT
}

/// Flip the y axis: surface coordinates grow downwards from the top,
/// PDF user space grows upwards from the bottom.
fn mm_y(y: f32) -> f32 {
    (PAGE_HEIGHT_MM - y) * MM_TO_PT
}

/// WinAnsi is a superset of Latin-1 for everything the form locale
/// needs; anything outside degrades to '?'.
fn to_winansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if cp <= 0xFF {
                cp as u8
            } else {
                b'?'
            }
        })
        .collect()
}

// ======================================================
// Unit Tests
// ======================================================

// src/render/surface.rs

//! Abstract drawing capability plus the page layout that walks a
//! `DocumentModel` over it. Coordinates are millimetres on an A4 page,
//! origin top-left, y growing downwards; font sizes are points.

use super::model::{Block, Column, DocumentModel, Section};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const HEADER_BLUE: Rgb = Rgb(41, 128, 185);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const FOOTER_GREY: Rgb = Rgb(100, 100, 100);

/// Narrow interface over whatever draws the document. Satisfiable by
/// any PDF or graphics backend; tests use a recording implementation.
pub trait DrawSurface {
    fn set_metadata(&mut self, title: &str, subject: &str, author: &str);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
    fn set_text_color(&mut self, color: Rgb);
    fn set_font(&mut self, size: f32, bold: bool);
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
    fn draw_text_centered(&mut self, text: &str, x: f32, y: f32);
    fn finish(&mut self) -> Vec<u8>;
}

const LEFT_X: f32 = 20.0;
const RIGHT_X: f32 = 100.0;
const LABEL_VALUE_GAP: f32 = 25.0;
const FIELD_ROW_STEP: f32 = 8.0;
const PARAGRAPH_LINE_STEP: f32 = 5.0;

/// Lay the model out with a running cursor. The vertical offset of
/// every block depends on what came before it, notably the wrapped
/// line counts of the paragraphs.
pub fn draw_document(model: &DocumentModel, surface: &mut dyn DrawSurface) {
    surface.set_metadata(&model.title, super::model::DOC_SUBJECT, super::model::DOC_AUTHOR);

    // Header band.
    surface.fill_rect(0.0, 0.0, PAGE_WIDTH_MM, 40.0, HEADER_BLUE);
    surface.set_text_color(WHITE);
    surface.set_font(20.0, true);
    surface.draw_text_centered("ISTA MATADI", PAGE_WIDTH_MM / 2.0, 15.0);
    surface.set_font(16.0, true);
    surface.draw_text_centered(
        "CONFIRMATION DE VOTRE INSCRIPTION EN LIGNE",
        PAGE_WIDTH_MM / 2.0,
        25.0,
    );

    surface.set_text_color(BLACK);

    let mut y = 60.0;
    for (i, section) in model.sections.iter().enumerate() {
        if i > 0 {
            y += 10.0;
        }
        y = draw_section(section, surface, y);
    }

    // Footer, pinned near the page bottom.
    surface.set_font(13.0, false);
    surface.set_text_color(FOOTER_GREY);
    surface.draw_text(&model.generated_stamp, LEFT_X, 280.0);
    surface.draw_text_centered("ISTA Matadi - Tous droits réservés", 115.0, 285.0);
}

fn draw_section(section: &Section, surface: &mut dyn DrawSurface, mut y: f32) -> f32 {
    surface.set_font(14.0, true);
    surface.draw_text(section.title, LEFT_X, y);
    surface.set_font(10.0, false);
    y += 10.0;

    for block in &section.blocks {
        match block {
            Block::Field {
                label,
                value,
                column,
            } => {
                let x = match column {
                    Column::Left => LEFT_X,
                    Column::Right => RIGHT_X,
                };
                surface.set_font(10.0, true);
                surface.draw_text(&format!("{label}:"), x, y);
                surface.set_font(10.0, false);
                surface.draw_text(value, x + LABEL_VALUE_GAP, y);
                y += FIELD_ROW_STEP;
            }

            Block::Paragraph { label, lines } => {
                y += 5.0;
                let text_x = if let Some(label) = label {
                    surface.set_font(10.0, true);
                    surface.draw_text(label, LEFT_X, y);
                    y += 8.0;
                    surface.set_font(10.0, false);
                    LEFT_X + 5.0
                } else {
                    surface.set_font(10.0, false);
                    LEFT_X
                };

                for line in lines {
                    surface.draw_text(line, text_x, y);
                    y += PARAGRAPH_LINE_STEP;
                }
                y += 5.0;
            }
        }
    }

    y
}

// --------------------------------------------------
// Recording surface (test double, also used by the
// integration suites)
// --------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Metadata {
        title: String,
        subject: String,
        author: String,
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
    },
    TextColor(Rgb),
    Font {
        size: f32,
        bold: bool,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        centered: bool,
    },
}

/// Records every call instead of drawing. `finish` returns empty bytes.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn text_y(&self, needle: &str) -> Option<f32> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text, y, .. } if text == needle => Some(*y),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn set_metadata(&mut self, title: &str, subject: &str, author: &str) {
        self.ops.push(DrawOp::Metadata {
            title: title.to_string(),
            subject: subject.to_string(),
            author: author.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.push(DrawOp::Rect { x, y, w, h, color });
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.ops.push(DrawOp::TextColor(color));
    }

    fn set_font(&mut self, size: f32, bold: bool) {
        self.ops.push(DrawOp::Font { size, bold });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            centered: false,
        });
    }

    fn draw_text_centered(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            centered: true,
        });
    }

    fn finish(&mut self) -> Vec<u8> {
        Vec::new()
    }
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::model::{Block, Column, DocumentModel, Section};

    fn model_with(sections: Vec<Section>) -> DocumentModel {
        DocumentModel {
            title: "Inscription - Dupont Jean".to_string(),
            sections,
            generated_stamp: "Généré le 14/03/2026 à 09:30:00".to_string(),
        }
    }

    #[test]
    fn header_and_footer_are_always_drawn() {
        let mut surface = RecordingSurface::new();
        draw_document(&model_with(vec![]), &mut surface);

        assert!(matches!(surface.ops.first(), Some(DrawOp::Metadata { .. })));
        assert!(surface.ops.iter().any(|op| matches!(
            op,
            DrawOp::Rect { h, color, .. } if *h == 40.0 && *color == HEADER_BLUE
        )));
        assert_eq!(surface.text_y("Généré le 14/03/2026 à 09:30:00"), Some(280.0));
    }

    #[test]
    fn paragraph_line_count_moves_later_content_down() {
        let para = |n: usize| Section {
            title: "INFORMATIONS PERSONNELLES",
            blocks: vec![Block::Paragraph {
                label: Some("Adresse:"),
                lines: (0..n).map(|i| format!("ligne {i}")).collect(),
            }],
        };
        let tail = Section {
            title: "FORMATION CHOISIE",
            blocks: vec![],
        };

        let mut short = RecordingSurface::new();
        draw_document(&model_with(vec![para(1), tail.clone()]), &mut short);
        let mut long = RecordingSurface::new();
        draw_document(&model_with(vec![para(4), tail]), &mut long);

        let y_short = short.text_y("FORMATION CHOISIE").unwrap();
        let y_long = long.text_y("FORMATION CHOISIE").unwrap();
        assert_eq!(y_long - y_short, 3.0 * 5.0);
    }

    #[test]
    fn field_columns_map_to_the_two_x_positions() {
        let section = Section {
            title: "FORMATION CHOISIE",
            blocks: vec![
                Block::Field {
                    label: "Faculté",
                    value: "Mécanique".to_string(),
                    column: Column::Left,
                },
                Block::Field {
                    label: "Niveau",
                    value: "Licence".to_string(),
                    column: Column::Right,
                },
            ],
        };

        let mut surface = RecordingSurface::new();
        draw_document(&model_with(vec![section]), &mut surface);

        let x_of = |needle: &str| {
            surface
                .ops
                .iter()
                .find_map(|op| match op {
                    DrawOp::Text { text, x, .. } if text == needle => Some(*x),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(x_of("Faculté:"), 20.0);
        assert_eq!(x_of("Mécanique"), 45.0);
        assert_eq!(x_of("Niveau:"), 100.0);
        assert_eq!(x_of("Licence"), 125.0);
    }
}

// src/render/mod.rs

pub mod model;
pub mod pdf;
pub mod surface;

use chrono::{DateTime, Local};

use crate::types::{FormRecord, StepId};

use model::{artifact_file_name, build_document_model};
use pdf::PdfSurface;
use surface::{draw_document, DrawSurface};

/// The generated downloadable document.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The record lacks a step the document depends on.
    MissingStep(StepId),
    Internal(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::MissingStep(step) => {
                write!(f, "record is missing the '{}' step", step.as_str())
            }
            RenderError::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// The rendering capability as the submission orchestrator sees it.
/// Resolved once at startup; tests substitute doubles.
pub trait Renderer {
    fn render(&mut self, record: &FormRecord) -> Result<Artifact, RenderError>;
}

/// Model + layout onto a caller-supplied surface. On any failure no
/// partial output escapes: the surface is simply dropped unfinished.
pub fn render_registration(
    record: &FormRecord,
    surface: &mut dyn DrawSurface,
    generated_at: DateTime<Local>,
) -> Result<Artifact, RenderError> {
    let file_name = artifact_file_name(record)?;
    let model = build_document_model(record, generated_at)?;
    draw_document(&model, surface);

    Ok(Artifact {
        file_name,
        bytes: surface.finish(),
    })
}

/// Production renderer: fresh PDF surface per render, stamped with the
/// wall clock.
#[derive(Debug, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PdfRenderer {
    fn render(&mut self, record: &FormRecord) -> Result<Artifact, RenderError> {
        let mut surface = PdfSurface::new();
        render_registration(record, &mut surface, Local::now())
    }
}

// ======================================================
// Unit Tests
// ======================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldValue, StepValues};

    fn minimal_record() -> FormRecord {
        let mut personal = StepValues::new();
        for (k, v) in [
            ("nom", "Dupont"),
            ("prenom", "Jean"),
            ("email", "jean@exemple.cd"),
            ("telephone", "+243123456789"),
            ("date-naissance", "2001-04-12"),
            ("nationalite", "Congolaise"),
            ("adresse", "Matadi"),
        ] {
            personal.insert(k.to_string(), FieldValue::Text(v.to_string()));
        }

        let mut formation = StepValues::new();
        for (k, v) in [
            ("faculte", "mecanique"),
            ("niveau", "licence"),
            ("annee", "2025-2026"),
        ] {
            formation.insert(k.to_string(), FieldValue::Text(v.to_string()));
        }

        let mut record = FormRecord::new();
        record.insert(StepId::Personal, personal);
        record.insert(StepId::Formation, formation);
        record
    }

    #[test]
    fn pdf_renderer_produces_named_pdf_bytes() {
        let artifact = PdfRenderer::new().render(&minimal_record()).unwrap();
        assert_eq!(artifact.file_name, "inscription_Dupont_Jean.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn incomplete_record_yields_no_artifact() {
        let mut record = minimal_record();
        record.remove(&StepId::Formation);

        let err = PdfRenderer::new().render(&record).unwrap_err();
        assert_eq!(err, RenderError::MissingStep(StepId::Formation));
    }
}

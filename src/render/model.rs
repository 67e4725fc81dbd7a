// src/render/model.rs

//! Derived render view of a completed registration. Built once per
//! render from the committed record; never mutated afterwards.

use chrono::{DateTime, Local, NaiveDate};

use crate::types::{FormRecord, StepId, StepValues};

use super::RenderError;

/// Fallback shown for any absent or blank value.
pub const NOT_PROVIDED: &str = "Non renseigné";
/// Feminine agreement for the birth date.
pub const DATE_NOT_PROVIDED: &str = "Non renseignée";

/// Character column the free-text blocks are wrapped at, matching a
/// 170 mm text body at the body font size.
pub const WRAP_COLUMNS: usize = 90;

pub const DOC_SUBJECT: &str = "Formulaire d'inscription ISTA Matadi";
pub const DOC_AUTHOR: &str = "ISTA Matadi";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// One labeled value on its own row.
    Field {
        label: &'static str,
        value: String,
        column: Column,
    },
    /// Pre-wrapped free text; the label, when present, gets its own
    /// bold line above the paragraph.
    Paragraph {
        label: Option<&'static str>,
        lines: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DocumentModel {
    /// Metadata title, "Inscription - <nom> <prenom>".
    pub title: String,
    pub sections: Vec<Section>,
    /// "Généré le <date> à <heure>" footer line.
    pub generated_stamp: String,
}

/// Build the render view. Fails only when a step the document depends
/// on was never committed — a caller bug, surfaced generically.
pub fn build_document_model(
    record: &FormRecord,
    generated_at: DateTime<Local>,
) -> Result<DocumentModel, RenderError> {
    let personal = record
        .get(&StepId::Personal)
        .ok_or(RenderError::MissingStep(StepId::Personal))?;
    let formation = record
        .get(&StepId::Formation)
        .ok_or(RenderError::MissingStep(StepId::Formation))?;

    let mut sections = Vec::new();

    sections.push(Section {
        title: "INFORMATIONS PERSONNELLES",
        blocks: vec![
            field("Nom", text_of(personal, "nom"), Column::Left),
            field("Prénom", text_of(personal, "prenom"), Column::Right),
            field("Email", text_of(personal, "email"), Column::Left),
            field("Téléphone", text_of(personal, "telephone"), Column::Right),
            field(
                "Date",
                format_date_fr(raw_text(personal, "date-naissance")),
                Column::Left,
            ),
            field("Nationalité", text_of(personal, "nationalite"), Column::Right),
            Block::Paragraph {
                label: Some("Adresse:"),
                lines: wrap_text(raw_text(personal, "adresse"), WRAP_COLUMNS),
            },
        ],
    });

    let mut formation_blocks = vec![
        field(
            "Faculté",
            faculte_label(raw_text(formation, "faculte")).to_string(),
            Column::Left,
        ),
        field(
            "Niveau",
            niveau_label(raw_text(formation, "niveau")).to_string(),
            Column::Right,
        ),
        field("Année", text_of(formation, "annee"), Column::Left),
    ];

    // Optional: only rendered when the applicant named a specific
    // program.
    let specifique = raw_text(formation, "formation");
    if !specifique.trim().is_empty() {
        formation_blocks.push(field("Formation", specifique.to_string(), Column::Right));
    }

    sections.push(Section {
        title: "FORMATION CHOISIE",
        blocks: formation_blocks,
    });

    // Optional section: omitted entirely when no letter was written.
    let motivation = raw_text(formation, "motivation");
    if !motivation.trim().is_empty() {
        sections.push(Section {
            title: "LETTRE DE MOTIVATION",
            blocks: vec![Block::Paragraph {
                label: None,
                lines: wrap_text(motivation, WRAP_COLUMNS),
            }],
        });
    }

    Ok(DocumentModel {
        title: format!(
            "Inscription - {} {}",
            raw_text(personal, "nom"),
            raw_text(personal, "prenom")
        ),
        sections,
        generated_stamp: format!(
            "Généré le {} à {}",
            generated_at.format("%d/%m/%Y"),
            generated_at.format("%H:%M:%S")
        ),
    })
}

/// `inscription_<nom>_<prenom>.pdf`, with name components made safe
/// for the filesystem.
pub fn artifact_file_name(record: &FormRecord) -> Result<String, RenderError> {
    let personal = record
        .get(&StepId::Personal)
        .ok_or(RenderError::MissingStep(StepId::Personal))?;

    Ok(format!(
        "inscription_{}_{}.pdf",
        sanitize_name_component(raw_text(personal, "nom")),
        sanitize_name_component(raw_text(personal, "prenom"))
    ))
}

fn field(label: &'static str, value: String, column: Column) -> Block {
    Block::Field {
        label,
        value,
        column,
    }
}

fn raw_text<'a>(values: &'a StepValues, id: &str) -> &'a str {
    values.get(id).and_then(|v| v.as_text()).unwrap_or("")
}

fn text_of(values: &StepValues, id: &str) -> String {
    let s = raw_text(values, id).trim();
    if s.is_empty() {
        NOT_PROVIDED.to_string()
    } else {
        s.to_string()
    }
}

/// `YYYY-MM-DD` → `DD/MM/YYYY`; anything unparseable passes through
/// unchanged so the applicant's input is at least visible.
pub fn format_date_fr(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return DATE_NOT_PROVIDED.to_string();
    }
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(d) => d.format("%d/%m/%Y").to_string(),
        Err(_) => s.to_string(),
    }
}

/// Internal faculty codes → display labels; unknown codes pass through.
pub fn faculte_label(code: &str) -> &str {
    match code {
        "telecommunication" => "Télécommunication",
        "electricite" => "Électricité",
        "electronique" => "Électronique",
        "mecanique" => "Mécanique",
        "maintenance" => "Maintenance Industrielle",
        "environnement" => "Environnement",
        "portuaire" => "Portuaire",
        other => other,
    }
}

pub fn niveau_label(code: &str) -> &str {
    match code {
        "licence" => "Licence",
        "master" => "Master",
        "doctorat" => "Doctorat",
        "Preparatoire" => "Preparatoire",
        other => other,
    }
}

/// Greedy word wrap at `max_cols` character columns. Words longer than
/// a full line are hard-split so no line ever exceeds the width.
pub fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if max_cols == 0 {
        return lines;
    }

    for source_line in text.lines() {
        let mut current = String::new();

        for word in source_line.split_whitespace() {
            let word_cols = word.chars().count();

            if word_cols > max_cols {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut chunk = String::new();
                for c in word.chars() {
                    chunk.push(c);
                    if chunk.chars().count() == max_cols {
                        lines.push(std::mem::take(&mut chunk));
                    }
                }
                current = chunk;
                continue;
            }

            let needed = if current.is_empty() {
                word_cols
            } else {
                current.chars().count() + 1 + word_cols
            };

            if needed > max_cols {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn sanitize_name_component(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            {
                '_'
            } else if c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

// ======================================================
// Unit Tests
// ======================================================

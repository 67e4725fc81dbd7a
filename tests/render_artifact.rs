// tests/render_artifact.rs

mod common;

use chrono::{Local, TimeZone};

use campus_registration_wizard_lib::command;
use campus_registration_wizard_lib::render::model::NOT_PROVIDED;
use campus_registration_wizard_lib::render::surface::RecordingSurface;
use campus_registration_wizard_lib::render::{render_registration, PdfRenderer, Renderer};
use campus_registration_wizard_lib::types::FormRecord;

use common::{documents_source, formation_source, personal_source, setup, TestEnv};

fn committed_record(env: &TestEnv) -> FormRecord {
    command::advance_current_step(&env.state, &personal_source()).unwrap();
    command::advance_current_step(&env.state, &formation_source()).unwrap();
    command::request_submit(&env.state, &documents_source(true)).unwrap();

    env.state.session.lock().unwrap().store.record().clone()
}

fn stamp() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
}

#[test]
fn document_reflects_the_committed_record() {
    let env = setup();
    let record = committed_record(&env);

    let mut surface = RecordingSurface::new();
    let artifact = render_registration(&record, &mut surface, stamp()).unwrap();

    assert_eq!(artifact.file_name, "inscription_Dupont_Jean.pdf");

    let texts = surface.texts();
    assert!(texts.contains(&"ISTA MATADI"));
    assert!(texts.contains(&"CONFIRMATION DE VOTRE INSCRIPTION EN LIGNE"));
    assert!(texts.contains(&"INFORMATIONS PERSONNELLES"));
    assert!(texts.contains(&"Dupont"));
    assert!(texts.contains(&"jean.dupont@exemple.cd"));
    // Birth date shows up French-style.
    assert!(texts.contains(&"12/04/2001"));
    // Faculty code translated to its label.
    assert!(texts.contains(&"Mécanique"));
    assert!(texts.contains(&"Généré le 14/03/2026 à 09:30:00"));
}

#[test]
fn empty_motivation_letter_omits_its_section() {
    let env = setup();
    let record = committed_record(&env);

    let mut surface = RecordingSurface::new();
    render_registration(&record, &mut surface, stamp()).unwrap();

    assert!(!surface.texts().contains(&"LETTRE DE MOTIVATION"));
}

#[test]
fn written_motivation_letter_is_wrapped_into_its_section() {
    let env = setup();
    let mut src = formation_source();
    src.set_text(
        "motivation",
        "Je souhaite rejoindre votre institut parce que la formation en mécanique \
         correspond exactement au métier que je veux exercer dans le port de Matadi.",
    );

    command::advance_current_step(&env.state, &personal_source()).unwrap();
    command::advance_current_step(&env.state, &src).unwrap();
    command::request_submit(&env.state, &documents_source(true)).unwrap();
    let record = env.state.session.lock().unwrap().store.record().clone();

    let mut surface = RecordingSurface::new();
    render_registration(&record, &mut surface, stamp()).unwrap();

    let texts = surface.texts();
    assert!(texts.contains(&"LETTRE DE MOTIVATION"));
    // Wrapped: the letter spans more than one drawn line.
    let letter_lines = texts
        .iter()
        .filter(|t| t.contains("mécanique") || t.contains("Matadi."))
        .count();
    assert!(letter_lines >= 2);
}

#[test]
fn blank_optional_values_show_the_placeholder() {
    let env = setup();
    let mut src = personal_source();
    src.set_text("nationalite", "   ");

    command::advance_current_step(&env.state, &src).unwrap_err();
    // Nationality is required; blank it after commit instead.
    let mut valid = personal_source();
    valid.set_text("nationalite", "Congolaise");
    command::advance_current_step(&env.state, &valid).unwrap();
    command::advance_current_step(&env.state, &formation_source()).unwrap();
    command::request_submit(&env.state, &documents_source(true)).unwrap();

    let mut record = env.state.session.lock().unwrap().store.record().clone();
    record
        .get_mut(&campus_registration_wizard_lib::types::StepId::Personal)
        .unwrap()
        .insert(
            "nationalite".to_string(),
            campus_registration_wizard_lib::types::FieldValue::Text("  ".to_string()),
        );

    let mut surface = RecordingSurface::new();
    render_registration(&record, &mut surface, stamp()).unwrap();
    assert!(surface.texts().contains(&NOT_PROVIDED));
}

#[test]
fn pdf_backend_emits_a_real_pdf() {
    let env = setup();
    let record = committed_record(&env);

    let artifact = PdfRenderer::new().render(&record).unwrap();
    assert!(artifact.bytes.starts_with(b"%PDF-"));
    assert!(artifact.bytes.len() > 500);
    assert_eq!(artifact.file_name, "inscription_Dupont_Jean.pdf");
}

// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::Duration;

use campus_registration_wizard_lib::{
    command::submit::Submission,
    context::AppCtx,
    fields::FieldSource,
    render::{Artifact, RenderError, Renderer},
    types::{AppState, FieldValue, FormRecord},
};

pub struct TestEnv {
    // Keep the tempdir alive for the duration of the test.
    _td: tempfile::TempDir,

    pub state: AppState,
    ctx: AppCtx,
}

impl TestEnv {
    pub fn ctx(&self) -> &AppCtx {
        &self.ctx
    }
}

/// Fresh app state over a temp data dir, with the processing delay cut
/// down so polling tests stay fast.
pub fn setup() -> TestEnv {
    let td = tempfile::tempdir().expect("tempdir");

    let state = AppState::new_for_tests(td.path()).expect("init_state");
    *state.submission.lock().unwrap() = Submission::new(Duration::from_millis(10));

    let ctx = AppCtx::new(td.path().to_path_buf());

    TestEnv {
        _td: td,
        state,
        ctx,
    }
}

/// Map-backed stand-in for the form panel.
pub struct MapSource(pub BTreeMap<String, FieldValue>);

impl FieldSource for MapSource {
    fn get(&self, field_id: &str) -> Option<FieldValue> {
        self.0.get(field_id).cloned()
    }
}

impl MapSource {
    pub fn set_text(&mut self, id: &str, value: &str) {
        self.0
            .insert(id.to_string(), FieldValue::Text(value.to_string()));
    }

    pub fn set_flag(&mut self, id: &str, value: bool) {
        self.0.insert(id.to_string(), FieldValue::Flag(value));
    }

    pub fn set_files(&mut self, id: &str, names: &[&str]) {
        self.0.insert(
            id.to_string(),
            FieldValue::Files(names.iter().map(|s| s.to_string()).collect()),
        );
    }
}

pub fn personal_source() -> MapSource {
    let mut src = MapSource(BTreeMap::new());
    src.set_text("nom", "Dupont");
    src.set_text("prenom", "Jean");
    src.set_text("email", "jean.dupont@exemple.cd");
    src.set_text("telephone", "+243 123 456 789");
    src.set_text("date-naissance", "2001-04-12");
    src.set_text("nationalite", "Congolaise");
    src.set_text("adresse", "12 avenue du Port, quartier Ville Basse, Matadi");
    src
}

pub fn formation_source() -> MapSource {
    let mut src = MapSource(BTreeMap::new());
    src.set_text("faculte", "mecanique");
    src.set_text("niveau", "licence");
    src.set_text("annee", "2025-2026");
    src.set_text("formation", "");
    src.set_text("motivation", "");
    src
}

pub fn documents_source(conditions: bool) -> MapSource {
    let mut src = MapSource(BTreeMap::new());
    src.set_files("diplome", &["diplome.pdf"]);
    src.set_files("releve-notes", &["releve.pdf"]);
    src.set_files("photo", &["photo.jpg"]);
    src.set_files("cv", &[]);
    src.set_files("autres-documents", &[]);
    src.set_flag("conditions", conditions);
    src
}

/// Renderer double that counts calls and hands back fixed bytes.
pub struct RecordingRenderer {
    pub calls: usize,
    pub last_step_count: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            calls: 0,
            last_step_count: 0,
        }
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, record: &FormRecord) -> Result<Artifact, RenderError> {
        self.calls += 1;
        self.last_step_count = record.len();
        Ok(Artifact {
            file_name: "inscription_Dupont_Jean.pdf".to_string(),
            bytes: b"%PDF-stub".to_vec(),
        })
    }
}

pub struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn render(&mut self, _record: &FormRecord) -> Result<Artifact, RenderError> {
        Err(RenderError::Internal("surface exploded".to_string()))
    }
}

// src/ui/panel_form.rs

use std::collections::BTreeMap;

use eframe::egui;

use campus_registration_wizard_lib::command::wizard::{step_rules, validate_field, WizardError};
use campus_registration_wizard_lib::command::{self, WizardSnapshot};
use campus_registration_wizard_lib::context::AppCtx;
use campus_registration_wizard_lib::error::AppError;
use campus_registration_wizard_lib::fields::FieldSource;
use campus_registration_wizard_lib::render::model::{faculte_label, niveau_label};
use campus_registration_wizard_lib::types::{AppState, FieldValue, StepId};

use crate::ui::message::PanelMsgState;
use crate::ui::widgets::{
    file_slot, labeled_combo, labeled_text_area, labeled_text_field, ui_notice,
};

const FACULTE_CODES: [&str; 7] = [
    "telecommunication",
    "electricite",
    "electronique",
    "mecanique",
    "maintenance",
    "environnement",
    "portuaire",
];

const NIVEAU_CODES: [&str; 4] = ["licence", "master", "doctorat", "Preparatoire"];

/// The three-step registration form. Owns every input buffer; the
/// wizard core reads them through [`FieldSource`] and never sees a
/// widget.
pub struct FormPanel {
    msg: PanelMsgState,

    text_buf: BTreeMap<String, String>,
    files_buf: BTreeMap<String, Vec<String>>,
    conditions: bool,

    // inline messages keyed by field id, set on blur or on a rejected
    // step transition
    field_errors: BTreeMap<String, &'static str>,
}

impl FormPanel {
    pub fn new() -> Self {
        Self {
            msg: PanelMsgState::default(),
            text_buf: BTreeMap::new(),
            files_buf: BTreeMap::new(),
            conditions: false,
            field_errors: BTreeMap::new(),
        }
    }

    pub fn reset_inputs(&mut self) {
        self.text_buf.clear();
        self.files_buf.clear();
        self.conditions = false;
        self.field_errors.clear();
        self.msg.clear();
    }

    pub fn clear_messages(&mut self) {
        self.msg.clear();
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        state: &AppState,
        ctx: &AppCtx,
        snap: &WizardSnapshot,
    ) {
        ui.heading(snap.step_id.title());
        ui.add_space(6.0);

        self.msg.show(ui, ctx.debug_ui);
        ui.add_space(6.0);

        let busy = snap.phase.is_busy();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.add_enabled_ui(!busy, |ui| match snap.step_id {
                    StepId::Personal => self.ui_personal(ui),
                    StepId::Formation => self.ui_formation(ui),
                    StepId::Documents => self.ui_documents(ui),
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if busy {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Traitement de votre inscription en cours...");
                    });
                    return;
                }

                self.ui_buttons(ui, state, ctx, snap);
            });
    }

    fn ui_personal(&mut self, ui: &mut egui::Ui) {
        self.text_field(ui, StepId::Personal, "nom", "Nom *");
        self.text_field(ui, StepId::Personal, "prenom", "Prénom *");
        self.text_field(ui, StepId::Personal, "email", "Email *");
        self.text_field(ui, StepId::Personal, "telephone", "Téléphone *");
        self.text_field(
            ui,
            StepId::Personal,
            "date-naissance",
            "Date de naissance (AAAA-MM-JJ) *",
        );
        self.text_field(ui, StepId::Personal, "nationalite", "Nationalité *");
        self.text_area(ui, StepId::Personal, "adresse", "Adresse *", 3);
    }

    fn ui_formation(&mut self, ui: &mut egui::Ui) {
        {
            let buf = self.text_buf.entry("faculte".to_string()).or_default();
            if labeled_combo(
                ui,
                "Faculté *",
                "faculte_combo",
                buf,
                &FACULTE_CODES,
                faculte_label,
                self.field_errors.get("faculte").copied(),
            ) {
                self.validate_one(StepId::Formation, "faculte");
            }
        }

        {
            let buf = self.text_buf.entry("niveau".to_string()).or_default();
            if labeled_combo(
                ui,
                "Niveau d'études *",
                "niveau_combo",
                buf,
                &NIVEAU_CODES,
                niveau_label,
                self.field_errors.get("niveau").copied(),
            ) {
                self.validate_one(StepId::Formation, "niveau");
            }
        }

        self.text_field(ui, StepId::Formation, "annee", "Année académique *");
        self.text_field(
            ui,
            StepId::Formation,
            "formation",
            "Formation spécifique (facultatif)",
        );
        self.text_area(
            ui,
            StepId::Formation,
            "motivation",
            "Lettre de motivation (facultatif)",
            6,
        );
    }

    fn ui_documents(&mut self, ui: &mut egui::Ui) {
        self.file_field(ui, "diplome", "Diplôme d'État *", false);
        self.file_field(ui, "releve-notes", "Relevé de notes *", false);
        self.file_field(ui, "photo", "Photo d'identité *", false);
        self.file_field(ui, "cv", "Curriculum vitae (facultatif)", false);
        self.file_field(
            ui,
            "autres-documents",
            "Autres documents (facultatif)",
            true,
        );

        ui.add_space(6.0);
        ui.checkbox(
            &mut self.conditions,
            "J'accepte les conditions générales d'inscription *",
        );
        ui.add_space(6.0);

        ui_notice(
            ui,
            "Vérifiez vos informations avant de soumettre. Un PDF de \
             confirmation sera généré et un email envoyé à l'adresse \
             indiquée.",
        );
    }

    fn ui_buttons(
        &mut self,
        ui: &mut egui::Ui,
        state: &AppState,
        ctx: &AppCtx,
        snap: &WizardSnapshot,
    ) {
        ui.horizontal(|ui| {
            let button_height = 32.0;

            let back_btn = egui::Button::new(egui::RichText::new("← Précédent").size(16.0))
                .min_size(egui::vec2(120.0, button_height));

            if ui
                .add_enabled(snap.current_step > 1, back_btn)
                .clicked()
            {
                let _ = command::retreat_current_step(state);
                self.msg.clear();
            }

            ui.add_space(8.0);

            let last = snap.step_id == StepId::Documents;
            let label = if last { "Soumettre" } else { "Suivant →" };
            let next_btn = egui::Button::new(egui::RichText::new(label).size(16.0))
                .min_size(egui::vec2(140.0, button_height));

            if ui.add(next_btn).clicked() {
                if last {
                    self.do_submit(state, ctx);
                } else {
                    self.do_advance(state, ctx);
                }
            }
        });
    }

    fn do_advance(&mut self, state: &AppState, ctx: &AppCtx) {
        match command::advance_current_step(state, self) {
            Ok(_) => {
                self.field_errors.clear();
                self.msg.clear();
            }
            Err(e) => self.apply_rejection(e, ctx),
        }
    }

    fn do_submit(&mut self, state: &AppState, ctx: &AppCtx) {
        match command::request_submit(state, self) {
            Ok(()) => {
                self.field_errors.clear();
                self.msg.clear();
            }
            Err(e) => {
                // The inline messages below replace the stored
                // rejection notice.
                let _ = command::acknowledge_rejection(state);
                self.apply_rejection(e, ctx);
            }
        }
    }

    fn apply_rejection(&mut self, err: AppError, ctx: &AppCtx) {
        if let AppError::Wizard(WizardError::StepInvalid(ref errs)) = err {
            for fe in errs {
                self.field_errors
                    .entry(fe.field.clone())
                    .or_insert(fe.message);
            }
        }
        self.msg.from_app_error(&err, ctx.debug_ui);
    }

    // ------------------------------------------------------------------
    // field helpers
    // ------------------------------------------------------------------

    fn text_field(&mut self, ui: &mut egui::Ui, step: StepId, id: &str, label: &str) {
        let error = self.field_errors.get(id).copied();
        let buf = self.text_buf.entry(id.to_string()).or_default();
        if labeled_text_field(ui, label, buf, error) {
            self.validate_one(step, id);
        }
    }

    fn text_area(&mut self, ui: &mut egui::Ui, step: StepId, id: &str, label: &str, rows: usize) {
        let error = self.field_errors.get(id).copied();
        let buf = self.text_buf.entry(id.to_string()).or_default();
        if labeled_text_area(ui, label, buf, rows, error) {
            self.validate_one(step, id);
        }
    }

    fn file_field(&mut self, ui: &mut egui::Ui, id: &str, label: &str, multiple: bool) {
        let error = self.field_errors.get(id).copied();
        let files = self.files_buf.entry(id.to_string()).or_default();
        file_slot(ui, label, files, multiple, error);
    }

    /// Re-run this field's rules against the current buffer and update
    /// its inline message.
    fn validate_one(&mut self, step: StepId, field_id: &str) {
        let value = self.get(field_id);

        let mut failure: Option<&'static str> = None;
        for rule in step_rules(step).iter().filter(|r| r.field == field_id) {
            let res = validate_field(rule, value.as_ref());
            if !res.valid {
                failure = res.message;
                break;
            }
        }

        match failure {
            Some(m) => {
                self.field_errors.insert(field_id.to_string(), m);
            }
            None => {
                self.field_errors.remove(field_id);
            }
        }
    }
}

impl FieldSource for FormPanel {
    fn get(&self, field_id: &str) -> Option<FieldValue> {
        match field_id {
            "conditions" => Some(FieldValue::Flag(self.conditions)),

            "diplome" | "releve-notes" | "photo" | "cv" | "autres-documents" => Some(
                FieldValue::Files(self.files_buf.get(field_id).cloned().unwrap_or_default()),
            ),

            "nom" | "prenom" | "email" | "telephone" | "date-naissance" | "nationalite"
            | "adresse" | "faculte" | "niveau" | "annee" | "formation" | "motivation" => Some(
                FieldValue::Text(self.text_buf.get(field_id).cloned().unwrap_or_default()),
            ),

            _ => None,
        }
    }
}

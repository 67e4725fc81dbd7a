// src/ui/panel_confirmation.rs

use std::path::PathBuf;

use eframe::egui;

use campus_registration_wizard_lib::command;
use campus_registration_wizard_lib::context::AppCtx;
use campus_registration_wizard_lib::types::AppState;

use crate::ui::message::PanelMsgState;
use crate::ui::Route;

/// Shown after a confirmed submission: where the PDF landed and the
/// way back to a fresh form.
pub struct ConfirmationPanel {
    msg: PanelMsgState,
    saved_path: Option<PathBuf>,
}

impl ConfirmationPanel {
    pub fn new() -> Self {
        Self {
            msg: PanelMsgState::default(),
            saved_path: None,
        }
    }

    pub fn set_saved_path(&mut self, path: Option<PathBuf>) {
        self.saved_path = path;
    }

    pub fn reset_inputs(&mut self) {
        self.saved_path = None;
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
        route: &mut Route,
    ) {
        ui.heading("Inscription confirmée");
        ui.add_space(6.0);

        self.msg.show(ui, ctx.debug_ui);
        ui.add_space(6.0);

        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Votre inscription a été enregistrée.")
                        .strong()
                        .size(18.0),
                );
                ui.add_space(6.0);
                ui.label(
                    "Un email de confirmation a été envoyé à l'adresse indiquée \
                     dans le formulaire.",
                );

                match &self.saved_path {
                    Some(p) => {
                        ui.add_space(6.0);
                        ui.label(format!("PDF de confirmation : {}", p.display()));
                    }
                    None => {
                        ui.add_space(6.0);
                        ui.label("Le PDF de confirmation n'a pas pu être enregistré sur disque.");
                    }
                }
            });

        ui.add_space(12.0);

        let btn = egui::Button::new(egui::RichText::new("Nouvelle inscription").size(16.0))
            .min_size(egui::vec2(180.0, 32.0));

        if ui.add(btn).clicked() {
            match command::reset_registration(state) {
                Ok(()) => {
                    self.reset_inputs();
                    *route = Route::Form;
                }
                Err(e) => self.msg.from_app_error(&e, ctx.debug_ui),
            }
        }
    }
}

// src/ui/mod.rs

pub mod message;
pub mod panel_confirmation;
pub mod panel_form;
pub mod progress;
pub mod widgets;

use eframe::egui;
use std::sync::Arc;

use campus_registration_wizard_lib::command::{self, submit};
use campus_registration_wizard_lib::context::AppCtx;
use campus_registration_wizard_lib::event_log::take_fault_pending;
use campus_registration_wizard_lib::notify::SimulatedMailer;
use campus_registration_wizard_lib::render::PdfRenderer;
use campus_registration_wizard_lib::types::AppState;

use message::PanelMsgState;
use panel_confirmation::ConfirmationPanel;
use panel_form::FormPanel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Form,
    Confirmation,
}

pub struct UiApp {
    state: Arc<AppState>,
    ctx: Arc<AppCtx>,

    route: Route,

    form: FormPanel,
    confirmation: ConfirmationPanel,

    renderer: PdfRenderer,
    mailer: SimulatedMailer,

    fault_warn: PanelMsgState,
}

impl UiApp {
    pub fn new(state: Arc<AppState>, ctx: Arc<AppCtx>) -> Self {
        Self {
            state,
            ctx,
            route: Route::Form,
            form: FormPanel::new(),
            confirmation: ConfirmationPanel::new(),
            renderer: PdfRenderer::new(),
            mailer: SimulatedMailer::new(),
            fault_warn: PanelMsgState::default(),
        }
    }

    /// Drives an in-flight submission forward once per frame. On the
    /// completing poll the PDF is written to disk and the app switches
    /// to the confirmation screen.
    fn poll_submission(&mut self) {
        match command::poll_submission(
            self.state.as_ref(),
            &mut self.renderer,
            &mut self.mailer,
        ) {
            Ok(Some(artifact)) => {
                let saved = match submit::write_artifact(&self.ctx, &artifact) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        self.fault_warn.from_app_error(&e, self.ctx.debug_ui);
                        None
                    }
                };
                self.confirmation.set_saved_path(saved);
                self.route = Route::Confirmation;
            }
            Ok(None) => {}
            Err(e) => {
                // Render failure: the submission dropped back to Idle,
                // the form is still there. Surface it on the form panel
                // banner.
                self.fault_warn.from_app_error(&e, self.ctx.debug_ui);
            }
        }
    }
}

impl eframe::App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snap = match command::snapshot(self.state.as_ref()) {
            Ok(s) => s,
            Err(e) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.label(e.user_msg().short);
                });
                return;
            }
        };

        if snap.phase.is_busy() {
            self.poll_submission();
            // keep polling even without input events
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        if take_fault_pending(self.state.as_ref()) && !self.fault_warn.is_set() {
            self.fault_warn
                .set_warn("Une erreur interne a été enregistrée dans le journal de session.");
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(
                egui::RichText::new("Inscription ISTA Matadi")
                    .size(22.0)
                    .strong(),
            );
            ui.add_space(8.0);

            self.fault_warn.show(ui, self.ctx.debug_ui);

            match self.route {
                Route::Form => {
                    // re-read: poll_submission may just have confirmed
                    let snap = match command::snapshot(self.state.as_ref()) {
                        Ok(s) => s,
                        Err(_) => return,
                    };

                    if snap.confirmed {
                        self.route = Route::Confirmation;
                        return;
                    }

                    progress::wizard_progress(ui, &snap);
                    self.form
                        .ui(ui, self.state.as_ref(), &self.ctx, &snap);
                }

                Route::Confirmation => {
                    progress::wizard_progress(ui, &snap);

                    let before = self.route;
                    self.confirmation
                        .ui(ui, self.state.as_ref(), &self.ctx, &mut self.route);

                    if before != self.route {
                        self.form.reset_inputs();
                        self.fault_warn.clear();
                    }
                }
            }
        });
    }
}

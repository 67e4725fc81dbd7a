// src/ui/progress.rs

use eframe::egui;

use campus_registration_wizard_lib::command::WizardSnapshot;
use campus_registration_wizard_lib::types::StepId;

const STEP_DONE: egui::Color32 = egui::Color32::from_rgb(0, 180, 90);
const STEP_ACTIVE: egui::Color32 = egui::Color32::from_rgb(41, 128, 185);

/// Progress bar plus the numbered step indicators above the form.
/// Completed steps show a check, the active step is highlighted.
pub fn wizard_progress(ui: &mut egui::Ui, snap: &WizardSnapshot) {
    ui.add(egui::ProgressBar::new(snap.progress).desired_height(6.0));
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        for step in StepId::ALL {
            let n = step.number();
            let done = snap.confirmed || n < snap.current_step;
            let active = !snap.confirmed && n == snap.current_step;

            let marker = if done {
                format!("✔ {}", step.title())
            } else {
                format!("{} . {}", n, step.title())
            };

            let text = if done {
                egui::RichText::new(marker).color(STEP_DONE)
            } else if active {
                egui::RichText::new(marker).color(STEP_ACTIVE).strong()
            } else {
                egui::RichText::new(marker).weak()
            };

            ui.label(text);
            if n < StepId::ALL.len() as u32 {
                ui.separator();
            }
        }
    });

    ui.add_space(8.0);
}

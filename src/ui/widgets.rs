// src/ui/widgets.rs

use eframe::egui;

const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(255, 90, 90);

/// Single-line input with its label above and, when set, the field's
/// validation message in red below. Returns true when the field just
/// lost focus (the blur-validation trigger).
pub fn labeled_text_field(
    ui: &mut egui::Ui,
    label: &str,
    buf: &mut String,
    error: Option<&str>,
) -> bool {
    ui.label(label);
    let resp = ui.add(egui::TextEdit::singleline(buf).desired_width(260.0));
    show_field_error(ui, error);
    ui.add_space(4.0);
    resp.lost_focus()
}

/// Multi-line variant for the address and the motivation letter.
pub fn labeled_text_area(
    ui: &mut egui::Ui,
    label: &str,
    buf: &mut String,
    rows: usize,
    error: Option<&str>,
) -> bool {
    ui.label(label);
    let resp = ui.add(
        egui::TextEdit::multiline(buf)
            .desired_rows(rows)
            .desired_width(420.0),
    );
    show_field_error(ui, error);
    ui.add_space(4.0);
    resp.lost_focus()
}

/// Fixed-choice selector. `codes` are the stored values, `label_of`
/// maps a code to its display label. Returns true when the choice
/// changed.
pub fn labeled_combo(
    ui: &mut egui::Ui,
    label: &str,
    id_salt: &str,
    buf: &mut String,
    codes: &[&str],
    label_of: fn(&str) -> &str,
    error: Option<&str>,
) -> bool {
    ui.label(label);

    let selected = if buf.is_empty() {
        "(sélectionner)".to_string()
    } else {
        label_of(buf).to_string()
    };

    let mut changed = false;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for code in codes {
                if ui
                    .selectable_label(buf == *code, label_of(code))
                    .clicked()
                {
                    *buf = code.to_string();
                    changed = true;
                }
            }
        });

    show_field_error(ui, error);
    ui.add_space(4.0);
    changed
}

/// One attachment slot: shows the chosen file names, a picker button
/// and a clear button. Only names are kept; contents are never read.
pub fn file_slot(
    ui: &mut egui::Ui,
    label: &str,
    files: &mut Vec<String>,
    multiple: bool,
    error: Option<&str>,
) {
    ui.label(label);

    ui.horizontal(|ui| {
        if ui.small_button("Choisir...").clicked() {
            if multiple {
                if let Some(paths) = rfd::FileDialog::new().pick_files() {
                    for p in paths {
                        if let Some(name) = p.file_name() {
                            files.push(name.to_string_lossy().to_string());
                        }
                    }
                }
            } else if let Some(p) = rfd::FileDialog::new().pick_file() {
                files.clear();
                if let Some(name) = p.file_name() {
                    files.push(name.to_string_lossy().to_string());
                }
            }
        }

        if !files.is_empty() && ui.small_button("Effacer").clicked() {
            files.clear();
        }

        if files.is_empty() {
            ui.weak("(aucun fichier)");
        } else {
            ui.label(files.join(", "));
        }
    });

    show_field_error(ui, error);
    ui.add_space(4.0);
}

fn show_field_error(ui: &mut egui::Ui, error: Option<&str>) {
    if let Some(msg) = error {
        ui.colored_label(ERROR_RED, msg);
    }
}

pub fn ui_notice(ui: &mut egui::Ui, body: &str) {
    let accent = egui::Color32::from_rgb(255, 215, 90);

    let stroke = egui::Stroke::new(1.5, accent);
    let fill = egui::Color32::from_rgba_unmultiplied(accent.r(), accent.g(), accent.b(), 48);

    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .stroke(stroke)
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Note").size(18.0).strong().color(accent));
            ui.add_space(4.0);
            ui.label(body);
        });
}

//! Small shared UI pieces

use chrono::Local;
use eframe::egui::{self, Color32, RichText, Ui};
use truckops_domain::model::load::display_date;

/// Header row for the protected screens: today's date, the screen
/// title, and the add-load button. Returns true when the button was
/// clicked.
pub fn header_bar(ui: &mut Ui, title: &str) -> bool {
    let mut add_clicked = false;
    ui.horizontal(|ui| {
        ui.label(format!("Today:  {}", display_date(Local::now().date_naive())));
        ui.add_space(20.0);
        ui.heading(title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("＋ Add Load").clicked() {
                add_clicked = true;
            }
        });
    });
    ui.separator();
    add_clicked
}

/// Transient status line, red for errors and green for successes.
pub fn show_status(ui: &mut Ui, status: &Option<(String, bool)>) {
    if let Some((ref msg, is_error)) = status {
        ui.add_space(8.0);
        let color = if *is_error {
            Color32::LIGHT_RED
        } else {
            Color32::LIGHT_GREEN
        };
        ui.label(RichText::new(msg).color(color));
    }
}

/// Single-line input sized like the auth screens' fields.
pub fn auth_field(ui: &mut Ui, value: &mut String, label: &str, hint: &str, password: bool) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(400.0)
            .password(password),
    );
}

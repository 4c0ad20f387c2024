//! Flat settings form: every key in one grid, labeled with its full name

use eframe::egui;

use crate::gui::constants::{FIELD_WIDTH, ITEM_SPACING};
use crate::settings::StyleSettings;

/// Renders the flat settings editor and returns true if any field changed
pub fn ui(ui: &mut egui::Ui, settings: &mut StyleSettings) -> bool {
    let mut changed = false;

    egui::Grid::new("flat_settings")
        .num_columns(2)
        .spacing([ITEM_SPACING, ITEM_SPACING / 2.0])
        .striped(true)
        .show(ui, |ui| {
            for (key, value) in settings.entries_mut() {
                ui.label(key);
                let edit = egui::TextEdit::singleline(value).desired_width(FIELD_WIDTH);
                if ui.add(edit).changed() {
                    changed = true;
                }
                ui.end_row();
            }
        });

    changed
}

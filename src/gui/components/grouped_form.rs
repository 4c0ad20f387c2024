//! Grouped settings form: one collapsible section per key namespace

use eframe::egui;

use crate::gui::constants::{FIELD_WIDTH, ITEM_SPACING};
use crate::settings::StyleSettings;

/// Section titles for the known style namespaces.
const GROUP_TITLES: &[(&str, &str)] = &[
    ("figure", "Figure Settings"),
    ("axes", "Axes Settings"),
    ("lines", "Lines Settings"),
    ("markers", "Marker Props"),
    ("patch", "Patches"),
    ("font", "Font"),
    ("text", "Text"),
    ("xtick", "X Ticks"),
    ("ytick", "Y Ticks"),
    ("grid", "Grid"),
    ("legend", "Legend"),
    ("image", "Image"),
    ("contour", "Contour"),
    ("errorbar", "Error Bar"),
    ("scatter", "Scatter"),
    ("boxplot", "Boxplot"),
    ("agg", "Agg Rendering"),
];

/// Title shown on a group header; unknown namespaces fall back to the raw
/// prefix so user-added keys still get a section.
pub fn group_title(prefix: &str) -> &str {
    GROUP_TITLES
        .iter()
        .find(|(known, _)| *known == prefix)
        .map(|(_, title)| *title)
        .unwrap_or(prefix)
}

/// Label next to a field inside its group: the key without the namespace.
pub fn field_label<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(key)
}

/// Renders the grouped settings editor and returns true if any field changed
pub fn ui(ui: &mut egui::Ui, settings: &mut StyleSettings) -> bool {
    let mut changed = false;

    let prefixes: Vec<String> = settings
        .group_prefixes()
        .into_iter()
        .map(str::to_string)
        .collect();

    for prefix in &prefixes {
        egui::CollapsingHeader::new(group_title(prefix))
            .id_salt(prefix)
            .show(ui, |ui| {
                for (key, value) in settings.group_mut(prefix) {
                    ui.horizontal(|ui| {
                        ui.label(field_label(key, prefix));
                        let edit = egui::TextEdit::singleline(value).desired_width(FIELD_WIDTH);
                        if ui.add(edit).changed() {
                            changed = true;
                        }
                    });
                    ui.add_space(ITEM_SPACING / 2.0);
                }
            });
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_namespaces_get_friendly_titles() {
        assert_eq!(group_title("figure"), "Figure Settings");
        assert_eq!(group_title("agg"), "Agg Rendering");
        assert_eq!(group_title("somecustom"), "somecustom");
    }

    #[test]
    fn field_labels_drop_the_namespace() {
        assert_eq!(field_label("lines.linewidth", "lines"), "linewidth");
        assert_eq!(field_label("xtick.major.size", "xtick"), "major.size");
        // A key without a delimiter keeps its full name.
        assert_eq!(field_label("backend", "backend"), "backend");
    }
}

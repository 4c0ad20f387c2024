//! GUI-specific constants for layout, colors and polling intervals

use egui;

/// Preview window dimensions
pub const WINDOW_WIDTH: f32 = 900.0;
pub const WINDOW_HEIGHT: f32 = 800.0;
pub const WINDOW_MIN_WIDTH: f32 = 600.0;
pub const WINDOW_MIN_HEIGHT: f32 = 500.0;

/// Layout spacing
pub const PADDING: f32 = 10.0;
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Width of a value input field
pub const FIELD_WIDTH: f32 = 140.0;

/// Error banner color
pub const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// Repaint cadence while a generation is outstanding
pub const OUTCOME_POLL_INTERVAL_MS: u64 = 100;

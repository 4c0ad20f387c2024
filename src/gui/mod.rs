//! egui/eframe front end for the chart style preview

pub mod components;
pub mod constants;

use std::time::Duration;

use anyhow::{Result, anyhow};
use eframe::{NativeOptions, egui};
use tracing::{debug, error, info};

use crate::render::{
    ChartClient, ChartImage, GENERATION_FAILED, RenderResult, RenderState,
};
use crate::settings::StyleSettings;
use self::constants::*;

/// Which of the two form layouts to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormLayout {
    Grouped,
    Flat,
}

pub struct PreviewApp {
    settings: StyleSettings,
    client: ChartClient,
    layout: FormLayout,
    state: RenderState,
    chart_texture: Option<egui::TextureHandle>,
}

impl PreviewApp {
    pub fn new(settings: StyleSettings, client: ChartClient, layout: FormLayout) -> Self {
        Self {
            settings,
            client,
            layout,
            state: RenderState::Idle,
            chart_texture: None,
        }
    }

    /// Start one generation round. Triggers while a round is already in
    /// flight are ignored, so at most one request is outstanding.
    fn begin_generate(&mut self) {
        if self.state.is_loading() {
            return;
        }
        info!(fields = self.settings.len(), "Generating chart");
        self.state = RenderState::Loading;
        self.client.submit(&self.settings);
    }

    /// Drain a finished outcome from the pipeline, if one is waiting.
    fn poll_outcome(&mut self, ctx: &egui::Context) {
        let Some(outcome) = self.client.try_recv() else {
            return;
        };

        match outcome {
            Ok(image) => {
                info!(width = image.width, height = image.height, "Chart generated");
                // Replacing the handle releases the previous chart texture.
                self.chart_texture = Some(upload_chart_texture(ctx, &image));
                self.state = RenderState::Done(RenderResult::Chart(image));
            }
            Err(err) => {
                error!(error = ?err, "Chart generation failed");
                self.chart_texture = None;
                self.state = RenderState::Done(RenderResult::Failed(GENERATION_FAILED.to_string()));
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_outcome(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(PADDING);
            ui.heading("Chart Style Preview");
            ui.add_space(SECTION_SPACING);

            egui::ScrollArea::vertical().show(ui, |ui| {
                let changed = match self.layout {
                    FormLayout::Grouped => components::grouped_form::ui(ui, &mut self.settings),
                    FormLayout::Flat => components::flat_form::ui(ui, &mut self.settings),
                };
                if changed {
                    debug!("Style settings edited");
                }

                ui.add_space(SECTION_SPACING);

                let loading = self.state.is_loading();
                ui.horizontal(|ui| {
                    let label = if loading { "Generating..." } else { "Generate Chart" };
                    if ui.add_enabled(!loading, egui::Button::new(label)).clicked() {
                        self.begin_generate();
                    }
                    if loading {
                        ui.spinner();
                    }
                });

                if let Some(message) = self.state.error() {
                    ui.add_space(ITEM_SPACING);
                    ui.colored_label(ERROR_COLOR, message);
                }

                if let Some(texture) = &self.chart_texture {
                    ui.add_space(SECTION_SPACING);
                    ui.group(|ui| {
                        ui.add(egui::Image::new(texture).max_width(ui.available_width()));
                        if let Some(image) = self.state.chart() {
                            ui.weak(format!("{}\u{D7}{}", image.width, image.height));
                        }
                    });
                }
            });
        });

        if self.state.is_loading() {
            // Finished outcomes must be noticed without user input.
            ctx.request_repaint_after(Duration::from_millis(OUTCOME_POLL_INTERVAL_MS));
        }
    }
}

fn upload_chart_texture(ctx: &egui::Context, image: &ChartImage) -> egui::TextureHandle {
    let size = [image.width as usize, image.height as usize];
    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, &image.rgba);
    ctx.load_texture("chart", pixels, egui::TextureOptions::LINEAR)
}

pub fn run_gui(settings: StyleSettings, client: ChartClient, layout: FormLayout) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Chart Style Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "Chart Style Preview",
        options,
        Box::new(move |_cc| Ok(Box::new(PreviewApp::new(settings, client, layout)))),
    )
    .map_err(|err| anyhow!("Failed to launch preview window: {err}"))
}

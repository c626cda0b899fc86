//! The twelve-panel chart window.

use egui::{Align, Layout, Vec2, ViewportBuilder, ViewportClass, ViewportCommand, ViewportId};
use egui_phosphor::regular::{ARROWS_OUT, FLOPPY_DISK};
use log::{error, info};

use crate::config::FeatureFlags;
use crate::data::chart::ChartPanel;
use crate::data::export;
use crate::data::graph_spec::{GRID_COLUMNS, GRID_ROWS};
use crate::data::zoom::synchronize_panels;
use crate::panels::chart_ui::{show_chart, ZoomEvent};

pub struct GridWindow {
    viewport_id: ViewportId,
    title: String,
    size: Vec2,
    panels: Vec<ChartPanel>,
    features: FeatureFlags,
    open: bool,
    capture_requested: bool,
}

impl GridWindow {
    pub fn new(title: String, panels: Vec<ChartPanel>, size: Vec2, features: FeatureFlags) -> Self {
        Self {
            viewport_id: ViewportId::from_hash_of("logplot_grid"),
            title,
            size,
            panels,
            features,
            open: true,
            capture_requested: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Restore every panel to the view it was built with.
    pub fn reset_zoom(&mut self) {
        for panel in &mut self.panels {
            panel.reset_zoom();
        }
    }

    /// Apply a zoom on panel `source` and align the siblings' X axes.
    pub fn apply_zoom(&mut self, source: usize, event: &ZoomEvent) -> Vec<usize> {
        synchronize_panels(&mut self.panels, source, &event.old, &event.new)
    }

    /// Render the window for this frame. Once the user closes it,
    /// [`is_open`](Self::is_open) turns false and the owner drops it.
    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        let builder = ViewportBuilder::default()
            .with_title(self.title.clone())
            .with_inner_size(self.size)
            .with_resizable(true);

        ctx.show_viewport_immediate(self.viewport_id, builder, |ctx, class| {
            if class == ViewportClass::Embedded {
                return;
            }
            if ctx.input(|i| i.viewport().close_requested()) {
                info!("chart window closed");
                self.open = false;
                return;
            }
            self.handle_capture(ctx);

            egui::TopBottomPanel::top("grid_toolbar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button(format!("{ARROWS_OUT} Reset Zoom")).clicked() {
                        self.reset_zoom();
                    }
                    if ui.button(format!("{FLOPPY_DISK} Save All Graphs")).clicked() {
                        self.capture_requested = true;
                        ctx.send_viewport_cmd(ViewportCommand::Screenshot(Default::default()));
                    }
                });
            });

            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some((source, event)) = self.show_grid(ui) {
                    self.apply_zoom(source, &event);
                    ctx.request_repaint();
                }
            });
        });
    }

    /// Lay the panels out row-major, `GRID_COLUMNS` per row.
    fn show_grid(&self, ui: &mut egui::Ui) -> Option<(usize, ZoomEvent)> {
        let avail = ui.available_size();
        let spacing = ui.spacing().item_spacing;
        let cell = Vec2::new(
            (avail.x - spacing.x * (GRID_COLUMNS as f32 - 1.0)) / GRID_COLUMNS as f32,
            (avail.y - spacing.y * (GRID_ROWS as f32 - 1.0)) / GRID_ROWS as f32,
        );

        let mut zoomed = None;
        for row in 0..GRID_ROWS {
            ui.horizontal(|ui| {
                for col in 0..GRID_COLUMNS {
                    let index = row * GRID_COLUMNS + col;
                    let Some(panel) = self.panels.get(index) else {
                        continue;
                    };
                    ui.allocate_ui_with_layout(cell, Layout::top_down(Align::Center), |ui| {
                        ui.set_min_size(cell);
                        if let Some(event) =
                            show_chart(ui, ("grid_chart", index), panel, &self.features)
                        {
                            zoomed = Some((index, event));
                        }
                    });
                }
            });
        }
        zoomed
    }

    fn handle_capture(&mut self, ctx: &egui::Context) {
        if !self.capture_requested {
            return;
        }
        let Some(image) = ctx.input(|i| {
            i.events.iter().rev().find_map(|e| {
                if let egui::Event::Screenshot { image, .. } = e {
                    Some(image.clone())
                } else {
                    None
                }
            })
        }) else {
            return;
        };
        self.capture_requested = false;

        let Some(path) = export::prompt_export_path() else {
            return;
        };
        if let Err(e) = export::save_capture(&image, &path) {
            error!("failed to save graphs to {}: {e}", path.display());
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Save All Graphs")
                .set_description(format!("Could not save {}:\n{e}", path.display()))
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
    }
}

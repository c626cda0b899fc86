//! Single-chart window: a column checklist beside one chart.

use std::path::PathBuf;

use egui::{RichText, ScrollArea, Vec2, ViewportBuilder, ViewportClass, ViewportId};
use log::{debug, info};

use crate::config::FeatureFlags;
use crate::data::chart::{build_single_chart, ChartPanel};
use crate::data::csv_log::LogTable;
use crate::data::graph_spec::SINGLE_VIEW_COLUMNS;
use crate::data::zoom::synchronize_panels;
use crate::error::LogPlotError;
use crate::panels::chart_ui::show_chart;

/// Width of the checklist column, in points.
const CHECKLIST_WIDTH: f32 = 300.0;

pub struct SingleChartWindow {
    viewport_id: ViewportId,
    title: String,
    chart_title: String,
    size: Vec2,
    tables: Vec<LogTable>,
    checked: Vec<bool>,
    chart: ChartPanel,
    features: FeatureFlags,
    open: bool,
}

impl SingleChartWindow {
    /// Read the matched `files` and open with every column unchecked.
    pub fn open(
        title: String,
        chart_title: String,
        files: Vec<PathBuf>,
        size: Vec2,
        features: FeatureFlags,
    ) -> Result<Self, LogPlotError> {
        let tables = files
            .iter()
            .map(|p| LogTable::read(p))
            .collect::<Result<Vec<_>, _>>()?;
        info!("single chart over {} files", tables.len());
        let chart = build_single_chart(&tables, &[], &chart_title);
        Ok(Self {
            viewport_id: ViewportId::from_hash_of("logplot_single"),
            title,
            chart_title,
            size,
            tables,
            checked: vec![false; SINGLE_VIEW_COLUMNS.len()],
            chart,
            features,
            open: true,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Checked columns in checklist order.
    fn checked_columns(&self) -> Vec<String> {
        SINGLE_VIEW_COLUMNS
            .iter()
            .zip(&self.checked)
            .filter(|(_, c)| **c)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    fn rebuild(&mut self) {
        let columns = self.checked_columns();
        debug!("rebuilding single chart for {columns:?}");
        self.chart = build_single_chart(&self.tables, &columns, &self.chart_title);
    }

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
                self.open = false;
                return;
            }

            egui::SidePanel::left("single_columns")
                .exact_width(CHECKLIST_WIDTH)
                .show(ctx, |ui| {
                    ui.label(RichText::new("Columns").strong());
                    ui.separator();
                    let mut changed = false;
                    ScrollArea::vertical().show(ui, |ui| {
                        for (name, checked) in SINGLE_VIEW_COLUMNS.iter().zip(&mut self.checked) {
                            changed |= ui.checkbox(checked, *name).changed();
                        }
                    });
                    if changed {
                        self.rebuild();
                    }
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                let chart = std::slice::from_mut(&mut self.chart);
                if let Some(event) = show_chart(ui, "single_chart", &chart[0], &self.features) {
                    synchronize_panels(chart, 0, &event.old, &event.new);
                }
            });
        });
    }
}

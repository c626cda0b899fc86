//! The analyzer window: directory loading, the three selection lists and
//! the render actions that open chart windows.

use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use egui_phosphor::regular::{CHART_LINE, FOLDER_OPEN, SQUARES_FOUR};
use log::{error, info, warn};

use crate::config::LogPlotConfig;
use crate::data::catalog::{list_log_files, parse_directories, Catalog, LoadMode};
use crate::data::chart::{build_grid, ChartPanel};
use crate::data::matcher::{match_files, MatchCriteria};
use crate::data::selection::SelectionController;
use crate::data::task::{BackgroundTask, TaskPoll};
use crate::error::LogPlotError;
use crate::panels::grid_ui::GridWindow;
use crate::panels::selection_ui::selection_list;
use crate::panels::single_ui::SingleChartWindow;

/// Fallback monitor size when the platform does not report one.
const FALLBACK_MONITOR: egui::Vec2 = egui::vec2(1600.0, 1000.0);

struct PendingScan {
    task: BackgroundTask<Catalog>,
    mode: LoadMode,
}

struct PendingGrid {
    task: BackgroundTask<Result<Vec<ChartPanel>, LogPlotError>>,
    title: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// AnalyzerApp
// ─────────────────────────────────────────────────────────────────────────────

pub struct AnalyzerApp {
    config: LogPlotConfig,

    /// Comma-joined log directories, editable by the user.
    pub path_text: String,
    /// Append loaded directories instead of replacing them.
    pub append: bool,

    pub catalog: Catalog,
    pub selection: SelectionController,

    scan: Option<PendingScan>,
    grid_render: Option<PendingGrid>,
    startup_scan: bool,

    grid: Option<GridWindow>,
    single: Option<SingleChartWindow>,

    status: String,
}

impl AnalyzerApp {
    pub fn new(config: LogPlotConfig) -> Self {
        let path_text = crate::data::catalog::join_directories(&config.directories);
        Self {
            append: config.append,
            startup_scan: !config.directories.is_empty(),
            path_text,
            config,
            catalog: Catalog::new(),
            selection: SelectionController::new(),
            scan: None,
            grid_render: None,
            grid: None,
            single: None,
            status: String::new(),
        }
    }

    fn directories(&self) -> Vec<PathBuf> {
        parse_directories(&self.path_text)
    }

    fn is_busy(&self) -> bool {
        self.scan.is_some() || self.grid_render.is_some()
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    /// Ask for a folder and scan it in the background.
    fn load_test_log(&mut self, ctx: &egui::Context) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        let mode = LoadMode::from_append_flag(self.append);
        if mode == LoadMode::Replace {
            self.catalog.clear();
            self.selection.clear();
        }
        self.start_scan(ctx, vec![dir], mode);
    }

    fn start_scan(&mut self, ctx: &egui::Context, dirs: Vec<PathBuf>, mode: LoadMode) {
        info!("scanning {} directories ({mode:?})", dirs.len());
        match BackgroundTask::spawn("catalog-scan", Some(ctx.clone()), move || {
            Catalog::scan(&dirs)
        }) {
            Ok(task) => {
                self.scan = Some(PendingScan { task, mode });
                self.status = "Scanning...".to_string();
            }
            Err(e) => self.report_error("Load Test Log", &e),
        }
    }

    fn apply_scan(&mut self, scanned: Catalog, mode: LoadMode) {
        self.catalog.merge(scanned, mode);
        self.path_text = self.catalog.directories_text();
        self.selection.apply_load(&self.catalog, mode);
        self.status = format!(
            "{} test names, {} barcodes",
            self.catalog.test_names.len(),
            self.catalog.barcodes.len()
        );
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Criteria and matched files for the current selection, or the reason
    /// there are none.
    fn resolve_files(&self) -> Result<(MatchCriteria, Vec<PathBuf>), LogPlotError> {
        let criteria = self.selection.criteria(&self.path_text)?;
        let candidates = list_log_files(&self.directories());
        let files = match_files(&candidates, &criteria);
        info!(
            "{} of {} log files match the selection",
            files.len(),
            candidates.len()
        );
        Ok((criteria, files))
    }

    fn chart_window_title(&self) -> String {
        self.config.chart_window_title(
            &self.selection.barcodes.selected_items(),
            &self.selection.test_names.selected_items(),
        )
    }

    fn chart_window_size(&self, ctx: &egui::Context) -> egui::Vec2 {
        let monitor = ctx
            .input(|i| i.viewport().monitor_size)
            .unwrap_or(FALLBACK_MONITOR);
        monitor * self.config.window_fraction
    }

    /// "Show Graphs": validate, confirm, then read and build the grid off the UI thread.
    fn show_graphs(&mut self, ctx: &egui::Context) {
        let files = match self.resolve_files() {
            Ok((_, files)) if files.is_empty() => {
                self.report_error("Show Graphs", &LogPlotError::NoMatchingFiles);
                return;
            }
            Ok((_, files)) => files,
            Err(e @ LogPlotError::IncompleteSelection(_)) => {
                warn!("{e}");
                show_message(
                    rfd::MessageLevel::Warning,
                    "Show Graphs",
                    "Please check the test name, barcode and test time selection.",
                );
                return;
            }
            Err(e) => {
                self.report_error("Show Graphs", &e);
                return;
            }
        };

        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title("Show Graphs")
            .set_description(format!("Found {} files. Draw graphs?", files.len()))
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        if answer != rfd::MessageDialogResult::Yes {
            return;
        }

        let title = self.chart_window_title();
        match BackgroundTask::spawn("grid-render", Some(ctx.clone()), move || build_grid(&files)) {
            Ok(task) => {
                self.grid_render = Some(PendingGrid { task, title });
                self.status = "Reading log files...".to_string();
            }
            Err(e) => self.report_error("Show Graphs", &e),
        }
    }

    fn open_grid(&mut self, ctx: &egui::Context, title: String, panels: Vec<ChartPanel>) {
        let size = self.chart_window_size(ctx);
        self.grid = Some(GridWindow::new(
            title,
            panels,
            size,
            self.config.features.clone(),
        ));
        self.status.clear();
    }

    /// "Show One Graph": validate, then open the single-chart window on
    /// whatever matched, even nothing.
    fn show_one_graph(&mut self, ctx: &egui::Context) {
        let files = match self.resolve_files() {
            Ok((_, files)) => files,
            Err(e) => {
                warn!("{e}");
                show_message(
                    rfd::MessageLevel::Warning,
                    "Show One Graph",
                    "Please check the test name, barcode and test time selection.",
                );
                return;
            }
        };
        let chart_title = format!(
            "{} / {}",
            self.selection.barcodes.selected_items().join(", "),
            self.selection.test_names.selected_items().join(", ")
        );
        let size = self.chart_window_size(ctx);
        match SingleChartWindow::open(
            self.chart_window_title(),
            chart_title,
            files,
            size,
            self.config.features.clone(),
        ) {
            Ok(window) => self.single = Some(window),
            Err(e) => self.report_error("Show One Graph", &e),
        }
    }

    // ── Per-frame ────────────────────────────────────────────────────────────

    fn poll_tasks(&mut self, ctx: &egui::Context) {
        if let Some(pending) = self.scan.take() {
            match pending.task.poll() {
                TaskPoll::Pending => self.scan = Some(pending),
                TaskPoll::Ready(catalog) => self.apply_scan(catalog, pending.mode),
                TaskPoll::Lost => self.report_error("Load Test Log", &LogPlotError::TaskLost),
            }
        }
        if let Some(pending) = self.grid_render.take() {
            match pending.task.poll() {
                TaskPoll::Pending => self.grid_render = Some(pending),
                TaskPoll::Ready(Ok(panels)) => self.open_grid(ctx, pending.title, panels),
                TaskPoll::Ready(Err(e)) => self.report_error("Show Graphs", &e),
                TaskPoll::Lost => self.report_error("Show Graphs", &LogPlotError::TaskLost),
            }
        }
    }

    fn report_error(&mut self, title: &str, e: &LogPlotError) {
        error!("{title}: {e}");
        self.status = e.to_string();
        show_message(rfd::MessageLevel::Error, title, &e.to_string());
    }

    fn render_load_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label("Log path:");
            let width = (ui.available_width() - 220.0).max(120.0);
            ui.add(egui::TextEdit::singleline(&mut self.path_text).desired_width(width));
            ui.checkbox(&mut self.append, "Append");
            let load = ui.add_enabled(
                self.scan.is_none(),
                egui::Button::new(format!("{FOLDER_OPEN} Load Test Log")),
            );
            if load.clicked() {
                self.load_test_log(ctx);
            }
        });
    }

    fn render_lists(&mut self, ui: &mut egui::Ui) {
        let dirs = self.directories();
        ui.columns(3, |cols| {
            if let Some(p) = selection_list(
                &mut cols[0],
                "test_names",
                "Test Name",
                &self.selection.test_names,
                false,
            ) {
                self.selection.press_test_name(p.index);
            }
            if let Some(p) = selection_list(
                &mut cols[1],
                "barcodes",
                "Barcode",
                &self.selection.barcodes,
                true,
            ) {
                self.selection.press_barcode(p.index, p.modifiers, &dirs);
            }
            if let Some(p) = selection_list(
                &mut cols[2],
                "test_times",
                "Test Time",
                &self.selection.test_times,
                true,
            ) {
                self.selection.press_test_time(p.index, p.modifiers);
            }
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let idle = !self.is_busy();
            if ui
                .add_enabled(idle, egui::Button::new(format!("{SQUARES_FOUR} Show Graphs")))
                .clicked()
            {
                self.show_graphs(ctx);
            }
            if ui
                .add_enabled(idle, egui::Button::new(format!("{CHART_LINE} Show One Graph")))
                .clicked()
            {
                self.show_one_graph(ctx);
            }
            if self.is_busy() {
                ui.spinner();
            }
            ui.label(&self.status);
        });
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.startup_scan {
            self.startup_scan = false;
            let dirs = self.directories();
            self.start_scan(ctx, dirs, LoadMode::Replace);
        }
        self.poll_tasks(ctx);

        egui::TopBottomPanel::top("load_bar").show(ctx, |ui| {
            self.render_load_bar(ui, ctx);
        });
        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            self.render_actions(ui, ctx);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_lists(ui);
        });

        if let Some(grid) = self.grid.as_mut() {
            grid.show(ctx);
            if !grid.is_open() {
                self.grid = None;
            }
        }
        if let Some(single) = self.single.as_mut() {
            single.show(ctx);
            if !single.is_open() {
                self.single = None;
            }
        }

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn show_message(level: rfd::MessageLevel, title: &str, description: &str) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

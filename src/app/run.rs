//! Top-level entry point for running LogPlot as a native window.

use eframe::egui;

use crate::config::LogPlotConfig;

use super::AnalyzerApp;

/// Launch the analyzer in a native window.
///
/// Uses `cfg.native_options` when given, otherwise a 1200x800 window. The
/// call blocks until the main window is closed.
pub fn run_logplot(mut cfg: LogPlotConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1200.0, 800.0));
    }

    let app = AnalyzerApp::new(cfg);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

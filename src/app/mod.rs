//! Application module for LogPlot.
//!
//! | Sub-module       | Responsibility |
//! | ---------------- | -------------- |
//! | [`analyzer_app`] | [`AnalyzerApp`] (eframe): loading, selection lists, render actions |
//! | [`run`]          | Top-level [`run_logplot()`] entry point |

mod analyzer_app;
mod run;

pub use analyzer_app::AnalyzerApp;
pub use run::run_logplot;

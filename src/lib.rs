//! LogPlot crate root: re-exports and module wiring.
//!
//! A desktop viewer for CSV test logs built on egui/eframe:
//! - `data`: filename classification, catalog, matching, selection and
//!   chart models (no UI)
//! - `panels`: egui rendering of lists and charts
//! - `app`: the analyzer window and its chart windows
//! - `config`: startup configuration
//! - `error`: error types

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;

// Public re-exports for a compact external API
pub use app::{run_logplot, AnalyzerApp};
pub use config::{FeatureFlags, LogPlotConfig};
pub use data::catalog::{Catalog, LoadMode, ValueSet};
pub use data::chart::{AxisScale, ChartPanel, ChartState, Series};
pub use data::filename::{LogFile, LogName};
pub use data::matcher::{match_files, MatchCriteria};
pub use data::selection::{ClickModifiers, SelectionController, SelectionList};
pub use data::zoom::{synchronize, ZoomState};
pub use error::{ConfigError, ExportError, LogPlotError};

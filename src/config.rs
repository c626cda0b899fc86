//! Configuration for the analyzer window and its chart windows.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "LOGPLOT_CONFIG";

// ─────────────────────────────────────────────────────────────────────────────
// Feature flags
// ─────────────────────────────────────────────────────────────────────────────

/// Toggle individual chart features on or off.
///
/// All features default to `true` (enabled).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Show the legend in every chart.
    pub legend: bool,
    /// Show the plot grid.
    pub grid: bool,
    /// Show the hovered point's coordinates.
    pub point_values: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            legend: true,
            grid: true,
            point_values: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LogPlotConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field             | Purpose |
/// |-------------------|---------|
/// | `title`           | Main window title and chart window title prefix |
/// | `window_fraction` | Chart window size relative to the monitor |
/// | `directories`     | Log directories tracked at startup |
/// | `append`          | Initial state of the Append checkbox |
/// | `features`        | Chart feature toggles |
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPlotConfig {
    // ── Window / chrome ──────────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Chart windows open at this fraction of the monitor size.
    pub window_fraction: f32,
    /// Optional eframe native-window options.
    #[serde(skip)]
    pub native_options: Option<eframe::NativeOptions>,

    // ── Loading ──────────────────────────────────────────────────────────────
    pub directories: Vec<PathBuf>,
    pub append: bool,

    // ── Feature flags ────────────────────────────────────────────────────────
    pub features: FeatureFlags,
}

impl Default for LogPlotConfig {
    fn default() -> Self {
        Self {
            title: "Data Analyzer".to_string(),
            window_fraction: 0.7,
            native_options: None,

            directories: Vec::new(),
            append: false,

            features: FeatureFlags::default(),
        }
    }
}

impl std::fmt::Debug for LogPlotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPlotConfig")
            .field("title", &self.title)
            .field("window_fraction", &self.window_fraction)
            .field("directories", &self.directories)
            .field("append", &self.append)
            .field("features", &self.features)
            .finish_non_exhaustive()
    }
}

impl LogPlotConfig {
    /// Load and validate a JSON configuration file. Missing fields take
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        info!("loaded configuration from {}", path.display());
        Ok(cfg)
    }

    /// Configuration from the file named by `LOGPLOT_CONFIG`, or defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring {CONFIG_ENV_VAR}: {e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.window_fraction > 0.0 && self.window_fraction <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "window_fraction must be in (0, 1], got {}",
                self.window_fraction
            )));
        }
        Ok(())
    }

    /// Title of a chart window for the given selection.
    pub fn chart_window_title(&self, barcodes: &[String], test_names: &[String]) -> String {
        format!(
            "{} - {} / {}",
            self.title,
            barcodes.join(", "),
            test_names.join(", ")
        )
    }
}

//! Error types for log loading, rendering, configuration and export.
//!
//! Lenient cases (short filenames, unparseable cells, missing columns,
//! missing directories) are not errors; they are skipped and logged.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for user actions (render requests, background work).
#[derive(Error, Debug)]
pub enum LogPlotError {
    #[error("selection incomplete: {0}")]
    IncompleteSelection(&'static str),

    #[error("no log files match the selected test names, barcodes and test times")]
    NoMatchingFiles,

    #[error("failed to read log file {}: {source}", path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start background task: {0}")]
    TaskSpawn(#[source] io::Error),

    #[error("background task ended without a result")]
    TaskLost,

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Configuration file loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error while reading config: {0}")]
    Io(#[from] io::Error),
}

/// Chart image export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

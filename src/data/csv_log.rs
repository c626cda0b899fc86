//! Minimal reader for test-log CSV files.
//!
//! Lines are kept raw and split on demand: the header names the columns,
//! every later line is a row of numeric cells. No quoting is supported.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LogPlotError;

#[derive(Debug, Clone, Default)]
pub struct LogTable {
    pub path: PathBuf,
    headers: Vec<String>,
    lines: Vec<String>,
}

impl LogTable {
    /// Read the whole file. A leading UTF-8 BOM is dropped and invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn read(path: &Path) -> Result<Self, LogPlotError> {
        let bytes = fs::read(path).map_err(|source| LogPlotError::ReadLog {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let mut table = Self::from_text(&text);
        table.path = path.to_path_buf();
        Ok(table)
    }

    pub fn from_text(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let headers = lines
            .first()
            .map(|h| h.split(',').map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            path: PathBuf::new(),
            headers,
            lines,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the first header exactly equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of text lines, header included.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Raw cell at `column` of text line `line` (line 0 is the header).
    pub fn cell(&self, line: usize, column: usize) -> Option<&str> {
        self.lines.get(line)?.split(',').nth(column)
    }
}

/// Lenient numeric parse: surrounding whitespace is ignored.
pub fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

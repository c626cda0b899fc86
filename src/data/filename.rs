//! Classification of log files from their base names.
//!
//! A log file name is split on `_` into positional tokens. Two naming
//! conventions exist, distinguished by token 3:
//!
//! | convention | token 3 starts with | test time | barcode  | test name      |
//! |------------|---------------------|-----------|----------|----------------|
//! | default    | anything else       | token 3   | token 4  | tokens 5.. `_` |
//! | alternate  | `JH` or `JG`        | token 2   | token 3  | tokens 4.. `_` |
//!
//! Names with fewer than [`MIN_TOKENS`] tokens are not log files.

use std::path::{Path, PathBuf};

/// Minimum number of `_`-separated tokens for a name to be a log file.
pub const MIN_TOKENS: usize = 5;

/// Barcode prefixes that switch a name to the alternate convention.
const ALTERNATE_BARCODE_PREFIXES: [&str; 2] = ["JH", "JG"];

/// Tokens classified out of a log file's base name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogName {
    pub test_time: String,
    pub barcode: String,
    /// Remaining tokens re-joined with `_`; may be empty.
    pub test_name: String,
}

impl LogName {
    /// Parse a base name without extension. Returns `None` for names with
    /// fewer than [`MIN_TOKENS`] tokens.
    pub fn parse(stem: &str) -> Option<Self> {
        let tokens: Vec<&str> = stem.split('_').collect();
        if tokens.len() < MIN_TOKENS {
            return None;
        }

        let alternate = ALTERNATE_BARCODE_PREFIXES
            .iter()
            .any(|prefix| tokens[3].starts_with(prefix));

        let (test_time, barcode, rest) = if alternate {
            (tokens[2], tokens[3], &tokens[4..])
        } else {
            (tokens[3], tokens[4], &tokens[5..])
        };

        Some(Self {
            test_time: test_time.to_string(),
            barcode: barcode.to_string(),
            test_name: rest.join("_"),
        })
    }

    /// Parse the file stem of `path` (last extension stripped).
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        Self::parse(stem)
    }
}

/// A discovered log file plus its filename classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub name: LogName,
}

impl LogFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = LogName::from_path(&path)?;
        Some(Self { path, name })
    }
}

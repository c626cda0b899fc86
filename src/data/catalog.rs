//! Catalog of distinct test names, barcodes and test times found in log
//! directories, plus the directory listing helpers shared with the matcher.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::data::filename::{LogFile, LogName};

/// Extension (case-insensitive) of files considered during a scan.
pub const LOG_EXTENSION: &str = "csv";

/// Insertion-ordered set of strings with exact-match membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` if absent. Returns `true` when it was newly added.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_string());
        self.order.push(value.to_string());
        true
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    /// Values in first-seen order.
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Merge `other` into `self`, keeping `self`'s order and appending new values.
    pub fn extend_from(&mut self, other: &ValueSet) {
        for v in other.iter() {
            self.insert(v);
        }
    }
}

/// Whether a directory load replaces or extends the current catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMode {
    Replace,
    Append,
}

impl LoadMode {
    pub fn from_append_flag(append: bool) -> Self {
        if append {
            LoadMode::Append
        } else {
            LoadMode::Replace
        }
    }
}

/// De-duplicated value sets derived from log filenames, and the directories
/// they were scanned from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub test_names: ValueSet,
    pub barcodes: ValueSet,
    pub test_times: ValueSet,
    directories: Vec<PathBuf>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from every log file in `directories`.
    /// Missing or unreadable directories contribute nothing.
    pub fn scan<P: AsRef<Path>>(directories: &[P]) -> Self {
        let mut catalog = Self::new();
        for dir in directories {
            let dir = dir.as_ref();
            if !dir.is_dir() {
                debug!("not scanning missing directory {}", dir.display());
                continue;
            }
            catalog.track_directory(dir);
            for path in list_log_files(std::slice::from_ref(&dir)) {
                if let Some(file) = LogFile::from_path(path) {
                    catalog.add(&file.name);
                }
            }
        }
        catalog
    }

    /// Record one parsed name in all three sets.
    pub fn add(&mut self, name: &LogName) {
        self.test_names.insert(&name.test_name);
        self.barcodes.insert(&name.barcode);
        self.test_times.insert(&name.test_time);
    }

    /// Fold a freshly scanned catalog into this one.
    ///
    /// `Replace` clears all sets and the directory list first; `Append`
    /// keeps them and only tracks directories not already present.
    pub fn merge(&mut self, scanned: Catalog, mode: LoadMode) {
        if mode == LoadMode::Replace {
            self.clear();
        }
        for dir in &scanned.directories {
            self.track_directory(dir);
        }
        self.test_names.extend_from(&scanned.test_names);
        self.barcodes.extend_from(&scanned.barcodes);
        self.test_times.extend_from(&scanned.test_times);
        info!(
            "catalog now holds {} test names, {} barcodes, {} test times from {} directories",
            self.test_names.len(),
            self.barcodes.len(),
            self.test_times.len(),
            self.directories.len()
        );
    }

    /// Scan a single directory and merge it according to `mode`.
    pub fn load_directory(&mut self, dir: &Path, mode: LoadMode) {
        let scanned = Catalog::scan(&[dir]);
        self.merge(scanned, mode);
    }

    pub fn clear(&mut self) {
        self.test_names.clear();
        self.barcodes.clear();
        self.test_times.clear();
        self.directories.clear();
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    fn track_directory(&mut self, dir: &Path) {
        if !self.directories.iter().any(|d| d == dir) {
            self.directories.push(dir.to_path_buf());
        }
    }

    /// Tracked directories joined for display in the path field.
    pub fn directories_text(&self) -> String {
        join_directories(&self.directories)
    }
}

/// Join directories with `", "` as shown in the path field.
pub fn join_directories(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split a comma-joined path field into trimmed, non-empty directories.
pub fn parse_directories(text: &str) -> Vec<PathBuf> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// List the log files directly inside each existing directory, sorted by
/// path within each directory. Directory contents are not opened.
pub fn list_log_files<P: AsRef<Path>>(directories: &[P]) -> Vec<PathBuf> {
    let mut all = Vec::new();
    for dir in directories {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            debug!("skipping missing directory {}", dir.display());
            continue;
        }
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot list {}: {e}", dir.display());
                continue;
            }
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_log_extension(path))
            .collect();
        files.sort();
        all.extend(files);
    }
    all
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(LOG_EXTENSION))
        .unwrap_or(false)
}

/// Distinct test times of every log file in `directories` whose barcode is
/// in `barcodes`, in first-seen order.
pub fn collect_test_times<P: AsRef<Path>>(
    directories: &[P],
    barcodes: &HashSet<String>,
) -> ValueSet {
    let mut times = ValueSet::new();
    for path in list_log_files(directories) {
        let Some(name) = LogName::from_path(&path) else {
            continue;
        };
        if barcodes.contains(&name.barcode) {
            times.insert(&name.test_time);
        }
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_set_keeps_first_seen_order() {
        let mut s = ValueSet::new();
        assert!(s.insert("b"));
        assert!(s.insert("a"));
        assert!(!s.insert("b"));
        assert_eq!(s.as_slice(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn parse_directories_trims_and_drops_empty() {
        let dirs = parse_directories(" /a , /b,, ");
        assert_eq!(dirs, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
    }
}

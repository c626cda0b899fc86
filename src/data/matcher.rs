//! Resolve a selection of test names, barcodes and test times to files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::data::filename::LogName;

/// The three value sets a file must satisfy simultaneously.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCriteria {
    pub test_names: HashSet<String>,
    pub barcodes: HashSet<String>,
    pub test_times: HashSet<String>,
}

impl MatchCriteria {
    pub fn new<N, B, T>(test_names: N, barcodes: B, test_times: T) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            test_names: test_names.into_iter().map(Into::into).collect(),
            barcodes: barcodes.into_iter().map(Into::into).collect(),
            test_times: test_times.into_iter().map(Into::into).collect(),
        }
    }

    /// All three memberships must hold.
    pub fn matches(&self, name: &LogName) -> bool {
        self.test_times.contains(&name.test_time)
            && self.barcodes.contains(&name.barcode)
            && self.test_names.contains(&name.test_name)
    }
}

/// Keep the candidates whose parsed name satisfies `criteria`, in input order.
/// Names that do not parse as log files never match.
pub fn match_files<P: AsRef<Path>>(candidates: &[P], criteria: &MatchCriteria) -> Vec<PathBuf> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|path| {
            LogName::from_path(path)
                .map(|name| criteria.matches(&name))
                .unwrap_or(false)
        })
        .map(Path::to_path_buf)
        .collect()
}

//! List selection state for the test name, barcode and test time lists.
//!
//! The barcode and test time lists behave like multi-simple list boxes: a
//! plain press toggles the pressed row. A shift press additionally toggles
//! every row strictly between the anchor (last plain press) and the pressed
//! row. The range is toggled, not set, so repeating a shift press over the
//! same range undoes it. The test name list selects one row at a time.

use std::collections::HashSet;
use std::path::Path;

use log::debug;

use crate::data::catalog::{collect_test_times, Catalog, LoadMode, ValueSet};
use crate::data::matcher::MatchCriteria;
use crate::error::LogPlotError;

/// Keyboard modifiers relevant to list presses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub shift: bool,
}

impl ClickModifiers {
    pub const NONE: Self = Self { shift: false };
    pub const SHIFT: Self = Self { shift: true };
}

impl From<egui::Modifiers> for ClickModifiers {
    fn from(m: egui::Modifiers) -> Self {
        // only a lone shift counts as a range press
        Self {
            shift: m.shift && !m.ctrl && !m.alt && !m.command,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionList {
    items: Vec<String>,
    selected: Vec<bool>,
    last_selected: Option<usize>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        list.set_items(items);
        list
    }

    /// Replace all rows; every row starts unselected. The anchor index is
    /// kept and re-validated against the new length on the next shift press.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = vec![false; self.items.len()];
    }

    /// Append values not already listed, unselected. Existing rows, their
    /// selection and the anchor are untouched.
    pub fn extend_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            let item = item.into();
            if !self.items.contains(&item) {
                self.items.push(item);
                self.selected.push(false);
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_selected_index(&self) -> Option<usize> {
        self.last_selected
    }

    pub fn set_last_selected_index(&mut self, index: Option<usize>) {
        self.last_selected = index;
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(s) = self.selected.get_mut(index) {
            *s = selected;
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(s) = self.selected.get_mut(index) {
            *s = !*s;
        }
    }

    /// Select only `index` and make it the anchor.
    pub fn select_only(&mut self, index: usize) {
        if index >= self.len() {
            return;
        }
        self.selected.iter_mut().for_each(|s| *s = false);
        self.selected[index] = true;
        self.last_selected = Some(index);
    }

    pub fn select_all(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = true);
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    /// Selected rows in list order.
    pub fn selected_items(&self) -> Vec<String> {
        self.items
            .iter()
            .zip(&self.selected)
            .filter(|(_, s)| **s)
            .map(|(item, _)| item.clone())
            .collect()
    }

    /// `"{selected}/{total}"`.
    pub fn count_label(&self) -> String {
        format!("{}/{}", self.selected_count(), self.len())
    }

    /// Anchor/range handling for a press at `index`. Does not toggle the
    /// pressed row itself; see [`press`](Self::press).
    pub fn click(&mut self, index: usize, modifiers: ClickModifiers) {
        if index >= self.len() {
            return;
        }
        if !modifiers.shift {
            self.last_selected = Some(index);
            return;
        }
        let Some(anchor) = self.last_selected.filter(|a| *a < self.len()) else {
            return;
        };
        let start = anchor.min(index) + 1;
        let end = anchor.max(index);
        for j in start..end {
            self.toggle(j);
        }
    }

    /// Full press: toggle the pressed row, then apply [`click`](Self::click).
    pub fn press(&mut self, index: usize, modifiers: ClickModifiers) {
        if index >= self.len() {
            return;
        }
        self.toggle(index);
        self.click(index, modifiers);
    }
}

/// Owns the three lists and keeps the test-time list derived from the
/// barcode selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    pub test_names: SelectionList,
    pub barcodes: SelectionList,
    pub test_times: SelectionList,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repopulate test names and barcodes from the catalog; test times are
    /// cleared until a barcode is picked.
    pub fn reset_lists(&mut self, test_names: &ValueSet, barcodes: &ValueSet) {
        self.test_names.set_items(test_names.iter().cloned());
        self.barcodes.set_items(barcodes.iter().cloned());
        self.test_times.clear();
    }

    /// Follow a finished load. `Replace` repopulates from `catalog`;
    /// `Append` adds the new test names and barcodes and keeps every current
    /// selection, the test-time list included.
    pub fn apply_load(&mut self, catalog: &Catalog, mode: LoadMode) {
        match mode {
            LoadMode::Replace => self.reset_lists(&catalog.test_names, &catalog.barcodes),
            LoadMode::Append => {
                self.test_names.extend_items(catalog.test_names.iter().cloned());
                self.barcodes.extend_items(catalog.barcodes.iter().cloned());
            }
        }
    }

    pub fn clear(&mut self) {
        self.test_names.clear();
        self.barcodes.clear();
        self.test_times.clear();
    }

    pub fn press_test_name(&mut self, index: usize) {
        self.test_names.select_only(index);
    }

    /// Press on the barcode list, then rebuild the test-time list from the
    /// log files in `directories`.
    pub fn press_barcode<P: AsRef<Path>>(
        &mut self,
        index: usize,
        modifiers: ClickModifiers,
        directories: &[P],
    ) {
        self.barcodes.press(index, modifiers);
        self.refresh_test_times(directories);
    }

    pub fn press_test_time(&mut self, index: usize, modifiers: ClickModifiers) {
        self.test_times.press(index, modifiers);
    }

    /// Clear the test-time list; if any barcode is selected, refill it with
    /// the distinct test times of files carrying a selected barcode and
    /// select every row.
    pub fn refresh_test_times<P: AsRef<Path>>(&mut self, directories: &[P]) {
        self.test_times.clear();
        let selected: HashSet<String> = self.barcodes.selected_items().into_iter().collect();
        if selected.is_empty() {
            return;
        }
        let times = collect_test_times(directories, &selected);
        debug!(
            "{} test times for {} selected barcodes",
            times.len(),
            selected.len()
        );
        self.test_times.set_items(times.iter().cloned());
        self.test_times.select_all();
    }

    pub fn barcode_count_label(&self) -> String {
        self.barcodes.count_label()
    }

    pub fn test_time_count_label(&self) -> String {
        self.test_times.count_label()
    }

    /// Criteria for the current selection, or the first missing piece.
    pub fn criteria(&self, path_text: &str) -> Result<MatchCriteria, LogPlotError> {
        if path_text.trim().is_empty() {
            return Err(LogPlotError::IncompleteSelection("no log directory"));
        }
        if self.test_names.selected_count() == 0 {
            return Err(LogPlotError::IncompleteSelection("no test name selected"));
        }
        if self.barcodes.selected_count() == 0 {
            return Err(LogPlotError::IncompleteSelection("no barcode selected"));
        }
        if self.test_times.selected_count() == 0 {
            return Err(LogPlotError::IncompleteSelection("no test time selected"));
        }
        Ok(MatchCriteria::new(
            self.test_names.selected_items(),
            self.barcodes.selected_items(),
            self.test_times.selected_items(),
        ))
    }
}

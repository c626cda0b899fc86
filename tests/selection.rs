use std::fs;
use std::path::Path;

use logplot::data::catalog::{list_log_files, Catalog, LoadMode};
use logplot::data::matcher::match_files;
use logplot::data::selection::{ClickModifiers, SelectionController, SelectionList};
use logplot::LogPlotError;

fn six() -> SelectionList {
    SelectionList::from_items(["0", "1", "2", "3", "4", "5"])
}

fn selected(list: &SelectionList) -> Vec<usize> {
    (0..list.len()).filter(|i| list.is_selected(*i)).collect()
}

#[test]
fn anchor_starts_unset() {
    let list = six();
    assert_eq!(list.last_selected_index(), None);
    assert_eq!(list.count_label(), "0/6");
}

#[test]
fn shift_click_toggles_open_range_and_repeats_undo_it() {
    let mut list = six();
    list.set_last_selected_index(Some(1));

    list.click(4, ClickModifiers::SHIFT);
    assert_eq!(selected(&list), vec![2, 3]);

    list.click(4, ClickModifiers::SHIFT);
    assert!(selected(&list).is_empty());
}

#[test]
fn shift_range_toggles_rather_than_sets() {
    let mut list = six();
    list.set_selected(2, true);
    list.set_last_selected_index(Some(0));
    list.click(4, ClickModifiers::SHIFT);
    assert_eq!(selected(&list), vec![1, 3]);
}

#[test]
fn shift_range_works_backwards_and_excludes_both_ends() {
    let mut list = six();
    list.set_last_selected_index(Some(5));
    list.click(1, ClickModifiers::SHIFT);
    assert_eq!(selected(&list), vec![2, 3, 4]);

    let mut adjacent = six();
    adjacent.set_last_selected_index(Some(2));
    adjacent.click(3, ClickModifiers::SHIFT);
    assert!(selected(&adjacent).is_empty());
}

#[test]
fn plain_click_only_moves_anchor() {
    let mut list = six();
    list.click(3, ClickModifiers::NONE);
    assert_eq!(list.last_selected_index(), Some(3));
    assert!(selected(&list).is_empty());
}

#[test]
fn shift_without_anchor_does_nothing() {
    let mut list = six();
    list.click(4, ClickModifiers::SHIFT);
    assert!(selected(&list).is_empty());
    assert_eq!(list.last_selected_index(), None);
}

#[test]
fn press_toggles_row_then_applies_range() {
    let mut list = six();
    list.press(1, ClickModifiers::NONE);
    assert_eq!(selected(&list), vec![1]);
    list.press(4, ClickModifiers::SHIFT);
    assert_eq!(selected(&list), vec![1, 2, 3, 4]);
    assert_eq!(list.count_label(), "4/6");
    // shift press does not move the anchor
    assert_eq!(list.last_selected_index(), Some(1));
}

#[test]
fn out_of_range_press_is_ignored() {
    let mut list = six();
    list.press(9, ClickModifiers::NONE);
    assert!(selected(&list).is_empty());
    assert_eq!(list.last_selected_index(), None);
}

fn log_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in [
        "L_1_2_T1_B1_run.csv",
        "L_1_2_T1_B2_run.csv",
        "L_1_2_T2_B1_run.csv",
        "L_1_2_T3_B2_run.csv",
        "L_1_T9_JH5_run.csv",
    ] {
        fs::write(dir.path().join(name), "OIS_X\n1\n").unwrap();
    }
    dir
}

fn controller(dir: &Path) -> SelectionController {
    let catalog = Catalog::scan(&[dir]);
    let mut c = SelectionController::new();
    c.reset_lists(&catalog.test_names, &catalog.barcodes);
    c
}

#[test]
fn barcode_press_recomputes_and_selects_all_test_times() {
    let dir = log_dir();
    let dirs = [dir.path()];
    let mut c = controller(dir.path());
    assert_eq!(c.barcodes.items(), &["B1", "B2", "JH5"]);
    assert!(c.test_times.is_empty());

    c.press_barcode(0, ClickModifiers::NONE, &dirs);
    assert_eq!(c.test_times.items(), &["T1", "T2"]);
    assert_eq!(c.test_time_count_label(), "2/2");
    assert_eq!(c.barcode_count_label(), "1/3");

    // shift to JH5 toggles it and B2 in between
    c.press_barcode(2, ClickModifiers::SHIFT, &dirs);
    assert_eq!(c.barcodes.selected_items(), vec!["B1", "B2", "JH5"]);
    assert_eq!(c.test_times.items(), &["T1", "T2", "T3", "T9"]);
    assert_eq!(c.test_time_count_label(), "4/4");

    c.press_barcode(0, ClickModifiers::NONE, &dirs);
    assert_eq!(c.test_times.items(), &["T1", "T3", "T9"]);
}

#[test]
fn clearing_barcodes_empties_test_times() {
    let dir = log_dir();
    let dirs = [dir.path()];
    let mut c = controller(dir.path());
    c.press_barcode(1, ClickModifiers::NONE, &dirs);
    assert_eq!(c.test_times.items(), &["T1", "T3"]);
    c.press_barcode(1, ClickModifiers::NONE, &dirs);
    assert!(c.test_times.is_empty());
    assert_eq!(c.test_time_count_label(), "0/0");
}

#[test]
fn criteria_reports_the_missing_piece() {
    let dir = log_dir();
    let dirs = [dir.path()];
    let path_text = dir.path().display().to_string();
    let mut c = controller(dir.path());

    assert!(matches!(
        c.criteria(""),
        Err(LogPlotError::IncompleteSelection(_))
    ));
    assert!(matches!(
        c.criteria(&path_text),
        Err(LogPlotError::IncompleteSelection("no test name selected"))
    ));
    c.press_test_name(0);
    assert!(matches!(
        c.criteria(&path_text),
        Err(LogPlotError::IncompleteSelection("no barcode selected"))
    ));
    c.press_barcode(1, ClickModifiers::NONE, &dirs);
    // deselect the recomputed test times one by one
    c.press_test_time(0, ClickModifiers::NONE);
    c.press_test_time(1, ClickModifiers::NONE);
    assert!(matches!(
        c.criteria(&path_text),
        Err(LogPlotError::IncompleteSelection("no test time selected"))
    ));

    c.press_test_time(1, ClickModifiers::NONE);
    let criteria = c.criteria(&path_text).unwrap();
    let files = match_files(&list_log_files(&dirs), &criteria);
    assert_eq!(files, vec![dir.path().join("L_1_2_T3_B2_run.csv")]);
}

#[test]
fn test_name_press_selects_one_row() {
    let mut c = SelectionController::new();
    c.test_names.set_items(["alpha", "beta", "gamma"]);

    c.press_test_name(0);
    c.press_test_name(2);
    assert_eq!(c.test_names.selected_items(), vec!["gamma"]);
    assert_eq!(c.test_names.last_selected_index(), Some(2));

    // pressing the selected row keeps it selected
    c.press_test_name(2);
    assert_eq!(c.test_names.selected_items(), vec!["gamma"]);

    c.press_test_name(7);
    assert_eq!(c.test_names.selected_items(), vec!["gamma"]);
}

#[test]
fn extend_items_keeps_existing_selection() {
    let mut list = SelectionList::from_items(["a", "b"]);
    list.press(1, ClickModifiers::NONE);
    list.extend_items(["b", "c"]);
    assert_eq!(list.items(), &["a", "b", "c"]);
    assert_eq!(list.selected_items(), vec!["b"]);
    assert_eq!(list.last_selected_index(), Some(1));
    assert_eq!(list.count_label(), "1/3");
}

#[test]
fn append_load_keeps_selections() {
    let first = tempfile::tempdir().unwrap();
    fs::write(first.path().join("L_1_2_T1_B1_alpha.csv"), "OIS_X\n1\n").unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::write(second.path().join("L_1_2_T1_B1_alpha.csv"), "OIS_X\n1\n").unwrap();
    fs::write(second.path().join("L_1_2_T2_B2_beta.csv"), "OIS_X\n1\n").unwrap();

    let mut catalog = Catalog::new();
    let mut c = SelectionController::new();
    catalog.merge(Catalog::scan(&[first.path()]), LoadMode::Replace);
    c.apply_load(&catalog, LoadMode::Replace);
    c.press_test_name(0);
    c.press_barcode(0, ClickModifiers::NONE, &[first.path()]);
    assert_eq!(c.test_times.selected_items(), vec!["T1"]);

    catalog.merge(Catalog::scan(&[second.path()]), LoadMode::Append);
    c.apply_load(&catalog, LoadMode::Append);

    assert_eq!(c.test_names.items(), &["alpha", "beta"]);
    assert_eq!(c.test_names.selected_items(), vec!["alpha"]);
    assert_eq!(c.barcodes.items(), &["B1", "B2"]);
    assert_eq!(c.barcodes.selected_items(), vec!["B1"]);
    assert_eq!(c.barcode_count_label(), "1/2");
    assert_eq!(c.test_times.selected_items(), vec!["T1"]);
}

#[test]
fn replace_load_starts_over() {
    let dir = log_dir();
    let dirs = [dir.path()];
    let mut c = controller(dir.path());
    c.press_test_name(0);
    c.press_barcode(0, ClickModifiers::NONE, &dirs);

    let mut catalog = Catalog::new();
    catalog.merge(Catalog::scan(&dirs), LoadMode::Replace);
    c.apply_load(&catalog, LoadMode::Replace);

    assert_eq!(c.barcodes.items(), &["B1", "B2", "JH5"]);
    assert_eq!(c.barcode_count_label(), "0/3");
    assert!(c.test_names.selected_items().is_empty());
    assert!(c.test_times.is_empty());
}

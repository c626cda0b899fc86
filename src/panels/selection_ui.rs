use egui::{RichText, ScrollArea, Ui};

use crate::data::selection::{ClickModifiers, SelectionList};

/// A press on a list row together with the held modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListPress {
    pub index: usize,
    pub modifiers: ClickModifiers,
}

/// Scrollable multi-select list with a heading and an optional
/// `"{selected}/{total}"` counter. Selection state is not changed here; the
/// press is returned so the caller can route it through its controller.
pub fn selection_list(
    ui: &mut Ui,
    id_salt: &str,
    heading: &str,
    list: &SelectionList,
    show_count: bool,
) -> Option<ListPress> {
    let mut pressed = None;
    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(heading).strong());
            if show_count {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(list.count_label());
                });
            }
        });
        ui.separator();
        ScrollArea::vertical()
            .id_salt(id_salt)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (i, item) in list.items().iter().enumerate() {
                    if ui.selectable_label(list.is_selected(i), item).clicked() {
                        let modifiers = ui.input(|inp| inp.modifiers);
                        pressed = Some(ListPress {
                            index: i,
                            modifiers: modifiers.into(),
                        });
                    }
                }
            });
    });
    pressed
}

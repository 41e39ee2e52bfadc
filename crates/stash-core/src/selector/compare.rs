//! Compare policy
//!
//! At most two entries are marked at once. Marking a second opens the
//! side-by-side popup; marking a third first unmarks the oldest. The
//! popup is plain state here; the TUI decides how to draw it, and any
//! keypress while it is open returns to normal selection.

use crate::actions::{Action, InputSource};
use crate::item::ItemId;
use crate::preset::{DefaultPreset, SelectorPreset};
use crate::selector::Selector;

pub struct CompareSelector {
    sel: Selector,
    /// Marked items, oldest first; never more than two.
    marked: Vec<ItemId>,
    popup: Option<(ItemId, ItemId)>,
}

impl CompareSelector {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_preset(title, Box::new(DefaultPreset::new()))
    }

    pub fn with_preset(title: impl Into<String>, preset: Box<dyn SelectorPreset>) -> Self {
        CompareSelector {
            sel: Selector::new(title, preset),
            marked: Vec::new(),
            popup: None,
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.sel
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.sel
    }

    pub fn marked(&self) -> &[ItemId] {
        &self.marked
    }

    /// The pair to show side by side, when two entries are marked.
    pub fn popup(&self) -> Option<(ItemId, ItemId)> {
        self.popup
    }

    fn mark(&mut self, id: ItemId) {
        if let Some(pos) = self.marked.iter().position(|&m| m == id) {
            self.marked.remove(pos);
            self.sync_chosen();
            return;
        }
        // a third mark displaces the oldest
        if self.marked.len() == 2 {
            self.marked.remove(0);
        }
        self.marked.push(id);
        self.sync_chosen();
        if let [a, b] = self.marked[..] {
            self.popup = Some((a, b));
        }
    }

    fn sync_chosen(&mut self) {
        let marked = self.marked.clone();
        for column in self.sel.columns_mut() {
            for entry in column.entries_mut() {
                let on = entry
                    .any_item()
                    .is_some_and(|id| marked.contains(&id));
                entry.set_chosen_count(if on { 1 } else { 0 });
            }
        }
    }

    fn toggle_highlighted(&mut self) {
        let Some(id) = self.sel.active_column().highlighted_item() else {
            return;
        };
        self.mark(id);
    }

    /// Blocking loop; returns the last pair shown, or `None` when
    /// nothing was compared before cancelling.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        mut render: impl FnMut(&mut CompareSelector),
    ) -> Option<(ItemId, ItemId)> {
        let mut last = None;
        loop {
            render(&mut *self);
            if let Some(pair) = self.popup.take() {
                last = Some(pair);
                // the popup swallows exactly one action
                let _ = input.next_action();
                continue;
            }
            match input.next_action() {
                Action::ToggleEntry | Action::Confirm => self.toggle_highlighted(),
                Action::Invlet(c) => {
                    if self.sel.select_by_invlet(c) {
                        self.toggle_highlighted();
                    }
                }
                Action::Cancel => return last,
                other => {
                    self.sel.handle_structural(other);
                }
            }
        }
    }
}

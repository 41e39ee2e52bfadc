//! Multi-select policy (drop and friends)
//!
//! Maintains per-entry chosen quantities with the count-then-toggle
//! convention: digits typed before the toggle key set an explicit
//! quantity (clamped to what is available); a bare toggle flips
//! between nothing and everything. A read-only summary column mirrors
//! the current selection for review.

use tracing::debug;

use crate::actions::{Action, InputSource};
use crate::preset::{DefaultPreset, SelectorPreset};
use crate::selector::{Outcome, Selector};

pub struct MultiSelector {
    sel: Selector,
    /// Permit committing an empty selection (used by trade panes).
    allow_empty: bool,
    /// Ran after every toggle; trade panes hook balance updates here.
    on_toggle: Option<Box<dyn FnMut(&Selector)>>,
}

impl MultiSelector {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_preset(title, Box::new(DefaultPreset::new()))
    }

    pub fn with_preset(title: impl Into<String>, preset: Box<dyn SelectorPreset>) -> Self {
        let mut sel = Selector::new(title, preset);
        sel.ensure_summary_column();
        MultiSelector {
            sel,
            allow_empty: false,
            on_toggle: None,
        }
    }

    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn set_on_toggle(&mut self, hook: Box<dyn FnMut(&Selector)>) {
        self.on_toggle = Some(hook);
    }

    pub fn selector(&self) -> &Selector {
        &self.sel
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.sel
    }

    fn after_toggle(&mut self) {
        self.sel.rebuild_summary();
        if let Some(hook) = &mut self.on_toggle {
            hook(&self.sel);
        }
    }

    /// Apply the count-then-toggle convention to the highlighted
    /// entry. Denied entries bounce with their reason.
    pub fn toggle_highlighted(&mut self) {
        let count = self.sel.take_count();
        let Some(entry) = self.sel.active_column_mut().highlighted_entry_mut() else {
            return;
        };
        if let Some(denial) = entry.denial.clone() {
            self.sel.set_prompt(denial);
            return;
        }
        if count == 0 {
            entry.toggle();
        } else {
            entry.set_chosen_count(count);
        }
        debug!(item = ?entry.any_item(), chosen = entry.chosen_count(), "toggled entry");
        self.after_toggle();
    }

    /// Select everything, or clear everything when every selectable
    /// entry is already fully chosen.
    pub fn toggle_all(&mut self) {
        self.sel.take_count();
        let mut all_full = true;
        for column in self.sel.columns() {
            for entry in column.entries() {
                if entry.is_selectable() && !entry.is_denied() && entry.chosen_count() < entry.available
                {
                    all_full = false;
                }
            }
        }
        for i in 0..self.sel.columns().len() {
            if self.sel.columns()[i].role() == crate::column::ColumnRole::Summary {
                continue;
            }
            let pool_len = self.sel.columns()[i].entries().len();
            for j in 0..pool_len {
                let entry = &mut self.sel.columns_mut()[i].entries_mut()[j];
                if !entry.is_selectable() || entry.is_denied() {
                    continue;
                }
                if all_full {
                    entry.set_chosen_count(0);
                } else {
                    let available = entry.available;
                    entry.set_chosen_count(available);
                }
            }
        }
        self.after_toggle();
    }

    /// Blocking loop; commits on confirm with at least one pick
    /// unless empty commits are allowed.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        mut render: impl FnMut(&mut Selector),
    ) -> Outcome {
        loop {
            render(&mut self.sel);
            self.sel.take_prompt();
            match input.next_action() {
                Action::ToggleEntry => self.toggle_highlighted(),
                Action::ToggleAll => self.toggle_all(),
                Action::Invlet(c) => {
                    if self.sel.select_by_invlet(c) {
                        self.toggle_highlighted();
                    }
                }
                Action::Confirm => {
                    let selection = self.sel.commit();
                    if selection.is_empty() && !self.allow_empty {
                        self.sel.set_prompt("Nothing selected.");
                        continue;
                    }
                    return Outcome::Committed(selection);
                }
                Action::Cancel => return Outcome::Cancelled,
                other => {
                    self.sel.handle_structural(other);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ScriptedInput;
    use crate::column::ColumnRole;
    use crate::item::{ItemCategory, ItemFlags, ItemHandle, ItemId};
    use crate::selector::Selection;
    use crate::source::{LocationRef, VecSource};

    fn handle(id: u32, name: &str, count: u32) -> ItemHandle {
        ItemHandle {
            id: ItemId(id),
            kind: name.to_string(),
            name: name.to_string(),
            name_plural: None,
            category: ItemCategory::new("food", "FOOD", 5),
            count,
            charges: None,
            weight_g: 100,
            volume_ml: 100,
            length_mm: 100,
            flags: ItemFlags::empty(),
            invlet: None,
            value: 10,
            capacity: None,
            parent: None,
        }
    }

    fn dropper(counts: &[u32]) -> MultiSelector {
        let mut multi = MultiSelector::new("Multidrop");
        let items = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| handle(i as u32 + 1, &format!("ration {:02}", i + 1), c))
            .collect();
        let src = VecSource::new().with(LocationRef::Character, items);
        multi.selector_mut().add_character_items(&src);
        multi.selector_mut().prepare_layout(80, 24);
        multi
    }

    #[test]
    fn bare_toggle_selects_all_then_none() {
        let mut multi = dropper(&[4]);
        multi.toggle_highlighted();
        let entry = &multi.selector().columns()[0].entries()[0];
        assert_eq!(entry.chosen_count(), 4);
        multi.toggle_highlighted();
        let entry = &multi.selector().columns()[0].entries()[0];
        assert_eq!(entry.chosen_count(), 0);
    }

    #[test]
    fn count_prefix_sets_explicit_quantity() {
        let mut multi = dropper(&[10]);
        multi.selector_mut().handle_structural(Action::Digit(7));
        multi.toggle_highlighted();
        assert_eq!(multi.selector().columns()[0].entries()[0].chosen_count(), 7);
        // count above available clamps
        multi.selector_mut().handle_structural(Action::Digit(9));
        multi.selector_mut().handle_structural(Action::Digit(9));
        multi.toggle_highlighted();
        assert_eq!(
            multi.selector().columns()[0].entries()[0].chosen_count(),
            10
        );
    }

    #[test]
    fn toggle_all_round_trips() {
        let mut multi = dropper(&[1, 1, 1, 1, 1]);
        multi.toggle_all();
        let chosen: Vec<u32> = multi.selector().columns()[0]
            .entries()
            .iter()
            .map(|e| e.chosen_count())
            .collect();
        assert_eq!(chosen, vec![1, 1, 1, 1, 1]);
        multi.toggle_all();
        let chosen: Vec<u32> = multi.selector().columns()[0]
            .entries()
            .iter()
            .map(|e| e.chosen_count())
            .collect();
        assert_eq!(chosen, vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn partial_selection_toggle_all_fills_first() {
        let mut multi = dropper(&[2, 3]);
        multi.selector_mut().handle_structural(Action::Digit(1));
        multi.toggle_highlighted();
        multi.toggle_all();
        let chosen: Vec<u32> = multi.selector().columns()[0]
            .entries()
            .iter()
            .map(|e| e.chosen_count())
            .collect();
        assert_eq!(chosen, vec![2, 3]);
    }

    #[test]
    fn summary_column_mirrors_selection() {
        let mut multi = dropper(&[1, 1]);
        multi.toggle_highlighted();
        let summary = multi.selector().column(ColumnRole::Summary).unwrap();
        assert_eq!(summary.entries().len(), 1);
        multi.toggle_highlighted();
        let summary = multi.selector().column(ColumnRole::Summary).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn empty_confirm_is_soft() {
        let mut multi = dropper(&[1]);
        let mut input = ScriptedInput::new([
            Action::Confirm, // bounces: nothing selected
            Action::ToggleEntry,
            Action::Confirm,
        ]);
        let outcome = multi.run(&mut input, |_| {});
        assert_eq!(
            outcome,
            Outcome::Committed(Selection {
                picks: vec![(ItemId(1), 1)]
            })
        );
    }

    #[test]
    fn denied_entries_never_reach_the_result() {
        let mut multi = dropper(&[1, 1]);
        multi.toggle_all();
        multi.selector_mut().columns_mut()[0].entries_mut()[1].denial =
            Some("bolted down".to_string());
        let mut input = ScriptedInput::new([Action::Confirm]);
        let outcome = multi.run(&mut input, |_| {});
        assert_eq!(
            outcome,
            Outcome::Committed(Selection {
                picks: vec![(ItemId(1), 1)]
            })
        );
    }
}

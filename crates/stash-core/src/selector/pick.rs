//! Pick-one selection policy

use crate::actions::{Action, InputSource};
use crate::item::ItemId;
use crate::preset::{DefaultPreset, SelectorPreset};
use crate::selector::Selector;

/// Selector that yields a single item: the classic "use which item?"
/// prompt. Toggling or confirming on the highlighted entry commits
/// immediately; invlet keys commit directly.
pub struct PickOneSelector {
    sel: Selector,
}

impl PickOneSelector {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_preset(title, Box::new(DefaultPreset::new()))
    }

    pub fn with_preset(title: impl Into<String>, preset: Box<dyn SelectorPreset>) -> Self {
        PickOneSelector {
            sel: Selector::new(title, preset),
        }
    }

    pub fn selector(&self) -> &Selector {
        &self.sel
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        &mut self.sel
    }

    fn try_take_highlighted(&mut self) -> Option<ItemId> {
        let entry = self.sel.active_column().highlighted_entry()?;
        if let Some(denial) = entry.denial.clone() {
            self.sel.set_prompt(denial);
            return None;
        }
        entry.any_item()
    }

    /// Blocking loop: render, read one action, repeat. Returns the
    /// picked item, or `None` on cancel.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        mut render: impl FnMut(&mut Selector),
    ) -> Option<ItemId> {
        loop {
            render(&mut self.sel);
            self.sel.take_prompt();
            match input.next_action() {
                Action::Confirm | Action::ToggleEntry => {
                    if let Some(id) = self.try_take_highlighted() {
                        return Some(id);
                    }
                }
                Action::Invlet(c) => {
                    if self.sel.select_by_invlet(c) {
                        if let Some(id) = self.try_take_highlighted() {
                            return Some(id);
                        }
                    }
                }
                Action::Cancel => return None,
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
    use crate::item::{ItemCategory, ItemFlags, ItemHandle};
    use crate::source::{LocationRef, VecSource};

    fn handle(id: u32, name: &str) -> ItemHandle {
        ItemHandle {
            id: ItemId(id),
            kind: name.to_string(),
            name: name.to_string(),
            name_plural: None,
            category: ItemCategory::new("food", "FOOD", 5),
            count: 1,
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

    fn picker() -> PickOneSelector {
        let mut picker = PickOneSelector::new("Use which item?");
        let src = VecSource::new().with(
            LocationRef::Character,
            vec![handle(1, "aspirin"), handle(2, "bandage")],
        );
        picker.selector_mut().add_character_items(&src);
        picker.selector_mut().prepare_layout(80, 24);
        picker
    }

    #[test]
    fn confirm_returns_highlighted_item() {
        let mut picker = picker();
        let mut input = ScriptedInput::new([Action::Down, Action::Confirm]);
        let picked = picker.run(&mut input, |_| {});
        assert_eq!(picked, Some(ItemId(2)));
    }

    #[test]
    fn invlet_picks_directly() {
        let mut picker = picker();
        let target = picker
            .selector()
            .columns()[0]
            .entries()
            .iter()
            .find(|e| e.any_item() == Some(ItemId(2)))
            .and_then(|e| e.invlet(picker.selector().pool()))
            .unwrap();
        let mut input = ScriptedInput::new([Action::Invlet(target)]);
        assert_eq!(picker.run(&mut input, |_| {}), Some(ItemId(2)));
    }

    #[test]
    fn cancel_returns_none() {
        let mut picker = picker();
        let mut input = ScriptedInput::new([Action::Down, Action::Cancel]);
        assert_eq!(picker.run(&mut input, |_| {}), None);
    }

    #[test]
    fn denied_entry_prompts_instead_of_committing() {
        let mut picker = picker();
        picker.selector_mut().active_column_mut().entries_mut()[0].denial =
            Some("too fragile".to_string());
        // first confirm bounces with a prompt, cancel ends the run
        let mut input = ScriptedInput::new([Action::Home, Action::Confirm, Action::Cancel]);
        assert_eq!(picker.run(&mut input, |_| {}), None);
    }
}

//! Pickup policy
//!
//! Multi-select over nearby items with two immediate side channels:
//! wield and wear the highlighted item right from the list. A direct
//! action removes the item from the pending picks so it cannot also
//! be hauled into the backpack.

use tracing::debug;

use crate::actions::{Action, InputSource};
use crate::item::{ItemFlags, ItemId};
use crate::preset::{DefaultPreset, SelectorPreset};
use crate::selector::{Selection, Selector};

/// An action applied to one item immediately, outside the committed
/// pick list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectAction {
    Wield(ItemId),
    Wear(ItemId),
}

/// Picks to haul plus the direct actions taken along the way. The
/// direct actions already happened from the caller's point of view
/// even when the run ends in a cancel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickupOutcome {
    pub picks: Selection,
    pub direct: Vec<DirectAction>,
}

pub struct PickupSelector {
    multi: super::MultiSelector,
    direct: Vec<DirectAction>,
}

impl PickupSelector {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_preset(title, Box::new(DefaultPreset::new()))
    }

    pub fn with_preset(title: impl Into<String>, preset: Box<dyn SelectorPreset>) -> Self {
        PickupSelector {
            multi: super::MultiSelector::with_preset(title, preset),
            direct: Vec::new(),
        }
    }

    pub fn selector(&self) -> &Selector {
        self.multi.selector()
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        self.multi.selector_mut()
    }

    pub fn direct_actions(&self) -> &[DirectAction] {
        &self.direct
    }

    fn wield_denial(&self, id: ItemId) -> Option<String> {
        let item = self.selector().pool().get(id)?;
        if item.flags.contains(ItemFlags::LIQUID) {
            return Some(format!("Spilt liquid cannot be wielded: {}", item.name));
        }
        if item.flags.contains(ItemFlags::WIELDED) {
            return Some(format!("You are already wielding the {}.", item.name));
        }
        None
    }

    fn wear_denial(&self, id: ItemId) -> Option<String> {
        let item = self.selector().pool().get(id)?;
        if !item.flags.contains(ItemFlags::WEARABLE) {
            return Some(format!("You cannot wear the {}.", item.name));
        }
        if item.flags.contains(ItemFlags::WORN) {
            return Some(format!("You are already wearing the {}.", item.name));
        }
        None
    }

    /// Apply a direct action to the highlighted item. The item leaves
    /// the list; whatever quantity was pending on it is forgotten.
    fn take_direct(&mut self, make: fn(ItemId) -> DirectAction) {
        let Some(id) = self.selector().active_column().highlighted_item() else {
            return;
        };
        let denial = match make(id) {
            DirectAction::Wield(_) => self.wield_denial(id),
            DirectAction::Wear(_) => self.wear_denial(id),
        };
        if let Some(reason) = denial {
            self.selector_mut().set_prompt(reason);
            return;
        }
        debug!(?id, "direct action taken");
        self.direct.push(make(id));
        for column in self.selector_mut().columns_mut() {
            column.remove_entry(id);
        }
        self.selector_mut().rebuild_summary();
    }

    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        mut render: impl FnMut(&mut PickupSelector),
    ) -> PickupOutcome {
        loop {
            render(&mut *self);
            self.selector_mut().take_prompt();
            let action = input.next_action();
            match action {
                Action::Wield => self.take_direct(DirectAction::Wield),
                Action::Wear => self.take_direct(DirectAction::Wear),
                Action::Cancel => {
                    return PickupOutcome {
                        picks: Selection::default(),
                        direct: std::mem::take(&mut self.direct),
                    };
                }
                Action::Confirm => {
                    let picks = self.selector().commit();
                    if picks.is_empty() && self.direct.is_empty() {
                        self.selector_mut().set_prompt("Nothing selected.");
                        continue;
                    }
                    return PickupOutcome {
                        picks,
                        direct: std::mem::take(&mut self.direct),
                    };
                }
                Action::ToggleEntry => self.multi.toggle_highlighted(),
                Action::ToggleAll => self.multi.toggle_all(),
                Action::Invlet(c) => {
                    if self.selector_mut().select_by_invlet(c) {
                        self.multi.toggle_highlighted();
                    }
                }
                other => {
                    self.selector_mut().handle_structural(other);
                }
            }
        }
    }
}

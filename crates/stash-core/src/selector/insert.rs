//! Insert-into-container policy
//!
//! A multi-select bound to one destination container. Feasibility is
//! re-checked per item through [`InsertPreset`]: too big, too long,
//! too heavy or liquid-into-non-watertight all surface as denials on
//! the entry rather than a hard error.

use crate::actions::InputSource;
use crate::item::{ItemHandle, ItemId};
use crate::preset::InsertPreset;
use crate::selector::{MultiSelector, Outcome, Selector};
use crate::source::ItemSource;

pub struct InsertSelector {
    multi: MultiSelector,
    destination: ItemId,
}

impl InsertSelector {
    /// The destination joins the item pool so its capacity is visible
    /// to denial checks and to hierarchy display.
    pub fn new(destination: ItemHandle) -> Self {
        let title = format!("Insert into {}", destination.name);
        let mut multi = MultiSelector::with_preset(title, Box::new(InsertPreset::new()));
        let id = destination.id;
        multi.selector_mut().pool_mut().insert(destination);
        multi.selector_mut().set_destination(id);
        InsertSelector {
            multi,
            destination: id,
        }
    }

    pub fn destination(&self) -> ItemId {
        self.destination
    }

    pub fn selector(&self) -> &Selector {
        self.multi.selector()
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        self.multi.selector_mut()
    }

    pub fn add_character_items(&mut self, source: &dyn ItemSource) {
        self.multi.selector_mut().add_character_items(source);
        self.exclude_destination();
    }

    pub fn add_nearby_items(&mut self, source: &dyn ItemSource, radius: u32) {
        self.multi.selector_mut().add_nearby_items(source, radius);
        self.exclude_destination();
    }

    /// The container must not be offered for insertion into itself.
    fn exclude_destination(&mut self) {
        let dest = self.destination;
        for column in self.multi.selector_mut().columns_mut() {
            column.remove_entry(dest);
        }
    }

    pub fn prepare_layout(&mut self, width: u16, height: u16) {
        self.multi.selector_mut().prepare_layout(width, height);
    }

    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        render: impl FnMut(&mut Selector),
    ) -> Outcome {
        self.multi.selector_mut().refresh_denials();
        self.multi.run(input, render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, ScriptedInput};
    use crate::item::{Capacity, ItemCategory, ItemFlags};
    use crate::selector::Selection;
    use crate::source::{LocationRef, VecSource};

    fn handle(id: u32, name: &str, volume_ml: u32) -> ItemHandle {
        ItemHandle {
            id: ItemId(id),
            kind: name.to_string(),
            name: name.to_string(),
            name_plural: None,
            category: ItemCategory::new("tools", "TOOLS", 10),
            count: 1,
            charges: None,
            weight_g: 100,
            volume_ml,
            length_mm: 100,
            flags: ItemFlags::empty(),
            invlet: None,
            value: 10,
            capacity: None,
            parent: None,
        }
    }

    fn satchel() -> ItemHandle {
        let mut satchel = handle(99, "satchel", 1000);
        satchel.capacity = Some(Capacity {
            volume_ml: 2000,
            weight_g: 4000,
            max_length_mm: 400,
            watertight: false,
        });
        satchel
    }

    #[test]
    fn oversized_items_are_denied_not_hidden() {
        let mut ins = InsertSelector::new(satchel());
        let src = VecSource::new().with(
            LocationRef::Character,
            vec![handle(1, "matchbook", 20), handle(2, "jerrycan", 9000)],
        );
        ins.add_character_items(&src);
        ins.prepare_layout(80, 24);
        let gear = &ins.selector().columns()[0];
        assert_eq!(gear.entries().len(), 2);
        let jerrycan = gear
            .entries()
            .iter()
            .find(|e| e.any_item() == Some(ItemId(2)))
            .unwrap();
        assert!(jerrycan.is_denied());
    }

    #[test]
    fn liquid_into_dry_container_spills() {
        let mut ins = InsertSelector::new(satchel());
        let mut water = handle(1, "water", 250);
        water.flags |= ItemFlags::LIQUID;
        let src = VecSource::new().with(LocationRef::Character, vec![water]);
        ins.add_character_items(&src);
        ins.prepare_layout(80, 24);
        let entry = &ins.selector().columns()[0].entries()[0];
        assert_eq!(entry.denial.as_deref(), Some("water would spill"));
    }

    #[test]
    fn destination_never_lists_itself() {
        let mut ins = InsertSelector::new(satchel());
        let src = VecSource::new().with(
            LocationRef::Character,
            vec![handle(1, "matchbook", 20), satchel()],
        );
        ins.add_character_items(&src);
        ins.prepare_layout(80, 24);
        assert!(
            ins.selector().columns()[0]
                .entries()
                .iter()
                .all(|e| e.any_item() != Some(ItemId(99)))
        );
    }

    #[test]
    fn run_commits_only_what_fits() {
        let mut ins = InsertSelector::new(satchel());
        let src = VecSource::new().with(
            LocationRef::Character,
            vec![handle(1, "matchbook", 20), handle(2, "jerrycan", 9000)],
        );
        ins.add_character_items(&src);
        ins.prepare_layout(80, 24);
        let mut input = ScriptedInput::new([Action::ToggleAll, Action::Confirm]);
        let outcome = ins.run(&mut input, |_| {});
        assert_eq!(
            outcome,
            Outcome::Committed(Selection {
                picks: vec![(ItemId(1), 1)]
            })
        );
    }
}

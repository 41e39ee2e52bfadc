//! Two-party trade session
//!
//! Two multi-select panes, one per party, with a running balance over
//! the marked goods. The session is a small state machine: it stays
//! active until a confirmed exchange passes the counterparty's
//! acceptance threshold and capacity, or either side walks away.

use tracing::{debug, info};

use crate::actions::{Action, InputSource};
use crate::item::ItemId;
use crate::preset::TradePreset;
use crate::selector::{MultiSelector, Selection, Selector};

/// Static description of one side of the table.
#[derive(Debug, Clone)]
pub struct TradeParty {
    pub name: String,
    /// Allies barter freely: the balance reads zero and no threshold
    /// applies.
    pub barters_freely: bool,
    /// Lowest balance (from this party's credit side) the party will
    /// still accept.
    pub min_balance: i64,
    /// Carry limits for incoming goods.
    pub volume_capacity_ml: u64,
    pub weight_capacity_g: u64,
}

impl TradeParty {
    pub fn new(name: impl Into<String>) -> Self {
        TradeParty {
            name: name.into(),
            barters_freely: false,
            min_balance: 0,
            volume_capacity_ml: u64::MAX,
            weight_capacity_g: u64::MAX,
        }
    }

    pub fn barters_freely(mut self, free: bool) -> Self {
        self.barters_freely = free;
        self
    }

    pub fn min_balance(mut self, min: i64) -> Self {
        self.min_balance = min;
        self
    }

    pub fn capacity(mut self, volume_ml: u64, weight_g: u64) -> Self {
        self.volume_capacity_ml = volume_ml;
        self.weight_capacity_g = weight_g;
        self
    }
}

/// One side's list plus the party behind it.
pub struct TradePane {
    multi: MultiSelector,
    party: TradeParty,
    /// Barter value of the pane's current picks, updated after every
    /// toggle.
    value: i64,
}

impl TradePane {
    pub fn new(party: TradeParty) -> Self {
        let title = format!("{} offers", party.name);
        let multi =
            MultiSelector::with_preset(title, Box::new(TradePreset::new())).allow_empty(true);
        TradePane {
            multi,
            party,
            value: 0,
        }
    }

    pub fn party(&self) -> &TradeParty {
        &self.party
    }

    pub fn offered_value(&self) -> i64 {
        self.value
    }

    pub fn selector(&self) -> &Selector {
        self.multi.selector()
    }

    pub fn selector_mut(&mut self) -> &mut Selector {
        self.multi.selector_mut()
    }

    fn picks(&self) -> Selection {
        self.multi.selector().commit()
    }

    fn recalc_value(&mut self) {
        let pool = self.multi.selector().pool();
        self.value = self
            .picks()
            .picks
            .iter()
            .filter_map(|(id, qty)| pool.get(*id).map(|item| item.value * *qty as i64))
            .sum();
    }

    /// (volume_ml, weight_g) totals of the current picks.
    fn picked_bulk(&self) -> (u64, u64) {
        let pool = self.multi.selector().pool();
        self.picks()
            .picks
            .iter()
            .filter_map(|(id, qty)| pool.get(*id).map(|item| (item, *qty as u64)))
            .fold((0, 0), |(v, w), (item, qty)| {
                (v + item.volume_ml as u64 * qty, w + item.weight_g as u64 * qty)
            })
    }
}

/// Result of a committed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeResult {
    /// Goods leaving pane 0's party, as (item, quantity).
    pub from_first: Vec<(ItemId, u32)>,
    /// Goods leaving pane 1's party.
    pub from_second: Vec<(ItemId, u32)>,
    /// Final balance; positive means pane 0's side offered more.
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeOutcome {
    Committed(TradeResult),
    Cancelled,
}

pub struct TradeSession {
    panes: [TradePane; 2],
    active: usize,
    /// Debt carried into the trade from earlier dealings; folded into
    /// the balance.
    initial_debt: i64,
    prompt: Option<String>,
}

impl TradeSession {
    pub fn new(first: TradePane, second: TradePane) -> Self {
        TradeSession {
            panes: [first, second],
            active: 0,
            initial_debt: 0,
            prompt: None,
        }
    }

    pub fn with_initial_debt(mut self, debt: i64) -> Self {
        self.initial_debt = debt;
        self
    }

    pub fn panes(&self) -> &[TradePane; 2] {
        &self.panes
    }

    pub fn panes_mut(&mut self) -> &mut [TradePane; 2] {
        &mut self.panes
    }

    pub fn active_pane(&self) -> &TradePane {
        &self.panes[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Positive favors the second party: the first side is offering
    /// more than it receives. A free-bartering party flattens the
    /// balance to zero.
    pub fn balance(&self) -> i64 {
        if self.panes.iter().any(|p| p.party.barters_freely) {
            return 0;
        }
        self.panes[0].value - self.panes[1].value + self.initial_debt
    }

    pub fn recalc_values(&mut self) {
        for pane in &mut self.panes {
            pane.recalc_value();
        }
        debug!(balance = self.balance(), "trade balance updated");
    }

    pub fn prepare_layout(&mut self, width: u16, height: u16) {
        let half = width / 2;
        self.panes[0].selector_mut().prepare_layout(half, height);
        self.panes[1]
            .selector_mut()
            .prepare_layout(width - half, height);
    }

    fn switch_pane(&mut self) {
        self.active = 1 - self.active;
    }

    /// Check the acceptance policy. The second party is the
    /// counterparty whose threshold and capacity gate the deal.
    fn try_confirm(&self) -> Result<TradeResult, String> {
        let balance = self.balance();
        let counterparty = &self.panes[1].party;
        if !counterparty.barters_freely && balance < counterparty.min_balance {
            return Err(format!(
                "{} is not willing to trade at this price.",
                counterparty.name
            ));
        }
        // each side must be able to carry what it receives
        for (receiver, giver) in [(1usize, 0usize), (0, 1)] {
            let (volume, weight) = self.panes[giver].picked_bulk();
            let party = &self.panes[receiver].party;
            if volume > party.volume_capacity_ml {
                return Err(format!("{} cannot carry that much volume.", party.name));
            }
            if weight > party.weight_capacity_g {
                return Err(format!("{} cannot carry that much weight.", party.name));
            }
        }
        Ok(TradeResult {
            from_first: self.panes[0].picks().picks,
            from_second: self.panes[1].picks().picks,
            balance,
        })
    }

    /// Blocking loop over both panes. `Switch` moves between panes,
    /// `Confirm` attempts the exchange, `Cancel` walks away.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        mut render: impl FnMut(&mut TradeSession),
    ) -> TradeOutcome {
        self.recalc_values();
        loop {
            render(&mut *self);
            self.prompt = None;
            match input.next_action() {
                Action::Switch | Action::NextColumn | Action::PrevColumn => self.switch_pane(),
                Action::ToggleEntry => {
                    self.panes[self.active].multi.toggle_highlighted();
                    self.recalc_values();
                }
                Action::ToggleAll => {
                    self.panes[self.active].multi.toggle_all();
                    self.recalc_values();
                }
                Action::Invlet(c) => {
                    if self.panes[self.active].selector_mut().select_by_invlet(c) {
                        self.panes[self.active].multi.toggle_highlighted();
                        self.recalc_values();
                    }
                }
                Action::Confirm => match self.try_confirm() {
                    Ok(result) => {
                        info!(balance = result.balance, "trade committed");
                        return TradeOutcome::Committed(result);
                    }
                    Err(reason) => self.prompt = Some(reason),
                },
                Action::Cancel => return TradeOutcome::Cancelled,
                Action::Resize { width, height } => self.prepare_layout(width, height),
                other => {
                    self.panes[self.active].selector_mut().handle_structural(other);
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

    fn ware(id: u32, name: &str, value: i64) -> ItemHandle {
        ItemHandle {
            id: ItemId(id),
            kind: name.to_string(),
            name: name.to_string(),
            name_plural: None,
            category: ItemCategory::new("goods", "GOODS", 7),
            count: 1,
            charges: None,
            weight_g: 500,
            volume_ml: 500,
            length_mm: 200,
            flags: ItemFlags::empty(),
            invlet: None,
            value,
            capacity: None,
            parent: None,
        }
    }

    fn pane(party: TradeParty, wares: Vec<ItemHandle>) -> TradePane {
        let mut pane = TradePane::new(party);
        let src = VecSource::new().with(LocationRef::Character, wares);
        pane.selector_mut().add_character_items(&src);
        pane
    }

    fn session() -> TradeSession {
        let first = pane(
            TradeParty::new("You"),
            vec![ware(1, "rifle", 120), ware(2, "ammo", 30)],
        );
        let second = pane(
            TradeParty::new("Marlo"),
            vec![ware(10, "jerky", 50), ware(11, "rope", 15)],
        );
        let mut session = TradeSession::new(first, second);
        session.prepare_layout(160, 24);
        session
    }

    #[test]
    fn balance_is_first_minus_second() {
        let mut session = session();
        session.panes[0].selector_mut().columns_mut()[0].entries_mut()[0].toggle(); // rifle 120
        session.panes[1].selector_mut().columns_mut()[0].entries_mut()[0].toggle(); // jerky 50
        session.recalc_values();
        assert_eq!(session.balance(), 70);
    }

    #[test]
    fn initial_debt_shifts_the_balance() {
        let mut session = session().with_initial_debt(-70);
        session.panes[0].selector_mut().columns_mut()[0].entries_mut()[0].toggle();
        session.panes[1].selector_mut().columns_mut()[0].entries_mut()[0].toggle();
        session.recalc_values();
        assert_eq!(session.balance(), 0);
    }

    #[test]
    fn unbalanced_confirm_bounces_with_a_reason() {
        let mut session = session();
        // offer nothing, ask for jerky: balance -50, Marlo refuses
        let mut input = ScriptedInput::new([
            Action::Switch,
            Action::ToggleEntry, // highlight starts on jerky (value sort)
            Action::Confirm,
            Action::Cancel,
        ]);
        let outcome = session.run(&mut input, |_| {});
        assert_eq!(outcome, TradeOutcome::Cancelled);
    }

    #[test]
    fn acceptable_exchange_commits_both_sides() {
        let mut session = session();
        let mut input = ScriptedInput::new([
            Action::ToggleEntry, // rifle, 120 (most valuable first)
            Action::Switch,
            Action::ToggleEntry, // jerky, 50
            Action::Confirm,
        ]);
        let outcome = session.run(&mut input, |_| {});
        assert_eq!(
            outcome,
            TradeOutcome::Committed(TradeResult {
                from_first: vec![(ItemId(1), 1)],
                from_second: vec![(ItemId(10), 1)],
                balance: 70,
            })
        );
    }

    #[test]
    fn free_barter_skips_the_threshold() {
        let first = pane(TradeParty::new("You"), vec![ware(1, "rifle", 120)]);
        let second = pane(
            TradeParty::new("Ally").barters_freely(true),
            vec![ware(10, "jerky", 50)],
        );
        let mut session = TradeSession::new(first, second);
        session.prepare_layout(160, 24);
        // take the jerky for nothing
        let mut input = ScriptedInput::new([Action::Switch, Action::ToggleEntry, Action::Confirm]);
        let outcome = session.run(&mut input, |_| {});
        assert_eq!(
            outcome,
            TradeOutcome::Committed(TradeResult {
                from_first: vec![],
                from_second: vec![(ItemId(10), 1)],
                balance: 0,
            })
        );
    }

    #[test]
    fn capacity_limits_incoming_goods() {
        let first = pane(
            TradeParty::new("You").capacity(100, 100_000),
            vec![ware(1, "rifle", 120)],
        );
        // jerky is 500 ml, over your 100 ml of free space
        let second = pane(TradeParty::new("Marlo"), vec![ware(10, "jerky", 50)]);
        let mut session = TradeSession::new(first, second);
        session.prepare_layout(160, 24);
        let mut input = ScriptedInput::new([
            Action::ToggleEntry,
            Action::Switch,
            Action::ToggleEntry,
            Action::Confirm,
            Action::Cancel,
        ]);
        assert_eq!(session.run(&mut input, |_| {}), TradeOutcome::Cancelled);
    }
}

//! Property tests over the engine's structural invariants.

use proptest::prelude::*;

use stash_core::cache::CellCache;
use stash_core::render::trim_to_width;
use stash_core::{
    Action, Column, ColumnRole, DefaultPreset, Entry, Filter, ItemCategory, ItemFlags, ItemHandle,
    ItemId, ItemPool, Line, LocationRef, MultiSelector, TradePane, TradeParty, TradeSession,
    VecSource,
};
use unicode_width::UnicodeWidthStr;

fn item(id: u32, name: &str, cat: usize) -> ItemHandle {
    let cats = ["FOOD", "TOOLS", "CLOTHING", "WEAPONS"];
    let label = cats[cat % cats.len()];
    ItemHandle {
        id: ItemId(id),
        kind: name.to_string(),
        name: name.to_string(),
        name_plural: None,
        category: ItemCategory::new(label.to_lowercase(), label, cat as i32),
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

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}( [a-z]{1,8})?"
}

proptest! {
    /// However the entries land, a prepared column never shows two
    /// adjacent headers and never opens a category without an entry.
    #[test]
    fn headers_always_introduce_entries(
        names in prop::collection::vec(name_strategy(), 1..40),
        cats in prop::collection::vec(0usize..4, 1..40),
    ) {
        let mut pool = ItemPool::new();
        let mut column = Column::new(ColumnRole::Gear);
        column.set_height(6);
        for (i, name) in names.iter().enumerate() {
            let cat = cats[i % cats.len()];
            let handle = item(i as u32 + 1, name, cat);
            pool.insert(handle.clone());
            let mut entry = Entry::new(vec![handle.id], &handle, i as u64);
            entry.category = Some(handle.category.id.clone());
            column.add_entry(entry, handle.category.clone());
        }
        let preset = DefaultPreset::new();
        let mut cache = CellCache::new();
        column.prepare_paging(&Filter::default(), &pool, &preset, &mut cache);

        let lines = column.lines();
        for pair in lines.windows(2) {
            if matches!(pair[0], Line::Header(_)) {
                prop_assert!(
                    matches!(pair[1], Line::Entry(_)),
                    "header not followed by an entry"
                );
            }
        }
        if let Some(first) = lines.first() {
            prop_assert!(matches!(first, Line::Header(_)));
        }
    }

    /// Moving down as many times as there are selectable entries
    /// returns the highlight to where it started.
    #[test]
    fn downward_navigation_wraps_exactly(
        names in prop::collection::vec(name_strategy(), 1..25),
    ) {
        let mut multi = MultiSelector::new("nav");
        let items: Vec<ItemHandle> = names
            .iter()
            .enumerate()
            .map(|(i, name)| item(i as u32 + 1, name, i))
            .collect();
        let n = items.len();
        let src = VecSource::new().with(LocationRef::Character, items);
        multi.selector_mut().add_character_items(&src);
        multi.selector_mut().prepare_layout(80, 24);

        let start = multi.selector().active_column().highlighted_item();
        prop_assert!(start.is_some());
        for _ in 0..n {
            multi.selector_mut().handle_structural(Action::Down);
        }
        prop_assert_eq!(
            multi.selector().active_column().highlighted_item(),
            start
        );
    }

    /// Trimmed text never exceeds the requested display width.
    #[test]
    fn trimming_respects_display_width(
        text in "\\PC{0,60}",
        width in 0usize..40,
    ) {
        let trimmed = trim_to_width(&text, width);
        prop_assert!(trimmed.width() <= width);
    }

    /// The balance is exactly the difference of the offered values.
    #[test]
    fn trade_balance_is_the_value_difference(
        yours in prop::collection::vec(1i64..10_000, 0..8),
        theirs in prop::collection::vec(1i64..10_000, 0..8),
        debt in -5_000i64..5_000,
    ) {
        let build = |name: &str, values: &[i64], base: u32| {
            let mut pane = TradePane::new(TradeParty::new(name));
            let items: Vec<ItemHandle> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    let mut it = item(base + i as u32, &format!("ware {i}"), i);
                    it.value = v;
                    it
                })
                .collect();
            let src = VecSource::new().with(LocationRef::Character, items);
            pane.selector_mut().add_character_items(&src);
            pane.selector_mut().prepare_layout(80, 24);
            for entry in pane.selector_mut().columns_mut()[0].entries_mut() {
                entry.toggle();
            }
            pane
        };
        let mut session = TradeSession::new(
            build("a", &yours, 1),
            build("b", &theirs, 1000),
        )
        .with_initial_debt(debt);
        session.recalc_values();
        let expected = yours.iter().sum::<i64>() - theirs.iter().sum::<i64>() + debt;
        prop_assert_eq!(session.balance(), expected);
    }
}

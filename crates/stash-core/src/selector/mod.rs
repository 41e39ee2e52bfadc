//! Selectors
//!
//! The base [`Selector`] composes columns into a screen, owns the
//! filter and navigation modes, ingests items from sources, and
//! handles the structural half of the input alphabet. Selection
//! policy (pick one, multi-select, compare, pickup, insert, trade
//! pane) is layered on top by the variants in this module.

pub mod compare;
pub mod insert;
pub mod multi;
pub mod pick;
pub mod pickup;

pub use compare::CompareSelector;
pub use insert::InsertSelector;
pub use multi::MultiSelector;
pub use pick::PickOneSelector;
pub use pickup::{DirectAction, PickupOutcome, PickupSelector};

use tracing::debug;

use crate::actions::{Action, FilterEdit};
use crate::cache::CellCache;
use crate::column::{Column, ColumnRole, Scroll};
use crate::entry::Entry;
use crate::filter::Filter;
use crate::item::{InvletPool, ItemCategory, ItemFlags, ItemId, ItemPool};
use crate::preset::{
    PresetContext, SelectorPreset, cache_denial, format_value, format_volume, format_weight,
};
use crate::source::{ItemSource, LocationRef};
use crate::uistate::UiState;

/// Item-at-a-time vs category-at-a-time cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    #[default]
    Item,
    Category,
}

/// Committed result of a selector run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// (item, quantity) pairs, denial-free by construction.
    pub picks: Vec<(ItemId, u32)>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

/// Final outcome of a selector run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(Selection),
    Cancelled,
}

/// Laid-out snapshot of one populated column, ready to paint.
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub role: ColumnRole,
    pub width: usize,
    pub pages: usize,
    pub page_index: usize,
    pub active: bool,
    pub rows: Vec<crate::render::DisplayRow>,
}

/// Rows consumed by borders, title, stats and footer when the
/// selector carves column heights out of the screen.
const CHROME_ROWS: usize = 6;
/// Gap between adjacent columns.
const COLUMN_GAP: usize = 2;

pub struct Selector {
    title: String,
    pool: ItemPool,
    columns: Vec<Column>,
    active: usize,
    preset: Box<dyn SelectorPreset>,
    cache: CellCache,
    filter: Filter,
    /// In-progress filter text while the user is editing.
    filter_draft: Option<String>,
    nav_mode: NavigationMode,
    hierarchy: bool,
    /// Group adjacent identical stacks under collapsible headers.
    collation: bool,
    /// Numeric prefix accumulator for count-then-toggle.
    count: u32,
    width: u16,
    height: u16,
    next_generation: u64,
    prompt: Option<String>,
    /// Destination container for insert-style denial checks.
    destination: Option<ItemId>,
}

impl Selector {
    pub fn new(title: impl Into<String>, preset: Box<dyn SelectorPreset>) -> Self {
        Selector {
            title: title.into(),
            pool: ItemPool::new(),
            columns: vec![
                Column::new(ColumnRole::Gear),
                Column::new(ColumnRole::Worn),
                Column::new(ColumnRole::Nearby),
            ],
            active: 0,
            preset,
            cache: CellCache::new(),
            filter: Filter::default(),
            filter_draft: None,
            nav_mode: NavigationMode::default(),
            hierarchy: false,
            collation: false,
            count: 0,
            width: 80,
            height: 24,
            next_generation: 0,
            prompt: None,
            destination: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ItemPool {
        &mut self.pool
    }

    pub fn preset(&self) -> &dyn SelectorPreset {
        self.preset.as_ref()
    }

    pub fn cache_mut(&mut self) -> &mut CellCache {
        &mut self.cache
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, role: ColumnRole) -> Option<&Column> {
        self.columns.iter().find(|c| c.role() == role)
    }

    fn column_mut(&mut self, role: ColumnRole) -> &mut Column {
        let idx = self
            .columns
            .iter()
            .position(|c| c.role() == role)
            .expect("selector always owns its standard columns");
        &mut self.columns[idx]
    }

    pub fn active_column(&self) -> &Column {
        &self.columns[self.active]
    }

    pub fn active_column_mut(&mut self) -> &mut Column {
        &mut self.columns[self.active]
    }

    pub fn navigation_mode(&self) -> NavigationMode {
        self.nav_mode
    }

    pub fn in_hierarchy_mode(&self) -> bool {
        self.hierarchy
    }

    pub fn filter_text(&self) -> &str {
        self.filter_draft.as_deref().unwrap_or_else(|| self.filter.raw())
    }

    pub fn is_editing_filter(&self) -> bool {
        self.filter_draft.is_some()
    }

    pub fn pending_count(&self) -> u32 {
        self.count
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = Some(text.into());
    }

    pub fn take_prompt(&mut self) -> Option<String> {
        self.prompt.take()
    }

    /// Group adjacent identical stacks under collapsible headers on
    /// the next prepare.
    pub fn set_collation(&mut self, on: bool) {
        self.collation = on;
    }

    /// Use `destination`'s capacity for containment denials. The item
    /// must already be in the pool.
    pub fn set_destination(&mut self, destination: ItemId) {
        debug_assert!(self.pool.get(destination).is_some());
        self.destination = Some(destination);
    }

    fn preset_context(&self) -> PresetContext<'_> {
        match self.destination.and_then(|id| self.pool.get(id)) {
            Some(dest) => PresetContext::with_destination(&self.pool, dest),
            None => PresetContext::new(&self.pool),
        }
    }

    /// Category an item files under given the current display mode.
    fn category_for(&self, item: &crate::item::ItemHandle, loc: LocationRef) -> ItemCategory {
        if !self.hierarchy {
            return item.category.clone();
        }
        if let Some(parent) = item.parent.and_then(|id| self.pool.get(id)) {
            let loc_cat = loc.category();
            return ItemCategory::new(
                format!("in_{}", parent.kind),
                format!("IN {}", parent.name.to_uppercase()),
                loc_cat.rank + 1,
            );
        }
        loc.category()
    }

    fn role_for(loc: LocationRef) -> ColumnRole {
        match loc {
            LocationRef::Character => ColumnRole::Gear,
            LocationRef::Worn | LocationRef::Wielded => ColumnRole::Worn,
            LocationRef::MapTile { .. } | LocationRef::VehicleCargo { .. } => ColumnRole::Nearby,
        }
    }

    fn ingest(&mut self, source: &dyn ItemSource, loc: LocationRef) {
        let items = source.items(loc);
        debug!(location = %loc.kind(), count = items.len(), "ingesting items");
        for item in items {
            self.pool.insert(item.clone());
            let category = self.category_for(&item, loc);
            let generation = self.next_generation;
            self.next_generation += 1;
            let mut entry = Entry::new(vec![item.id], &item, generation).with_location(loc);
            entry.category = Some(category.id.clone());
            if self.hierarchy {
                entry.indent = self.pool.nesting_depth(item.id);
            }
            let ctx = self.preset_context();
            cache_denial(&mut entry, self.preset.as_ref(), &ctx);
            self.column_mut(Self::role_for(loc)).add_entry(entry, category);
        }
    }

    /// Pull carried, worn and wielded items from the character.
    pub fn add_character_items(&mut self, source: &dyn ItemSource) {
        self.ingest(source, LocationRef::Character);
        self.ingest(source, LocationRef::Wielded);
        self.ingest(source, LocationRef::Worn);
    }

    /// Pull items from one map tile.
    pub fn add_map_items(&mut self, source: &dyn ItemSource, dx: i32, dy: i32) {
        self.ingest(source, LocationRef::MapTile { dx, dy });
    }

    /// Pull items from one vehicle cargo part.
    pub fn add_vehicle_items(&mut self, source: &dyn ItemSource, part: u32) {
        self.ingest(source, LocationRef::VehicleCargo { part });
    }

    /// Pull items from every tile holding any within `radius`.
    pub fn add_nearby_items(&mut self, source: &dyn ItemSource, radius: u32) {
        for loc in source.tiles_with_items(radius) {
            self.ingest(source, loc);
        }
    }

    /// Drop everything and re-pull from the given sources; used after
    /// an action that rearranged the world mid-session.
    pub fn clear_items(&mut self) {
        self.pool.clear();
        self.cache.clear();
        for column in &mut self.columns {
            column.clear();
        }
    }

    /// Re-run the visible partition, sort and pagination everywhere.
    /// The summary column ignores the text filter; it mirrors the
    /// selection, which must stay reviewable while filtering.
    pub fn prepare_all(&mut self) {
        let unfiltered = Filter::default();
        for column in &mut self.columns {
            if self.collation && column.role() != ColumnRole::Summary {
                column.collate(&self.pool, self.preset.as_ref());
            }
            let filter = if column.role() == ColumnRole::Summary {
                &unfiltered
            } else {
                &self.filter
            };
            column.prepare_paging(filter, &self.pool, self.preset.as_ref(), &mut self.cache);
        }
        if !self.columns[self.active].is_activatable() {
            self.activate_next(1);
        }
    }

    /// Add the read-only selection-summary column if missing.
    pub fn ensure_summary_column(&mut self) {
        if self.column(ColumnRole::Summary).is_none() {
            let mut column = Column::new(ColumnRole::Summary);
            column.set_navigable(false);
            self.columns.push(column);
        }
    }

    /// Mirror the current selection into the summary column.
    pub fn rebuild_summary(&mut self) {
        if self.column(ColumnRole::Summary).is_none() {
            return;
        }
        let mut mirrored: Vec<(Entry, ItemCategory)> = Vec::new();
        for column in &self.columns {
            if column.role() == ColumnRole::Summary {
                continue;
            }
            for entry in column.entries() {
                if entry.is_chosen() && !entry.is_denied() {
                    let category = entry
                        .category
                        .as_ref()
                        .and_then(|id| column.category(id))
                        .cloned()
                        .unwrap_or_else(|| ItemCategory::new("misc", "MISC", i32::MAX));
                    mirrored.push((entry.clone(), category));
                }
            }
        }
        let summary = self.column_mut(ColumnRole::Summary);
        summary.clear();
        for (entry, category) in mirrored {
            summary.add_entry(entry, category);
        }
        self.prepare_all();
    }

    /// Fit columns to the available screen estate.
    ///
    /// Overflowing secondary columns are merged into the primary one;
    /// a lone populated column close to the full width is expanded to
    /// fill it. Entries without a quick-select letter get one.
    pub fn prepare_layout(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let column_height = (height as usize).saturating_sub(CHROME_ROWS).max(2);
        for column in &mut self.columns {
            column.set_height(column_height);
        }
        self.prepare_all();

        let budget = width as usize;
        loop {
            let mut widths: Vec<(usize, usize)> = Vec::new();
            for i in 0..self.columns.len() {
                if self.columns[i].is_empty() {
                    continue;
                }
                let w = self.columns[i].preferred_width(
                    &self.pool,
                    self.preset.as_ref(),
                    &mut self.cache,
                );
                widths.push((i, w));
            }
            let populated = widths.len();
            let total: usize =
                widths.iter().map(|(_, w)| w).sum::<usize>() + COLUMN_GAP * populated.saturating_sub(1);
            if total <= budget || populated <= 1 {
                for (i, w) in &widths {
                    self.columns[*i].set_width((*w).min(budget));
                }
                if populated == 1 {
                    let (i, w) = widths[0];
                    // a lone column occupying most of the screen gets all of it
                    if w * 3 >= budget * 2 {
                        self.columns[i].set_width(budget);
                    }
                }
                break;
            }
            self.rearrange_columns();
        }
        self.assign_invlets();
        self.prepare_all();
        debug!(width, height, "layout prepared");
    }

    /// Merge the least important populated secondary column into the
    /// primary gear column.
    fn rearrange_columns(&mut self) {
        let victim = [ColumnRole::Nearby, ColumnRole::Worn, ColumnRole::Summary]
            .into_iter()
            .find(|role| self.column(*role).is_some_and(|c| !c.is_empty()));
        let Some(role) = victim else {
            return;
        };
        debug!(?role, "merging column into primary");
        let (entries, categories) = self.column_mut(role).drain();
        let gear = self.column_mut(ColumnRole::Gear);
        for cat in categories {
            gear.register_category(cat);
        }
        for entry in entries {
            let category = entry
                .category
                .as_ref()
                .and_then(|id| gear.category(id).cloned())
                .unwrap_or_else(|| ItemCategory::new("misc", "MISC", i32::MAX));
            gear.add_entry(entry, category);
        }
        if !self.columns[self.active].is_activatable() {
            self.active = 0;
        }
        self.prepare_all();
    }

    /// Give every entry lacking a quick-select letter a free one.
    fn assign_invlets(&mut self) {
        let mut pool_letters = InvletPool::new();
        for column in &self.columns {
            for entry in column.entries() {
                if let Some(c) = entry.invlet(&self.pool) {
                    pool_letters.claim(c);
                }
            }
        }
        for column in &mut self.columns {
            for entry in column.entries_mut() {
                if entry.is_selectable() && entry.invlet(&self.pool).is_none() {
                    entry.custom_invlet = pool_letters.next_free();
                }
            }
        }
    }

    /// Switch between hierarchy and flat category organization,
    /// keeping the highlighted item when both views contain it.
    pub fn toggle_categorize_contained(&mut self) {
        self.hierarchy = !self.hierarchy;
        debug!(hierarchy = self.hierarchy, "switching display organization");
        for i in 0..self.columns.len() {
            for j in 0..self.columns[i].entries().len() {
                let entry = &self.columns[i].entries()[j];
                let Some(loc) = entry.location else { continue };
                let Some(item) = entry.lead(&self.pool).cloned() else {
                    continue;
                };
                let category = self.category_for(&item, loc);
                let indent = if self.hierarchy {
                    self.pool.nesting_depth(item.id)
                } else {
                    0
                };
                let entry = &mut self.columns[i].entries_mut()[j];
                entry.category = Some(category.id.clone());
                entry.indent = indent;
                self.columns[i].register_category(category);
            }
        }
        self.prepare_all();
    }

    fn activate_next(&mut self, dir: i32) {
        let n = self.columns.len();
        for step in 1..=n {
            let idx = if dir >= 0 {
                (self.active + step) % n
            } else {
                (self.active + n - step % n) % n
            };
            if self.columns[idx].is_activatable() {
                self.active = idx;
                return;
            }
        }
    }

    /// Take and reset the numeric prefix.
    pub fn take_count(&mut self) -> u32 {
        std::mem::take(&mut self.count)
    }

    /// Highlight the entry bound to `c` in whichever column holds it,
    /// activating that column.
    pub fn select_by_invlet(&mut self, c: char) -> bool {
        for idx in 0..self.columns.len() {
            if self.columns[idx].select_by_invlet(c, &self.pool) {
                self.active = idx;
                return true;
            }
        }
        false
    }

    /// Refresh cached denials after a state change.
    pub fn refresh_denials(&mut self) {
        for i in 0..self.columns.len() {
            for j in 0..self.columns[i].entries().len() {
                let Some(item) = self.columns[i].entries()[j].lead(&self.pool).cloned() else {
                    continue;
                };
                let denial = match self.destination.and_then(|id| self.pool.get(id)) {
                    Some(dest) => self
                        .preset
                        .denial(&item, &PresetContext::with_destination(&self.pool, dest)),
                    None => self.preset.denial(&item, &PresetContext::new(&self.pool)),
                };
                self.columns[i].entries_mut()[j].denial = denial;
            }
        }
    }

    /// Apply persisted preferences: display modes and the letters
    /// previously bound to item kinds. Call after ingest and before
    /// `prepare_layout`, which claims existing letters first.
    pub fn apply_ui_state(&mut self, state: &UiState) {
        self.nav_mode = state.navigation_mode();
        if state.hierarchy_mode != self.hierarchy {
            self.toggle_categorize_contained();
        }
        let mut letters = InvletPool::new();
        for item in self.pool.iter() {
            if let Some(c) = item.invlet {
                letters.claim(c);
            }
        }
        for item in self.pool.iter_mut() {
            if item.invlet.is_none() {
                if let Some(&c) = state.invlet_by_kind.get(&item.kind) {
                    if letters.claim(c) {
                        item.invlet = Some(c);
                    }
                }
            }
        }
    }

    /// Record the session's modes, filter and letter assignments into
    /// persisted preferences, so letters stay stable across sessions.
    pub fn store_ui_state(&self, state: &mut UiState) {
        state.category_navigation = self.nav_mode == NavigationMode::Category;
        state.hierarchy_mode = self.hierarchy;
        state.remember_filter(self.filter.raw());
        for column in &self.columns {
            if column.role() == ColumnRole::Summary {
                continue;
            }
            for entry in column.entries() {
                if let (Some(item), Some(c)) = (entry.lead(&self.pool), entry.invlet(&self.pool)) {
                    state.remember_invlet(item.kind.clone(), c);
                }
            }
        }
    }

    /// Handle an action the base selector understands; returns the
    /// action back when it is the policy's to interpret.
    pub fn handle_structural(&mut self, action: Action) -> Option<Action> {
        // filter editing captures most keys
        if let Some(draft) = &mut self.filter_draft {
            match action {
                Action::Filter(FilterEdit::Push(c)) => {
                    draft.push(c);
                    return None;
                }
                Action::Filter(FilterEdit::Backspace) => {
                    draft.pop();
                    return None;
                }
                Action::Filter(FilterEdit::Accept) | Action::Confirm => {
                    self.filter = Filter::new(self.filter_draft.take().unwrap_or_default());
                    self.prepare_all();
                    return None;
                }
                Action::Filter(FilterEdit::Clear) | Action::Cancel => {
                    self.filter_draft = None;
                    self.filter = Filter::default();
                    self.prepare_all();
                    return None;
                }
                _ => return Some(action),
            }
        }

        match action {
            Action::Up => {
                let scroll = match self.nav_mode {
                    NavigationMode::Item => Scroll::Up,
                    NavigationMode::Category => Scroll::CategoryUp,
                };
                self.active_column_mut().move_highlight(scroll);
            }
            Action::Down => {
                let scroll = match self.nav_mode {
                    NavigationMode::Item => Scroll::Down,
                    NavigationMode::Category => Scroll::CategoryDown,
                };
                self.active_column_mut().move_highlight(scroll);
            }
            Action::PageUp => self.active_column_mut().move_highlight(Scroll::PageUp),
            Action::PageDown => self.active_column_mut().move_highlight(Scroll::PageDown),
            Action::Home => self.active_column_mut().move_highlight(Scroll::Home),
            Action::End => self.active_column_mut().move_highlight(Scroll::End),
            Action::NextColumn => self.activate_next(1),
            Action::PrevColumn => self.activate_next(-1),
            Action::ToggleNavigationMode => {
                self.nav_mode = match self.nav_mode {
                    NavigationMode::Item => NavigationMode::Category,
                    NavigationMode::Category => NavigationMode::Item,
                };
            }
            Action::ToggleHierarchyMode => self.toggle_categorize_contained(),
            Action::ToggleCollapse => {
                if self.active_column_mut().toggle_collapse() {
                    self.prepare_all();
                }
            }
            Action::ToggleFavorite => {
                if let Some(id) = self.active_column().highlighted_item() {
                    if let Some(item) = self.pool.get_mut(id) {
                        item.flags.toggle(ItemFlags::FAVORITE);
                    }
                    self.cache.invalidate(id);
                    self.prepare_all();
                }
            }
            Action::Digit(d) => {
                self.count = self.count.saturating_mul(10).saturating_add(d as u32);
            }
            Action::Examine => {
                if let Some(item) = self
                    .active_column()
                    .highlighted_entry()
                    .and_then(|e| e.lead(&self.pool))
                {
                    self.prompt = Some(format!(
                        "{}: {}, {}, {}",
                        item.name,
                        format_weight(item.weight_g),
                        format_volume(item.volume_ml),
                        format_value(item.value),
                    ));
                }
            }
            Action::Filter(FilterEdit::Start) => {
                self.filter_draft = Some(self.filter.raw().to_string());
            }
            Action::Filter(FilterEdit::Clear) => {
                self.filter = Filter::default();
                self.prepare_all();
            }
            Action::Resize { width, height } => self.prepare_layout(width, height),
            other => return Some(other),
        }
        None
    }

    /// Lay out every populated column's current page for painting.
    pub fn layout_views(&mut self) -> Vec<ColumnView> {
        let category_nav = self.nav_mode == NavigationMode::Category;
        let mut views = Vec::new();
        for (i, column) in self.columns.iter().enumerate() {
            if column.is_empty() {
                continue;
            }
            views.push(ColumnView {
                role: column.role(),
                width: column.width(),
                pages: column.pages(),
                page_index: column.page_index(),
                active: i == self.active,
                rows: column.layout(
                    &self.pool,
                    self.preset.as_ref(),
                    &mut self.cache,
                    category_nav,
                ),
            });
        }
        views
    }

    /// (weight, volume) of everything carried by the character,
    /// summed over the pool's character-side items.
    pub fn carried_totals(&self) -> (u64, u64) {
        let mut weight = 0u64;
        let mut volume = 0u64;
        for column in &self.columns {
            if !matches!(column.role(), ColumnRole::Gear | ColumnRole::Worn) {
                continue;
            }
            for entry in column.entries() {
                if let Some(item) = entry.lead(&self.pool) {
                    let count = entry.caption_count(item) as u64;
                    weight += item.weight_g as u64 * count;
                    volume += item.volume_ml as u64 * count;
                }
            }
        }
        (weight, volume)
    }

    /// Collect the committed picks: chosen entries whose denial is
    /// empty. Denied entries are excluded even if toggled before the
    /// denial was computed.
    pub fn commit(&self) -> Selection {
        let mut picks = Vec::new();
        for column in &self.columns {
            if column.role() == ColumnRole::Summary {
                continue;
            }
            for entry in column.chosen_entries() {
                if entry.is_denied() {
                    continue;
                }
                if let Some(id) = entry.any_item() {
                    picks.push((id, entry.chosen_count()));
                }
            }
        }
        Selection { picks }
    }
}

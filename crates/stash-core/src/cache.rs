//! Cell text memoization
//!
//! Formatting an entry's cells is pure with respect to entry state,
//! so the text is computed once and reused until the item changes
//! (favorite toggle, charge change). The cache is owned by the
//! session that created the selector and passed down by reference;
//! there is no global state.

use std::collections::HashMap;

use crate::item::{ItemHandle, ItemId};
use crate::preset::SelectorPreset;

/// Memo of formatted cell text keyed by item and cell index.
///
/// Cell index 0 is the caption; preset cells follow at 1..
#[derive(Debug, Default)]
pub struct CellCache {
    map: HashMap<(ItemId, usize), String>,
    hits: u64,
    misses: u64,
}

impl CellCache {
    pub fn new() -> Self {
        CellCache::default()
    }

    /// Caption text (cell 0) for an entry displaying `count` units.
    pub fn caption(&mut self, item: &ItemHandle, count: u32) -> String {
        self.entry_text(item.id, 0, || item.display_name(count))
    }

    /// Preset cell text; `cell` indexes the preset's cell list.
    pub fn cell(&mut self, item: &ItemHandle, cell: usize, preset: &dyn SelectorPreset) -> String {
        self.entry_text(item.id, cell + 1, || preset.cell_text(item, cell))
    }

    fn entry_text(&mut self, id: ItemId, slot: usize, compute: impl FnOnce() -> String) -> String {
        if let Some(text) = self.map.get(&(id, slot)) {
            self.hits += 1;
            return text.clone();
        }
        self.misses += 1;
        let text = compute();
        self.map.insert((id, slot), text.clone());
        text
    }

    /// Drop memoized text for one item after its state changed.
    pub fn invalidate(&mut self, id: ItemId) {
        self.map.retain(|(item, _), _| *item != id);
    }

    /// Drop everything, e.g. on language change or re-ingest.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// (hits, misses) counters, for diagnostics.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

//! Selection presets
//!
//! A preset is the pluggable policy a selector variant injects into
//! the generic column machinery: which items are shown, what the
//! per-column cells contain, why an item cannot be chosen, and how
//! ties sort. Default methods keep simple presets short.

use std::cmp::Ordering;

use crate::entry::Entry;
use crate::item::{ItemHandle, ItemPool};

/// One display cell owned by a preset.
#[derive(Debug, Clone)]
pub struct CellSpec {
    pub title: String,
    /// An empty formatted string is a stub cell and does not count
    /// toward column width.
    pub stub_on_empty: bool,
}

impl CellSpec {
    pub fn new(title: impl Into<String>) -> Self {
        CellSpec {
            title: title.into(),
            stub_on_empty: true,
        }
    }
}

/// Context handed to preset callbacks.
pub struct PresetContext<'a> {
    pub pool: &'a ItemPool,
    /// Destination container for insert-style selectors.
    pub destination: Option<&'a ItemHandle>,
}

impl<'a> PresetContext<'a> {
    pub fn new(pool: &'a ItemPool) -> Self {
        PresetContext {
            pool,
            destination: None,
        }
    }

    pub fn with_destination(pool: &'a ItemPool, destination: &'a ItemHandle) -> Self {
        PresetContext {
            pool,
            destination: Some(destination),
        }
    }
}

/// Per-variant selection policy injected into columns.
///
/// Formatters must not panic; a formatter that cannot produce text
/// returns an empty string.
pub trait SelectorPreset {
    /// Ordered cells after the caption. The caption (entry name,
    /// stack count, charges) is always cell zero and owned by the
    /// column, not the preset.
    fn cells(&self) -> &[CellSpec];

    /// Whether the item appears in the list at all.
    fn is_shown(&self, _item: &ItemHandle) -> bool {
        true
    }

    /// Why the item cannot currently be chosen, if it cannot.
    fn denial(&self, _item: &ItemHandle, _ctx: &PresetContext<'_>) -> Option<String> {
        None
    }

    /// Text of cell `cell` (indices into [`cells`](Self::cells)).
    fn cell_text(&self, item: &ItemHandle, cell: usize) -> String;

    /// Preset-defined ordering applied after category rank and before
    /// the standard tie-breaks.
    fn compare(&self, _a: &ItemHandle, _b: &ItemHandle) -> Ordering {
        Ordering::Equal
    }
}

/// Evaluate and cache an entry's denial through the preset.
pub fn cache_denial(entry: &mut Entry, preset: &dyn SelectorPreset, ctx: &PresetContext<'_>) {
    entry.denial = entry
        .lead(ctx.pool)
        .and_then(|item| preset.denial(item, ctx));
}

pub fn format_weight(grams: u32) -> String {
    format!("{:.2} kg", grams as f64 / 1000.0)
}

pub fn format_volume(ml: u32) -> String {
    format!("{:.2} L", ml as f64 / 1000.0)
}

pub fn format_value(cents: i64) -> String {
    format!("${:.2}", cents as f64 / 100.0)
}

/// Name, weight and volume cells; no denials.
pub struct DefaultPreset {
    cells: Vec<CellSpec>,
}

impl Default for DefaultPreset {
    fn default() -> Self {
        DefaultPreset {
            cells: vec![CellSpec::new("WEIGHT"), CellSpec::new("VOLUME")],
        }
    }
}

impl DefaultPreset {
    pub fn new() -> Self {
        DefaultPreset::default()
    }
}

impl SelectorPreset for DefaultPreset {
    fn cells(&self) -> &[CellSpec] {
        &self.cells
    }

    fn cell_text(&self, item: &ItemHandle, cell: usize) -> String {
        match cell {
            0 => format_weight(item.weight_g),
            1 => format_volume(item.volume_ml),
            _ => String::new(),
        }
    }
}

/// Containment-feasibility preset for insert/holster selectors.
///
/// Denies anything the destination container cannot hold; liquids are
/// refused outright unless the destination is watertight.
pub struct InsertPreset {
    cells: Vec<CellSpec>,
}

impl Default for InsertPreset {
    fn default() -> Self {
        InsertPreset {
            cells: vec![CellSpec::new("VOLUME")],
        }
    }
}

impl InsertPreset {
    pub fn new() -> Self {
        InsertPreset::default()
    }
}

impl SelectorPreset for InsertPreset {
    fn cells(&self) -> &[CellSpec] {
        &self.cells
    }

    fn denial(&self, item: &ItemHandle, ctx: &PresetContext<'_>) -> Option<String> {
        match ctx.destination {
            Some(dest) => dest.can_contain(item).err(),
            None => Some("nowhere to put it".to_string()),
        }
    }

    fn cell_text(&self, item: &ItemHandle, cell: usize) -> String {
        match cell {
            0 => format_volume(item.volume_ml),
            _ => String::new(),
        }
    }
}

/// Barter-value preset used by trade panes; most valuable first.
pub struct TradePreset {
    cells: Vec<CellSpec>,
}

impl Default for TradePreset {
    fn default() -> Self {
        TradePreset {
            cells: vec![CellSpec::new("VALUE")],
        }
    }
}

impl TradePreset {
    pub fn new() -> Self {
        TradePreset::default()
    }
}

impl SelectorPreset for TradePreset {
    fn cells(&self) -> &[CellSpec] {
        &self.cells
    }

    fn denial(&self, item: &ItemHandle, _ctx: &PresetContext<'_>) -> Option<String> {
        (item.value <= 0).then(|| "has no barter value".to_string())
    }

    fn cell_text(&self, item: &ItemHandle, cell: usize) -> String {
        match cell {
            0 if item.value > 0 => format_value(item.value),
            _ => String::new(),
        }
    }

    fn compare(&self, a: &ItemHandle, b: &ItemHandle) -> Ordering {
        b.value.cmp(&a.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Capacity, ItemCategory, ItemFlags, ItemId};

    fn handle(id: u32, name: &str) -> ItemHandle {
        ItemHandle {
            id: ItemId(id),
            kind: name.to_string(),
            name: name.to_string(),
            name_plural: None,
            category: ItemCategory::new("tools", "TOOLS", 10),
            count: 1,
            charges: None,
            weight_g: 1250,
            volume_ml: 500,
            length_mm: 300,
            flags: ItemFlags::empty(),
            invlet: None,
            value: 150,
            capacity: None,
            parent: None,
        }
    }

    #[test]
    fn default_preset_formats_weight_and_volume() {
        let preset = DefaultPreset::new();
        let item = handle(1, "hammer");
        assert_eq!(preset.cell_text(&item, 0), "1.25 kg");
        assert_eq!(preset.cell_text(&item, 1), "0.50 L");
        // out-of-range cells are stubs, never a panic
        assert_eq!(preset.cell_text(&item, 9), "");
    }

    #[test]
    fn insert_preset_denies_what_wont_fit() {
        let preset = InsertPreset::new();
        let pool = ItemPool::new();
        let mut pocket = handle(1, "pocket");
        pocket.capacity = Some(Capacity {
            volume_ml: 250,
            weight_g: 500,
            max_length_mm: 150,
            watertight: false,
        });
        let big = handle(2, "crowbar");
        let ctx = PresetContext::with_destination(&pool, &pocket);
        assert!(preset.denial(&big, &ctx).is_some());

        let mut small = handle(3, "pebble");
        small.volume_ml = 10;
        small.weight_g = 20;
        small.length_mm = 10;
        assert!(preset.denial(&small, &ctx).is_none());

        let mut brine = small.clone();
        brine.name = "brine".to_string();
        brine.flags |= ItemFlags::LIQUID;
        assert_eq!(preset.denial(&brine, &ctx), Some("brine would spill".to_string()));
    }

    #[test]
    fn trade_preset_sorts_most_valuable_first() {
        let preset = TradePreset::new();
        let cheap = handle(1, "rag");
        let mut dear = handle(2, "gold ring");
        dear.value = 5000;
        assert_eq!(preset.compare(&dear, &cheap), Ordering::Less);
        assert_eq!(preset.cell_text(&dear, 0), "$50.00");
    }
}

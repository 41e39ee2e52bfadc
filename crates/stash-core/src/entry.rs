//! List entries
//!
//! An [`Entry`] is one selectable line-item: a stack of item ids plus
//! selection state. Category headers and spacers are rendered lines,
//! not entries; see `column::Line`.

use crate::item::{CategoryId, ItemHandle, ItemId, ItemPool};
use crate::source::LocationRef;

/// Identifier of a collation group within one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollationId(pub u32);

/// Immutable metadata of one collation group, owned by the column.
///
/// Members reference the group by id; the group itself never changes
/// after creation. Re-collating rebuilds groups from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationGroup {
    pub id: CollationId,
    /// Item type shared by every member.
    pub kind: String,
    pub category: CategoryId,
    pub favorite: bool,
    /// Number of member entries, header included.
    pub size: u32,
}

/// One line-item backed by a stack of item references.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Item ids of the stack; all units share one display line.
    pub stack: Vec<ItemId>,
    /// Category the entry files under in the current display mode.
    pub category: Option<CategoryId>,
    chosen_count: u32,
    /// Units available for selection (stack size or charges).
    pub available: u32,
    /// Cached reason this entry cannot be chosen, if any.
    pub denial: Option<String>,
    /// Player-assigned quick-select letter overriding the item's own.
    pub custom_invlet: Option<char>,
    pub collation: Option<CollationId>,
    /// This entry heads its collation group.
    pub collation_header: bool,
    /// Collation children are hidden while the header is collapsed.
    pub collapsed: bool,
    /// Nesting depth for hierarchy-mode indentation.
    pub indent: u8,
    /// Where the stack was ingested from; drives re-categorization
    /// when switching between hierarchy and flat display.
    pub location: Option<LocationRef>,
    /// Creation order; the sort tie-break of last resort.
    pub generation: u64,
}

impl Entry {
    /// Entry over a stack of items. `available` comes from the lead
    /// item (charges when charge-counted, stack size otherwise).
    pub fn new(stack: Vec<ItemId>, lead: &ItemHandle, generation: u64) -> Self {
        let available = if lead.charges.is_some() {
            lead.available()
        } else {
            lead.count.max(stack.len() as u32)
        };
        Entry {
            stack,
            category: Some(lead.category.id.clone()),
            chosen_count: 0,
            available,
            denial: None,
            custom_invlet: None,
            collation: None,
            collation_header: false,
            collapsed: false,
            indent: 0,
            location: None,
            generation,
        }
    }

    pub fn with_location(mut self, location: LocationRef) -> Self {
        self.location = Some(location);
        self
    }

    /// The item id the entry is displayed through.
    pub fn any_item(&self) -> Option<ItemId> {
        self.stack.first().copied()
    }

    /// Lead item handle, if still present in the pool.
    pub fn lead<'p>(&self, pool: &'p ItemPool) -> Option<&'p ItemHandle> {
        self.any_item().and_then(|id| pool.get(id))
    }

    /// Entries with an empty stack are headers/spacers by
    /// construction and never selectable.
    pub fn is_selectable(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn is_denied(&self) -> bool {
        self.denial.is_some()
    }

    pub fn chosen_count(&self) -> u32 {
        self.chosen_count
    }

    /// Set the chosen quantity, clamped to `available`.
    pub fn set_chosen_count(&mut self, count: u32) {
        self.chosen_count = count.min(self.available);
    }

    /// Toggle between none chosen and all available chosen.
    pub fn toggle(&mut self) {
        if self.chosen_count == 0 {
            self.chosen_count = self.available;
        } else {
            self.chosen_count = 0;
        }
    }

    pub fn is_chosen(&self) -> bool {
        self.chosen_count > 0
    }

    /// Units the caption displays. Charge-counted items show one unit
    /// with the charge suffix; everything else shows the full stack.
    pub fn caption_count(&self, lead: &ItemHandle) -> u32 {
        if lead.charges.is_some() {
            (self.stack.len() as u32).max(1)
        } else {
            self.available.max(1)
        }
    }

    /// Quick-select letter shown for this entry.
    pub fn invlet(&self, pool: &ItemPool) -> Option<char> {
        self.custom_invlet
            .or_else(|| self.lead(pool).and_then(|item| item.invlet))
    }

    /// Selection marker column: `-` none, `#` partial, `+` all.
    pub fn selection_marker(&self) -> char {
        if self.chosen_count == 0 {
            '-'
        } else if self.chosen_count < self.available {
            '#'
        } else {
            '+'
        }
    }
}

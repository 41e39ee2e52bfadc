//! Item handles and categories
//!
//! The engine never owns game items. Callers hand it [`ItemHandle`]
//! snapshots describing whatever their item model exposes, and the
//! engine refers to them by [`ItemId`] from then on.

use std::collections::BTreeMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub mod invlet;

pub use invlet::{InvletPool, NOINVSYM};

/// Unique identifier for an item handle within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

/// Identifier of an item category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        CategoryId(id.into())
    }
}

/// An item category: display name plus sort rank.
///
/// Lower ranks sort first. Synthetic location categories (ground,
/// vehicle) use strongly negative ranks so they lead the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCategory {
    pub id: CategoryId,
    pub name: String,
    pub rank: i32,
}

impl ItemCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rank: i32) -> Self {
        ItemCategory {
            id: CategoryId::new(id),
            name: name.into(),
            rank,
        }
    }
}

bitflags! {
    /// Boolean item attributes relevant to selection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ItemFlags: u16 {
        /// Currently worn by the character.
        const WORN      = 0x0001;
        /// Currently wielded as the active weapon/tool.
        const WIELDED   = 0x0002;
        /// Marked favorite by the player.
        const FAVORITE  = 0x0004;
        /// Liquid phase; needs a watertight destination.
        const LIQUID    = 0x0008;
        /// Factory-sealed container contents.
        const SEALED    = 0x0010;
        /// Can be worn at all.
        const WEARABLE  = 0x0020;
    }
}

/// Capacity limits of a container item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Remaining volume in milliliters.
    pub volume_ml: u32,
    /// Remaining weight allowance in grams.
    pub weight_g: u32,
    /// Longest item that fits, in millimeters.
    pub max_length_mm: u32,
    /// Whether liquids can be held without spilling.
    pub watertight: bool,
}

/// Snapshot of one item as exposed by an item source.
///
/// `count` is the stack size; `charges` is set for charge-counted
/// items (ammo, fuel) and takes precedence when computing how much of
/// the item is available for selection.
#[derive(Debug, Clone)]
pub struct ItemHandle {
    pub id: ItemId,
    /// Item type id, used for collation grouping.
    pub kind: String,
    pub name: String,
    pub name_plural: Option<String>,
    pub category: ItemCategory,
    pub count: u32,
    pub charges: Option<u32>,
    pub weight_g: u32,
    pub volume_ml: u32,
    pub length_mm: u32,
    pub flags: ItemFlags,
    pub invlet: Option<char>,
    /// Barter value per unit, in cents.
    pub value: i64,
    /// Container capacity, if this item can hold others.
    pub capacity: Option<Capacity>,
    /// Containing item, if nested.
    pub parent: Option<ItemId>,
}

impl ItemHandle {
    /// How many units can be chosen from this handle.
    pub fn available(&self) -> u32 {
        self.charges.unwrap_or(self.count)
    }

    pub fn is_worn(&self) -> bool {
        self.flags.contains(ItemFlags::WORN)
    }

    pub fn is_wielded(&self) -> bool {
        self.flags.contains(ItemFlags::WIELDED)
    }

    pub fn is_favorite(&self) -> bool {
        self.flags.contains(ItemFlags::FAVORITE)
    }

    pub fn is_liquid(&self) -> bool {
        self.flags.contains(ItemFlags::LIQUID)
    }

    /// Display caption for a stack of `count` units.
    ///
    /// Stacks of more than one show `x N`; charge-counted items show
    /// remaining charges in parentheses.
    pub fn display_name(&self, count: u32) -> String {
        let base = if count > 1 {
            self.name_plural.as_deref().unwrap_or(&self.name)
        } else {
            &self.name
        };
        let mut out = String::from(base);
        if count > 1 {
            out.push_str(&format!(" x {count}"));
        }
        if let Some(charges) = self.charges {
            out.push_str(&format!(" ({charges})"));
        }
        out
    }

    /// Whether this item can hold `other`, or the reason it cannot.
    pub fn can_contain(&self, other: &ItemHandle) -> Result<(), String> {
        let Some(cap) = self.capacity else {
            return Err(format!("{} is not a container", self.name));
        };
        if other.is_liquid() && !cap.watertight {
            return Err(format!("{} would spill", other.name));
        }
        if other.volume_ml > cap.volume_ml {
            return Err("too big".to_string());
        }
        if other.weight_g > cap.weight_g {
            return Err("too heavy".to_string());
        }
        if other.length_mm > cap.max_length_mm {
            return Err("too long".to_string());
        }
        Ok(())
    }
}

/// All item handles known to one selector session, keyed by id.
#[derive(Debug, Default)]
pub struct ItemPool {
    items: BTreeMap<ItemId, ItemHandle>,
}

/// Containment nesting deeper than this indicates a cycle in the
/// caller's parent links.
pub const MAX_PARENT_DEPTH: usize = 32;

impl ItemPool {
    pub fn new() -> Self {
        ItemPool::default()
    }

    pub fn insert(&mut self, item: ItemHandle) {
        self.items.insert(item.id, item);
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemHandle> {
        self.items.get(&id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemHandle> {
        self.items.get_mut(&id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<ItemHandle> {
        self.items.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemHandle> {
        self.items.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ItemHandle> {
        self.items.values_mut()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Walk parent links up to the topmost container of `id`.
    ///
    /// The walk is bounded by [`MAX_PARENT_DEPTH`]; exceeding the
    /// bound means the caller handed us cyclic parent ids.
    pub fn topmost_parent(&self, id: ItemId) -> ItemId {
        let mut current = id;
        for _ in 0..MAX_PARENT_DEPTH {
            match self.get(current).and_then(|item| item.parent) {
                Some(parent) if self.items.contains_key(&parent) => current = parent,
                _ => return current,
            }
        }
        panic!("parent chain of {current:?} exceeds {MAX_PARENT_DEPTH} levels; cyclic links?");
    }

    /// Nesting depth of `id` below its topmost container.
    pub fn nesting_depth(&self, id: ItemId) -> u8 {
        let mut depth = 0u8;
        let mut current = id;
        while let Some(parent) = self.get(current).and_then(|item| item.parent) {
            if depth as usize >= MAX_PARENT_DEPTH || !self.items.contains_key(&parent) {
                break;
            }
            depth += 1;
            current = parent;
        }
        depth
    }
}

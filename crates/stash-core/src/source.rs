//! Item sources
//!
//! External collaborators (character gear, map tiles, vehicle cargo)
//! feed item snapshots into a selector through the [`ItemSource`]
//! trait. The engine only reads; it never mutates world state.

use strum::{Display, EnumIter};

use crate::item::{ItemCategory, ItemHandle};

/// Where a batch of items comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ItemLocation {
    /// Carried inventory.
    Character,
    /// Worn articles.
    Worn,
    /// The wielded weapon/tool.
    Wielded,
    /// A map tile relative to the character.
    #[strum(to_string = "MapTile")]
    MapTile,
    /// A vehicle cargo part.
    #[strum(to_string = "VehicleCargo")]
    VehicleCargo,
}

/// A concrete place items can be pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationRef {
    Character,
    Worn,
    Wielded,
    MapTile { dx: i32, dy: i32 },
    VehicleCargo { part: u32 },
}

impl LocationRef {
    pub fn kind(&self) -> ItemLocation {
        match self {
            LocationRef::Character => ItemLocation::Character,
            LocationRef::Worn => ItemLocation::Worn,
            LocationRef::Wielded => ItemLocation::Wielded,
            LocationRef::MapTile { .. } => ItemLocation::MapTile,
            LocationRef::VehicleCargo { .. } => ItemLocation::VehicleCargo,
        }
    }

    /// Synthetic category used when organizing by location rather
    /// than by item kind. Location categories lead the list, ground
    /// items first of all (rank -1000, matching the classic ground
    /// category).
    pub fn category(&self) -> ItemCategory {
        match self {
            LocationRef::Character => ItemCategory::new("loc_inv", "INVENTORY", -500),
            LocationRef::Worn => ItemCategory::new("loc_worn", "ITEMS WORN", -700),
            LocationRef::Wielded => ItemCategory::new("loc_weapon", "WEAPON HELD", -800),
            LocationRef::MapTile { .. } => ItemCategory::new("loc_ground", "GROUND", -1000),
            LocationRef::VehicleCargo { .. } => ItemCategory::new("loc_vehicle", "VEHICLE", -900),
        }
    }
}

/// Provider of item snapshots for a location.
pub trait ItemSource {
    /// Items currently at `loc`, in source order.
    fn items(&self, loc: LocationRef) -> Vec<ItemHandle>;

    /// Map tiles within `radius` steps that hold items. The default
    /// reports nothing; map-backed sources override this.
    fn tiles_with_items(&self, _radius: u32) -> Vec<LocationRef> {
        Vec::new()
    }
}

/// Simple in-memory source for tests and the demo binary.
#[derive(Debug, Default)]
pub struct VecSource {
    batches: Vec<(LocationRef, Vec<ItemHandle>)>,
}

impl VecSource {
    pub fn new() -> Self {
        VecSource::default()
    }

    pub fn with(mut self, loc: LocationRef, items: Vec<ItemHandle>) -> Self {
        self.batches.push((loc, items));
        self
    }

    pub fn push(&mut self, loc: LocationRef, item: ItemHandle) {
        if let Some((_, batch)) = self.batches.iter_mut().find(|(l, _)| *l == loc) {
            batch.push(item);
        } else {
            self.batches.push((loc, vec![item]));
        }
    }
}

impl ItemSource for VecSource {
    fn items(&self, loc: LocationRef) -> Vec<ItemHandle> {
        self.batches
            .iter()
            .filter(|(l, _)| *l == loc)
            .flat_map(|(_, batch)| batch.iter().cloned())
            .collect()
    }

    fn tiles_with_items(&self, radius: u32) -> Vec<LocationRef> {
        let r = radius as i32;
        self.batches
            .iter()
            .filter_map(|(l, batch)| match l {
                LocationRef::MapTile { dx, dy }
                    if dx.abs() <= r && dy.abs() <= r && !batch.is_empty() =>
                {
                    Some(*l)
                }
                _ => None,
            })
            .collect()
    }
}

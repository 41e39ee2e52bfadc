//! Seeded demo loot for the example binary

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stash_core::{Capacity, ItemCategory, ItemFlags, ItemHandle, ItemId, LocationRef, VecSource};

const FOOD: &[&str] = &[
    "beef jerky",
    "hardtack",
    "canned beans",
    "dried apricots",
    "trail mix",
];
const TOOLS: &[&str] = &["crowbar", "hacksaw", "duct tape", "soldering iron", "rope"];
const CLOTHING: &[&str] = &["poncho", "wool socks", "leather gloves", "balaclava"];
const WEAPONS: &[&str] = &["machete", "baseball bat", "pipe", "hunting knife"];

fn category(name: &str) -> ItemCategory {
    match name {
        "food" => ItemCategory::new("food", "FOOD", 5),
        "tools" => ItemCategory::new("tools", "TOOLS", 10),
        "clothing" => ItemCategory::new("clothing", "CLOTHING", 4),
        _ => ItemCategory::new("weapons", "WEAPONS", 1),
    }
}

fn roll(rng: &mut StdRng, id: u32, name: &str, cat: &str) -> ItemHandle {
    ItemHandle {
        id: ItemId(id),
        kind: name.to_string(),
        name: name.to_string(),
        name_plural: None,
        category: category(cat),
        count: if cat == "food" { rng.gen_range(1..6) } else { 1 },
        charges: None,
        weight_g: rng.gen_range(50..3000),
        volume_ml: rng.gen_range(50..2500),
        length_mm: rng.gen_range(50..900),
        flags: ItemFlags::empty(),
        invlet: None,
        value: rng.gen_range(5..20_000),
        capacity: None,
        parent: None,
    }
}

/// Build a deterministic pile of demo loot: carried gear (some of it
/// inside a backpack), worn clothing, a wielded weapon, and scattered
/// ground items on a few tiles.
pub fn loot(seed: u64) -> VecSource {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut next_id = 1u32;
    let mut id = move || {
        let id = next_id;
        next_id += 1;
        id
    };

    let mut backpack = roll(&mut rng, id(), "backpack", "clothing");
    backpack.capacity = Some(Capacity {
        volume_ml: 30_000,
        weight_g: 15_000,
        max_length_mm: 600,
        watertight: false,
    });
    let backpack_id = backpack.id;

    let mut carried = vec![backpack];
    for name in FOOD {
        carried.push(roll(&mut rng, id(), name, "food"));
    }
    for (i, name) in TOOLS.iter().enumerate() {
        let mut item = roll(&mut rng, id(), name, "tools");
        // half the tools ride inside the backpack
        if i % 2 == 0 {
            item.parent = Some(backpack_id);
        }
        carried.push(item);
    }

    let worn: Vec<ItemHandle> = CLOTHING
        .iter()
        .map(|name| {
            let mut item = roll(&mut rng, id(), name, "clothing");
            item.flags |= ItemFlags::WORN | ItemFlags::WEARABLE;
            item
        })
        .collect();

    let mut machete = roll(&mut rng, id(), WEAPONS[0], "weapons");
    machete.flags |= ItemFlags::WIELDED;

    let mut ground = Vec::new();
    for name in WEAPONS.iter().skip(1) {
        ground.push(roll(&mut rng, id(), name, "weapons"));
    }
    let mut canvas_sack = roll(&mut rng, id(), "canvas sack", "clothing");
    canvas_sack.flags |= ItemFlags::WEARABLE;
    ground.push(canvas_sack);
    let mut gasoline = roll(&mut rng, id(), "gasoline", "tools");
    gasoline.flags |= ItemFlags::LIQUID;

    VecSource::new()
        .with(LocationRef::Character, carried)
        .with(LocationRef::Worn, worn)
        .with(LocationRef::Wielded, vec![machete])
        .with(LocationRef::MapTile { dx: 0, dy: 1 }, ground)
        .with(LocationRef::MapTile { dx: 1, dy: 0 }, vec![gasoline])
}

#[cfg(test)]
mod tests {
    use super::*;
    use stash_core::ItemSource;

    #[test]
    fn same_seed_same_loot() {
        let a = loot(7);
        let b = loot(7);
        let left = a.items(LocationRef::Character);
        let right = b.items(LocationRef::Character);
        assert_eq!(left.len(), right.len());
        for (x, y) in left.iter().zip(&right) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.weight_g, y.weight_g);
            assert_eq!(x.value, y.value);
        }
    }

    #[test]
    fn loot_covers_every_location_kind() {
        let src = loot(1);
        assert!(!src.items(LocationRef::Character).is_empty());
        assert!(!src.items(LocationRef::Worn).is_empty());
        assert!(!src.items(LocationRef::Wielded).is_empty());
        assert!(!src.tiles_with_items(2).is_empty());
    }
}

//! Built-in item roster.
//!
//! Sell prices and energy values follow the game-design sheet; stack
//! bounds are 1 for anything with durability and the default bound for
//! loose stock.

use std::collections::BTreeSet;

use crate::items::{ItemDef, ItemKind};
use crate::shared::{ItemCategory, Season, DEFAULT_STACK_SIZE};

fn tags(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|tag| tag.to_string()).collect()
}

pub(super) fn roster() -> Vec<ItemDef> {
    vec![
        // ── Tools ───────────────────────────────────────────────────────────

        ItemDef {
            id: "hoe".into(),
            name: "Hoe".into(),
            description: "Tills soil for planting.".into(),
            category: ItemCategory::Tool,
            max_stack: 1,
            max_durability: 100,
            usable_while_broken: false,
            sell_price: 0,
            tags: BTreeSet::new(),
            kind: ItemKind::Tool { durability_per_use: 1 },
        },
        ItemDef {
            id: "watering_can".into(),
            name: "Watering Can".into(),
            description: "Waters one tile per use.".into(),
            category: ItemCategory::Tool,
            max_stack: 1,
            max_durability: 150,
            usable_while_broken: false,
            sell_price: 0,
            tags: BTreeSet::new(),
            kind: ItemKind::Tool { durability_per_use: 1 },
        },
        ItemDef {
            id: "axe".into(),
            name: "Axe".into(),
            description: "Chops trees and stumps.".into(),
            category: ItemCategory::Tool,
            max_stack: 1,
            max_durability: 120,
            usable_while_broken: false,
            sell_price: 0,
            tags: BTreeSet::new(),
            kind: ItemKind::Tool { durability_per_use: 2 },
        },
        ItemDef {
            id: "pickaxe".into(),
            name: "Pickaxe".into(),
            description: "Breaks rocks and ore nodes.".into(),
            category: ItemCategory::Tool,
            max_stack: 1,
            max_durability: 120,
            usable_while_broken: false,
            sell_price: 0,
            tags: BTreeSet::new(),
            kind: ItemKind::Tool { durability_per_use: 2 },
        },

        // ── Equipment ───────────────────────────────────────────────────────

        ItemDef {
            id: "copper_sword".into(),
            name: "Copper Sword".into(),
            description: "A serviceable blade for the mines.".into(),
            category: ItemCategory::Equipment,
            max_stack: 1,
            max_durability: 80,
            usable_while_broken: false,
            sell_price: 150,
            tags: BTreeSet::new(),
            kind: ItemKind::Equipment { attack: 8, defense: 0 },
        },
        ItemDef {
            id: "leather_boots".into(),
            name: "Leather Boots".into(),
            description: "Sturdy enough for rocky floors.".into(),
            category: ItemCategory::Equipment,
            max_stack: 1,
            max_durability: 60,
            usable_while_broken: false,
            sell_price: 90,
            tags: BTreeSet::new(),
            kind: ItemKind::Equipment { attack: 0, defense: 3 },
        },

        // ── Seeds ───────────────────────────────────────────────────────────

        ItemDef {
            id: "turnip_seeds".into(),
            name: "Turnip Seeds".into(),
            description: "Sprouts fast. Spring only.".into(),
            category: ItemCategory::Seed,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 10,
            tags: BTreeSet::new(),
            kind: ItemKind::Seed {
                crop_id: "turnip".into(),
                seasons: vec![Season::Spring],
            },
        },
        ItemDef {
            id: "potato_seeds".into(),
            name: "Potato Seeds".into(),
            description: "Hearty spring tubers.".into(),
            category: ItemCategory::Seed,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 25,
            tags: BTreeSet::new(),
            kind: ItemKind::Seed {
                crop_id: "potato".into(),
                seasons: vec![Season::Spring],
            },
        },
        ItemDef {
            id: "strawberry_seeds".into(),
            name: "Strawberry Seeds".into(),
            description: "Keeps fruiting after the first pick.".into(),
            category: ItemCategory::Seed,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 50,
            tags: BTreeSet::new(),
            kind: ItemKind::Seed {
                crop_id: "strawberry".into(),
                seasons: vec![Season::Spring],
            },
        },
        ItemDef {
            id: "melon_seeds".into(),
            name: "Melon Seeds".into(),
            description: "Slow, lucrative summer crop.".into(),
            category: ItemCategory::Seed,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 40,
            tags: BTreeSet::new(),
            kind: ItemKind::Seed {
                crop_id: "melon".into(),
                seasons: vec![Season::Summer],
            },
        },
        ItemDef {
            id: "blueberry_seeds".into(),
            name: "Blueberry Seeds".into(),
            description: "Summer bushes with repeat harvests.".into(),
            category: ItemCategory::Seed,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 40,
            tags: BTreeSet::new(),
            kind: ItemKind::Seed {
                crop_id: "blueberry".into(),
                seasons: vec![Season::Summer],
            },
        },
        ItemDef {
            id: "pumpkin_seeds".into(),
            name: "Pumpkin Seeds".into(),
            description: "The pride of fall.".into(),
            category: ItemCategory::Seed,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 50,
            tags: BTreeSet::new(),
            kind: ItemKind::Seed {
                crop_id: "pumpkin".into(),
                seasons: vec![Season::Fall],
            },
        },
        ItemDef {
            id: "wheat_seeds".into(),
            name: "Wheat Seeds".into(),
            description: "Grows in any warm season.".into(),
            category: ItemCategory::Seed,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 5,
            tags: BTreeSet::new(),
            kind: ItemKind::Seed {
                crop_id: "wheat".into(),
                seasons: vec![Season::Spring, Season::Summer, Season::Fall],
            },
        },

        // ── Produce ─────────────────────────────────────────────────────────

        ItemDef {
            id: "turnip".into(),
            name: "Turnip".into(),
            description: "Crisp and a little peppery.".into(),
            category: ItemCategory::Produce,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 60,
            tags: tags(&["giftable"]),
            kind: ItemKind::Produce { edible: true, energy_restore: 15 },
        },
        ItemDef {
            id: "potato".into(),
            name: "Potato".into(),
            description: "Dependable and filling.".into(),
            category: ItemCategory::Produce,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 80,
            tags: tags(&["giftable"]),
            kind: ItemKind::Produce { edible: true, energy_restore: 20 },
        },
        ItemDef {
            id: "strawberry".into(),
            name: "Strawberry".into(),
            description: "Sweet spring favorite.".into(),
            category: ItemCategory::Produce,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 120,
            tags: tags(&["giftable"]),
            kind: ItemKind::Produce { edible: true, energy_restore: 25 },
        },
        ItemDef {
            id: "melon".into(),
            name: "Melon".into(),
            description: "Heavy, fragrant, worth the wait.".into(),
            category: ItemCategory::Produce,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 250,
            tags: tags(&["giftable"]),
            kind: ItemKind::Produce { edible: true, energy_restore: 45 },
        },
        ItemDef {
            id: "blueberry".into(),
            name: "Blueberry".into(),
            description: "Best by the handful.".into(),
            category: ItemCategory::Produce,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 50,
            tags: tags(&["giftable"]),
            kind: ItemKind::Produce { edible: true, energy_restore: 10 },
        },
        ItemDef {
            id: "pumpkin".into(),
            name: "Pumpkin".into(),
            description: "Too pretty to carve. Almost.".into(),
            category: ItemCategory::Produce,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 320,
            tags: tags(&["giftable"]),
            kind: ItemKind::Produce { edible: false, energy_restore: 0 },
        },
        ItemDef {
            id: "wheat".into(),
            name: "Wheat".into(),
            description: "Milled into flour by the general store.".into(),
            category: ItemCategory::Produce,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 25,
            tags: BTreeSet::new(),
            kind: ItemKind::Produce { edible: false, energy_restore: 0 },
        },

        // ── Resources ───────────────────────────────────────────────────────

        ItemDef {
            id: "wood".into(),
            name: "Wood".into(),
            description: "Split logs from farm trees.".into(),
            category: ItemCategory::Resource,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 2,
            tags: BTreeSet::new(),
            kind: ItemKind::Resource {
                refined_into: Some("plank".into()),
                refine_yield: 2,
            },
        },
        ItemDef {
            id: "stone".into(),
            name: "Stone".into(),
            description: "Rubble from the field and the mines.".into(),
            category: ItemCategory::Resource,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 2,
            tags: BTreeSet::new(),
            kind: ItemKind::Resource {
                refined_into: Some("stone_brick".into()),
                refine_yield: 1,
            },
        },
        ItemDef {
            id: "iron_ore".into(),
            name: "Iron Ore".into(),
            description: "Smelts down to workable bars.".into(),
            category: ItemCategory::Resource,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 10,
            tags: tags(&["smeltable"]),
            kind: ItemKind::Resource {
                refined_into: Some("iron_bar".into()),
                refine_yield: 1,
            },
        },
        ItemDef {
            id: "fiber".into(),
            name: "Fiber".into(),
            description: "Scythed from weeds.".into(),
            category: ItemCategory::Resource,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 1,
            tags: BTreeSet::new(),
            kind: ItemKind::Resource {
                refined_into: None,
                refine_yield: 0,
            },
        },

        // ── Materials ───────────────────────────────────────────────────────

        ItemDef {
            id: "plank".into(),
            name: "Plank".into(),
            description: "Building-grade lumber.".into(),
            category: ItemCategory::Material,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 6,
            tags: BTreeSet::new(),
            kind: ItemKind::Material,
        },
        ItemDef {
            id: "stone_brick".into(),
            name: "Stone Brick".into(),
            description: "Cut and squared for masonry.".into(),
            category: ItemCategory::Material,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 5,
            tags: BTreeSet::new(),
            kind: ItemKind::Material,
        },
        ItemDef {
            id: "iron_bar".into(),
            name: "Iron Bar".into(),
            description: "The blacksmith's staple.".into(),
            category: ItemCategory::Material,
            max_stack: DEFAULT_STACK_SIZE,
            max_durability: 0,
            usable_while_broken: false,
            sell_price: 120,
            tags: BTreeSet::new(),
            kind: ItemKind::Material,
        },
    ]
}

//! Headless integration scenarios for the farmstead core.
//!
//! These tests exercise the public API end to end — no rendering, no
//! windowing, no clock. External events (day ticks, watering, harvest
//! actions) are driven by hand exactly the way a host game would deliver
//! them.
//!
//! Run with: `cargo test --test scenarios`

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use farmstead::context::{CoreConfig, FarmContext};
use farmstead::farming::{CropDef, CropError, CropField};
use farmstead::inventory::InventoryManager;
use farmstead::items::{ItemDef, ItemInstance, ItemKind};
use farmstead::shared::{GridPosition, ItemCategory, Season};

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// A wheat-like definition with a small stack bound, for slot-math
/// scenarios that are easier to eyeball at max-stack 10.
fn small_stack_wheat() -> Arc<ItemDef> {
    Arc::new(ItemDef {
        id: "wheat".into(),
        name: "Wheat".into(),
        description: String::new(),
        category: ItemCategory::Produce,
        max_stack: 10,
        max_durability: 0,
        usable_while_broken: false,
        sell_price: 25,
        tags: BTreeSet::new(),
        kind: ItemKind::Produce {
            edible: false,
            energy_restore: 0,
        },
    })
}

fn watered_crop(stage_days: Vec<u8>, regrows: bool, regrow_days: u8, regrow_stage: u8) -> Arc<CropDef> {
    Arc::new(CropDef {
        id: "test_crop".into(),
        name: "Test Crop".into(),
        seed_id: "test_crop_seeds".into(),
        harvest_id: "test_crop".into(),
        seasons: vec![Season::Spring],
        stage_days,
        requires_watering: true,
        regrows,
        regrow_days,
        regrow_stage,
        yield_min: 1,
        yield_max: 1,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Inventory scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn wheat_in_four_slots_scenario() {
    // Empty container of 4 slots, max-stack 10.
    let mut inventory = InventoryManager::new(4);
    let wheat = small_stack_wheat();

    // Adding 25 fills two slots and starts a third.
    inventory.add_item(&wheat, 25).expect("fits");
    let quantities: Vec<Option<u32>> = inventory
        .slots()
        .iter()
        .map(|slot| slot.as_ref().map(|inst| inst.quantity()))
        .collect();
    assert_eq!(quantities, vec![Some(10), Some(10), Some(5), None]);

    // Sorting a single-definition inventory leaves the order stable.
    inventory.sort();
    let quantities: Vec<Option<u32>> = inventory
        .slots()
        .iter()
        .map(|slot| slot.as_ref().map(|inst| inst.quantity()))
        .collect();
    assert_eq!(quantities, vec![Some(10), Some(10), Some(5), None]);

    // Removing 23 drains slot order, leaving a single slot of 2.
    inventory.remove_item("wheat", 23).expect("enough stock");
    let quantities: Vec<Option<u32>> = inventory
        .slots()
        .iter()
        .map(|slot| slot.as_ref().map(|inst| inst.quantity()))
        .collect();
    assert_eq!(quantities, vec![None, None, Some(2), None]);
}

#[test]
fn two_adds_never_exceed_capacity_or_stack_bound() {
    let wheat = small_stack_wheat();
    // Sweep a grid of add pairs against a 3-slot, max-10 container.
    for q1 in [1u32, 7, 10, 15, 29] {
        for q2 in [1u32, 5, 16, 30] {
            let mut inventory = InventoryManager::new(3);
            let capacity = 3 * 10u64;

            let first = inventory.add_item(&wheat, q1);
            let second = inventory.add_item(&wheat, q2);

            let stored = inventory.count("wheat");
            let expected: u64 = [(q1, &first), (q2, &second)]
                .iter()
                .filter(|(_, result)| result.is_ok())
                .map(|(q, _)| *q as u64)
                .sum();
            assert_eq!(stored, expected, "stored total for adds {q1}+{q2}");
            assert!(stored <= capacity);
            for slot in inventory.slots().iter().flatten() {
                assert!(slot.quantity() <= 10, "slot bound for adds {q1}+{q2}");
            }
        }
    }
}

#[test]
fn failed_remove_leaves_stock_untouched() {
    let mut inventory = InventoryManager::new(2);
    let wheat = small_stack_wheat();
    inventory.add_item(&wheat, 13).expect("fits");

    assert!(inventory.remove_item("wheat", 14).is_err());
    assert_eq!(inventory.count("wheat"), 13);
}

// ─────────────────────────────────────────────────────────────────────────────
// Crop growth scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn three_stage_crop_needs_exactly_four_watered_days() {
    let mut field = CropField::new();
    let def = watered_crop(vec![1, 2, 1], false, 0, 0);
    let handle = field
        .plant(&def, GridPosition::new(0, 0), 1)
        .expect("free tile");

    for day in 1..=4 {
        assert!(
            !field.get(handle).expect("alive").is_harvestable(),
            "must not be ready before day {day}"
        );
        // Watering twice in one day changes nothing.
        field.water(handle).expect("alive");
        field.water(handle).expect("alive");
        field.advance_day();
    }
    assert!(field.get(handle).expect("alive").is_harvestable());
}

#[test]
fn unwatered_day_stalls_and_watering_resumes() {
    let mut field = CropField::new();
    let def = watered_crop(vec![1, 2, 1], false, 0, 0);
    let handle = field
        .plant(&def, GridPosition::new(0, 0), 1)
        .expect("free tile");

    // Two watered days of progress.
    for _ in 0..2 {
        field.water(handle).expect("alive");
        field.advance_day();
    }
    let stage_before = field.get(handle).expect("alive").stage();
    let days_before = field.get(handle).expect("alive").days_in_stage();

    // A dry day: zero progress of any kind.
    field.advance_day();
    let crop = field.get(handle).expect("alive");
    assert_eq!(crop.stage(), stage_before);
    assert_eq!(crop.days_in_stage(), days_before);

    // Watering again picks up where it left off: two more days to go.
    field.water(handle).expect("alive");
    field.advance_day();
    assert!(!field.get(handle).expect("alive").is_harvestable());
    field.water(handle).expect("alive");
    field.advance_day();
    assert!(field.get(handle).expect("alive").is_harvestable());
}

#[test]
fn regrowable_crop_cycles_through_dormancy() {
    let mut field = CropField::new();
    let mut rng = StdRng::seed_from_u64(99);
    // Regrow duration 3, resuming at stage 1.
    let def = watered_crop(vec![1, 1], true, 3, 1);
    let handle = field
        .plant(&def, GridPosition::new(2, 2), 1)
        .expect("free tile");

    for _ in 0..2 {
        field.water(handle).expect("alive");
        field.advance_day();
    }
    let harvest = field.harvest(handle, &mut rng).expect("mature");
    assert!(!harvest.destroyed);

    // The crop survives, dormant at the resume stage.
    let crop = field.get(handle).expect("still alive");
    assert!(crop.is_regrowing());
    assert!(!crop.is_harvestable());
    assert_eq!(crop.stage(), 1);

    // Harvestable again only after 3 watered ticks.
    for day in 1..=3 {
        assert!(
            !field.get(handle).expect("alive").is_harvestable(),
            "dormant through day {day}"
        );
        field.water(handle).expect("alive");
        field.advance_day();
    }
    let crop = field.get(handle).expect("alive");
    assert!(crop.is_harvestable());
    assert_eq!(crop.stage(), 1);

    // And the cycle repeats.
    let harvest = field.harvest(handle, &mut rng).expect("mature again");
    assert!(!harvest.destroyed);
}

#[test]
fn destroyed_crop_handle_is_dead_forever() {
    let mut field = CropField::new();
    let mut rng = StdRng::seed_from_u64(4);
    let def = watered_crop(vec![1], false, 0, 0);
    let handle = field
        .plant(&def, GridPosition::new(0, 0), 1)
        .expect("free tile");

    field.water(handle).expect("alive");
    field.advance_day();
    let harvest = field.harvest(handle, &mut rng).expect("mature");
    assert!(harvest.destroyed);

    // The registry no longer advances it, and the handle rejects
    // everything.
    field.advance_day();
    assert_eq!(field.water(handle), Err(CropError::InvalidHandle));
    assert_eq!(field.harvest(handle, &mut rng), Err(CropError::InvalidHandle));
    assert!(field.get(handle).is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Full-session scenario
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn a_week_on_the_farm() {
    let mut ctx = FarmContext::with_default_data(CoreConfig::default())
        .expect("built-in roster is valid");
    let mut rng = StdRng::seed_from_u64(2024);

    // Day 1: buy seeds (the shop is someone else's job — they just appear),
    // grab the hoe, till a row, plant two turnips.
    let seeds = Arc::clone(ctx.items.get("turnip_seeds").expect("roster"));
    let hoe = Arc::clone(ctx.items.get("hoe").expect("roster"));
    ctx.inventory.add_item(&seeds, 4).expect("fits");
    ctx.inventory
        .add_instance(ItemInstance::new(&hoe, 1))
        .expect("fits");

    let tiles = [GridPosition::new(0, 0), GridPosition::new(1, 0)];
    for tile in tiles {
        ctx.use_tool_from_slot(1, tile).expect("hoe works");
        ctx.plant_from_slot(0, tile, Season::Spring, 1)
            .expect("spring planting");
    }
    assert_eq!(ctx.inventory.count("turnip_seeds"), 2);
    assert_eq!(ctx.field.len(), 2);

    // Days 1–4: water everything, end the day.
    let handles: Vec<_> = ctx.field.iter().map(|(handle, _)| handle).collect();
    for _ in 0..4 {
        for &handle in &handles {
            ctx.water(handle).expect("alive");
        }
        ctx.field.advance_day();
    }

    // Day 5: both turnips are ready; harvest them into the bag.
    let mut picked = 0u64;
    for &handle in &handles {
        let harvest = ctx.harvest_into_inventory(handle, &mut rng).expect("mature");
        assert!(harvest.destroyed);
        picked += harvest.quantity as u64;
    }
    assert_eq!(ctx.inventory.count("turnip"), picked);
    assert!(ctx.field.is_empty());

    // Lunch: eat one turnip straight from the bag.
    let turnip_slot = ctx
        .inventory
        .slots()
        .iter()
        .position(|slot| slot.as_ref().is_some_and(|inst| inst.id() == "turnip"))
        .expect("harvest landed");
    ctx.use_from_slot(turnip_slot).expect("edible");
    assert_eq!(ctx.inventory.count("turnip"), picked - 1);

    // Tidy the bag before bed.
    ctx.inventory.sort();
    let first = ctx.inventory.slots()[0].as_ref().expect("sorted to front");
    assert_eq!(first.id(), "hoe", "tools sort ahead of seeds and produce");
}

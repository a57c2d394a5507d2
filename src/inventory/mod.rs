//! Inventory domain — fixed-slot containers and the manager that mutates
//! them.
//!
//! A container is a dumb ordered array of slots; every mutation goes
//! through [`InventoryManager`], which enforces atomicity and fires change
//! notifications.

mod manager;

pub use manager::{InventoryEvent, InventoryManager};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::items::{ItemDef, ItemInstance};
use crate::shared::ItemId;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Local rejection of an inventory operation. Failed calls mutate nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
    #[error("not enough space for {requested} x '{item}'")]
    InsufficientSpace { item: ItemId, requested: u32 },
    #[error("not enough '{item}' in stock: requested {requested}, have {available}")]
    InsufficientStock {
        item: ItemId,
        requested: u32,
        available: u32,
    },
    #[error("slot index {0} is out of bounds")]
    BadSlot(usize),
    #[error("slot {0} is empty")]
    EmptySlot(usize),
}

// ─────────────────────────────────────────────────────────────────────────────
// Container
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed-length ordered sequence of slots, each holding at most one stack
/// group. The length is set at construction and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemInstance>>,
}

impl Inventory {
    /// An empty container with `slot_count` slots (at least one).
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count.max(1)],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<ItemInstance>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ItemInstance> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<ItemInstance>] {
        &mut self.slots
    }

    /// Total units of `id` held across all slots.
    pub fn count(&self, id: &str) -> u64 {
        self.slots
            .iter()
            .filter_map(Option::as_ref)
            .filter(|inst| inst.id() == id)
            .map(|inst| inst.quantity() as u64)
            .sum()
    }

    pub fn has(&self, id: &str, quantity: u32) -> bool {
        self.count(id) >= quantity as u64
    }

    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn has_empty_slot(&self) -> bool {
        self.slots.iter().any(Option::is_none)
    }

    /// How many more units of `def` this container could take: room in
    /// existing mergeable stacks plus one full stack per empty slot.
    pub fn free_capacity_for(&self, def: &ItemDef) -> u64 {
        self.slots
            .iter()
            .map(|slot| match slot {
                None => def.max_stack as u64,
                Some(inst) if accepts_more(inst, def) => inst.stack().space_left() as u64,
                Some(_) => 0,
            })
            .sum()
    }
}

/// Whether `inst` is a valid merge target for more units of `def`. Must
/// agree exactly with the manager's merge pass, or the capacity check and
/// the actual walk would diverge.
pub(crate) fn accepts_more(inst: &ItemInstance, def: &ItemDef) -> bool {
    inst.id() == def.id
        && inst.durability().is_none()
        && !inst.is_equipped()
        && def.max_stack > 1
        && inst.stack().is_stackable()
        && inst.stack().max_stack() == def.max_stack
        && !inst.stack().is_full()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemKind;
    use crate::shared::ItemCategory;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn wheat() -> Arc<ItemDef> {
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

    #[test]
    fn test_empty_container_capacity() {
        let container = Inventory::new(4);
        assert_eq!(container.free_capacity_for(&wheat()), 40);
        assert_eq!(container.count("wheat"), 0);
        assert!(container.has_empty_slot());
    }

    #[test]
    fn test_capacity_counts_partial_stacks() {
        let def = wheat();
        let mut container = Inventory::new(2);
        container.slots_mut()[0] = Some(ItemInstance::new(&def, 7));
        // 3 left in the partial stack + 10 for the empty slot.
        assert_eq!(container.free_capacity_for(&def), 13);
    }

    #[test]
    fn test_zero_slot_container_clamped_to_one() {
        let container = Inventory::new(0);
        assert_eq!(container.slot_count(), 1);
    }
}

//! The explicitly constructed core context.
//!
//! There is no global state anywhere in this crate: whoever hosts the
//! simulation builds a [`FarmContext`] (registries first, then the
//! inventory, then the crop field), passes it to the subsystems that need
//! it, and drops it on teardown. The context also owns the glue between
//! domains — planting consumes a seed *and* registers a crop, harvesting
//! rolls a yield *and* stores it — so neither domain needs to know the
//! other exists.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::data::{self, DataError};
use crate::events::{ListenerId, Listeners};
use crate::farming::{CropError, CropField, CropHandle, CropRegistry, HarvestYield};
use crate::inventory::{InventoryError, InventoryManager};
use crate::items::{ItemError, ItemEvent, ItemInstance, ItemKind, ItemRegistry};
use crate::shared::{GridPosition, Season, TOTAL_INVENTORY_SLOTS};

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

/// Tunables the host hands in at construction. Loadable from RON so a
/// deployment can override defaults without recompiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Slot count of the player inventory.
    pub inventory_slots: usize,
    /// Scales [`ItemInstance::repair_cost`]: the price of repairing from
    /// zero durability to full.
    pub repair_cost_multiplier: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            inventory_slots: TOTAL_INVENTORY_SLOTS,
            repair_cost_multiplier: 50,
        }
    }
}

impl CoreConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, DataError> {
        ron::from_str(text).map_err(DataError::from)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Umbrella error for cross-domain operations. Each variant is the
/// unchanged domain error — nothing is wrapped twice or remapped.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error(transparent)]
    Data(#[from] DataError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Context
// ─────────────────────────────────────────────────────────────────────────────

/// Everything one running farm session owns, in construction order:
/// definition registries, the player inventory, the planted-crop field.
#[derive(Debug)]
pub struct FarmContext {
    pub items: ItemRegistry,
    pub crops: CropRegistry,
    pub inventory: InventoryManager,
    pub field: CropField,
    /// Fan-out for item-level notifications raised by slot operations.
    pub item_events: Listeners<ItemEvent>,
    config: CoreConfig,
}

impl FarmContext {
    /// An empty session: registries unpopulated, inventory and field
    /// clean. Hosts that want the built-in roster use
    /// [`with_default_data`](Self::with_default_data).
    pub fn new(config: CoreConfig) -> Self {
        let items = ItemRegistry::new();
        let crops = CropRegistry::new();
        let inventory = InventoryManager::new(config.inventory_slots);
        let field = CropField::new();
        info!(
            "[Core] Session context created ({} inventory slots)",
            config.inventory_slots
        );
        Self {
            items,
            crops,
            inventory,
            field,
            item_events: Listeners::new(),
            config,
        }
    }

    /// A session seeded with the built-in item and crop rosters.
    pub fn with_default_data(config: CoreConfig) -> Result<Self, DataError> {
        let mut ctx = Self::new(config);
        data::populate_items(&mut ctx.items)?;
        data::populate_crops(&mut ctx.crops, &ctx.items)?;
        Ok(ctx)
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn subscribe_item_events(
        &mut self,
        callback: impl FnMut(&ItemEvent) + 'static,
    ) -> ListenerId {
        self.item_events.subscribe(callback)
    }

    pub fn unsubscribe_item_events(&mut self, id: ListenerId) -> bool {
        self.item_events.unsubscribe(id)
    }

    fn emit_item_events(&mut self, events: Vec<ItemEvent>) {
        for event in &events {
            self.item_events.emit(event);
        }
    }

    /// Peek the instance in `slot` without taking a mutable borrow.
    fn peek_slot(&self, slot: usize) -> Result<&ItemInstance, InventoryError> {
        self.inventory
            .slots()
            .get(slot)
            .ok_or(InventoryError::BadSlot(slot))?
            .as_ref()
            .ok_or(InventoryError::EmptySlot(slot))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Planting
    // ─────────────────────────────────────────────────────────────────────

    /// Sow the seed held in `slot` onto `position`: one unit is consumed
    /// and a crop is registered at stage 0. All checks (seed kind, known
    /// crop, free tile, season, stock) run before anything mutates.
    pub fn plant_from_slot(
        &mut self,
        slot: usize,
        position: GridPosition,
        season: Season,
        day: u32,
    ) -> Result<CropHandle, CoreError> {
        let inst = self.peek_slot(slot)?;
        let crop_id = match &inst.def().kind {
            ItemKind::Seed { crop_id, .. } => crop_id.clone(),
            _ => return Err(ItemError::WrongKind.into()),
        };
        let crop_def = Arc::clone(
            self.crops
                .get(&crop_id)
                .ok_or(CropError::UnknownDefinition(crop_id.clone()))?,
        );
        if self.field.crop_at(position).is_some() {
            return Err(CropError::TileOccupied(position).into());
        }

        let events = self
            .inventory
            .modify_slot(slot, |inst| inst.plant(position, season))??;
        let handle = self.field.plant(&crop_def, position, day)?;
        self.emit_item_events(events);
        Ok(handle)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Daily crop actions
    // ─────────────────────────────────────────────────────────────────────

    /// Water one crop; idempotent within a day.
    pub fn water(&mut self, handle: CropHandle) -> Result<bool, CoreError> {
        Ok(self.field.water(handle)?)
    }

    /// Harvest one crop straight into the inventory. The yield is rolled
    /// first and the add is verified before the crop commits, so a full
    /// inventory leaves the crop harvestable and untouched.
    pub fn harvest_into_inventory(
        &mut self,
        handle: CropHandle,
        rng: &mut impl Rng,
    ) -> Result<HarvestYield, CoreError> {
        let crop = self.field.get(handle).ok_or(CropError::InvalidHandle)?;
        if !crop.is_harvestable() {
            return Err(CropError::NotHarvestable.into());
        }
        let quantity = crop.roll_yield(rng);
        let harvest_id = crop.def().harvest_id.clone();
        let def = Arc::clone(
            self.items
                .get(&harvest_id)
                .ok_or_else(|| ItemError::UnknownDefinition(harvest_id.clone()))?,
        );
        if self.inventory.container().free_capacity_for(&def) < quantity as u64 {
            return Err(InventoryError::InsufficientSpace {
                item: harvest_id,
                requested: quantity,
            }
            .into());
        }

        let harvest = self.field.harvest_with(handle, quantity)?;
        self.inventory.add_item(&def, harvest.quantity)?;
        Ok(harvest)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Held-item actions
    // ─────────────────────────────────────────────────────────────────────

    /// Swing the tool held in `slot` at a tile.
    pub fn use_tool_from_slot(
        &mut self,
        slot: usize,
        position: GridPosition,
    ) -> Result<(), CoreError> {
        let events = self
            .inventory
            .modify_slot(slot, |inst| inst.use_tool_at(position))??;
        self.emit_item_events(events);
        Ok(())
    }

    /// The default use action on the item held in `slot` (eat produce,
    /// swing equipped gear).
    pub fn use_from_slot(&mut self, slot: usize) -> Result<(), CoreError> {
        let events = self.inventory.modify_slot(slot, |inst| inst.use_item())??;
        self.emit_item_events(events);
        Ok(())
    }

    pub fn equip_slot(&mut self, slot: usize) -> Result<(), CoreError> {
        let events = self.inventory.modify_slot(slot, |inst| inst.equip())??;
        self.emit_item_events(events);
        Ok(())
    }

    pub fn unequip_slot(&mut self, slot: usize) -> Result<(), CoreError> {
        let events = self.inventory.modify_slot(slot, |inst| inst.unequip())??;
        self.emit_item_events(events);
        Ok(())
    }

    /// Refine units of the resource held in `slot`, placing the output
    /// back into the inventory. Space for the output is verified before
    /// the input is consumed.
    pub fn refine_from_slot(&mut self, slot: usize, quantity: u32) -> Result<(), CoreError> {
        let inst = self.peek_slot(slot)?;
        let (output_id, refine_yield) = match &inst.def().kind {
            ItemKind::Resource {
                refined_into: Some(output_id),
                refine_yield,
            } => (output_id.clone(), *refine_yield),
            ItemKind::Resource { refined_into: None, .. } => {
                return Err(ItemError::NotRefinable.into())
            }
            _ => return Err(ItemError::WrongKind.into()),
        };
        if quantity == 0 {
            return Err(ItemError::InvalidQuantity.into());
        }
        let output_def = Arc::clone(
            self.items
                .get(&output_id)
                .ok_or_else(|| ItemError::UnknownDefinition(output_id.clone()))?,
        );
        let produced = quantity
            .checked_mul(refine_yield)
            .filter(|&produced| produced > 0 && produced <= output_def.max_stack)
            .ok_or_else(|| ItemError::RefineOverflow(output_id.clone()))?;
        let probe = ItemInstance::new(&output_def, produced);
        if !self.inventory.can_accept(&probe) {
            return Err(InventoryError::InsufficientSpace {
                item: output_id,
                requested: produced,
            }
            .into());
        }

        let items = &self.items;
        let (output, events) = self
            .inventory
            .modify_slot(slot, |inst| inst.refine(quantity, items))??;
        self.inventory.add_instance(output)?;
        self.emit_item_events(events);
        Ok(())
    }

    /// Price of fully repairing the item in `slot` at the configured
    /// multiplier. Zero for items without durability.
    pub fn repair_cost_of_slot(&self, slot: usize) -> Result<u32, CoreError> {
        let inst = self.peek_slot(slot)?;
        Ok(inst.repair_cost(self.config.repair_cost_multiplier))
    }

    /// Fully repair the item in `slot`, returning the cost the caller
    /// owes (payment is the shop collaborator's business).
    pub fn repair_slot(&mut self, slot: usize) -> Result<u32, CoreError> {
        let multiplier = self.config.repair_cost_multiplier;
        let (cost, events) = self.inventory.modify_slot(slot, |inst| {
            let cost = inst.repair_cost(multiplier);
            (cost, inst.repair_fully())
        })?;
        self.emit_item_events(events);
        Ok(cost)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

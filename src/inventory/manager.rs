//! The single mutation path for a container: add, remove, transfer, sort,
//! plus the change-notification fan-out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{accepts_more, Inventory, InventoryError};
use crate::events::{ListenerId, Listeners};
use crate::items::{ItemDef, ItemInstance};

/// Notification fired after a successful inventory mutation — exactly one
/// per call, once every slot has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryEvent {
    Changed,
}

/// Orchestrates all mutation of one [`Inventory`]. Collaborators read
/// slots through it and subscribe for change notifications; nothing else
/// may touch slot quantities.
#[derive(Debug)]
pub struct InventoryManager {
    container: Inventory,
    listeners: Listeners<InventoryEvent>,
}

impl InventoryManager {
    pub fn new(slot_count: usize) -> Self {
        Self::from_container(Inventory::new(slot_count))
    }

    /// Wrap an existing container (e.g. one restored by a persistence
    /// collaborator).
    pub fn from_container(container: Inventory) -> Self {
        Self {
            container,
            listeners: Listeners::new(),
        }
    }

    pub fn container(&self) -> &Inventory {
        &self.container
    }

    /// The current slot sequence. Read-only: all mutation goes through
    /// this manager.
    pub fn slots(&self) -> &[Option<ItemInstance>] {
        self.container.slots()
    }

    pub fn count(&self, id: &str) -> u64 {
        self.container.count(id)
    }

    pub fn has(&self, id: &str, quantity: u32) -> bool {
        self.container.has(id, quantity)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────

    pub fn subscribe(&mut self, callback: impl FnMut(&InventoryEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify_changed(&mut self) {
        self.listeners.emit(&InventoryEvent::Changed);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Add
    // ─────────────────────────────────────────────────────────────────────

    /// Add `quantity` units of `def`, merging into existing stacks first
    /// (slot order), then opening new groups in empty slots. All-or-nothing:
    /// if the full quantity cannot fit, nothing is touched.
    pub fn add_item(&mut self, def: &Arc<ItemDef>, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            warn!("[Inventory] Rejected add of zero '{}'", def.id);
            return Err(InventoryError::ZeroQuantity);
        }
        if self.container.free_capacity_for(def) < quantity as u64 {
            debug!("[Inventory] No room for {} x '{}'", quantity, def.id);
            return Err(InventoryError::InsufficientSpace {
                item: def.id.clone(),
                requested: quantity,
            });
        }

        let mut remaining = quantity;

        // First pass: top up existing stacks of the same definition.
        for slot in self.container.slots_mut() {
            if remaining == 0 {
                break;
            }
            if let Some(inst) = slot {
                if accepts_more(inst, def) {
                    remaining = inst.absorb(remaining);
                }
            }
        }

        // Second pass: open new groups in empty slots.
        for slot in self.container.slots_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let group = remaining.min(def.max_stack);
                *slot = Some(ItemInstance::new(def, group));
                remaining -= group;
            }
        }

        debug_assert_eq!(remaining, 0, "capacity check must cover both passes");
        info!("[Inventory] Added {} x '{}'", quantity, def.id);
        self.notify_changed();
        Ok(())
    }

    /// Place an already-built instance (tool acquisition, refine output,
    /// chest transfer). Stackable instances without wear state merge like
    /// `add_item`; everything else needs one empty slot.
    pub fn add_instance(&mut self, instance: ItemInstance) -> Result<(), InventoryError> {
        if instance.is_destroyed() {
            return Err(InventoryError::ZeroQuantity);
        }
        if !self.can_accept(&instance) {
            debug!(
                "[Inventory] No room for instance of '{}' x {}",
                instance.id(),
                instance.quantity()
            );
            return Err(InventoryError::InsufficientSpace {
                item: instance.id().to_string(),
                requested: instance.quantity(),
            });
        }
        self.place_instance_unchecked(instance);
        self.notify_changed();
        Ok(())
    }

    /// Whether `instance` would fit in full right now.
    pub fn can_accept(&self, instance: &ItemInstance) -> bool {
        if instance_merges(instance) {
            self.container.free_capacity_for(instance.def()) >= instance.quantity() as u64
        } else {
            self.container.has_empty_slot()
        }
    }

    /// Placement walk shared by `add_instance` and `transfer_to`. The
    /// caller must have verified capacity; does not notify.
    fn place_instance_unchecked(&mut self, mut instance: ItemInstance) {
        if instance_merges(&instance) {
            let def = Arc::clone(instance.def());
            let mut remaining = instance.quantity();
            for slot in self.container.slots_mut() {
                if remaining == 0 {
                    break;
                }
                if let Some(inst) = slot {
                    if accepts_more(inst, &def) {
                        remaining = inst.absorb(remaining);
                    }
                }
            }
            if remaining == 0 {
                return;
            }
            instance.set_quantity(remaining);
        }
        for slot in self.container.slots_mut() {
            if slot.is_none() {
                *slot = Some(instance);
                return;
            }
        }
        debug_assert!(false, "can_accept must guarantee an empty slot");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Remove
    // ─────────────────────────────────────────────────────────────────────

    /// Remove `quantity` units of `id`, draining matching slots in slot
    /// order. Fails without touching anything when stock is short.
    pub fn remove_item(&mut self, id: &str, quantity: u32) -> Result<(), InventoryError> {
        if quantity == 0 {
            warn!("[Inventory] Rejected removal of zero '{}'", id);
            return Err(InventoryError::ZeroQuantity);
        }
        let available = self.container.count(id);
        if available < quantity as u64 {
            debug!(
                "[Inventory] Short stock of '{}': requested {}, have {}",
                id, quantity, available
            );
            return Err(InventoryError::InsufficientStock {
                item: id.to_string(),
                requested: quantity,
                available: available.min(u32::MAX as u64) as u32,
            });
        }

        let mut remaining = quantity;
        for slot in self.container.slots_mut() {
            if remaining == 0 {
                break;
            }
            if let Some(inst) = slot {
                if inst.id() == id {
                    remaining -= inst.take(remaining);
                    if inst.is_destroyed() {
                        *slot = None;
                    }
                }
            }
        }

        debug_assert_eq!(remaining, 0);
        info!("[Inventory] Removed {} x '{}'", quantity, id);
        self.notify_changed();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // In-place slot operations
    // ─────────────────────────────────────────────────────────────────────

    /// Run an item operation against the instance in `index`, then settle
    /// the slot: a destroyed instance empties it, and a quantity change
    /// fires the change notification. This is the door for use/equip/
    /// plant/refine actions on held items.
    pub fn modify_slot<R>(
        &mut self,
        index: usize,
        op: impl FnOnce(&mut ItemInstance) -> R,
    ) -> Result<R, InventoryError> {
        let slot = self
            .container
            .slots_mut()
            .get_mut(index)
            .ok_or(InventoryError::BadSlot(index))?;
        let inst = slot.as_mut().ok_or(InventoryError::EmptySlot(index))?;

        let before = inst.quantity();
        let out = op(inst);

        let changed = if inst.is_destroyed() {
            *slot = None;
            true
        } else {
            inst.quantity() != before
        };
        if changed {
            self.notify_changed();
        }
        Ok(out)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transfer
    // ─────────────────────────────────────────────────────────────────────

    /// Move `quantity` units out of `slot_index` into another container
    /// (storage chest, shipping bin). Moves the whole group when the
    /// request covers it, otherwise splits. Fails without mutation when
    /// the receiver has no room.
    pub fn transfer_to(
        &mut self,
        other: &mut InventoryManager,
        slot_index: usize,
        quantity: u32,
    ) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        let slot = self
            .container
            .slots_mut()
            .get_mut(slot_index)
            .ok_or(InventoryError::BadSlot(slot_index))?;
        let inst = slot.as_mut().ok_or(InventoryError::EmptySlot(slot_index))?;
        let id = inst.id().to_string();
        let held = inst.quantity();

        if quantity >= held {
            // Whole-group move.
            if !other.can_accept(inst) {
                return Err(InventoryError::InsufficientSpace {
                    item: id,
                    requested: held,
                });
            }
            let moved = slot.take().map(|inst| {
                other.place_instance_unchecked(inst);
            });
            debug_assert!(moved.is_some());
        } else {
            // Partial move: carve off a sub-stack. Splitting less than the
            // whole group is always valid here because quantity < held.
            let Some(carved) = inst.split(quantity) else {
                return Err(InventoryError::InsufficientStock {
                    item: id,
                    requested: quantity,
                    available: held,
                });
            };
            if !other.can_accept(&carved) {
                // Undo the carve; receiver is full.
                inst.absorb(quantity);
                return Err(InventoryError::InsufficientSpace {
                    item: id,
                    requested: quantity,
                });
            }
            other.place_instance_unchecked(carved);
        }

        info!("[Inventory] Transferred {} x '{}'", quantity.min(held), id);
        other.notify_changed();
        self.notify_changed();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sort
    // ─────────────────────────────────────────────────────────────────────

    /// Stable-order all occupied slots by category, then definition id,
    /// then descending quantity, compacting empties to the end.
    pub fn sort(&mut self) {
        let slots = self.container.slots_mut();
        let mut held: Vec<ItemInstance> = slots.iter_mut().filter_map(Option::take).collect();
        held.sort_by(|a, b| {
            a.def()
                .category
                .cmp(&b.def().category)
                .then_with(|| a.def().id.cmp(&b.def().id))
                .then_with(|| b.quantity().cmp(&a.quantity()))
        });
        for (slot, inst) in slots.iter_mut().zip(held) {
            *slot = Some(inst);
        }
        info!("[Inventory] Sorted {} occupied slots", self.container.occupied_slots());
        self.notify_changed();
    }
}

/// Instances that merge like loose stock: stackable, no wear state, not
/// equipped.
fn instance_merges(instance: &ItemInstance) -> bool {
    instance.stack().is_stackable()
        && instance.durability().is_none()
        && !instance.is_equipped()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

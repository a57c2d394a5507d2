//! Concrete item instances and their per-kind operations.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Durability, DurabilityTransition, ItemDef, ItemKind, ItemRegistry, Stack};
use crate::shared::{GridPosition, ItemId, Season};

// ─────────────────────────────────────────────────────────────────────────────
// Events & errors
// ─────────────────────────────────────────────────────────────────────────────

/// Notification raised by an item mutation. Instances return these to their
/// owner, which fans them out to subscribers once the mutation is complete.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEvent {
    /// The stored quantity actually changed (never fired for no-op adds).
    StackChanged { id: ItemId, quantity: u32 },
    Broke { id: ItemId },
    Repaired { id: ItemId },
    Used { id: ItemId },
    Consumed { id: ItemId, energy_restore: u32 },
    ToolUsed { id: ItemId, position: GridPosition },
    Equipped { id: ItemId },
    Unequipped { id: ItemId },
    Planted {
        seed_id: ItemId,
        crop_id: ItemId,
        position: GridPosition,
    },
    Refined {
        input_id: ItemId,
        output_id: ItemId,
        consumed: u32,
        produced: u32,
    },
}

/// Local rejection of an item operation. Nothing here is fatal — the
/// instance is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ItemError {
    #[error("item is broken and cannot be used")]
    Broken,
    #[error("operation not supported by this item kind")]
    WrongKind,
    #[error("item is not edible")]
    NotEdible,
    #[error("item is already equipped")]
    AlreadyEquipped,
    #[error("item is not equipped")]
    NotEquipped,
    #[error("quantity must be greater than zero")]
    InvalidQuantity,
    #[error("stack is empty")]
    EmptyStack,
    #[error("not enough in stack: need {needed}, have {have}")]
    InsufficientQuantity { needed: u32, have: u32 },
    #[error("item cannot be refined")]
    NotRefinable,
    #[error("refining {0} would produce more than one output stack")]
    RefineOverflow(ItemId),
    #[error("cannot plant '{seed}' in {season:?}")]
    OutOfSeason { seed: ItemId, season: Season },
    #[error("unknown item definition '{0}'")]
    UnknownDefinition(ItemId),
}

// ─────────────────────────────────────────────────────────────────────────────
// Instance
// ─────────────────────────────────────────────────────────────────────────────

/// A concrete item: shared read-only definition plus owned mutable state.
///
/// An instance whose quantity reaches zero is destroyed — containers drop
/// it from the slot that held it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    def: Arc<ItemDef>,
    stack: Stack,
    durability: Option<Durability>,
    equipped: bool,
    /// Per-instance key-value overrides (display name, provenance, …).
    overrides: HashMap<String, String>,
}

impl ItemInstance {
    /// Build an instance of `def` holding `quantity` units (clamped into
    /// the definition's stack bound). Durability starts full when the
    /// definition carries any.
    pub fn new(def: &Arc<ItemDef>, quantity: u32) -> Self {
        let durability = def
            .has_durability()
            .then(|| Durability::new(def.max_durability));
        Self {
            def: Arc::clone(def),
            stack: Stack::new(quantity, def.max_stack),
            durability,
            equipped: false,
            overrides: HashMap::new(),
        }
    }

    pub fn def(&self) -> &Arc<ItemDef> {
        &self.def
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn quantity(&self) -> u32 {
        self.stack.quantity()
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn durability(&self) -> Option<&Durability> {
        self.durability.as_ref()
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    /// Quantity zero means this instance no longer exists.
    pub fn is_destroyed(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn set_override(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.overrides.insert(key.into(), value.into());
    }

    pub fn override_value(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Usability & merging
    // ─────────────────────────────────────────────────────────────────────

    /// Broken items are unusable unless the definition says otherwise;
    /// items without durability are always usable.
    pub fn can_use(&self) -> bool {
        match &self.durability {
            Some(dur) if dur.is_broken() => self.def.usable_while_broken,
            _ => true,
        }
    }

    /// Merging is definition identity plus the stack-level checks; items
    /// carrying wear state or an equipped flag never merge.
    pub fn can_merge_with(&self, other: &ItemInstance) -> bool {
        self.def.id == other.def.id
            && self.durability.is_none()
            && other.durability.is_none()
            && !self.equipped
            && !other.equipped
            && self.stack.can_merge_with(&other.stack)
    }

    /// Add units into this group, returning the overflow.
    pub(crate) fn absorb(&mut self, amount: u32) -> u32 {
        self.stack.add(amount)
    }

    /// Take up to `amount` units out, returning how many came out.
    pub(crate) fn take(&mut self, amount: u32) -> u32 {
        self.stack.remove(amount)
    }

    /// Overwrite the group size, clamped to the stack bound.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.stack.set(quantity);
    }

    /// Split part of this group into a new instance. Same rejection rules
    /// as [`Stack::split`]; durability-bearing items hold one unit and can
    /// therefore never split.
    pub fn split(&mut self, amount: u32) -> Option<ItemInstance> {
        let stack = self.stack.split(amount)?;
        Some(ItemInstance {
            def: Arc::clone(&self.def),
            stack,
            durability: None,
            equipped: false,
            overrides: self.overrides.clone(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Durability passthrough
    // ─────────────────────────────────────────────────────────────────────

    /// Apply wear. Items without durability ignore this entirely.
    pub fn damage(&mut self, amount: u32) -> Vec<ItemEvent> {
        match &mut self.durability {
            Some(dur) => match dur.damage(amount) {
                Some(DurabilityTransition::Broke) => vec![ItemEvent::Broke {
                    id: self.def.id.clone(),
                }],
                _ => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    /// Restore wear. Items without durability ignore this entirely.
    pub fn repair(&mut self, amount: u32) -> Vec<ItemEvent> {
        match &mut self.durability {
            Some(dur) => match dur.repair(amount) {
                Some(DurabilityTransition::Repaired) => vec![ItemEvent::Repaired {
                    id: self.def.id.clone(),
                }],
                _ => Vec::new(),
            },
            None => Vec::new(),
        }
    }

    pub fn repair_fully(&mut self) -> Vec<ItemEvent> {
        match self.durability.as_ref().map(Durability::max) {
            Some(max) => self.repair(max),
            None => Vec::new(),
        }
    }

    /// Repair price at the given multiplier; zero for items without
    /// durability or already at full.
    pub fn repair_cost(&self, multiplier: u32) -> u32 {
        self.durability
            .as_ref()
            .map(|dur| dur.repair_cost(multiplier))
            .unwrap_or(0)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Use — shared entry point, narrowed per kind
    // ─────────────────────────────────────────────────────────────────────

    /// The default use action. Edible produce consumes one unit; equipment
    /// must be equipped; everything else just checks usability.
    pub fn use_item(&mut self) -> Result<Vec<ItemEvent>, ItemError> {
        if !self.can_use() {
            return Err(ItemError::Broken);
        }
        match &self.def.kind {
            ItemKind::Produce {
                edible,
                energy_restore,
            } => {
                if !*edible {
                    return Err(ItemError::NotEdible);
                }
                if self.stack.is_empty() {
                    return Err(ItemError::EmptyStack);
                }
                let energy_restore = *energy_restore;
                self.stack.remove(1);
                Ok(vec![
                    ItemEvent::Consumed {
                        id: self.def.id.clone(),
                        energy_restore,
                    },
                    ItemEvent::StackChanged {
                        id: self.def.id.clone(),
                        quantity: self.stack.quantity(),
                    },
                ])
            }
            ItemKind::Equipment { .. } => {
                if !self.equipped {
                    return Err(ItemError::NotEquipped);
                }
                Ok(vec![ItemEvent::Used {
                    id: self.def.id.clone(),
                }])
            }
            _ => Ok(vec![ItemEvent::Used {
                id: self.def.id.clone(),
            }]),
        }
    }

    /// Swing a tool at a tile. Wears the tool down by the definition's
    /// per-use loss; the break transition (if any) rides along.
    pub fn use_tool_at(&mut self, position: GridPosition) -> Result<Vec<ItemEvent>, ItemError> {
        let per_use = match self.def.kind {
            ItemKind::Tool { durability_per_use } => durability_per_use,
            _ => return Err(ItemError::WrongKind),
        };
        if !self.can_use() {
            return Err(ItemError::Broken);
        }
        let mut events = vec![ItemEvent::ToolUsed {
            id: self.def.id.clone(),
            position,
        }];
        events.extend(self.damage(per_use));
        Ok(events)
    }

    /// Toggle equipment on. Fails when already equipped or broken.
    pub fn equip(&mut self) -> Result<Vec<ItemEvent>, ItemError> {
        if !matches!(self.def.kind, ItemKind::Equipment { .. }) {
            return Err(ItemError::WrongKind);
        }
        if self.equipped {
            return Err(ItemError::AlreadyEquipped);
        }
        if !self.can_use() {
            return Err(ItemError::Broken);
        }
        self.equipped = true;
        Ok(vec![ItemEvent::Equipped {
            id: self.def.id.clone(),
        }])
    }

    pub fn unequip(&mut self) -> Result<Vec<ItemEvent>, ItemError> {
        if !matches!(self.def.kind, ItemKind::Equipment { .. }) {
            return Err(ItemError::WrongKind);
        }
        if !self.equipped {
            return Err(ItemError::NotEquipped);
        }
        self.equipped = false;
        Ok(vec![ItemEvent::Unequipped {
            id: self.def.id.clone(),
        }])
    }

    /// Sow one seed. Consumes exactly one unit on success and reports the
    /// planting intent; creating the planted crop is the planting
    /// collaborator's job, not the seed's.
    pub fn plant(
        &mut self,
        position: GridPosition,
        season: Season,
    ) -> Result<Vec<ItemEvent>, ItemError> {
        let (crop_id, seasons) = match &self.def.kind {
            ItemKind::Seed { crop_id, seasons } => (crop_id.clone(), seasons),
            _ => return Err(ItemError::WrongKind),
        };
        if !seasons.contains(&season) {
            return Err(ItemError::OutOfSeason {
                seed: self.def.id.clone(),
                season,
            });
        }
        if self.stack.is_empty() {
            return Err(ItemError::EmptyStack);
        }
        self.stack.remove(1);
        Ok(vec![
            ItemEvent::Planted {
                seed_id: self.def.id.clone(),
                crop_id,
                position,
            },
            ItemEvent::StackChanged {
                id: self.def.id.clone(),
                quantity: self.stack.quantity(),
            },
        ])
    }

    /// Refine `quantity` units into a new instance of the linked output
    /// definition. All-or-nothing: any rejection leaves this stack intact.
    pub fn refine(
        &mut self,
        quantity: u32,
        items: &ItemRegistry,
    ) -> Result<(ItemInstance, Vec<ItemEvent>), ItemError> {
        let (output_id, refine_yield) = match &self.def.kind {
            ItemKind::Resource {
                refined_into: Some(output_id),
                refine_yield,
            } => (output_id.clone(), *refine_yield),
            ItemKind::Resource { refined_into: None, .. } => {
                return Err(ItemError::NotRefinable)
            }
            _ => return Err(ItemError::WrongKind),
        };
        if quantity == 0 {
            return Err(ItemError::InvalidQuantity);
        }
        let have = self.stack.quantity();
        if have < quantity {
            return Err(ItemError::InsufficientQuantity {
                needed: quantity,
                have,
            });
        }
        let output_def = items
            .get(&output_id)
            .ok_or_else(|| ItemError::UnknownDefinition(output_id.clone()))?;
        let produced = quantity
            .checked_mul(refine_yield)
            .filter(|&produced| produced > 0 && produced <= output_def.max_stack)
            .ok_or_else(|| ItemError::RefineOverflow(output_id.clone()))?;

        self.stack.remove(quantity);
        let output = ItemInstance::new(output_def, produced);
        let events = vec![
            ItemEvent::Refined {
                input_id: self.def.id.clone(),
                output_id,
                consumed: quantity,
                produced,
            },
            ItemEvent::StackChanged {
                id: self.def.id.clone(),
                quantity: self.stack.quantity(),
            },
        ];
        Ok((output, events))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

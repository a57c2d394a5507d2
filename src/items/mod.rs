//! Item domain — definitions, composable capabilities, and instances.
//!
//! An [`ItemDef`] is the immutable template shared by every instance of one
//! item kind; an [`ItemInstance`] is a concrete occurrence with its own
//! mutable stack/durability state. Behavior that varies per kind lives in
//! the closed [`ItemKind`] union, dispatched by pattern match.

mod capabilities;
mod instance;

pub use capabilities::{Durability, DurabilityTransition, Stack};
pub use instance::{ItemError, ItemEvent, ItemInstance};

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::shared::{ItemCategory, ItemId, Season};

// ─────────────────────────────────────────────────────────────────────────────
// Item kinds
// ─────────────────────────────────────────────────────────────────────────────

/// Type discriminant plus type-specific template fields. The variant set is
/// fixed: new behavior means a new variant here, not a new subclass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Generic crafting material with no use action of its own.
    Material,
    /// Crop-harvest item; edible produce restores energy when consumed.
    Produce { edible: bool, energy_restore: u32 },
    /// Wearable gear with an equipped toggle.
    Equipment { attack: u32, defense: u32 },
    /// Raw resource that can be refined into another item.
    Resource {
        /// Item produced by refining, if refinable at all.
        refined_into: Option<ItemId>,
        /// Units of output per unit of input consumed.
        refine_yield: u32,
    },
    /// Plantable seed linked to a crop definition.
    Seed {
        crop_id: ItemId,
        seasons: Vec<Season>,
    },
    /// Tool that loses durability on use.
    Tool { durability_per_use: u32 },
}

// ─────────────────────────────────────────────────────────────────────────────
// Item definitions
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable template describing one kind of item. Shared via `Arc` by all
/// instances of that kind — instances never mutate their definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub category: ItemCategory,
    /// Max units per slot (1 = non-stackable).
    pub max_stack: u32,
    /// Max durability; 0 means durability does not apply to this kind.
    pub max_durability: u32,
    /// Whether a broken instance may still be used. Default: it may not.
    pub usable_while_broken: bool,
    pub sell_price: u32,
    /// Free-form classification tags ("giftable", "smeltable", …).
    pub tags: BTreeSet<String>,
    pub kind: ItemKind,
}

impl ItemDef {
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    pub fn has_durability(&self) -> bool {
        self.max_durability > 0
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Item registry
// ─────────────────────────────────────────────────────────────────────────────

/// All known item definitions, id → shared template. Populated by the data
/// layer at construction; lookups hand out cheap `Arc` clones.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: HashMap<ItemId, Arc<ItemDef>>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, replacing any previous entry with the same id.
    pub fn insert(&mut self, def: ItemDef) -> Arc<ItemDef> {
        let def = Arc::new(def);
        self.items.insert(def.id.clone(), Arc::clone(&def));
        def
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ItemDef>> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemDef>> {
        self.items.values()
    }
}

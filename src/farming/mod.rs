//! Farming domain — crop templates, the per-crop growth state machine, and
//! the registry that advances every planted crop on the day tick.

mod crop;
mod registry;

pub use crop::{CropInstance, GrowthTick, HarvestYield};
pub use registry::{CropField, CropHandle};

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::{GridPosition, ItemId, Season};

// ─────────────────────────────────────────────────────────────────────────────
// Crop definitions
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable template for one crop kind.
///
/// `stage_days` holds how many days the crop spends in each growth stage;
/// its length is the stage count. A crop is ready to harvest once every
/// stage duration has elapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDef {
    pub id: ItemId,
    pub name: String,
    /// Seed item that plants this crop.
    pub seed_id: ItemId,
    /// Item produced on harvest.
    pub harvest_id: ItemId,
    /// Seasons the crop grows in; empty means every season.
    pub seasons: Vec<Season>,
    /// Days per growth stage (len = stage count, each >= 1).
    pub stage_days: Vec<u8>,
    /// Whether the crop stalls on days it was not watered.
    pub requires_watering: bool,
    pub regrows: bool,
    /// Days of dormancy after a harvest before the next yield (if regrows).
    pub regrow_days: u8,
    /// Stage the crop visually resumes at after regrowing.
    pub regrow_stage: u8,
    /// Harvest yield range, rolled uniformly.
    pub yield_min: u32,
    pub yield_max: u32,
}

impl CropDef {
    pub fn stage_count(&self) -> usize {
        self.stage_days.len()
    }

    /// Index of the last growth stage. Definitions always have at least
    /// one stage; an empty duration table degenerates to stage 0.
    pub fn final_stage(&self) -> u8 {
        (self.stage_count().max(1) - 1) as u8
    }

    /// Resume stage clamped into the valid stage range.
    pub fn clamped_regrow_stage(&self) -> u8 {
        self.regrow_stage.min(self.final_stage())
    }

    pub fn days_for_stage(&self, stage: u8) -> u8 {
        self.stage_days
            .get(stage as usize)
            .copied()
            .unwrap_or(1)
            .max(1)
    }

    pub fn grows_in(&self, season: Season) -> bool {
        self.seasons.is_empty() || self.seasons.contains(&season)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Events & errors
// ─────────────────────────────────────────────────────────────────────────────

/// Notifications raised by the crop registry after a mutation settles.
#[derive(Debug, Clone, PartialEq)]
pub enum CropEvent {
    Planted {
        handle: CropHandle,
        crop_id: ItemId,
        position: GridPosition,
    },
    StageAdvanced {
        handle: CropHandle,
        stage: u8,
    },
    BecameHarvestable {
        handle: CropHandle,
    },
    Harvested {
        handle: CropHandle,
        item_id: ItemId,
        quantity: u32,
        destroyed: bool,
    },
    RegrowStarted {
        handle: CropHandle,
    },
    RegrowCompleted {
        handle: CropHandle,
        stage: u8,
    },
    Removed {
        handle: CropHandle,
    },
}

/// Local rejection of a crop operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    #[error("no live crop for that handle")]
    InvalidHandle,
    #[error("crop is not ready to harvest")]
    NotHarvestable,
    #[error("a crop is already planted at {0:?}")]
    TileOccupied(GridPosition),
    #[error("unknown crop definition '{0}'")]
    UnknownDefinition(ItemId),
}

// ─────────────────────────────────────────────────────────────────────────────
// Crop definition registry
// ─────────────────────────────────────────────────────────────────────────────

/// All known crop definitions, id → shared template.
#[derive(Debug, Clone, Default)]
pub struct CropRegistry {
    crops: HashMap<ItemId, Arc<CropDef>>,
}

impl CropRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, def: CropDef) -> Arc<CropDef> {
        let def = Arc::new(def);
        self.crops.insert(def.id.clone(), Arc::clone(&def));
        def
    }

    pub fn get(&self, id: &str) -> Option<&Arc<CropDef>> {
        self.crops.get(id)
    }

    /// Look a crop up by the seed that plants it.
    pub fn find_by_seed(&self, seed_id: &str) -> Option<&Arc<CropDef>> {
        self.crops.values().find(|def| def.seed_id == seed_id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.crops.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CropDef>> {
        self.crops.values()
    }
}

//! The per-crop growth state machine.
//!
//! A planted crop moves through its definition's stages one watered day at
//! a time, sits harvestable once every stage duration has elapsed, and —
//! for regrowable kinds — cycles through a dormant regrow phase after each
//! harvest instead of being destroyed.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{CropDef, CropError};
use crate::shared::{GridPosition, ItemId};

/// What one day tick did to a crop. The registry turns these into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthTick {
    /// Watering was required and missing — zero progress today.
    Stalled,
    /// Accumulated a day in the current stage without finishing it.
    Progressed { stage: u8, days_in_stage: u8 },
    /// Finished a stage and moved to the next one.
    StageAdvanced { stage: u8 },
    /// Finished the final stage — ready to harvest from now on.
    BecameHarvestable,
    /// Already harvestable (or out of stages) — nothing to do.
    Idle,
    /// Counted one day of the regrow dormancy.
    RegrowTicked { days_elapsed: u8 },
    /// Dormancy over — fruit is back, sitting at the resume stage.
    RegrowCompleted { stage: u8 },
}

/// Result of a successful harvest.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestYield {
    /// Item definition the yield is denominated in.
    pub item_id: ItemId,
    pub quantity: u32,
    /// True when the crop was consumed by the harvest (non-regrowable).
    pub destroyed: bool,
}

/// One planted crop: shared definition plus owned mutable growth state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInstance {
    def: Arc<CropDef>,
    position: GridPosition,
    /// Day counter value when the crop was planted, for age queries.
    planted_day: u32,
    stage: u8,
    days_in_stage: u8,
    /// Latched once every stage duration has elapsed; cleared by harvest.
    mature: bool,
    watered_today: bool,
    regrowing: bool,
    regrow_days_elapsed: u8,
}

impl CropInstance {
    /// A freshly planted crop at stage 0.
    pub fn new(def: &Arc<CropDef>, position: GridPosition, planted_day: u32) -> Self {
        Self {
            def: Arc::clone(def),
            position,
            planted_day,
            stage: 0,
            days_in_stage: 0,
            mature: false,
            watered_today: false,
            regrowing: false,
            regrow_days_elapsed: 0,
        }
    }

    pub fn def(&self) -> &Arc<CropDef> {
        &self.def
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn planted_day(&self) -> u32 {
        self.planted_day
    }

    pub fn stage(&self) -> u8 {
        self.stage
    }

    pub fn days_in_stage(&self) -> u8 {
        self.days_in_stage
    }

    pub fn watered_today(&self) -> bool {
        self.watered_today
    }

    pub fn is_regrowing(&self) -> bool {
        self.regrowing
    }

    pub fn regrow_days_elapsed(&self) -> u8 {
        self.regrow_days_elapsed
    }

    /// Ready to pick: fully grown and not dormant.
    pub fn is_harvestable(&self) -> bool {
        self.mature && !self.regrowing
    }

    /// Mark the crop watered for today. Idempotent within a day — the
    /// flag is consumed (and cleared) by the next tick evaluation.
    /// Returns whether the flag was newly set.
    pub fn water(&mut self) -> bool {
        let newly = !self.watered_today;
        self.watered_today = true;
        newly
    }

    /// Evaluate one day tick. Call exactly once per in-game day; the
    /// watered flag is cleared on every path out of here.
    pub fn advance_day(&mut self) -> GrowthTick {
        let tick = if self.regrowing {
            // Dormancy counts a day when watering is satisfied (or not
            // demanded at all).
            if !self.def.requires_watering || self.watered_today {
                self.regrow_days_elapsed = self.regrow_days_elapsed.saturating_add(1);
            }
            if self.regrow_days_elapsed >= self.def.regrow_days {
                self.regrowing = false;
                self.regrow_days_elapsed = 0;
                self.stage = self.def.clamped_regrow_stage();
                self.days_in_stage = 0;
                self.mature = true;
                GrowthTick::RegrowCompleted { stage: self.stage }
            } else {
                GrowthTick::RegrowTicked {
                    days_elapsed: self.regrow_days_elapsed,
                }
            }
        } else if self.def.requires_watering && !self.watered_today {
            GrowthTick::Stalled
        } else if self.mature {
            GrowthTick::Idle
        } else {
            self.days_in_stage = self.days_in_stage.saturating_add(1);
            if self.days_in_stage >= self.def.days_for_stage(self.stage) {
                self.days_in_stage = 0;
                if self.stage >= self.def.final_stage() {
                    self.mature = true;
                    GrowthTick::BecameHarvestable
                } else {
                    self.stage += 1;
                    GrowthTick::StageAdvanced { stage: self.stage }
                }
            } else {
                GrowthTick::Progressed {
                    stage: self.stage,
                    days_in_stage: self.days_in_stage,
                }
            }
        };
        self.watered_today = false;
        tick
    }

    /// Roll a yield without mutating anything. Defensive about inverted
    /// ranges in hand-written data.
    pub fn roll_yield(&self, rng: &mut impl Rng) -> u32 {
        let lo = self.def.yield_min;
        let hi = self.def.yield_max.max(lo);
        rng.gen_range(lo..=hi)
    }

    /// Pick the crop. Regrowable kinds go dormant at the resume stage;
    /// everything else reports its own destruction (the registry clears
    /// the slot).
    pub fn harvest(&mut self, rng: &mut impl Rng) -> Result<HarvestYield, CropError> {
        if !self.is_harvestable() {
            return Err(CropError::NotHarvestable);
        }
        let quantity = self.roll_yield(rng);
        Ok(self.complete_harvest(quantity))
    }

    /// Finish a harvest whose yield was already rolled. The caller must
    /// have checked harvestability.
    pub(crate) fn complete_harvest(&mut self, quantity: u32) -> HarvestYield {
        let destroyed = !self.def.regrows;
        if self.def.regrows {
            self.regrowing = true;
            self.regrow_days_elapsed = 0;
            self.mature = false;
            self.stage = self.def.clamped_regrow_stage();
            self.days_in_stage = 0;
            self.watered_today = false;
        }
        HarvestYield {
            item_id: self.def.harvest_id.clone(),
            quantity,
            destroyed,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! The arena of live, planted crops.
//!
//! Crops are owned by stable generational handles rather than references:
//! a harvest that destroys a crop clears its arena slot and bumps the
//! generation, so any handle the caller kept becomes permanently invalid
//! instead of pointing at whatever gets planted there next.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CropDef, CropError, CropEvent, CropInstance, GrowthTick, HarvestYield};
use crate::events::{ListenerId, Listeners};
use crate::shared::GridPosition;

/// Stable handle to one planted crop. Survives unrelated plant/remove
/// churn; dies with its crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Entry {
    generation: u32,
    crop: Option<CropInstance>,
}

/// All live crops for the active session. Membership changes only through
/// explicit [`plant`](CropField::plant) / [`remove`](CropField::remove)
/// (or a destroying harvest) — never implicitly.
#[derive(Debug, Default)]
pub struct CropField {
    entries: Vec<Entry>,
    free: Vec<u32>,
    listeners: Listeners<CropEvent>,
}

impl CropField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live crops.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.crop.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| entry.crop.is_none())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CropHandle, &CropInstance)> {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            entry.crop.as_ref().map(|crop| {
                (
                    CropHandle {
                        index: index as u32,
                        generation: entry.generation,
                    },
                    crop,
                )
            })
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────

    pub fn subscribe(&mut self, callback: impl FnMut(&CropEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────

    pub fn get(&self, handle: CropHandle) -> Option<&CropInstance> {
        self.entries
            .get(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
            .and_then(|entry| entry.crop.as_ref())
    }

    fn get_mut(&mut self, handle: CropHandle) -> Option<&mut CropInstance> {
        self.entries
            .get_mut(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
            .and_then(|entry| entry.crop.as_mut())
    }

    pub fn contains(&self, handle: CropHandle) -> bool {
        self.get(handle).is_some()
    }

    /// The live crop planted at `position`, if any.
    pub fn crop_at(&self, position: GridPosition) -> Option<(CropHandle, &CropInstance)> {
        self.iter().find(|(_, crop)| crop.position() == position)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Planting & removal
    // ─────────────────────────────────────────────────────────────────────

    /// The planting factory: create a crop of `def` at stage 0 on
    /// `position`, register it, and hand back its handle. One crop per
    /// tile.
    pub fn plant(
        &mut self,
        def: &Arc<CropDef>,
        position: GridPosition,
        day: u32,
    ) -> Result<CropHandle, CropError> {
        if self.crop_at(position).is_some() {
            debug!("[Farming] Tile ({}, {}) already has a crop", position.x, position.y);
            return Err(CropError::TileOccupied(position));
        }

        let crop = CropInstance::new(def, position, day);
        let handle = match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.crop = Some(crop);
                CropHandle {
                    index,
                    generation: entry.generation,
                }
            }
            None => {
                self.entries.push(Entry {
                    generation: 0,
                    crop: Some(crop),
                });
                CropHandle {
                    index: (self.entries.len() - 1) as u32,
                    generation: 0,
                }
            }
        };

        info!(
            "[Farming] Planted '{}' at ({}, {}) on day {}",
            def.id, position.x, position.y, day
        );
        self.listeners.emit(&CropEvent::Planted {
            handle,
            crop_id: def.id.clone(),
            position,
        });
        Ok(handle)
    }

    /// Unregister a crop (player digs it up, season kills it). Idempotent:
    /// removing a stale or absent handle is a quiet no-op returning false.
    pub fn remove(&mut self, handle: CropHandle) -> bool {
        let Some(entry) = self
            .entries
            .get_mut(handle.index as usize)
            .filter(|entry| entry.generation == handle.generation)
        else {
            return false;
        };
        if entry.crop.take().is_none() {
            return false;
        }
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.listeners.emit(&CropEvent::Removed { handle });
        true
    }

    // ─────────────────────────────────────────────────────────────────────
    // Daily actions
    // ─────────────────────────────────────────────────────────────────────

    /// Water one crop. Idempotent within a day; returns whether the flag
    /// was newly set.
    pub fn water(&mut self, handle: CropHandle) -> Result<bool, CropError> {
        let crop = self.get_mut(handle).ok_or(CropError::InvalidHandle)?;
        Ok(crop.water())
    }

    /// Harvest one crop, rolling the yield from `rng`.
    pub fn harvest(
        &mut self,
        handle: CropHandle,
        rng: &mut impl Rng,
    ) -> Result<HarvestYield, CropError> {
        let crop = self.get(handle).ok_or(CropError::InvalidHandle)?;
        if !crop.is_harvestable() {
            return Err(CropError::NotHarvestable);
        }
        let quantity = crop.roll_yield(rng);
        self.harvest_with(handle, quantity)
    }

    /// Harvest with a pre-rolled yield (the context rolls first so it can
    /// verify inventory space before committing).
    pub(crate) fn harvest_with(
        &mut self,
        handle: CropHandle,
        quantity: u32,
    ) -> Result<HarvestYield, CropError> {
        let crop = self.get_mut(handle).ok_or(CropError::InvalidHandle)?;
        if !crop.is_harvestable() {
            return Err(CropError::NotHarvestable);
        }
        let harvest = crop.complete_harvest(quantity);

        if harvest.destroyed {
            let entry = &mut self.entries[handle.index as usize];
            entry.crop = None;
            entry.generation = entry.generation.wrapping_add(1);
            self.free.push(handle.index);
        }

        info!(
            "[Farming] Harvested {} x '{}'{}",
            harvest.quantity,
            harvest.item_id,
            if harvest.destroyed { "" } else { " (regrowing)" }
        );
        self.listeners.emit(&CropEvent::Harvested {
            handle,
            item_id: harvest.item_id.clone(),
            quantity: harvest.quantity,
            destroyed: harvest.destroyed,
        });
        if !harvest.destroyed {
            self.listeners.emit(&CropEvent::RegrowStarted { handle });
        }
        Ok(harvest)
    }

    /// The day tick: advance every live crop exactly once. Iteration
    /// order between crops is unspecified — no crop reads another's
    /// state. Events fire only after every crop has been advanced.
    pub fn advance_day(&mut self) {
        let mut pending = Vec::new();
        let mut advanced = 0usize;

        for (index, entry) in self.entries.iter_mut().enumerate() {
            let Some(crop) = entry.crop.as_mut() else {
                continue; // cleared slot — skipped, not fatal
            };
            let handle = CropHandle {
                index: index as u32,
                generation: entry.generation,
            };
            advanced += 1;
            match crop.advance_day() {
                GrowthTick::StageAdvanced { stage } => {
                    pending.push(CropEvent::StageAdvanced { handle, stage });
                }
                GrowthTick::BecameHarvestable => {
                    pending.push(CropEvent::BecameHarvestable { handle });
                }
                GrowthTick::RegrowCompleted { stage } => {
                    pending.push(CropEvent::RegrowCompleted { handle, stage });
                }
                GrowthTick::Stalled
                | GrowthTick::Progressed { .. }
                | GrowthTick::Idle
                | GrowthTick::RegrowTicked { .. } => {}
            }
        }

        debug!("[Farming] Day tick advanced {} crops", advanced);
        for event in &pending {
            self.listeners.emit(event);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Season;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn turnip() -> Arc<CropDef> {
        Arc::new(CropDef {
            id: "turnip".into(),
            name: "Turnip".into(),
            seed_id: "turnip_seeds".into(),
            harvest_id: "turnip".into(),
            seasons: vec![Season::Spring],
            stage_days: vec![1, 1],
            requires_watering: true,
            regrows: false,
            regrow_days: 0,
            regrow_stage: 0,
            yield_min: 1,
            yield_max: 1,
        })
    }

    fn strawberry() -> Arc<CropDef> {
        Arc::new(CropDef {
            id: "strawberry".into(),
            name: "Strawberry".into(),
            seed_id: "strawberry_seeds".into(),
            harvest_id: "strawberry".into(),
            seasons: vec![Season::Spring],
            stage_days: vec![1, 1],
            requires_watering: false,
            regrows: true,
            regrow_days: 2,
            regrow_stage: 1,
            yield_min: 1,
            yield_max: 2,
        })
    }

    fn grow_to_maturity(field: &mut CropField, handle: CropHandle) {
        while !field.get(handle).map(|c| c.is_harvestable()).unwrap_or(true) {
            let _ = field.water(handle);
            field.advance_day();
        }
    }

    #[test]
    fn test_plant_registers_and_rejects_occupied_tile() {
        let mut field = CropField::new();
        let def = turnip();
        let pos = GridPosition::new(3, 4);

        let handle = field.plant(&def, pos, 1).expect("free tile");
        assert!(field.contains(handle));
        assert_eq!(field.len(), 1);
        assert_eq!(field.crop_at(pos).map(|(h, _)| h), Some(handle));

        assert_eq!(
            field.plant(&def, pos, 1),
            Err(CropError::TileOccupied(pos))
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut field = CropField::new();
        let handle = field
            .plant(&turnip(), GridPosition::new(0, 0), 1)
            .expect("free tile");

        assert!(field.remove(handle));
        assert!(!field.remove(handle));
        assert!(!field.contains(handle));
        assert!(field.is_empty());
    }

    #[test]
    fn test_destroying_harvest_invalidates_handle() {
        let mut field = CropField::new();
        let mut rng = StdRng::seed_from_u64(1);
        let handle = field
            .plant(&turnip(), GridPosition::new(0, 0), 1)
            .expect("free tile");

        grow_to_maturity(&mut field, handle);
        let harvest = field.harvest(handle, &mut rng).expect("mature");
        assert!(harvest.destroyed);

        // The handle is dead for every future call.
        assert_eq!(field.water(handle), Err(CropError::InvalidHandle));
        assert_eq!(
            field.harvest(handle, &mut rng),
            Err(CropError::InvalidHandle)
        );

        // Replanting the tile reuses the slot but not the handle.
        let replanted = field
            .plant(&turnip(), GridPosition::new(0, 0), 9)
            .expect("tile free again");
        assert_ne!(replanted, handle);
        assert!(!field.contains(handle));
        assert!(field.contains(replanted));
    }

    #[test]
    fn test_regrowable_harvest_keeps_crop_alive() {
        let mut field = CropField::new();
        let mut rng = StdRng::seed_from_u64(2);
        let handle = field
            .plant(&strawberry(), GridPosition::new(1, 1), 1)
            .expect("free tile");

        grow_to_maturity(&mut field, handle);
        let harvest = field.harvest(handle, &mut rng).expect("mature");
        assert!(!harvest.destroyed);
        assert!(field.contains(handle));
        assert!(field.get(handle).unwrap().is_regrowing());

        // Two dormancy days later the fruit is back.
        field.advance_day();
        field.advance_day();
        assert!(field.get(handle).unwrap().is_harvestable());
    }

    #[test]
    fn test_day_tick_advances_every_crop_once() {
        let mut field = CropField::new();
        let def = strawberry(); // no watering needed
        let a = field.plant(&def, GridPosition::new(0, 0), 1).unwrap();
        let b = field.plant(&def, GridPosition::new(1, 0), 1).unwrap();

        field.advance_day();
        assert_eq!(field.get(a).unwrap().stage(), 1);
        assert_eq!(field.get(b).unwrap().stage(), 1);
    }

    #[test]
    fn test_events_fire_after_the_full_tick() {
        let mut field = CropField::new();
        let def = strawberry();
        field.plant(&def, GridPosition::new(0, 0), 1).unwrap();
        field.plant(&def, GridPosition::new(1, 0), 1).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        field.subscribe(move |event| {
            if let CropEvent::BecameHarvestable { handle } = event {
                seen_clone.borrow_mut().push(*handle);
            }
        });

        field.advance_day();
        assert!(seen.borrow().is_empty());
        field.advance_day();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_crop_events() {
        let mut field = CropField::new();
        let seen = Rc::new(RefCell::new(0u32));
        let seen_clone = Rc::clone(&seen);
        let id = field.subscribe(move |_| *seen_clone.borrow_mut() += 1);

        field.plant(&turnip(), GridPosition::new(0, 0), 1).unwrap();
        assert_eq!(*seen.borrow(), 1);

        assert!(field.unsubscribe(id));
        field.plant(&turnip(), GridPosition::new(1, 0), 1).unwrap();
        assert_eq!(*seen.borrow(), 1);
    }
}

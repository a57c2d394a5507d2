//! Built-in crop roster.
//!
//! Growth schedules from the game-design sheet:
//!   Spring: turnip (4d), potato (6d), strawberry (8d, regrows 4d)
//!   Summer: melon (12d), blueberry (13d, regrows 4d)
//!   Fall:   pumpkin (13d)
//!   Any warm season: wheat (4d)
//!
//! `stage_days` stores how long each growth stage lasts; a crop is ready
//! once every stage has elapsed. Regrowable crops drop back to
//! `regrow_stage` after each pick and fruit again `regrow_days` later.

use crate::farming::CropDef;
use crate::shared::Season;

pub(super) fn roster() -> Vec<CropDef> {
    vec![
        // ── Spring ──────────────────────────────────────────────────────────

        CropDef {
            id: "turnip".into(),
            name: "Turnip".into(),
            seed_id: "turnip_seeds".into(),
            harvest_id: "turnip".into(),
            seasons: vec![Season::Spring],
            stage_days: vec![1, 1, 1, 1],
            requires_watering: true,
            regrows: false,
            regrow_days: 0,
            regrow_stage: 0,
            yield_min: 1,
            yield_max: 1,
        },
        CropDef {
            id: "potato".into(),
            name: "Potato".into(),
            seed_id: "potato_seeds".into(),
            harvest_id: "potato".into(),
            seasons: vec![Season::Spring],
            stage_days: vec![1, 2, 2, 1],
            requires_watering: true,
            regrows: false,
            regrow_days: 0,
            regrow_stage: 0,
            // Tubers come up in clumps.
            yield_min: 1,
            yield_max: 3,
        },
        CropDef {
            id: "strawberry".into(),
            name: "Strawberry".into(),
            seed_id: "strawberry_seeds".into(),
            harvest_id: "strawberry".into(),
            seasons: vec![Season::Spring],
            stage_days: vec![1, 1, 2, 4],
            requires_watering: true,
            regrows: true,
            regrow_days: 4,
            // The bush stays; only the fruit goes.
            regrow_stage: 3,
            yield_min: 1,
            yield_max: 2,
        },

        // ── Summer ──────────────────────────────────────────────────────────

        CropDef {
            id: "melon".into(),
            name: "Melon".into(),
            seed_id: "melon_seeds".into(),
            harvest_id: "melon".into(),
            seasons: vec![Season::Summer],
            stage_days: vec![1, 2, 3, 3, 3],
            requires_watering: true,
            regrows: false,
            regrow_days: 0,
            regrow_stage: 0,
            yield_min: 1,
            yield_max: 1,
        },
        CropDef {
            id: "blueberry".into(),
            name: "Blueberry".into(),
            seed_id: "blueberry_seeds".into(),
            harvest_id: "blueberry".into(),
            seasons: vec![Season::Summer],
            stage_days: vec![1, 3, 3, 3, 3],
            requires_watering: true,
            regrows: true,
            regrow_days: 4,
            regrow_stage: 4,
            yield_min: 2,
            yield_max: 4,
        },

        // ── Fall ────────────────────────────────────────────────────────────

        CropDef {
            id: "pumpkin".into(),
            name: "Pumpkin".into(),
            seed_id: "pumpkin_seeds".into(),
            harvest_id: "pumpkin".into(),
            seasons: vec![Season::Fall],
            stage_days: vec![1, 2, 3, 4, 3],
            requires_watering: true,
            regrows: false,
            regrow_days: 0,
            regrow_stage: 0,
            yield_min: 1,
            yield_max: 1,
        },

        // ── Any warm season ─────────────────────────────────────────────────

        CropDef {
            id: "wheat".into(),
            name: "Wheat".into(),
            seed_id: "wheat_seeds".into(),
            harvest_id: "wheat".into(),
            seasons: vec![Season::Spring, Season::Summer, Season::Fall],
            stage_days: vec![1, 1, 1, 1],
            requires_watering: false,
            regrows: false,
            regrow_days: 0,
            regrow_stage: 0,
            yield_min: 1,
            yield_max: 2,
        },
    ]
}

//! Shared vocabulary for the farmstead core.
//!
//! This is the type contract. Every domain module imports from here.
//! No domain imports from any other domain's internals directly.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// IDENTITY
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item and crop kind.
/// Using string IDs for data-driven flexibility.
pub type ItemId = String;

// ═══════════════════════════════════════════════════════════════════════
// SEASONS
// ═══════════════════════════════════════════════════════════════════════

/// The four seasons. The core never advances a season itself — the value
/// is handed in by a calendar collaborator for season-gated actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEM CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════

/// Closed classification of item kinds. Also the primary inventory sort
/// key, so the variant order here is the display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ItemCategory {
    Tool,
    Equipment,
    Seed,
    Produce,
    Resource,
    Material,
}

// ═══════════════════════════════════════════════════════════════════════
// POSITIONS
// ═══════════════════════════════════════════════════════════════════════

/// Tile coordinate on the farm grid. The core does not own a map — the
/// position is an opaque payload carried through planting and tool use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const HOTBAR_SLOTS: usize = 12;
pub const BACKPACK_SLOTS: usize = 24;
pub const TOTAL_INVENTORY_SLOTS: usize = HOTBAR_SLOTS + BACKPACK_SLOTS;

/// Stack bound used by most stackable items.
pub const DEFAULT_STACK_SIZE: u32 = 99;

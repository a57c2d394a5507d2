//! Data layer — seeds the definition registries.
//!
//! The built-in roster lives in code (see `items.rs` / `crops.rs`);
//! deployments can also load definition sets from RON text. Either way,
//! every definition passes validation before it lands in a registry, so
//! the simulation never sees a zero-stage crop or a zero-bound stack.

mod crops;
mod items;

use thiserror::Error;
use tracing::info;

use crate::farming::{CropDef, CropRegistry};
use crate::items::{ItemDef, ItemKind, ItemRegistry};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error)]
pub enum DataError {
    #[error("failed to parse definitions: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid item definition '{id}': {reason}")]
    InvalidItem { id: String, reason: String },
    #[error("invalid crop definition '{id}': {reason}")]
    InvalidCrop { id: String, reason: String },
    #[error("crop '{crop}' references unknown item '{item}'")]
    MissingItem { crop: String, item: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation
// ─────────────────────────────────────────────────────────────────────────────

/// Template-level sanity checks for one item definition.
pub fn validate_item(def: &ItemDef) -> Result<(), DataError> {
    let fail = |reason: &str| {
        Err(DataError::InvalidItem {
            id: def.id.clone(),
            reason: reason.to_string(),
        })
    };
    if def.id.is_empty() {
        return fail("empty id");
    }
    if def.max_stack == 0 {
        return fail("max_stack must be at least 1");
    }
    match &def.kind {
        ItemKind::Tool { .. } if def.max_durability == 0 => {
            fail("tools must carry durability")
        }
        ItemKind::Resource {
            refined_into: Some(_),
            refine_yield: 0,
        } => fail("refinable resources need a refine_yield of at least 1"),
        _ => Ok(()),
    }
}

/// Template-level sanity checks for one crop definition.
pub fn validate_crop(def: &CropDef) -> Result<(), DataError> {
    let fail = |reason: &str| {
        Err(DataError::InvalidCrop {
            id: def.id.clone(),
            reason: reason.to_string(),
        })
    };
    if def.id.is_empty() {
        return fail("empty id");
    }
    if def.stage_days.is_empty() {
        return fail("at least one growth stage is required");
    }
    if def.stage_days.iter().any(|&days| days == 0) {
        return fail("every stage must last at least one day");
    }
    if def.yield_min > def.yield_max {
        return fail("yield_min must not exceed yield_max");
    }
    if def.yield_max == 0 {
        return fail("yield_max must be at least 1");
    }
    if def.regrows && def.regrow_days == 0 {
        return fail("regrowable crops need a regrow duration of at least 1 day");
    }
    Ok(())
}

/// Cross-check that a crop's item links resolve.
pub fn validate_crop_links(def: &CropDef, items: &ItemRegistry) -> Result<(), DataError> {
    for item in [&def.seed_id, &def.harvest_id] {
        if !items.contains(item) {
            return Err(DataError::MissingItem {
                crop: def.id.clone(),
                item: item.clone(),
            });
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// RON loading
// ─────────────────────────────────────────────────────────────────────────────

/// Parse and validate an item definition set from RON text.
pub fn load_item_definitions(text: &str) -> Result<Vec<ItemDef>, DataError> {
    let defs: Vec<ItemDef> = ron::from_str(text)?;
    for def in &defs {
        validate_item(def)?;
    }
    Ok(defs)
}

/// Parse and validate a crop definition set from RON text. Item links are
/// checked separately against whatever registry the defs will join.
pub fn load_crop_definitions(text: &str) -> Result<Vec<CropDef>, DataError> {
    let defs: Vec<CropDef> = ron::from_str(text)?;
    for def in &defs {
        validate_crop(def)?;
    }
    Ok(defs)
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in roster
// ─────────────────────────────────────────────────────────────────────────────

/// Populate the item registry with the built-in roster.
pub fn populate_items(registry: &mut ItemRegistry) -> Result<(), DataError> {
    for def in items::roster() {
        validate_item(&def)?;
        registry.insert(def);
    }
    info!("[Data] Items loaded: {}", registry.len());
    Ok(())
}

/// Populate the crop registry with the built-in roster. Items must be
/// loaded first so seed/harvest links can be verified.
pub fn populate_crops(
    registry: &mut CropRegistry,
    items: &ItemRegistry,
) -> Result<(), DataError> {
    for def in crops::roster() {
        validate_crop(&def)?;
        validate_crop_links(&def, items)?;
        registry.insert(def);
    }
    info!("[Data] Crops loaded: {}", registry.len());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Season;

    #[test]
    fn test_builtin_roster_is_valid_and_linked() {
        let mut items = ItemRegistry::new();
        let mut crops = CropRegistry::new();
        populate_items(&mut items).expect("item roster valid");
        populate_crops(&mut crops, &items).expect("crop roster valid and linked");

        assert!(!items.is_empty());
        assert!(!crops.is_empty());

        // Every seed in the item roster plants a known crop.
        for def in items.iter() {
            if let ItemKind::Seed { crop_id, .. } = &def.kind {
                assert!(crops.contains(crop_id), "seed '{}' links to '{crop_id}'", def.id);
            }
        }
        // Every refinable resource links to a known output.
        for def in items.iter() {
            if let ItemKind::Resource {
                refined_into: Some(output),
                ..
            } = &def.kind
            {
                assert!(items.contains(output), "'{}' refines into '{output}'", def.id);
            }
        }
    }

    #[test]
    fn test_load_crop_definitions_from_ron() {
        let text = r#"[
            (
                id: "turnip",
                name: "Turnip",
                seed_id: "turnip_seeds",
                harvest_id: "turnip",
                seasons: [Spring],
                stage_days: [1, 1, 1, 1],
                requires_watering: true,
                regrows: false,
                regrow_days: 0,
                regrow_stage: 0,
                yield_min: 1,
                yield_max: 1,
            ),
        ]"#;
        let defs = load_crop_definitions(text).expect("parses");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].id, "turnip");
        assert_eq!(defs[0].seasons, vec![Season::Spring]);
    }

    #[test]
    fn test_zero_stage_crop_rejected() {
        let def = CropDef {
            id: "weird".into(),
            name: "Weird".into(),
            seed_id: "weird_seeds".into(),
            harvest_id: "weird".into(),
            seasons: vec![],
            stage_days: vec![],
            requires_watering: false,
            regrows: false,
            regrow_days: 0,
            regrow_stage: 0,
            yield_min: 1,
            yield_max: 1,
        };
        assert!(matches!(
            validate_crop(&def),
            Err(DataError::InvalidCrop { .. })
        ));
    }

    #[test]
    fn test_inverted_yield_range_rejected() {
        let mut def = crops::roster().into_iter().next().expect("non-empty roster");
        def.yield_min = 5;
        def.yield_max = 2;
        assert!(matches!(
            validate_crop(&def),
            Err(DataError::InvalidCrop { .. })
        ));
    }

    #[test]
    fn test_dangling_crop_link_rejected() {
        let items = ItemRegistry::new();
        let def = crops::roster().into_iter().next().expect("non-empty roster");
        assert!(matches!(
            validate_crop_links(&def, &items),
            Err(DataError::MissingItem { .. })
        ));
    }

    #[test]
    fn test_malformed_ron_is_a_parse_error() {
        assert!(matches!(
            load_item_definitions("[(id: ]"),
            Err(DataError::Parse(_))
        ));
    }
}

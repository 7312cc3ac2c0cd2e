//! Persisted state shape for plant instances and the loader handoff
//! contract.
//!
//! The generic side saves and restores scalar fields only. Type and
//! quality are persisted as a display name plus an ordinal level, which
//! cannot reconstruct live references on their own -- a concrete embedding
//! resolves those two fields against its registry *before* delegating the
//! scalars back to [`Plant::restore_scalars`]. The [`restore_plant`]
//! helper implements that resolution for registry-backed embeddings.
//!
//! Persisting the display name and ordinal level matches the original
//! on-disk shape but is fragile under renames and tier reordering; an
//! embedder migrating to stable string ids should pair the change with a
//! save-migration step.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ProductionConfig;
use crate::plant::{MAX_GROWTH_STAGE, Plant};
use crate::registry::Registry;
use crate::types::Ticks;

/// The serialized shape of one plant instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantState {
    pub growth_stage: u8,
    pub ticks_grown: Ticks,
    pub has_fertilizer: bool,
    pub has_growth_booster: bool,
    pub has_quality_booster: bool,
    /// Display name of the referenced production type.
    pub type_name: String,
    /// Ordinal level of the referenced quality tier.
    pub quality_level: usize,
}

impl Plant {
    /// Capture this instance's persisted state.
    pub fn save_state(&self) -> PlantState {
        PlantState {
            growth_stage: self.growth_stage(),
            ticks_grown: self.ticks_grown(),
            has_fertilizer: self.has_fertilizer(),
            has_growth_booster: self.has_growth_booster(),
            has_quality_booster: self.has_quality_booster(),
            type_name: self.production_type().display_name().to_string(),
            quality_level: self.quality().level(),
        }
    }

    /// Apply the scalar fields from saved state. The type and quality
    /// references are untouched: resolving them is the embedder's job.
    ///
    /// Out-of-range values are clamped rather than rejected so that
    /// corrupted saves degrade instead of erroring.
    pub fn restore_scalars(&mut self, state: &PlantState) {
        self.set_growth_stage(state.growth_stage.min(MAX_GROWTH_STAGE));
        self.set_ticks_grown(state.ticks_grown);
        if state.has_fertilizer {
            self.apply_fertilizer();
        }
        if state.has_growth_booster {
            self.apply_growth_booster();
        }
        if state.has_quality_booster {
            self.apply_quality_booster();
        }
    }
}

/// Find the config whose display name matches the saved `type_name`.
///
/// Unknown names return `None` with a warning -- likely stale or corrupted
/// world state; the caller decides whether to drop or replace the unit.
pub fn resolve_config(registry: &Registry, type_name: &str) -> Option<Arc<ProductionConfig>> {
    let found = registry
        .get_all()
        .into_iter()
        .find(|cfg| cfg.display_name() == type_name);
    if found.is_none() {
        log::warn!("no registered production matches saved type name '{type_name}'");
    }
    found
}

/// Rebuild a live plant from saved state using registry-backed resolution.
///
/// Quality resolution uses the tier system's worst-tier fallback, so an
/// out-of-range saved level yields a living (if downgraded) plant rather
/// than an error.
pub fn restore_plant(registry: &Registry, state: &PlantState) -> Option<Plant> {
    let config = resolve_config(registry, &state.type_name)?;
    let quality = config.quality_tiers().by_level(state.quality_level);
    let mut plant = config.spawn_plant_with_quality(quality);
    plant.restore_scalars(state);
    Some(plant)
}

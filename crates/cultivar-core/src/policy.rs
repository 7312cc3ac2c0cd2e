//! Pluggable per-type growth and harvest behavior.
//!
//! Special cases (multi-flush mushrooms, checkpoint quality upgrades) are
//! policy objects injected per production type, not subclasses of the
//! plant state machine. Every method has a default matching the standard
//! linear-growth behavior, so a policy only overrides what it changes.

use crate::plant::Plant;
use crate::types::Ticks;

/// Behavior hooks consulted by [`Plant`]. Policies are stateless and
/// shared; any per-instance state they need lives on the plant itself
/// (e.g. the flush counter).
pub trait PlantPolicy: Send + Sync + std::fmt::Debug {
    /// Ticks to grow from stage 0 to stage 7, after boosters.
    ///
    /// The growth booster cuts the duration to 70%, truncated.
    fn effective_growth_ticks(&self, base_ticks: Ticks, growth_boosted: bool) -> Ticks {
        if growth_boosted {
            (base_ticks as f64 * 0.7) as Ticks
        } else {
            base_ticks
        }
    }

    /// Yield multiplier for a quality level.
    ///
    /// The table only covers levels 0..=3; higher levels flatten to 1.0.
    /// That flattening is inherited behavior for tier systems with more
    /// than four grades and is pinned by tests -- do not "fix" it here.
    fn quality_yield_multiplier(&self, level: usize) -> f64 {
        match level {
            0 => 0.7,
            1 => 1.0,
            2 => 1.3,
            3 => 1.6,
            _ => 1.0,
        }
    }

    /// Yield scale applied for repeat harvests. `flushes_harvested` counts
    /// completed harvests before the current one.
    fn flush_yield_scale(&self, _flushes_harvested: u32) -> f64 {
        1.0
    }

    /// Whether the instance is currently harvestable.
    fn can_harvest(&self, plant: &Plant) -> bool {
        plant.is_fully_grown()
    }

    /// Called by [`Plant::harvest`] once harvestability is established.
    /// The default is single-shot: report success and mutate nothing --
    /// removal is the caller's responsibility.
    fn on_harvest(&self, _plant: &mut Plant) -> bool {
        true
    }

    /// Called after a tick that moved the plant to a new growth stage.
    fn on_stage_advanced(&self, _plant: &mut Plant, _old_stage: u8, _new_stage: u8) {}
}

/// The standard linear-growth, single-harvest behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPolicy;

impl PlantPolicy for StandardPolicy {}

/// Mushroom-like repeat harvests: the substrate supports a fixed number of
/// flushes, each yielding less than the last, with the colony regrowing
/// from a mid stage between flushes.
#[derive(Debug, Clone, Copy)]
pub struct FlushPolicy {
    pub max_flushes: u32,
}

/// Stage the colony regrows from after a non-final flush.
const REGROW_STAGE: u8 = 4;

impl Default for FlushPolicy {
    fn default() -> Self {
        Self { max_flushes: 3 }
    }
}

impl FlushPolicy {
    pub fn new(max_flushes: u32) -> Self {
        Self { max_flushes }
    }

    pub fn remaining_flushes(&self, plant: &Plant) -> u32 {
        self.max_flushes.saturating_sub(plant.flushes_harvested())
    }

    /// True once the substrate supports no further harvests.
    pub fn is_exhausted(&self, plant: &Plant) -> bool {
        plant.flushes_harvested() >= self.max_flushes
    }
}

impl PlantPolicy for FlushPolicy {
    fn flush_yield_scale(&self, flushes_harvested: u32) -> f64 {
        match flushes_harvested {
            0 => 1.0,
            1 => 0.75,
            _ => 0.5,
        }
    }

    fn can_harvest(&self, plant: &Plant) -> bool {
        plant.is_fully_grown() && !self.is_exhausted(plant)
    }

    fn on_harvest(&self, plant: &mut Plant) -> bool {
        let done = plant.flushes_harvested() + 1;
        plant.set_flushes_harvested(done);

        if done < self.max_flushes {
            // Regrow from the midpoint; keep ticks consistent with the
            // stage so the recomputation invariant holds.
            let effective = self.effective_growth_ticks(
                plant.production_type().growth_ticks(),
                plant.has_growth_booster(),
            );
            let ticks_per_stage = (effective / 8).max(1);
            plant.set_growth_stage(REGROW_STAGE);
            plant.set_ticks_grown(ticks_per_stage * Ticks::from(REGROW_STAGE));
        }
        true
    }
}

/// Upgrades quality by one grade at fixed growth-stage checkpoints while
/// the quality booster is latched.
#[derive(Debug, Clone)]
pub struct CheckpointUpgradePolicy {
    pub checkpoints: Vec<u8>,
}

impl Default for CheckpointUpgradePolicy {
    fn default() -> Self {
        Self {
            checkpoints: vec![3, 6],
        }
    }
}

impl PlantPolicy for CheckpointUpgradePolicy {
    fn on_stage_advanced(&self, plant: &mut Plant, old_stage: u8, new_stage: u8) {
        if !plant.has_quality_booster() {
            return;
        }
        // Tick-skip safe: a large delta may cross several checkpoints.
        for &checkpoint in &self.checkpoints {
            if old_stage < checkpoint && checkpoint <= new_stage {
                plant.upgrade_quality();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_growth_ticks_unboosted() {
        assert_eq!(StandardPolicy.effective_growth_ticks(1000, false), 1000);
    }

    #[test]
    fn default_growth_ticks_boosted_truncates() {
        assert_eq!(StandardPolicy.effective_growth_ticks(1000, true), 700);
        // 0.7 * 999 = 699.3 -> 699
        assert_eq!(StandardPolicy.effective_growth_ticks(999, true), 699);
    }

    #[test]
    fn default_multiplier_table() {
        let expected = [(0, 0.7), (1, 1.0), (2, 1.3), (3, 1.6)];
        for (level, mult) in expected {
            assert!((StandardPolicy.quality_yield_multiplier(level) - mult).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn multiplier_flattens_above_level_three() {
        // Inherited behavior: 5-tier systems get no bonus past level 3.
        assert!((StandardPolicy.quality_yield_multiplier(4) - 1.0).abs() < f64::EPSILON);
        assert!((StandardPolicy.quality_yield_multiplier(9) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn flush_yields_decay() {
        let policy = FlushPolicy::default();
        assert!((policy.flush_yield_scale(0) - 1.0).abs() < f64::EPSILON);
        assert!((policy.flush_yield_scale(1) - 0.75).abs() < f64::EPSILON);
        assert!((policy.flush_yield_scale(2) - 0.5).abs() < f64::EPSILON);
        assert!((policy.flush_yield_scale(7) - 0.5).abs() < f64::EPSILON);
    }
}

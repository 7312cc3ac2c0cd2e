//! The per-instance growth and harvest state machine.
//!
//! A [`Plant`] references its production type and current quality, tracks
//! total elapsed ticks, and recomputes its discrete growth stage from that
//! total on every tick. Recomputing (instead of incrementing) makes the
//! machine resilient to skipped or batched ticks: after any gap, one call
//! puts the stage exactly where it belongs.
//!
//! Instances carry no synchronization; a single tick driver owns each one.

use std::sync::Arc;

use crate::policy::{PlantPolicy, StandardPolicy};
use crate::quality::Quality;
use crate::rng::SimRng;
use crate::types::{ProductionType, Ticks};

pub const MAX_GROWTH_STAGE: u8 = 7;
pub const MIN_GROWTH_STAGE: u8 = 0;

/// One planted/produced unit.
#[derive(Debug, Clone)]
pub struct Plant {
    production_type: Arc<ProductionType>,
    quality: Quality,
    growth_stage: u8,
    ticks_grown: Ticks,

    // One-shot booster latches. No stacking, no decay, no unset.
    has_fertilizer: bool,
    has_growth_booster: bool,
    has_quality_booster: bool,

    /// Completed repeat harvests; only meaningful under a flush policy.
    flushes_harvested: u32,

    policy: Arc<dyn PlantPolicy>,
}

impl Plant {
    /// A fresh instance with the standard single-harvest policy.
    pub fn new(production_type: Arc<ProductionType>, quality: Quality) -> Self {
        Self::with_policy(production_type, quality, Arc::new(StandardPolicy))
    }

    /// A fresh instance with an explicit behavior policy.
    pub fn with_policy(
        production_type: Arc<ProductionType>,
        quality: Quality,
        policy: Arc<dyn PlantPolicy>,
    ) -> Self {
        Self {
            production_type,
            quality,
            growth_stage: 0,
            ticks_grown: 0,
            has_fertilizer: false,
            has_growth_booster: false,
            has_quality_booster: false,
            flushes_harvested: 0,
            policy,
        }
    }

    // -----------------------------------------------------------------------
    // Growth
    // -----------------------------------------------------------------------

    /// Advance by one tick. No-op once fully grown.
    pub fn tick(&mut self) {
        self.tick_by(1);
    }

    /// Advance by `delta` ticks at once, for hosts that batch ticks.
    ///
    /// The stage is recomputed from total elapsed ticks, so `tick_by(n)`
    /// and `n` single ticks land on the same stage.
    pub fn tick_by(&mut self, delta: Ticks) {
        if self.is_fully_grown() || delta == 0 {
            return;
        }

        self.ticks_grown = self.ticks_grown.saturating_add(delta);

        let old_stage = self.growth_stage;
        let ticks_per_stage = (self.growth_speed() / 8).max(1);
        let new_stage = (self.ticks_grown / ticks_per_stage).min(Ticks::from(MAX_GROWTH_STAGE));
        self.growth_stage = new_stage as u8;

        if self.growth_stage != old_stage {
            let policy = Arc::clone(&self.policy);
            policy.on_stage_advanced(self, old_stage, self.growth_stage);
        }
    }

    /// Effective ticks to reach stage 7, after the growth booster.
    pub fn growth_speed(&self) -> Ticks {
        self.policy
            .effective_growth_ticks(self.production_type.growth_ticks(), self.has_growth_booster)
    }

    pub fn is_fully_grown(&self) -> bool {
        self.growth_stage >= MAX_GROWTH_STAGE
    }

    /// Stage 7 out of 7 as 1.0.
    pub fn growth_progress(&self) -> f32 {
        f32::from(self.growth_stage) / f32::from(MAX_GROWTH_STAGE)
    }

    // -----------------------------------------------------------------------
    // Harvest
    // -----------------------------------------------------------------------

    /// Harvestable now? True at stage 7 however far ticks have overshot,
    /// unless the policy says otherwise (e.g. an exhausted flush substrate).
    pub fn can_harvest(&self) -> bool {
        self.policy.can_harvest(self)
    }

    /// Perform a harvest. Returns `false` (and mutates nothing) when not
    /// harvestable. On success the policy decides what state changes: the
    /// default mutates nothing -- emptying the pot is the caller's job.
    pub fn harvest(&mut self) -> bool {
        if !self.can_harvest() {
            return false;
        }
        let policy = Arc::clone(&self.policy);
        policy.on_harvest(self)
    }

    /// Units produced by a harvest right now.
    ///
    /// Base yield, +1..=2 with fertilizer, scaled by the policy's quality
    /// multiplier (and flush decay), truncated toward zero.
    pub fn harvest_yield(&self, rng: &mut SimRng) -> u32 {
        let mut base = self.production_type.base_yield();
        if self.has_fertilizer {
            base += 1 + rng.range(2);
        }

        let multiplier = self.policy.quality_yield_multiplier(self.quality.level())
            * self.policy.flush_yield_scale(self.flushes_harvested);

        (f64::from(base) * multiplier) as u32
    }

    // -----------------------------------------------------------------------
    // Boosters
    // -----------------------------------------------------------------------

    pub fn apply_fertilizer(&mut self) {
        if !self.has_fertilizer {
            self.has_fertilizer = true;
            log::debug!(
                "fertilizer applied to {} ({})",
                self.production_type.display_name(),
                self.quality.name()
            );
        }
    }

    pub fn apply_growth_booster(&mut self) {
        if !self.has_growth_booster {
            self.has_growth_booster = true;
            log::debug!(
                "growth booster applied to {} ({})",
                self.production_type.display_name(),
                self.quality.name()
            );
        }
    }

    pub fn apply_quality_booster(&mut self) {
        if !self.has_quality_booster {
            self.has_quality_booster = true;
            log::debug!(
                "quality booster applied to {} ({})",
                self.production_type.display_name(),
                self.quality.name()
            );
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn production_type(&self) -> &Arc<ProductionType> {
        &self.production_type
    }

    pub fn quality(&self) -> &Quality {
        &self.quality
    }

    pub fn set_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    /// Bump quality one grade; clamped at the system's top tier.
    pub fn upgrade_quality(&mut self) {
        self.quality = self.quality.upgrade();
    }

    pub fn growth_stage(&self) -> u8 {
        self.growth_stage
    }

    /// Clamped into [0, 7].
    pub fn set_growth_stage(&mut self, stage: u8) {
        self.growth_stage = stage.clamp(MIN_GROWTH_STAGE, MAX_GROWTH_STAGE);
    }

    pub fn ticks_grown(&self) -> Ticks {
        self.ticks_grown
    }

    pub fn set_ticks_grown(&mut self, ticks: Ticks) {
        self.ticks_grown = ticks;
    }

    pub fn has_fertilizer(&self) -> bool {
        self.has_fertilizer
    }

    pub fn has_growth_booster(&self) -> bool {
        self.has_growth_booster
    }

    pub fn has_quality_booster(&self) -> bool {
        self.has_quality_booster
    }

    pub fn flushes_harvested(&self) -> u32 {
        self.flushes_harvested
    }

    pub fn set_flushes_harvested(&mut self, flushes: u32) {
        self.flushes_harvested = flushes;
    }

    pub fn policy(&self) -> &Arc<dyn PlantPolicy> {
        &self.policy
    }

    /// One-line status summary for tooltips/UI.
    pub fn display_info(&self) -> String {
        format!(
            "{} - Stage {}/{} - {}",
            self.production_type.display_name(),
            self.growth_stage,
            MAX_GROWTH_STAGE,
            self.quality.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{CheckpointUpgradePolicy, FlushPolicy};
    use crate::quality::TierSystem;

    fn test_type(growth_ticks: Ticks, base_yield: u32) -> Arc<ProductionType> {
        Arc::new(ProductionType::new(
            "Test Herb",
            "green",
            10.0,
            growth_ticks,
            base_yield,
        ))
    }

    fn plant_with(growth_ticks: Ticks, base_yield: u32, level: usize) -> Plant {
        let tiers = TierSystem::standard();
        Plant::new(test_type(growth_ticks, base_yield), tiers.by_level(level))
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn fresh_plant_starts_at_zero() {
        let plant = plant_with(800, 3, 1);
        assert_eq!(plant.growth_stage(), 0);
        assert_eq!(plant.ticks_grown(), 0);
        assert!(!plant.is_fully_grown());
        assert!(!plant.has_fertilizer());
        assert!(!plant.has_growth_booster());
        assert!(!plant.has_quality_booster());
        assert!(!plant.can_harvest());
    }

    // -----------------------------------------------------------------------
    // Growth algorithm
    // -----------------------------------------------------------------------

    #[test]
    fn stage_is_total_ticks_over_ticks_per_stage() {
        // base 800 -> ticks_per_stage = 100; 350 ticks -> stage 3.
        let mut plant = plant_with(800, 3, 1);
        for _ in 0..350 {
            plant.tick();
        }
        assert_eq!(plant.ticks_grown(), 350);
        assert_eq!(plant.growth_stage(), 3);
    }

    #[test]
    fn reaches_stage_seven_and_stops() {
        let mut plant = plant_with(800, 3, 1);
        for _ in 0..800 {
            plant.tick();
        }
        assert_eq!(plant.growth_stage(), 7);
        assert!(plant.is_fully_grown());
        assert!(plant.can_harvest());

        // Terminal: further ticks mutate nothing.
        let ticks = plant.ticks_grown();
        plant.tick();
        plant.tick_by(500);
        assert_eq!(plant.ticks_grown(), ticks);
        assert_eq!(plant.growth_stage(), 7);
    }

    #[test]
    fn batched_ticks_match_single_ticks() {
        let mut a = plant_with(800, 3, 1);
        let mut b = plant_with(800, 3, 1);
        for _ in 0..347 {
            a.tick();
        }
        b.tick_by(347);
        assert_eq!(a.growth_stage(), b.growth_stage());
        assert_eq!(a.ticks_grown(), b.ticks_grown());
    }

    #[test]
    fn tick_skip_self_corrects() {
        // A single call after a long gap lands on the right stage.
        let mut plant = plant_with(800, 3, 1);
        plant.tick_by(650);
        assert_eq!(plant.growth_stage(), 6);
    }

    #[test]
    fn growth_booster_shortens_duration() {
        let mut plant = plant_with(1000, 3, 1);
        plant.apply_growth_booster();
        assert_eq!(plant.growth_speed(), 700);
        // ticks_per_stage = 700 / 8 = 87 (integer division), not 100.
        plant.tick_by(87);
        assert_eq!(plant.growth_stage(), 1);
    }

    #[test]
    fn zero_growth_duration_clamps_ticks_per_stage_to_one() {
        // Synthesized goods have growthTicks = 0; they mature in 7 ticks.
        let mut plant = plant_with(0, 0, 1);
        plant.tick_by(7);
        assert_eq!(plant.growth_stage(), 7);
    }

    #[test]
    fn stage_setter_clamps() {
        let mut plant = plant_with(800, 3, 1);
        plant.set_growth_stage(200);
        assert_eq!(plant.growth_stage(), 7);
    }

    // -----------------------------------------------------------------------
    // Harvest
    // -----------------------------------------------------------------------

    #[test]
    fn harvest_before_maturity_is_a_silent_no_op() {
        let mut plant = plant_with(800, 3, 1);
        plant.tick_by(699);
        assert!(!plant.can_harvest());
        assert!(!plant.harvest());
        assert_eq!(plant.growth_stage(), 6);
    }

    #[test]
    fn harvest_at_maturity_succeeds_without_mutation() {
        let mut plant = plant_with(800, 3, 1);
        plant.tick_by(10_000);
        assert!(plant.harvest());
        // Single-shot default: state untouched; removal is the caller's job.
        assert_eq!(plant.growth_stage(), 7);
        assert!(plant.can_harvest());
    }

    #[test]
    fn yield_applies_quality_multiplier_with_truncation() {
        // baseYield 3, level 2 -> floor(3 * 1.3) = 3.
        let plant = plant_with(800, 3, 2);
        let mut rng = SimRng::new(1);
        assert_eq!(plant.harvest_yield(&mut rng), 3);

        // baseYield 5, level 3 -> floor(5 * 1.6) = 8.
        let plant = plant_with(800, 5, 3);
        assert_eq!(plant.harvest_yield(&mut rng), 8);
    }

    #[test]
    fn fertilizer_adds_one_or_two_units() {
        let mut plant = plant_with(800, 5, 1);
        plant.apply_fertilizer();
        let mut rng = SimRng::new(42);
        for _ in 0..50 {
            let y = plant.harvest_yield(&mut rng);
            assert!((6..=7).contains(&y), "unexpected yield {y}");
        }
    }

    #[test]
    fn flattened_multiplier_above_level_three() {
        // 5-tier system, top tier (level 4): multiplier flattens to 1.0.
        let tiers = TierSystem::extended();
        let plant = Plant::new(test_type(800, 4), tiers.best());
        let mut rng = SimRng::new(9);
        assert_eq!(plant.harvest_yield(&mut rng), 4);
    }

    // -----------------------------------------------------------------------
    // Boosters
    // -----------------------------------------------------------------------

    #[test]
    fn boosters_are_idempotent_latches() {
        let mut plant = plant_with(1000, 3, 1);
        plant.apply_growth_booster();
        let speed = plant.growth_speed();
        plant.apply_growth_booster();
        assert_eq!(plant.growth_speed(), speed);

        plant.apply_fertilizer();
        plant.apply_fertilizer();
        assert!(plant.has_fertilizer());

        plant.apply_quality_booster();
        plant.apply_quality_booster();
        assert!(plant.has_quality_booster());
    }

    // -----------------------------------------------------------------------
    // Flush policy integration
    // -----------------------------------------------------------------------

    fn mushroom_plant(max_flushes: u32) -> Plant {
        let tiers = TierSystem::standard();
        Plant::with_policy(
            Arc::new(ProductionType::new("Grey Oyster", "light_purple", 50.0, 800, 4)),
            tiers.by_level(1),
            Arc::new(FlushPolicy::new(max_flushes)),
        )
    }

    #[test]
    fn flush_harvests_regrow_then_exhaust() {
        let mut plant = mushroom_plant(2);
        plant.tick_by(800);
        assert!(plant.can_harvest());

        // First flush: regrows from the midpoint.
        assert!(plant.harvest());
        assert_eq!(plant.flushes_harvested(), 1);
        assert_eq!(plant.growth_stage(), 4);
        assert!(!plant.can_harvest());

        // Regrow and take the final flush.
        plant.tick_by(400);
        assert!(plant.can_harvest());
        assert!(plant.harvest());
        assert_eq!(plant.flushes_harvested(), 2);

        // Exhausted: fully grown but no longer harvestable.
        assert!(plant.is_fully_grown());
        assert!(!plant.can_harvest());
        assert!(!plant.harvest());
    }

    #[test]
    fn flush_yield_decays_per_harvest() {
        let mut plant = mushroom_plant(3);
        plant.tick_by(800);
        let mut rng = SimRng::new(3);

        // base 4, level 1 -> 4; second flush 4 * 0.75 = 3; third 4 * 0.5 = 2.
        assert_eq!(plant.harvest_yield(&mut rng), 4);
        assert!(plant.harvest());
        plant.tick_by(400);
        assert_eq!(plant.harvest_yield(&mut rng), 3);
        assert!(plant.harvest());
        plant.tick_by(400);
        assert_eq!(plant.harvest_yield(&mut rng), 2);
    }

    // -----------------------------------------------------------------------
    // Checkpoint upgrade policy integration
    // -----------------------------------------------------------------------

    #[test]
    fn checkpoint_policy_upgrades_with_booster() {
        let tiers = TierSystem::standard();
        let mut plant = Plant::with_policy(
            test_type(800, 3),
            tiers.worst(),
            Arc::new(CheckpointUpgradePolicy::default()),
        );
        plant.apply_quality_booster();
        plant.tick_by(800);
        // Crossed checkpoints 3 and 6 in one skip: two upgrades.
        assert_eq!(plant.quality().level(), 2);
    }

    #[test]
    fn checkpoint_policy_inert_without_booster() {
        let tiers = TierSystem::standard();
        let mut plant = Plant::with_policy(
            test_type(800, 3),
            tiers.worst(),
            Arc::new(CheckpointUpgradePolicy::default()),
        );
        plant.tick_by(800);
        assert_eq!(plant.quality().level(), 0);
    }

    #[test]
    fn display_info_summarizes_state() {
        let mut plant = plant_with(800, 3, 1);
        plant.tick_by(350);
        assert_eq!(plant.display_info(), "Test Herb - Stage 3/7 - Good");
        assert!((plant.growth_progress() - 3.0 / 7.0).abs() < 1e-6);
    }
}

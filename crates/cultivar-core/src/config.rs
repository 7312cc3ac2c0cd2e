//! Declarative production definitions: an immutable bundle combining a
//! production type, its quality-tier set, growth requirements, and a map
//! of named processing stages. New production types are data, not code.

use std::collections::HashMap;
use std::sync::Arc;

use crate::plant::Plant;
use crate::policy::{FlushPolicy, PlantPolicy, StandardPolicy};
use crate::quality::{Quality, TierSystem};
use crate::stage::ProcessingStage;
use crate::types::{Category, ProductionType, Ticks};

/// Errors raised at `build()` time. Construction-time validation fails
/// loudly; these never occur during steady-state simulation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("production id cannot be empty")]
    EmptyId,

    #[error("display name cannot be empty for production '{id}'")]
    EmptyDisplayName { id: String },
}

/// An immutable production definition, constructed via [`ConfigBuilder`]
/// and owned by the registry.
#[derive(Debug, Clone)]
pub struct ProductionConfig {
    id: String,
    category: Category,

    requires_light: bool,
    min_light_level: u8,
    requires_water: bool,
    requires_temperature: bool,

    stages: HashMap<String, ProcessingStage>,
    quality_tiers: TierSystem,

    // Derived once at build: the shared type descriptor plant instances
    // reference, and the behavior policy implied by the category.
    production_type: Arc<ProductionType>,
    policy: Arc<dyn PlantPolicy>,
}

impl ProductionConfig {
    /// Start building; `id` and `display_name` are required non-empty.
    pub fn builder(id: impl Into<String>, display_name: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder::new(id, display_name)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        self.production_type.display_name()
    }

    pub fn color(&self) -> &str {
        self.production_type.color()
    }

    pub fn base_price(&self) -> f64 {
        self.production_type.base_price()
    }

    pub fn growth_ticks(&self) -> Ticks {
        self.production_type.growth_ticks()
    }

    pub fn base_yield(&self) -> u32 {
        self.production_type.base_yield()
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn requires_light(&self) -> bool {
        self.requires_light
    }

    pub fn min_light_level(&self) -> u8 {
        self.min_light_level
    }

    pub fn requires_water(&self) -> bool {
        self.requires_water
    }

    pub fn requires_temperature(&self) -> bool {
        self.requires_temperature
    }

    /// Snapshot of the stage map. Mutating the returned map does not
    /// affect the config.
    pub fn stages(&self) -> HashMap<String, ProcessingStage> {
        self.stages.clone()
    }

    /// Lookup a single stage by id.
    pub fn stage(&self, stage_id: &str) -> Option<&ProcessingStage> {
        self.stages.get(stage_id)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn quality_tiers(&self) -> TierSystem {
        self.quality_tiers.clone()
    }

    /// The middle tier (index `count / 2`): the sensible default when no
    /// explicit quality is chosen.
    pub fn default_quality(&self) -> Quality {
        self.quality_tiers
            .by_level(self.quality_tiers.len() / 2)
    }

    /// The shared type descriptor referenced by plant instances.
    pub fn production_type(&self) -> Arc<ProductionType> {
        Arc::clone(&self.production_type)
    }

    /// The behavior policy implied by this config's category.
    pub fn policy(&self) -> Arc<dyn PlantPolicy> {
        Arc::clone(&self.policy)
    }

    /// Spawn a fresh plant at the default quality.
    pub fn spawn_plant(&self) -> Plant {
        self.spawn_plant_with_quality(self.default_quality())
    }

    /// Spawn a fresh plant at an explicit quality.
    pub fn spawn_plant_with_quality(&self, quality: Quality) -> Plant {
        Plant::with_policy(self.production_type(), quality, self.policy())
    }
}

impl std::fmt::Display for ProductionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' (price {:.2}, growth {}, yield {}, {})",
            self.id,
            self.display_name(),
            self.base_price(),
            self.growth_ticks(),
            self.base_yield(),
            self.category.display_name()
        )
    }
}

/// Builder for [`ProductionConfig`]. Every optional field has a documented
/// default; `build()` validates the required ones.
#[derive(Debug)]
pub struct ConfigBuilder {
    id: String,
    display_name: String,
    color: String,
    base_price: f64,
    growth_ticks: Ticks,
    base_yield: u32,
    category: Category,
    requires_light: bool,
    min_light_level: u8,
    requires_water: bool,
    requires_temperature: bool,
    stages: HashMap<String, ProcessingStage>,
    quality_tiers: TierSystem,
    policy: Option<Arc<dyn PlantPolicy>>,
}

impl ConfigBuilder {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            color: "white".to_string(),
            base_price: 10.0,
            growth_ticks: 3600,
            base_yield: 3,
            category: Category::Plant,
            requires_light: true,
            min_light_level: 8,
            requires_water: false,
            requires_temperature: false,
            stages: HashMap::new(),
            quality_tiers: TierSystem::standard(),
            policy: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn base_price(mut self, base_price: f64) -> Self {
        self.base_price = base_price;
        self
    }

    pub fn growth_ticks(mut self, growth_ticks: Ticks) -> Self {
        self.growth_ticks = growth_ticks;
        self
    }

    pub fn base_yield(mut self, base_yield: u32) -> Self {
        self.base_yield = base_yield;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn requires_light(mut self, requires_light: bool) -> Self {
        self.requires_light = requires_light;
        self
    }

    pub fn min_light_level(mut self, min_light_level: u8) -> Self {
        self.min_light_level = min_light_level;
        self
    }

    pub fn requires_water(mut self, requires_water: bool) -> Self {
        self.requires_water = requires_water;
        self
    }

    pub fn requires_temperature(mut self, requires_temperature: bool) -> Self {
        self.requires_temperature = requires_temperature;
        self
    }

    pub fn add_stage(mut self, stage_id: impl Into<String>, stage: ProcessingStage) -> Self {
        self.stages.insert(stage_id.into(), stage);
        self
    }

    pub fn quality_tiers(mut self, quality_tiers: TierSystem) -> Self {
        self.quality_tiers = quality_tiers;
        self
    }

    /// Override the behavior policy. Without this, mushroom-category
    /// configs get [`FlushPolicy`] and everything else [`StandardPolicy`].
    pub fn policy(mut self, policy: Arc<dyn PlantPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<ProductionConfig, ConfigError> {
        if self.id.is_empty() {
            return Err(ConfigError::EmptyId);
        }
        if self.display_name.is_empty() {
            return Err(ConfigError::EmptyDisplayName { id: self.id });
        }

        let production_type = Arc::new(ProductionType::new(
            self.display_name,
            self.color,
            self.base_price,
            self.growth_ticks,
            self.base_yield,
        ));

        let policy = self.policy.unwrap_or_else(|| match self.category {
            Category::Mushroom => Arc::new(FlushPolicy::default()),
            _ => Arc::new(StandardPolicy),
        });

        Ok(ProductionConfig {
            id: self.id,
            category: self.category,
            requires_light: self.requires_light,
            min_light_level: self.min_light_level,
            requires_water: self.requires_water,
            requires_temperature: self.requires_temperature,
            stages: self.stages,
            quality_tiers: self.quality_tiers,
            production_type,
            policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Builder defaults and validation
    // -----------------------------------------------------------------------

    #[test]
    fn builder_defaults() {
        let cfg = ProductionConfig::builder("herb_basic", "Basic Herb")
            .build()
            .unwrap();
        assert_eq!(cfg.id(), "herb_basic");
        assert_eq!(cfg.display_name(), "Basic Herb");
        assert_eq!(cfg.color(), "white");
        assert!((cfg.base_price() - 10.0).abs() < f64::EPSILON);
        assert_eq!(cfg.growth_ticks(), 3600);
        assert_eq!(cfg.base_yield(), 3);
        assert_eq!(cfg.category(), Category::Plant);
        assert!(cfg.requires_light());
        assert_eq!(cfg.min_light_level(), 8);
        assert!(!cfg.requires_water());
        assert!(!cfg.requires_temperature());
        assert_eq!(cfg.quality_tiers().len(), 4);
        assert_eq!(cfg.stage_count(), 0);
    }

    #[test]
    fn empty_id_fails_fast() {
        let result = ProductionConfig::builder("", "Name").build();
        assert!(matches!(result, Err(ConfigError::EmptyId)));
    }

    #[test]
    fn empty_display_name_fails_fast() {
        let result = ProductionConfig::builder("some_id", "").build();
        assert!(matches!(
            result,
            Err(ConfigError::EmptyDisplayName { ref id }) if id == "some_id"
        ));
    }

    // -----------------------------------------------------------------------
    // Default quality
    // -----------------------------------------------------------------------

    #[test]
    fn default_quality_is_the_middle_tier() {
        let cfg = ProductionConfig::builder("a", "A").build().unwrap();
        // 4 tiers -> index 2.
        assert_eq!(cfg.default_quality().level(), 2);

        let cfg = ProductionConfig::builder("b", "B")
            .quality_tiers(TierSystem::extended())
            .build()
            .unwrap();
        // 5 tiers -> index 2.
        assert_eq!(cfg.default_quality().level(), 2);
    }

    // -----------------------------------------------------------------------
    // Stage map
    // -----------------------------------------------------------------------

    #[test]
    fn stages_are_lookup_data_with_defensive_copies() {
        let cfg = ProductionConfig::builder("herb_mountain", "Mountain Herb")
            .add_stage(
                "drying",
                ProcessingStage::new("Drying", 1200, "fresh_leaf", "dried_leaf", true),
            )
            .add_stage(
                "packaging",
                ProcessingStage::new("Packaging", 600, "dried_leaf", "packaged_herb", true),
            )
            .build()
            .unwrap();

        assert_eq!(cfg.stage_count(), 2);
        assert_eq!(cfg.stage("drying").unwrap().duration, 1200);
        assert!(cfg.stage("unknown").is_none());

        // Mutating the snapshot must not leak back into the config.
        let mut snapshot = cfg.stages();
        snapshot.clear();
        assert_eq!(cfg.stage_count(), 2);
    }

    // -----------------------------------------------------------------------
    // Spawning
    // -----------------------------------------------------------------------

    #[test]
    fn spawn_plant_uses_default_quality_and_shared_type() {
        let cfg = ProductionConfig::builder("herb_valley", "Valley Herb")
            .growth_ticks(800)
            .base_yield(5)
            .build()
            .unwrap();
        let plant = cfg.spawn_plant();
        assert_eq!(plant.quality().level(), 2);
        assert_eq!(plant.production_type().growth_ticks(), 800);
        assert!(Arc::ptr_eq(plant.production_type(), &cfg.production_type()));
    }

    #[test]
    fn mushroom_category_gets_flush_policy() {
        let cfg = ProductionConfig::builder("oyster_grey", "Grey Oyster")
            .category(Category::Mushroom)
            .growth_ticks(800)
            .build()
            .unwrap();
        let mut plant = cfg.spawn_plant();
        plant.tick_by(800);
        assert!(plant.harvest());
        // Flush behavior: the colony regrew instead of staying mature.
        assert_eq!(plant.growth_stage(), 4);
    }

    #[test]
    fn display_includes_id_and_category() {
        let cfg = ProductionConfig::builder("herb_basic", "Basic Herb")
            .build()
            .unwrap();
        let s = format!("{cfg}");
        assert!(s.contains("herb_basic"));
        assert!(s.contains("Plant"));
    }
}

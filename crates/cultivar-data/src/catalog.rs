//! Built-in seed catalog: a baseline set of production definitions
//! registered in code, available without any data files on disk.
//!
//! Data files loaded afterwards may override any of these entries; the
//! registry's replace-on-register semantics handle the collision.

use std::sync::Arc;

use cultivar_core::config::ProductionConfig;
use cultivar_core::policy::CheckpointUpgradePolicy;
use cultivar_core::quality::TierSystem;
use cultivar_core::registry::Registry;
use cultivar_core::stage::ProcessingStage;
use cultivar_core::types::Category;

/// Register the built-in catalog. Returns the number of productions added.
pub fn seed(registry: &Registry) -> usize {
    let configs = builtin_configs();
    let count = configs.len();
    for config in configs {
        registry.register(config);
    }
    log::info!("seeded built-in catalog: {count} productions");
    count
}

fn builtin_configs() -> Vec<ProductionConfig> {
    // The builder validates ids and display names; every entry here is a
    // literal, so build() cannot fail and the unwraps are safe.
    vec![
        // -------------------------------------------------------------------
        // Plants
        // -------------------------------------------------------------------
        ProductionConfig::builder("herb_basic", "Basic Herb")
            .color("green")
            .base_price(8.0)
            .growth_ticks(2400)
            .base_yield(3)
            .build()
            .unwrap(),
        ProductionConfig::builder("herb_mountain", "Mountain Herb")
            .color("dark_green")
            .base_price(15.0)
            .growth_ticks(4800)
            .base_yield(3)
            .min_light_level(10)
            .requires_temperature(true)
            .add_stage(
                "drying",
                ProcessingStage::new("Drying", 1200, "fresh_leaf", "dried_leaf", true),
            )
            .add_stage(
                "packaging",
                ProcessingStage::new("Packaging", 600, "dried_leaf", "packaged_herb", true),
            )
            .build()
            .unwrap(),
        // Premium strain: five quality grades, and stage-checkpoint quality
        // upgrades when a quality booster is applied.
        ProductionConfig::builder("fern_silver", "Silver Fern")
            .color("aqua")
            .base_price(40.0)
            .growth_ticks(7200)
            .base_yield(2)
            .requires_water(true)
            .quality_tiers(TierSystem::extended())
            .policy(Arc::new(CheckpointUpgradePolicy::default()))
            .add_stage(
                "drying",
                ProcessingStage::new("Drying", 1800, "fresh_frond", "dried_frond", true),
            )
            .build()
            .unwrap(),
        // -------------------------------------------------------------------
        // Mushrooms
        // -------------------------------------------------------------------
        ProductionConfig::builder("oyster_grey", "Grey Oyster")
            .color("light_purple")
            .base_price(25.0)
            .growth_ticks(3200)
            .base_yield(4)
            .category(Category::Mushroom)
            .requires_light(false)
            .requires_water(true)
            .build()
            .unwrap(),
        ProductionConfig::builder("shiitake_forest", "Forest Shiitake")
            .color("gold")
            .base_price(35.0)
            .growth_ticks(4000)
            .base_yield(3)
            .category(Category::Mushroom)
            .requires_light(false)
            .add_stage(
                "drying",
                ProcessingStage::new("Drying", 2400, "fresh_shiitake", "dried_shiitake", true),
            )
            .build()
            .unwrap(),
        // -------------------------------------------------------------------
        // Extracts
        // -------------------------------------------------------------------
        ProductionConfig::builder("extract_fern", "Fern Extract")
            .color("dark_purple")
            .base_price(90.0)
            .growth_ticks(7200)
            .base_yield(1)
            .category(Category::Extract)
            .quality_tiers(TierSystem::extended())
            .add_stage(
                "infusion",
                ProcessingStage::with_resource(
                    "Infusion",
                    3600,
                    "dried_frond",
                    "fern_tincture",
                    true,
                    "grain_alcohol",
                    2,
                ),
            )
            .add_stage(
                "bottling",
                ProcessingStage::new("Bottling", 400, "fern_tincture", "bottled_extract", true),
            )
            .build()
            .unwrap(),
        // -------------------------------------------------------------------
        // Chemicals
        // -------------------------------------------------------------------
        // Synthesized on demand: no real growth phase, matures in the
        // minimum seven ticks.
        ProductionConfig::builder("tonic_mineral", "Mineral Tonic")
            .color("yellow")
            .base_price(60.0)
            .growth_ticks(0)
            .base_yield(2)
            .category(Category::Chemical)
            .requires_light(false)
            .add_stage(
                "mixing",
                ProcessingStage::with_resource(
                    "Mixing",
                    800,
                    "mineral_salts",
                    "tonic_base",
                    false,
                    "spring_water",
                    4,
                ),
            )
            .build()
            .unwrap(),
        // -------------------------------------------------------------------
        // Processed goods
        // -------------------------------------------------------------------
        ProductionConfig::builder("tea_pressed", "Pressed Tea Brick")
            .color("white")
            .base_price(20.0)
            .growth_ticks(1600)
            .base_yield(5)
            .category(Category::Processed)
            .add_stage(
                "fermentation",
                ProcessingStage::new("Fermentation", 4800, "raw_tea_leaf", "fermented_leaf", true),
            )
            .add_stage(
                "pressing",
                ProcessingStage::new("Pressing", 900, "fermented_leaf", "tea_brick", false),
            )
            .build()
            .unwrap(),
    ]
}

//! Serde data file structs for production definitions.
//!
//! These structs define the on-disk format for production types. They are
//! deserialized from RON, JSON, or TOML data files and then resolved into
//! engine configs by the loader.

use serde::Deserialize;

use cultivar_core::types::Category;

// ===========================================================================
// Productions
// ===========================================================================

/// A production type definition in a data file. Optional fields carry the
/// same defaults as the engine's config builder.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductionData {
    pub id: String,
    pub display_name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_base_price")]
    pub base_price: f64,
    #[serde(default = "default_growth_ticks")]
    pub growth_ticks: u64,
    #[serde(default = "default_base_yield")]
    pub base_yield: u32,
    #[serde(default = "default_category")]
    pub category: Category,
    #[serde(default = "default_true")]
    pub requires_light: bool,
    #[serde(default = "default_min_light_level")]
    pub min_light_level: u8,
    #[serde(default)]
    pub requires_water: bool,
    #[serde(default)]
    pub requires_temperature: bool,
    #[serde(default)]
    pub stages: Vec<StageData>,
    #[serde(default)]
    pub quality_tiers: TiersData,
}

fn default_color() -> String {
    "white".to_string()
}

fn default_base_price() -> f64 {
    10.0
}

fn default_growth_ticks() -> u64 {
    3600
}

fn default_base_yield() -> u32 {
    3
}

fn default_category() -> Category {
    Category::Plant
}

fn default_true() -> bool {
    true
}

fn default_min_light_level() -> u8 {
    8
}

// ===========================================================================
// Processing stages
// ===========================================================================

/// A processing stage entry within a production definition.
#[derive(Debug, Clone, Deserialize)]
pub struct StageData {
    pub id: String,
    pub name: String,
    pub duration: u64,
    pub input_item: String,
    pub output_item: String,
    #[serde(default = "default_true")]
    pub preserves_quality: bool,
    #[serde(default)]
    pub required_resource: Option<String>,
    #[serde(default = "default_resource_amount")]
    pub resource_amount: u32,
}

fn default_resource_amount() -> u32 {
    1
}

// ===========================================================================
// Quality tiers
// ===========================================================================

/// The tier-system selection for a production. Defaults to the standard
/// four-tier system when omitted.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TiersData {
    #[default]
    Standard,
    Extended,
    Custom {
        tier_count: usize,
        base_multiplier: f64,
        max_multiplier: f64,
    },
    /// Fully explicit per-tier definitions, in level order.
    Explicit(Vec<TierData>),
}

/// One explicitly defined quality tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierData {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    pub price_multiplier: f64,
    #[serde(default)]
    pub description: Option<String>,
}

// ===========================================================================
// TOML wrappers
// ===========================================================================

/// Top-level wrapper for TOML files, which cannot hold a bare array.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlProductions {
    pub productions: Vec<ProductionData>,
}

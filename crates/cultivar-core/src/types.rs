use serde::{Deserialize, Serialize};

/// Simulation time unit. One tick is one call to the host's tick driver.
pub type Ticks = u64;

/// An immutable variety/strain descriptor: pricing and growth baseline.
///
/// Many plant instances share one `ProductionType` (via `Arc`); it is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionType {
    display_name: String,
    color: String,
    base_price: f64,
    growth_ticks: Ticks,
    base_yield: u32,
}

impl ProductionType {
    pub fn new(
        display_name: impl Into<String>,
        color: impl Into<String>,
        base_price: f64,
        growth_ticks: Ticks,
        base_yield: u32,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            color: color.into(),
            base_price,
            growth_ticks,
            base_yield,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Base price per base-yield unit, before quality multipliers.
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Ticks to grow from stage 0 to stage 7, before boosters.
    pub fn growth_ticks(&self) -> Ticks {
        self.growth_ticks
    }

    pub fn base_yield(&self) -> u32 {
        self.base_yield
    }
}

/// The closed set of production categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Linear-growth plants (herbs, leaf crops).
    Plant,
    /// Mushroom-like production with repeat-harvest flushes.
    Mushroom,
    /// Synthesized chemicals -- no growth phase, processing only.
    Chemical,
    /// Goods extracted from a harvested crop.
    Extract,
    /// Dried, fermented, or otherwise finished goods.
    Processed,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Plant,
        Category::Mushroom,
        Category::Chemical,
        Category::Extract,
        Category::Processed,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Plant => "Plant",
            Category::Mushroom => "Mushroom",
            Category::Chemical => "Chemical",
            Category::Extract => "Extract",
            Category::Processed => "Processed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::Plant => "green",
            Category::Mushroom => "light_purple",
            Category::Chemical => "aqua",
            Category::Extract => "yellow",
            Category::Processed => "gold",
        }
    }
}

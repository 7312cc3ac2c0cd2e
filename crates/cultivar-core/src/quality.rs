//! Quality tier algebra: ordered, closed chains of grades with price
//! multipliers and clamped upgrade/downgrade navigation.
//!
//! A [`TierSystem`] is constructed once per tier-system definition and
//! shared (not owned) by every plant instance referencing it. Navigation
//! never indexes out of bounds: `upgrade` on the top tier and `downgrade`
//! on the bottom tier return the tier itself.

use std::sync::Arc;

/// Errors raised while constructing a tier system. These are programmer
/// errors and fail fast; they never occur at simulation time.
#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    #[error("tier count must be between 2 and 10, got {count}")]
    InvalidTierCount { count: usize },

    #[error("expected exactly {expected} {field}, got {got}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
}

/// One quality grade within a tier system.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityTier {
    pub name: String,
    pub color: String,
    /// 0-based ordinal; equals the tier's index in its system.
    pub level: usize,
    pub price_multiplier: f64,
    pub description: String,
}

// Fixed palette for generated tier systems. Indices beyond the palette
// fall back to a generic "Tier N" label.
const PALETTE_NAMES: [&str; 10] = [
    "Poor",
    "Fair",
    "Good",
    "Fine",
    "Excellent",
    "Premium",
    "Elite",
    "Legendary",
    "Divine",
    "Mythic",
];

const PALETTE_COLORS: [&str; 10] = [
    "red",
    "yellow",
    "green",
    "dark_green",
    "aqua",
    "light_purple",
    "dark_purple",
    "gold",
    "bold_gold",
    "shimmering_gold",
];

/// An immutable, ordered chain of at least two quality tiers.
///
/// Cheap to clone; all clones share the same backing array.
#[derive(Debug, Clone)]
pub struct TierSystem {
    tiers: Arc<[QualityTier]>,
}

impl PartialEq for TierSystem {
    fn eq(&self, other: &Self) -> bool {
        // Handle identity first: clones of one system are trivially equal.
        Arc::ptr_eq(&self.tiers, &other.tiers) || *self.tiers == *other.tiers
    }
}

impl TierSystem {
    /// The standard 4-tier system: multipliers {0.7, 1.0, 1.5, 2.5}.
    pub fn standard() -> Self {
        Self::from_rows(&[
            ("Poor", "red", 0.7, "Low quality with impurities"),
            ("Good", "yellow", 1.0, "Solid quality for the standard market"),
            ("Excellent", "green", 1.5, "High quality with consistent properties"),
            ("Legendary", "gold", 2.5, "Exceptional quality, premium product"),
        ])
    }

    /// The extended 5-tier system: multipliers {0.5, 1.0, 1.8, 3.0, 5.0}.
    pub fn extended() -> Self {
        Self::from_rows(&[
            ("Rough", "dark_gray", 0.5, "Substandard, full of stems and seeds"),
            ("Common", "gray", 1.0, "Average quality"),
            ("Fine", "yellow", 1.8, "Good quality with strong potency"),
            ("Select", "green", 3.0, "Premium quality"),
            ("Exotic", "light_purple", 5.0, "Exceptional, connoisseur grade"),
        ])
    }

    /// A generated system of `tier_count` tiers (2..=10) whose multipliers
    /// are linearly interpolated between `base_multiplier` (level 0) and
    /// `max_multiplier` (level `tier_count - 1`), endpoints inclusive.
    pub fn custom(
        tier_count: usize,
        base_multiplier: f64,
        max_multiplier: f64,
    ) -> Result<Self, QualityError> {
        check_tier_count(tier_count)?;

        let tiers: Vec<QualityTier> = (0..tier_count)
            .map(|i| {
                let t = i as f64 / (tier_count - 1) as f64;
                QualityTier {
                    name: PALETTE_NAMES
                        .get(i)
                        .map_or_else(|| format!("Tier {i}"), |n| (*n).to_string()),
                    color: PALETTE_COLORS.get(i).copied().unwrap_or("white").to_string(),
                    level: i,
                    price_multiplier: base_multiplier + (max_multiplier - base_multiplier) * t,
                    description: format!("Quality level {i}"),
                }
            })
            .collect();

        Ok(Self { tiers: tiers.into() })
    }

    /// Start building a fully explicit tier system.
    pub fn builder(tier_count: usize) -> Result<TierSystemBuilder, QualityError> {
        TierSystemBuilder::new(tier_count)
    }

    fn from_rows(rows: &[(&str, &str, f64, &str)]) -> Self {
        let tiers: Vec<QualityTier> = rows
            .iter()
            .enumerate()
            .map(|(i, (name, color, mult, desc))| QualityTier {
                name: (*name).to_string(),
                color: (*color).to_string(),
                level: i,
                price_multiplier: *mult,
                description: (*desc).to_string(),
            })
            .collect();
        Self { tiers: tiers.into() }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Tier systems always hold at least two tiers.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn tier(&self, index: usize) -> Option<&QualityTier> {
        self.tiers.get(index)
    }

    pub fn tiers(&self) -> &[QualityTier] {
        &self.tiers
    }

    /// The lowest grade in the system.
    pub fn worst(&self) -> Quality {
        Quality {
            system: self.clone(),
            index: 0,
        }
    }

    /// The highest grade in the system.
    pub fn best(&self) -> Quality {
        Quality {
            system: self.clone(),
            index: self.tiers.len() - 1,
        }
    }

    /// A handle to the tier at `index`, if in range.
    pub fn quality(&self, index: usize) -> Option<Quality> {
        if index < self.tiers.len() {
            Some(Quality {
                system: self.clone(),
                index,
            })
        } else {
            None
        }
    }

    /// Find a tier by ordinal level, falling back to the worst tier.
    ///
    /// The fallback is a deliberate availability-over-strictness policy:
    /// an unmatched level usually means corrupted saved state, and the
    /// world must keep running. Logged, never an error.
    pub fn by_level(&self, level: usize) -> Quality {
        match self.quality(level) {
            Some(q) => q,
            None => {
                log::warn!(
                    "quality level {level} out of range for {}-tier system, using worst tier",
                    self.tiers.len()
                );
                self.worst()
            }
        }
    }

    /// Find a tier by display name (case-insensitive), falling back to the
    /// worst tier. Same availability policy as [`TierSystem::by_level`].
    pub fn by_name(&self, name: &str) -> Quality {
        for (i, tier) in self.tiers.iter().enumerate() {
            if tier.name.eq_ignore_ascii_case(name) {
                return Quality {
                    system: self.clone(),
                    index: i,
                };
            }
        }
        log::warn!("unknown quality name '{name}', using worst tier");
        self.worst()
    }
}

/// A handle to one tier within a [`TierSystem`]: the quality carried by a
/// plant instance.
#[derive(Debug, Clone)]
pub struct Quality {
    system: TierSystem,
    index: usize,
}

impl PartialEq for Quality {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.tier().name == other.tier().name
    }
}

impl Quality {
    pub fn tier(&self) -> &QualityTier {
        // Index is validated at construction; systems are immutable.
        &self.system.tiers[self.index]
    }

    pub fn name(&self) -> &str {
        &self.tier().name
    }

    pub fn color(&self) -> &str {
        &self.tier().color
    }

    pub fn level(&self) -> usize {
        self.tier().level
    }

    pub fn price_multiplier(&self) -> f64 {
        self.tier().price_multiplier
    }

    pub fn description(&self) -> &str {
        &self.tier().description
    }

    pub fn system(&self) -> &TierSystem {
        &self.system
    }

    pub fn can_upgrade(&self) -> bool {
        self.index + 1 < self.system.len()
    }

    pub fn can_downgrade(&self) -> bool {
        self.index > 0
    }

    pub fn is_min(&self) -> bool {
        self.index == 0
    }

    pub fn is_max(&self) -> bool {
        self.index + 1 == self.system.len()
    }

    /// The next-higher tier, or self if already at the top. Never panics.
    pub fn upgrade(&self) -> Quality {
        if self.can_upgrade() {
            Quality {
                system: self.system.clone(),
                index: self.index + 1,
            }
        } else {
            self.clone()
        }
    }

    /// The next-lower tier, or self if already at the bottom.
    pub fn downgrade(&self) -> Quality {
        if self.can_downgrade() {
            Quality {
                system: self.system.clone(),
                index: self.index - 1,
            }
        } else {
            self.clone()
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let t = self.tier();
        write!(
            f,
            "{} (Level {}, x{:.1})",
            t.name, t.level, t.price_multiplier
        )
    }
}

fn check_tier_count(count: usize) -> Result<(), QualityError> {
    if (2..=10).contains(&count) {
        Ok(())
    } else {
        Err(QualityError::InvalidTierCount { count })
    }
}

/// Builder for fully explicit tier systems: per-tier names, colors,
/// multipliers, and descriptions. Every provided array must exactly match
/// the tier count or `build()` fails.
#[derive(Debug)]
pub struct TierSystemBuilder {
    tier_count: usize,
    names: Vec<String>,
    colors: Vec<String>,
    multipliers: Vec<f64>,
    descriptions: Vec<String>,
}

impl TierSystemBuilder {
    fn new(tier_count: usize) -> Result<Self, QualityError> {
        check_tier_count(tier_count)?;
        Ok(Self {
            tier_count,
            names: (0..tier_count).map(|i| format!("Tier {i}")).collect(),
            colors: vec!["white".to_string(); tier_count],
            multipliers: (0..tier_count).map(|i| 1.0 + i as f64 * 0.5).collect(),
            descriptions: (0..tier_count).map(|i| format!("Quality level {i}")).collect(),
        })
    }

    pub fn names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, QualityError> {
        self.names = names.into_iter().map(Into::into).collect();
        self.check_len("names", self.names.len())?;
        Ok(self)
    }

    pub fn colors<S: Into<String>>(
        mut self,
        colors: impl IntoIterator<Item = S>,
    ) -> Result<Self, QualityError> {
        self.colors = colors.into_iter().map(Into::into).collect();
        self.check_len("colors", self.colors.len())?;
        Ok(self)
    }

    pub fn price_multipliers(
        mut self,
        multipliers: impl IntoIterator<Item = f64>,
    ) -> Result<Self, QualityError> {
        self.multipliers = multipliers.into_iter().collect();
        self.check_len("price multipliers", self.multipliers.len())?;
        Ok(self)
    }

    pub fn descriptions<S: Into<String>>(
        mut self,
        descriptions: impl IntoIterator<Item = S>,
    ) -> Result<Self, QualityError> {
        self.descriptions = descriptions.into_iter().map(Into::into).collect();
        self.check_len("descriptions", self.descriptions.len())?;
        Ok(self)
    }

    fn check_len(&self, field: &'static str, got: usize) -> Result<(), QualityError> {
        if got == self.tier_count {
            Ok(())
        } else {
            Err(QualityError::LengthMismatch {
                field,
                expected: self.tier_count,
                got,
            })
        }
    }

    pub fn build(self) -> TierSystem {
        let tiers: Vec<QualityTier> = (0..self.tier_count)
            .map(|i| QualityTier {
                name: self.names[i].clone(),
                color: self.colors[i].clone(),
                level: i,
                price_multiplier: self.multipliers[i],
                description: self.descriptions[i].clone(),
            })
            .collect();
        TierSystem { tiers: tiers.into() }
    }
}

//! Resolution pipeline: reads data files, builds engine configs, fills a
//! registry.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and the
//! schema-to-config resolution used when loading production definitions
//! from disk.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use cultivar_core::config::{ConfigError, ProductionConfig};
use cultivar_core::quality::{QualityError, TierSystem};
use cultivar_core::registry::Registry;
use cultivar_core::stage::ProcessingStage;

use crate::schema::{ProductionData, StageData, TiersData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The same production id appears twice in one file.
    #[error("duplicate production id '{id}' in {file}")]
    DuplicateId { file: PathBuf, id: String },

    /// A definition failed config validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A definition declared an invalid tier system.
    #[error(transparent)]
    Quality(#[from] QualityError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without
/// extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format (detected from
/// extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Toml => toml::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at
/// the given `toml_key` from a top-level table. For RON and JSON,
/// deserializes directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| DataLoadError::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        }),
        Format::Toml => {
            let table: toml::Value =
                toml::from_str(&content).map_err(|e| DataLoadError::Parse {
                    file: path.to_path_buf(),
                    detail: e.to_string(),
                })?;
            let array = table
                .get(toml_key)
                .ok_or_else(|| DataLoadError::Parse {
                    file: path.to_path_buf(),
                    detail: format!("missing key '{toml_key}' in TOML file"),
                })?
                .clone();
            array
                .try_into()
                .map_err(|e: toml::de::Error| DataLoadError::Parse {
                    file: path.to_path_buf(),
                    detail: e.to_string(),
                })
        }
    }
}

// ===========================================================================
// Schema resolution
// ===========================================================================

fn resolve_tiers(data: &TiersData) -> Result<TierSystem, QualityError> {
    match data {
        TiersData::Standard => Ok(TierSystem::standard()),
        TiersData::Extended => Ok(TierSystem::extended()),
        TiersData::Custom {
            tier_count,
            base_multiplier,
            max_multiplier,
        } => TierSystem::custom(*tier_count, *base_multiplier, *max_multiplier),
        TiersData::Explicit(tiers) => {
            let mut builder = TierSystem::builder(tiers.len())?
                .names(tiers.iter().map(|t| t.name.clone()))?
                .colors(tiers.iter().map(|t| t.color.clone()))?
                .price_multipliers(tiers.iter().map(|t| t.price_multiplier))?;
            if tiers.iter().any(|t| t.description.is_some()) {
                builder = builder.descriptions(tiers.iter().enumerate().map(|(i, t)| {
                    t.description
                        .clone()
                        .unwrap_or_else(|| format!("Quality level {i}"))
                }))?;
            }
            Ok(builder.build())
        }
    }
}

fn resolve_stage(data: &StageData) -> ProcessingStage {
    match &data.required_resource {
        Some(resource) => ProcessingStage::with_resource(
            &data.name,
            data.duration,
            &data.input_item,
            &data.output_item,
            data.preserves_quality,
            resource,
            data.resource_amount,
        ),
        None => ProcessingStage::new(
            &data.name,
            data.duration,
            &data.input_item,
            &data.output_item,
            data.preserves_quality,
        ),
    }
}

/// Build an engine config from one parsed definition.
pub fn resolve_production(data: &ProductionData) -> Result<ProductionConfig, DataLoadError> {
    let mut builder = ProductionConfig::builder(&data.id, &data.display_name)
        .color(&data.color)
        .base_price(data.base_price)
        .growth_ticks(data.growth_ticks)
        .base_yield(data.base_yield)
        .category(data.category)
        .requires_light(data.requires_light)
        .min_light_level(data.min_light_level)
        .requires_water(data.requires_water)
        .requires_temperature(data.requires_temperature)
        .quality_tiers(resolve_tiers(&data.quality_tiers)?);

    for stage in &data.stages {
        builder = builder.add_stage(&stage.id, resolve_stage(stage));
    }

    Ok(builder.build()?)
}

// ===========================================================================
// Loading pipeline
// ===========================================================================

/// Load every production definition from one data file.
///
/// Within a single file, duplicate ids are a hard error; across files (or
/// repeated loads) the registry's replace-on-register semantics apply.
pub fn load_productions(path: &Path) -> Result<Vec<ProductionConfig>, DataLoadError> {
    let raw: Vec<ProductionData> = deserialize_list(path, "productions")?;

    let mut seen: Vec<&str> = Vec::with_capacity(raw.len());
    for data in &raw {
        if seen.contains(&data.id.as_str()) {
            return Err(DataLoadError::DuplicateId {
                file: path.to_path_buf(),
                id: data.id.clone(),
            });
        }
        seen.push(&data.id);
    }

    raw.iter().map(resolve_production).collect()
}

/// Load a data file and register every definition in it. Returns the number
/// of productions registered.
pub fn load_into(registry: &Registry, path: &Path) -> Result<usize, DataLoadError> {
    let configs = load_productions(path)?;
    let count = configs.len();
    for config in configs {
        registry.register(config);
    }
    log::info!("loaded {count} productions from {}", path.display());
    Ok(count)
}

// ===========================================================================
// Tests
// ===========================================================================

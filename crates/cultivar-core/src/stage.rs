//! Processing stage configuration: one named transformation step in a
//! production chain (drying, fermentation, packaging, ...).
//!
//! A stage is pure data. There is intentionally no "next stage" pointer:
//! stage maps are lookup tables, and any pipeline ordering is established
//! by the external caller reading stage ids in a known sequence.

use crate::types::Ticks;

/// One transformation step: duration, input/output identifiers, quality
/// preservation, and an optional resource cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingStage {
    pub name: String,
    pub duration: Ticks,
    pub input_item: String,
    pub output_item: String,
    /// Whether the input's quality grade carries over to the output.
    pub preserves_quality: bool,
    pub required_resource: Option<String>,
    pub resource_amount: u32,
}

impl ProcessingStage {
    /// A resource-free stage.
    pub fn new(
        name: impl Into<String>,
        duration: Ticks,
        input_item: impl Into<String>,
        output_item: impl Into<String>,
        preserves_quality: bool,
    ) -> Self {
        Self {
            name: name.into(),
            duration,
            input_item: input_item.into(),
            output_item: output_item.into(),
            preserves_quality,
            required_resource: None,
            resource_amount: 0,
        }
    }

    /// A stage that consumes `amount` of `resource` per run.
    pub fn with_resource(
        name: impl Into<String>,
        duration: Ticks,
        input_item: impl Into<String>,
        output_item: impl Into<String>,
        preserves_quality: bool,
        resource: impl Into<String>,
        amount: u32,
    ) -> Self {
        Self {
            name: name.into(),
            duration,
            input_item: input_item.into(),
            output_item: output_item.into(),
            preserves_quality,
            required_resource: Some(resource.into()),
            resource_amount: amount,
        }
    }

    /// True when the stage has a non-empty resource requirement.
    pub fn requires_resource(&self) -> bool {
        self.required_resource
            .as_deref()
            .is_some_and(|r| !r.is_empty())
    }
}

//! Scheduler configuration
//!
//! Serialized as JSON; every field is optional and defaults to the classic
//! SM-2 constants and the moderate preset.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scheduling::{AdaptiveParameters, SchedulePreset};

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Adaptive scheduler constants
    pub adaptive: AdaptiveParameters,
    /// Pattern offered to notes created in fixed mode without one
    pub default_preset: SchedulePreset,
}

impl SchedulerConfig {
    /// Check every parameter
    pub fn validate(&self) -> Result<()> {
        self.adaptive.validate()
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigParseError> {
        let config: SchedulerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Failure to read a configuration document
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigParseError {
    /// Malformed JSON or unknown fields
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed but out-of-range values
    #[error(transparent)]
    Invalid(#[from] crate::error::SchedulingError),
}

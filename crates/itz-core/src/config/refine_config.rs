use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

use super::validate_probability;

/// Refinement of a specification from a fitted model's inspection table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Non-anchored rows survive when their p-value is below this.
    pub threshold: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            threshold: constants::DEFAULT_REFINE_THRESHOLD,
        }
    }
}

impl RefineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_probability("refine.threshold", self.threshold)
    }
}

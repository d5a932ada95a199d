use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// Shift constants for the value transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Added to x before every log transform, subtracted after every exp.
    pub log_shift: f64,
    /// Added to x before taking the reciprocal.
    pub reciprocal_shift: f64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            log_shift: constants::LOG_TRANSFORM_SHIFT,
            reciprocal_shift: constants::RECIPROCAL_TRANSFORM_SHIFT,
        }
    }
}

impl TransformConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("transforms.log_shift", self.log_shift),
            ("transforms.reciprocal_shift", self.reciprocal_shift),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be a finite non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }
}

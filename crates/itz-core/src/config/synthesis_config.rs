use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

use super::validate_probability;

/// Model description synthesis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Name of the latent factor defined by the densification indicators.
    pub latent_name: String,
    /// A regression passes when its p-value is below this. `>= 1.0` disables gating.
    pub regression_threshold: f64,
    /// A covariance passes when its p-value is below this. `>= 1.0` disables gating.
    pub covariance_threshold: f64,
    /// Gate `dependent ~ early_upzoning` with the regression threshold
    /// instead of emitting it unconditionally.
    pub gate_early_upzoning: bool,
    /// Also test covariances between unrelated dependent variables.
    pub dependent_covariances: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            latent_name: constants::DEFAULT_LATENT_NAME.to_string(),
            regression_threshold: constants::DEFAULT_REGRESSION_THRESHOLD,
            covariance_threshold: constants::DEFAULT_COVARIANCE_THRESHOLD,
            gate_early_upzoning: false,
            dependent_covariances: false,
        }
    }
}

impl SynthesisConfig {
    /// Same threshold for regressions and covariances.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            regression_threshold: threshold,
            covariance_threshold: threshold,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.latent_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "synthesis.latent_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        validate_probability("synthesis.regression_threshold", self.regression_threshold)?;
        validate_probability("synthesis.covariance_threshold", self.covariance_threshold)
    }
}

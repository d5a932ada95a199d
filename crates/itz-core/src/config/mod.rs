//! Immutable configuration passed into the synthesizer, fit adapter, and
//! path analyzer at call time. Nothing reads thresholds from globals.

pub mod path_config;
pub mod refine_config;
pub mod synthesis_config;
pub mod transform_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use path_config::PathConfig;
pub use refine_config::RefineConfig;
pub use synthesis_config::SynthesisConfig;
pub use transform_config::TransformConfig;

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItzConfig {
    pub synthesis: SynthesisConfig,
    pub transforms: TransformConfig,
    pub paths: PathConfig,
    pub refine: RefineConfig,
}

impl ItzConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse_named(text, "<inline>")
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display });
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: display.clone(),
            message: e.to_string(),
        })?;
        Self::parse_named(&text, &display)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "<root>".to_string(),
            message: e.to_string(),
        })
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.synthesis.validate()?;
        self.transforms.validate()?;
        self.paths.validate()?;
        self.refine.validate()
    }

    fn parse_named(text: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Shared check for p-value cutoffs.
pub(crate) fn validate_probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("must be within [0, 1], got {value}"),
        });
    }
    Ok(())
}

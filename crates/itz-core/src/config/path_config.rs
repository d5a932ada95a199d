use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

use super::validate_probability;

/// Path enumeration configuration. Every limit defaults to unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Maximum number of hops in a path.
    pub max_depth: Option<usize>,
    /// Stop after this many paths have been found.
    pub max_paths: Option<usize>,
    /// Wall-clock budget for one search, in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Ignore regression edges whose p-value exceeds this.
    pub edge_p_value_cutoff: Option<f64>,
}

impl PathConfig {
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "paths.max_depth".to_string(),
                message: "must be at least 1 hop".to_string(),
            });
        }
        if self.max_paths == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "paths.max_paths".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(cutoff) = self.edge_p_value_cutoff {
            validate_probability("paths.edge_p_value_cutoff", cutoff)?;
        }
        Ok(())
    }
}

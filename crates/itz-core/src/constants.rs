//! Shared constants and defaults for the In The Zone toolkit.

/// Toolkit version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default name of the latent construct measured by the densification indicators.
pub const DEFAULT_LATENT_NAME: &str = "densification";

/// Default p-value cutoff for threshold-gated regression relations.
pub const DEFAULT_REGRESSION_THRESHOLD: f64 = 0.05;

/// Default p-value cutoff for threshold-gated covariance relations.
/// Stricter than the regression cutoff.
pub const DEFAULT_COVARIANCE_THRESHOLD: f64 = 0.01;

/// Default p-value cutoff used when refining a specification from a fitted model.
pub const DEFAULT_REFINE_THRESHOLD: f64 = 0.2;

/// Shift added before log transforms so zero-valued deltas stay in domain.
pub const LOG_TRANSFORM_SHIFT: f64 = 0.001;

/// Shift added before reciprocal transforms.
pub const RECIPROCAL_TRANSFORM_SHIFT: f64 = 0.001;

/// Separator between a transform name and the raw column it applies to (`log_income`).
pub const TRANSFORM_SEPARATOR: char = '_';

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "ITZ_LOG";

/// Filter used when `ITZ_LOG` is absent or invalid.
pub const DEFAULT_LOG_FILTER: &str = "itz=info";

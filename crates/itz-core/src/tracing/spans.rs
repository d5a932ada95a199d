//! Span definitions per operation: synthesis, fit, path analysis.

/// Create a synthesis span.
#[macro_export]
macro_rules! synthesis_span {
    ($dependents:expr, $controls:expr) => {
        tracing::info_span!("itz.synthesis", dependents = $dependents, controls = $controls)
    };
}

/// Create a model fit span.
#[macro_export]
macro_rules! fit_span {
    ($relations:expr, $variables:expr) => {
        tracing::info_span!("itz.fit", relations = $relations, variables = $variables)
    };
}

/// Create a path analysis span.
#[macro_export]
macro_rules! effects_span {
    ($source:expr, $target:expr) => {
        tracing::info_span!("itz.effects", source = %$source, target = %$target)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SYNTHESIS: &str = "itz.synthesis";
    pub const FIT: &str = "itz.fit";
    pub const EFFECTS: &str = "itz.effects";
}

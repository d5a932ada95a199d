//! ItzErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this so reports and logs can carry a
/// structured code next to the human-readable message.
pub trait ItzErrorCode {
    /// Returns the error code string (e.g., "TRANSFORM_DOMAIN").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const UNKNOWN_TRANSFORM: &str = "UNKNOWN_TRANSFORM";
pub const TRANSFORM_DOMAIN: &str = "TRANSFORM_DOMAIN";
pub const INSUFFICIENT_DATA: &str = "INSUFFICIENT_DATA";
pub const DEGENERATE_REGRESSION: &str = "DEGENERATE_REGRESSION";
pub const LENGTH_MISMATCH: &str = "LENGTH_MISMATCH";
pub const EMPTY_VARIABLE_SET: &str = "EMPTY_VARIABLE_SET";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const UNRESOLVED_VARIABLE: &str = "UNRESOLVED_VARIABLE";
pub const FIT_CONVERGENCE: &str = "FIT_CONVERGENCE";
pub const UNKNOWN_VARIABLE: &str = "UNKNOWN_VARIABLE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SPECIFICATION_ERROR: &str = "SPECIFICATION_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

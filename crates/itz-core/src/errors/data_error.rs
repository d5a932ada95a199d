//! Dataset and transform errors.

use super::error_code::{self, ItzErrorCode};

/// Errors raised while reading columns out of a dataset or transforming them.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("column not found in dataset: {column}")]
    MissingColumn { column: String },

    #[error("unknown transform: {name}")]
    UnknownTransform { name: String },

    #[error("transform {transform} out of domain for {variable}: value {value}")]
    TransformDomain {
        variable: String,
        transform: String,
        value: f64,
    },

    #[error("no paired observations for {x} and {y}")]
    InsufficientData { x: String, y: String },

    #[error("regression of {y} on {x} needs at least two distinct values of {x}")]
    DegenerateRegression { x: String, y: String },

    #[error("column {column} has {actual} rows, dataset has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },
}

impl ItzErrorCode for DataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            Self::UnknownTransform { .. } => error_code::UNKNOWN_TRANSFORM,
            Self::TransformDomain { .. } => error_code::TRANSFORM_DOMAIN,
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            Self::DegenerateRegression { .. } => error_code::DEGENERATE_REGRESSION,
            Self::LengthMismatch { .. } => error_code::LENGTH_MISMATCH,
        }
    }
}

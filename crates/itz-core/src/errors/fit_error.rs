//! Model fit errors.

use super::data_error::DataError;
use super::error_code::{self, ItzErrorCode};

/// Errors raised while preparing a table for, or running, the SEM estimator.
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("specification references no observed variables")]
    EmptyVariableSet,

    #[error("variable {name} is neither a dataset column nor a transform of one")]
    UnresolvedVariable { name: String },

    #[error("no rows left after dropping nulls ({rows_before} rows before cleaning)")]
    InsufficientData { rows_before: usize },

    #[error("estimator failed to converge: {message}")]
    Convergence { message: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl ItzErrorCode for FitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyVariableSet => error_code::EMPTY_VARIABLE_SET,
            Self::UnresolvedVariable { .. } => error_code::UNRESOLVED_VARIABLE,
            Self::InsufficientData { .. } => error_code::INSUFFICIENT_DATA,
            Self::Convergence { .. } => error_code::FIT_CONVERGENCE,
            Self::Data(e) => e.error_code(),
        }
    }
}

//! Model description synthesis errors.

use super::data_error::DataError;
use super::error_code::{self, ItzErrorCode};

/// Errors that abort a synthesis run. Non-significance is never an error.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("no {role} variables supplied")]
    EmptyVariableSet { role: String },

    #[error("invalid synthesis input: {reason}")]
    InvalidInput { reason: String },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl ItzErrorCode for SynthesisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyVariableSet { .. } => error_code::EMPTY_VARIABLE_SET,
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::Data(e) => e.error_code(),
        }
    }
}

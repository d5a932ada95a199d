//! Path analysis errors.

use super::error_code::{self, ItzErrorCode};

/// Errors raised by total-effect path analysis. "No path" is not one of them.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("variable not present in fitted model: {name}")]
    UnknownVariable { name: String },
}

impl ItzErrorCode for PathError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownVariable { .. } => error_code::UNKNOWN_VARIABLE,
        }
    }
}

//! Errors from parsing model description text.

use super::error_code::{self, ItzErrorCode};

/// Malformed line in a model description.
#[derive(Debug, thiserror::Error)]
pub enum SpecificationError {
    #[error("line {line}: no relation operator in {text:?}")]
    MissingOperator { line: usize, text: String },

    #[error("line {line}: empty {side} side in {text:?}")]
    EmptySide {
        line: usize,
        side: &'static str,
        text: String,
    },
}

impl ItzErrorCode for SpecificationError {
    fn error_code(&self) -> &'static str {
        error_code::SPECIFICATION_ERROR
    }
}

//! Error taxonomy for the toolkit.
//!
//! One enum per subsystem, each carrying a stable error code, plus the
//! umbrella [`ItzError`] with `From` conversions so callers can use `?`
//! across subsystem boundaries.

pub mod config_error;
pub mod data_error;
pub mod error_code;
pub mod fit_error;
pub mod path_error;
pub mod specification_error;
pub mod synthesis_error;

pub use config_error::ConfigError;
pub use data_error::DataError;
pub use error_code::ItzErrorCode;
pub use fit_error::FitError;
pub use path_error::PathError;
pub use specification_error::SpecificationError;
pub use synthesis_error::SynthesisError;

/// Top-level error for any toolkit operation.
#[derive(Debug, thiserror::Error)]
pub enum ItzError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("fit error: {0}")]
    Fit(#[from] FitError),

    #[error("path analysis error: {0}")]
    Path(#[from] PathError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("specification error: {0}")]
    Specification(#[from] SpecificationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ItzErrorCode for ItzError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Data(e) => e.error_code(),
            Self::Synthesis(e) => e.error_code(),
            Self::Fit(e) => e.error_code(),
            Self::Path(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Specification(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used across the workspace.
pub type ItzResult<T> = Result<T, ItzError>;

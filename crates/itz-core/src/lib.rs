//! # itz-core
//!
//! Foundation crate for the In The Zone upzoning analysis toolkit.
//! Defines the data model, transform registry, errors, config, tracing,
//! and constants. The `itz-sem` engine depends on all of it.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod transform;

// Re-export the most commonly used types at the crate root.
pub use config::ItzConfig;
pub use errors::{ItzError, ItzResult};
pub use models::{Dataset, InspectionRow, InspectionTable, ModelSpecification, Operator, Relation};
pub use transform::{Transform, TransformKind, TransformRegistry};

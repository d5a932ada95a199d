//! Named value transforms with declared domains.
//!
//! A variable name of the form `<transform>_<column>` (for example
//! `log_d_2010_2018_pop_density`) selects a transform applied to a raw
//! column. The registry maps each name to a pure function plus its valid
//! domain; the domain is checked before every application.

pub mod kind;
pub mod registry;

pub use kind::{Domain, Transform, TransformKind};
pub use registry::{ResolvedVariable, TransformRegistry};

//! Data model shared by synthesis, fitting, and path analysis.

pub mod dataset;
pub mod inspection;
pub mod relation;
pub mod specification;

pub use dataset::Dataset;
pub use inspection::{InspectionRow, InspectionTable};
pub use relation::{Operator, Relation};
pub use specification::ModelSpecification;

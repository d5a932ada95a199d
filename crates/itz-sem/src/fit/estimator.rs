//! The seam to the external SEM numerical solver.

use std::collections::BTreeMap;
use std::fmt;

use itz_core::models::InspectionTable;

use super::table::NumericTable;

/// What the solver returns on success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimation {
    /// One row per fitted relation.
    pub inspection: InspectionTable,
    /// Fit indices (CFI, RMSEA, chi2, ...), passed through unmodified.
    pub statistics: BTreeMap<String, f64>,
}

/// Diagnostic from a solver that did not converge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorFailure {
    pub message: String,
}

impl EstimatorFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EstimatorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EstimatorFailure {}

/// A structural equation model solver. Given the description text and a
/// fully numeric, null-free table whose columns are named after the
/// model's observed variables, returns fitted estimates.
pub trait SemEstimator {
    fn estimate(&self, description: &str, table: &NumericTable) -> Result<Estimation, EstimatorFailure>;
}

impl<F> SemEstimator for F
where
    F: Fn(&str, &NumericTable) -> Result<Estimation, EstimatorFailure>,
{
    fn estimate(&self, description: &str, table: &NumericTable) -> Result<Estimation, EstimatorFailure> {
        self(description, table)
    }
}

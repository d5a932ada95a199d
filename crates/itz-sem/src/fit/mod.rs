//! Model fit adapter: builds the numeric table a specification needs and
//! runs the external estimator on it.
//!
//! Rows with a null in any required raw column are dropped, never
//! imputed. Transforms named by variable prefixes are applied after the
//! drop. Estimator failures surface verbatim and are not retried.

pub mod estimator;
pub mod table;

use std::collections::BTreeMap;

use itz_core::config::{ItzConfig, TransformConfig};
use itz_core::errors::{DataError, FitError};
use itz_core::models::{Dataset, InspectionTable, ModelSpecification};
use itz_core::transform::{ResolvedVariable, TransformRegistry};
use tracing::{debug, info, warn};

pub use estimator::{Estimation, EstimatorFailure, SemEstimator};
pub use table::NumericTable;

/// A fitted model. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    specification: ModelSpecification,
    inspection: InspectionTable,
    statistics: BTreeMap<String, f64>,
    n_observations: usize,
}

impl FittedModel {
    /// Assemble a model from estimates obtained elsewhere (for example an
    /// inspection table saved by an earlier run).
    pub fn from_parts(
        specification: ModelSpecification,
        inspection: InspectionTable,
        statistics: BTreeMap<String, f64>,
        n_observations: usize,
    ) -> Self {
        Self {
            specification,
            inspection,
            statistics,
            n_observations,
        }
    }

    pub fn specification(&self) -> &ModelSpecification {
        &self.specification
    }

    pub fn inspection(&self) -> &InspectionTable {
        &self.inspection
    }

    /// Fit statistics exactly as the estimator reported them.
    pub fn statistics(&self) -> &BTreeMap<String, f64> {
        &self.statistics
    }

    /// Rows the estimator saw.
    pub fn n_observations(&self) -> usize {
        self.n_observations
    }

    /// Fit statistics and the inspection table, unmodified.
    pub fn evaluate(&self) -> (&BTreeMap<String, f64>, &InspectionTable) {
        (&self.statistics, &self.inspection)
    }
}

/// Runs a [`SemEstimator`] against datasets.
pub struct FitAdapter<'e> {
    estimator: &'e dyn SemEstimator,
    registry: TransformRegistry,
}

impl<'e> FitAdapter<'e> {
    pub fn new(estimator: &'e dyn SemEstimator, transforms: &TransformConfig) -> Self {
        Self {
            estimator,
            registry: TransformRegistry::new(transforms),
        }
    }

    pub fn from_config(estimator: &'e dyn SemEstimator, config: &ItzConfig) -> Self {
        Self::new(estimator, &config.transforms)
    }

    /// Build the null-free, transformed table for a specification's
    /// observed variables.
    pub fn prepare_table(
        &self,
        spec: &ModelSpecification,
        dataset: &Dataset,
    ) -> Result<NumericTable, FitError> {
        let resolved = spec
            .observed_variables()
            .map(|name| {
                self.registry.resolve(name, dataset).map_err(|e| match e {
                    DataError::MissingColumn { .. } => FitError::UnresolvedVariable {
                        name: name.to_string(),
                    },
                    other => FitError::Data(other),
                })
            })
            .collect::<Result<Vec<ResolvedVariable>, _>>()?;
        if resolved.is_empty() {
            return Err(FitError::EmptyVariableSet);
        }

        let mut required: Vec<&str> = resolved.iter().map(|r| r.column.as_str()).collect();
        required.sort_unstable();
        required.dedup();

        let rows = dataset.complete_rows(&required)?;
        if rows.is_empty() {
            return Err(FitError::InsufficientData {
                rows_before: dataset.n_rows(),
            });
        }
        let dropped = dataset.n_rows() - rows.len();
        if dropped > 0 {
            debug!(dropped, kept = rows.len(), "dropped rows with nulls in required columns");
        }

        let mut table = NumericTable::new(rows);
        for var in &resolved {
            let column = dataset.column(&var.column)?;
            let values = table
                .source_rows()
                .iter()
                .filter_map(|&i| column[i])
                .map(|v| var.transform.apply_for(&var.name, v))
                .collect::<Result<Vec<f64>, _>>()?;
            table.insert(var.name.clone(), values);
        }
        Ok(table)
    }

    /// Prepare the table and run the estimator.
    pub fn fit(&self, spec: &ModelSpecification, dataset: &Dataset) -> Result<FittedModel, FitError> {
        let _span = itz_core::fit_span!(spec.len(), spec.variables().len()).entered();

        let table = self.prepare_table(spec, dataset)?;
        let description = spec.description();
        let estimation = self
            .estimator
            .estimate(&description, &table)
            .map_err(|failure| {
                warn!(message = %failure, "estimator did not converge");
                FitError::Convergence {
                    message: failure.message,
                }
            })?;

        info!(
            observations = table.n_rows(),
            columns = table.n_columns(),
            rows = estimation.inspection.len(),
            "model fitted"
        );
        Ok(FittedModel {
            specification: spec.clone(),
            inspection: estimation.inspection,
            statistics: estimation.statistics,
            n_observations: table.n_rows(),
        })
    }
}

//! Significance gating for candidate relations.

use itz_core::errors::DataError;
use itz_core::models::Dataset;
use itz_core::transform::{ResolvedVariable, TransformRegistry};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::regression::regress_resolved;

/// Pass/fail on a p-value. Smaller p-values pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceGate {
    threshold: f64,
}

impl SignificanceGate {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// A threshold of 1.0 or more disables gating; 0.0 passes nothing.
    /// `None` means the pair could not be tested and never passes.
    pub fn passes(&self, p_value: Option<f64>) -> bool {
        match p_value {
            None => false,
            Some(_) if self.threshold >= 1.0 => true,
            Some(p) => p < self.threshold,
        }
    }
}

/// Runs and memoizes pairwise regressions for one synthesis run.
pub struct PairTester<'d> {
    dataset: &'d Dataset,
    resolved: FxHashMap<String, ResolvedVariable>,
    cache: FxHashMap<(String, String), Option<f64>>,
    excluded: usize,
}

impl<'d> PairTester<'d> {
    pub fn new(dataset: &'d Dataset) -> Self {
        Self {
            dataset,
            resolved: FxHashMap::default(),
            cache: FxHashMap::default(),
            excluded: 0,
        }
    }

    /// Resolve and remember a variable. Fails on names that are neither a
    /// column nor a transform of one.
    pub fn register(&mut self, registry: &TransformRegistry, name: &str) -> Result<(), DataError> {
        if !self.resolved.contains_key(name) {
            let resolved = registry.resolve(name, self.dataset)?;
            self.resolved.insert(name.to_string(), resolved);
        }
        Ok(())
    }

    /// p-value of regressing `outcome` on `explanatory`, or `None` when the
    /// pair has no usable observations. Transform domain errors propagate.
    pub fn p_value(&mut self, explanatory: &str, outcome: &str) -> Result<Option<f64>, DataError> {
        let key = (explanatory.to_string(), outcome.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return Ok(*cached);
        }

        let x = self.lookup(explanatory)?;
        let y = self.lookup(outcome)?;
        let p = match regress_resolved(x, y, self.dataset) {
            Ok(fit) => Some(fit.p_value),
            Err(e @ (DataError::InsufficientData { .. } | DataError::DegenerateRegression { .. })) => {
                debug!(x = explanatory, y = outcome, reason = %e, "pair excluded");
                self.excluded += 1;
                None
            }
            Err(e) => return Err(e),
        };
        self.cache.insert(key, p);
        Ok(p)
    }

    /// Pairs skipped for lack of usable observations.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Distinct regressions actually run.
    pub fn tested(&self) -> usize {
        self.cache.len()
    }

    fn lookup(&self, name: &str) -> Result<&ResolvedVariable, DataError> {
        self.resolved.get(name).ok_or_else(|| DataError::MissingColumn {
            column: name.to_string(),
        })
    }
}

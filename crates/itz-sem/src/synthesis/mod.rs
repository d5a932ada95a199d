//! Data-driven construction of the structural model description.
//!
//! The latent densification factor is defined from its indicators, then
//! regressions and covariances are added between outcomes, controls, and
//! upzoning measures wherever a pairwise regression is significant. Every
//! candidate collection is iterated in sorted order, so the same inputs
//! always produce the same description.

pub mod builder;
pub mod gate;
pub mod refine;

use std::collections::BTreeSet;

use itz_core::config::{ItzConfig, SynthesisConfig, TransformConfig};
use itz_core::errors::SynthesisError;
use itz_core::models::{Dataset, ModelSpecification, Operator};
use itz_core::transform::TransformRegistry;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use builder::RelationSetBuilder;
pub use gate::{PairTester, SignificanceGate};
pub use refine::{refine_specification, RefineAnchors};

/// Variable roles for one synthesis run. Names may carry a transform
/// prefix (`log_median_rent`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SynthesisInputs {
    /// Upzoning measures. Must include both the early and later variables.
    pub independent_vars: Vec<String>,
    /// Outcomes (home values, demographics, commutes, greenspace...).
    pub dependent_vars: Vec<String>,
    /// Observed indicators of the latent densification factor, in the
    /// order they appear in the measurement relation.
    pub densification_indicators: Vec<String>,
    pub early_upzoning_var: String,
    pub later_upzoning_var: String,
    /// Candidate controls (baseline income, population, ...).
    pub control_vars: Vec<String>,
}

/// Builds model specifications from a dataset under a fixed configuration.
pub struct DescriptionSynthesizer {
    config: SynthesisConfig,
    registry: TransformRegistry,
}

impl DescriptionSynthesizer {
    pub fn new(config: SynthesisConfig, transforms: &TransformConfig) -> Self {
        Self {
            config,
            registry: TransformRegistry::new(transforms),
        }
    }

    pub fn from_config(config: &ItzConfig) -> Self {
        Self::new(config.synthesis.clone(), &config.transforms)
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesize the specification. The returned value carries both the
    /// description text and the set of every referenced variable.
    pub fn synthesize(
        &self,
        inputs: &SynthesisInputs,
        dataset: &Dataset,
    ) -> Result<ModelSpecification, SynthesisError> {
        self.validate(inputs)?;

        let latent = self.config.latent_name.as_str();
        let indicators: Vec<&str> = unique_in_order(&inputs.densification_indicators);
        let indicator_set: BTreeSet<&str> = indicators.iter().copied().collect();
        let dependents = sorted(&inputs.dependent_vars);
        let controls = sorted(&inputs.control_vars);
        let independents = sorted(&inputs.independent_vars);
        let early = inputs.early_upzoning_var.as_str();
        let later = inputs.later_upzoning_var.as_str();

        let _span = itz_core::synthesis_span!(dependents.len(), controls.len()).entered();

        let mut tester = PairTester::new(dataset);
        for name in indicators
            .iter()
            .chain(&dependents)
            .chain(&controls)
            .chain(&independents)
        {
            tester.register(&self.registry, name)?;
        }

        let regression = SignificanceGate::new(self.config.regression_threshold);
        let covariance = SignificanceGate::new(self.config.covariance_threshold);
        let mut b = RelationSetBuilder::new();

        // 1. Latent definition.
        b.add_relation(latent, &indicators, Operator::Measurement);

        // 2. Outcomes on the latent factor.
        for dep in dependents.iter().filter(|d| !indicator_set.contains(*d)) {
            b.add_relation(dep, &[latent], Operator::Regression);
        }

        // 3. Significant controls per outcome.
        for &dep in &dependents {
            for &control in &controls {
                if control != dep && regression.passes(tester.p_value(control, dep)?) {
                    b.add_relation(dep, &[control], Operator::Regression);
                }
            }
        }

        // 4. Indicators on later upzoning, then on remaining controls.
        let mut ordered_indicators = indicators.clone();
        ordered_indicators.sort_unstable();
        for &indicator in &ordered_indicators {
            b.add_relation(indicator, &[later], Operator::Regression);
            for &control in &controls {
                if control == later || control == indicator || b.is_related(indicator, control) {
                    continue;
                }
                if regression.passes(tester.p_value(control, indicator)?) {
                    b.add_relation(indicator, &[control], Operator::Regression);
                }
            }
        }

        // 5. Outcomes on each other, each direction tested separately.
        for (i, &a) in dependents.iter().enumerate() {
            for &c in &dependents[i + 1..] {
                if regression.passes(tester.p_value(a, c)?) {
                    b.add_relation(c, &[a], Operator::Regression);
                }
                if regression.passes(tester.p_value(c, a)?) {
                    b.add_relation(a, &[c], Operator::Regression);
                }
            }
        }

        // 6. Outcomes on upzoning.
        for &dep in &dependents {
            if !self.config.gate_early_upzoning || regression.passes(tester.p_value(early, dep)?) {
                b.add_relation(dep, &[early], Operator::Regression);
            }
            for &indep in independents.iter().filter(|i| **i != early) {
                if regression.passes(tester.p_value(indep, dep)?) {
                    b.add_relation(dep, &[indep], Operator::Regression);
                }
            }
        }

        // 7. Later upzoning on controls.
        for &control in controls.iter().filter(|c| **c != later) {
            if regression.passes(tester.p_value(control, later)?) {
                b.add_relation(later, &[control], Operator::Regression);
            }
        }

        // 8. Residual covariances between otherwise unrelated pairs.
        let mut covariance_groups = vec![&controls];
        if self.config.dependent_covariances {
            covariance_groups.push(&dependents);
        }
        for group in covariance_groups {
            for (i, &a) in group.iter().enumerate() {
                for &c in &group[i + 1..] {
                    if b.is_related(a, c) {
                        continue;
                    }
                    if covariance.passes(tester.p_value(a, c)?) {
                        b.add_relation(a, &[c], Operator::Covariance);
                    }
                }
            }
        }

        debug!(
            tested = tester.tested(),
            excluded = tester.excluded(),
            "pairwise significance tests complete"
        );

        let spec = b.build();
        info!(
            relations = spec.len(),
            regressions = spec.count(Operator::Regression),
            covariances = spec.count(Operator::Covariance),
            variables = spec.variables().len(),
            regression_threshold = regression.threshold(),
            covariance_threshold = covariance.threshold(),
            "model description synthesized"
        );
        Ok(spec)
    }

    fn validate(&self, inputs: &SynthesisInputs) -> Result<(), SynthesisError> {
        for (role, vars) in [
            ("dependent", &inputs.dependent_vars),
            ("densification indicator", &inputs.densification_indicators),
            ("independent", &inputs.independent_vars),
        ] {
            if vars.is_empty() {
                return Err(SynthesisError::EmptyVariableSet {
                    role: role.to_string(),
                });
            }
        }

        let early = inputs.early_upzoning_var.as_str();
        let later = inputs.later_upzoning_var.as_str();
        if early.is_empty() || later.is_empty() {
            return Err(SynthesisError::InvalidInput {
                reason: "early and later upzoning variables must be named".to_string(),
            });
        }
        if early == later {
            return Err(SynthesisError::InvalidInput {
                reason: format!("early and later upzoning are the same variable: {early}"),
            });
        }
        for upzoning in [early, later] {
            if !inputs.independent_vars.iter().any(|v| v == upzoning) {
                return Err(SynthesisError::InvalidInput {
                    reason: format!("{upzoning} is not among the independent variables"),
                });
            }
        }

        let latent = self.config.latent_name.as_str();
        let all = inputs
            .dependent_vars
            .iter()
            .chain(&inputs.densification_indicators)
            .chain(&inputs.independent_vars)
            .chain(&inputs.control_vars);
        for name in all {
            if name == latent {
                return Err(SynthesisError::InvalidInput {
                    reason: format!("{latent} is the latent factor and cannot be observed"),
                });
            }
        }
        Ok(())
    }
}

/// Synthesize with a full toolkit configuration.
pub fn synthesize(
    inputs: &SynthesisInputs,
    dataset: &Dataset,
    config: &ItzConfig,
) -> Result<ModelSpecification, SynthesisError> {
    DescriptionSynthesizer::from_config(config).synthesize(inputs, dataset)
}

fn sorted(names: &[String]) -> Vec<&str> {
    names
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn unique_in_order(names: &[String]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    names
        .iter()
        .map(String::as_str)
        .filter(|n| seen.insert(*n))
        .collect()
}

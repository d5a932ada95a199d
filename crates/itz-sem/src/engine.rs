//! End-to-end driver: synthesize a description, fit it, analyze effects,
//! and refine it, all under one validated configuration.

use itz_core::config::ItzConfig;
use itz_core::errors::{ConfigError, ItzResult};
use itz_core::models::{Dataset, ModelSpecification};
use tracing::info;

use crate::effects::{EffectAnalyzer, EffectDecomposition, PairEffect, TotalEffect};
use crate::fit::{FitAdapter, FittedModel, SemEstimator};
use crate::synthesis::{refine_specification, DescriptionSynthesizer, RefineAnchors, SynthesisInputs};

pub struct SemEngine<'e> {
    config: ItzConfig,
    synthesizer: DescriptionSynthesizer,
    adapter: FitAdapter<'e>,
}

impl<'e> SemEngine<'e> {
    /// Validates `config` before anything runs.
    pub fn new(config: ItzConfig, estimator: &'e dyn SemEstimator) -> Result<Self, ConfigError> {
        config.validate()?;
        let synthesizer = DescriptionSynthesizer::from_config(&config);
        let adapter = FitAdapter::from_config(estimator, &config);
        Ok(Self {
            config,
            synthesizer,
            adapter,
        })
    }

    pub fn config(&self) -> &ItzConfig {
        &self.config
    }

    pub fn synthesize(&self, inputs: &SynthesisInputs, dataset: &Dataset) -> ItzResult<ModelSpecification> {
        Ok(self.synthesizer.synthesize(inputs, dataset)?)
    }

    pub fn fit(&self, spec: &ModelSpecification, dataset: &Dataset) -> ItzResult<FittedModel> {
        Ok(self.adapter.fit(spec, dataset)?)
    }

    /// Synthesize and fit in one step.
    pub fn run(&self, inputs: &SynthesisInputs, dataset: &Dataset) -> ItzResult<FittedModel> {
        let spec = self.synthesize(inputs, dataset)?;
        info!(relations = spec.len(), "fitting synthesized model");
        self.fit(&spec, dataset)
    }

    pub fn analyzer(&self, model: &FittedModel) -> EffectAnalyzer {
        EffectAnalyzer::from_model(model, &self.config.paths)
    }

    pub fn total_effect(&self, model: &FittedModel, source: &str, target: &str) -> ItzResult<TotalEffect> {
        Ok(self.analyzer(model).total_effect(source, target)?)
    }

    pub fn decompose(&self, model: &FittedModel, source: &str, target: &str) -> ItzResult<EffectDecomposition> {
        Ok(self.analyzer(model).decompose(source, target)?)
    }

    pub fn all_total_effects(&self, model: &FittedModel) -> Vec<PairEffect> {
        self.analyzer(model).all_total_effects()
    }

    /// Refined specification anchored on the later-upzoning variable and
    /// the densification indicators of `inputs`.
    pub fn refine(&self, model: &FittedModel, inputs: &SynthesisInputs) -> ModelSpecification {
        let anchors = RefineAnchors::new(
            [inputs.later_upzoning_var.as_str()],
            inputs.densification_indicators.iter().map(String::as_str),
        );
        refine_specification(model.inspection(), &anchors, &self.config.refine)
    }

    /// Refine a fitted model and fit the result.
    pub fn refit(
        &self,
        model: &FittedModel,
        inputs: &SynthesisInputs,
        dataset: &Dataset,
    ) -> ItzResult<FittedModel> {
        let refined = self.refine(model, inputs);
        info!(
            before = model.specification().len(),
            after = refined.len(),
            "refitting refined model"
        );
        self.fit(&refined, dataset)
    }
}

//! # itz-sem
//!
//! Structural equation modelling of upzoning effects: pairwise regression,
//! data-driven model description synthesis, the fit adapter around an
//! external SEM estimator, and total-effect path analysis.

pub mod effects;
pub mod engine;
pub mod fit;
pub mod regression;
pub mod synthesis;

pub use effects::{
    total_effect, EffectAnalyzer, EffectDecomposition, PairEffect, PathEffect, PathTable,
    SearchBudget, SearchCancellation, TotalEffect,
};
pub use engine::SemEngine;
pub use fit::{Estimation, EstimatorFailure, FitAdapter, FittedModel, NumericTable, SemEstimator};
pub use regression::{regress, RegressionFit};
pub use synthesis::{
    refine_specification, synthesize, DescriptionSynthesizer, RefineAnchors, RelationSetBuilder,
    SynthesisInputs,
};

//! Total-effect path analysis over a fitted model's regression graph.
//!
//! The effect of one path is the product of its edge estimates. The total
//! effect of `source` on `target` is the sum over every simple path, so the
//! direct edge counts once as its own path alongside the indirect ones.
//! An absent path is a zero effect, not an error.

pub mod cancellation;
pub mod graph;
pub mod paths;

use std::fmt::Write as _;

use itz_core::config::{ItzConfig, PathConfig};
use itz_core::errors::PathError;
use itz_core::models::InspectionTable;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::fit::FittedModel;

pub use cancellation::SearchCancellation;
pub use graph::{EdgeEstimate, RegressionGraph};
pub use paths::{simple_paths, PathSearch, SearchBudget};

/// One edge along a path, with the statistics reported for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hop {
    pub from: String,
    pub to: String,
    pub estimate: f64,
    pub std_err: Option<f64>,
    pub p_value: Option<f64>,
}

/// One row of the path table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEffect {
    pub nodes: Vec<String>,
    pub hops: Vec<Hop>,
    /// Textual hop sequence,
    /// `x ---- Est: 2.000 Err: 0.100 P-val: 0.010 ---> y`.
    pub path: String,
    pub estimate: f64,
    pub abs_estimate: f64,
}

impl PathEffect {
    fn new(hops: Vec<Hop>, nodes: Vec<String>) -> Self {
        let estimate: f64 = hops.iter().map(|h| h.estimate).product();
        let path = render_path(&nodes, &hops);
        Self {
            nodes,
            hops,
            path,
            estimate,
            abs_estimate: estimate.abs(),
        }
    }

    /// A single-hop path is the direct effect.
    pub fn is_direct(&self) -> bool {
        self.hops.len() == 1
    }
}

/// Path effects sorted by descending absolute estimate. Ties break on the
/// path text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathTable {
    rows: Vec<PathEffect>,
}

impl PathTable {
    fn from_unsorted(mut rows: Vec<PathEffect>) -> Self {
        rows.sort_by(|a, b| {
            b.abs_estimate
                .total_cmp(&a.abs_estimate)
                .then_with(|| a.path.cmp(&b.path))
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[PathEffect] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathEffect> {
        self.rows.iter()
    }

    /// Sum of every path effect.
    pub fn sum(&self) -> f64 {
        self.rows.iter().map(|r| r.estimate).sum()
    }
}

/// Result of `total_effect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalEffect {
    pub source: String,
    pub target: String,
    pub total: f64,
    pub paths: PathTable,
    pub truncated: bool,
}

/// Direct and indirect parts of a total effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDecomposition {
    pub source: String,
    pub target: String,
    /// Estimate of the `target ~ source` edge, 0 when there is none.
    pub direct: f64,
    /// Sum over paths of two or more hops.
    pub indirect: f64,
    pub total: f64,
    pub paths: PathTable,
    pub truncated: bool,
}

/// One row of the all-pairs sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairEffect {
    pub x: String,
    pub y: String,
    pub total: f64,
    pub abs_total: f64,
    pub paths: PathTable,
    pub truncated: bool,
}

/// Path analyzer bound to one regression graph.
#[derive(Debug, Clone)]
pub struct EffectAnalyzer {
    graph: RegressionGraph,
    budget: SearchBudget,
    cancellation: Option<SearchCancellation>,
}

impl EffectAnalyzer {
    pub fn new(inspection: &InspectionTable, config: &PathConfig) -> Self {
        let graph = RegressionGraph::from_inspection(inspection, config.edge_p_value_cutoff);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "regression graph built"
        );
        Self {
            graph,
            budget: SearchBudget::from_config(config),
            cancellation: None,
        }
    }

    pub fn from_model(model: &FittedModel, config: &PathConfig) -> Self {
        Self::new(model.inspection(), config)
    }

    /// Stop searches when `token` is cancelled.
    pub fn with_cancellation(mut self, token: SearchCancellation) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn graph(&self) -> &RegressionGraph {
        &self.graph
    }

    /// Sum of path effects over every simple path from `source` to `target`.
    pub fn total_effect(&self, source: &str, target: &str) -> Result<TotalEffect, PathError> {
        let _span = itz_core::effects_span!(source, target).entered();
        let from = self.require(source)?;
        let to = self.require(target)?;

        let (paths, truncated) = self.path_table(from, to);
        let total = paths.sum();
        info!(paths = paths.len(), total, truncated, "total effect computed");
        Ok(TotalEffect {
            source: source.to_string(),
            target: target.to_string(),
            total,
            paths,
            truncated,
        })
    }

    /// Split the total effect into its direct edge and indirect paths.
    pub fn decompose(&self, source: &str, target: &str) -> Result<EffectDecomposition, PathError> {
        let effect = self.total_effect(source, target)?;
        let direct = effect
            .paths
            .iter()
            .find(|p| p.is_direct())
            .map_or(0.0, |p| p.estimate);
        let indirect: f64 = effect
            .paths
            .iter()
            .filter(|p| !p.is_direct())
            .map(|p| p.estimate)
            .sum();
        Ok(EffectDecomposition {
            source: effect.source,
            target: effect.target,
            direct,
            indirect,
            total: direct + indirect,
            paths: effect.paths,
            truncated: effect.truncated,
        })
    }

    /// Total effect of every ordered pair of distinct variables, in sorted
    /// order. Pairs with a zero total are left out.
    pub fn all_total_effects(&self) -> Vec<PairEffect> {
        let nodes: Vec<NodeIndex> = self.graph.variables().filter_map(|v| self.graph.node(v)).collect();
        let mut effects = Vec::new();
        for &x in &nodes {
            for &y in &nodes {
                if x == y {
                    continue;
                }
                if self.is_cancelled() {
                    warn!(pairs = effects.len(), "all-pairs sweep cancelled");
                    return effects;
                }
                let (paths, truncated) = self.path_table(x, y);
                let total = paths.sum();
                if total == 0.0 {
                    continue;
                }
                effects.push(PairEffect {
                    x: self.graph.name(x).to_string(),
                    y: self.graph.name(y).to_string(),
                    total,
                    abs_total: total.abs(),
                    paths,
                    truncated,
                });
            }
        }
        info!(pairs = effects.len(), "all-pairs sweep complete");
        effects
    }

    fn require(&self, name: &str) -> Result<NodeIndex, PathError> {
        self.graph.node(name).ok_or_else(|| PathError::UnknownVariable {
            name: name.to_string(),
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(SearchCancellation::is_cancelled)
    }

    fn path_table(&self, from: NodeIndex, to: NodeIndex) -> (PathTable, bool) {
        let search = simple_paths(&self.graph, from, to, &self.budget, self.cancellation.as_ref());
        if search.truncated {
            warn!(
                source = self.graph.name(from),
                target = self.graph.name(to),
                found = search.paths.len(),
                "path search stopped early"
            );
        }
        let rows = search
            .paths
            .iter()
            .map(|nodes| self.path_effect(nodes))
            .collect();
        (PathTable::from_unsorted(rows), search.truncated)
    }

    fn path_effect(&self, nodes: &[NodeIndex]) -> PathEffect {
        let hops = nodes
            .windows(2)
            .map(|pair| {
                let (from, to) = (pair[0], pair[1]);
                // Paths only follow existing edges.
                let edge = self.graph.edge(from, to).copied().unwrap_or(EdgeEstimate {
                    estimate: 0.0,
                    std_err: None,
                    p_value: None,
                });
                Hop {
                    from: self.graph.name(from).to_string(),
                    to: self.graph.name(to).to_string(),
                    estimate: edge.estimate,
                    std_err: edge.std_err,
                    p_value: edge.p_value,
                }
            })
            .collect();
        let names = nodes.iter().map(|&n| self.graph.name(n).to_string()).collect();
        PathEffect::new(hops, names)
    }
}

/// Total effect of `source` on `target` with an unbounded search.
pub fn total_effect(model: &FittedModel, source: &str, target: &str) -> Result<TotalEffect, PathError> {
    EffectAnalyzer::from_model(model, &PathConfig::default()).total_effect(source, target)
}

/// Direct/indirect split using the configured search limits.
pub fn decompose(
    model: &FittedModel,
    source: &str,
    target: &str,
    config: &ItzConfig,
) -> Result<EffectDecomposition, PathError> {
    EffectAnalyzer::from_model(model, &config.paths).decompose(source, target)
}

/// All-pairs sweep using the configured search limits.
pub fn all_total_effects(model: &FittedModel, config: &ItzConfig) -> Vec<PairEffect> {
    EffectAnalyzer::from_model(model, &config.paths).all_total_effects()
}

fn render_path(nodes: &[String], hops: &[Hop]) -> String {
    let mut out = nodes.first().cloned().unwrap_or_default();
    for hop in hops {
        let _ = write!(
            out,
            " ---- Est: {:.3} Err: {} P-val: {} ---> {}",
            hop.estimate,
            stat(hop.std_err),
            stat(hop.p_value),
            hop.to
        );
    }
    out
}

fn stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

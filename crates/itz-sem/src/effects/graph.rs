//! Directed regression graph built from an inspection table.
//!
//! Nodes are every variable named in the table. A row `y ~ x` is an edge
//! `x -> y` weighted by its estimate. Other operators contribute nodes
//! only.

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use itz_core::models::InspectionTable;

/// Edge weight: the fitted coefficient and its reporting statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEstimate {
    pub estimate: f64,
    pub std_err: Option<f64>,
    pub p_value: Option<f64>,
}

/// Regression graph with a name index and successor lists kept in
/// name order for deterministic traversal.
#[derive(Debug, Clone)]
pub struct RegressionGraph {
    graph: DiGraph<String, EdgeEstimate>,
    index: FxHashMap<String, NodeIndex>,
    successors: Vec<Vec<NodeIndex>>,
}

impl RegressionGraph {
    /// Build the graph. With a `p_value_cutoff`, edges whose p-value is
    /// above it are left out; edges with no p-value are always kept.
    pub fn from_inspection(table: &InspectionTable, p_value_cutoff: Option<f64>) -> Self {
        let mut graph = DiGraph::new();
        let mut index = FxHashMap::default();
        for name in table.variables() {
            let idx = graph.add_node(name.to_string());
            index.insert(name.to_string(), idx);
        }

        for row in table.regressions() {
            if row.is_self_relation() {
                continue;
            }
            if let (Some(cutoff), Some(p)) = (p_value_cutoff, row.p_value) {
                if p > cutoff {
                    continue;
                }
            }
            let (Some(&from), Some(&to)) = (index.get(&row.rval), index.get(&row.lval)) else {
                continue;
            };
            // First estimate for a pair wins.
            if graph.find_edge(from, to).is_some() {
                continue;
            }
            graph.add_edge(
                from,
                to,
                EdgeEstimate {
                    estimate: row.estimate,
                    std_err: row.std_err,
                    p_value: row.p_value,
                },
            );
        }

        let successors = graph
            .node_indices()
            .map(|n| {
                let mut next: Vec<NodeIndex> = graph.neighbors(n).collect();
                next.sort_by(|a, b| graph[*a].cmp(&graph[*b]));
                next
            })
            .collect();

        Self {
            graph,
            index,
            successors,
        }
    }

    pub fn node(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Direct successors of `node`, sorted by name.
    pub fn successors(&self, node: NodeIndex) -> &[NodeIndex] {
        self.successors
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&EdgeEstimate> {
        self.graph
            .find_edge(from, to)
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Variable names in sorted order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(move |n| self.graph[n].as_str())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

//! Simple-path enumeration over the regression graph.
//!
//! Depth-first with an explicit stack of successor iterators and a
//! visited set, so a path never revisits a node and cycles terminate.

use std::time::{Duration, Instant};

use itz_core::config::PathConfig;
use petgraph::graph::NodeIndex;
use rustc_hash::FxHashSet;

use super::cancellation::SearchCancellation;
use super::graph::RegressionGraph;

/// How often (in DFS steps) the clock and cancellation flag are polled.
const INTERRUPT_POLL_INTERVAL: u64 = 256;

/// Limits on one enumeration. All unbounded by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBudget {
    /// Maximum hops in a recorded path.
    pub max_depth: Option<usize>,
    pub max_paths: Option<usize>,
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PathConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_paths: config.max_paths,
            time_limit: config.time_limit(),
        }
    }
}

/// Paths found, each a node sequence from source to target.
#[derive(Debug, Clone, Default)]
pub struct PathSearch {
    pub paths: Vec<Vec<NodeIndex>>,
    /// The budget or a cancellation stopped the search early.
    pub truncated: bool,
}

/// Enumerate every simple path from `source` to `target`. A node is never
/// a path to itself.
pub fn simple_paths(
    graph: &RegressionGraph,
    source: NodeIndex,
    target: NodeIndex,
    budget: &SearchBudget,
    cancellation: Option<&SearchCancellation>,
) -> PathSearch {
    let mut result = PathSearch::default();
    if source == target {
        return result;
    }

    let started = Instant::now();
    let mut steps: u64 = 0;

    let mut path = vec![source];
    let mut visited = FxHashSet::default();
    visited.insert(source);
    let mut stack = vec![graph.successors(source).iter()];

    while let Some(frontier) = stack.last_mut() {
        steps += 1;
        if steps % INTERRUPT_POLL_INTERVAL == 0 && interrupted(budget, started, cancellation) {
            result.truncated = true;
            break;
        }

        let Some(&next) = frontier.next() else {
            stack.pop();
            if let Some(done) = path.pop() {
                visited.remove(&done);
            }
            continue;
        };

        if visited.contains(&next) {
            continue;
        }
        if next == target {
            if budget.max_depth.is_some_and(|max| path.len() > max) {
                continue;
            }
            let mut found = path.clone();
            found.push(next);
            result.paths.push(found);
            if budget.max_paths.is_some_and(|max| result.paths.len() >= max) {
                result.truncated = true;
                break;
            }
            continue;
        }
        // Going through `next` costs at least two more hops.
        if budget.max_depth.is_some_and(|max| path.len() >= max) {
            continue;
        }
        visited.insert(next);
        path.push(next);
        stack.push(graph.successors(next).iter());
    }

    result
}

fn interrupted(budget: &SearchBudget, started: Instant, cancellation: Option<&SearchCancellation>) -> bool {
    cancellation.is_some_and(SearchCancellation::is_cancelled)
        || budget.time_limit.is_some_and(|limit| started.elapsed() >= limit)
}

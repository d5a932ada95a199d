//! Property tests for path enumeration and total effects.

use proptest::prelude::*;

use itz_core::config::PathConfig;
use itz_core::models::{InspectionRow, InspectionTable, Operator};
use itz_sem::effects::EffectAnalyzer;

fn node(i: usize) -> String {
    format!("v{i}")
}

/// Rows for edges `from -> to`. With `acyclic`, only forward edges are kept.
fn table(n: usize, edges: &[(usize, usize, f64)], acyclic: bool) -> InspectionTable {
    let mut rows: Vec<InspectionRow> = (0..n)
        .map(|i| InspectionRow::new(node(i), Operator::Covariance, node(i), 1.0, None, None))
        .collect();
    for &(from, to, w) in edges {
        if from == to || (acyclic && from > to) {
            continue;
        }
        rows.push(InspectionRow::regression(&node(to), &node(from), w, 0.1, 0.01));
    }
    InspectionTable::new(rows)
}

/// Sum over paths by dynamic programming on a DAG. The first row for an
/// edge wins, matching the graph builder.
fn dag_total(n: usize, edges: &[(usize, usize, f64)], source: usize, target: usize) -> f64 {
    let mut weight = vec![vec![None; n]; n];
    for &(from, to, w) in edges {
        if from < to && weight[from][to].is_none() {
            weight[from][to] = Some(w);
        }
    }
    let mut effect = vec![0.0; n];
    effect[target] = 1.0;
    for u in (0..target).rev() {
        effect[u] = (u + 1..n)
            .filter_map(|v| weight[u][v].map(|w| w * effect[v]))
            .sum();
    }
    if source == target {
        0.0
    } else {
        effect[source]
    }
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, f64)>> {
    prop::collection::vec((0..n, 0..n, -2.0_f64..2.0), 0..n * 3)
}

proptest! {
    #[test]
    fn dag_total_matches_dynamic_programming(
        edges in edge_strategy(8),
        source in 0usize..8,
        target in 0usize..8,
    ) {
        let analyzer = EffectAnalyzer::new(&table(8, &edges, true), &PathConfig::default());
        let effect = analyzer.total_effect(&node(source), &node(target)).unwrap();
        let expected = if source < target { dag_total(8, &edges, source, target) } else { 0.0 };
        prop_assert!(
            (effect.total - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "got {}, expected {}", effect.total, expected
        );
    }

    #[test]
    fn paths_are_simple_and_bounded(
        edges in edge_strategy(7),
        source in 0usize..7,
        target in 0usize..7,
        depth in 1usize..5,
    ) {
        let config = PathConfig { max_depth: Some(depth), ..PathConfig::default() };
        let analyzer = EffectAnalyzer::new(&table(7, &edges, false), &config);
        let effect = analyzer.total_effect(&node(source), &node(target)).unwrap();
        for path in effect.paths.iter() {
            prop_assert!(path.hops.len() <= depth);
            prop_assert_eq!(path.nodes.first(), Some(&node(source)));
            prop_assert_eq!(path.nodes.last(), Some(&node(target)));
            let mut unique = path.nodes.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), path.nodes.len());
        }
    }

    #[test]
    fn table_is_sorted_and_sums_to_total(
        edges in edge_strategy(7),
        source in 0usize..7,
        target in 0usize..7,
    ) {
        let analyzer = EffectAnalyzer::new(&table(7, &edges, false), &PathConfig::default());
        let effect = analyzer.total_effect(&node(source), &node(target)).unwrap();
        let rows = effect.paths.rows();
        for pair in rows.windows(2) {
            prop_assert!(pair[0].abs_estimate >= pair[1].abs_estimate);
        }
        let sum: f64 = rows.iter().map(|r| r.estimate).sum();
        prop_assert_eq!(sum, effect.total);

        let scale: f64 = rows.iter().map(|r| r.abs_estimate).sum::<f64>().max(1.0);
        let split = analyzer.decompose(&node(source), &node(target)).unwrap();
        prop_assert!((split.direct + split.indirect - effect.total).abs() < 1e-12 * scale);
    }
}

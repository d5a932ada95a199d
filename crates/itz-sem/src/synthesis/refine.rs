//! Rebuild a tighter specification from a fitted model's estimates.

use itz_core::config::RefineConfig;
use itz_core::models::{InspectionTable, ModelSpecification, Operator, Relation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rows that survive refinement regardless of their p-value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefineAnchors {
    /// Keep every row whose left-hand side is one of these (later upzoning).
    pub lvals: Vec<String>,
    /// Keep every row whose right-hand side is one of these (densification indicators).
    pub rvals: Vec<String>,
}

impl RefineAnchors {
    pub fn new<L, R>(lvals: L, rvals: R) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            lvals: lvals.into_iter().map(Into::into).collect(),
            rvals: rvals.into_iter().map(Into::into).collect(),
        }
    }
}

/// Keep anchored rows and rows with `p-value < threshold`; drop variance
/// rows (`x ~~ x`). Measurement rows sharing a latent are merged back
/// into one relation at the position of the first.
pub fn refine_specification(
    inspection: &InspectionTable,
    anchors: &RefineAnchors,
    config: &RefineConfig,
) -> ModelSpecification {
    let mut relations: Vec<Relation> = Vec::new();
    let mut dropped = 0usize;

    for row in inspection.rows() {
        if row.is_self_relation() {
            continue;
        }
        let anchored = anchors.lvals.iter().any(|v| *v == row.lval)
            || anchors.rvals.iter().any(|v| *v == row.rval);
        let significant = row.p_value.is_some_and(|p| p < config.threshold);
        if !(anchored || significant) {
            dropped += 1;
            continue;
        }

        if row.op == Operator::Measurement {
            if let Some(existing) = relations
                .iter_mut()
                .find(|r| r.op == Operator::Measurement && r.lhs == row.lval)
            {
                if !existing.rhs.contains(&row.rval) {
                    existing.rhs.push(row.rval.clone());
                }
                continue;
            }
        }
        relations.push(Relation {
            lhs: row.lval.clone(),
            op: row.op,
            rhs: vec![row.rval.clone()],
        });
    }

    let spec = ModelSpecification::from_relations(relations);
    debug!(
        kept = spec.len(),
        dropped,
        threshold = config.threshold,
        "specification refined"
    );
    spec
}

#[cfg(test)]
mod tests {
    use itz_core::models::InspectionRow;

    use super::*;

    fn table() -> InspectionTable {
        InspectionTable::new(vec![
            InspectionRow::new("densification", Operator::Measurement, "pop", 1.0, None, None),
            InspectionRow::new("densification", Operator::Measurement, "units", 0.8, Some(0.1), Some(0.5)),
            InspectionRow::regression("rent", "densification", 0.3, 0.1, 0.01),
            InspectionRow::regression("rent", "income", 0.1, 0.1, 0.6),
            InspectionRow::regression("later_upzoning", "income", 0.1, 0.1, 0.9),
            InspectionRow::new("rent", Operator::Covariance, "rent", 2.0, Some(0.2), Some(0.0)),
        ])
    }

    #[test]
    fn keeps_anchored_and_significant_rows() {
        let anchors = RefineAnchors::new(["later_upzoning"], ["pop", "units"]);
        let spec = refine_specification(&table(), &anchors, &RefineConfig { threshold: 0.2 });
        assert_eq!(
            spec.description(),
            "densification =~ pop + units\nrent ~ densification\nlater_upzoning ~ income"
        );
    }

    #[test]
    fn without_anchors_only_significance_counts() {
        let spec = refine_specification(&table(), &RefineAnchors::default(), &RefineConfig { threshold: 0.2 });
        assert_eq!(spec.description(), "rent ~ densification");
    }
}

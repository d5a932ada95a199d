//! Inspection table: the fitted estimates per relation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::relation::Operator;

/// One fitted relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRow {
    pub lval: String,
    pub op: Operator,
    pub rval: String,
    #[serde(rename = "Estimate")]
    pub estimate: f64,
    /// Absent for parameters the estimator fixed.
    #[serde(rename = "Std. Err", alias = "Std.Err", default)]
    pub std_err: Option<f64>,
    #[serde(rename = "p-value", default)]
    pub p_value: Option<f64>,
}

impl InspectionRow {
    pub fn new(
        lval: impl Into<String>,
        op: Operator,
        rval: impl Into<String>,
        estimate: f64,
        std_err: Option<f64>,
        p_value: Option<f64>,
    ) -> Self {
        Self {
            lval: lval.into(),
            op,
            rval: rval.into(),
            estimate,
            std_err,
            p_value,
        }
    }

    /// Shorthand for a regression row `lval ~ rval`.
    pub fn regression(lval: &str, rval: &str, estimate: f64, std_err: f64, p_value: f64) -> Self {
        Self::new(lval, Operator::Regression, rval, estimate, Some(std_err), Some(p_value))
    }

    /// Variance rows have the same variable on both sides.
    pub fn is_self_relation(&self) -> bool {
        self.lval == self.rval
    }
}

/// Rows of a fitted model, in estimator order. Never mutated after fitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectionTable {
    rows: Vec<InspectionRow>,
}

impl InspectionTable {
    pub fn new(rows: Vec<InspectionRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[InspectionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn regressions(&self) -> impl Iterator<Item = &InspectionRow> {
        self.rows.iter().filter(|r| r.op == Operator::Regression)
    }

    /// First row matching `lval op rval`.
    pub fn find(&self, lval: &str, op: Operator, rval: &str) -> Option<&InspectionRow> {
        self.rows
            .iter()
            .find(|r| r.op == op && r.lval == lval && r.rval == rval)
    }

    /// Every variable on either side of any row.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.rows
            .iter()
            .flat_map(|r| [r.lval.as_str(), r.rval.as_str()])
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<InspectionRow> for InspectionTable {
    fn from_iter<I: IntoIterator<Item = InspectionRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

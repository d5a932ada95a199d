//! Model specification: ordered relations plus the variables they reference.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SpecificationError;

use super::relation::{Operator, Relation};

/// An ordered, deduplicated sequence of relations and the set of every
/// variable name they reference (latent factors and transform-prefixed
/// names included).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpecification {
    relations: Vec<Relation>,
    variables: BTreeSet<String>,
    latents: BTreeSet<String>,
}

impl ModelSpecification {
    /// Build from relations, dropping later duplicates. Covariances are
    /// compared without regard to side.
    pub fn from_relations(relations: impl IntoIterator<Item = Relation>) -> Self {
        let mut seen = HashSet::new();
        let mut spec = Self::default();
        for relation in relations {
            if !seen.insert(dedup_key(&relation)) {
                continue;
            }
            if relation.op == Operator::Measurement {
                spec.latents.insert(relation.lhs.clone());
            }
            spec.variables
                .extend(relation.variables().map(str::to_string));
            spec.relations.push(relation);
        }
        spec
    }

    /// Parse the operator grammar: one relation per line, `+`-separated
    /// right-hand side, blank lines and `#` comments ignored. A `~` or `~~`
    /// line with several right-hand variables becomes one relation each.
    pub fn parse(text: &str) -> Result<Self, SpecificationError> {
        let mut relations = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let (lhs, op, rhs) = split_operator(line).ok_or_else(|| {
                SpecificationError::MissingOperator {
                    line: line_no,
                    text: line.to_string(),
                }
            })?;
            let lhs = lhs.trim();
            if lhs.is_empty() {
                return Err(SpecificationError::EmptySide {
                    line: line_no,
                    side: "left",
                    text: line.to_string(),
                });
            }
            let rhs: Vec<&str> = rhs.split('+').map(str::trim).filter(|s| !s.is_empty()).collect();
            if rhs.is_empty() {
                return Err(SpecificationError::EmptySide {
                    line: line_no,
                    side: "right",
                    text: line.to_string(),
                });
            }
            match op {
                Operator::Measurement => relations.push(Relation::measurement(lhs, rhs)),
                _ => relations.extend(rhs.into_iter().map(|r| Relation {
                    lhs: lhs.to_string(),
                    op,
                    rhs: vec![r.to_string()],
                })),
            }
        }
        Ok(Self::from_relations(relations))
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Every referenced variable, latent factors included.
    pub fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// Latent factors (left-hand sides of `=~`).
    pub fn latents(&self) -> &BTreeSet<String> {
        &self.latents
    }

    /// Variables that must come from the dataset.
    pub fn observed_variables(&self) -> impl Iterator<Item = &str> {
        self.variables
            .iter()
            .filter(|v| !self.latents.contains(*v))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn count(&self, op: Operator) -> usize {
        self.relations.iter().filter(|r| r.op == op).count()
    }

    pub fn contains(&self, relation: &Relation) -> bool {
        let key = dedup_key(relation);
        self.relations.iter().any(|r| dedup_key(r) == key)
    }

    /// The description text handed to the SEM estimator.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ModelSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, relation) in self.relations.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{relation}")?;
        }
        Ok(())
    }
}

impl FromStr for ModelSpecification {
    type Err = SpecificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn dedup_key(relation: &Relation) -> (String, Operator, Vec<String>) {
    if relation.op.is_symmetric() {
        if let [rhs] = relation.rhs.as_slice() {
            if rhs < &relation.lhs {
                return (rhs.clone(), relation.op, vec![relation.lhs.clone()]);
            }
        }
    }
    (relation.lhs.clone(), relation.op, relation.rhs.clone())
}

/// Find the operator token. `=~` and `~~` are tried before `~`.
fn split_operator(line: &str) -> Option<(&str, Operator, &str)> {
    for op in [Operator::Measurement, Operator::Covariance, Operator::Regression] {
        if let Some((lhs, rhs)) = line.split_once(op.symbol()) {
            return Some((lhs, op, rhs));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESC: &str = "\
densification =~ d_pop_density + d_unit_density
d_home_value ~ densification
d_home_value ~ per_capita_income";

    #[test]
    fn parse_and_render_agree() {
        let spec = ModelSpecification::parse(DESC).unwrap();
        assert_eq!(spec.len(), 3);
        assert_eq!(spec.description(), DESC);
    }

    #[test]
    fn latent_is_a_variable_but_not_observed() {
        let spec = ModelSpecification::parse(DESC).unwrap();
        assert!(spec.variables().contains("densification"));
        assert!(spec.latents().contains("densification"));
        let observed: Vec<_> = spec.observed_variables().collect();
        assert!(!observed.contains(&"densification"));
        assert_eq!(observed.len(), 4);
    }

    #[test]
    fn symmetric_duplicates_are_dropped() {
        let spec = ModelSpecification::from_relations([
            Relation::covariance("a", "b"),
            Relation::covariance("b", "a"),
            Relation::regression("a", "b"),
            Relation::regression("b", "a"),
        ]);
        assert_eq!(spec.count(Operator::Covariance), 1);
        assert_eq!(spec.count(Operator::Regression), 2);
    }

    #[test]
    fn multi_rhs_regression_splits() {
        let spec = ModelSpecification::parse("y ~ a + b # comment\n\n").unwrap();
        assert_eq!(spec.len(), 2);
        assert!(spec.contains(&Relation::regression("y", "b")));
    }

    #[test]
    fn missing_operator_reports_line() {
        let err = ModelSpecification::parse("a ~ b\nnot a relation").unwrap_err();
        assert!(matches!(err, SpecificationError::MissingOperator { line: 2, .. }));
    }

    #[test]
    fn empty_side_is_rejected() {
        assert!(matches!(
            ModelSpecification::parse(" ~ b"),
            Err(SpecificationError::EmptySide { side: "left", .. })
        ));
        assert!(matches!(
            ModelSpecification::parse("a =~ "),
            Err(SpecificationError::EmptySide { side: "right", .. })
        ));
    }
}

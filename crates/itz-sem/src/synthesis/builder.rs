//! Stateful collector for synthesized relations.
//!
//! Owns deduplication and emission order so the synthesis steps only
//! decide *whether* a relation belongs in the model.

use itz_core::models::{ModelSpecification, Operator, Relation};
use rustc_hash::FxHashSet;

/// Accumulates relations in emission order, skipping duplicates and
/// self-relations.
#[derive(Debug, Default)]
pub struct RelationSetBuilder {
    relations: Vec<Relation>,
    seen: FxHashSet<(String, Operator, String)>,
    /// Unordered pairs joined by any relation.
    related: FxHashSet<(String, String)>,
}

impl RelationSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `lhs op rhs...`. Returns how many new `lhs op r` atoms were emitted.
    ///
    /// A measurement relation is emitted as one line listing its new
    /// indicators; regressions and covariances are emitted one line per
    /// right-hand variable.
    pub fn add_relation(&mut self, lhs: &str, rhs: &[&str], op: Operator) -> usize {
        let fresh: Vec<&str> = rhs
            .iter()
            .copied()
            .filter(|r| *r != lhs)
            .filter(|r| self.seen.insert(atom_key(lhs, op, r)))
            .collect();
        if fresh.is_empty() {
            return 0;
        }

        for r in &fresh {
            self.related.insert(pair_key(lhs, r));
        }
        match op {
            Operator::Measurement => {
                self.relations.push(Relation::measurement(lhs, fresh.iter().copied()));
            }
            _ => {
                self.relations.extend(fresh.iter().map(|r| Relation {
                    lhs: lhs.to_string(),
                    op,
                    rhs: vec![r.to_string()],
                }));
            }
        }
        fresh.len()
    }

    /// Whether `lhs op rhs` has been emitted (either side for covariances).
    pub fn contains(&self, lhs: &str, op: Operator, rhs: &str) -> bool {
        self.seen.contains(&atom_key(lhs, op, rhs))
    }

    /// Whether any relation joins `a` and `b`, in either direction.
    pub fn is_related(&self, a: &str, b: &str) -> bool {
        self.related.contains(&pair_key(a, b))
    }

    /// Number of relation lines emitted so far.
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Finish: the ordered relations and the set of every referenced variable.
    pub fn build(self) -> ModelSpecification {
        ModelSpecification::from_relations(self.relations)
    }
}

fn atom_key(lhs: &str, op: Operator, rhs: &str) -> (String, Operator, String) {
    if op.is_symmetric() && rhs < lhs {
        (rhs.to_string(), op, lhs.to_string())
    } else {
        (lhs.to_string(), op, rhs.to_string())
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regression_is_directional() {
        let mut b = RelationSetBuilder::new();
        assert_eq!(b.add_relation("y", &["x"], Operator::Regression), 1);
        assert_eq!(b.add_relation("y", &["x"], Operator::Regression), 0);
        assert_eq!(b.add_relation("x", &["y"], Operator::Regression), 1);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn covariance_is_symmetric() {
        let mut b = RelationSetBuilder::new();
        assert_eq!(b.add_relation("a", &["b"], Operator::Covariance), 1);
        assert_eq!(b.add_relation("b", &["a"], Operator::Covariance), 0);
        assert!(b.contains("b", Operator::Covariance, "a"));
    }

    #[test]
    fn self_relations_are_skipped() {
        let mut b = RelationSetBuilder::new();
        assert_eq!(b.add_relation("a", &["a"], Operator::Regression), 0);
        assert!(b.is_empty());
    }

    #[test]
    fn measurement_keeps_indicator_order_on_one_line() {
        let mut b = RelationSetBuilder::new();
        b.add_relation("f", &["z", "a", "m"], Operator::Measurement);
        let spec = b.build();
        assert_eq!(spec.description(), "f =~ z + a + m");
        assert!(spec.latents().contains("f"));
    }

    #[test]
    fn relatedness_ignores_operator_and_direction() {
        let mut b = RelationSetBuilder::new();
        b.add_relation("y", &["x"], Operator::Regression);
        assert!(b.is_related("x", "y"));
        assert!(b.is_related("y", "x"));
        assert!(!b.is_related("x", "z"));
    }

    #[test]
    fn build_collects_variables() {
        let mut b = RelationSetBuilder::new();
        b.add_relation("f", &["i1", "i2"], Operator::Measurement);
        b.add_relation("y", &["f", "log_x"], Operator::Regression);
        let spec = b.build();
        let vars: Vec<_> = spec.variables().iter().map(String::as_str).collect();
        assert_eq!(vars, vec!["f", "i1", "i2", "log_x", "y"]);
    }
}

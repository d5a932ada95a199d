use std::collections::BTreeMap;

use crate::config::TransformConfig;
use crate::constants::TRANSFORM_SEPARATOR;
use crate::errors::DataError;
use crate::models::Dataset;

use super::kind::{Transform, TransformKind};

/// A variable name resolved to its raw column and the transform to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariable {
    /// Name as referenced in the model (`log_income`).
    pub name: String,
    /// Underlying dataset column (`income`).
    pub column: String,
    pub transform: Transform,
}

impl ResolvedVariable {
    pub fn is_transformed(&self) -> bool {
        !self.transform.is_identity()
    }
}

/// Maps transform names to transforms bound to one set of shift constants.
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    entries: BTreeMap<&'static str, Transform>,
}

impl TransformRegistry {
    pub fn new(config: &TransformConfig) -> Self {
        let entries = TransformKind::ALL
            .iter()
            .map(|&kind| (kind.name(), Transform::new(kind, config)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<Transform> {
        self.entries.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<Transform, DataError> {
        self.get(name).ok_or_else(|| DataError::UnknownTransform {
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Split `log10_income` into (`log10`, `income`) when the prefix is a
    /// registered transform. Does not consult any dataset.
    pub fn split_prefixed<'n>(&self, name: &'n str) -> Option<(Transform, &'n str)> {
        let (prefix, rest) = name.split_once(TRANSFORM_SEPARATOR)?;
        if rest.is_empty() {
            return None;
        }
        self.get(prefix).map(|t| (t, rest))
    }

    /// Resolve a variable name against a dataset. A literal column always
    /// wins over a transform prefix.
    pub fn resolve(&self, name: &str, dataset: &Dataset) -> Result<ResolvedVariable, DataError> {
        if dataset.has_column(name) {
            return Ok(ResolvedVariable {
                name: name.to_string(),
                column: name.to_string(),
                transform: Transform::identity(),
            });
        }
        match self.split_prefixed(name) {
            Some((transform, raw)) if dataset.has_column(raw) => Ok(ResolvedVariable {
                name: name.to_string(),
                column: raw.to_string(),
                transform,
            }),
            _ => Err(DataError::MissingColumn {
                column: name.to_string(),
            }),
        }
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new(&TransformConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(2);
        ds.insert_values("income", vec![1.0, 2.0]).unwrap();
        ds.insert_values("log_rent", vec![3.0, 4.0]).unwrap();
        ds
    }

    #[test]
    fn literal_column_resolves_as_identity() {
        let reg = TransformRegistry::default();
        let r = reg.resolve("income", &dataset()).unwrap();
        assert_eq!(r.column, "income");
        assert!(!r.is_transformed());
    }

    #[test]
    fn prefixed_name_resolves_to_raw_column() {
        let reg = TransformRegistry::default();
        let r = reg.resolve("log10_income", &dataset()).unwrap();
        assert_eq!(r.column, "income");
        assert_eq!(r.transform.kind(), TransformKind::Log10);
    }

    #[test]
    fn literal_column_beats_prefix() {
        let reg = TransformRegistry::default();
        let r = reg.resolve("log_rent", &dataset()).unwrap();
        assert_eq!(r.column, "log_rent");
        assert!(!r.is_transformed());
    }

    #[test]
    fn unknown_prefix_or_column_is_missing() {
        let reg = TransformRegistry::default();
        assert!(matches!(
            reg.resolve("logit_income", &dataset()),
            Err(DataError::MissingColumn { .. })
        ));
        assert!(matches!(
            reg.resolve("sqrt_rent", &dataset()),
            Err(DataError::MissingColumn { .. })
        ));
    }
}

//! Relations between model variables and the operator grammar.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Relation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    /// `lval ~ rval`: rval explains lval.
    #[serde(rename = "~")]
    Regression,
    /// `lval =~ rval1 + rval2`: rvals are indicators of latent lval.
    #[serde(rename = "=~")]
    Measurement,
    /// `lval ~~ rval`: residual covariance, undirected.
    #[serde(rename = "~~")]
    Covariance,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Regression => "~",
            Self::Measurement => "=~",
            Self::Covariance => "~~",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "~" => Some(Self::Regression),
            "=~" => Some(Self::Measurement),
            "~~" => Some(Self::Covariance),
            _ => None,
        }
    }

    /// Whether `a op b` and `b op a` state the same thing.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::Covariance)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One line of a model description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub lhs: String,
    pub op: Operator,
    /// Single variable for `~` and `~~`; the indicator list for `=~`.
    pub rhs: Vec<String>,
}

impl Relation {
    pub fn regression(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self {
            lhs: lhs.into(),
            op: Operator::Regression,
            rhs: vec![rhs.into()],
        }
    }

    pub fn covariance(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self {
            lhs: lhs.into(),
            op: Operator::Covariance,
            rhs: vec![rhs.into()],
        }
    }

    pub fn measurement<I, S>(latent: impl Into<String>, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lhs: latent.into(),
            op: Operator::Measurement,
            rhs: indicators.into_iter().map(Into::into).collect(),
        }
    }

    /// Every variable this relation references, lhs first.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.lhs.as_str()).chain(self.rhs.iter().map(String::as_str))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_operator_grammar() {
        let m = Relation::measurement("densification", ["pop_density", "unit_density"]);
        assert_eq!(m.to_string(), "densification =~ pop_density + unit_density");
        assert_eq!(Relation::regression("rent", "income").to_string(), "rent ~ income");
        assert_eq!(Relation::covariance("a", "b").to_string(), "a ~~ b");
    }

    #[test]
    fn only_covariance_is_symmetric() {
        assert!(Operator::Covariance.is_symmetric());
        assert!(!Operator::Regression.is_symmetric());
        assert!(!Operator::Measurement.is_symmetric());
    }
}

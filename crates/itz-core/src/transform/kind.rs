use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TransformConfig;
use crate::errors::DataError;

/// The set of named transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Log,
    Ln,
    Log10,
    Log2,
    ExpE,
    Exp2,
    Exp10,
    Square,
    Cube,
    Cbrt,
    Sqrt,
    Reciprocal,
    Identity,
}

impl TransformKind {
    pub const ALL: [TransformKind; 13] = [
        Self::Log,
        Self::Ln,
        Self::Log10,
        Self::Log2,
        Self::ExpE,
        Self::Exp2,
        Self::Exp10,
        Self::Square,
        Self::Cube,
        Self::Cbrt,
        Self::Sqrt,
        Self::Reciprocal,
        Self::Identity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::ExpE => "expe",
            Self::Exp2 => "exp2",
            Self::Exp10 => "exp10",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Cbrt => "cbrt",
            Self::Sqrt => "sqrt",
            Self::Reciprocal => "reciprocal",
            Self::Identity => "identity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of inputs a transform accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Every finite real.
    Real,
    /// `x >= bound`.
    AtLeast(f64),
    /// `x > bound`.
    Above(f64),
    /// Every finite real except `x == excluded`.
    Except(f64),
}

impl Domain {
    pub fn contains(&self, x: f64) -> bool {
        if !x.is_finite() {
            return false;
        }
        match *self {
            Self::Real => true,
            Self::AtLeast(bound) => x >= bound,
            Self::Above(bound) => x > bound,
            Self::Except(excluded) => x != excluded,
        }
    }
}

/// A transform bound to its shift constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    kind: TransformKind,
    shift: f64,
}

impl Transform {
    pub fn new(kind: TransformKind, config: &TransformConfig) -> Self {
        let shift = match kind {
            TransformKind::Log
            | TransformKind::Ln
            | TransformKind::Log10
            | TransformKind::Log2
            | TransformKind::ExpE
            | TransformKind::Exp2
            | TransformKind::Exp10 => config.log_shift,
            TransformKind::Reciprocal => config.reciprocal_shift,
            _ => 0.0,
        };
        Self { kind, shift }
    }

    pub fn identity() -> Self {
        Self {
            kind: TransformKind::Identity,
            shift: 0.0,
        }
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_identity(&self) -> bool {
        self.kind == TransformKind::Identity
    }

    pub fn domain(&self) -> Domain {
        match self.kind {
            TransformKind::Log | TransformKind::Ln | TransformKind::Log10 | TransformKind::Log2 => {
                Domain::Above(-self.shift)
            }
            TransformKind::Sqrt => Domain::AtLeast(0.0),
            TransformKind::Reciprocal => Domain::Except(-self.shift),
            _ => Domain::Real,
        }
    }

    /// Apply without checking the domain. NaN or infinity may come back.
    pub fn apply_unchecked(&self, x: f64) -> f64 {
        let s = self.shift;
        match self.kind {
            TransformKind::Log | TransformKind::Ln => (x + s).ln(),
            TransformKind::Log10 => (x + s).log10(),
            TransformKind::Log2 => (x + s).log2(),
            TransformKind::ExpE => x.exp() - s,
            TransformKind::Exp2 => x.exp2() - s,
            TransformKind::Exp10 => 10f64.powf(x) - s,
            TransformKind::Square => x * x,
            TransformKind::Cube => x * x * x,
            TransformKind::Cbrt => x.cbrt(),
            TransformKind::Sqrt => x.sqrt(),
            TransformKind::Reciprocal => 1.0 / (x + s),
            TransformKind::Identity => x,
        }
    }

    /// Apply, returning `None` when `x` is outside the domain or the
    /// result overflows.
    pub fn apply(&self, x: f64) -> Option<f64> {
        if !self.domain().contains(x) {
            return None;
        }
        let y = self.apply_unchecked(x);
        y.is_finite().then_some(y)
    }

    /// Apply on behalf of `variable`, naming it in the error.
    pub fn apply_for(&self, variable: &str, x: f64) -> Result<f64, DataError> {
        self.apply(x).ok_or_else(|| DataError::TransformDomain {
            variable: variable.to_string(),
            transform: self.name().to_string(),
            value: x,
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(kind: TransformKind) -> Transform {
        Transform::new(kind, &TransformConfig::default())
    }

    #[test]
    fn names_round_trip() {
        for kind in TransformKind::ALL {
            assert_eq!(TransformKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TransformKind::from_name("logit"), None);
    }

    #[test]
    fn log_accepts_zero_because_of_shift() {
        let y = t(TransformKind::Log).apply(0.0).unwrap();
        assert!((y - 0.001f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn log_rejects_values_at_or_below_negative_shift() {
        assert!(t(TransformKind::Log).apply(-0.001).is_none());
        assert!(t(TransformKind::Log10).apply(-5.0).is_none());
    }

    #[test]
    fn exp_inverts_log() {
        let x = 42.0;
        let y = t(TransformKind::Log).apply(x).unwrap();
        let back = t(TransformKind::ExpE).apply(y).unwrap();
        assert!((back - x).abs() < 1e-9);
    }

    #[test]
    fn exp_overflow_is_out_of_domain() {
        assert!(t(TransformKind::ExpE).apply(1e6).is_none());
    }

    #[test]
    fn sqrt_rejects_negative() {
        assert!(t(TransformKind::Sqrt).apply(-1.0).is_none());
        assert_eq!(t(TransformKind::Sqrt).apply(9.0), Some(3.0));
    }

    #[test]
    fn cbrt_handles_negative() {
        assert_eq!(t(TransformKind::Cbrt).apply(-8.0), Some(-2.0));
    }

    #[test]
    fn reciprocal_excludes_pole() {
        assert!(t(TransformKind::Reciprocal).apply(-0.001).is_none());
        let y = t(TransformKind::Reciprocal).apply(0.999).unwrap();
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn apply_for_names_variable() {
        let err = t(TransformKind::Sqrt).apply_for("median_rent", -4.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("median_rent"));
        assert!(msg.contains("sqrt"));
    }
}

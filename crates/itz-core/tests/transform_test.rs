//! Transform registry behavior and numeric properties.

use proptest::prelude::*;

use itz_core::config::TransformConfig;
use itz_core::errors::DataError;
use itz_core::models::Dataset;
use itz_core::transform::{TransformKind, TransformRegistry};

fn registry() -> TransformRegistry {
    TransformRegistry::new(&TransformConfig::default())
}

#[test]
fn every_kind_is_registered() {
    let names: Vec<&str> = registry().names().collect();
    assert_eq!(names.len(), TransformKind::ALL.len());
    for kind in TransformKind::ALL {
        assert!(names.contains(&kind.name()), "{kind}");
    }
}

#[test]
fn prefixed_names_resolve_to_raw_columns() {
    let mut ds = Dataset::new(2);
    ds.insert_values("median_rent", vec![1.0, 2.0]).unwrap();
    ds.insert_values("log_special", vec![1.0, 2.0]).unwrap();

    let r = registry();
    let resolved = r.resolve("log10_median_rent", &ds).unwrap();
    assert_eq!(resolved.column, "median_rent");
    assert_eq!(resolved.transform.kind(), TransformKind::Log10);

    let literal = r.resolve("log_special", &ds).unwrap();
    assert!(!literal.is_transformed());

    assert!(matches!(
        r.resolve("cube_missing", &ds),
        Err(DataError::MissingColumn { .. })
    ));
    assert!(r.require("tanh").is_err());
}

#[test]
fn log_rejects_non_positive_shifted_input() {
    let log = registry().require("log").unwrap();
    assert!(log.apply(-0.001).is_none());
    assert!(log.apply(-0.5).is_none());
    let err = log.apply_for("log_income", -3.0).unwrap_err();
    assert!(matches!(err, DataError::TransformDomain { value, .. } if value == -3.0));
}

#[test]
fn overflow_is_a_domain_violation() {
    let exp10 = registry().require("exp10").unwrap();
    assert!(exp10.apply(400.0).is_none());
}

proptest! {
    #[test]
    fn exp_inverts_shifted_log(x in 0.0_f64..1.0e6) {
        let r = registry();
        let pairs = [("log", "expe"), ("log10", "exp10"), ("log2", "exp2")];
        for (fwd, inv) in pairs {
            let y = r.require(fwd).unwrap().apply(x).unwrap();
            let back = r.require(inv).unwrap().apply(y).unwrap();
            prop_assert!((back - x).abs() <= 1e-6 * x.max(1.0), "{fwd}/{inv}: {x} -> {back}");
        }
    }

    #[test]
    fn sqrt_and_square_agree_on_non_negatives(x in 0.0_f64..1.0e6) {
        let r = registry();
        let s = r.require("sqrt").unwrap().apply(x).unwrap();
        let back = r.require("square").unwrap().apply(s).unwrap();
        prop_assert!((back - x).abs() <= 1e-9 * x.max(1.0));
    }

    #[test]
    fn cbrt_inverts_cube(x in -1.0e4_f64..1.0e4) {
        let r = registry();
        let c = r.require("cube").unwrap().apply(x).unwrap();
        let back = r.require("cbrt").unwrap().apply(c).unwrap();
        prop_assert!((back - x).abs() <= 1e-9 * x.abs().max(1.0));
    }
}

//! Property tests for the regression utility.

use proptest::prelude::*;

use itz_core::models::Dataset;
use itz_core::transform::Transform;
use itz_sem::regression::regress;

fn dataset(xs: &[f64], ys: &[f64]) -> Dataset {
    let mut ds = Dataset::new(xs.len());
    ds.insert_values("x", xs.to_vec()).unwrap();
    ds.insert_values("y", ys.to_vec()).unwrap();
    ds
}

fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100.0_f64..100.0, -100.0_f64..100.0), 3..40)
}

proptest! {
    #[test]
    fn residuals_satisfy_normal_equations(pts in points()) {
        let xs: Vec<f64> = pts.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = pts.iter().map(|p| p.1).collect();
        let spread = xs.iter().cloned().fold(f64::MIN, f64::max) - xs.iter().cloned().fold(f64::MAX, f64::min);
        prop_assume!(spread > 1e-3);

        let fit = regress("x", "y", &dataset(&xs, &ys), Transform::identity(), Transform::identity()).unwrap();
        let residuals: Vec<f64> = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| y - (fit.slope * x + fit.intercept))
            .collect();
        let sum: f64 = residuals.iter().sum();
        let weighted: f64 = residuals.iter().zip(&xs).map(|(r, x)| r * x).sum();
        prop_assert!(sum.abs() < 1e-6 * xs.len() as f64 * 100.0);
        prop_assert!(weighted.abs() < 1e-6 * xs.len() as f64 * 1.0e4);
    }

    #[test]
    fn statistics_stay_in_range(pts in points()) {
        let xs: Vec<f64> = pts.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = pts.iter().map(|p| p.1).collect();
        if let Ok(fit) = regress("x", "y", &dataset(&xs, &ys), Transform::identity(), Transform::identity()) {
            prop_assert!((-1.0..=1.0).contains(&fit.r));
            prop_assert!((0.0..=1.0).contains(&fit.p_value));
            prop_assert!((fit.r_squared - fit.r * fit.r).abs() < 1e-12);
        }
    }

    #[test]
    fn exact_lines_are_recovered(
        slope in -50.0_f64..50.0,
        intercept in -50.0_f64..50.0,
        xs in prop::collection::btree_set(-1000i32..1000, 3..30),
    ) {
        let xs: Vec<f64> = xs.into_iter().map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| slope * x + intercept).collect();
        let fit = regress("x", "y", &dataset(&xs, &ys), Transform::identity(), Transform::identity()).unwrap();
        prop_assert!((fit.slope - slope).abs() < 1e-6);
        prop_assert!((fit.intercept - intercept).abs() < 1e-4);
        for (x, y) in xs.iter().zip(&ys) {
            prop_assert!((fit.predict(*x).unwrap() - y).abs() < 1e-4);
        }
    }
}

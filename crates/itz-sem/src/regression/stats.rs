//! Pearson correlation and ordinary least squares.
//!
//! Uses the Student's t distribution via `statrs` for p-values.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Degree-1 least-squares fit `(slope, intercept)`.
///
/// Returns `None` when `xs` has fewer than two distinct values.
pub fn least_squares(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (x_mean, y_mean) = (mean(&xs[..n]), mean(&ys[..n]));
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys).take(n) {
        let dx = x - x_mean;
        sxx += dx * dx;
        sxy += dx * (y - y_mean);
    }
    if sxx <= 0.0 || !sxx.is_finite() {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, y_mean - slope * x_mean))
}

/// Pearson correlation coefficient and its two-tailed p-value.
///
/// - Zero variance in either series: `(0.0, 1.0)`.
/// - Two observations: `r` is ±1 and the p-value is 1.0.
/// - `|r| == 1` with more than two observations: p-value 0.0.
pub fn pearson(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return (0.0, 1.0);
    }
    let (x_mean, y_mean) = (mean(&xs[..n]), mean(&ys[..n]));
    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys).take(n) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return (0.0, 1.0);
    }
    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    (r, correlation_p_value(r, n))
}

/// Two-tailed p-value for correlation `r` over `n` pairs, from
/// `t = r * sqrt((n - 2) / (1 - r^2))` with `n - 2` degrees of freedom.
pub fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n <= 2 {
        return 1.0;
    }
    let r_abs = r.abs();
    if r_abs >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r_abs * (df / (1.0 - r_abs * r_abs)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * (1.0 - dist.cdf(t))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

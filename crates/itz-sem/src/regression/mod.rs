//! Pairwise linear regression between two dataset columns.
//!
//! Rows where either column is null are dropped first, then the optional
//! transforms are applied, then Pearson r with its two-tailed p-value and
//! the least-squares line are computed on the transformed pairs.

pub mod stats;

use itz_core::errors::DataError;
use itz_core::models::Dataset;
use itz_core::transform::{ResolvedVariable, Transform};

pub use stats::{least_squares, pearson};

/// Result of regressing `y` on `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionFit {
    pub x: String,
    pub y: String,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r: f64,
    /// Two-tailed p-value of `r`.
    pub p_value: f64,
    pub r_squared: f64,
    /// Paired observations used.
    pub n: usize,
    transform_x: Transform,
    transform_y: Transform,
}

impl RegressionFit {
    /// `transform_y(slope * transform_x(raw_x) + intercept)`.
    ///
    /// Takes an untransformed x. The output lives in whatever space
    /// `transform_y` maps to; pass the inverse transform (for example `expe`
    /// for a `log` fit) to get back to the original y scale.
    pub fn predict(&self, raw_x: f64) -> Result<f64, DataError> {
        let tx = self.transform_x.apply_for(&self.x, raw_x)?;
        self.transform_y
            .apply_for(&self.y, self.slope * tx + self.intercept)
    }

    /// Whether the correlation is significant under a p-value cutoff.
    pub fn is_significant(&self, threshold: f64) -> bool {
        self.p_value < threshold
    }
}

/// Regress column `y` on column `x`, transforming each side first.
pub fn regress(
    x: &str,
    y: &str,
    dataset: &Dataset,
    transform_x: Transform,
    transform_y: Transform,
) -> Result<RegressionFit, DataError> {
    let (xs, ys) = paired_observations(dataset, x, y, transform_x, transform_y)?;
    fit_pairs(x, y, &xs, &ys, transform_x, transform_y)
}

/// Regress two resolved (possibly transform-prefixed) variables.
pub fn regress_resolved(
    x: &ResolvedVariable,
    y: &ResolvedVariable,
    dataset: &Dataset,
) -> Result<RegressionFit, DataError> {
    let (xs, ys) = paired_observations_named(
        dataset,
        (&x.name, &x.column, x.transform),
        (&y.name, &y.column, y.transform),
    )?;
    fit_pairs(&x.name, &y.name, &xs, &ys, x.transform, y.transform)
}

fn fit_pairs(
    x: &str,
    y: &str,
    xs: &[f64],
    ys: &[f64],
    transform_x: Transform,
    transform_y: Transform,
) -> Result<RegressionFit, DataError> {
    if xs.is_empty() {
        return Err(DataError::InsufficientData {
            x: x.to_string(),
            y: y.to_string(),
        });
    }
    let (slope, intercept) =
        least_squares(xs, ys).ok_or_else(|| DataError::DegenerateRegression {
            x: x.to_string(),
            y: y.to_string(),
        })?;
    let (r, p_value) = pearson(xs, ys);

    Ok(RegressionFit {
        x: x.to_string(),
        y: y.to_string(),
        slope,
        intercept,
        r,
        p_value,
        r_squared: r * r,
        n: xs.len(),
        transform_x,
        transform_y,
    })
}

/// Non-null (x, y) pairs with the transforms applied.
pub fn paired_observations(
    dataset: &Dataset,
    x: &str,
    y: &str,
    transform_x: Transform,
    transform_y: Transform,
) -> Result<(Vec<f64>, Vec<f64>), DataError> {
    paired_observations_named(dataset, (x, x, transform_x), (y, y, transform_y))
}

/// `(variable name, column, transform)` per side. The variable name is
/// what a domain error reports.
fn paired_observations_named(
    dataset: &Dataset,
    (x_name, x_col, tx): (&str, &str, Transform),
    (y_name, y_col, ty): (&str, &str, Transform),
) -> Result<(Vec<f64>, Vec<f64>), DataError> {
    let xc = dataset.column(x_col)?;
    let yc = dataset.column(y_col)?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (xv, yv) in xc.iter().zip(yc) {
        if let (Some(xv), Some(yv)) = (xv, yv) {
            xs.push(tx.apply_for(x_name, *xv)?);
            ys.push(ty.apply_for(y_name, *yv)?);
        }
    }
    Ok((xs, ys))
}

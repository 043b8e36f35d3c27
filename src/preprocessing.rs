use ndarray::{concatenate, Array1, Array2, ArrayView2, Axis};

use crate::{dataset::check_not_empty, RegressionErr, Result};

/// Added to the variance before taking its square root, keeps constant columns finite.
pub const VARIANCE_EPSILON: f32 = 1e-7;

/// Per-column normalization statistics of a training feature matrix.
///
/// Computed once by `fit` and then reused, unmodified, for every later standardization so test
/// and prediction inputs land in the same space as the training data.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedStats {
    mean: Array1<f32>,
    variance: Array1<f32>,
}

/// Computes the population mean and variance of every column of `x`.
///
/// # Arguments
/// * `x` - The raw feature matrix, without a bias column.
///
/// # Returns
/// The fitted statistics, or `RegressionErr::Empty` if `x` has no rows or columns.
pub fn fit(x: ArrayView2<f32>) -> Result<FittedStats> {
    check_not_empty(x, "feature")?;

    let mean = x
        .mean_axis(Axis(0))
        .ok_or(RegressionErr::Empty { what: "feature" })?;
    let variance = x.var_axis(Axis(0), 0.0);

    Ok(FittedStats { mean, variance })
}

impl FittedStats {
    /// Returns the amount of feature columns these statistics were fitted on.
    pub fn ncols(&self) -> usize {
        self.mean.len()
    }

    pub fn mean(&self) -> &Array1<f32> {
        &self.mean
    }

    pub fn variance(&self) -> &Array1<f32> {
        &self.variance
    }

    /// Standardizes every column of `x` and prepends the bias column of ones.
    ///
    /// # Arguments
    /// * `x` - A raw feature matrix with as many columns as the fitted one.
    ///
    /// # Returns
    /// A matrix with one column more than `x`, or a shape error.
    pub fn transform(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        check_not_empty(x, "feature")?;

        if x.ncols() != self.ncols() {
            return Err(RegressionErr::Shape {
                what: "feature columns",
                got: x.ncols(),
                expected: self.ncols(),
            });
        }

        let std_dev = self.variance.mapv(|v| (v + VARIANCE_EPSILON).sqrt());
        let standardized = (&x - &self.mean) / &std_dev;

        with_bias(standardized.view())
    }
}

/// Runs the feature processor: fits the statistics if there are none yet and applies them.
///
/// # Arguments
/// * `stats` - The statistics slot, filled on the first call and reused on every other one.
/// * `x` - The raw feature matrix.
///
/// # Returns
/// The standardized, bias-augmented matrix.
pub fn process(stats: &mut Option<FittedStats>, x: ArrayView2<f32>) -> Result<Array2<f32>> {
    if let Some(stats) = stats {
        return stats.transform(x);
    }

    let fitted = fit(x)?;
    let out = fitted.transform(x)?;
    *stats = Some(fitted);
    Ok(out)
}

fn with_bias(x: ArrayView2<f32>) -> Result<Array2<f32>> {
    let ones = Array2::ones((x.nrows(), 1));

    concatenate(Axis(1), &[ones.view(), x]).map_err(|_| RegressionErr::Shape {
        what: "bias rows",
        got: x.nrows(),
        expected: ones.nrows(),
    })
}

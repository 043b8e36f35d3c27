use ndarray::{linalg, Array2, ArrayView2};

use crate::{RegressionErr, Result};

/// Computes the gradient of the mean squared error of a linear model with respect to its weights,
/// that is, `xᵗ·(x·w - y) / n`.
///
/// # Arguments
/// * `w` - The weights, a `k×1` column.
/// * `x` - An `n×k` batch.
/// * `y` - The `n×1` labels of the batch.
///
/// # Returns
/// The `k×1` gradient, or an error if the batch is empty or the shapes do not line up.
pub fn linear_gradient(
    w: ArrayView2<f32>,
    x: ArrayView2<f32>,
    y: ArrayView2<f32>,
) -> Result<Array2<f32>> {
    let n = x.nrows();

    if n == 0 {
        return Err(RegressionErr::Empty { what: "batch" });
    }

    check_dim("weight rows", w.nrows(), x.ncols())?;
    check_dim("weight columns", w.ncols(), 1)?;
    check_dim("label rows", y.nrows(), n)?;
    check_dim("label columns", y.ncols(), 1)?;

    let diff = x.dot(&w) - &y;

    let mut grad = Array2::zeros(w.raw_dim());
    linalg::general_mat_mul(1.0 / n as f32, &x.t(), &diff, 0.0, &mut grad);

    Ok(grad)
}

fn check_dim(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(RegressionErr::Shape {
            what,
            got,
            expected,
        });
    }

    Ok(())
}

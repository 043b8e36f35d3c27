use ndarray::ArrayView2;

use crate::{dataset::check_labels, RegressionErr, Result};

/// Computes the coefficient of determination, `1 - SSres / SStot`.
///
/// # Arguments
/// * `labels` - The expected `n×1` values.
/// * `predictions` - The predicted `n×1` values.
///
/// # Returns
/// The R² score, or `RegressionErr::DegenerateTarget` if every label is the same, in which case
/// the score is undefined.
pub fn r2_score(labels: ArrayView2<f32>, predictions: ArrayView2<f32>) -> Result<f32> {
    check_labels(labels, labels.nrows())?;
    check_labels(predictions, labels.nrows())?;

    let first = labels[[0, 0]];
    if labels.iter().all(|&y| y == first) {
        return Err(RegressionErr::DegenerateTarget);
    }

    let mean = labels.mean().ok_or(RegressionErr::Empty { what: "label" })?;
    let ss_res = (&labels - &predictions).mapv(|x| x.powi(2)).sum();
    let ss_tot = labels.mapv(|y| (y - mean).powi(2)).sum();

    // distinct but tiny labels can still underflow to zero
    if ss_tot == 0.0 {
        return Err(RegressionErr::DegenerateTarget);
    }

    Ok(1.0 - ss_res / ss_tot)
}

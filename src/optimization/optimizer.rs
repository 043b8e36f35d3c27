use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use super::linear_gradient;
use crate::Result;

pub trait Optimizer {
    /// Returns the *length* of the steps currently taken on `update_params`.
    fn learning_rate(&self) -> f32;

    fn set_learning_rate(&mut self, learning_rate: f32);

    fn update_params(&mut self, params: ArrayViewMut2<f32>, grad: ArrayView2<f32>);

    /// Takes one step over a batch: computes the gradient of the mean squared error of the
    /// linear model `x·weights` against `y` and updates `weights` in place.
    ///
    /// # Arguments
    /// * `weights` - The model's weights, a `k×1` column.
    /// * `x` - A standardized, bias-augmented `n×k` batch.
    /// * `y` - The `n×1` labels of the batch.
    fn step(
        &mut self,
        weights: &mut Array2<f32>,
        x: ArrayView2<f32>,
        y: ArrayView2<f32>,
    ) -> Result<()> {
        let grad = linear_gradient(weights.view(), x, y)?;
        self.update_params(weights.view_mut(), grad.view());
        Ok(())
    }
}

use ndarray::ArrayView2;

use super::LossFn;

/// Average of the squared residuals between predictions and labels.
///
/// The training loop records it over the whole training set after every iteration.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        let n = y.len();
        if n == 0 {
            return 0.0;
        }

        let sum: f32 = y_pred
            .iter()
            .zip(&y)
            .map(|(guess, label)| (guess - label) * (guess - label))
            .sum();

        sum / n as f32
    }
}

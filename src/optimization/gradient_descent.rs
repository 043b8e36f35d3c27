use ndarray::{ArrayView2, ArrayViewMut2};

use super::Optimizer;

/// Plain gradient descent: every update moves the weights against the gradient, scaled by the
/// current learning rate.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// # Arguments
    /// * `learning_rate` - The starting learning rate, the schedule adjusts it afterwards.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: f32) {
        self.learning_rate = learning_rate;
    }

    /// Applies `params -= learning_rate * grad` in place.
    fn update_params(&mut self, mut params: ArrayViewMut2<f32>, grad: ArrayView2<f32>) {
        params.scaled_add(-self.learning_rate, &grad);
    }
}

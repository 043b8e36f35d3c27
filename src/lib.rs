//! Multivariate linear regression fitted with gradient descent.
//!
//! Features are standardized with statistics fitted once on the training set, a bias column is
//! prepended and the weights are learned with single-batch or mini-batch gradient descent, while a
//! *bold driver* schedule adapts the learning rate to the trend of the mean squared error.

pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod loss;
pub mod optimization;
pub mod preprocessing;
mod regression;
pub mod training;

pub use error::{RegressionErr, Result};
pub use regression::{LinearRegression, TrainingReport};

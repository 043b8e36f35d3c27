use log::{debug, info};
use ndarray::{Array2, ArrayView2};
use serde::Serialize;

use crate::{
    dataset::{check_labels, matrix_from_rows, Dataset},
    evaluation::r2_score,
    loss::{LossFn, Mse},
    optimization::{GradientDescent, Optimizer},
    preprocessing::{self, FittedStats},
    training::{BoldDriver, GradientMode, MseHistory, TrainState, TrainingConfig},
    RegressionErr, Result,
};

/// A multivariate linear model fitted with gradient descent.
///
/// The model owns its training set, the normalization statistics fitted on it, its weights and the
/// state of the learning rate schedule. Weights start at zero and every `train` call resumes from
/// where the previous one left them.
#[derive(Debug, Clone)]
pub struct LinearRegression {
    dataset: Dataset,
    design: Option<Dataset>,
    stats: Option<FittedStats>,
    weights: Array2<f32>,

    optimizer: GradientDescent,
    schedule: BoldDriver,
    loss_fn: Mse,

    config: TrainingConfig,
    state: TrainState,
}

/// A snapshot of a training run, meant for whoever reports or plots it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// The error of every iteration, oldest first.
    pub mse_history: Vec<f32>,
    pub learning_rate: f32,
    /// Bias first, then one weight per feature column.
    pub weights: Vec<f32>,
}

impl LinearRegression {
    /// Creates a new `LinearRegression`.
    ///
    /// # Arguments
    /// * `features` - The training feature matrix, one row per observation.
    /// * `labels` - The training labels, one single-valued row per observation.
    /// * `config` - The training parameters.
    ///
    /// # Returns
    /// A new untrained model, or an error if the matrices or the config are invalid.
    pub fn new(features: Array2<f32>, labels: Array2<f32>, config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        let dataset = Dataset::new(features, labels)?;
        let weights = Array2::zeros((dataset.x().ncols() + 1, 1));

        Ok(Self {
            dataset,
            design: None,
            stats: None,
            weights,
            optimizer: GradientDescent::new(config.learning_rate),
            schedule: BoldDriver::new(config.learning_rate),
            loss_fn: Mse::new(),
            config,
            state: TrainState::Idle,
        })
    }

    /// Same as `new` but takes row-major data.
    pub fn from_rows<F, L>(features: &[F], labels: &[L], config: TrainingConfig) -> Result<Self>
    where
        F: AsRef<[f32]>,
        L: AsRef<[f32]>,
    {
        Self::new(matrix_from_rows(features)?, matrix_from_rows(labels)?, config)
    }

    /// Runs `config.iterations` iterations of gradient descent.
    ///
    /// The first call fits the normalization statistics on the training features. After every
    /// iteration the error over the whole training set is recorded and the learning rate is
    /// adjusted.
    ///
    /// # Arguments
    /// * `mode` - Whether to step once over the whole set or once per batch.
    ///
    /// # Errors
    /// `RegressionErr::EmptyBatch` if `mode` is `MiniBatch` and not even one full batch fits in
    /// the training set. It is returned before any weight is touched.
    pub fn train(&mut self, mode: GradientMode) -> Result<()> {
        if mode == GradientMode::MiniBatch {
            self.dataset.batches(self.config.batch_size)?;
        }

        self.fit_design()?;

        let Self {
            design,
            weights,
            optimizer,
            schedule,
            loss_fn,
            config,
            state,
            ..
        } = self;

        let design = design.as_ref().ok_or(RegressionErr::StatisticsMissing)?;
        let iterations = config.iterations.get();

        info!(
            "training {mode} for {iterations} iteration(s) over {} rows",
            design.len()
        );

        *state = state.start();
        while let TrainState::Running { iteration } = *state {
            match mode {
                GradientMode::SingleBatch => optimizer.step(weights, design.x(), design.y())?,
                GradientMode::MiniBatch => {
                    for (x, y) in design.batches(config.batch_size)? {
                        optimizer.step(weights, x, y)?;
                    }
                }
            }

            let guesses = design.x().dot(&*weights);
            let mse = loss_fn.loss(guesses.view(), design.y());
            let learning_rate = schedule.observe(mse);
            optimizer.set_learning_rate(learning_rate);

            debug!(
                iteration = iteration, mse = mse, learning_rate = learning_rate;
                "iteration finished"
            );
            *state = state.advance(iterations);
        }

        info!(
            "training finished, mse: {:?}, learning rate: {}",
            schedule.history().latest(),
            schedule.learning_rate()
        );

        Ok(())
    }

    /// Predicts one value per observation.
    ///
    /// # Arguments
    /// * `observations` - Raw features with as many columns as the training ones.
    ///
    /// # Returns
    /// An `n×1` matrix with the predictions in input order.
    ///
    /// # Errors
    /// `RegressionErr::StatisticsMissing` if the model was never trained.
    pub fn predict(&self, observations: ArrayView2<f32>) -> Result<Array2<f32>> {
        let stats = self.stats.as_ref().ok_or(RegressionErr::StatisticsMissing)?;
        let x = stats.transform(observations)?;
        Ok(x.dot(&self.weights))
    }

    /// Scores the model against a test set with the coefficient of determination.
    ///
    /// # Arguments
    /// * `features` - The raw test features.
    /// * `labels` - The test labels, one single-valued row per observation.
    ///
    /// # Returns
    /// The R² score of the model's predictions.
    ///
    /// # Errors
    /// `RegressionErr::DegenerateTarget` if all test labels are equal, plus the errors of
    /// `predict`.
    pub fn test(&self, features: ArrayView2<f32>, labels: ArrayView2<f32>) -> Result<f32> {
        check_labels(labels, features.nrows())?;
        let predictions = self.predict(features)?;
        r2_score(labels, predictions.view())
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    /// Returns the normalization statistics, `None` until the first `train` call.
    pub fn stats(&self) -> Option<&FittedStats> {
        self.stats.as_ref()
    }

    /// Returns the error of every finished iteration, most recent first.
    pub fn mse_history(&self) -> &MseHistory {
        self.schedule.history()
    }

    /// Returns the learning rate the next iteration will use.
    pub fn learning_rate(&self) -> f32 {
        self.optimizer.learning_rate()
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn state(&self) -> TrainState {
        self.state
    }

    pub fn report(&self) -> TrainingReport {
        TrainingReport {
            mse_history: self.mse_history().chronological(),
            learning_rate: self.learning_rate(),
            weights: self.weights.iter().copied().collect(),
        }
    }

    fn fit_design(&mut self) -> Result<()> {
        if self.design.is_some() {
            return Ok(());
        }

        let x = preprocessing::process(&mut self.stats, self.dataset.x())?;
        debug!("fitted normalization statistics: {:?}", self.stats);

        self.design = Some(Dataset::new(x, self.dataset.y().to_owned())?);
        Ok(())
    }
}

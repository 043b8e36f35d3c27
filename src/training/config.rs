use std::{fmt, num::NonZeroUsize, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{RegressionErr, Result};

const DEFAULT_LEARNING_RATE: f32 = 0.1;
const DEFAULT_ITERATIONS: NonZeroUsize = NonZeroUsize::new(1000).unwrap();
const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// How the training set is walked on every iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientMode {
    /// One gradient step over the whole training set.
    #[default]
    SingleBatch,
    /// One gradient step per contiguous slice of `batch_size` rows.
    MiniBatch,
}

impl fmt::Display for GradientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleBatch => write!(f, "single-batch"),
            Self::MiniBatch => write!(f, "mini-batch"),
        }
    }
}

impl FromStr for GradientMode {
    type Err = RegressionErr;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single-batch" => Ok(Self::SingleBatch),
            "mini-batch" => Ok(Self::MiniBatch),
            other => Err(RegressionErr::InvalidConfig(format!(
                "unknown gradient mode `{other}`, expected `single-batch` or `mini-batch`"
            ))),
        }
    }
}

/// Construction parameters of a `LinearRegression`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// The initial learning rate, adjusted on every iteration afterwards.
    pub learning_rate: f32,
    /// The amount of iterations run per `train` call.
    pub iterations: NonZeroUsize,
    /// The amount of rows per batch in `GradientMode::MiniBatch`.
    pub batch_size: NonZeroUsize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_ITERATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl TrainingConfig {
    /// Parses and validates a configuration from JSON, missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants that the field types do not enforce.
    ///
    /// # Errors
    /// `RegressionErr::InvalidConfig` if the learning rate is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(RegressionErr::InvalidConfig(format!(
                "the learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }

        Ok(())
    }
}

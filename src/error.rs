use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire regression crate.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The regression crate's error type.
#[derive(Debug)]
pub enum RegressionErr {
    /// A shape invariant was violated (e.g. mismatched row or column counts).
    Shape {
        /// Human-readable context for the mismatch (e.g. "label rows").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },
    /// A matrix with no rows or no columns was given.
    Empty { what: &'static str },
    /// A row of a row-major input has a different length than the first one.
    Ragged {
        row: usize,
        got: usize,
        expected: usize,
    },
    /// Prediction or evaluation was requested before any training fitted the
    /// normalization statistics.
    StatisticsMissing,
    /// The test labels have zero variance, R² is undefined.
    DegenerateTarget,
    /// The batch size is larger than the training set, not even one full batch fits.
    EmptyBatch { rows: usize, batch_size: usize },
    /// Invalid configuration, caught before training.
    InvalidConfig(String),
    /// The configuration could not be parsed.
    Config(serde_json::Error),
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::Shape {
                what,
                got,
                expected,
            } => write!(f, "shape mismatch for {what}: got {got}, expected {expected}"),
            RegressionErr::Empty { what } => write!(f, "the {what} matrix is empty"),
            RegressionErr::Ragged { row, got, expected } => write!(
                f,
                "row {row} has {got} values but the first row has {expected}"
            ),
            RegressionErr::StatisticsMissing => write!(
                f,
                "normalization statistics are missing, the model has to be trained first"
            ),
            RegressionErr::DegenerateTarget => {
                write!(f, "the test labels have zero variance, R² is undefined")
            }
            RegressionErr::EmptyBatch { rows, batch_size } => write!(
                f,
                "a batch size of {batch_size} yields no full batch over {rows} rows"
            ),
            RegressionErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            RegressionErr::Config(e) => write!(f, "failed to parse config: {e}"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RegressionErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

/// Lifecycle of a training run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrainState {
    /// No iteration has been run yet.
    #[default]
    Idle,
    /// `iteration` is the zero-based index of the iteration being run.
    Running { iteration: usize },
    /// The last run finished after `iterations` iterations.
    Done { iterations: usize },
}

impl TrainState {
    /// Starts a new run. A finished model can be started again, it resumes from its weights.
    pub fn start(self) -> Self {
        Self::Running { iteration: 0 }
    }

    /// Moves to the next iteration, or to `Done` once `iterations` have been run.
    ///
    /// Calling this outside of `Running` leaves the state untouched.
    pub fn advance(self, iterations: usize) -> Self {
        match self {
            Self::Running { iteration } if iteration + 1 >= iterations => {
                Self::Done { iterations }
            }
            Self::Running { iteration } => Self::Running {
                iteration: iteration + 1,
            },
            other => other,
        }
    }
}

use std::collections::VecDeque;

const DECELERATION: f32 = 0.5;
const ACCELERATION: f32 = 1.05;

/// Mean squared error of every finished training iteration, most recent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MseHistory {
    values: VecDeque<f32>,
}

impl MseHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the most recent value.
    pub fn latest(&self) -> Option<f32> {
        self.values.front().copied()
    }

    /// Returns the `i`-th most recent value.
    pub fn get(&self, i: usize) -> Option<f32> {
        self.values.get(i).copied()
    }

    /// Iterates the values from the most recent to the oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = f32> + '_ {
        self.values.iter().copied()
    }

    /// Returns the values from the oldest to the most recent, the order a plot is drawn in.
    pub fn chronological(&self) -> Vec<f32> {
        self.iter().rev().collect()
    }

    fn record(&mut self, mse: f32) {
        self.values.push_front(mse);
    }
}

/// The *bold driver* learning rate schedule.
///
/// Every recorded error is compared with the previous one: if it grew the learning rate is halved,
/// otherwise it is increased by 5%. The rate is never clamped and offending steps are not rolled
/// back.
#[derive(Debug, Clone, PartialEq)]
pub struct BoldDriver {
    learning_rate: f32,
    history: MseHistory,
}

impl BoldDriver {
    /// Returns a new `BoldDriver` with an empty history.
    ///
    /// # Arguments
    /// * `learning_rate` - The starting learning rate.
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            history: MseHistory::new(),
        }
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn history(&self) -> &MseHistory {
        &self.history
    }

    /// Records the error of a finished iteration and adjusts the learning rate.
    ///
    /// # Arguments
    /// * `mse` - The mean squared error over the whole training set after the iteration.
    ///
    /// # Returns
    /// The learning rate to use on the next iteration.
    pub fn observe(&mut self, mse: f32) -> f32 {
        self.history.record(mse);

        let (Some(current), Some(previous)) = (self.history.get(0), self.history.get(1)) else {
            return self.learning_rate;
        };

        if current > previous {
            self.learning_rate *= DECELERATION;
        } else {
            self.learning_rate *= ACCELERATION;
        }

        self.learning_rate
    }
}

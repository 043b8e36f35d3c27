mod config;
mod schedule;
mod state;

pub use config::{GradientMode, TrainingConfig};
pub use schedule::{BoldDriver, MseHistory};
pub use state::TrainState;

use crate::error::{Error, Result};
use crate::optim::adam::DEFAULT_LEARNING_RATE;

/// Configuration for a `train_loop` run.
///
/// - `epochs`        — full passes over the training split
/// - `batch_size`    — samples per Adam update
/// - `learning_rate` — Adam step size
/// - `shuffle`       — reorder the training samples at the start of each epoch
/// - `seed`          — seeds weight initialization and shuffling; `None` draws
///                     from OS entropy
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 10,
            batch_size: 128,
            learning_rate: DEFAULT_LEARNING_RATE,
            shuffle: true,
            seed: None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch size must be at least 1".into()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Config(format!("learning rate must be positive, got {}", self.learning_rate)));
        }
        Ok(())
    }
}

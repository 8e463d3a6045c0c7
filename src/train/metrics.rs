use log::info;

use crate::data::samples::Sample;
use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;

/// Threshold separating a "positive" prediction from a negative one.
const BINARY_THRESHOLD: f64 = 0.5;

/// Binary accuracy for a single-unit output: the prediction is thresholded at
/// 0.5 to 0 or 1 and compared for equality with the target. Continuous
/// targets therefore only match when they are exactly 0 or 1.
pub fn binary_match(predicted: &[f64], expected: &[f64]) -> bool {
    predicted.iter().zip(expected.iter())
        .all(|(&p, &y)| {
            let class = if p > BINARY_THRESHOLD { 1.0 } else { 0.0 };
            class == y
        })
}

/// Holdout metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub loss: f64,
    pub accuracy: f64,
    pub samples: usize,
}

/// Scores `network` on `samples` in batches of `batch_size`. Per-batch means
/// are weighted by batch length, so the result is the mean over all samples.
pub fn evaluate(network: &Network, samples: &[Sample], batch_size: usize) -> Result<Evaluation> {
    if samples.is_empty() {
        return Err(Error::EmptySplit("test"));
    }
    if batch_size == 0 {
        return Err(Error::Config("batch size must be at least 1".into()));
    }

    let mut total_loss = 0.0;
    let mut correct = 0usize;

    for batch in samples.chunks(batch_size) {
        let mut batch_loss = 0.0;
        for sample in batch {
            let output = network.predict(&sample.inputs);
            let label = sample.label();
            batch_loss += MseLoss::loss(&output, &label);
            if binary_match(&output, &label) {
                correct += 1;
            }
        }
        total_loss += batch_loss;
    }

    let n = samples.len();
    let evaluation = Evaluation {
        loss: total_loss / n as f64,
        accuracy: correct as f64 / n as f64,
        samples: n,
    };
    info!("evaluated {} samples: loss {:.6}, accuracy {:.4}", n, evaluation.loss, evaluation.accuracy);
    Ok(evaluation)
}

use std::time::Instant;

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::samples::Sample;
use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::adam::Adam;
use crate::train::epoch_stats::EpochStats;
use crate::train::metrics::binary_match;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` in place for `config.epochs` epochs of mini-batch Adam
/// on MSE and returns the statistics of every epoch.
///
/// `rng` is only used to shuffle the sample order when `config.shuffle` is set.
/// There is no early stopping and no validation pass.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    samples: &[Sample],
    optimizer: &mut Adam,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    config.validate()?;
    if samples.is_empty() {
        return Err(Error::EmptySplit("train"));
    }

    let mut history = Vec::with_capacity(config.epochs);
    let mut order: Vec<usize> = (0..samples.len()).collect();

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(&mut *rng);
        }

        let (train_loss, train_accuracy) = run_one_epoch(network, samples, &order, optimizer, config.batch_size);

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            train_accuracy,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}/{}: loss {:.6}, accuracy {:.4} ({} ms)",
            stats.epoch, stats.total_epochs, stats.train_loss, stats.train_accuracy, stats.elapsed_ms
        );
        history.push(stats);
    }

    debug!("training finished after {} optimizer steps", optimizer.steps());
    Ok(history)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One pass over `samples` in the given order. Returns `(mean loss, accuracy)`
/// measured on each sample before its batch update.
fn run_one_epoch(
    network: &mut Network,
    samples: &[Sample],
    order: &[usize],
    optimizer: &mut Adam,
    batch_size: usize,
) -> (f64, f64) {
    let mut total_loss = 0.0;
    let mut correct = 0usize;

    for batch in order.chunks(batch_size) {
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(1, layer.biases.cols),
            ))
            .collect();

        for &idx in batch {
            let sample = &samples[idx];
            let expected = sample.label();
            let output = network.forward(&sample.inputs);

            total_loss += MseLoss::loss(&output, &expected);
            if binary_match(&output, &expected) {
                correct += 1;
            }

            let mut delta = Matrix::row_vector(MseLoss::derivative(&output, &expected));

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::row_vector(sample.inputs.clone())
                } else {
                    network.layers[i - 1].neurons.clone()
                };

                let (w_grad, b_grad) = network.layers[i].compute_gradients(&delta, &input_for_layer);

                if i > 0 {
                    delta = network.layers[i].backpropagate(&b_grad);
                }

                acc_grads[i].0.add_assign(&w_grad);
                acc_grads[i].1.add_assign(&b_grad);
            }
        }

        // Average over the batch, then one optimizer step.
        let inv_batch = 1.0 / batch.len() as f64;
        let averaged: Vec<(Matrix, Matrix)> = acc_grads.into_iter()
            .map(|(w, b)| (w.map(|x| x * inv_batch), b.map(|x| x * inv_batch)))
            .collect();
        optimizer.step(&mut network.layers, &averaged);
    }

    let n = samples.len() as f64;
    (total_loss / n, correct as f64 / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;
    use crate::layers::dense::Layer;
    use crate::network::spec::CHECKERS_TOPOLOGY;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board_sample(seed: usize) -> Sample {
        let inputs = board(seed);
        let target = (inputs.iter().sum::<f64>() / 10.0).tanh();
        Sample { inputs, target }
    }

    fn board(seed: usize) -> Vec<f64> {
        (0..32).map(|i| (((i * 7 + seed * 3) % 5) as f64 - 2.0) / 2.0).collect()
    }

    #[test]
    fn loss_does_not_increase_on_repeated_sample() {
        // A target of 1 sits on the tanh asymptote, so no step can overshoot it.
        let samples = vec![Sample { inputs: board(1), target: 1.0 }; 256];
        let mut rng = StdRng::seed_from_u64(11);
        let mut network = Network::from_specs(&CHECKERS_TOPOLOGY, &mut rng);
        let mut adam = Adam::new(0.001);
        let history = train_loop(&mut network, &samples, &mut adam, &TrainConfig::default(), &mut rng).unwrap();

        assert_eq!(history.len(), 10);
        assert_eq!(adam.steps(), 20);
        for pair in history.windows(2) {
            assert!(
                pair[1].train_loss <= pair[0].train_loss + 1e-9,
                "loss went up: {} -> {}", pair[0].train_loss, pair[1].train_loss
            );
        }
    }

    #[test]
    fn fits_small_dataset() {
        let samples: Vec<Sample> = (0..40).map(board_sample).collect();
        let mut rng = StdRng::seed_from_u64(5);
        let mut network = Network::from_specs(&CHECKERS_TOPOLOGY, &mut rng);
        let mut adam = Adam::new(0.01);
        let config = TrainConfig { epochs: 200, batch_size: 8, ..TrainConfig::default() };
        let history = train_loop(&mut network, &samples, &mut adam, &config, &mut rng).unwrap();

        let first = history.first().map(|s| s.train_loss).unwrap();
        let last = history.last().map(|s| s.train_loss).unwrap();
        assert!(last < first * 0.5, "loss {first} -> {last}");
    }

    #[test]
    fn first_step_moves_against_gradient() {
        // Single identity unit: ∂L/∂w = 2(w·x - y)·x < 0, ∂L/∂b = 2(w·x - y) < 0.
        let weights = Matrix::from_rows(vec![vec![0.5]]).unwrap();
        let mut network = Network {
            layers: vec![Layer::from_parameters(weights, Matrix::zeros(1, 1), ActivationFunction::Identity)],
        };
        let samples = vec![Sample { inputs: vec![2.0], target: 3.0 }];
        let mut adam = Adam::new(0.1);
        let config = TrainConfig { epochs: 1, batch_size: 1, shuffle: false, ..TrainConfig::default() };
        let history = train_loop(&mut network, &samples, &mut adam, &config, &mut StdRng::seed_from_u64(0)).unwrap();

        // Loss before the update: (1 - 3)² = 4. Gradient is negative, so w grows by lr.
        assert!((history[0].train_loss - 4.0).abs() < 1e-12);
        assert!((network.layers[0].weights.data[0][0] - 0.6).abs() < 1e-6);
        assert!((network.layers[0].biases.data[0][0] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn rejects_empty_training_split() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut network = Network::from_specs(&CHECKERS_TOPOLOGY, &mut rng);
        let err = train_loop(&mut network, &[], &mut Adam::new(0.001), &TrainConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::EmptySplit("train")));
    }
}

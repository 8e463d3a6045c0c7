use rand::Rng;

use crate::{layers::dense::Layer, math::matrix::Matrix, network::spec::LayerSpec};

#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

impl Network {
    /// Builds a freshly initialized network from layer specs (input → output).
    pub fn from_specs<R: Rng + ?Sized>(specs: &[LayerSpec], rng: &mut R) -> Network {
        let layers = specs.iter()
            .map(|spec| Layer::new(spec.size, spec.input_size, spec.activation, &mut *rng))
            .collect();
        Network { layers }
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = Matrix::row_vector(input.to_vec());
        for layer in &mut self.layers {
            current = layer.feed_from(&current).clone();
        }
        current.data.swap_remove(0)
    }

    /// Forward pass for inference only.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        let mut current = Matrix::row_vector(input.to_vec());
        for layer in &self.layers {
            current = layer.predict(&current);
        }
        current.data.swap_remove(0)
    }

    /// `(weights shape, bias length)` per layer.
    pub fn shapes(&self) -> Vec<((usize, usize), usize)> {
        self.layers.iter()
            .map(|layer| (layer.weights.shape(), layer.biases.cols))
            .collect()
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter()
            .map(|layer| layer.weights.rows * layer.weights.cols + layer.biases.cols)
            .sum()
    }
}

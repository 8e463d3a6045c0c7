use rand::Rng;

use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

/// Fully-connected layer: `a = f(x·W + b)` with `W` of shape
/// `input_size × size` and `b` a `1 × size` row.
#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction,
    pub neurons: Matrix,
    pre_neurons: Matrix, // z = xW + b, kept for the activation derivative
}

impl Layer {
    /// Glorot-uniform weights, zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        Layer::from_parameters(
            Matrix::glorot_uniform(input_size, size, rng),
            Matrix::zeros(1, size),
            activation,
        )
    }

    /// Wraps existing parameters; `weights.cols` must equal `biases.cols`.
    pub fn from_parameters(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        assert_eq!(weights.cols, biases.cols, "bias length must match layer size");
        assert_eq!(biases.rows, 1, "biases must be a single row");
        let size = weights.cols;
        Layer {
            size,
            weights,
            biases,
            activator: activation,
            neurons: Matrix::zeros(1, size),
            pre_neurons: Matrix::zeros(1, size),
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    fn linear(&self, input: &Matrix) -> Matrix {
        &(input * &self.weights) + &self.biases
    }

    /// Forward pass that records activations for the backward pass.
    pub fn feed_from(&mut self, input: &Matrix) -> &Matrix {
        let z = self.linear(input);
        self.neurons = z.map(|x| self.activator.function(x));
        self.pre_neurons = z;
        &self.neurons
    }

    /// Forward pass without touching the recorded activations.
    pub fn predict(&self, input: &Matrix) -> Matrix {
        self.linear(input).map(|x| self.activator.function(x))
    }

    /// Computes `(weights_grad, biases_grad)` for the last recorded forward pass.
    /// `next_layer_delta` is ∂L/∂a for this layer.
    pub fn compute_gradients(&self, next_layer_delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        let act_derivative = self.pre_neurons.map(|x| self.activator.derivative(x));
        // δ = ∂L/∂a ⊙ f'(z)
        let layer_delta = next_layer_delta.hadamard(&act_derivative);
        let weights_grad = &inputs.transpose() * &layer_delta;
        (weights_grad, layer_delta)
    }

    /// ∂L/∂x for the previous layer given this layer's bias gradient (δ).
    pub fn backpropagate(&self, layer_delta: &Matrix) -> Matrix {
        layer_delta * &self.weights.transpose()
    }
}

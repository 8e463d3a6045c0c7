use crate::{layers::dense::Layer, math::matrix::Matrix};

pub const DEFAULT_LEARNING_RATE: f64 = 0.001;

/// First and second moment estimates for one layer's parameters.
#[derive(Debug, Clone)]
struct Moments {
    m_weights: Matrix,
    v_weights: Matrix,
    m_biases: Matrix,
    v_biases: Matrix,
}

/// Adam with bias-corrected step size:
/// `lr_t = lr · sqrt(1 - β2^t) / (1 - β1^t)`, `p -= lr_t · m / (sqrt(v) + ε)`.
#[derive(Debug, Clone)]
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    t: u32,
    moments: Vec<Moments>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Adam {
        Adam {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            t: 0,
            moments: Vec::new(),
        }
    }

    /// Number of updates applied so far.
    pub fn steps(&self) -> u32 {
        self.t
    }

    /// Applies one update to every layer. `grads[i]` is `(weights_grad, biases_grad)`
    /// for `layers[i]`, already averaged over the batch.
    pub fn step(&mut self, layers: &mut [Layer], grads: &[(Matrix, Matrix)]) {
        assert_eq!(layers.len(), grads.len(), "one gradient pair per layer");

        if self.moments.len() != layers.len() {
            self.moments = layers.iter()
                .map(|layer| Moments {
                    m_weights: Matrix::zeros(layer.weights.rows, layer.weights.cols),
                    v_weights: Matrix::zeros(layer.weights.rows, layer.weights.cols),
                    m_biases: Matrix::zeros(1, layer.biases.cols),
                    v_biases: Matrix::zeros(1, layer.biases.cols),
                })
                .collect();
        }

        self.t += 1;
        let t = self.t as i32;
        let lr_t = self.learning_rate * (1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t));

        let (beta1, beta2, epsilon) = (self.beta1, self.beta2, self.epsilon);

        for ((layer, (w_grad, b_grad)), moments) in layers.iter_mut().zip(grads).zip(&mut self.moments) {
            adam_update(&mut layer.weights, w_grad, &mut moments.m_weights, &mut moments.v_weights, beta1, beta2, epsilon, lr_t);
            adam_update(&mut layer.biases, b_grad, &mut moments.m_biases, &mut moments.v_biases, beta1, beta2, epsilon, lr_t);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn adam_update(
    params: &mut Matrix,
    grads: &Matrix,
    m: &mut Matrix,
    v: &mut Matrix,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    lr_t: f64,
) {
    for (((p, &g), m), v) in params.iter_mut().zip(grads.iter()).zip(m.iter_mut()).zip(v.iter_mut()) {
        *m = beta1 * *m + (1.0 - beta1) * g;
        *v = beta2 * *v + (1.0 - beta2) * g * g;
        *p -= lr_t * *m / (v.sqrt() + epsilon);
    }
}

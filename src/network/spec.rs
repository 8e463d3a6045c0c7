use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;

/// Describes one dense layer.
///
/// - `size`       — number of units in this layer
/// - `input_size` — output size of the previous layer, or the raw input
///                  dimension for the first layer
/// - `activation` — applied after the linear transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

impl LayerSpec {
    pub const fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Self {
        LayerSpec { size, input_size, activation }
    }
}

/// Number of playable squares on a checkers board, one input feature each.
pub const BOARD_FEATURES: usize = 32;

/// The evaluator topology: 32 → 60 → 10 → 1, tanh everywhere so the output
/// stays in the same [-1, 1] range as the training targets.
pub const CHECKERS_TOPOLOGY: [LayerSpec; 3] = [
    LayerSpec::new(60, BOARD_FEATURES, ActivationFunction::Tanh),
    LayerSpec::new(10, 60, ActivationFunction::Tanh),
    LayerSpec::new(1, 10, ActivationFunction::Tanh),
];

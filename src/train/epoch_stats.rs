use serde::{Serialize, Deserialize};

/// Per-epoch training statistics returned by `train_loop`.
///
/// Loss and accuracy are accumulated during the pass from each sample's
/// prediction before its batch update, so they describe the epoch as it ran
/// rather than the weights at its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean MSE over all training samples in this epoch.
    pub train_loss: f64,
    /// Binary accuracy over the same samples, in [0, 1].
    pub train_accuracy: f64,
    pub elapsed_ms: u64,
}

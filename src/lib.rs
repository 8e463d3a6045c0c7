pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod export;
pub mod board;
pub mod pipeline;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, LayerSpec, CHECKERS_TOPOLOGY};
pub use loss::mse::MseLoss;
pub use optim::adam::Adam;
pub use train::{train_loop, evaluate, EpochStats, Evaluation, TrainConfig};
pub use data::{Dataset, Sample};
pub use export::{write_exports, ExportPaths, ModelArtifact};
pub use board::{Board, Piece};
pub use pipeline::{run, PipelineOptions, Report};

//! Load → train → evaluate → export, one stage after the other.

use std::path::PathBuf;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::samples::{Dataset, DEFAULT_TRAIN_FRACTION};
use crate::error::Result;
use crate::export::artifact::{ModelArtifact, DEFAULT_KING_VALUE};
use crate::export::writer::{write_exports, ExportPaths};
use crate::network::network::Network;
use crate::network::spec::CHECKERS_TOPOLOGY;
use crate::optim::adam::Adam;
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_loop;
use crate::train::metrics::{evaluate, Evaluation};
use crate::train::train_config::TrainConfig;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub samples: PathBuf,
    pub train_fraction: f64,
    pub train: TrainConfig,
    pub export: ExportPaths,
    /// Value stored in the artifact's `K` field.
    pub king_value: f64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            samples: PathBuf::from("data/samples.txt"),
            train_fraction: DEFAULT_TRAIN_FRACTION,
            train: TrainConfig::default(),
            export: ExportPaths::default(),
            king_value: DEFAULT_KING_VALUE,
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct Report {
    pub train_size: usize,
    pub test_size: usize,
    pub history: Vec<EpochStats>,
    pub evaluation: Evaluation,
    pub network: Network,
    pub written: Vec<PathBuf>,
}

pub fn run(options: &PipelineOptions) -> Result<Report> {
    let dataset = Dataset::load(&options.samples)?;
    let (train, test) = dataset.split(options.train_fraction);
    info!("training on {} samples, holding out {}", train.len(), test.len());

    let mut rng = match options.train.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut network = Network::from_specs(&CHECKERS_TOPOLOGY, &mut rng);
    info!("network 32-60-10-1 with {} parameters", network.parameter_count());

    let mut optimizer = Adam::new(options.train.learning_rate);
    let history = train_loop(&mut network, train, &mut optimizer, &options.train, &mut rng)?;

    let evaluation = evaluate(&network, test, options.train.batch_size)?;

    let json = ModelArtifact::from_network(&network, options.king_value).to_json()?;
    let written = write_exports(&json, &options.export)?;

    Ok(Report {
        train_size: train.len(),
        test_size: test.len(),
        history,
        evaluation,
        network,
        written,
    })
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use checkers_tutor::{
    data::DEFAULT_TRAIN_FRACTION,
    export::{DEFAULT_KING_VALUE, DEFAULT_SNAPSHOT_COUNT},
    optim::adam::DEFAULT_LEARNING_RATE,
    Board, ExportPaths, ModelArtifact, PipelineOptions, TrainConfig, CHECKERS_TOPOLOGY,
};

/// Trains the checkers position evaluator and exports it for the engine.
#[derive(Parser, Debug)]
#[command(name = "checkers-tutor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    train: TrainArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a board with an exported model.
    Evaluate {
        /// Exported model to load.
        #[arg(long, default_value = "data/model.json")]
        model: PathBuf,
        /// 32 squares: `.` empty, `w`/`b` men, `W`/`B` kings; `/` and spaces are ignored.
        board: String,
    },
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Training samples, one position per line.
    #[arg(long, default_value = "data/samples.txt")]
    samples: PathBuf,

    /// Canonical model export.
    #[arg(long, default_value = "data/model.json")]
    model: PathBuf,

    /// Directory for the numbered snapshot copies.
    #[arg(long, default_value = "data/current")]
    snapshot_dir: PathBuf,

    /// Number of snapshot copies.
    #[arg(long, default_value_t = DEFAULT_SNAPSHOT_COUNT)]
    snapshots: usize,

    #[arg(long, default_value_t = 10)]
    epochs: usize,

    #[arg(long, default_value_t = 128)]
    batch_size: usize,

    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// Leading share of the samples used for training; the rest is the test split.
    #[arg(long, default_value_t = DEFAULT_TRAIN_FRACTION)]
    train_fraction: f64,

    /// Seed for weight initialization and shuffling.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep file order within every epoch.
    #[arg(long)]
    no_shuffle: bool,
}

impl TrainArgs {
    fn into_options(self) -> PipelineOptions {
        PipelineOptions {
            samples: self.samples,
            train_fraction: self.train_fraction,
            train: TrainConfig {
                epochs: self.epochs,
                batch_size: self.batch_size,
                learning_rate: self.learning_rate,
                shuffle: !self.no_shuffle,
                seed: self.seed,
            },
            export: ExportPaths {
                model: self.model,
                snapshot_dir: self.snapshot_dir,
                snapshots: self.snapshots,
            },
            king_value: DEFAULT_KING_VALUE,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Evaluate { model, board }) => evaluate_board(&model, &board),
        None => train(cli.train),
    }
}

fn train(args: TrainArgs) -> Result<()> {
    let options = args.into_options();
    let report = checkers_tutor::run(&options)
        .with_context(|| format!("training from {} failed", options.samples.display()))?;

    info!("exported {} files", report.written.len());
    println!("Test loss: {}", report.evaluation.loss);
    println!("Test accuracy: {}", report.evaluation.accuracy);
    Ok(())
}

fn evaluate_board(model: &Path, board: &str) -> Result<()> {
    let artifact = ModelArtifact::load(model)
        .with_context(|| format!("cannot load model {}", model.display()))?;
    let network = artifact.to_network(&CHECKERS_TOPOLOGY)
        .with_context(|| format!("{} does not match the 32-60-10-1 topology", model.display()))?;
    let board: Board = board.parse().context("invalid board")?;

    println!("{}", board.evaluate(&network, artifact.k));
    Ok(())
}

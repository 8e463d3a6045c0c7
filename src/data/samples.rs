use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::network::spec::BOARD_FEATURES;

/// Values per line: board features followed by the target evaluation.
pub const SAMPLE_WIDTH: usize = BOARD_FEATURES + 1;

/// Share of the samples (taken from the top of the file) used for training.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// One encoded position and its target evaluation in [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub target: f64,
}

impl Sample {
    /// Target as a one-element label vector, the shape the network outputs.
    pub fn label(&self) -> [f64; 1] {
        [self.target]
    }
}

/// Parses one line of `samples.txt`.
///
/// Tokens are whitespace-separated and may use a comma as the decimal
/// separator (`0,5`). `line_no` is 1-based and only used in errors.
/// `nan` and `inf` parse as floats but are rejected like any other
/// non-number.
pub fn parse_sample(line: &str, line_no: usize) -> Result<Sample> {
    let mut values = line.split_whitespace()
        .map(|token| {
            token.replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| Error::ParseNumber { line: line_no, token: token.to_string() })
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != SAMPLE_WIDTH {
        return Err(Error::TokenCount { line: line_no, expected: SAMPLE_WIDTH, found: values.len() });
    }

    let target = values.pop().unwrap_or_default();
    Ok(Sample { inputs: values, target })
}

/// `floor(n · fraction)`, clamped to `n`.
pub fn train_size(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction) as usize).min(n)
}

/// Samples in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub samples: Vec<Sample>,
}

impl Dataset {
    /// Parses the whole text. Every line, blank ones included, must be a
    /// sample; only the final newline is optional.
    pub fn parse(text: &str) -> Result<Dataset> {
        let samples = text.lines()
            .enumerate()
            .map(|(i, line)| parse_sample(line, i + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Dataset { samples })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let dataset = Dataset::parse(&text)?;
        info!("loaded {} samples from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Splits into `(train, test)` without shuffling: the first
    /// `floor(len · fraction)` samples train, the rest test.
    pub fn split(&self, fraction: f64) -> (&[Sample], &[Sample]) {
        let n_train = train_size(self.len(), fraction);
        debug!("split {} samples into {} train / {} test", self.len(), n_train, self.len() - n_train);
        self.samples.split_at(n_train)
    }
}

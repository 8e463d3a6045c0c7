use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: token '{token}' is not a number")]
    ParseNumber { line: usize, token: String },

    #[error("line {line}: expected {expected} values, got {found}")]
    TokenCount { line: usize, expected: usize, found: usize },

    #[error("{0} split is empty")]
    EmptySplit(&'static str),

    #[error("row {row} has {found} values, expected {expected}")]
    RaggedMatrix { row: usize, expected: usize, found: usize },

    #[error("artifact has {found} layers, expected {expected}")]
    LayerCount { expected: usize, found: usize },

    #[error("layer {layer}: expected {expected_rows}×{expected_cols} (weights plus bias row), got {rows}×{cols}")]
    LayerShape {
        layer: usize,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{} is NaN or infinite", non_finite_location(.layer))]
    NonFinite { layer: Option<usize> },

    #[error("invalid training configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn non_finite_location(layer: &Option<usize>) -> String {
    match layer {
        Some(layer) => format!("a parameter of layer {layer}"),
        None => "the king value".to_string(),
    }
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

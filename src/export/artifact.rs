use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::ser::Formatter;

use crate::error::{Error, Result};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::spec::LayerSpec;

/// King value written to fresh exports; the engine encodes kings as ±K.
pub const DEFAULT_KING_VALUE: f64 = 2.0;

/// Exported weights as the game engine reads them.
///
/// Each entry of `weights` holds one layer: the `input_size` rows of its
/// weight matrix (each `size` long) followed by the bias vector as a final row.
/// Fields the engine adds on its own saves (e.g. mutation rates) are ignored
/// when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(rename = "K", serialize_with = "serialize_king_value")]
    pub k: f64,
    #[serde(rename = "Weights")]
    pub weights: Vec<Vec<Vec<f64>>>,
}

/// Writes integral values as JSON integers (`2`, not `2.0`).
fn serialize_king_value<S: Serializer>(k: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if k.fract() == 0.0 && k.abs() < (1u64 << 53) as f64 {
        serializer.serialize_i64(*k as i64)
    } else {
        serializer.serialize_f64(*k)
    }
}

/// Compact JSON with a space after `,` and `:`, the layout the engine's
/// existing model files use (`{"K": 2, "Weights": [[[0.1, -0.2], ...`).
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

impl ModelArtifact {
    pub fn from_network(network: &Network, k: f64) -> ModelArtifact {
        let weights = network.layers.iter()
            .map(|layer| {
                let mut rows = layer.weights.data.clone();
                rows.push(layer.biases.data[0].clone());
                rows
            })
            .collect();
        ModelArtifact { k, weights }
    }

    /// Rebuilds a network with the given topology, checking every layer's
    /// shape against its spec.
    pub fn to_network(&self, specs: &[LayerSpec]) -> Result<Network> {
        if self.weights.len() != specs.len() {
            return Err(Error::LayerCount { expected: specs.len(), found: self.weights.len() });
        }

        let layers = self.weights.iter()
            .zip(specs)
            .enumerate()
            .map(|(i, (rows, spec))| layer_from_rows(i, rows, spec))
            .collect::<Result<Vec<_>>>()?;
        Ok(Network { layers })
    }

    /// Serializes the artifact. NaN and infinite parameters have no JSON
    /// representation, so they are rejected instead of written as `null`.
    pub fn to_json(&self) -> Result<String> {
        if !self.k.is_finite() {
            return Err(Error::NonFinite { layer: None });
        }
        if let Some(layer) = self.weights.iter().position(|rows| rows.iter().flatten().any(|x| !x.is_finite())) {
            return Err(Error::NonFinite { layer: Some(layer) });
        }

        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut serializer)?;
        // serde_json only emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(json: &str) -> Result<ModelArtifact> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<ModelArtifact> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        ModelArtifact::from_json(&json)
    }
}

fn layer_from_rows(index: usize, rows: &[Vec<f64>], spec: &LayerSpec) -> Result<Layer> {
    let expected_rows = spec.input_size + 1;
    let shape_error = |cols: usize| Error::LayerShape {
        layer: index,
        expected_rows,
        expected_cols: spec.size,
        rows: rows.len(),
        cols,
    };

    if rows.len() != expected_rows {
        return Err(shape_error(rows.first().map_or(0, |r| r.len())));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != spec.size) {
        return Err(shape_error(row.len()));
    }

    let (weight_rows, bias_row) = rows.split_at(spec.input_size);
    let weights = Matrix::from_rows(weight_rows.to_vec())?;
    let biases = Matrix::row_vector(bias_row[0].clone());
    Ok(Layer::from_parameters(weights, biases, spec.activation))
}

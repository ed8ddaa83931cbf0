use crate::error::{InferenceError, LoadError};
use crate::image_classifier::interface::EmotionScores;
use crate::model_topology::topology::ModelTopology;
use std::path::Path;
use tract_onnx::prelude::*;

pub fn ensure_artifact(path: &Path) -> Result<(), LoadError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LoadError::MissingArtifact {
            path: path.to_path_buf(),
        })
    }
}

pub fn invalid_artifact(path: &Path, error: impl std::fmt::Display) -> LoadError {
    LoadError::InvalidArtifact {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}

fn concrete_shape(fact: &TypedFact) -> Vec<usize> {
    fact.shape
        .as_concrete()
        .map(|dims| dims.to_vec())
        .unwrap_or_default()
}

/// Checks the model's first input and output against the topology.
pub fn check_topology(
    path: &Path,
    model: &TypedModel,
    topology: &ModelTopology,
) -> Result<(), LoadError> {
    let input = model
        .input_fact(0)
        .map(concrete_shape)
        .map_err(|e| invalid_artifact(path, e))?;
    let output = model
        .output_fact(0)
        .map(concrete_shape)
        .map_err(|e| invalid_artifact(path, e))?;

    for (expected, actual) in [
        (topology.input_shape(), input),
        (topology.output_shape(), output),
    ] {
        if expected != actual {
            return Err(LoadError::TopologyMismatch {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }
    }

    Ok(())
}

pub fn scores_from_output(output: &Tensor) -> Result<EmotionScores, InferenceError> {
    let view = output
        .to_array_view::<f32>()
        .map_err(|e| InferenceError::Backend(e.to_string()))?;

    let values: Vec<f32> = view.iter().copied().collect();

    EmotionScores::from_output(&values)
}

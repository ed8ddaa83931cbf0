use std::path::PathBuf;
use thiserror::Error;

/// Failure to materialize a model artifact. Fatal for the handle being built.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("model artifact not found: {}", path.display())]
    MissingArtifact { path: PathBuf },

    #[error("failed to parse model artifact {}: {reason}", path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("model {} has shape {actual:?}, expected {expected:?}", path.display())]
    TopologyMismatch {
        path: PathBuf,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference failed: {0}")]
    Backend(String),

    #[error("model produced {actual} scores, expected {expected}")]
    OutputShape { expected: usize, actual: usize },

    #[error("classifier bindings poisoned by a panicked caller")]
    Poisoned,
}

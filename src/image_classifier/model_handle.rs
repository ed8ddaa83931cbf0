use crate::error::{InferenceError, LoadError};
use crate::image_classifier::impl_tract_onnx::EmotionClassifierTractOnnx;
use crate::image_classifier::impl_tract_tflite::EmotionClassifierTractTflite;
use crate::image_classifier::interface::{EmotionClassifier, EmotionScores};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::library::logger::interface::Logger;
use crate::region_preprocessor::face_tensor::FaceTensor;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which inference engine a handle wraps. Chosen once, when the handle is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Full ONNX graph and weights.
    FullModel,
    /// Compiled `.tflite` artifact next to the full model.
    Compiled,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::FullModel => f.write_str("full"),
            BackendKind::Compiled => f.write_str("compiled"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "onnx" => Ok(BackendKind::FullModel),
            "compiled" | "tflite" => Ok(BackendKind::Compiled),
            other => Err(format!("unknown backend '{}', expected full or compiled", other)),
        }
    }
}

/// A loaded classifier, built once at start-up and shared by reference with
/// every request path. Cloning shares the same loaded model.
#[derive(Clone)]
pub struct ModelHandle {
    kind: BackendKind,
    classifier: Arc<dyn EmotionClassifier + Send + Sync>,
}

impl ModelHandle {
    /// Loads the artifact for `kind`. A failure is final for this handle;
    /// whether to try the other backend is up to the caller.
    pub fn load(
        config: &ModelConfig,
        kind: BackendKind,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, LoadError> {
        let classifier: Arc<dyn EmotionClassifier + Send + Sync> = match kind {
            BackendKind::FullModel => Arc::new(EmotionClassifierTractOnnx::new(config, logger)?),
            BackendKind::Compiled => Arc::new(EmotionClassifierTractTflite::new(config, logger)?),
        };

        Ok(Self { kind, classifier })
    }

    pub fn from_classifier(
        kind: BackendKind,
        classifier: Arc<dyn EmotionClassifier + Send + Sync>,
    ) -> Self {
        Self { kind, classifier }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }
}

impl EmotionClassifier for ModelHandle {
    fn score(&self, tensor: FaceTensor) -> Result<EmotionScores, InferenceError> {
        self.classifier.score(tensor)
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

use crate::error::{InferenceError, LoadError};
use crate::image_classifier::interface::{EmotionClassifier, EmotionScores};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::model::{
    check_topology, ensure_artifact, invalid_artifact, scores_from_output,
};
use crate::library::logger::interface::Logger;
use crate::model_topology::topology::ModelTopology;
use crate::region_preprocessor::face_tensor::FaceTensor;
use std::sync::Arc;
use tract_onnx::prelude::*;

/// Full-model backend: parses the complete ONNX graph and weights and runs a
/// plain forward pass per call.
///
/// The runnable plan is immutable, so concurrent `score` calls need no locking.
pub struct EmotionClassifierTractOnnx {
    model: TypedRunnableModel<TypedModel>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl EmotionClassifierTractOnnx {
    pub fn new(
        config: &ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, LoadError> {
        let logger = logger.with_namespace("classifier").with_namespace("tract_onnx");
        let path = config.full_model_path.as_path();
        let topology = ModelTopology::emotion_cnn();

        ensure_artifact(path)?;

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact(FaceTensor::SHAPE).into()))
            .and_then(|model| model.into_optimized())
            .map_err(|e| invalid_artifact(path, e))?;

        check_topology(path, &model, &topology)?;

        let model = model
            .into_runnable()
            .map_err(|e| invalid_artifact(path, e))?;

        let _ = logger.info(&format!(
            "Loaded full model from {} ({:?} -> {:?})",
            path.display(),
            topology.input_shape(),
            topology.output_shape()
        ));

        Ok(Self { model, logger })
    }
}

impl EmotionClassifier for EmotionClassifierTractOnnx {
    fn score(&self, tensor: FaceTensor) -> Result<EmotionScores, InferenceError> {
        let outputs = self
            .model
            .run(tvec!(tensor.into_tensor().into_tvalue()))
            .map_err(|e| InferenceError::Backend(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::Backend("model produced no outputs".to_string()))?;
        let scores = scores_from_output(output)?;

        let _ = self.logger.debug(&format!("Scores: {:?}", scores.values()));

        Ok(scores)
    }
}

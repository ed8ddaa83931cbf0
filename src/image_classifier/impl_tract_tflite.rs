use crate::error::{InferenceError, LoadError};
use crate::image_classifier::interface::{EmotionClassifier, EmotionScores};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::tract::model::{
    check_topology, ensure_artifact, invalid_artifact, scores_from_output,
};
use crate::library::logger::interface::Logger;
use crate::model_topology::topology::ModelTopology;
use crate::region_preprocessor::face_tensor::FaceTensor;
use std::sync::{Arc, Mutex};
use tract_onnx::prelude::*;

type CompiledPlan = Arc<TypedSimplePlan<TypedModel>>;
type Interpreter = TypedFrozenSimpleState<TypedModel, CompiledPlan>;

fn backend_error(error: impl std::fmt::Display) -> InferenceError {
    InferenceError::Backend(error.to_string())
}

/// Compiled-graph backend: runs the `.tflite` export of the network.
///
/// The interpreter state (op states, constants, input binding) is allocated
/// once at load time. A call binds its tensor to input 0, invokes the plan and
/// reads the scores from output 0 of that same state. The state is not
/// reentrant, so calls take turns on the lock.
pub struct EmotionClassifierTractTflite {
    interpreter: Mutex<Interpreter>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl EmotionClassifierTractTflite {
    pub fn new(
        config: &ModelConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, LoadError> {
        let logger = logger.with_namespace("classifier").with_namespace("tract_tflite");
        let path = config.compiled_model_path();
        let topology = ModelTopology::emotion_cnn();

        ensure_artifact(&path)?;

        let model = tract_tflite::tflite()
            .model_for_path(&path)
            .and_then(|model| model.into_optimized())
            .map_err(|e| invalid_artifact(&path, e))?;

        check_topology(&path, &model, &topology)?;

        let plan: CompiledPlan = Arc::new(
            model
                .into_runnable()
                .map_err(|e| invalid_artifact(&path, e))?,
        );
        let interpreter: Interpreter = TypedSimpleState::<TypedModel, CompiledPlan>::new(plan)
            .map_err(|e| invalid_artifact(&path, e))?
            .freeze();

        let _ = logger.info(&format!(
            "Loaded compiled model from {} ({:?} -> {:?})",
            path.display(),
            topology.input_shape(),
            topology.output_shape()
        ));

        Ok(Self {
            interpreter: Mutex::new(interpreter),
            logger,
        })
    }
}

impl EmotionClassifier for EmotionClassifierTractTflite {
    fn score(&self, tensor: FaceTensor) -> Result<EmotionScores, InferenceError> {
        let mut interpreter = self.interpreter.lock().map_err(|_| InferenceError::Poisoned)?;
        let mut state = interpreter.unfreeze();

        state
            .set_input(0, tensor.into_tensor().into_tvalue())
            .map_err(backend_error)?;
        state.exec().map_err(backend_error)?;

        let scores = scores_from_output(state.output(0).map_err(backend_error)?)?;

        state.reset_turn().map_err(backend_error)?;
        *interpreter = state.freeze();

        let _ = self.logger.debug(&format!("Scores: {:?}", scores.values()));

        Ok(scores)
    }
}

use crate::config::Config;
use crate::emotion_pipeline::result::AnalysisResult;
use crate::error::{InferenceError, LoadError};
use crate::face_locator::impl_rustface::FaceLocatorRustface;
use crate::face_locator::interface::{FaceLocator, Frame};
use crate::image_classifier::interface::EmotionClassifier;
use crate::image_classifier::model_handle::ModelHandle;
use crate::library::logger::interface::Logger;
use crate::region_preprocessor::preprocess::RegionPreprocessor;
use std::sync::Arc;

/// Face location, preprocessing and classification for a single frame.
///
/// Holds no per-call state; one instance can serve concurrent callers.
pub struct EmotionPipeline {
    face_locator: Arc<dyn FaceLocator + Send + Sync>,
    preprocessor: RegionPreprocessor,
    model: ModelHandle,
    normalize_scores: bool,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl EmotionPipeline {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
        face_locator: Arc<dyn FaceLocator + Send + Sync>,
        model: ModelHandle,
    ) -> Self {
        Self {
            face_locator,
            preprocessor: RegionPreprocessor::new(config.preprocess.clone()),
            model,
            normalize_scores: config.normalize_scores,
            logger: logger.with_namespace("pipeline"),
        }
    }

    /// Builds the cascade locator and the configured backend from disk.
    pub fn load(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, LoadError> {
        let face_locator = FaceLocatorRustface::new(config.face_locator.clone(), logger.clone())?;
        let model = ModelHandle::load(&config.model, config.backend, logger.clone())?;

        Ok(Self::new(config, logger, Arc::new(face_locator), model))
    }

    /// Scores the first face the locator reports. A frame without faces is
    /// not an error: it yields [`AnalysisResult::no_face`].
    pub fn analyze(&self, frame: &Frame) -> Result<AnalysisResult, InferenceError> {
        let faces = self.face_locator.locate(frame);

        let Some(face) = faces.first() else {
            let _ = self.logger.debug("No face found, reporting neutral");
            return Ok(AnalysisResult::no_face());
        };

        let tensor = self.preprocessor.preprocess(frame, face);

        let mut scores = self.model.score(tensor)?;
        if self.normalize_scores {
            scores = scores.normalized();
        }

        let result = AnalysisResult::from_scores(&scores);

        let _ = self.logger.debug(&format!(
            "{} face(s), using {:?}: {} ({:.2})",
            faces.len(),
            face,
            result.emotion,
            result.confidence
        ));

        Ok(result)
    }
}

use crate::error::InferenceError;
use crate::image_classifier::interface::{EmotionClassifier, EmotionScores};
use crate::region_preprocessor::face_tensor::FaceTensor;
use rand::distr::{Distribution, Uniform};
use std::sync::Mutex;

/// Classifier stand-in. Returns fixed scores, or uniform random ones when
/// none are given, and keeps every tensor it was asked to score.
pub struct EmotionClassifierFake {
    scores: Option<EmotionScores>,
    received: Mutex<Vec<FaceTensor>>,
}

impl EmotionClassifierFake {
    pub fn new(scores: EmotionScores) -> Self {
        Self {
            scores: Some(scores),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn random() -> Self {
        Self {
            scores: None,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<FaceTensor> {
        match self.received.lock() {
            Ok(received) => received.clone(),
            Err(_) => Vec::new(),
        }
    }

    fn random_scores() -> Result<EmotionScores, InferenceError> {
        let mut rng = rand::rng();

        let confidence_dist =
            Uniform::new(0.0f32, 1.0).map_err(|e| InferenceError::Backend(e.to_string()))?;

        let mut values = [0.0f32; 7];
        for value in values.iter_mut() {
            *value = confidence_dist.sample(&mut rng);
        }

        Ok(EmotionScores::new(values))
    }
}

impl EmotionClassifier for EmotionClassifierFake {
    fn score(&self, tensor: FaceTensor) -> Result<EmotionScores, InferenceError> {
        self.received
            .lock()
            .map_err(|_| InferenceError::Poisoned)?
            .push(tensor);

        match self.scores {
            Some(scores) => Ok(scores),
            None => Self::random_scores(),
        }
    }
}

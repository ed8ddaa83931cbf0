use crate::error::InferenceError;
use crate::region_preprocessor::face_tensor::FaceTensor;
use serde::Serialize;
use std::fmt;

/// The seven classes, in the order the model emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Neutral,
    Sad,
    Surprise,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Neutral,
        Emotion::Sad,
        Emotion::Surprise,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw per-class output of a classifier, aligned with [`Emotion::ALL`].
///
/// Values are kept exactly as the backend produced them; nothing here forces
/// them to sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionScores([f32; 7]);

impl EmotionScores {
    pub fn new(values: [f32; 7]) -> Self {
        Self(values)
    }

    /// Builds scores from a flattened output tensor of a single batch element.
    pub fn from_output(values: &[f32]) -> Result<Self, InferenceError> {
        let values: [f32; 7] = values
            .try_into()
            .map_err(|_| InferenceError::OutputShape {
                expected: Emotion::ALL.len(),
                actual: values.len(),
            })?;

        Ok(Self(values))
    }

    pub fn get(&self, emotion: Emotion) -> f32 {
        self.0[emotion.index()]
    }

    pub fn values(&self) -> &[f32; 7] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        Emotion::ALL.iter().copied().zip(self.0.iter().copied())
    }

    /// Highest-scoring emotion. Ties go to the earlier class.
    ///
    /// NaN ranks above every number, so the first NaN score wins.
    pub fn argmax(&self) -> Emotion {
        let mut best = 0;
        for (i, value) in self.0.iter().enumerate().skip(1) {
            if self.0[best].is_nan() {
                break;
            }
            if value.is_nan() || *value > self.0[best] {
                best = i;
            }
        }
        Emotion::ALL[best]
    }

    /// Scales the scores to sum to one. Returned unchanged when the sum is not positive.
    pub fn normalized(&self) -> Self {
        let sum: f32 = self.0.iter().sum();
        if !sum.is_finite() || sum <= 0.0 {
            return *self;
        }
        Self(self.0.map(|value| value / sum))
    }
}

pub trait EmotionClassifier {
    /// Runs the network on one face. Consumes the tensor.
    fn score(&self, tensor: FaceTensor) -> Result<EmotionScores, InferenceError>;
}

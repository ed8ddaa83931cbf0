use crate::image_classifier::interface::{Emotion, EmotionScores};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of one `analyze` call, shaped `{emotion, confidence, all_emotions}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub emotion: Emotion,
    pub confidence: f32,
    pub all_emotions: BTreeMap<Emotion, f32>,
}

impl AnalysisResult {
    /// Reading reported when the frame holds no face: neutral, zero everywhere.
    pub fn no_face() -> Self {
        Self {
            emotion: Emotion::Neutral,
            confidence: 0.0,
            all_emotions: Emotion::ALL.iter().map(|e| (*e, 0.0)).collect(),
        }
    }

    pub fn from_scores(scores: &EmotionScores) -> Self {
        let emotion = scores.argmax();

        Self {
            emotion,
            confidence: scores.get(emotion),
            all_emotions: scores.iter().collect(),
        }
    }

    /// Copy with every confidence rounded to `decimals` places, for transmission.
    ///
    /// Halfway cases go to the even digit, judged on the stored value, so
    /// `0.125` becomes `0.12` while `0.135` (stored slightly above) becomes
    /// `0.14`. Scaling an `f32` by up to `10^8` is exact in `f64`, so the tie
    /// test sees the true value.
    pub fn rounded(&self, decimals: i32) -> Self {
        let factor = 10f64.powi(decimals);
        let round = |value: f32| ((value as f64 * factor).round_ties_even() / factor) as f32;

        Self {
            emotion: self.emotion,
            confidence: round(self.confidence),
            all_emotions: self
                .all_emotions
                .iter()
                .map(|(emotion, value)| (*emotion, round(*value)))
                .collect(),
        }
    }
}

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub full_model_path: PathBuf,
}

impl ModelConfig {
    pub fn new(full_model_path: impl Into<PathBuf>) -> Self {
        Self {
            full_model_path: full_model_path.into(),
        }
    }

    /// The compiled artifact sits next to the full model with a `.tflite` extension.
    pub fn compiled_model_path(&self) -> PathBuf {
        self.full_model_path.with_extension("tflite")
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new("models/emotion_model.onnx")
    }
}

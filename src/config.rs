use crate::image_classifier::model_handle::BackendKind;
use crate::image_classifier::models::model_config::ModelConfig;
use chrono::Offset;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct FaceLocatorConfig {
    pub model_path: PathBuf,
    /// Growth between pyramid levels.
    pub scale_factor: f32,
    pub min_face_size: u32,
    pub slide_window_step: u32,
}

impl Default for FaceLocatorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/seeta_fd_frontal_v1.0.bin"),
            scale_factor: 1.1,
            min_face_size: 48,
            slide_window_step: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessConfig {
    /// Fraction of the box width added on every side before cropping.
    pub padding_ratio: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { padding_ratio: 0.1 }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub log_debug: bool,
    pub model: ModelConfig,
    pub backend: BackendKind,
    pub face_locator: FaceLocatorConfig,
    pub preprocess: PreprocessConfig,
    pub normalize_scores: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: chrono::Utc.fix(),
            log_debug: false,
            model: ModelConfig::default(),
            backend: BackendKind::Compiled,
            face_locator: FaceLocatorConfig::default(),
            preprocess: PreprocessConfig::default(),
            normalize_scores: false,
        }
    }
}

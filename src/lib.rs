//! Facial emotion classification for single frames.
//!
//! [`emotion_pipeline::pipeline::EmotionPipeline`] finds a face with a
//! classical cascade detector, crops and normalizes it to a 48x48 grayscale
//! tensor, scores it with one of two tract backends (full ONNX graph or
//! compiled `.tflite`) and reports the dominant emotion with per-class scores.

pub mod config;
pub mod emotion_pipeline;
pub mod error;
pub mod face_locator;
pub mod image_classifier;
pub mod library;
pub mod model_topology;
pub mod region_preprocessor;

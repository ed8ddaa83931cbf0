use clap::{ArgAction, Parser};
use emotion_detector::image_classifier::model_handle::BackendKind;
use std::path::PathBuf;

/// Classify the dominant facial emotion in an image.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Image to analyze.
    #[arg(required_unless_present = "summary")]
    pub image: Option<PathBuf>,

    /// Full ONNX model. The compiled backend reads the `.tflite` file beside it.
    #[arg(short, long, default_value = "models/emotion_model.onnx")]
    pub model: PathBuf,

    /// SeetaFace cascade used to locate faces.
    #[arg(long, default_value = "models/seeta_fd_frontal_v1.0.bin")]
    pub face_model: PathBuf,

    /// Inference backend: `compiled` (tflite) or `full` (onnx).
    #[arg(short, long, default_value = "compiled")]
    pub backend: BackendKind,

    /// Try the full model when the compiled one cannot be loaded.
    #[arg(long, action = ArgAction::SetTrue)]
    pub fallback: bool,

    /// Divide scores by their sum before reporting.
    #[arg(long, action = ArgAction::SetTrue)]
    pub normalize: bool,

    /// Time this many `analyze` calls after one warm-up call.
    #[arg(long, default_value_t = 0)]
    pub bench: usize,

    /// Print the network layer summary and exit.
    #[arg(long, action = ArgAction::SetTrue)]
    pub summary: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

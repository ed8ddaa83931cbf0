use args::Args;
use clap::Parser;
use emotion_detector::config::Config;
use emotion_detector::emotion_pipeline::pipeline::EmotionPipeline;
use emotion_detector::error::LoadError;
use emotion_detector::face_locator::impl_rustface::FaceLocatorRustface;
use emotion_detector::face_locator::interface::Frame;
use emotion_detector::image_classifier::model_handle::{BackendKind, ModelHandle};
use emotion_detector::library::logger::impl_console::LoggerConsole;
use emotion_detector::library::logger::interface::Logger;
use emotion_detector::model_topology::topology::ModelTopology;
use std::sync::Arc;
use std::time::Instant;

mod args;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    if args.summary {
        println!("{}", ModelTopology::emotion_cnn());
        return Ok(());
    }

    let mut config = Config::default();
    config.log_debug = args.verbose;
    config.model.full_model_path = args.model.clone();
    config.face_locator.model_path = args.face_model.clone();
    config.backend = args.backend;
    config.normalize_scores = args.normalize;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone).with_debug(config.log_debug));

    let Some(image_path) = args.image.as_ref() else {
        return Err("an image path is required".into());
    };
    let frame = image::open(image_path)?.to_rgb8();

    let face_locator = FaceLocatorRustface::new(config.face_locator.clone(), logger.clone())?;
    let model = load_model(&config, args.fallback, logger.clone())?;
    logger.info(&format!("Using {} backend", model.kind()))?;

    let pipeline = EmotionPipeline::new(&config, logger.clone(), Arc::new(face_locator), model);

    if args.bench > 0 {
        benchmark(&pipeline, &frame, args.bench, logger.as_ref())?;
    }

    let result = pipeline.analyze(&frame)?;
    println!("{}", serde_json::to_string_pretty(&result.rounded(2))?);

    Ok(())
}

/// Loads the configured backend. With `fallback`, a compiled model that fails
/// to load is replaced by the full model.
fn load_model(
    config: &Config,
    fallback: bool,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<ModelHandle, LoadError> {
    match ModelHandle::load(&config.model, config.backend, logger.clone()) {
        Ok(handle) => Ok(handle),
        Err(e) if fallback && config.backend == BackendKind::Compiled => {
            let _ = logger.info(&format!("{}, falling back to full model", e));
            ModelHandle::load(&config.model, BackendKind::FullModel, logger)
        }
        Err(e) => Err(e),
    }
}

fn benchmark(
    pipeline: &EmotionPipeline,
    frame: &Frame,
    runs: usize,
    logger: &dyn Logger,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let warm_up = Instant::now();
    pipeline.analyze(frame)?;
    logger.info(&format!(
        "Warm-up call took {:.1}ms",
        warm_up.elapsed().as_secs_f64() * 1000.0
    ))?;

    let mut total_ms = 0.0;
    for _ in 0..runs {
        let start = Instant::now();
        pipeline.analyze(frame)?;
        total_ms += start.elapsed().as_secs_f64() * 1000.0;
    }

    logger.info(&format!(
        "Average over {} runs: {:.1}ms",
        runs,
        total_ms / runs as f64
    ))?;

    Ok(())
}

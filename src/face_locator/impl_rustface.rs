use crate::config::FaceLocatorConfig;
use crate::error::LoadError;
use crate::face_locator::interface::{retain_candidates, BoundingBox, FaceLocator, Frame};
use crate::library::grayscale::luma;
use crate::library::logger::interface::Logger;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

/// Final-stage cascade score a window must reach to count as a face.
const SCORE_THRESHOLD: f64 = 2.0;

/// Face locator backed by the SeetaFace funnel cascade from `rustface`.
///
/// The model is read once; every call builds a throwaway detector from a clone
/// of it, so `locate` needs only `&self` and can be shared across threads.
pub struct FaceLocatorRustface {
    model: rustface::Model,
    config: FaceLocatorConfig,
}

impl FaceLocatorRustface {
    pub fn new(
        config: FaceLocatorConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, LoadError> {
        let logger = logger.with_namespace("face_locator").with_namespace("rustface");
        let path = config.model_path.clone();

        if !path.is_file() {
            return Err(LoadError::MissingArtifact { path });
        }

        let file = File::open(&path).map_err(|e| LoadError::InvalidArtifact {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let model =
            rustface::read_model(BufReader::new(file)).map_err(|e| LoadError::InvalidArtifact {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let _ = logger.info(&format!(
            "Loaded face cascade from {} (scale factor {}, min face {}px)",
            path.display(),
            config.scale_factor,
            config.min_face_size
        ));

        Ok(Self { model, config })
    }
}

impl FaceLocator for FaceLocatorRustface {
    fn locate(&self, frame: &Frame) -> Vec<BoundingBox> {
        let (width, height) = frame.dimensions();
        if width < self.config.min_face_size || height < self.config.min_face_size {
            return Vec::new();
        }

        let gray = luma(frame);

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.config.min_face_size);
        detector.set_score_thresh(SCORE_THRESHOLD);
        detector.set_pyramid_scale_factor(1.0 / self.config.scale_factor);
        detector.set_slide_window_step(
            self.config.slide_window_step,
            self.config.slide_window_step,
        );

        let faces = detector.detect(&rustface::ImageData::new(gray.as_raw(), width, height));

        let boxes = faces.iter().map(|face| {
            let bbox = face.bbox();
            BoundingBox::new(bbox.x(), bbox.y(), bbox.width(), bbox.height())
        });

        retain_candidates(boxes, width, height, self.config.min_face_size)
    }
}

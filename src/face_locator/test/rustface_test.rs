use crate::config::FaceLocatorConfig;
use crate::error::LoadError;
use crate::face_locator::impl_rustface::FaceLocatorRustface;
use crate::face_locator::interface::FaceLocator;
use crate::face_locator::test::fixture::{Fixture, FRONT_FACE_IMAGE_PATH};
use crate::library::logger::impl_console::LoggerConsole;
use chrono::Offset;
use image::RgbImage;
use std::sync::Arc;

#[test]
fn test_missing_cascade_is_load_error() {
    let logger = Arc::new(LoggerConsole::new(chrono::Utc.fix()));
    let config = FaceLocatorConfig {
        model_path: "./models/does_not_exist.bin".into(),
        ..FaceLocatorConfig::default()
    };

    let result = FaceLocatorRustface::new(config, logger);

    assert!(matches!(result, Err(LoadError::MissingArtifact { .. })));
}

#[test]
#[ignore = "needs models/seeta_fd_frontal_v1.0.bin"]
fn test_black_frame_has_no_faces() {
    let f = Fixture::new();
    let frame = RgbImage::new(640, 480);

    assert!(f.face_locator.locate(&frame).is_empty());
}

#[test]
#[ignore = "needs models/seeta_fd_frontal_v1.0.bin"]
fn test_tiny_frame_has_no_faces() {
    let f = Fixture::new();
    let frame = RgbImage::new(30, 30);

    assert!(f.face_locator.locate(&frame).is_empty());
}

#[test]
#[ignore = "needs models/seeta_fd_frontal_v1.0.bin and models/fixtures/face_front.jpg"]
fn test_front_face_is_found() {
    let f = Fixture::new();
    let frame = image::open(FRONT_FACE_IMAGE_PATH).unwrap().to_rgb8();

    let boxes = f.face_locator.locate(&frame);

    assert_eq!(boxes.len(), 1);
    assert!(boxes[0].width > 48);
    assert!(boxes[0].height > 48);
}

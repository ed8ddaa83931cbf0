use crate::error::LoadError;
use crate::image_classifier::impl_fake::EmotionClassifierFake;
use crate::image_classifier::interface::{Emotion, EmotionClassifier, EmotionScores};
use crate::image_classifier::model_handle::{BackendKind, ModelHandle};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_classifier::test::fixture::Fixture;
use std::path::PathBuf;
use std::sync::Arc;

#[test]
fn test_missing_full_model_is_load_error() {
    let f = Fixture::missing_model();

    let result = ModelHandle::load(&f.model_config, BackendKind::FullModel, f.logger.clone());

    match result {
        Err(LoadError::MissingArtifact { path }) => {
            assert_eq!(path, PathBuf::from("./models/does_not_exist.onnx"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_missing_compiled_model_is_load_error() {
    let f = Fixture::missing_model();

    let result = ModelHandle::load(&f.model_config, BackendKind::Compiled, f.logger.clone());

    match result {
        Err(LoadError::MissingArtifact { path }) => {
            assert_eq!(path, PathBuf::from("./models/does_not_exist.tflite"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_unparsable_model_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.onnx");
    std::fs::write(&path, b"definitely not a protobuf graph").unwrap();

    let f = Fixture {
        model_config: ModelConfig::new(&path),
        ..Fixture::new()
    };

    let result = ModelHandle::load(&f.model_config, BackendKind::FullModel, f.logger.clone());

    assert!(matches!(result, Err(LoadError::InvalidArtifact { .. })));
}

#[test]
fn test_backend_kind_parse() {
    assert_eq!("full".parse::<BackendKind>(), Ok(BackendKind::FullModel));
    assert_eq!("TFLite".parse::<BackendKind>(), Ok(BackendKind::Compiled));
    assert_eq!("compiled".parse::<BackendKind>(), Ok(BackendKind::Compiled));
    assert!("gpu".parse::<BackendKind>().is_err());
}

#[test]
fn test_handle_delegates_to_classifier() {
    let scores = EmotionScores::new([0.1, 0.0, 0.0, 0.0, 0.0, 0.9, 0.0]);
    let fake = Arc::new(EmotionClassifierFake::new(scores));
    let handle = ModelHandle::from_classifier(BackendKind::Compiled, fake.clone());

    let result = handle.score(Fixture::face_tensor()).unwrap();

    assert_eq!(result, scores);
    assert_eq!(result.argmax(), Emotion::Sad);
    assert_eq!(fake.received(), vec![Fixture::face_tensor()]);
    assert_eq!(handle.kind(), BackendKind::Compiled);
}

#[test]
fn test_cloned_handles_share_classifier() {
    let fake = Arc::new(EmotionClassifierFake::random());
    let handle = ModelHandle::from_classifier(BackendKind::FullModel, fake.clone());
    let clone = handle.clone();

    handle.score(Fixture::face_tensor()).unwrap();
    clone.score(Fixture::face_tensor()).unwrap();

    assert_eq!(fake.received().len(), 2);
}

#[test]
fn test_handle_shared_across_threads() {
    let fake = Arc::new(EmotionClassifierFake::random());
    let handle = ModelHandle::from_classifier(BackendKind::FullModel, fake.clone());

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            std::thread::spawn(move || {
                for _ in 0..5 {
                    let scores = handle.score(Fixture::face_tensor()).unwrap();
                    assert!(scores.values().iter().all(|v| (0.0..1.0).contains(v)));
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(fake.received().len(), 20);
}

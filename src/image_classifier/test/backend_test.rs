use crate::error::LoadError;
use crate::image_classifier::impl_tract_onnx::EmotionClassifierTractOnnx;
use crate::image_classifier::impl_tract_tflite::EmotionClassifierTractTflite;
use crate::image_classifier::interface::{Emotion, EmotionClassifier, EmotionScores};
use crate::image_classifier::model_handle::{BackendKind, ModelHandle};
use crate::image_classifier::test::fixture::Fixture;
use std::sync::Arc;

const QUANTIZATION_TOLERANCE: f32 = 0.05;

fn assert_probabilities(scores: &EmotionScores) {
    let sum: f32 = scores.values().iter().sum();
    assert!((sum - 1.0).abs() < 1e-3, "{:?}", scores);
    assert!(scores.values().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_full_model_loads_and_scores() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 7);

    let classifier = EmotionClassifierTractOnnx::new(&f.model_config, f.logger.clone()).unwrap();
    let scores = classifier.score(Fixture::face_tensor()).unwrap();

    assert_eq!(scores.values().len(), 7);
    assert_probabilities(&scores);
    assert_eq!(scores.argmax(), Emotion::Surprise);
}

#[test]
fn test_compiled_model_loads_and_scores() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 7);

    let classifier =
        EmotionClassifierTractTflite::new(&f.model_config, f.logger.clone()).unwrap();
    let scores = classifier.score(Fixture::face_tensor()).unwrap();

    assert_eq!(scores.values().len(), 7);
    assert_probabilities(&scores);
    assert_eq!(scores.argmax(), Emotion::Surprise);
}

#[test]
fn test_black_face_scores_uniform() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 7);

    let full = EmotionClassifierTractOnnx::new(&f.model_config, f.logger.clone()).unwrap();
    let compiled = EmotionClassifierTractTflite::new(&f.model_config, f.logger.clone()).unwrap();

    for scores in [
        full.score(Fixture::black_tensor()).unwrap(),
        compiled.score(Fixture::black_tensor()).unwrap(),
    ] {
        assert!(scores.values().iter().all(|v| (v - 1.0 / 7.0).abs() < 1e-5));
    }
}

#[test]
fn test_generated_backends_agree() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 7);

    let full = EmotionClassifierTractOnnx::new(&f.model_config, f.logger.clone()).unwrap();
    let compiled = EmotionClassifierTractTflite::new(&f.model_config, f.logger.clone()).unwrap();

    let a = full.score(Fixture::face_tensor()).unwrap();
    let b = compiled.score(Fixture::face_tensor()).unwrap();

    for (x, y) in a.values().iter().zip(b.values()) {
        assert!((x - y).abs() < 1e-4, "{:?} vs {:?}", a, b);
    }
    assert_eq!(a.argmax(), b.argmax());
}

#[test]
fn test_full_model_with_wrong_output_is_topology_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 5);

    let result = EmotionClassifierTractOnnx::new(&f.model_config, f.logger.clone());

    match result {
        Err(LoadError::TopologyMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, vec![1, 7]);
            assert_eq!(actual, vec![1, 5]);
        }
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("model with 5 outputs was accepted"),
    }
}

#[test]
fn test_compiled_model_with_wrong_output_is_topology_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 5);

    let result = EmotionClassifierTractTflite::new(&f.model_config, f.logger.clone());

    match result {
        Err(LoadError::TopologyMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, vec![1, 7]);
            assert_eq!(actual, vec![1, 5]);
        }
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("model with 5 outputs was accepted"),
    }
}

#[test]
fn test_compiled_model_rebinds_input_each_call() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 7);
    let compiled = EmotionClassifierTractTflite::new(&f.model_config, f.logger.clone()).unwrap();

    let face = compiled.score(Fixture::face_tensor()).unwrap();
    let black = compiled.score(Fixture::black_tensor()).unwrap();
    let face_again = compiled.score(Fixture::face_tensor()).unwrap();

    assert_ne!(face, black);
    assert_eq!(face, face_again);
}

#[test]
fn test_compiled_model_concurrent_calls_match() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 7);
    let compiled = Arc::new(
        EmotionClassifierTractTflite::new(&f.model_config, f.logger.clone()).unwrap(),
    );
    let expected = compiled.score(Fixture::face_tensor()).unwrap();

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let compiled = compiled.clone();
            std::thread::spawn(move || {
                let tensor = if i % 2 == 0 {
                    Fixture::face_tensor()
                } else {
                    Fixture::black_tensor()
                };
                (i, compiled.score(tensor).unwrap())
            })
        })
        .collect();

    for worker in workers {
        let (i, scores) = worker.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(scores, expected);
        } else {
            assert_eq!(scores.argmax(), Emotion::Angry);
        }
    }
}

#[test]
fn test_model_handle_loads_both_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let f = Fixture::with_generated_models(dir.path(), 7);

    for kind in [BackendKind::FullModel, BackendKind::Compiled] {
        let handle = ModelHandle::load(&f.model_config, kind, f.logger.clone()).unwrap();

        assert_eq!(handle.kind(), kind);
        assert_eq!(
            handle.score(Fixture::face_tensor()).unwrap().argmax(),
            Emotion::Surprise
        );
    }
}

#[test]
#[ignore = "needs models/emotion_model.onnx"]
fn test_full_model_outputs_probabilities() {
    let f = Fixture::new();
    let classifier = EmotionClassifierTractOnnx::new(&f.model_config, f.logger.clone()).unwrap();

    let scores = classifier.score(Fixture::face_tensor()).unwrap();

    assert_probabilities(&scores);
}

#[test]
#[ignore = "needs models/emotion_model.onnx and models/emotion_model.tflite"]
fn test_backends_agree_within_tolerance() {
    let f = Fixture::new();
    let full = EmotionClassifierTractOnnx::new(&f.model_config, f.logger.clone()).unwrap();
    let compiled = EmotionClassifierTractTflite::new(&f.model_config, f.logger.clone()).unwrap();

    let a = full.score(Fixture::face_tensor()).unwrap();
    let b = compiled.score(Fixture::face_tensor()).unwrap();

    for (x, y) in a.values().iter().zip(b.values()) {
        assert!((x - y).abs() < QUANTIZATION_TOLERANCE, "{:?} vs {:?}", a, b);
    }
    assert_eq!(a.argmax(), b.argmax());
}

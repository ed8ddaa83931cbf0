pub mod face_tensor;
pub mod preprocess;

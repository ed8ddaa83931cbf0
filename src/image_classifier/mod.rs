pub mod impl_fake;
pub mod impl_tract_onnx;
pub mod impl_tract_tflite;
pub mod interface;
pub mod model_handle;
pub mod models;
pub mod tract;

#[cfg(test)]
mod test;

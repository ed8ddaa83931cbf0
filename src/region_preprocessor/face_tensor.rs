use image::GrayImage;
use tract_onnx::prelude::*;

/// Side length of the square face crop the classifier consumes.
pub const FACE_SIZE: u32 = 48;

/// A normalized face crop laid out as NHWC `(1, 48, 48, 1)` with values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTensor(tract_ndarray::Array4<f32>);

impl FaceTensor {
    pub const SHAPE: [usize; 4] = [1, FACE_SIZE as usize, FACE_SIZE as usize, 1];

    /// # Panics
    ///
    /// Panics if `image` is not `FACE_SIZE` x `FACE_SIZE`.
    pub fn from_gray(image: &GrayImage) -> Self {
        assert_eq!(
            image.dimensions(),
            (FACE_SIZE, FACE_SIZE),
            "face crop must be resized before tensor conversion"
        );

        let array = tract_ndarray::Array4::from_shape_fn(Self::SHAPE, |(_, y, x, _)| {
            image.get_pixel(x as u32, y as u32)[0] as f32 / 255.0
        });

        Self(array)
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }

    pub fn into_tensor(self) -> Tensor {
        self.0.into_tensor()
    }
}

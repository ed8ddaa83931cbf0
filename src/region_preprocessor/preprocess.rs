use crate::config::PreprocessConfig;
use crate::face_locator::interface::{BoundingBox, Frame};
use crate::library::grayscale::luma;
use crate::region_preprocessor::face_tensor::{FaceTensor, FACE_SIZE};
use image::imageops::{self, FilterType};

/// Clamped crop rectangle, always non-empty and inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Grows `bbox` by `padding_ratio` of its width on all four sides, then clamps
/// to the frame. `None` when nothing of the padded box is left inside the frame.
pub fn padded_region(
    bbox: &BoundingBox,
    frame_width: u32,
    frame_height: u32,
    padding_ratio: f32,
) -> Option<CropRegion> {
    let padding = (padding_ratio * bbox.width as f32) as i64;

    let x1 = (bbox.x as i64 - padding).max(0);
    let y1 = (bbox.y as i64 - padding).max(0);
    let x2 = (bbox.right() + padding).min(frame_width as i64);
    let y2 = (bbox.bottom() + padding).min(frame_height as i64);

    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    Some(CropRegion {
        x: x1 as u32,
        y: y1 as u32,
        width: (x2 - x1) as u32,
        height: (y2 - y1) as u32,
    })
}

#[derive(Debug, Clone, Default)]
pub struct RegionPreprocessor {
    config: PreprocessConfig,
}

impl RegionPreprocessor {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    /// Crops the padded face region, converts it to Rec.601 luma, resizes it to
    /// 48x48 and scales pixels into `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics when the padded box has no area inside the frame. Boxes from a
    /// `FaceLocator` always overlap the frame, so this is a caller bug.
    pub fn preprocess(&self, frame: &Frame, bbox: &BoundingBox) -> FaceTensor {
        let (frame_width, frame_height) = frame.dimensions();

        let Some(region) =
            padded_region(bbox, frame_width, frame_height, self.config.padding_ratio)
        else {
            panic!(
                "degenerate face region {:?} for {}x{} frame",
                bbox, frame_width, frame_height
            );
        };

        let crop =
            imageops::crop_imm(frame, region.x, region.y, region.width, region.height).to_image();
        let gray = luma(&crop);
        let resized = imageops::resize(&gray, FACE_SIZE, FACE_SIZE, FilterType::Triangle);

        FaceTensor::from_gray(&resized)
    }
}

use image::RgbImage;

/// A decoded 3-channel color frame. Owned by the caller, read-only here.
pub type Frame = RgbImage;

/// Axis-aligned candidate face region in frame pixel coordinates.
///
/// `x` and `y` are signed because detectors may report boxes that start
/// slightly outside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }

    /// True when at least one pixel of the box lies inside a `width` x `height` frame.
    pub fn intersects_frame(&self, width: u32, height: u32) -> bool {
        self.right() > 0
            && self.bottom() > 0
            && (self.x as i64) < width as i64
            && (self.y as i64) < height as i64
    }
}

pub trait FaceLocator {
    /// Candidate face regions, in detector order. Empty when no face is found.
    fn locate(&self, frame: &Frame) -> Vec<BoundingBox>;
}

/// Keeps boxes in order, dropping any that are too small, miss the frame,
/// or overlap a box already kept.
pub fn retain_candidates(
    boxes: impl IntoIterator<Item = BoundingBox>,
    frame_width: u32,
    frame_height: u32,
    min_face_size: u32,
) -> Vec<BoundingBox> {
    let mut kept: Vec<BoundingBox> = Vec::new();

    for candidate in boxes {
        if candidate.width < min_face_size || candidate.height < min_face_size {
            continue;
        }
        if !candidate.intersects_frame(frame_width, frame_height) {
            continue;
        }
        if kept.iter().any(|k| k.overlaps(&candidate)) {
            continue;
        }
        kept.push(candidate);
    }

    kept
}

use image::{GrayImage, ImageBuffer, Luma, RgbImage};

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// Rec.601 luma (0.299, 0.587, 0.114) in 14-bit fixed point, rounded to nearest.
///
/// `image::imageops::grayscale` uses Rec.709 weights instead and gives
/// different intensities for saturated colors.
pub fn luma(image: &RgbImage) -> GrayImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b] = image.get_pixel(x, y).0;
        let value = (r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B
            + (1 << (LUMA_SHIFT - 1)))
            >> LUMA_SHIFT;
        Luma([value as u8])
    })
}

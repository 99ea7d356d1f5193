//! Edge overlay, the final pipeline stage.
//!
//! Combines the posterized color image with the inverted edge mask via
//! per-channel bitwise AND. The mask is 255 (all bits set) everywhere
//! except along detected edges, so color passes through unchanged and
//! edge pixels are forced to black. This is a coarse "paint black where
//! the mask is 0" operation, not an alpha blend; it relies on the mask
//! being pure 0/255.

use image::{Rgb, RgbImage};

use crate::types::GrayImage;

/// AND every color channel with the broadcast mask value.
///
/// The pipeline always produces a mask with the same dimensions as the
/// color image; any out-of-mask pixel (mismatched dimensions) passes
/// the color through unchanged.
#[must_use = "returns the outlined image"]
pub fn overlay_lines(color: &RgbImage, mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(color.width(), color.height(), |x, y| {
        let m = mask.get_pixel_checked(x, y).map_or(255, |p| p.0[0]);
        let pixel = color.get_pixel(x, y).0;
        Rgb(pixel.map(|c| c & m))
    })
}

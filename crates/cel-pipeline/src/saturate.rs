//! Saturation boost, the first pipeline stage.
//!
//! Exaggerating saturation before smoothing makes color regions
//! distinct enough to survive posterization as separate flat areas.

use image::{Rgb, RgbImage};

use crate::color::{hsv_to_rgb, rgb_to_hsv};

/// Multiply every pixel's HSV saturation by `factor`, clamping at full
/// saturation.
///
/// A factor of exactly 1.0 returns the image unchanged. Achromatic
/// pixels (saturation 0) are unaffected by any factor.
#[must_use = "returns the saturated image"]
pub fn boost_saturation(image: &RgbImage, factor: f32) -> RgbImage {
    if (factor - 1.0).abs() < f32::EPSILON {
        return image.clone();
    }

    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let mut hsv = rgb_to_hsv(image.get_pixel(x, y).0);
        hsv.s = (hsv.s * factor).clamp(0.0, 1.0);
        Rgb(hsv_to_rgb(hsv))
    })
}

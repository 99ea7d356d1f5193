//! Posterization (color quantization), the third pipeline stage.
//!
//! Reduces continuous shading to a small number of flat color bands,
//! the core of the "anime" look. Each channel is floored to a multiple
//! of `256 / levels`.

use image::{Rgb, RgbImage};

/// Quantize every channel of every pixel to `levels` discrete values.
///
/// The step size is `256 / levels` (integer division); each channel
/// becomes `(value / step) * step`, clamped to 255. `levels` of 255
/// leaves the image unchanged (step 1); `levels` of 1 collapses the
/// whole image to black.
///
/// Idempotent: applying the same level count twice equals applying it
/// once. `levels` is validated upstream; a zero here is treated as 1 to
/// keep the function total.
#[must_use = "returns the posterized image"]
#[allow(clippy::cast_possible_truncation)]
pub fn posterize(image: &RgbImage, levels: u8) -> RgbImage {
    let step = 256 / u16::from(levels.max(1));

    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y).0;
        Rgb(pixel.map(|v| ((u16::from(v) / step) * step).min(255) as u8))
    })
}

//! Image decoding.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP) and produces the
//! three-channel RGB buffer the pipeline operates on. Alpha channels
//! and grayscale inputs are converted; the pipeline itself only ever
//! sees `RgbImage`.

use crate::types::{PipelineError, RgbImage};

/// Decode raw image bytes into an RGB buffer.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the format is
/// unrecognized or the data is corrupt.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Encode an RGBA image as PNG bytes.
    fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn empty_input_returns_error() {
        assert!(matches!(decode_rgb(&[]), Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_return_decode_error() {
        let result = decode_rgb(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn valid_png_decodes_with_dimensions() {
        let img = image::RgbaImage::from_pixel(17, 31, image::Rgba([10, 20, 30, 255]));
        let rgb = decode_rgb(&png_bytes(&img)).unwrap();
        assert_eq!(rgb.dimensions(), (17, 31));
        assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 128]));
        let rgb = decode_rgb(&png_bytes(&img)).unwrap();
        assert_eq!(rgb.get_pixel(1, 1).0, [200, 100, 50]);
    }
}

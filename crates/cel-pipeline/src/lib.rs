//! cel-pipeline: pure anime-stylization pipeline (sans-IO).
//!
//! Turns a photograph into a flat "anime-style" image through five
//! fixed stages:
//! saturation boost -> edge-preserving smoothing -> posterization ->
//! edge extraction -> edge overlay.
//!
//! This crate has **no I/O dependencies** beyond decoding in-memory
//! bytes -- it operates on pixel buffers and returns pixel buffers.
//! Filesystem traversal and the preset-per-directory batch layout live
//! in the `cel` binary crate.

pub mod color;
pub mod decode;
pub mod edges;
pub mod overlay;
pub mod posterize;
pub mod presets;
pub mod saturate;
pub mod smooth;
pub mod types;

pub use presets::Preset;
pub use types::{GrayImage, Params, PipelineError, RgbImage};

/// Run the full stylization pipeline on a decoded image.
///
/// Pure: the input is never mutated, the output is a new buffer with
/// identical dimensions, and the result is deterministic for identical
/// inputs. Invocations are independent, so callers may parallelize
/// across images or presets freely.
///
/// # Pipeline steps
///
/// 1. Boost HSV saturation by `params.saturation`
/// 2. Edge-preserving bilateral smoothing
///    (`params.smoothing` / `params.edge_sensitivity`)
/// 3. Posterize every channel to `params.levels` levels
/// 4. Extract an inverted Canny line mask from the posterized image
/// 5. AND the mask into the posterized image, drawing black outlines
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParams`] if any parameter is outside
/// its legal domain, [`PipelineError::EmptyImage`] if the input has
/// zero width or height.
pub fn stylize(image: &RgbImage, params: &Params) -> Result<RgbImage, PipelineError> {
    params.validate()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::EmptyImage);
    }

    // 1. Saturation boost.
    let saturated = saturate::boost_saturation(image, params.saturation);

    // 2. Edge-preserving smoothing.
    let smoothed =
        smooth::edge_preserving_smooth(&saturated, params.smoothing, params.edge_sensitivity);

    // 3. Posterization.
    let poster = posterize::posterize(&smoothed, params.levels);

    // 4. Edge extraction (inverted line mask).
    let mask = edges::line_mask(&poster);

    // 5. Edge overlay.
    Ok(overlay::overlay_lines(&poster, &mask))
}

/// Decode raw image bytes and run [`stylize`].
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] for empty bytes,
/// [`PipelineError::ImageDecode`] for unrecognized or corrupt data,
/// plus everything [`stylize`] can return.
pub fn process(image_bytes: &[u8], params: &Params) -> Result<RgbImage, PipelineError> {
    let image = decode::decode_rgb(image_bytes)?;
    stylize(&image, params)
}

//! Shared types for the cel stylization pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `RgbImage` so downstream crates can reference pipeline
/// input/output buffers without depending on `image` directly.
pub use image::RgbImage;

/// Re-export `GrayImage` so downstream crates can reference the edge
/// mask without depending on `image` directly.
pub use image::GrayImage;

/// Tuning knobs for one stylization pass.
///
/// All parameters have documented defaults matching the standard preset.
/// Construct with struct update syntax from [`Params::default`] and call
/// [`Params::validate`] (or let [`crate::stylize`] do it) before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// HSV saturation multiplier applied before smoothing. Must be
    /// finite and positive; values above 1.0 exaggerate color regions
    /// so they survive posterization as distinct flat areas.
    pub saturation: f32,

    /// Number of discrete output levels per channel in the
    /// posterization stage. Must be at least 1. The `u8` type makes the
    /// degenerate `levels > 255` case unrepresentable.
    pub levels: u8,

    /// Spatial extent of the edge-preserving smoothing filter
    /// (the `sigma_s` analogue). Must be finite and non-negative;
    /// zero disables the smoothing stage.
    pub smoothing: f32,

    /// Range sensitivity of the edge-preserving smoothing filter
    /// (the `sigma_r` analogue), in (0, 1]. Lower values preserve more
    /// edge detail. Clamped to [`crate::smooth::MIN_EDGE_SENSITIVITY`]
    /// inside the smoothing stage so a literal zero can never reach the
    /// range kernel.
    pub edge_sensitivity: f32,
}

impl Params {
    /// Default saturation multiplier.
    pub const DEFAULT_SATURATION: f32 = 2.0;
    /// Default posterization level count (32-value steps).
    pub const DEFAULT_LEVELS: u8 = 8;
    /// Default smoothing extent.
    pub const DEFAULT_SMOOTHING: f32 = 60.0;
    /// Default edge sensitivity.
    pub const DEFAULT_EDGE_SENSITIVITY: f32 = 0.4;

    /// Check every field against its legal domain.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParams`] naming the offending
    /// field and value. Called by [`crate::stylize`] before any pixel
    /// work, so invalid parameters fail fast.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.saturation.is_finite() || self.saturation <= 0.0 {
            return Err(PipelineError::InvalidParams(format!(
                "saturation must be a positive finite number, got {}",
                self.saturation,
            )));
        }
        if self.levels == 0 {
            return Err(PipelineError::InvalidParams(
                "levels must be between 1 and 255, got 0".to_string(),
            ));
        }
        if !self.smoothing.is_finite() || self.smoothing < 0.0 {
            return Err(PipelineError::InvalidParams(format!(
                "smoothing must be a non-negative finite number, got {}",
                self.smoothing,
            )));
        }
        if !self.edge_sensitivity.is_finite()
            || self.edge_sensitivity <= 0.0
            || self.edge_sensitivity > 1.0
        {
            return Err(PipelineError::InvalidParams(format!(
                "edge_sensitivity must be in (0, 1], got {}",
                self.edge_sensitivity,
            )));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            saturation: Self::DEFAULT_SATURATION,
            levels: Self::DEFAULT_LEVELS,
            smoothing: Self::DEFAULT_SMOOTHING,
            edge_sensitivity: Self::DEFAULT_EDGE_SENSITIVITY,
        }
    }
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The input image has no pixels.
    #[error("input image has zero width or height")]
    EmptyImage,

    /// One or more parameters are outside their legal domain.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

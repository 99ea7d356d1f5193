//! Edge-preserving smoothing, the second pipeline stage.
//!
//! A bilateral filter: each output pixel is a weighted average of its
//! neighborhood, where the weight is a spatial Gaussian crossed with a
//! range Gaussian over the summed absolute RGB difference to the center
//! pixel. Flat regions average out to the cel-shaded "flat" look while
//! strong color boundaries keep their silhouette for the later edge
//! extraction stage.

use image::{Rgb, RgbImage};

/// Smallest accepted edge sensitivity.
///
/// The range kernel divides by the sensitivity, so a literal zero must
/// never reach it. [`edge_preserving_smooth`] clamps its argument here
/// even though [`crate::Params::validate`] already rejects zero.
pub const MIN_EDGE_SENSITIVITY: f32 = 0.01;
const _: () = assert!(MIN_EDGE_SENSITIVITY > 0.0);

/// Cap on the kernel radius.
///
/// Bounds per-pixel cost at `(2 * MAX_RADIUS + 1)^2` taps regardless of
/// how large the smoothing extent is.
pub const MAX_RADIUS: i64 = 12;

/// Apply one edge-preserving bilateral smoothing pass.
///
/// `smoothing` is the spatial extent (the `sigma_s` analogue); values
/// around 50 and above remove most photographic texture. Non-positive
/// smoothing returns the image unchanged.
///
/// `edge_sensitivity` in (0, 1] scales the range kernel (the `sigma_r`
/// analogue); lower values preserve more edge detail. It is clamped to
/// `[MIN_EDGE_SENSITIVITY, 1.0]`.
#[must_use = "returns the smoothed image"]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn edge_preserving_smooth(
    image: &RgbImage,
    smoothing: f32,
    edge_sensitivity: f32,
) -> RgbImage {
    if smoothing <= 0.0 {
        return image.clone();
    }

    let spatial_sigma = smoothing / 4.0;
    let radius = ((spatial_sigma * 1.5).ceil() as i64).clamp(1, MAX_RADIUS);
    let range_sigma = edge_sensitivity.clamp(MIN_EDGE_SENSITIVITY, 1.0) * 255.0;

    let spatial = spatial_kernel(radius, spatial_sigma);
    let range = range_kernel(range_sigma);
    let window = 2 * radius + 1;

    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let center = image.get_pixel(x, y).0;
            let mut weight_sum = 0.0f32;
            let mut sums = [0.0f32; 3];

            for dy in -radius..=radius {
                let ny = i64::from(y) + dy;
                if ny < 0 || ny >= i64::from(height) {
                    continue;
                }
                for dx in -radius..=radius {
                    let nx = i64::from(x) + dx;
                    if nx < 0 || nx >= i64::from(width) {
                        continue;
                    }
                    let neighbor = image.get_pixel(nx as u32, ny as u32).0;
                    let diff: u16 = center
                        .iter()
                        .zip(neighbor.iter())
                        .map(|(&a, &b)| u16::from(a.abs_diff(b)))
                        .sum();
                    let weight = spatial[((dy + radius) * window + dx + radius) as usize]
                        * range[usize::from(diff)];

                    weight_sum += weight;
                    for (sum, &value) in sums.iter_mut().zip(neighbor.iter()) {
                        *sum += weight * f32::from(value);
                    }
                }
            }

            // The center tap always contributes a positive weight, so
            // weight_sum cannot be zero.
            let mut rgb = [0u8; 3];
            for (channel, sum) in rgb.iter_mut().zip(sums) {
                *channel = (sum / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
            out.put_pixel(x, y, Rgb(rgb));
        }
    }
    out
}

/// Gaussian weights over the `(2r + 1)^2` window, row-major.
#[allow(clippy::cast_precision_loss)]
fn spatial_kernel(radius: i64, sigma: f32) -> Vec<f32> {
    let window = 2 * radius + 1;
    let denom = 2.0 * sigma * sigma;
    (0..window * window)
        .map(|i| {
            let dy = (i / window - radius) as f32;
            let dx = (i % window - radius) as f32;
            (-dx.mul_add(dx, dy * dy) / denom).exp()
        })
        .collect()
}

/// Gaussian weights indexed by the summed absolute per-channel
/// difference between two RGB pixels (0..=765).
#[allow(clippy::cast_precision_loss)]
fn range_kernel(sigma: f32) -> Vec<f32> {
    let denom = 2.0 * sigma * sigma;
    (0..=255 * 3)
        .map(|d| {
            let d = d as f32;
            (-(d * d) / denom).exp()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10x10 image, left half red, right half blue.
    fn two_tone_image() -> RgbImage {
        RgbImage::from_fn(10, 10, |x, _y| {
            if x < 5 {
                Rgb([220, 30, 30])
            } else {
                Rgb([30, 30, 220])
            }
        })
    }

    #[test]
    fn zero_smoothing_returns_identical_image() {
        let img = two_tone_image();
        assert_eq!(edge_preserving_smooth(&img, 0.0, 0.4), img);
    }

    #[test]
    fn negative_smoothing_returns_identical_image() {
        let img = two_tone_image();
        assert_eq!(edge_preserving_smooth(&img, -5.0, 0.4), img);
    }

    #[test]
    fn output_dimensions_preserved() {
        let img = RgbImage::new(17, 31);
        let smoothed = edge_preserving_smooth(&img, 20.0, 0.4);
        assert_eq!(smoothed.width(), 17);
        assert_eq!(smoothed.height(), 31);
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let img = RgbImage::from_pixel(16, 16, Rgb([128, 128, 128]));
        let smoothed = edge_preserving_smooth(&img, 60.0, 0.4);
        for pixel in smoothed.pixels() {
            assert_eq!(pixel.0, [128, 128, 128]);
        }
    }

    #[test]
    fn smoothing_flattens_noise() {
        // A checkerboard of nearby grays should converge toward the mean.
        let img = RgbImage::from_fn(12, 12, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([120, 120, 120])
            } else {
                Rgb([136, 136, 136])
            }
        });
        let smoothed = edge_preserving_smooth(&img, 40.0, 0.4);
        let center = smoothed.get_pixel(6, 6).0[0];
        assert!(
            (125..=131).contains(&center),
            "expected checkerboard to average toward 128, got {center}",
        );
    }

    #[test]
    fn low_sensitivity_preserves_strong_edges() {
        let img = two_tone_image();
        let preserved = edge_preserving_smooth(&img, 40.0, 0.05);
        let blended = edge_preserving_smooth(&img, 40.0, 1.0);

        // Red channel one pixel left of the boundary: with a tight range
        // kernel it should stay close to the original 220; with a wide
        // one the blue half bleeds in.
        let original = i16::from(img.get_pixel(4, 5).0[0]);
        let kept = i16::from(preserved.get_pixel(4, 5).0[0]);
        let lost = i16::from(blended.get_pixel(4, 5).0[0]);
        assert!(
            (original - kept).abs() < (original - lost).abs(),
            "expected low sensitivity to preserve the edge: original={original} kept={kept} lost={lost}",
        );
    }

    #[test]
    fn zero_sensitivity_is_clamped_to_minimum() {
        // A sensitivity of 0 must behave exactly like the minimum, not
        // reach the range kernel as a literal zero.
        let img = two_tone_image();
        let clamped = edge_preserving_smooth(&img, 30.0, 0.0);
        let minimum = edge_preserving_smooth(&img, 30.0, MIN_EDGE_SENSITIVITY);
        assert_eq!(clamped, minimum);
    }

    #[test]
    fn radius_is_capped() {
        // Huge smoothing values must not blow up the kernel; this just
        // has to terminate quickly on a small image.
        let img = RgbImage::from_pixel(8, 8, Rgb([50, 100, 150]));
        let smoothed = edge_preserving_smooth(&img, 10_000.0, 0.4);
        assert_eq!(smoothed.dimensions(), (8, 8));
    }
}

//! Edge extraction, the fourth pipeline stage.
//!
//! Converts the posterized image to luminance, runs a Canny detector
//! with fixed two-level thresholds, and inverts the result so edges are
//! black (0) on a white (255) background. The inverted mask is what the
//! overlay stage combines with the color image.
//!
//! The Canny steps (Gaussian blur, Sobel gradients, non-maximum
//! suppression, hysteresis) are implemented here on top of `imageproc`
//! kernels. Hysteresis expands over bounds-checked neighbors, so edges
//! touching the image border are safe.

use image::{GrayImage, Luma, RgbImage};
use imageproc::definitions::Image;
use imageproc::filter::{filter_clamped, gaussian_blur_f32};
use imageproc::kernel;

/// Canny low threshold on the 0-255 luminance gradient scale.
pub const LOW_THRESHOLD: f32 = 100.0;

/// Canny high threshold on the 0-255 luminance gradient scale.
pub const HIGH_THRESHOLD: f32 = 200.0;

/// Minimum allowed Canny threshold.
///
/// A low threshold of zero would promote every pixel with any gradient
/// into a candidate edge, producing a dense mask that blackens most of
/// the overlay output.
pub const MIN_THRESHOLD: f32 = 1.0;
const _: () = assert!(MIN_THRESHOLD > 0.0);

/// Sigma of the noise-reduction blur inside the Canny detector.
const BLUR_SIGMA: f32 = 1.4;

/// Produce the inverted line-art mask for a color image.
///
/// Converts to grayscale, detects edges with the fixed
/// [`LOW_THRESHOLD`]/[`HIGH_THRESHOLD`] pair, and inverts: edge pixels
/// become 0, everything else 255. The mask is binary (pure 0/255),
/// which the overlay stage relies on.
#[must_use = "returns the inverted edge mask"]
pub fn line_mask(image: &RgbImage) -> GrayImage {
    let gray = image::imageops::grayscale(image);
    invert_mask(&canny(&gray, LOW_THRESHOLD, HIGH_THRESHOLD))
}

/// Detect edges using the Canny algorithm.
///
/// Returns a binary image: 255 for edge pixels, 0 for non-edge.
/// Both thresholds are clamped to at least [`MIN_THRESHOLD`] and the
/// low threshold is clamped to at most the high one.
#[must_use = "returns the binary edge map"]
pub fn canny(image: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    let high = high_threshold.max(MIN_THRESHOLD);
    let low = low_threshold.max(MIN_THRESHOLD).min(high);

    let blurred = gaussian_blur_f32(image, BLUR_SIGMA);
    let gx: Image<Luma<i16>> = filter_clamped(&blurred, kernel::SOBEL_HORIZONTAL_3X3);
    let gy: Image<Luma<i16>> = filter_clamped(&blurred, kernel::SOBEL_VERTICAL_3X3);

    let magnitude = Image::from_fn(image.width(), image.height(), |x, y| {
        Luma([f32::from(gx[(x, y)][0]).hypot(f32::from(gy[(x, y)][0]))])
    });

    let thinned = suppress_non_maxima(&magnitude, &gx, &gy);
    hysteresis(&thinned, low, high)
}

/// Invert a binary edge map (bitwise NOT).
///
/// Swaps edge pixels (255 -> 0) and background pixels (0 -> 255).
#[must_use = "returns the inverted mask"]
pub fn invert_mask(mask: &GrayImage) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        Luma([!mask.get_pixel(x, y).0[0]])
    })
}

/// Keep only gradient magnitudes that are local maxima along their
/// gradient direction, thinning ridges to one-pixel edges.
///
/// Border pixels are left at zero; they have no full neighborhood.
fn suppress_non_maxima(
    magnitude: &Image<Luma<f32>>,
    gx: &Image<Luma<i16>>,
    gy: &Image<Luma<i16>>,
) -> Image<Luma<f32>> {
    let (width, height) = magnitude.dimensions();
    let mut out = Image::from_pixel(width, height, Luma([0.0f32]));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let dx = f32::from(gx[(x, y)][0]);
            let dy = f32::from(gy[(x, y)][0]);
            let mut angle = dy.atan2(dx).to_degrees();
            if angle < 0.0 {
                angle += 180.0;
            }

            // Quantize the gradient direction to one of four axes and
            // pick the two neighbors perpendicular to the edge.
            let (a, b) = if (22.5..67.5).contains(&angle) {
                ((x + 1, y + 1), (x - 1, y - 1))
            } else if (67.5..112.5).contains(&angle) {
                ((x, y - 1), (x, y + 1))
            } else if (112.5..157.5).contains(&angle) {
                ((x - 1, y + 1), (x + 1, y - 1))
            } else {
                ((x - 1, y), (x + 1, y))
            };

            let m = magnitude[(x, y)][0];
            if m >= magnitude[a][0] && m >= magnitude[b][0] {
                out.put_pixel(x, y, Luma([m]));
            }
        }
    }
    out
}

/// Two-threshold hysteresis: every pixel at or above `high` seeds a
/// flood fill that follows 8-connected neighbors at or above `low`.
fn hysteresis(magnitude: &Image<Luma<f32>>, low: f32, high: f32) -> GrayImage {
    let (width, height) = magnitude.dimensions();
    let mut out = GrayImage::new(width, height);
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if magnitude[(x, y)][0] < high || out[(x, y)][0] != 0 {
                continue;
            }
            out.put_pixel(x, y, Luma([255]));
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for (nx, ny) in neighbors(cx, cy, width, height) {
                    if magnitude[(nx, ny)][0] >= low && out[(nx, ny)][0] == 0 {
                        out.put_pixel(nx, ny, Luma([255]));
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }
    out
}

/// The 8-connected neighbors of `(x, y)` that lie inside the image.
///
/// Uses wrapping subtraction so coordinates on the border produce an
/// out-of-range value that fails the bounds filter instead of
/// panicking on `u32` underflow.
fn neighbors(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let left = x.wrapping_sub(1);
    let up = y.wrapping_sub(1);
    [
        (left, up),
        (x, up),
        (x + 1, up),
        (left, y),
        (x + 1, y),
        (left, y + 1),
        (x, y + 1),
        (x + 1, y + 1),
    ]
    .into_iter()
    .filter(move |&(nx, ny)| nx < width && ny < height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// 20x20 grayscale image with a sharp vertical boundary at x = 10.
    fn sharp_edge_image() -> GrayImage {
        GrayImage::from_fn(20, 20, |x, _y| {
            if x < 10 { Luma([0]) } else { Luma([255]) }
        })
    }

    fn edge_count(mask: &GrayImage) -> u32 {
        mask.pixels().map(|p| u32::from(p.0[0] > 0)).sum()
    }

    #[test]
    fn uniform_image_produces_no_edges() {
        let img = GrayImage::from_pixel(20, 20, Luma([128]));
        let edges = canny(&img, LOW_THRESHOLD, HIGH_THRESHOLD);
        assert_eq!(edge_count(&edges), 0, "expected no edges in uniform image");
    }

    #[test]
    fn sharp_boundary_is_detected() {
        let edges = canny(&sharp_edge_image(), LOW_THRESHOLD, HIGH_THRESHOLD);
        assert!(
            edge_count(&edges) > 0,
            "expected edges at the sharp boundary",
        );
    }

    #[test]
    fn edge_map_is_binary() {
        let edges = canny(&sharp_edge_image(), LOW_THRESHOLD, HIGH_THRESHOLD);
        for pixel in edges.pixels() {
            assert!(
                pixel.0[0] == 0 || pixel.0[0] == 255,
                "edge map must be pure 0/255, got {}",
                pixel.0[0],
            );
        }
    }

    #[test]
    fn output_dimensions_match_input() {
        let img = GrayImage::new(17, 31);
        let edges = canny(&img, LOW_THRESHOLD, HIGH_THRESHOLD);
        assert_eq!(edges.dimensions(), (17, 31));
    }

    #[test]
    fn border_adjacent_edge_does_not_panic() {
        // A strong edge one pixel from the border makes hysteresis
        // expand into border pixels; neighbor lookups must stay in
        // bounds there.
        let mut img = GrayImage::from_pixel(10, 10, Luma([0]));
        for y in 0..10 {
            img.put_pixel(1, y, Luma([255]));
        }
        let _edges = canny(&img, 1.0, 2.0);
    }

    #[test]
    fn zero_thresholds_are_clamped() {
        let img = sharp_edge_image();
        let zeroed = canny(&img, 0.0, 0.0);
        let minimum = canny(&img, MIN_THRESHOLD, MIN_THRESHOLD);
        assert_eq!(zeroed, minimum);
    }

    #[test]
    fn low_above_high_is_clamped() {
        let img = sharp_edge_image();
        let swapped = canny(&img, 200.0, 100.0);
        let equal = canny(&img, 100.0, 100.0);
        assert_eq!(swapped, equal);
    }

    #[test]
    fn invert_flips_all_values() {
        let mut img = GrayImage::new(5, 5);
        img.put_pixel(1, 1, Luma([255]));
        let inverted = invert_mask(&img);
        assert_eq!(inverted.get_pixel(1, 1).0[0], 0);
        assert_eq!(inverted.get_pixel(0, 0).0[0], 255);
    }

    #[test]
    fn double_invert_is_identity() {
        let mut img = GrayImage::new(5, 5);
        img.put_pixel(2, 2, Luma([255]));
        assert_eq!(invert_mask(&invert_mask(&img)), img);
    }

    #[test]
    fn line_mask_of_flat_color_image_is_all_white() {
        let img = RgbImage::from_pixel(16, 16, Rgb([96, 160, 64]));
        let mask = line_mask(&img);
        for pixel in mask.pixels() {
            assert_eq!(pixel.0[0], 255);
        }
    }

    #[test]
    fn line_mask_marks_boundary_black() {
        let img = RgbImage::from_fn(20, 20, |x, _y| {
            if x < 10 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let mask = line_mask(&img);
        let black: u32 = mask.pixels().map(|p| u32::from(p.0[0] == 0)).sum();
        assert!(black > 0, "expected black line pixels at the boundary");
    }

    #[test]
    fn neighbors_at_corner_stay_in_bounds() {
        let all: Vec<_> = neighbors(0, 0, 4, 4).collect();
        assert_eq!(all, vec![(1, 0), (0, 1), (1, 1)]);
    }
}

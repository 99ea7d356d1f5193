//! Scalar RGB <-> HSV conversion.
//!
//! The saturation stage needs a color space that separates chroma from
//! brightness. 8-bit RGB maps to hue in degrees `[0, 360)` and
//! saturation/value in `[0, 1]`.

/// An HSV color triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`. Zero for achromatic colors.
    pub h: f32,
    /// Saturation, `[0, 1]`.
    pub s: f32,
    /// Value (brightness), `[0, 1]`.
    pub v: f32,
}

/// Convert an 8-bit RGB triple to HSV.
#[must_use]
pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv {
    let r = f32::from(rgb[0]) / 255.0;
    let g = f32::from(rgb[1]) / 255.0;
    let b = f32::from(rgb[2]) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;

    // Achromatic case: hue is undefined, use 0.
    if delta < f32::EPSILON {
        return Hsv { h: 0.0, s: 0.0, v };
    }

    let s = delta / max;

    let h = if (max - r).abs() < f32::EPSILON {
        let mut h = (g - b) / delta;
        if g < b {
            h += 6.0;
        }
        h * 60.0
    } else if (max - g).abs() < f32::EPSILON {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    };

    Hsv { h: h % 360.0, s, v }
}

/// Convert HSV back to an 8-bit RGB triple.
///
/// Out-of-range saturation and value are clamped to `[0, 1]`, hue is
/// wrapped into `[0, 360)`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let h = hsv.h.rem_euclid(360.0);
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r1, g1, b1) = match (h / 60.0) as u8 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |chan: f32| ((chan + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r1), to_byte(g1), to_byte(b1)]
}

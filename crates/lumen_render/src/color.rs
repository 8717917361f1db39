//! Gamma encoding and quantization of linear colors.

use lumen_math::{Color, Interval};

/// Channel values are clamped here before scaling to bytes, so 1.0 lands on 255.
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-encoded 8-bit RGB.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

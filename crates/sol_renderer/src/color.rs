//! Linear radiance to display pixels.

use sol_math::{pack_argb, Color, ColorExt, Vec4};

/// Linear values at or below this use the linear segment of the sRGB curve.
pub const SRGB_LINEAR_THRESHOLD: f32 = 0.003_130_8;

/// Encode one linear channel with the sRGB transfer function.
///
/// Input is clamped to [0, 1] first.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    let linear = linear.clamp(0.0, 1.0);
    if linear <= SRGB_LINEAR_THRESHOLD {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert a linear colour to an opaque packed `0xAARRGGBB` pixel.
pub fn resolve(color: Color) -> u32 {
    pack_argb(Vec4::new(
        255.0 * linear_to_srgb(color.r()),
        255.0 * linear_to_srgb(color.g()),
        255.0 * linear_to_srgb(color.b()),
        255.0,
    ))
}

use glam::{Vec3, Vec4};

/// Linear RGB colour. Shares its representation with [`Vec3`].
pub type Color = Vec3;

/// Named channel accessors for colours stored in glam vectors.
pub trait ColorExt {
    fn r(&self) -> f32;
    fn g(&self) -> f32;
    fn b(&self) -> f32;
}

impl ColorExt for Vec3 {
    #[inline]
    fn r(&self) -> f32 {
        self.x
    }

    #[inline]
    fn g(&self) -> f32 {
        self.y
    }

    #[inline]
    fn b(&self) -> f32 {
        self.z
    }
}

impl ColorExt for Vec4 {
    #[inline]
    fn r(&self) -> f32 {
        self.x
    }

    #[inline]
    fn g(&self) -> f32 {
        self.y
    }

    #[inline]
    fn b(&self) -> f32 {
        self.z
    }
}

#[inline]
fn round_channel(value: f32) -> u32 {
    (value + 0.5).clamp(0.0, 255.0) as u32
}

/// Pack an `(r, g, b, a)` vector with channels in `[0, 255]` into a 32-bit
/// word laid out as `0xAARRGGBB`.
///
/// Each channel is rounded to the nearest integer (add 0.5, truncate).
#[inline]
pub fn pack_argb(rgba: Vec4) -> u32 {
    round_channel(rgba.w) << 24
        | round_channel(rgba.x) << 16
        | round_channel(rgba.y) << 8
        | round_channel(rgba.z)
}

/// Split a `0xAARRGGBB` word into `[r, g, b, a]` bytes.
#[inline]
pub fn unpack_argb(word: u32) -> [u8; 4] {
    let [b, g, r, a] = word.to_le_bytes();
    [r, g, b, a]
}

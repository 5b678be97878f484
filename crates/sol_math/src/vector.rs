// Vector utilities shared by the tracer.
//
// glam already covers dot, cross, lerp and component-wise products. The
// helpers here add the zero-safe normalisation and reflection the tracer
// relies on, under names that do not shadow glam's inherent methods.

use glam::{Vec2, Vec3, Vec4};

/// Squared length at or below which a vector is treated as degenerate.
pub const NORMALIZE_EPSILON_SQ: f32 = 1e-8;

/// Extension trait for glam vectors.
pub trait VectorExt: Sized {
    /// Normalize, or return the zero vector when the length is too small to
    /// divide by safely.
    fn normalize_zero(self) -> Self;

    /// Component-wise (Hadamard) product.
    fn hadamard(self, other: Self) -> Self;
}

/// Reflection only makes sense for directions in 3D.
pub trait ReflectExt {
    /// Reflect `self` about the surface normal `n`.
    fn reflect_about(self, n: Self) -> Self;
}

macro_rules! impl_vector_ext {
    ($($t:ty),*) => {$(
        impl VectorExt for $t {
            #[inline]
            fn normalize_zero(self) -> Self {
                let len_sq = self.length_squared();
                if len_sq > NORMALIZE_EPSILON_SQ {
                    self * (1.0 / len_sq.sqrt())
                } else {
                    <$t>::ZERO
                }
            }

            #[inline]
            fn hadamard(self, other: Self) -> Self {
                self * other
            }
        }
    )*};
}

impl_vector_ext!(Vec2, Vec3, Vec4);

impl ReflectExt for Vec3 {
    #[inline]
    fn reflect_about(self, n: Vec3) -> Vec3 {
        self - 2.0 * self.dot(n) * n
    }
}

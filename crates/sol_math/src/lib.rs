// Re-export glam for convenience
pub use glam::*;

// SOL math types
mod color;
mod interval;
mod ray;
mod vector;

pub use color::{pack_argb, unpack_argb, Color, ColorExt};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{ReflectExt, VectorExt, NORMALIZE_EPSILON_SQ};

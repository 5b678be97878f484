//! SOL Renderer - CPU Path Tracing
//!
//! A small Monte Carlo path tracer over planes and spheres.
//!
//! Rendering is deterministic: the serial driver draws every sample from one
//! xorshift stream, the parallel driver gives every row its own stream.

mod bucket;
mod camera;
mod color;
mod intersect;
mod random;
mod renderer;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, DEFAULT_BUCKET_ROWS};
pub use camera::Camera;
pub use color::{linear_to_srgb, resolve, SRGB_LINEAR_THRESHOLD};
pub use intersect::{closest_hit, Hit, Intersect, MIN_HIT_DISTANCE, PARALLEL_EPSILON};
pub use random::{XorShift32, DEFAULT_SEED};
pub use renderer::{
    render, render_pixel, render_row, Progress, RenderConfig, DEFAULT_SAMPLES_PER_PIXEL,
};
pub use tracer::{ray_cast, scatter, DEFAULT_MAX_BOUNCES};

/// Re-export common math types from sol_math
pub use sol_math::{Color, Interval, Ray, Vec3};

//! Core path tracing renderer.
//!
//! Implements per-pixel supersampling on top of the bounce loop:
//! - Jittered camera rays, `samples_per_pixel` of them per pixel
//! - Averaging in linear space, sRGB encoding at the end
//! - A serial driver that uses one random stream for the whole image

use std::sync::atomic::{AtomicU32, Ordering};

use sol_core::{Image32, World};
use sol_math::Color;

use crate::bucket::DEFAULT_BUCKET_ROWS;
use crate::camera::Camera;
use crate::color::resolve;
use crate::random::{XorShift32, DEFAULT_SEED};
use crate::tracer::{ray_cast, DEFAULT_MAX_BOUNCES};

/// Default samples per pixel.
pub const DEFAULT_SAMPLES_PER_PIXEL: u32 = 128;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum surfaces visited per path
    pub max_bounces: u32,
    /// Base seed for the random streams
    pub seed: u32,
    /// Rows per parallel work item
    pub bucket_rows: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: DEFAULT_SAMPLES_PER_PIXEL,
            max_bounces: DEFAULT_MAX_BOUNCES,
            seed: DEFAULT_SEED,
            bucket_rows: DEFAULT_BUCKET_ROWS,
        }
    }
}

impl RenderConfig {
    /// Set samples per pixel. Zero keeps the current value.
    pub fn with_samples(mut self, samples: u32) -> Self {
        if samples > 0 {
            self.samples_per_pixel = samples;
        }
        self
    }

    /// Set the bounce budget.
    pub fn with_max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    /// Set the base seed. Zero selects the default seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = if seed == 0 { DEFAULT_SEED } else { seed };
        self
    }

    /// Set the number of rows per parallel bucket (at least one).
    pub fn with_bucket_rows(mut self, rows: u32) -> Self {
        self.bucket_rows = rows.max(1);
        self
    }
}

/// Render a single pixel with multi-sampling.
///
/// Returns the average linear radiance. `camera` must be initialized.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut XorShift32,
) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let contribution = 1.0 / samples as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += contribution * ray_cast(world, ray, config.max_bounces, rng);
    }

    pixel_color
}

/// Render and resolve one image row into `row`.
pub fn render_row(
    camera: &Camera,
    world: &World,
    y: u32,
    row: &mut [u32],
    config: &RenderConfig,
    rng: &mut XorShift32,
) {
    for (x, pixel) in row.iter_mut().enumerate() {
        let color = render_pixel(camera, world, x as u32, y, config, rng);
        *pixel = resolve(color);
    }
}

/// Render the entire image on the calling thread.
///
/// Every pixel draws from the single stream `rng`, bottom row first.
pub fn render(
    camera: &Camera,
    world: &World,
    config: &RenderConfig,
    image: &mut Image32,
    rng: &mut XorShift32,
) {
    let camera = camera.initialized_for(image.width(), image.height());
    let progress = Progress::new(image.height());

    for (y, row) in image.rows_mut() {
        render_row(&camera, world, y, row, config, rng);
        progress.row_done();
    }
}

/// Completed-row counter shared by the render drivers.
///
/// Logs every time another tenth of the rows is finished.
#[derive(Debug)]
pub struct Progress {
    total: u32,
    done: AtomicU32,
    logged: AtomicU32,
}

impl Progress {
    pub fn new(total_rows: u32) -> Self {
        Self {
            total: total_rows.max(1),
            done: AtomicU32::new(0),
            logged: AtomicU32::new(0),
        }
    }

    /// Record one finished row.
    pub fn row_done(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let tenth = (done as u64 * 10 / self.total as u64) as u32;
        if self.logged.fetch_max(tenth, Ordering::Relaxed) < tenth {
            log::info!("Raycasting {}% ({}/{} rows)", tenth * 10, done, self.total);
        }
    }
}

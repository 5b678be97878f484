//! Bucket-based parallel rendering.
//!
//! Divides the image into bands of whole rows (buckets) that rayon renders
//! independently. Each row seeds its own generator from the base seed and
//! the row index, so the picture does not depend on how rows are grouped or
//! on how many threads run.

use rayon::prelude::*;
use sol_core::{Image32, World};

use crate::camera::Camera;
use crate::random::XorShift32;
use crate::renderer::{render_row, Progress, RenderConfig};

/// Default bucket height in rows.
pub const DEFAULT_BUCKET_ROWS: u32 = 16;

/// A band of consecutive image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// First row of the band
    pub y: u32,
    /// Number of rows in the band
    pub height: u32,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(y: u32, height: u32) -> Self {
        Self { y, height }
    }

    /// Rows covered by this bucket.
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.y..self.y + self.height
    }
}

/// Split `height` rows into bands of at most `bucket_rows`, bottom first.
pub fn generate_buckets(height: u32, bucket_rows: u32) -> Vec<Bucket> {
    let bucket_rows = bucket_rows.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let rows = bucket_rows.min(height - y);
        buckets.push(Bucket::new(y, rows));
        y += rows;
    }

    buckets
}

/// Render the rows of one bucket into `pixels`, which holds exactly those
/// rows.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &World,
    config: &RenderConfig,
    pixels: &mut [u32],
    progress: &Progress,
) {
    let width = camera.image_width.max(1) as usize;
    for (y, row) in bucket.rows().zip(pixels.chunks_mut(width)) {
        let mut rng = XorShift32::for_row(config.seed, y);
        render_row(camera, world, y, row, config, &mut rng);
        progress.row_done();
    }
}

/// Render the entire image with rayon, one task per bucket.
pub fn render_parallel(camera: &Camera, world: &World, config: &RenderConfig, image: &mut Image32) {
    let camera = camera.initialized_for(image.width(), image.height());
    let buckets = generate_buckets(image.height(), config.bucket_rows);
    let progress = Progress::new(image.height());

    log::debug!(
        "Rendering {} buckets of up to {} rows on {} threads",
        buckets.len(),
        config.bucket_rows.max(1),
        rayon::current_num_threads()
    );

    let band_len = image.width() as usize * config.bucket_rows.max(1) as usize;
    buckets
        .par_iter()
        .zip(image.pixels_mut().par_chunks_mut(band_len))
        .for_each(|(bucket, pixels)| {
            render_bucket(bucket, &camera, world, config, pixels, &progress);
        });
}

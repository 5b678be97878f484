//! Pinhole camera and film plane.
//!
//! Pixel `(x, y)` maps to film coordinates `-1 + 2x/width` and
//! `-1 + 2y/height`, so row 0 is the bottom of the picture. The film sits
//! `film_distance` in front of the camera; the wider image side spans
//! `film_size` on it and the other side is scaled by the aspect ratio.

use sol_core::CameraSettings;
use sol_math::{Ray, Vec2, Vec3, VectorExt};

use crate::random::XorShift32;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Placement
    position: Vec3,
    target: Vec3,
    up: Vec3,

    // Film settings
    film_distance: f32,
    film_size: f32,

    // Cached computed values (set by initialize())
    x_axis: Vec3,
    y_axis: Vec3,
    z_axis: Vec3,
    film_centre: Vec3,
    half_film: Vec2,
    half_pixel: Vec2,
}

impl Camera {
    /// Create a camera with the default placement: ten units back along -Y,
    /// one unit up, looking at the origin with Z up.
    pub fn new() -> Self {
        Self::from_settings(&CameraSettings::default())
    }

    /// Create a camera from scene settings.
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            image_width: 1920,
            image_height: 1280,
            position: settings.position,
            target: settings.target,
            up: settings.up,
            film_distance: settings.film_distance,
            film_size: settings.film_size,
            x_axis: Vec3::X,
            y_axis: Vec3::Y,
            z_axis: Vec3::Z,
            film_centre: Vec3::ZERO,
            half_film: Vec2::splat(0.5),
            half_pixel: Vec2::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3, target: Vec3, up: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self.up = up;
        self
    }

    /// Set film distance and size.
    pub fn with_film(mut self, distance: f32, size: f32) -> Self {
        self.film_distance = distance;
        self.film_size = size;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        // Camera looks down -z_axis
        self.z_axis = (self.position - self.target).normalize_zero();
        self.x_axis = self.up.cross(self.z_axis).normalize_zero();
        self.y_axis = self.z_axis.cross(self.x_axis).normalize_zero();

        self.film_centre = self.position - self.z_axis * self.film_distance;

        let width = self.image_width.max(1) as f32;
        let height = self.image_height.max(1) as f32;

        let mut film = Vec2::splat(self.film_size);
        if width > height {
            film.y = film.x * height / width;
        } else if height > width {
            film.x = film.y * width / height;
        }

        self.half_film = 0.5 * film;
        self.half_pixel = Vec2::new(0.5 / width, 0.5 / height);
    }

    /// Copy of this camera initialized for an image of the given size.
    pub fn initialized_for(&self, width: u32, height: u32) -> Self {
        let mut camera = self.clone().with_resolution(width, height);
        camera.initialize();
        camera
    }

    /// Film coordinates of the lower-left corner of pixel `(x, y)`, in
    /// [-1, 1).
    pub fn film_coords(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            -1.0 + 2.0 * x as f32 / self.image_width.max(1) as f32,
            -1.0 + 2.0 * y as f32 / self.image_height.max(1) as f32,
        )
    }

    /// Half the film's width and height in world units.
    pub fn half_film(&self) -> Vec2 {
        self.half_film
    }

    /// Camera basis `(x, y, z)`; the camera looks down `-z`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.x_axis, self.y_axis, self.z_axis)
    }

    /// Generate a jittered ray through pixel `(x, y)`.
    ///
    /// Draws two values from `rng`, x offset first.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut XorShift32) -> Ray {
        let film = self.film_coords(x, y);
        let offset_x = film.x + rng.bilateral() * self.half_pixel.x;
        let offset_y = film.y + rng.bilateral() * self.half_pixel.y;

        let film_position = self.film_centre
            + self.x_axis * self.half_film.x * offset_x
            + self.y_axis * self.half_film.y * offset_y;

        Ray::normalized(self.position, film_position - self.position)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

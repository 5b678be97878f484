//! SOL Core - Scene model and image output for the sol path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `World`, `Material`, `Plane`, `Sphere`, `CameraSettings`
//! - **Image output**: the packed `Image32` buffer, BMP and PNG writers
//! - **Scene loading**: JSON scene descriptions and the built-in demo scene
//!
//! # Example
//!
//! ```ignore
//! use sol_core::{demo_scene, save_image, Image32};
//!
//! let scene = demo_scene()?;
//! let mut image = Image32::new(640, 480)?;
//! // ... render into `image` ...
//! save_image(&image, "out.bmp")?;
//! ```

pub mod bitmap;
pub mod buffer;
pub mod demo;
pub mod loader;
pub mod material;
pub mod output;
pub mod scene;

// Re-export commonly used types
pub use bitmap::{write_bitmap, BitmapError, BitmapHeader};
pub use buffer::{Image32, ImageError};
pub use demo::demo_scene;
pub use loader::{load_scene, load_scene_from_str, LoadError};
pub use material::{Material, MaterialId};
pub use output::{save_image, OutputError, OutputFormat};
pub use scene::{CameraSettings, Plane, Scene, SceneError, SceneResult, Sphere, World};

//! JSON scene loading.
//!
//! A scene file lists the sky, the materials and the primitives that refer
//! to them by position in the `materials` array:
//!
//! ```json
//! {
//!   "name": "floor",
//!   "sky": { "emit_color": [0.3, 0.4, 0.5] },
//!   "materials": [
//!     { "specular": 0.0, "reflect_color": [0.5, 0.5, 0.5] }
//!   ],
//!   "planes": [ { "normal": [0, 0, 1], "d": 0, "material": 0 } ],
//!   "spheres": [ { "position": [0, 0, 1], "radius": 1, "material": 0 } ],
//!   "camera": { "position": [0, -10, 1], "target": [0, 0, 0] }
//! }
//! ```
//!
//! Everything except `materials` is optional. Materials and primitives go
//! through the [`World`] builder, so the same validation applies as for
//! scenes built in code.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::material::Material;
use crate::scene::{CameraSettings, Plane, Scene, SceneError, Sphere, World};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {kind} #{index}: {source}")]
    Invalid {
        kind: &'static str,
        index: usize,
        #[source]
        source: SceneError,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneDeclaration {
    name: Option<String>,
    #[serde(default)]
    sky: Material,
    materials: Vec<Material>,
    #[serde(default)]
    planes: Vec<Plane>,
    #[serde(default)]
    spheres: Vec<Sphere>,
    #[serde(default)]
    camera: CameraSettings,
}

impl SceneDeclaration {
    fn into_scene(self, fallback_name: &str) -> LoadResult<Scene> {
        let mut world = World::new(self.sky);
        for (index, material) in self.materials.into_iter().enumerate() {
            world
                .add_material(material)
                .map_err(|source| LoadError::Invalid {
                    kind: "material",
                    index,
                    source,
                })?;
        }

        for (index, plane) in self.planes.into_iter().enumerate() {
            world
                .add_plane(plane)
                .map_err(|source| LoadError::Invalid {
                    kind: "plane",
                    index,
                    source,
                })?;
        }
        for (index, sphere) in self.spheres.into_iter().enumerate() {
            world
                .add_sphere(sphere)
                .map_err(|source| LoadError::Invalid {
                    kind: "sphere",
                    index,
                    source,
                })?;
        }

        let name = self.name.unwrap_or_else(|| fallback_name.to_owned());
        log::info!(
            "Loaded scene '{}': {} materials, {} planes, {} spheres",
            name,
            world.materials().len(),
            world.planes().len(),
            world.spheres().len()
        );
        Ok(Scene::new(name, world, self.camera))
    }
}

/// Load a scene from a JSON file.
///
/// The scene is named after the file stem unless the file names it.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let reader = BufReader::new(File::open(path)?);
    let declaration: SceneDeclaration = serde_json::from_reader(reader)?;
    declaration.into_scene(stem)
}

/// Load a scene from a JSON string.
pub fn load_scene_from_str(json: &str) -> LoadResult<Scene> {
    let declaration: SceneDeclaration = serde_json::from_str(json)?;
    declaration.into_scene("unnamed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialId;
    use sol_math::{Color, Vec3};

    const FLOOR_SCENE: &str = r#"{
        "name": "floor",
        "sky": { "emit_color": [0.3, 0.4, 0.5] },
        "materials": [
            { "specular": 0.0, "reflect_color": [0.5, 0.5, 0.5] },
            { "specular": 0.6, "reflect_color": [0.7, 0.5, 0.3] }
        ],
        "planes": [ { "normal": [0, 0, 1], "d": 0, "material": 0 } ],
        "spheres": [ { "position": [0, 0, 0], "radius": 1, "material": 1 } ]
    }"#;

    #[test]
    fn test_load_from_str() {
        let scene = load_scene_from_str(FLOOR_SCENE).unwrap();

        assert_eq!(scene.name, "floor");
        assert_eq!(scene.world.sky().emit_color, Color::new(0.3, 0.4, 0.5));
        assert_eq!(scene.world.planes()[0].normal, Vec3::Z);
        assert_eq!(scene.world.spheres()[0].material, MaterialId(1));
        assert_eq!(scene.camera, CameraSettings::default());
    }

    #[test]
    fn test_camera_override() {
        let json = r#"{
            "materials": [],
            "camera": { "position": [0, -5, 2], "film_distance": 2.0 }
        }"#;
        let scene = load_scene_from_str(json).unwrap();

        assert_eq!(scene.name, "unnamed");
        assert_eq!(scene.camera.position, Vec3::new(0.0, -5.0, 2.0));
        assert_eq!(scene.camera.film_distance, 2.0);
        assert_eq!(scene.camera.up, Vec3::Z);
    }

    #[test]
    fn test_rejects_dangling_material() {
        let json = r#"{
            "materials": [ {} ],
            "spheres": [ { "position": [0, 0, 0], "radius": 1, "material": 4 } ]
        }"#;

        match load_scene_from_str(json) {
            Err(LoadError::Invalid { kind, index, source }) => {
                assert_eq!(kind, "sphere");
                assert_eq!(index, 0);
                assert_eq!(source, SceneError::MissingMaterial { index: 4, count: 1 });
            }
            other => panic!("expected invalid sphere, got {:?}", other.map(|s| s.name)),
        }
    }

    #[test]
    fn test_material_specular_is_clamped() {
        let json = r#"{ "materials": [ { "specular": 5 }, { "specular": -2 } ] }"#;
        let scene = load_scene_from_str(json).unwrap();

        assert_eq!(scene.world.material(MaterialId(0)).specular, 1.0);
        assert_eq!(scene.world.material(MaterialId(1)).specular, 0.0);
    }

    #[test]
    fn test_rejects_huge_material_color() {
        // 1e39 overflows f32 to infinity
        let json = r#"{ "materials": [ {}, { "emit_color": [1e39, 0, 0] } ] }"#;

        match load_scene_from_str(json) {
            Err(LoadError::Invalid { kind, index, source }) => {
                assert_eq!(kind, "material");
                assert_eq!(index, 1);
                assert_eq!(source, SceneError::NonFinite("material"));
            }
            other => panic!("expected invalid material, got {:?}", other.map(|s| s.name)),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            load_scene_from_str(r#"{ "materials": [ "#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            load_scene_from_str(r#"{ "materials": [], "lights": [] }"#),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file_uses_stem() {
        let path = std::env::temp_dir().join(format!("sol_loader_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "materials": [] }"#).unwrap();

        let scene = load_scene(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(scene.unwrap().name, format!("sol_loader_{}", std::process::id()));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("/definitely/not/here.json"),
            Err(LoadError::Io(_))
        ));
    }
}

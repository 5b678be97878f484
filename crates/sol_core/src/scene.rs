//! Scene types for sol.
//!
//! A [`World`] is a flat list of planes and spheres plus the materials they
//! reference. It is built once, then borrowed read-only for a whole render.
//! Every primitive added through the builder methods refers to an existing
//! material, so lookups during rendering never fail.

use serde::{Deserialize, Serialize};
use sol_math::{Vec3, NORMALIZE_EPSILON_SQ};
use thiserror::Error;

use crate::material::{Material, MaterialId};

/// Errors raised while assembling a world.
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("Material {index} does not exist (world has {count} materials)")]
    MissingMaterial { index: usize, count: usize },

    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Plane normal must have non-zero length")]
    DegenerateNormal,

    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// An infinite plane `normal · p + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal. [`World::add_plane`] normalizes it.
    pub normal: Vec3,
    /// Signed offset along the normal.
    pub d: f32,
    pub material: MaterialId,
}

impl Plane {
    pub fn new(normal: Vec3, d: f32, material: MaterialId) -> Self {
        Self { normal, d, material }
    }
}

/// A sphere primitive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
    pub material: MaterialId,
}

impl Sphere {
    pub fn new(position: Vec3, radius: f32, material: MaterialId) -> Self {
        Self {
            position,
            radius,
            material,
        }
    }
}

/// Everything a ray can hit, plus the sky it escapes into.
#[derive(Clone, Debug, Default)]
pub struct World {
    sky: Material,
    materials: Vec<Material>,
    planes: Vec<Plane>,
    spheres: Vec<Sphere>,
}

impl World {
    /// Create an empty world lit only by `sky`.
    ///
    /// Only the sky's emission is ever used.
    pub fn new(sky: Material) -> Self {
        Self {
            sky,
            materials: Vec::new(),
            planes: Vec::new(),
            spheres: Vec::new(),
        }
    }

    /// Add a material and return its id. `specular` is clamped to `[0, 1]`.
    pub fn add_material(&mut self, material: Material) -> SceneResult<MaterialId> {
        if !material.specular.is_finite()
            || !material.emit_color.is_finite()
            || !material.reflect_color.is_finite()
        {
            return Err(SceneError::NonFinite("material"));
        }

        self.materials.push(Material {
            specular: material.specular.clamp(0.0, 1.0),
            ..material
        });
        Ok(MaterialId(self.materials.len() - 1))
    }

    /// Add a plane. The normal is normalized and `d` rescaled to match.
    pub fn add_plane(&mut self, plane: Plane) -> SceneResult<()> {
        self.check_material(plane.material)?;
        if !plane.normal.is_finite() || !plane.d.is_finite() {
            return Err(SceneError::NonFinite("plane"));
        }

        let len_sq = plane.normal.length_squared();
        if len_sq <= NORMALIZE_EPSILON_SQ {
            return Err(SceneError::DegenerateNormal);
        }
        let inv_len = 1.0 / len_sq.sqrt();

        self.planes.push(Plane {
            normal: plane.normal * inv_len,
            d: plane.d * inv_len,
            material: plane.material,
        });
        Ok(())
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, sphere: Sphere) -> SceneResult<()> {
        self.check_material(sphere.material)?;
        if !sphere.position.is_finite() {
            return Err(SceneError::NonFinite("sphere"));
        }
        if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
            return Err(SceneError::InvalidRadius(sphere.radius));
        }

        self.spheres.push(sphere);
        Ok(())
    }

    fn check_material(&self, id: MaterialId) -> SceneResult<()> {
        if id.index() < self.materials.len() {
            Ok(())
        } else {
            Err(SceneError::MissingMaterial {
                index: id.index(),
                count: self.materials.len(),
            })
        }
    }

    /// Material lookup. Ids handed out by this world are always valid.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    #[inline]
    pub fn sky(&self) -> &Material {
        &self.sky
    }

    #[inline]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    #[inline]
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }
}

/// Pinhole camera placement.
///
/// The renderer derives its film basis from these values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    /// World up axis; the scenes are Z-up.
    pub up: Vec3,
    /// Distance from the pinhole to the film plane.
    pub film_distance: f32,
    /// Extent of the wider image side on the film.
    pub film_size: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -10.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Z,
            film_distance: 1.0,
            film_size: 1.0,
        }
    }
}

/// A named world together with the camera looking at it.
#[derive(Clone, Debug)]
pub struct Scene {
    pub name: String,
    pub world: World,
    pub camera: CameraSettings,
}

impl Scene {
    pub fn new(name: impl Into<String>, world: World, camera: CameraSettings) -> Self {
        Self {
            name: name.into(),
            world,
            camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sol_math::Color;

    fn world_with_one_material() -> (World, MaterialId) {
        let mut world = World::new(Material::emissive(Color::new(0.3, 0.4, 0.5)));
        let id = world
            .add_material(Material::reflective(0.0, Color::splat(0.5)))
            .unwrap();
        (world, id)
    }

    #[test]
    fn test_material_ids_are_sequential() {
        let mut world = World::default();
        assert_eq!(world.add_material(Material::default()), Ok(MaterialId(0)));
        assert_eq!(world.add_material(Material::default()), Ok(MaterialId(1)));
        assert_eq!(world.materials().len(), 2);
    }

    #[test]
    fn test_add_material_clamps_specular() {
        let mut world = World::default();
        let shiny = Material {
            specular: 5.0,
            ..Material::default()
        };
        let dull = Material {
            specular: -1.0,
            ..Material::default()
        };

        let shiny = world.add_material(shiny).unwrap();
        let dull = world.add_material(dull).unwrap();
        assert_eq!(world.material(shiny).specular, 1.0);
        assert_eq!(world.material(dull).specular, 0.0);
    }

    #[test]
    fn test_add_material_rejects_non_finite() {
        let mut world = World::default();
        let bad_emit = Material::emissive(Color::new(f32::NAN, 0.0, 0.0));
        let bad_specular = Material {
            specular: f32::NAN,
            ..Material::default()
        };
        let bad_reflect = Material::reflective(0.5, Color::splat(f32::INFINITY));

        for material in [bad_emit, bad_specular, bad_reflect] {
            assert_eq!(
                world.add_material(material),
                Err(SceneError::NonFinite("material"))
            );
        }
        assert!(world.materials().is_empty());
    }

    #[test]
    fn test_add_plane_normalizes() {
        let (mut world, id) = world_with_one_material();
        world
            .add_plane(Plane::new(Vec3::new(0.0, 0.0, 2.0), -4.0, id))
            .unwrap();

        let plane = world.planes()[0];
        assert_eq!(plane.normal, Vec3::Z);
        assert_relative_eq!(plane.d, -2.0);
    }

    #[test]
    fn test_rejects_missing_material() {
        let (mut world, _) = world_with_one_material();
        let err = world
            .add_sphere(Sphere::new(Vec3::ZERO, 1.0, MaterialId(3)))
            .unwrap_err();
        assert_eq!(err, SceneError::MissingMaterial { index: 3, count: 1 });
        assert!(world.spheres().is_empty());
    }

    #[test]
    fn test_rejects_degenerate_geometry() {
        let (mut world, id) = world_with_one_material();

        assert_eq!(
            world.add_plane(Plane::new(Vec3::ZERO, 0.0, id)),
            Err(SceneError::DegenerateNormal)
        );
        assert_eq!(
            world.add_sphere(Sphere::new(Vec3::ZERO, 0.0, id)),
            Err(SceneError::InvalidRadius(0.0))
        );
        assert!(world
            .add_sphere(Sphere::new(Vec3::ZERO, f32::NAN, id))
            .is_err());
        assert_eq!(
            world.add_sphere(Sphere::new(Vec3::splat(f32::INFINITY), 1.0, id)),
            Err(SceneError::NonFinite("sphere"))
        );
    }

    #[test]
    fn test_sky_is_separate_from_materials() {
        let (world, id) = world_with_one_material();
        assert_eq!(world.sky().emit_color, Color::new(0.3, 0.4, 0.5));
        assert_eq!(world.material(id).reflect_color, Color::splat(0.5));
    }
}

//! The built-in scene rendered when no scene file is given.
//!
//! A grey floor at z = 0 under a pale blue sky, with a large orange sphere at
//! the origin, a small white light, a green mirror-ish sphere and a red
//! sphere that both glows and reflects.

use sol_math::{Color, Vec3};

use crate::material::Material;
use crate::scene::{CameraSettings, Plane, Scene, SceneResult, Sphere, World};

/// Build the demo scene.
pub fn demo_scene() -> SceneResult<Scene> {
    let world = build_demo_world()?;
    Ok(Scene::new("demo", world, CameraSettings::default()))
}

fn build_demo_world() -> SceneResult<World> {
    let mut world = World::new(Material::emissive(Color::new(0.3, 0.4, 0.5)));

    let floor = world.add_material(Material::reflective(0.0, Color::new(0.5, 0.5, 0.5)))?;
    let orange = world.add_material(Material::reflective(0.6, Color::new(0.7, 0.5, 0.3)))?;
    let light = world.add_material(Material::emissive(Color::new(1.0, 1.0, 1.0)))?;
    let green = world.add_material(Material::reflective(0.9, Color::new(0.2, 0.8, 0.2)))?;
    let red = world.add_material(
        Material::reflective(0.0, Color::new(0.9, 0.0, 0.0)).with_emission(Color::new(0.9, 0.0, 0.0)),
    )?;

    world.add_plane(Plane::new(Vec3::Z, 0.0, floor))?;

    world.add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0, orange))?;
    world.add_sphere(Sphere::new(Vec3::new(0.0, -2.0, 2.0), 0.2, light))?;
    world.add_sphere(Sphere::new(Vec3::new(-2.0, -1.0, 1.0), 1.0, green))?;
    world.add_sphere(Sphere::new(Vec3::new(2.0, -1.0, 2.0), 0.5, red))?;

    Ok(world)
}

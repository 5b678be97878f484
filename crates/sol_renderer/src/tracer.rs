//! The bounce loop.
//!
//! A path starts with full attenuation. Every surface it meets adds its
//! emission scaled by the attenuation so far, then multiplies the attenuation
//! by its reflect colour. Escaping adds the sky and ends the path.

use sol_core::World;
use sol_math::{Color, Ray, ReflectExt, Vec3, VectorExt};

use crate::intersect::closest_hit;
use crate::random::XorShift32;

/// Default number of surface interactions per path.
pub const DEFAULT_MAX_BOUNCES: u32 = 8;

/// Compute the radiance carried back along `ray`.
///
/// At most `max_bounces` surfaces are visited. A path that runs out of
/// bounces returns what it has gathered so far.
pub fn ray_cast(world: &World, ray: Ray, max_bounces: u32, rng: &mut XorShift32) -> Color {
    let mut result = Color::ZERO;
    let mut attenuation = Color::ONE;
    let mut ray = ray;

    for _ in 0..max_bounces {
        let hit = match closest_hit(world, &ray) {
            Some(hit) => hit,
            None => {
                result += attenuation.hadamard(world.sky().emit_color);
                break;
            }
        };

        let material = world.material(hit.material);
        result += attenuation.hadamard(material.emit_color);
        attenuation = attenuation.hadamard(material.reflect_color);

        let direction = scatter(ray.direction(), hit.normal, material.specular, rng);
        ray = Ray::new(hit.point, direction);
    }

    result
}

/// Pick the outgoing direction at a surface.
///
/// Blends a perfect mirror bounce with a randomised diffuse bounce around
/// the normal, weighted by `specular`. Refraction would branch here; no
/// material produces it.
pub fn scatter(incoming: Vec3, normal: Vec3, specular: f32, rng: &mut XorShift32) -> Vec3 {
    let mirror = incoming.reflect_about(normal);

    // Draw order x, y, z is part of the reproducible stream
    let x = rng.bilateral();
    let y = rng.bilateral();
    let z = rng.bilateral();
    let diffuse = (normal + Vec3::new(x, y, z)).normalize_zero();

    diffuse.lerp(mirror, specular).normalize_zero()
}

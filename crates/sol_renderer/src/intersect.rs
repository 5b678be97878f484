//! Ray-primitive intersection.
//!
//! A miss is `None`; there is no sentinel material for "nothing hit".

use sol_core::{MaterialId, Plane, Sphere, World};
use sol_math::{Interval, Ray, Vec3, VectorExt};

/// Hits closer than this are rejected so bounced rays don't re-hit the
/// surface they leave.
pub const MIN_HIT_DISTANCE: f32 = 0.001;

/// Plane denominators and sphere discriminant roots at or below this count
/// as parallel / tangent.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Material of the surface that was hit
    pub material: MaterialId,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection
    pub normal: Vec3,
    /// Ray parameter of the intersection
    pub distance: f32,
}

/// Trait for things a ray can hit.
pub trait Intersect {
    /// Closest hit with a distance strictly inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit>;
}

impl Intersect for Plane {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (-self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(Hit {
            material: self.material,
            point: ray.at(t),
            normal: self.normal,
            distance: t,
        })
    }
}

impl Intersect for Sphere {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let rel_origin = ray.origin() - self.position;
        let a = ray.direction().length_squared();
        let b = 2.0 * ray.direction().dot(rel_origin);
        let c = rel_origin.length_squared() - self.radius * self.radius;

        // NaN from a negative discriminant fails this test too
        let root = (b * b - 4.0 * a * c).sqrt();
        if !(root > PARALLEL_EPSILON) {
            return None;
        }

        let denom = 2.0 * a;
        let tp = (-b + root) / denom;
        let tn = (-b - root) / denom;

        let t = if tn > ray_t.min && tn < tp { tn } else { tp };
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(Hit {
            material: self.material,
            point: ray.at(t),
            normal: (t * ray.direction() + rel_origin).normalize_zero(),
            distance: t,
        })
    }
}

impl Intersect for World {
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<Hit> {
        let mut closest = None;
        let mut window = ray_t;

        let planes = self.planes().iter().map(|p| p as &dyn Intersect);
        let spheres = self.spheres().iter().map(|s| s as &dyn Intersect);

        for object in planes.chain(spheres) {
            if let Some(hit) = object.intersect(ray, window) {
                window = window.with_max(hit.distance);
                closest = Some(hit);
            }
        }

        closest
    }
}

/// Find the closest surface along `ray`, or `None` if it escapes to the sky.
pub fn closest_hit(world: &World, ray: &Ray) -> Option<Hit> {
    world.intersect(ray, Interval::new(MIN_HIT_DISTANCE, f32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sol_core::Material;

    fn single_material_world() -> (World, MaterialId) {
        let mut world = World::new(Material::default());
        let id = world.add_material(Material::default()).unwrap();
        (world, id)
    }

    #[test]
    fn test_sphere_hit_from_outside() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new(Vec3::new(0.0, -5.0, 0.0), Vec3::Y);

        let hit = closest_sphere(&sphere, &ray).unwrap();
        assert_eq!(hit.distance, 4.0);
        assert_eq!(hit.point, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(hit.normal, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_sphere_hit_distance_off_axis() {
        let center = Vec3::new(3.0, 4.0, -2.0);
        let origin = Vec3::new(-1.0, 0.5, 2.0);
        let sphere = Sphere::new(center, 0.75, MaterialId(0));
        let ray = Ray::normalized(origin, center - origin);

        let hit = closest_sphere(&sphere, &ray).unwrap();
        assert_relative_eq!(hit.distance, (origin - center).length() - 0.75, epsilon = 1e-3);
        // Normal points back toward the ray origin
        assert!(hit.normal.dot(ray.direction()) < -0.999);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, MaterialId(0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = closest_sphere(&sphere, &ray).unwrap();
        assert_eq!(hit.distance, 2.0);
        // Outward normal
        assert_eq!(hit.normal, Vec3::X);
    }

    #[test]
    fn test_sphere_miss_and_tangent() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(0));

        let miss = Ray::new(Vec3::new(0.0, -5.0, 2.0), Vec3::Y);
        assert!(closest_sphere(&sphere, &miss).is_none());

        let tangent = Ray::new(Vec3::new(0.0, -5.0, 1.0), Vec3::Y);
        assert!(closest_sphere(&sphere, &tangent).is_none());

        let behind = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(closest_sphere(&sphere, &behind).is_none());
    }

    #[test]
    fn test_plane_hit_both_sides() {
        let plane = Plane::new(Vec3::Z, 0.0, MaterialId(0));

        let down = Ray::new(Vec3::new(1.0, 2.0, 5.0), -Vec3::Z);
        let hit = plane.intersect(&down, Interval::new(MIN_HIT_DISTANCE, f32::MAX)).unwrap();
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.point, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(hit.normal, Vec3::Z);

        let up = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        let hit = plane.intersect(&up, Interval::new(MIN_HIT_DISTANCE, f32::MAX)).unwrap();
        assert_eq!(hit.distance, 3.0);
    }

    #[test]
    fn test_plane_parallel_ray_misses() {
        let plane = Plane::new(Vec3::Z, 0.0, MaterialId(0));
        let window = Interval::new(MIN_HIT_DISTANCE, f32::MAX);

        let parallel = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(plane.intersect(&parallel, window).is_none());

        let grazing = Ray::normalized(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1e-5));
        assert!(plane.intersect(&grazing, window).is_none());
    }

    #[test]
    fn test_hits_closer_than_minimum_are_ignored() {
        let plane = Plane::new(Vec3::Z, 0.0, MaterialId(0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.0005), -Vec3::Z);
        assert!(plane
            .intersect(&ray, Interval::new(MIN_HIT_DISTANCE, f32::MAX))
            .is_none());
    }

    #[test]
    fn test_zero_direction_misses() {
        let plane = Plane::new(Vec3::Z, 0.0, MaterialId(0));
        let sphere = Sphere::new(Vec3::ZERO, 1.0, MaterialId(0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let window = Interval::new(MIN_HIT_DISTANCE, f32::MAX);

        assert!(plane.intersect(&ray, window).is_none());
        assert!(sphere.intersect(&ray, window).is_none());
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        let (mut world, floor) = single_material_world();
        let ball = world.add_material(Material::default()).unwrap();
        world.add_plane(Plane::new(Vec3::Z, 0.0, floor)).unwrap();
        world
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, 2.0), 1.0, ball))
            .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let hit = closest_hit(&world, &ray).unwrap();
        assert_eq!(hit.material, ball);
        assert_eq!(hit.distance, 7.0);

        let beside = Ray::new(Vec3::new(5.0, 0.0, 10.0), -Vec3::Z);
        assert_eq!(closest_hit(&world, &beside).unwrap().material, floor);
    }

    #[test]
    fn test_exact_tie_keeps_first() {
        let (mut world, floor) = single_material_world();
        let ball = world.add_material(Material::default()).unwrap();
        world.add_plane(Plane::new(Vec3::Z, 0.0, floor)).unwrap();
        world
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 1.0, ball))
            .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z);
        let hit = closest_hit(&world, &ray).unwrap();
        assert_eq!(hit.distance, 5.0);
        assert_eq!(hit.material, floor);
    }

    #[test]
    fn test_empty_world_escapes() {
        let (world, _) = single_material_world();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(closest_hit(&world, &ray).is_none());
    }

    fn closest_sphere(sphere: &Sphere, ray: &Ray) -> Option<Hit> {
        sphere.intersect(ray, Interval::new(MIN_HIT_DISTANCE, f32::MAX))
    }
}

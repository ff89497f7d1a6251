//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use raycast_math::{Interval, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // u: angle around Y from -X, v: angle from -Y
        let u = (-p.z).atan2(p.x) / (2.0 * PI) + 0.5;
        let v = (-p.y).clamp(-1.0, 1.0).acos() / PI;
        (u, v)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let a = ray.direction().length_squared();
        if self.radius <= 0.0 || a < 1e-12 {
            return None;
        }

        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            self.material.as_ref(),
            Self::get_sphere_uv(outward_normal),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::solid(Vec3::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("should hit");
        assert!((rec.t - 0.5).abs() < 0.001);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_hit_from_outside_on_axis() {
        let r = 2.0;
        let k = 7.0;
        let sphere = Sphere::new(Vec3::ZERO, r, grey());
        let ray = Ray::new(Vec3::new(0.0, 0.0, k), Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - (k - r)).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, r)).length() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_inside_uses_far_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_out_of_range() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::new(0.001, 5.0)).is_none());
    }

    #[test]
    fn test_degenerate_sphere_and_ray() {
        let zero = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.0, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(zero.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());

        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let stuck = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(sphere.hit(&stuck, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_uv_range() {
        for p in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            let (u, v) = Sphere::get_sphere_uv(p);
            assert!((0.0..=1.0).contains(&u));
            assert!((0.0..=1.0).contains(&v));
        }
        let (_, v_bottom) = Sphere::get_sphere_uv(Vec3::NEG_Y);
        assert!(v_bottom.abs() < 1e-6);
    }
}

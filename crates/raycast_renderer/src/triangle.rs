//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.
//! The hit's `(u, v)` are the raw barycentric weights of `v1` and `v2`.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use raycast_math::{safe_normalize, Interval, Vec3};

/// Determinants below this are treated as a ray parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A triangle primitive.
pub struct Triangle {
    v0: Vec3,
    /// Pre-computed edges
    edge1: Vec3,
    edge2: Vec3,
    /// Pre-computed face normal (unit length, zero for degenerate triangles)
    normal: Vec3,
    material: Arc<dyn Material>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<dyn Material>) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        Self {
            v0,
            edge1,
            edge2,
            normal: safe_normalize(edge1.cross(edge2)),
            material,
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v0 + self.edge1, self.v0 + self.edge2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Möller-Trumbore test returning `(t, u, v)` on a hit.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, f32, f32)> {
        let h = ray.direction().cross(self.edge2);
        let a = self.edge1.dot(h);

        // Ray is parallel to triangle (or the triangle is degenerate)
        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.edge2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        Some((t, u, v))
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let (t, u, v) = self.intersect(ray, ray_t)?;
        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            self.material.as_ref(),
            (u, v),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1
        Triangle::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Arc::new(Lambertian::solid(Vec3::splat(0.5))),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = xy_triangle();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 0.001);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = xy_triangle();

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());

        // Ray parallel to the plane of the triangle
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_barycentrics_of_accepted_hits() {
        let tri = xy_triangle();
        let mut rng = StdRng::seed_from_u64(11);
        let mut accepted = 0;
        let mut rejected = 0;

        for _ in 0..1000 {
            let target = Vec3::new(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5), -1.0);
            let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), target - Vec3::new(0.0, 0.0, 2.0));
            match tri.hit(&ray, Interval::new(0.001, f32::INFINITY)) {
                Some(rec) => {
                    accepted += 1;
                    assert!(rec.u >= 0.0 && rec.v >= 0.0);
                    assert!(rec.u + rec.v <= 1.0);
                    // Barycentrics reconstruct the hit point
                    let [a, b, c] = tri.vertices();
                    let p = a * (1.0 - rec.u - rec.v) + b * rec.u + c * rec.v;
                    assert!((p - rec.p).length() < 1e-4);
                }
                None => rejected += 1,
            }
        }
        assert!(accepted > 0 && rejected > 0);
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(2.0, 0.0, 0.0),
            Arc::new(Lambertian::solid(Vec3::ONE)),
        );
        assert_eq!(tri.normal(), Vec3::ZERO);
        let ray = Ray::new(Vec3::new(0.5, 1.0, 0.0), Vec3::NEG_Y);
        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }
}

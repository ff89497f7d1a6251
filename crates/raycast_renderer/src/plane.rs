//! Infinite plane primitive.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use raycast_math::{safe_normalize, Interval, Vec3};

/// Rays whose direction is this close to parallel with the plane miss.
const PARALLEL_EPSILON: f32 = 1e-6;

/// An infinite plane through `point` with unit `normal`.
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Arc<dyn Material>,
}

impl Plane {
    /// Create a plane. The normal is normalized; a zero normal yields a plane
    /// that is never hit.
    pub fn new(point: Vec3, normal: Vec3, material: Arc<dyn Material>) -> Self {
        Self {
            point,
            normal: safe_normalize(normal),
            material,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Fixed planar remap: world x/z wrapped to the unit square.
    fn planar_uv(p: Vec3) -> (f32, f32) {
        (p.x.rem_euclid(1.0), p.z.rem_euclid(1.0))
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let p = ray.at(t);
        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            self.material.as_ref(),
            Self::planar_uv(p),
        ))
    }
}

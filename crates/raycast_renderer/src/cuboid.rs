//! Axis-aligned box primitive.
//!
//! Intersected with the slab method. The reported face is the one on the
//! axis whose slab bound produced `t` (the latest entry, or the earliest
//! exit when the ray starts inside); when two axes produce exactly the same
//! bound the first of x, y, z wins. The face side is then picked by comparing
//! the hit point against that axis' `min`/`max`.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use raycast_math::{Interval, Vec3};

/// Direction components smaller than this are treated as parallel to a slab.
const SLAB_EPSILON: f32 = 1e-8;

/// An axis-aligned box between `min` and `max`.
pub struct Cuboid {
    min: Vec3,
    max: Vec3,
    material: Arc<dyn Material>,
}

impl Cuboid {
    /// Create a box from two opposite corners (in any order).
    pub fn new(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            material,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Face coordinates from the two axes orthogonal to `axis`.
    fn face_uv(&self, p: Vec3, axis: usize) -> (f32, f32) {
        let extent = self.max - self.min;
        let local = p - self.min;
        let ratio = |i: usize| {
            if extent[i] > 0.0 {
                (local[i] / extent[i]).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        match axis {
            0 => (ratio(2), ratio(1)),
            1 => (ratio(0), ratio(2)),
            _ => (ratio(0), ratio(1)),
        }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let origin = ray.origin();
        let dir = ray.direction();

        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;
        let mut exit_axis = 0;

        for axis in 0..3 {
            if dir[axis].abs() < SLAB_EPSILON {
                // Parallel to this slab: inside it for all t, or never.
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir[axis];
            let mut t0 = (self.min[axis] - origin[axis]) * inv;
            let mut t1 = (self.max[axis] - origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            if t0 > t_enter {
                t_enter = t0;
                enter_axis = axis;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_axis = axis;
            }
            if t_exit < t_enter {
                return None;
            }
        }

        // A ray parallel to all three slabs has no finite bound at all.
        let (t, axis) = if t_enter.is_finite() && ray_t.contains(t_enter) {
            (t_enter, enter_axis)
        } else if t_exit.is_finite() && ray_t.contains(t_exit) {
            (t_exit, exit_axis)
        } else {
            return None;
        };

        let p = ray.at(t);
        let to_min = (p[axis] - self.min[axis]).abs();
        let to_max = (p[axis] - self.max[axis]).abs();
        let mut outward_normal = Vec3::ZERO;
        outward_normal[axis] = if to_max < to_min { 1.0 } else { -1.0 };

        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            self.material.as_ref(),
            self.face_uv(p, axis),
        ))
    }
}

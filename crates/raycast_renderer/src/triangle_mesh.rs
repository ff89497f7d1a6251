//! Index-triangulated mesh.
//!
//! Built once from a vertex array and an index array; every complete index
//! triple with in-range indices becomes an owned `Triangle`. Intersection is a
//! linear scan over those triangles.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray, Triangle,
};
use raycast_math::{Interval, Vec3};

/// A triangle mesh sharing one material.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    /// Index triples dropped at construction
    skipped: usize,
}

impl TriangleMesh {
    /// Build the mesh. The vertex buffer is only read during construction.
    ///
    /// Incomplete trailing triples and triples with out-of-range (including
    /// negative) indices are skipped with a warning.
    pub fn new(vertices: &[Vec3], indices: &[i64], material: Arc<dyn Material>) -> Self {
        let mut triangles = Vec::with_capacity(indices.len() / 3);
        let mut skipped = 0;

        for (face_index, face) in indices.chunks(3).enumerate() {
            if face.len() < 3 {
                log::warn!(
                    "Mesh face {} is incomplete ({} of 3 indices), skipping",
                    face_index,
                    face.len()
                );
                skipped += 1;
                continue;
            }

            let fetch = |i: i64| {
                usize::try_from(i)
                    .ok()
                    .and_then(|i| vertices.get(i))
                    .copied()
            };
            match (fetch(face[0]), fetch(face[1]), fetch(face[2])) {
                (Some(a), Some(b), Some(c)) => {
                    triangles.push(Triangle::new(a, b, c, Arc::clone(&material)));
                }
                _ => {
                    log::warn!(
                        "Mesh face {} references {:?} but only {} vertices exist, skipping",
                        face_index,
                        face,
                        vertices.len()
                    );
                    skipped += 1;
                }
            }
        }

        Self { triangles, skipped }
    }

    /// Number of triangles actually built.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of index triples that were dropped.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Hittable for TriangleMesh {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for triangle in &self.triangles {
            if let Some(rec) = triangle.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

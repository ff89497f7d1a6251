//! The renderable world: primitives, lights and background.

use crate::{
    hittable::{HitRecord, Hittable},
    Background, Light, Ray,
};
use raycast_math::{Color, Interval};

/// Everything a render pass reads. Read-only while a pass is in flight.
#[derive(Default)]
pub struct World {
    objects: Vec<Box<dyn Hittable>>,
    lights: Vec<Light>,
    background: Background,
}

impl World {
    /// Create an empty world with the given background.
    pub fn new(background: Background) -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            background,
        }
    }

    /// Add an object to the world.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Color for a ray that hit nothing.
    pub fn background_color(&self, ray: &Ray) -> Color {
        self.background.color(ray)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the world has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

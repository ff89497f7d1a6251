//! Camera for ray generation.
//!
//! A `Camera` is immutable: change any setting (or the output aspect ratio)
//! by building a new one from `CameraSettings`.

use std::fmt;

use crate::Ray;
use raycast_core::Projection;
use raycast_math::{random_in_unit_disk, safe_normalize, Vec3};
use rand::RngCore;

/// Everything needed to construct a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Width over height of the output image
    pub aspect_ratio: f32,
    /// Lens diameter; zero disables depth of field
    pub aperture: f32,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f32,
    pub projection: Projection,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            projection: Projection::Perspective,
        }
    }
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn build(self) -> Camera {
        Camera::new(self)
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    settings: CameraSettings,
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    // Orthonormal basis: u right, v up, w backwards
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        let theta = settings.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let viewport_height = 2.0 * half_height;
        let viewport_width = settings.aspect_ratio * viewport_height;

        let w = safe_normalize(settings.look_from - settings.look_at);
        let u = safe_normalize(settings.vup.cross(w));
        let v = w.cross(u);

        if w == Vec3::ZERO || u == Vec3::ZERO {
            log::warn!(
                "Degenerate camera basis (from {:?}, at {:?}, up {:?})",
                settings.look_from,
                settings.look_at,
                settings.vup
            );
        }

        let origin = settings.look_from;
        let (horizontal, vertical, lower_left_corner) = match settings.projection {
            Projection::Perspective => {
                let focus = settings.focus_dist;
                let horizontal = focus * viewport_width * u;
                let vertical = focus * viewport_height * v;
                let corner = origin - horizontal / 2.0 - vertical / 2.0 - focus * w;
                (horizontal, vertical, corner)
            }
            Projection::Orthographic => {
                let horizontal = viewport_width * u;
                let vertical = viewport_height * v;
                let corner = origin - horizontal / 2.0 - vertical / 2.0;
                (horizontal, vertical, corner)
            }
        };

        Self {
            settings,
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        }
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Generate a ray through normalized image coordinates `s, t` in `[0, 1]`,
    /// with `(0, 0)` at the bottom-left of the image.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        match self.settings.projection {
            Projection::Perspective => {
                let rd = self.lens_radius * random_in_unit_disk(rng);
                let offset = self.u * rd.x + self.v * rd.y;
                let origin = self.origin + offset;
                let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
                Ray::new(origin, target - origin)
            }
            Projection::Orthographic => self.pinhole_ray(s, t),
        }
    }

    /// The ray through `s, t` without any lens sampling.
    pub fn pinhole_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        match self.settings.projection {
            Projection::Perspective => Ray::new(self.origin, target - self.origin),
            Projection::Orthographic => Ray::new(target, -self.w),
        }
    }

    /// Origin, basis and corner rays for inspection tools.
    pub fn report(&self) -> CameraReport {
        CameraReport {
            projection: self.settings.projection,
            origin: self.origin,
            u: self.u,
            v: self.v,
            w: self.w,
            lower_left_corner: self.lower_left_corner,
            horizontal: self.horizontal,
            vertical: self.vertical,
            corner_rays: [
                self.pinhole_ray(0.0, 0.0),
                self.pinhole_ray(1.0, 0.0),
                self.pinhole_ray(0.0, 1.0),
                self.pinhole_ray(1.0, 1.0),
            ],
        }
    }
}

/// Diagnostic snapshot of a camera.
#[derive(Debug, Clone)]
pub struct CameraReport {
    pub projection: Projection,
    pub origin: Vec3,
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
    pub lower_left_corner: Vec3,
    pub horizontal: Vec3,
    pub vertical: Vec3,
    /// Bottom-left, bottom-right, top-left, top-right
    pub corner_rays: [Ray; 4],
}

impl fmt::Display for CameraReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "camera ({:?})", self.projection)?;
        writeln!(f, "  origin     {:?}", self.origin)?;
        writeln!(f, "  u/v/w      {:?} {:?} {:?}", self.u, self.v, self.w)?;
        writeln!(f, "  lower-left {:?}", self.lower_left_corner)?;
        writeln!(f, "  horizontal {:?}", self.horizontal)?;
        writeln!(f, "  vertical   {:?}", self.vertical)?;
        let names = ["bottom-left", "bottom-right", "top-left", "top-right"];
        for (name, ray) in names.iter().zip(self.corner_rays.iter()) {
            writeln!(f, "  {:<12} {:?} -> {:?}", name, ray.origin, ray.direction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn front_camera() -> Camera {
        CameraSettings::default()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .with_aspect(1.0)
            .build()
    }

    #[test]
    fn test_camera_basis() {
        let camera = front_camera();
        let report = camera.report();

        assert_eq!(report.origin, Vec3::ZERO);
        assert!((report.w - Vec3::Z).length() < 1e-6);
        assert!((report.u - Vec3::X).length() < 1e-6);
        assert!((report.v - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = front_camera();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        let dir = ray.direction().normalize();
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_corner_rays_span_fov() {
        let camera = front_camera();
        // 90 degree vertical fov: top edge at 45 degrees
        let top = camera.pinhole_ray(0.5, 1.0).direction().normalize();
        assert!((top.y - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);

        let bottom_left = camera.pinhole_ray(0.0, 0.0).direction();
        assert!(bottom_left.x < 0.0 && bottom_left.y < 0.0);
    }

    #[test]
    fn test_depth_of_field_keeps_focus_plane_sharp() {
        let camera = CameraSettings::default()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(60.0, 0.5, 4.0)
            .with_aspect(1.5)
            .build();
        let mut rng = StdRng::seed_from_u64(3);
        let mut moved = false;

        for _ in 0..50 {
            let ray = camera.get_ray(0.3, 0.6, &mut rng);
            moved |= ray.origin() != Vec3::ZERO;
            assert!(ray.origin().length() <= 0.25 + 1e-6);
            // Every lens sample converges on the same focus-plane point
            let on_plane = ray.at(1.0);
            let expected = camera.pinhole_ray(0.3, 0.6).at(1.0);
            assert!((on_plane - expected).length() < 1e-4);
        }
        assert!(moved);
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let camera = CameraSettings::default()
            .with_position(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .with_lens(90.0, 1.0, 10.0)
            .with_aspect(2.0)
            .with_projection(Projection::Orthographic)
            .build();
        let mut rng = StdRng::seed_from_u64(9);

        let a = camera.get_ray(0.0, 0.0, &mut rng);
        let b = camera.get_ray(1.0, 1.0, &mut rng);
        assert_eq!(a.direction(), Vec3::NEG_Z);
        assert_eq!(b.direction(), Vec3::NEG_Z);
        // Unit-scaled viewport: width = aspect * 2 * tan(45deg)
        assert!(((b.origin() - a.origin()).x - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_camera_has_no_nan() {
        let camera = CameraSettings::default()
            .with_position(Vec3::ONE, Vec3::ONE, Vec3::Y)
            .build();
        let mut rng = StdRng::seed_from_u64(1);
        let ray = camera.get_ray(0.2, 0.8, &mut rng);
        assert!(ray.origin().is_finite());
        assert!(ray.direction().is_finite());
    }

    #[test]
    fn test_report_display() {
        let text = front_camera().report().to_string();
        assert!(text.contains("Perspective"));
        assert!(text.contains("top-right"));
    }
}

//! Material trait for surface scattering.

use std::sync::Arc;

use crate::texture::{SolidColor, Texture};
use crate::{hittable::HitRecord, Ray};
use raycast_math::{
    gen_f32, random_in_unit_sphere, reflect, refract, safe_normalize, Color, Vec3,
};
use rand::RngCore;

/// Result of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel factor applied to light returning along `scattered`
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed (or the material only emits).
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a Lambertian material whose albedo comes from a texture.
    pub fn new(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }

    /// Create a Lambertian material with a constant albedo color.
    pub fn solid(albedo: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(albedo)))
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + safe_normalize(random_in_unit_sphere(rng));

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    roughness: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `roughness`: 0.0 = perfect mirror, 1.0 = very rough (clamped)
    pub fn new(albedo: Color, roughness: f32) -> Self {
        Self {
            albedo,
            roughness: roughness.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(safe_normalize(ray_in.direction()), rec.normal);
        let scattered_dir = reflected + self.roughness * random_in_unit_sphere(rng);

        // Perturbed into the surface: absorbed
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scattered_dir),
        })
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = safe_normalize(ray_in.direction());
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction =
            if cannot_refract || gen_f32(rng) < Self::reflectance(cos_theta, self.ior) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Light-emitting surface. Never scatters.
pub struct Emissive {
    color: Color,
    intensity: f32,
}

impl Emissive {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }
}

impl Material for Emissive {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }

    /// Emits on both faces.
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color * self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Hit on the y=0 plane with outward normal +Y, placed at the origin.
    fn record<'a>(material: &'a dyn Material, ray: &Ray) -> HitRecord<'a> {
        let mut rec = HitRecord::new(ray, 1.0, Vec3::Y, material, (0.5, 0.5));
        rec.p = Vec3::ZERO;
        rec
    }

    #[test]
    fn test_lambertian_scatters_into_hemisphere() {
        let mat = Lambertian::solid(Color::new(0.2, 0.4, 0.6));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = record(&mat, &ray);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.2, 0.4, 0.6));
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
            assert_eq!(result.scattered.origin(), rec.p);
        }
    }

    #[test]
    fn test_smooth_metal_mirrors() {
        let mat = Metal::new(Color::ONE, 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(&mat, &ray);
        let mut rng = StdRng::seed_from_u64(2);

        let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
    }

    #[test]
    fn test_rough_metal_never_scatters_inward() {
        let mat = Metal::new(Color::ONE, 1.0);
        // Grazing incidence so many perturbations point into the surface
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.05, 0.0));
        let rec = record(&mat, &ray);
        let mut rng = StdRng::seed_from_u64(3);
        let mut absorbed = 0;

        for _ in 0..500 {
            match mat.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_unit_ior_passes_straight_or_reflects() {
        let mat = Dielectric::new(1.0);
        let mut rng = StdRng::seed_from_u64(4);

        for angle in [0.0_f32, 0.3, 0.7, 1.2, 1.5] {
            let d = Vec3::new(angle.sin(), -angle.cos(), 0.0);
            let ray = Ray::new(-d, d);
            let rec = record(&mat, &ray);
            let mirror = reflect(d, rec.normal);
            let mut refracted = 0;

            for _ in 0..100 {
                let result = mat.scatter(&ray, &rec, &mut rng).unwrap();
                assert_eq!(result.attenuation, Color::ONE);
                let out = result.scattered.direction();
                if (out - d).length() < 1e-4 {
                    refracted += 1;
                } else {
                    assert!((out - mirror).length() < 1e-4);
                }
            }
            if angle < 1.0 {
                assert!(refracted > 0);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mat = Dielectric::new(1.5);
        // Leaving glass at a steep angle: sin > 1/1.5
        let d = Vec3::new(0.9, 0.43588989, 0.0);
        let ray = Ray::new(Vec3::ZERO, d);
        let rec = record(&mat, &ray);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..50 {
            let out = mat.scatter(&ray, &rec, &mut rng).unwrap().scattered.direction();
            assert!((out - reflect(d.normalize(), rec.normal)).length() < 1e-5);
        }
    }

    #[test]
    fn test_emissive() {
        let mat = Emissive::new(Color::new(1.0, 0.5, 0.25), 4.0);
        let mut rng = StdRng::seed_from_u64(6);

        for dir in [Vec3::NEG_Y, Vec3::Y] {
            let ray = Ray::new(Vec3::ZERO, dir);
            let rec = record(&mat, &ray);
            assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        }
        assert_eq!(mat.emitted(0.0, 0.0, Vec3::ZERO), Color::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn test_reflectance_bounds() {
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-4);
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
        assert_eq!(Dielectric::reflectance(1.0, 1.0), 0.0);
    }
}

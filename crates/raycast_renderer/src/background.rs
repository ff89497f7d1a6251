//! Environment seen by rays that escape the scene.
//!
//! Every model is a pure function of the ray direction, scaled by the
//! background intensity.

use crate::{Perlin, Ray};
use raycast_core::{BackgroundDesc, BackgroundKind};
use raycast_math::{safe_normalize, Color, Vec3};
use rand::RngCore;

/// The color model behind a background.
#[derive(Clone)]
enum Model {
    Gradient,
    Solid(Color),
    ProceduralSky(Perlin),
    Hdri,
}

/// Background evaluator with an intensity multiplier.
#[derive(Clone)]
pub struct Background {
    model: Model,
    intensity: f32,
}

impl Default for Background {
    fn default() -> Self {
        Self::gradient(1.0)
    }
}

impl Background {
    /// White at the horizon blending to sky blue overhead.
    pub fn gradient(intensity: f32) -> Self {
        Self {
            model: Model::Gradient,
            intensity,
        }
    }

    pub fn solid(color: Color, intensity: f32) -> Self {
        Self {
            model: Model::Solid(color),
            intensity,
        }
    }

    /// Sun, sky gradient, horizon glow, ground tint and noise clouds.
    pub fn procedural_sky(noise: Perlin, intensity: f32) -> Self {
        Self {
            model: Model::ProceduralSky(noise),
            intensity,
        }
    }

    /// Hand-tuned outdoor environment standing in for an image-based light.
    pub fn hdri(intensity: f32) -> Self {
        Self {
            model: Model::Hdri,
            intensity,
        }
    }

    /// Build from a scene description. The procedural sky draws its noise
    /// table from `rng`; a solid background without a color is black.
    pub fn from_desc(desc: &BackgroundDesc, rng: &mut dyn RngCore) -> Self {
        match desc.kind {
            BackgroundKind::Gradient => Self::gradient(desc.intensity),
            BackgroundKind::Solid => Self::solid(desc.color.unwrap_or(Color::ZERO), desc.intensity),
            BackgroundKind::ProceduralSky => {
                Self::procedural_sky(Perlin::new(rng), desc.intensity)
            }
            BackgroundKind::Hdri => Self::hdri(desc.intensity),
        }
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn kind(&self) -> &'static str {
        match self.model {
            Model::Gradient => "gradient",
            Model::Solid(_) => "solid",
            Model::ProceduralSky(_) => "procedural_sky",
            Model::Hdri => "hdri",
        }
    }

    /// Radiance arriving along `ray` from infinitely far away.
    pub fn color(&self, ray: &Ray) -> Color {
        let dir = safe_normalize(ray.direction());
        let base = match &self.model {
            Model::Gradient => sky_gradient(dir),
            Model::Solid(color) => *color,
            Model::ProceduralSky(noise) => procedural_sky(dir, noise),
            Model::Hdri => hdri(dir),
        };
        base * self.intensity
    }
}

fn sky_gradient(dir: Vec3) -> Color {
    let a = 0.5 * (dir.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn procedural_sky(dir: Vec3, noise: &Perlin) -> Color {
    let sun_dir = Vec3::new(0.3, 0.4, -0.6).normalize();
    let sun_color = Color::new(1.0, 0.9, 0.7);
    let zenith = Color::new(0.25, 0.45, 0.85);
    let horizon = Color::new(0.85, 0.9, 1.0);
    let ground = Color::new(0.3, 0.27, 0.24);

    let sun = sun_color * dir.dot(sun_dir).max(0.0).powf(512.0) * 10.0;

    let sky = if dir.y >= 0.0 {
        horizon.lerp(zenith, dir.y)
    } else {
        horizon.lerp(ground, (-dir.y * 4.0).min(1.0))
    };

    let glow = Color::new(1.0, 0.7, 0.45) * (-dir.y.abs() * 8.0).exp() * 0.35;

    let mut color = sky + glow + sun;

    // Clouds live on a virtual plane above the camera
    if dir.y > 0.05 {
        let p = Vec3::new(dir.x / dir.y, 0.0, dir.z / dir.y) * 2.0;
        let cover = smoothstep(0.35, 0.8, noise.turbulence(p, 5)) * smoothstep(0.05, 0.25, dir.y);
        color = color.lerp(Color::splat(0.95), cover * 0.6);
    }

    color
}

fn hdri(dir: Vec3) -> Color {
    let sun_dir = Vec3::new(-0.5, 0.45, -0.7).normalize();
    let sun_color = Color::new(1.0, 0.92, 0.8);
    let cos_sun = dir.dot(sun_dir).max(0.0);

    let disk = if cos_sun > 0.9995 {
        sun_color * 20.0
    } else {
        Color::ZERO
    };
    let corona = sun_color * (cos_sun.powf(64.0) * 1.5 + cos_sun.powf(8.0) * 0.25);

    let sky = if dir.y >= 0.0 {
        Color::new(0.75, 0.82, 0.95).lerp(Color::new(0.18, 0.35, 0.75), dir.y.powf(0.6))
    } else {
        // Light bounced off the ground, darker looking straight down
        Color::new(0.45, 0.42, 0.38).lerp(Color::new(0.2, 0.18, 0.15), (-dir.y).min(1.0))
    };

    let scatter =
        Color::new(0.9, 0.6, 0.4) * (-dir.y.abs() * 12.0).exp() * 0.3 * (0.5 + 0.5 * cos_sun);

    sky + disk + corona + scatter
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn all_models() -> Vec<Background> {
        let mut rng = StdRng::seed_from_u64(12);
        vec![
            Background::gradient(1.0),
            Background::solid(Color::new(0.2, 0.3, 0.4), 1.0),
            Background::procedural_sky(Perlin::new(&mut rng), 1.0),
            Background::hdri(1.0),
        ]
    }

    #[test]
    fn test_gradient_bluer_overhead() {
        let bg = Background::gradient(1.0);
        let up = bg.color(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down = bg.color(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        assert!(up.x < down.x);
        assert_eq!(down, Color::ONE);
    }

    #[test]
    fn test_intensity_scales() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.2, -1.0));
        let a = Background::hdri(1.0).color(&ray);
        let b = Background::hdri(2.5).color(&ray);
        assert!((b - a * 2.5).length() < 1e-5);
    }

    #[test]
    fn test_solid_ignores_direction() {
        let bg = Background::solid(Color::new(0.2, 0.3, 0.4), 0.5);
        for dir in [Vec3::X, Vec3::NEG_Y, Vec3::new(1.0, 2.0, 3.0)] {
            assert_eq!(bg.color(&Ray::new(Vec3::ZERO, dir)), Color::new(0.1, 0.15, 0.2));
        }
    }

    #[test]
    fn test_all_models_finite_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(77);
        for bg in all_models() {
            for _ in 0..2_000 {
                let dir = Vec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                );
                let c = bg.color(&Ray::new(Vec3::ZERO, dir));
                assert!(c.is_finite(), "{} gave {:?}", bg.kind(), c);
                assert!(c.min_element() >= 0.0, "{} gave {:?}", bg.kind(), c);
            }
            // Zero direction must not produce NaN either
            assert!(bg.color(&Ray::new(Vec3::ZERO, Vec3::ZERO)).is_finite());
        }
    }

    #[test]
    fn test_sky_brightest_toward_sun() {
        let mut rng = StdRng::seed_from_u64(3);
        let bg = Background::procedural_sky(Perlin::new(&mut rng), 1.0);
        let toward = bg.color(&Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, -0.6)));
        let away = bg.color(&Ray::new(Vec3::ZERO, Vec3::new(-0.3, 0.4, 0.6)));
        assert!(toward.length() > away.length());
    }

    #[test]
    fn test_from_desc() {
        let mut rng = StdRng::seed_from_u64(1);
        let desc = BackgroundDesc {
            kind: BackgroundKind::Solid,
            intensity: 2.0,
            color: None,
        };
        let bg = Background::from_desc(&desc, &mut rng);
        assert_eq!(bg.kind(), "solid");
        assert_eq!(bg.color(&Ray::new(Vec3::ZERO, Vec3::X)), Color::ZERO);

        let bg = Background::from_desc(&BackgroundDesc::default(), &mut rng);
        assert_eq!(bg.kind(), "gradient");
        assert_eq!(bg.intensity(), 1.0);
    }
}

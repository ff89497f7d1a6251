//! Procedural textures evaluated at a hit's surface coordinates.
//!
//! All textures here work from the world-space hit point except `SolidColor`,
//! so they behave the same on triangles (whose `u, v` are barycentric) as on
//! spheres and planes.

use std::f32::consts::TAU;

use crate::Perlin;
use raycast_math::{Color, Vec3};

/// A color field over surfaces.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// Constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.albedo
    }
}

/// 3D checker: the sign of `sin(sx)·sin(sy)·sin(sz)` picks the color.
#[derive(Debug, Clone, Copy)]
pub struct Checker {
    scale: f32,
    even: Color,
    odd: Color,
}

impl Checker {
    pub fn new(scale: f32, even: Color, odd: Color) -> Self {
        Self { scale, even, odd }
    }
}

impl Texture for Checker {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let s = self.scale * p;
        let sines = s.x.sin() * s.y.sin() * s.z.sin();
        if sines < 0.0 {
            self.odd
        } else {
            self.even
        }
    }
}

/// Raw noise remapped from `[-1, 1]` to `[0, 1]` and used to modulate a color.
#[derive(Clone)]
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
    color: Color,
}

impl NoiseTexture {
    pub fn new(noise: Perlin, scale: f32, color: Color) -> Self {
        Self {
            noise,
            scale,
            color,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let n = 0.5 * (1.0 + self.noise.noise(self.scale * p));
        self.color * n.clamp(0.0, 1.0)
    }
}

/// Marble veins: a sinusoid along z phase-shifted by turbulence.
#[derive(Clone)]
pub struct Marble {
    noise: Perlin,
    scale: f32,
    base: Color,
    vein: Color,
}

impl Marble {
    /// Turbulence octaves used for the vein distortion.
    const TURBULENCE_DEPTH: u32 = 7;

    pub fn new(noise: Perlin, scale: f32, base: Color, vein: Color) -> Self {
        Self {
            noise,
            scale,
            base,
            vein,
        }
    }
}

impl Texture for Marble {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let phase = self.scale * p.z + 10.0 * self.noise.turbulence(p, Self::TURBULENCE_DEPTH);
        let t = 0.5 * (1.0 + phase.sin());
        self.base.lerp(self.vein, t)
    }
}

/// Concentric rings around the y axis with noise-perturbed radius.
#[derive(Clone)]
pub struct Wood {
    noise: Perlin,
    scale: f32,
    light: Color,
    dark: Color,
}

impl Wood {
    /// How strongly noise wobbles the rings.
    const GRAIN: f32 = 0.6;

    pub fn new(noise: Perlin, scale: f32, light: Color, dark: Color) -> Self {
        Self {
            noise,
            scale,
            light,
            dark,
        }
    }
}

impl Texture for Wood {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let radial = (p.x * p.x + p.z * p.z).sqrt() * self.scale;
        let rings = radial + Self::GRAIN * self.noise.noise(p * self.scale);
        let t = 0.5 * (1.0 + (rings * TAU).sin());
        self.light.lerp(self.dark, t * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn perlin() -> Perlin {
        Perlin::new(&mut StdRng::seed_from_u64(8))
    }

    fn in_unit_cube(c: Color) -> bool {
        (0.0..=1.0).contains(&c.x) && (0.0..=1.0).contains(&c.y) && (0.0..=1.0).contains(&c.z)
    }

    #[test]
    fn test_solid_color() {
        let tex = SolidColor::new(Color::new(0.1, 0.2, 0.3));
        assert_eq!(tex.value(0.7, 0.1, Vec3::splat(9.0)), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_checker_alternates() {
        let even = Color::ONE;
        let odd = Color::ZERO;
        let tex = Checker::new(1.0, even, odd);

        let p = Vec3::splat(1.0);
        assert_eq!(tex.value(0.0, 0.0, p), even);
        // Flipping one coordinate's sign flips the product's sign
        assert_eq!(tex.value(0.0, 0.0, Vec3::new(-1.0, 1.0, 1.0)), odd);
    }

    #[test]
    fn test_procedural_textures_stay_between_colors() {
        let a = Color::new(0.9, 0.9, 0.9);
        let b = Color::new(0.1, 0.1, 0.1);
        let textures: Vec<Box<dyn Texture>> = vec![
            Box::new(NoiseTexture::new(perlin(), 4.0, Color::ONE)),
            Box::new(Marble::new(perlin(), 4.0, a, b)),
            Box::new(Wood::new(perlin(), 4.0, a, b)),
        ];

        for tex in &textures {
            for i in 0..200 {
                let f = i as f32 * 0.137;
                let p = Vec3::new(f.sin() * 3.0, f * 0.2, f.cos() * 3.0);
                assert!(in_unit_cube(tex.value(0.0, 0.0, p)));
            }
        }
    }

    #[test]
    fn test_noise_texture_at_lattice_is_half() {
        let tex = NoiseTexture::new(perlin(), 1.0, Color::ONE);
        let c = tex.value(0.0, 0.0, Vec3::new(2.0, 3.0, 4.0));
        assert!((c - Color::splat(0.5)).length() < 1e-5);
    }
}

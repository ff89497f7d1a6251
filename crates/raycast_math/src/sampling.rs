//! Vector helpers and stochastic sampling primitives.
//!
//! Every sampler draws from a caller-supplied generator so renders can be
//! reproduced from a seed.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::{Rng, RngCore};

/// Uniform float in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Normalize `v`, mapping a zero-length (or non-finite) vector to zero.
#[inline]
pub fn safe_normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Reflect `d` about the normal `n`: `d - 2(d·n)n`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Rejection-sample a point strictly inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Rejection-sample a point strictly inside the unit disk (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f32(rng) * 2.0 - 1.0, gen_f32(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Area-uniform point in the unit disk drawn in polar form.
pub fn random_in_polar_disk(rng: &mut dyn RngCore) -> Vec2 {
    let r = gen_f32(rng).sqrt();
    let theta = gen_f32(rng) * TAU;
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reflect_preserves_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let n = random_in_unit_sphere(&mut rng).normalize_or_zero();
            if n == Vec3::ZERO {
                continue;
            }
            let d = random_in_unit_sphere(&mut rng) * 10.0;
            let r = reflect(d, n);
            assert!((r.length() - d.length()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_is_identity() {
        let d = Vec3::new(0.3, -0.8, 0.2).normalize();
        let r = refract(d, Vec3::Y, 1.0);
        assert!((r - d).length() < 1e-5);
    }

    #[test]
    fn test_safe_normalize_zero() {
        assert_eq!(safe_normalize(Vec3::ZERO), Vec3::ZERO);
        assert!((safe_normalize(Vec3::new(0.0, 3.0, 4.0)).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_samplers_stay_inside() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
            let d = random_in_unit_disk(&mut rng);
            assert!(d.length_squared() < 1.0);
            assert_eq!(d.z, 0.0);
            assert!(random_in_polar_disk(&mut rng).length() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_gen_f32_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let x = gen_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));
        }
    }
}

//! Lattice-gradient (Perlin) noise and turbulence.

use raycast_math::Vec3;
use rand::seq::SliceRandom;
use rand::RngCore;

const TABLE_SIZE: usize = 256;

/// Perlin noise generator with a shuffled permutation table.
///
/// The table is stored twice in a row so lattice lookups never wrap.
#[derive(Clone)]
pub struct Perlin {
    perm: [u8; TABLE_SIZE * 2],
}

impl Perlin {
    /// Create a generator whose permutation is shuffled with `rng`.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let mut table: Vec<u8> = (0..TABLE_SIZE).map(|i| i as u8).collect();
        table.shuffle(rng);

        let mut perm = [0u8; TABLE_SIZE * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i % TABLE_SIZE];
        }
        Self { perm }
    }

    /// Noise at `p`, roughly in `[-1, 1]`; zero at every lattice point.
    pub fn noise(&self, p: Vec3) -> f32 {
        let cell = p.floor();
        let xi = (cell.x as i32 & 255) as usize;
        let yi = (cell.y as i32 & 255) as usize;
        let zi = (cell.z as i32 & 255) as usize;

        let x = p.x - cell.x;
        let y = p.y - cell.y;
        let z = p.z - cell.z;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let perm = &self.perm;
        let a = perm[xi] as usize + yi;
        let aa = perm[a] as usize + zi;
        let ab = perm[a + 1] as usize + zi;
        let b = perm[xi + 1] as usize + yi;
        let ba = perm[b] as usize + zi;
        let bb = perm[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(perm[aa], x, y, z), grad(perm[ba], x - 1.0, y, z)),
                lerp(
                    u,
                    grad(perm[ab], x, y - 1.0, z),
                    grad(perm[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(perm[aa + 1], x, y, z - 1.0),
                    grad(perm[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(perm[ab + 1], x, y - 1.0, z - 1.0),
                    grad(perm[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Sum of `depth` octaves at doubling frequency and halving weight,
    /// returned as an absolute value.
    pub fn turbulence(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product with one of 12 edge gradients, keyed on the low 4 bits of the
/// hash (the four spare codes repeat existing directions).
#[inline]
fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn generator(seed: u64) -> Perlin {
        Perlin::new(&mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_noise_zero_on_lattice() {
        let perlin = generator(1);
        for p in [Vec3::ZERO, Vec3::new(3.0, -2.0, 7.0), Vec3::splat(255.0)] {
            assert!(perlin.noise(p).abs() < 1e-6);
        }
    }

    #[test]
    fn test_noise_bounded() {
        let perlin = generator(2);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20_000 {
            let p = Vec3::new(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
            );
            let n = perlin.noise(p);
            assert!(n.is_finite());
            assert!((-1.05..=1.05).contains(&n), "noise {} at {:?}", n, p);
        }
    }

    #[test]
    fn test_noise_continuous() {
        let perlin = generator(3);
        let mut rng = StdRng::seed_from_u64(5);
        let delta = 1e-3;
        for _ in 0..2_000 {
            let p = Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            );
            let a = perlin.noise(p);
            let b = perlin.noise(p + Vec3::splat(delta));
            assert!((a - b).abs() < 0.05, "jump {} -> {} at {:?}", a, b, p);
        }
    }

    #[test]
    fn test_turbulence_non_negative() {
        let perlin = generator(4);
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..1_000 {
            let p = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            let t = perlin.turbulence(p, 7);
            assert!((0.0..=2.1).contains(&t));
        }
        assert_eq!(perlin.turbulence(Vec3::new(0.3, 0.1, 0.7), 0), 0.0);
    }

    #[test]
    fn test_same_seed_same_noise() {
        let a = generator(42);
        let b = generator(42);
        let p = Vec3::new(1.3, 4.7, -2.2);
        assert_eq!(a.noise(p), b.noise(p));
    }
}

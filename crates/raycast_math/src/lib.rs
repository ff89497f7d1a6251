// Re-export glam for convenience
pub use glam::*;

// Raycast math types
mod interval;
mod ray;
mod sampling;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{
    gen_f32, random_in_polar_disk, random_in_unit_disk, random_in_unit_sphere, reflect, refract,
    safe_normalize,
};

/// RGB color with linear float channels.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::splat(3.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(a * 2.0 / 2.0, a);
    }
}

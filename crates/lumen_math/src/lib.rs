//! Lumen math - vector, ray and interval primitives for the path tracer.
//!
//! All geometry is double precision. `Vec3`, `Point3` and `Color` are the
//! same `glam::DVec3` type under different names.

// Re-export glam for convenience
pub use glam;

mod interval;
mod random;
mod ray;
mod vec;

pub use interval::Interval;
pub use random::{
    random_f64, random_in_unit_disk, random_on_hemisphere, random_range, random_unit_vector,
    random_vec3,
};
pub use ray::Ray;
pub use vec::{near_zero, reflect, refract, Color, Point3, Vec3};

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
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length_squared(), 25.0);
    }
}

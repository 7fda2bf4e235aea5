//! Math foundation for the ember renderer.
//!
//! All rendering math is double precision; `Vec3` is glam's `DVec3`.

pub use glam::DVec3 as Vec3;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_has_unit_length() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert!((v.normalize().length() - 1.0).abs() < 1e-12);

        let tiny = Vec3::new(1e-8, 2e-8, -3e-8);
        assert!((tiny.normalize().length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-2.0, 0.5, 4.0);
        let c = a.cross(b);

        assert!(c.dot(a).abs() < 1e-12);
        assert!(c.dot(b).abs() < 1e-12);
    }

    #[test]
    fn test_cross_is_right_handed() {
        // The camera basis construction relies on x cross y = z.
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_add_sub_round_trip() {
        let a = Vec3::new(0.1, -2.5, 7.25);
        let b = Vec3::new(100.0, 0.003, -9.0);
        let r = a + b - b;

        assert!((r - a).length() < 1e-12);
    }
}

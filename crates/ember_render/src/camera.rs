//! Camera for ray generation.
//!
//! Maps a normalized viewport coordinate (s, t) in [0,1]^2 to a world-space
//! ray, with thin-lens defocus blur and shutter-time motion blur.

use crate::material::gen_f64;
use ember_math::{Ray, Vec3};
use rand::RngCore;

/// How the focus distance is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    /// Focus on the look-at point.
    LookAtDistance,
    /// Focus at a fixed distance from the camera.
    Fixed(f64),
}

/// Camera for generating rays into the scene.
#[derive(Clone)]
pub struct Camera {
    // Positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f64,   // Vertical field of view in degrees
    aspect: f64, // Width over height
    aperture: f64,
    focus: Focus,

    /// Shutter duration; ray times are drawn from [0, shutter].
    shutter: f64,

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect: 2.0,
            aperture: 0.0,
            focus: Focus::LookAtDistance,
            shutter: 0.0,
            origin: Vec3::ZERO,
            lower_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        }
    }

    /// Set camera position.
    ///
    /// Precondition: the view direction must not be parallel to vup, or the
    /// derived basis degenerates.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set field of view (degrees) and aspect ratio.
    pub fn with_viewport(mut self, vfov: f64, aspect: f64) -> Self {
        self.vfov = vfov;
        self.aspect = aspect;
        self
    }

    /// Set aperture diameter and focus mode. Aperture 0.0 is a pinhole.
    pub fn with_lens(mut self, aperture: f64, focus: Focus) -> Self {
        self.aperture = aperture;
        self.focus = focus;
        self
    }

    /// Set shutter duration for motion blur.
    pub fn with_shutter(mut self, shutter: f64) -> Self {
        self.shutter = shutter;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.lens_radius = self.aperture / 2.0;

        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect * half_height;

        let focus_dist = match self.focus {
            Focus::LookAtDistance => (self.look_from - self.look_at).length(),
            Focus::Fixed(dist) => dist,
        };

        // Right-handed basis: w points back, u right, v up.
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        self.origin = self.look_from;
        self.lower_left = self.origin
            - half_width * focus_dist * self.u
            - half_height * focus_dist * self.v
            - focus_dist * self.w;
        self.horizontal = 2.0 * half_width * focus_dist * self.u;
        self.vertical = 2.0 * half_height * focus_dist * self.v;
    }

    /// Generate a ray through viewport coordinate (s, t) in [0,1]^2.
    pub fn ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let time = if self.shutter > 0.0 {
            self.shutter * gen_f64(rng)
        } else {
            0.0
        };

        // Pinhole fast path: no disk sample to draw when the lens has no
        // radius.
        if self.lens_radius == 0.0 {
            return Ray::new(
                self.origin,
                self.lower_left + s * self.horizontal + t * self.vertical - self.origin,
                time,
            );
        }

        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left + s * self.horizontal + t * self.vertical - self.origin - offset,
            time,
        )
    }

    /// Shutter duration.
    pub fn shutter(&self) -> f64 {
        self.shutter
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejection-sample a point in the unit disk (z = 0 plane).
fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_f64(rng) * 2.0 - 1.0, gen_f64(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_camera_basis_is_orthonormal() {
        let mut camera = Camera::new()
            .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_viewport(20.0, 2.0);
        camera.initialize();

        assert!((camera.u.length() - 1.0).abs() < 1e-12);
        assert!((camera.v.length() - 1.0).abs() < 1e-12);
        assert!((camera.w.length() - 1.0).abs() < 1e-12);
        assert!(camera.u.dot(camera.v).abs() < 1e-12);
        assert!(camera.u.dot(camera.w).abs() < 1e-12);
        assert!(camera.v.dot(camera.w).abs() < 1e-12);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_viewport(90.0, 1.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(0);
        let ray = camera.ray(0.5, 0.5, &mut rng);

        // Viewport center lies straight down -w.
        assert!((ray.direction().normalize() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn test_pinhole_rays_share_origin() {
        let mut camera = Camera::new()
            .with_position(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
            .with_viewport(45.0, 2.0)
            .with_lens(0.0, Focus::LookAtDistance);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..10 {
            let ray = camera.ray(i as f64 / 10.0, 0.3, &mut rng);
            assert_eq!(ray.origin(), Vec3::new(1.0, 2.0, 3.0));
            assert_eq!(ray.time(), 0.0);
        }
    }

    #[test]
    fn test_defocus_jitters_origin() {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0), Vec3::Y)
            .with_viewport(45.0, 2.0)
            .with_lens(2.0, Focus::Fixed(10.0));
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(2);
        let mut moved = false;
        for _ in 0..16 {
            let ray = camera.ray(0.5, 0.5, &mut rng);
            // Lens radius 1.0 bounds the offset.
            assert!(ray.origin().length() < 1.0);
            moved |= ray.origin().length() > 0.0;
        }
        assert!(moved, "aperture > 0 must offset ray origins");
    }

    #[test]
    fn test_shutter_bounds_ray_time() {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_viewport(90.0, 2.0)
            .with_shutter(1.0);
        camera.initialize();

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let time = camera.ray(0.5, 0.5, &mut rng).time();
            assert!((0.0..1.0).contains(&time));
        }
    }
}

//! Sphere primitive, static or moving.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use ember_math::{Aabb, Interval, Ray, Vec3};
use std::sync::Arc;

/// A sphere whose center linearly interpolates between two keyframes.
///
/// A static sphere is the degenerate case of coincident keyframe centers.
pub struct Sphere {
    center0: Vec3,
    center1: Vec3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a static sphere.
    pub fn stationary(center: Vec3, radius: f64, material: Arc<Material>) -> Self {
        Self::moving(center, center, 0.0, 1.0, radius, material)
    }

    /// Create a sphere moving from center0 at time0 to center1 at time1.
    ///
    /// The cached bounding box merges the two keyframe boxes, so it is valid
    /// for any sample time inside the keyframe range.
    pub fn moving(
        center0: Vec3,
        center1: Vec3,
        time0: f64,
        time1: f64,
        radius: f64,
        material: Arc<Material>,
    ) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);

        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    /// Center position at the given sample time.
    pub fn center(&self, time: f64) -> Vec3 {
        self.center0
            + ((time - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let center = self.center(ray.time());
        let oc = ray.origin() - center;
        let a = ray.direction().length_squared();
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        // Reduced discriminant: b carries no factor of 2.
        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first: it is the front-facing intersection. The far root
        // only matters when the near one falls outside the interval (e.g.
        // the ray starts inside the sphere).
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            t: root,
            p,
            // Unit length because radius is the true center distance.
            normal: (p - center) / self.radius,
            material: self.material.as_ref(),
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

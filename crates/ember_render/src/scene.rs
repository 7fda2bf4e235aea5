//! Scene aggregate: a camera plus the world to trace against.

use crate::{Camera, HitRecord, Hittable};
use ember_math::{Interval, Ray};

/// A renderable scene.
///
/// Built once before rendering and read-only afterwards, so render workers
/// can share it without locks.
pub struct Scene {
    camera: Camera,
    world: Box<dyn Hittable>,
}

impl Scene {
    /// Create a scene from an initialized camera and a world (a plain
    /// `HittableList` or a built `BvhNode`).
    pub fn new(camera: Camera, world: Box<dyn Hittable>) -> Self {
        Self { camera, world }
    }

    /// The closest hit along the ray inside the interval, if any.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.world.hit(ray, ray_t)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &dyn Hittable {
        self.world.as_ref()
    }
}

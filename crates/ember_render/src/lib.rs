//! ember rendering kernel - CPU path tracing.
//!
//! A Monte Carlo path tracer: spheres (static and moving), diffuse/metal/
//! dielectric materials, procedural textures, thin-lens camera with motion
//! blur, BVH acceleration, and a rayon-parallel row renderer.

mod bvh;
mod camera;
mod hittable;
mod material;
mod output;
mod perlin;
mod renderer;
mod scene;
mod sphere;
mod texture;

pub use bvh::BvhNode;
pub use camera::{Camera, Focus};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{random_in_unit_sphere, Color, Material, Scatter};
pub use output::{save, OutputError};
pub use perlin::Perlin;
pub use renderer::{color_to_rgb8, linear_to_gamma, ray_color, render, ImageBuffer, RenderConfig};
pub use scene::Scene;
pub use sphere::Sphere;
pub use texture::Texture;

/// Re-export the shared math types.
pub use ember_math::{Aabb, Interval, Ray, Vec3};

//! Core path tracing renderer.
//!
//! Recursive ray tracing with a fixed depth bound, anti-aliasing via
//! jittered multi-sampling, and one rayon worker per image row.

use crate::{Color, Hittable, Scene};
use ember_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; each row worker derives its own rng from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and multiplying
/// attenuation along the path. Depth cutoff and absorption both terminate
/// with black; a miss returns the sky gradient.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    if let Some(rec) = world.hit(ray, Interval::new(0.001, f64::INFINITY)) {
        return match rec.material.scatter(ray, &rec, rng) {
            Some(scatter) => {
                scatter.attenuation * ray_color(&scatter.ray, world, depth - 1, rng)
            }
            None => Color::ZERO,
        };
    }

    sky_gradient(ray)
}

/// Sky background: white at the horizon blending to light blue upward.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * Color::new(1.0, 1.0, 1.0) + t * Color::new(0.5, 0.7, 1.0)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an accumulated color to clamped 8-bit RGB.
///
/// The clamp is load-bearing: accumulated values can exceed 1.0 and a raw
/// cast would wrap.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let r = (255.0 * linear_to_gamma(color.x).clamp(0.0, 1.0)) as u8;
    let g = (255.0 * linear_to_gamma(color.y).clamp(0.0, 1.0)) as u8;
    let b = (255.0 * linear_to_gamma(color.z).clamp(0.0, 1.0)) as u8;
    [r, g, b]
}

/// Image buffer for storing render output.
///
/// Row-major with row 0 at the bottom of the picture; each pixel is
/// written exactly once by the worker that owns its row.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }
}

/// Seed stream for row workers: mix the row index into the base seed so
/// neighboring rows get decorrelated generators.
fn row_seed(base: u64, row: u64) -> u64 {
    let mut z = base ^ row.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Render the scene to an image buffer.
///
/// One worker per image row. Each worker owns a private rng seeded from the
/// config seed and its row index, shares the scene read-only, and writes
/// only its own row, so the rows need no synchronization; rayon joins them
/// at the end.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.width, config.height);
    let width = config.width as usize;
    let samples = config.samples_per_pixel.max(1);

    image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = StdRng::seed_from_u64(row_seed(config.seed, y as u64));

            for (x, pixel) in row.iter_mut().enumerate() {
                let mut color = Color::ZERO;
                for _ in 0..samples {
                    // Jitter inside the pixel footprint so edges blend
                    // instead of aliasing.
                    let s = (x as f64 + rng.gen::<f64>()) / config.width as f64;
                    let t = (y as f64 + rng.gen::<f64>()) / config.height as f64;

                    let ray = scene.camera().ray(s, t, &mut rng);
                    color += ray_color(&ray, scene.world(), config.max_depth, &mut rng);
                }
                *pixel = color / samples as f64;
            }
        });

    image
}

//! Procedural textures.
//!
//! A texture is a pure function of the surface point; the only precomputed
//! state is the Perlin permutation tables, which are read-only after
//! construction. Like materials, textures are a closed sum type.

use crate::{Color, Perlin};
use ember_math::Vec3;
use std::sync::Arc;

/// A procedural texture.
pub enum Texture {
    /// Constant color everywhere.
    Solid(Color),
    /// 3-D lattice checkerboard (not a 2-D UV checker): the sign of
    /// sin(10x)*sin(10y)*sin(10z) selects the color.
    Checker { even: Color, odd: Color },
    /// Marble-like Perlin turbulence, banded along z.
    Noise { perlin: Arc<Perlin>, scale: f64 },
}

impl Texture {
    /// Evaluate the texture at a surface point.
    pub fn value(&self, p: Vec3) -> Color {
        match self {
            Texture::Solid(color) => *color,

            Texture::Checker { even, odd } => {
                let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
                if sines < 0.0 {
                    *odd
                } else {
                    *even
                }
            }

            Texture::Noise { perlin, scale } => {
                Color::ONE * 0.5 * (1.0 + (scale * p.z + 10.0 * perlin.turbulence(p)).sin())
            }
        }
    }
}

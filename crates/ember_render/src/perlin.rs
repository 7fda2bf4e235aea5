//! Perlin gradient noise for procedural texturing.

use ember_math::Vec3;
use rand::Rng;

const POINT_COUNT: usize = 256;

/// Precomputed Perlin state: 256 random unit gradient vectors and one
/// permutation of [0, 256) per axis. Built once at texture construction,
/// read-only afterwards.
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    /// Build the permutation tables and gradient set from the given rng.
    ///
    /// Construction happens in the single-threaded setup phase; the render
    /// workers only ever read the tables.
    pub fn new(rng: &mut impl Rng) -> Self {
        let gradients = (0..POINT_COUNT)
            .map(|_| {
                Vec3::new(
                    rng.gen::<f64>() * 2.0 - 1.0,
                    rng.gen::<f64>() * 2.0 - 1.0,
                    rng.gen::<f64>() * 2.0 - 1.0,
                )
                .normalize()
            })
            .collect();

        Self {
            gradients,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Smoothed gradient noise in [-1, 1].
    ///
    /// Trilinear interpolation of the 8 lattice-corner gradients around p;
    /// corner indices combine the three permutation tables by XOR.
    pub fn noise(&self, p: Vec3) -> f64 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        let mut corners = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in corners.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let index = self.perm_x[((i + di as i64) & 255) as usize]
                        ^ self.perm_y[((j + dj as i64) & 255) as usize]
                        ^ self.perm_z[((k + dk as i64) & 255) as usize];
                    *corner = self.gradients[index];
                }
            }
        }

        trilinear_interp(&corners, u, v, w)
    }

    /// Multi-octave turbulence: 7 octaves at halving weight and doubling
    /// frequency, absolute value of the accumulated sum.
    pub fn turbulence(&self, p: Vec3) -> f64 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..7 {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// A random permutation of [0, 256) (Fisher-Yates).
fn generate_perm(rng: &mut impl Rng) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
    for i in (1..POINT_COUNT).rev() {
        let target = rng.gen_range(0..=i);
        perm.swap(i, target);
    }
    perm
}

/// Interpolate the corner gradients with Hermite smoothing (3t^2 - 2t^3)
/// on each axis.
fn trilinear_interp(corners: &[[[Vec3; 2]; 2]; 2], u: f64, v: f64, w: f64) -> f64 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in corners.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, corner) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                let weight = Vec3::new(u - fi, v - fj, w - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * corner.dot(weight);
            }
        }
    }

    accum
}

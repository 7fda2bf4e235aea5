//! Surface scattering.
//!
//! Materials are a closed sum type dispatched by a single match: the variant
//! set is small and fixed, and primitives share one material through an Arc
//! rather than cloning it.

use crate::{hittable::HitRecord, Texture};
use ember_math::{Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter: the continuing ray plus the color
/// multiplier applied to its contribution.
pub struct Scatter {
    pub attenuation: Color,
    pub ray: Ray,
}

/// A surface material.
pub enum Material {
    /// Diffuse surface; always scatters.
    Lambertian { albedo: Arc<Texture> },
    /// Specular surface; fuzz in [0, 1], absorbed when the perturbed
    /// reflection would re-enter the surface.
    Metal { albedo: Arc<Texture>, fuzz: f64 },
    /// Glass; never absorbs, splits between reflection and refraction.
    Dielectric { ref_idx: f64 },
}

impl Material {
    /// Diffuse material with a solid albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian {
            albedo: Arc::new(Texture::Solid(albedo)),
        }
    }

    /// Diffuse material with a shared texture.
    pub fn textured_lambertian(albedo: Arc<Texture>) -> Self {
        Self::Lambertian { albedo }
    }

    /// Metal with a solid albedo color. Fuzz 0.0 is a perfect mirror.
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Self::Metal {
            albedo: Arc::new(Texture::Solid(albedo)),
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Dielectric with the given index of refraction (1.5 = glass).
    pub fn dielectric(ref_idx: f64) -> Self {
        Self::Dielectric { ref_idx }
    }

    /// Scatter an incoming ray at a surface hit.
    ///
    /// Returns the attenuated continuing ray, or None when the ray is
    /// absorbed. The scattered ray always carries the incoming ray's time so
    /// motion blur stays consistent across bounces.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        match self {
            Material::Lambertian { albedo } => {
                let target = rec.p + rec.normal + random_in_unit_sphere(rng);
                Some(Scatter {
                    attenuation: albedo.value(rec.p),
                    ray: Ray::new(rec.p, target - rec.p, ray_in.time()),
                })
            }

            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);

                // The fuzz draw would be multiplied by zero anyway, and
                // skipping it is measurably faster on mirror materials.
                let direction = if *fuzz == 0.0 {
                    reflected
                } else {
                    reflected + *fuzz * random_in_unit_sphere(rng)
                };

                if direction.dot(rec.normal) > 0.0 {
                    Some(Scatter {
                        attenuation: albedo.value(rec.p),
                        ray: Ray::new(rec.p, direction, ray_in.time()),
                    })
                } else {
                    None
                }
            }

            Material::Dielectric { ref_idx } => {
                let dir = ray_in.direction();

                // rec.normal is the outward normal; a positive dot means the
                // ray is leaving the medium.
                let (outward_normal, ni_over_nt, cosine) = if dir.dot(rec.normal) > 0.0 {
                    (
                        -rec.normal,
                        *ref_idx,
                        ref_idx * dir.dot(rec.normal) / dir.length(),
                    )
                } else {
                    (
                        rec.normal,
                        1.0 / ref_idx,
                        -dir.dot(rec.normal) / dir.length(),
                    )
                };

                let direction = match refract(dir, outward_normal, ni_over_nt) {
                    Some(refracted) if gen_f64(rng) >= schlick(cosine, *ref_idx) => refracted,
                    // Total internal reflection, or the Fresnel draw chose
                    // the reflected path.
                    _ => reflect(dir, rec.normal),
                };

                Some(Scatter {
                    attenuation: Color::ONE,
                    ray: Ray::new(rec.p, direction, ray_in.time()),
                })
            }
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface with the given index ratio.
///
/// Returns None when Snell's law has no solution (total internal
/// reflection), forcing the caller to reflect.
pub(crate) fn refract(v: Vec3, n: Vec3, ni_over_nt: f64) -> Option<Vec3> {
    let uv = v.normalize();
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    if discriminant > 0.0 {
        Some(ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
    } else {
        None
    }
}

/// Schlick's approximation for Fresnel reflectance.
pub(crate) fn schlick(cosine: f64, ref_idx: f64) -> f64 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Rejection-sample a point inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
            gen_f64(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform f64 in [0, 1) from a type-erased rng.
#[inline]
pub(crate) fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    use rand::Rng;
    rng.gen()
}

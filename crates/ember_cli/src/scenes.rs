//! Procedural scene construction.
//!
//! Scene setup runs single-threaded before rendering starts, so one seeded
//! rng is fine here; the render workers each get their own.

use ember_math::Vec3;
use ember_render::{
    BvhNode, Camera, Color, Focus, HittableList, Material, Perlin, Scene, Sphere, Texture,
};
use rand::Rng;
use std::sync::Arc;

/// The book-style random sphere field: a checkered ground plane, three hero
/// spheres (marble, mirror metal, glass), and a jittered grid of small
/// spheres. Small diffuse spheres drift upward over the shutter interval to
/// exercise motion blur.
pub fn random_scene(rng: &mut impl Rng, aspect: f64) -> Scene {
    let mut list = HittableList::new();

    let checker = Arc::new(Texture::Checker {
        even: Color::new(0.2, 0.3, 0.1),
        odd: Color::new(0.9, 0.9, 0.9),
    });
    list.add(Box::new(Sphere::stationary(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::textured_lambertian(checker)),
    )));

    let marble = Arc::new(Material::textured_lambertian(Arc::new(Texture::Noise {
        perlin: Arc::new(Perlin::new(rng)),
        scale: 4.0,
    })));
    list.add(Box::new(Sphere::stationary(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        marble.clone(),
    )));
    list.add(Box::new(Sphere::stationary(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let glass = Arc::new(Material::dielectric(1.5));
    list.add(Box::new(Sphere::stationary(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        glass.clone(),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            // Keep the field clear of the glass hero sphere.
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.6 {
                // Diffuse, drifting upward over the shutter interval.
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                let center1 = center + Vec3::new(0.0, 0.5 * rng.gen::<f64>(), 0.0);
                list.add(Box::new(Sphere::moving(
                    center,
                    center1,
                    0.0,
                    1.0,
                    0.2,
                    Arc::new(Material::lambertian(albedo)),
                )));
            } else if choose_mat < 0.8 {
                let albedo = Color::new(
                    0.5 * (1.0 + rng.gen::<f64>()),
                    0.5 * (1.0 + rng.gen::<f64>()),
                    0.5 * (1.0 + rng.gen::<f64>()),
                );
                list.add(Box::new(Sphere::stationary(
                    center,
                    0.2,
                    Arc::new(Material::metal(albedo, 0.5 * rng.gen::<f64>())),
                )));
            } else if choose_mat < 0.9 {
                list.add(Box::new(Sphere::stationary(center, 0.2, glass.clone())));
            } else {
                list.add(Box::new(Sphere::stationary(center, 0.2, marble.clone())));
            }
        }
    }

    log::debug!("scene holds {} primitives", list.len());

    let mut camera = Camera::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_viewport(20.0, aspect)
        .with_lens(0.1, Focus::Fixed(10.0))
        .with_shutter(1.0);
    camera.initialize();

    let world = BvhNode::new(list.into_objects());
    Scene::new(camera, Box::new(world))
}

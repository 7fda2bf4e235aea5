//! Bounding volume hierarchy acceleration structure.
//!
//! A binary tree of AABBs used to prune ray-intersection candidates.

use crate::{HitRecord, Hittable};
use ember_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children; bbox tightly bounds both.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        objects: Vec<Box<dyn Hittable>>,
        bbox: Aabb,
    },
    /// Empty node (for edge cases).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(objects)
    }

    /// Recursive BVH construction.
    ///
    /// Median-split: sort objects by centroid on the longest axis, split in
    /// half, recurse.
    fn build(mut objects: Vec<Box<dyn Hittable>>) -> Self {
        let n = objects.len();

        let bounds = objects
            .iter()
            .map(|o| o.bounding_box())
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b));

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                objects,
                bbox: bounds,
            };
        }

        // Split axis comes from the spread of the centroids, not the boxes.
        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, obj| {
            let c = obj.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|a, b| {
            let a_centroid = a.bounding_box().centroid();
            let b_centroid = b.bounding_box().centroid();
            let a_val = match axis {
                0 => a_centroid.x,
                1 => a_centroid.y,
                _ => a_centroid.z,
            };
            let b_val = match axis {
                0 => b_centroid.x,
                1 => b_centroid.y,
                _ => b_centroid.z,
            };
            a_val
                .partial_cmp(&b_val)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = n / 2;
        let right_objects = objects.split_off(mid);
        let left_objects = objects;

        BvhNode::Branch {
            left: Box::new(Self::build(left_objects)),
            right: Box::new(Self::build(right_objects)),
            bbox: bounds,
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest: Option<HitRecord> = None;
                let mut closest_so_far = ray_t.max;

                for obj in objects {
                    if let Some(rec) = obj.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                        closest_so_far = rec.t;
                        closest = Some(rec);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                // The right child only needs to search up to the left
                // child's hit, and the two results combine into the closer
                // one - never decided independently.
                let hit_left = left.hit(ray, ray_t);
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max));

                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, HittableList, Material, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(vec![]);
        assert!(matches!(bvh, BvhNode::Empty));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(bvh.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_bvh_single_sphere() {
        let objects: Vec<Box<dyn Hittable>> = vec![Box::new(Sphere::stationary(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            gray(),
        ))];
        let bvh = BvhNode::new(objects);

        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray aimed at the sphere must hit");
        assert!((rec.t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let spheres: Vec<Box<dyn Hittable>> = (0..10)
            .map(|i| {
                Box::new(Sphere::stationary(
                    Vec3::new(i as f64, 0.0, -5.0),
                    0.5,
                    gray(),
                )) as Box<dyn Hittable>
            })
            .collect();
        let bvh = BvhNode::new(spheres);

        let ray = Ray::new_simple(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray over sphere 5 must hit");

        // Sphere at z=-5 with radius 0.5: front face at z=-4.5.
        assert!((rec.p.z - (-4.5)).abs() < 1e-9);
    }

    /// BVH traversal must agree with a plain linear scan on every ray.
    #[test]
    fn test_bvh_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(1234);

        let mut centers = Vec::new();
        for _ in 0..64 {
            centers.push((
                Vec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                ),
                rng.gen_range(0.2..1.5),
            ));
        }

        let material = gray();
        let mut list = HittableList::new();
        let mut boxed: Vec<Box<dyn Hittable>> = Vec::new();
        for &(center, radius) in &centers {
            list.add(Box::new(Sphere::stationary(center, radius, material.clone())));
            boxed.push(Box::new(Sphere::stationary(center, radius, material.clone())));
        }
        let bvh = BvhNode::new(boxed);

        for _ in 0..500 {
            let origin = Vec3::new(
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
            );
            let direction = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            if direction.length_squared() < 1e-6 {
                continue;
            }
            let ray = Ray::new_simple(origin, direction);
            let interval = Interval::new(0.001, f64::INFINITY);

            match (list.hit(&ray, interval), bvh.hit(&ray, interval)) {
                (Some(a), Some(b)) => {
                    assert!((a.t - b.t).abs() < 1e-9, "t mismatch: {} vs {}", a.t, b.t);
                    assert!((a.p - b.p).length() < 1e-9);
                }
                (None, None) => {}
                (a, b) => panic!(
                    "hit disagreement: linear={:?} bvh={:?}",
                    a.map(|r| r.t),
                    b.map(|r| r.t)
                ),
            }
        }
    }
}

//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over the scene's primitives. Each level sorts its
//! primitives by a key along one axis and splits the sorted run at the
//! median.

use crate::{HitRecord, Hittable, HittableList, Primitive, Ray};
use prism_core::SplitAxis;
use prism_math::{Aabb, Interval};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf with primitives.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node holding one or two primitives.
    Leaf {
        primitives: Vec<Primitive>,
        bbox: Aabb,
    },
    /// Scene without primitives.
    Empty,
}

impl BvhNode {
    /// Build a BVH that takes ownership of `primitives`.
    pub fn new(primitives: Vec<Primitive>, split: SplitAxis) -> Self {
        if primitives.is_empty() {
            return BvhNode::Empty;
        }
        Self::build(primitives, split)
    }

    pub fn from_list(list: HittableList, split: SplitAxis) -> Self {
        Self::new(list.into_primitives(), split)
    }

    fn build(mut primitives: Vec<Primitive>, split: SplitAxis) -> Self {
        let n = primitives.len();

        let bounds = primitives
            .iter()
            .map(|p| p.bounding_box())
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b));

        if n <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                primitives,
                bbox: bounds,
            };
        }

        match split {
            SplitAxis::MinX => {
                primitives.sort_by(|a, b| {
                    a.bounding_box().x.min.total_cmp(&b.bounding_box().x.min)
                });
            }
            SplitAxis::LongestAxis => {
                let centroid_bounds = primitives.iter().fold(Aabb::EMPTY, |acc, p| {
                    let c = p.bounding_box().centroid();
                    Aabb::surrounding(&acc, &Aabb::from_points(c, c))
                });
                let axis = centroid_bounds.longest_axis();

                primitives.sort_by(|a, b| {
                    let a_val = a.bounding_box().centroid()[axis];
                    let b_val = b.bounding_box().centroid()[axis];
                    a_val.total_cmp(&b_val)
                });
            }
        }

        // Split at midpoint
        let mid = n / 2;
        let right = primitives.split_off(mid);
        let left = primitives;

        BvhNode::Branch {
            left: Box::new(Self::build(left, split)),
            right: Box::new(Self::build(right, split)),
            bbox: bounds,
        }
    }

    /// Number of levels, counting leaves as depth 1.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    pub fn primitive_count(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { primitives, .. } => primitives.len(),
            BvhNode::Branch { left, right, .. } => {
                left.primitive_count() + right.primitive_count()
            }
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { primitives, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest = None;
                let mut closest_so_far = ray_t.max;
                for prim in primitives {
                    if let Some(rec) = prim.hit(ray, ray_t.with_max(closest_so_far)) {
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

                let hit_left = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_t = hit_left.map_or(ray_t, |rec| ray_t.with_max(rec.t));
                let hit_right = right.hit(ray, right_t);

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
    use crate::{Cuboid, Material, MaterialArena, MaterialId, MovingSphere, Sphere, Triangle};
    use prism_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn material() -> MaterialId {
        MaterialArena::new().add(Material::diffuse(Vec3::splat(0.5)))
    }

    /// Static and moving spheres on a jittered grid plus a few triangles and boxes.
    fn random_primitives(seed: u64) -> Vec<Primitive> {
        let mut rng = StdRng::seed_from_u64(seed);
        let material = material();
        let mut prims = Vec::new();

        for a in -6..6 {
            for b in -6..6 {
                let center = Vec3::new(
                    a as f32 * 2.0 + rng.gen_range(-0.4..0.4),
                    rng.gen_range(-0.4..0.4),
                    b as f32 * 2.0 + rng.gen_range(-0.4..0.4),
                );
                let choice: f32 = rng.gen();
                let prim: Primitive = if choice < 0.55 {
                    Sphere::new(center, rng.gen_range(0.1..0.5), material).into()
                } else if choice < 0.7 {
                    // Short shutter span so rays at other times see it resting
                    let time0 = rng.gen_range(0.0..0.5);
                    MovingSphere::new(
                        center,
                        center + Vec3::new(rng.gen_range(-1.0..1.0), 0.5, 0.0),
                        time0,
                        time0 + 0.25,
                        rng.gen_range(0.1..0.5),
                        material,
                    )
                    .into()
                } else if choice < 0.85 {
                    Triangle::new(
                        center + Vec3::new(-0.5, 0.0, 0.0),
                        center + Vec3::new(0.5, 0.0, 0.0),
                        center + Vec3::new(0.0, 0.5, 0.1),
                        material,
                    )
                    .into()
                } else {
                    Cuboid::new(center - Vec3::splat(0.3), center + Vec3::splat(0.3), material)
                        .into()
                };
                prims.push(prim);
            }
        }
        prims
    }

    fn random_rays(seed: u64, count: usize) -> Vec<Ray> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let origin = Vec3::new(
                    rng.gen_range(-15.0..15.0),
                    rng.gen_range(2.0..10.0),
                    rng.gen_range(-15.0..15.0),
                );
                let target = Vec3::new(
                    rng.gen_range(-12.0..12.0),
                    rng.gen_range(-0.5..0.5),
                    rng.gen_range(-12.0..12.0),
                );
                Ray::new(origin, target - origin, rng.gen_range(-1.0..2.0))
            })
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(vec![], SplitAxis::default());
        assert!(matches!(bvh, BvhNode::Empty));
        assert!(bvh.hit(&Ray::default(), Interval::UNIVERSE).is_none());
        assert_eq!(bvh.depth(), 0);
    }

    #[test]
    fn test_bvh_single_sphere() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material());
        let bvh = BvhNode::new(vec![sphere.into()], SplitAxis::default());

        // Should create a leaf
        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let rec = bvh.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let material = material();
        let spheres = (0..10)
            .map(|i| Sphere::new(Vec3::new(i as f32, 0.0, -5.0), 0.5, material).into())
            .collect();

        let bvh = BvhNode::new(spheres, SplitAxis::default());
        assert_eq!(bvh.primitive_count(), 10);

        // Ray that hits sphere at x=5
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let rec = bvh.hit(&ray, Interval::from_min(0.001)).unwrap();

        // Hit point should be near z = -4.5 (sphere at z=-5, radius 0.5)
        assert!((rec.point.z - (-4.5)).abs() < 0.01);
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let prims = random_primitives(7);
        let list: HittableList = prims.iter().cloned().collect();

        for split in [SplitAxis::MinX, SplitAxis::LongestAxis] {
            let bvh = BvhNode::new(prims.clone(), split);
            assert_eq!(bvh.primitive_count(), prims.len());

            let mut hits = 0;
            for ray in random_rays(11, 2000) {
                let expected = list.hit(&ray, Interval::from_min(0.001));
                let actual = bvh.hit(&ray, Interval::from_min(0.001));

                match (expected, actual) {
                    (None, None) => {}
                    (Some(e), Some(a)) => {
                        hits += 1;
                        assert_eq!(e.t, a.t, "closest t differs for {ray:?}");
                        assert_eq!(e.point, a.point);
                    }
                    (e, a) => panic!("hit mismatch for {ray:?}: list {e:?}, bvh {a:?}"),
                }
            }
            assert!(hits > 20, "test rays should mostly hit the scene, got {hits}");
        }
    }

    #[test]
    fn test_bvh_finds_moving_sphere_after_its_span() {
        let sphere = MovingSphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(1.0, 0.0, -5.0),
            0.0,
            0.5,
            0.5,
            material(),
        );
        let list: HittableList = std::iter::once(Primitive::from(sphere.clone())).collect();
        let bvh = BvhNode::new(vec![sphere.into()], SplitAxis::default());

        for x in [-0.6, 0.0, 0.5, 1.0, 1.4, 2.0] {
            for time in [-1.0, 0.25, 1.0] {
                let ray = Ray::new(Vec3::new(x, 0.0, 0.0), Vec3::NEG_Z, time);
                let expected = list.hit(&ray, Interval::from_min(0.0)).map(|r| r.t);
                let actual = bvh.hit(&ray, Interval::from_min(0.0)).map(|r| r.t);
                assert_eq!(expected, actual, "x {x} at time {time}");
            }
        }
    }

    #[test]
    fn test_bvh_bbox_contains_children() {
        let bvh = BvhNode::new(random_primitives(3), SplitAxis::LongestAxis);

        fn check(node: &BvhNode) {
            match node {
                BvhNode::Empty => {}
                BvhNode::Leaf { primitives, bbox } => {
                    assert!(!primitives.is_empty() && primitives.len() <= LEAF_MAX_SIZE);
                    for p in primitives {
                        assert!(bbox.contains_box(&p.bounding_box()));
                    }
                }
                BvhNode::Branch { left, right, bbox } => {
                    assert!(bbox.contains_box(&left.bounding_box()));
                    assert!(bbox.contains_box(&right.bounding_box()));
                    check(left);
                    check(right);
                }
            }
        }
        check(&bvh);
    }

    #[test]
    fn test_bvh_depth_is_logarithmic() {
        let prims = random_primitives(5);
        let n = prims.len();
        let bvh = BvhNode::new(prims, SplitAxis::MinX);

        // Median splits keep the tree balanced
        let bound = (n as f32).log2().ceil() as usize + 1;
        assert!(bvh.depth() <= bound, "depth {} > {}", bvh.depth(), bound);
    }
}

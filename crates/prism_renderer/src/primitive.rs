//! Closed set of geometric primitives.

use crate::{
    hittable::{HitRecord, Hittable},
    Cuboid, MovingSphere, Ray, Sphere, Triangle,
};
use prism_math::{Aabb, Interval};

/// Any primitive the renderer can intersect.
///
/// The BVH stores primitives by value, so dispatch is a `match` rather than
/// a vtable call.
#[derive(Debug, Clone)]
pub enum Primitive {
    Sphere(Sphere),
    MovingSphere(MovingSphere),
    Triangle(Triangle),
    Cuboid(Cuboid),
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t),
            Primitive::MovingSphere(s) => s.hit(ray, ray_t),
            Primitive::Triangle(t) => t.hit(ray, ray_t),
            Primitive::Cuboid(c) => c.hit(ray, ray_t),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Primitive::Sphere(s) => s.bounding_box(),
            Primitive::MovingSphere(s) => s.bounding_box(),
            Primitive::Triangle(t) => t.bounding_box(),
            Primitive::Cuboid(c) => c.bounding_box(),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<MovingSphere> for Primitive {
    fn from(s: MovingSphere) -> Self {
        Primitive::MovingSphere(s)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}

impl From<Cuboid> for Primitive {
    fn from(c: Cuboid) -> Self {
        Primitive::Cuboid(c)
    }
}

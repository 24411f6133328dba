//! Sphere primitives for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use prism_math::{solve_quadratic, Aabb, Interval, UnitVec3, Vec3};
use std::f32::consts::PI;

/// A static sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not strictly positive.
    pub fn new(center: Vec3, radius: f32, material: MaterialId) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        let rvec = Vec3::splat(radius);

        Self {
            center,
            radius,
            material,
            bbox: Aabb::from_points(center - rvec, center + rvec),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(self.center, self.radius, self.material, ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// A sphere whose center moves linearly over a time span.
#[derive(Debug, Clone)]
pub struct MovingSphere {
    center0: Vec3,
    center1: Vec3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: MaterialId,
    bbox: Aabb,
}

impl MovingSphere {
    /// Create a sphere that sits at `center0` at `time0` and at `center1`
    /// at `time1`.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is not strictly positive or `time1 <= time0`.
    pub fn new(
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: MaterialId,
    ) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        assert!(time1 > time0, "moving sphere needs time1 > time0, got [{time0}, {time1}]");
        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center0 - rvec, center0 + rvec);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);

        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    /// Center at `time`. The sphere rests at `center0` before the span and at
    /// `center1` after it, so it never leaves its bounding box.
    pub fn center(&self, time: f32) -> Vec3 {
        let s = ((time - self.time0) / (self.time1 - self.time0)).clamp(0.0, 1.0);
        self.center0 + s * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(self.center(ray.time()), self.radius, self.material, ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Nearest root of `|o + t*d - c|^2 = r^2` inside `ray_t`.
fn hit_sphere(
    center: Vec3,
    radius: f32,
    material: MaterialId,
    ray: &Ray,
    ray_t: Interval,
) -> Option<HitRecord> {
    let oc = ray.origin() - center;
    let a = ray.direction().length_squared();
    let half_b = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let (t0, t1) = solve_quadratic(a, 2.0 * half_b, c)?;
    let t = if ray_t.contains(t0) {
        t0
    } else if ray_t.contains(t1) {
        t1
    } else {
        return None;
    };

    let point = ray.at(t);
    let normal = UnitVec3::new((point - center) / radius)?;
    let (u, v) = sphere_uv(normal);

    Some(HitRecord {
        t,
        point,
        normal,
        material,
        u,
        v,
        double_sided: false,
    })
}

/// Spherical coordinates of a point on the unit sphere.
///
/// `u` runs around +Y starting at -X, `v` runs from -Y (0) to +Y (1).
fn sphere_uv(n: UnitVec3) -> (f32, f32) {
    let theta = (-n.y).clamp(-1.0, 1.0).acos();
    let phi = (-n.z).atan2(n.x) + PI;

    (phi / (2.0 * PI), theta / PI)
}

//! Axis-aligned box primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use prism_math::{Aabb, Interval, UnitVec3, Vec3};

/// A solid axis-aligned box.
#[derive(Debug, Clone)]
pub struct Cuboid {
    bounds: Aabb,
    material: MaterialId,
}

impl Cuboid {
    /// # Panics
    ///
    /// Panics unless `min < max` on every axis.
    pub fn new(min: Vec3, max: Vec3, material: MaterialId) -> Self {
        Self {
            bounds: Aabb::new(min, max),
            material,
        }
    }
}

/// Outward normal of the face perpendicular to `axis`.
fn face_normal(axis: usize, positive: bool) -> UnitVec3 {
    match (axis, positive) {
        (0, true) => UnitVec3::X,
        (0, false) => UnitVec3::NEG_X,
        (1, true) => UnitVec3::Y,
        (1, false) => UnitVec3::NEG_Y,
        (_, true) => UnitVec3::Z,
        (_, false) => UnitVec3::NEG_Z,
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let origin = ray.origin();
        let dir = ray.direction();
        let (min, max) = (self.bounds.min(), self.bounds.max());

        // Slab test that remembers which axis bounds the entry and exit
        let (mut t_near, mut near_axis) = (f32::NEG_INFINITY, 0);
        let (mut t_far, mut far_axis) = (f32::INFINITY, 0);

        for axis in 0..3 {
            let inv = 1.0 / dir[axis];
            let mut t0 = (min[axis] - origin[axis]) * inv;
            let mut t1 = (max[axis] - origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            // NaN (origin on a slab plane of a parallel axis) constrains nothing
            if t0 > t_near {
                t_near = t0;
                near_axis = axis;
            }
            if t1 < t_far {
                t_far = t1;
                far_axis = axis;
            }
        }

        if t_near > t_far {
            return None;
        }

        let (t, axis, exiting) = if ray_t.contains(t_near) {
            (t_near, near_axis, false)
        } else if ray_t.contains(t_far) {
            (t_far, far_axis, true)
        } else {
            return None;
        };
        if !t.is_finite() {
            return None;
        }

        // Entering through the face the ray comes from, exiting through the other
        let normal = face_normal(axis, exiting == (dir[axis] > 0.0));
        let point = ray.at(t);

        let (u_axis, v_axis) = ((axis + 1) % 3, (axis + 2) % 3);
        let u = (point[u_axis] - min[u_axis]) / (max[u_axis] - min[u_axis]);
        let v = (point[v_axis] - min[v_axis]) / (max[v_axis] - min[v_axis]);

        Some(HitRecord {
            t,
            point,
            normal,
            material: self.material,
            u: u.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
            double_sided: false,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }
}

//! Triangle primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    MaterialId, Ray,
};
use prism_math::{Aabb, Interval, UnitVec3, Vec3};

/// Below this the intersection system is treated as singular.
const SINGULAR_EPSILON: f32 = 1e-12;

/// A triangle defined by three vertices in counter-clockwise order.
#[derive(Debug, Clone)]
pub struct Triangle {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// Geometric normal, `(b - a) x (c - a)` normalized
    normal: UnitVec3,
    double_sided: bool,
    material: MaterialId,
    bbox: Aabb,
}

impl Triangle {
    /// Create a single-sided triangle.
    ///
    /// # Panics
    ///
    /// Panics if the vertices are collinear.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, material: MaterialId) -> Self {
        let normal = UnitVec3::new((b - a).cross(c - a))
            .unwrap_or_else(|| panic!("degenerate triangle: {a}, {b}, {c}"));

        let min = a.min(b).min(c);
        let max = a.max(b).max(c);

        Self {
            a,
            b,
            c,
            normal,
            double_sided: false,
            material,
            bbox: Aabb::from_points(min, max),
        }
    }

    /// Light the back face as well as the front.
    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    pub fn normal(&self) -> UnitVec3 {
        self.normal
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }
}

impl Hittable for Triangle {
    /// Solves `o + t d = a + beta (b - a) + gamma (c - a)` with Cramer's rule.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let dir = ray.direction();
        if dir.dot(*self.normal) == 0.0 {
            return None;
        }

        let (a, b, c, o) = (self.a, self.b, self.c, ray.origin());

        // Columns of the system matrix and the right-hand side
        let (ma, mb, mc) = (a.x - b.x, a.y - b.y, a.z - b.z);
        let (md, me, mf) = (a.x - c.x, a.y - c.y, a.z - c.z);
        let (mg, mh, mi) = (dir.x, dir.y, dir.z);
        let (j, k, l) = (a.x - o.x, a.y - o.y, a.z - o.z);

        let ei_hf = me * mi - mh * mf;
        let gf_di = mg * mf - md * mi;
        let dh_eg = md * mh - me * mg;

        let m = ma * ei_hf + mb * gf_di + mc * dh_eg;
        if m.abs() < SINGULAR_EPSILON || !m.is_finite() {
            return None;
        }

        let ak_jb = ma * k - j * mb;
        let jc_al = j * mc - ma * l;
        let bl_kc = mb * l - k * mc;

        let t = -(mf * ak_jb + me * jc_al + md * bl_kc) / m;
        if !ray_t.contains(t) {
            return None;
        }

        let gamma = (mi * ak_jb + mh * jc_al + mg * bl_kc) / m;
        if !(0.0..=1.0).contains(&gamma) {
            return None;
        }

        let beta = (j * ei_hf + k * gf_di + l * dh_eg) / m;
        if beta < 0.0 || beta > 1.0 - gamma {
            return None;
        }

        Some(HitRecord {
            t,
            point: ray.at(t),
            normal: self.normal,
            material: self.material,
            u: beta,
            v: gamma,
            double_sided: self.double_sided,
        })
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

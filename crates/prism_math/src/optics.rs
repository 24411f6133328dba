//! Reflection, refraction and Fresnel reflectance at a surface.
//!
//! All functions take the *outward* surface normal. Whether the incident
//! direction is entering or leaving the surface is decided from the sign of
//! `i . n`; the medium outside every surface has an index of refraction of 1.

use crate::{UnitVec3, Vec3};

/// Mirror `i` about the normal `n`: `i - 2 (i . n) n`.
#[inline]
pub fn reflect(i: Vec3, n: UnitVec3) -> Vec3 {
    i - 2.0 * i.dot(*n) * n.get()
}

/// Refract the unit direction `i` through a surface of index `ior`.
///
/// The incident direction is split into components perpendicular and
/// parallel to the normal; the perpendicular part is scaled by the index
/// ratio. Returns `None` on total internal reflection.
pub fn refract(i: UnitVec3, n: UnitVec3, ior: f32) -> Option<UnitVec3> {
    let (n, ratio) = if i.dot(*n) > 0.0 {
        // Leaving the surface: flip the normal and invert the ratio
        (-n, ior)
    } else {
        (n, 1.0 / ior)
    };

    let cos_i = i.dot(*n);
    let discriminant = 1.0 - ratio * ratio * (1.0 - cos_i * cos_i);
    if discriminant < 0.0 {
        return None;
    }

    let perpendicular = ratio * (i.get() - cos_i * n.get());
    let parallel = -discriminant.sqrt() * n.get();
    UnitVec3::new(perpendicular + parallel)
}

/// Unpolarized Fresnel reflectance for a unit incident direction.
///
/// Returns 1 on total internal reflection.
pub fn fresnel(i: UnitVec3, n: UnitVec3, ior: f32) -> f32 {
    let mut cos_i = i.dot(*n).clamp(-1.0, 1.0);
    let (eta_i, eta_t) = if cos_i > 0.0 { (ior, 1.0) } else { (1.0, ior) };

    let sin_t = eta_i / eta_t * (1.0 - cos_i * cos_i).max(0.0).sqrt();
    if sin_t >= 1.0 {
        return 1.0;
    }

    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();
    cos_i = cos_i.abs();
    let rs = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let rp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    (rs * rs + rp * rp) / 2.0
}

/// Schlick's approximation of [`fresnel`].
pub fn schlick(i: UnitVec3, n: UnitVec3, ior: f32) -> f32 {
    let cos_i = i.dot(*n).clamp(-1.0, 1.0);
    let (eta_i, eta_t) = if cos_i > 0.0 { (ior, 1.0) } else { (1.0, ior) };

    // Use the angle on the less dense side of the interface
    let cosine = if eta_i > eta_t {
        let sin_t = eta_i / eta_t * (1.0 - cos_i * cos_i).max(0.0).sqrt();
        if sin_t >= 1.0 {
            return 1.0;
        }
        (1.0 - sin_t * sin_t).sqrt()
    } else {
        cos_i.abs()
    };

    let r0 = ((eta_i - eta_t) / (eta_i + eta_t)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

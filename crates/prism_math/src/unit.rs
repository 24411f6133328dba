use std::ops::{Deref, Neg};

use crate::Vec3;

/// A direction guaranteed to have unit length.
///
/// Only constructible by normalizing an input vector, so hot paths
/// (normals, incident directions) never renormalize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVec3(Vec3);

impl UnitVec3 {
    pub const X: UnitVec3 = UnitVec3(Vec3::X);
    pub const Y: UnitVec3 = UnitVec3(Vec3::Y);
    pub const Z: UnitVec3 = UnitVec3(Vec3::Z);
    pub const NEG_X: UnitVec3 = UnitVec3(Vec3::NEG_X);
    pub const NEG_Y: UnitVec3 = UnitVec3(Vec3::NEG_Y);
    pub const NEG_Z: UnitVec3 = UnitVec3(Vec3::NEG_Z);

    /// Normalizes `v`. Returns `None` when `v` has zero length or
    /// non-finite components.
    #[inline]
    pub fn new(v: Vec3) -> Option<Self> {
        v.try_normalize().map(Self)
    }

    /// The underlying vector.
    #[inline]
    pub fn get(self) -> Vec3 {
        self.0
    }
}

impl Deref for UnitVec3 {
    type Target = Vec3;

    #[inline]
    fn deref(&self) -> &Vec3 {
        &self.0
    }
}

impl Neg for UnitVec3 {
    type Output = UnitVec3;

    #[inline]
    fn neg(self) -> UnitVec3 {
        UnitVec3(-self.0)
    }
}

impl From<UnitVec3> for Vec3 {
    #[inline]
    fn from(unit: UnitVec3) -> Vec3 {
        unit.0
    }
}

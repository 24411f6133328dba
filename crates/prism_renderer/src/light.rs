//! Point light source.

use prism_math::{Color, Vec3};

/// An isotropic point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self { position, intensity }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 70.0, 20.0), Color::splat(0.5))
    }
}

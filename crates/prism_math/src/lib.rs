// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod aabb;
mod interval;
pub mod optics;
mod quadratic;
mod ray;
mod unit;

pub use aabb::Aabb;
pub use interval::Interval;
pub use quadratic::solve_quadratic;
pub use ray::Ray;
pub use unit::UnitVec3;

/// RGB color with linear components, usually in [0, 1].
pub type Color = Vec3;

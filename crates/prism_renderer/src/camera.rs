//! Camera for ray generation.

use crate::{Ray, Sampler};
use prism_math::Vec3;

/// Pinhole camera with an optional shutter interval.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,

    // Lens settings
    vfov: f32, // Vertical field of view in degrees
    aspect_ratio: f32,

    // Shutter
    time0: f32,
    time1: f32,

    // Cached computed values (set by initialize())
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 0.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            time0: 0.0,
            time1: 0.0,
            // Cached values (initialized to defaults)
            origin: Vec3::ZERO,
            lower_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aspect_ratio: f32) -> Self {
        self.vfov = vfov;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the shutter open and close times.
    pub fn with_shutter(mut self, time0: f32, time1: f32) -> Self {
        self.time0 = time0;
        self.time1 = time1;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.origin = self.look_from;

        // Viewport sits at unit distance along -w
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        self.lower_left = self.origin - half_width * self.u - half_height * self.v - self.w;
        self.horizontal = 2.0 * half_width * self.u;
        self.vertical = 2.0 * half_height * self.v;
    }

    /// Ray through viewport coordinates `(s, t)` in `[0, 1]^2`, with
    /// `(0, 0)` at the bottom-left corner.
    pub fn get_ray(&self, s: f32, t: f32, time: f32) -> Ray {
        let direction = self.lower_left + s * self.horizontal + t * self.vertical - self.origin;
        Ray::new(self.origin, direction, time)
    }

    /// Random time inside the shutter interval.
    pub fn sample_time(&self, sampler: &mut Sampler) -> f32 {
        sampler.uniform(self.time0, self.time1)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_initialize() {
        let mut camera = Camera::new()
            .with_position(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -1.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            .with_lens(90.0, 1.0);

        camera.initialize();

        assert_eq!(camera.origin(), Vec3::ZERO);
        assert!((camera.w - Vec3::Z).length() < 0.001);
        assert!((camera.u - Vec3::X).length() < 0.001);
        assert!((camera.v - Vec3::Y).length() < 0.001);
    }

    #[test]
    fn test_camera_ray_direction() {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 1.0);
        camera.initialize();

        // Center ray points straight at look_at
        let ray = camera.get_ray(0.5, 0.5, 0.0);
        assert!((ray.direction() - Vec3::NEG_Z).length() < 1e-5);

        // Corners span the 90 degree field of view
        let corner = camera.get_ray(0.0, 0.0, 0.0);
        assert!((corner.direction() - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-5);
        let corner = camera.get_ray(1.0, 1.0, 0.0);
        assert!((corner.direction() - Vec3::new(1.0, 1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_aspect_widens_viewport() {
        let mut camera = Camera::new()
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 2.0);
        camera.initialize();

        let right = camera.get_ray(1.0, 0.5, 0.0);
        assert!((right.direction() - Vec3::new(2.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_camera_shutter_time() {
        let mut camera = Camera::new().with_shutter(0.25, 0.75);
        camera.initialize();

        let mut sampler = Sampler::new(3);
        for _ in 0..100 {
            let time = camera.sample_time(&mut sampler);
            assert!((0.25..0.75).contains(&time));
        }

        let ray = camera.get_ray(0.5, 0.5, 0.4);
        assert_eq!(ray.time(), 0.4);

        // Closed shutter always samples its single instant
        let still = Camera::new();
        assert_eq!(still.sample_time(&mut sampler), 0.0);
    }
}

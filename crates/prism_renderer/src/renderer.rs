//! Core Whitted renderer.
//!
//! Implements:
//! - Multi-sampled anti-aliasing with per-bucket seeded samplers
//! - Shutter-time sampling for moving geometry
//! - Parallel bucket rendering with rayon

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::output::quantize;
use crate::shading::ray_color;
use crate::{Sampler, Scene};
use prism_math::{Color, Interval};

/// Accumulated color sums for every pixel of an image.
///
/// Pixel `(x, y)` has `y = 0` at the bottom row, matching the viewport
/// coordinates used to generate camera rays.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Number of samples summed into each pixel
    pub samples_per_pixel: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the color sum at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the color sum at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Mean sample color at (x, y).
    pub fn average(&self, x: u32, y: u32) -> Color {
        self.get(x, y) / self.samples_per_pixel.max(1) as f32
    }

    /// Write a rendered bucket into place.
    pub fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Gamma-corrected 8-bit RGB, top row first.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 3) as usize);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&quantize(self.get(x, y), self.samples_per_pixel));
            }
        }
        bytes
    }
}

/// Sum of `samples_per_pixel` jittered samples for pixel `(x, y)`.
///
/// A sample that comes back NaN or infinite is replaced by the background
/// so one bad path can't poison the pixel.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, sampler: &mut Sampler) -> Color {
    let config = &scene.render;
    let ctx = scene.shade_context();
    let width = (config.image_width - 1).max(1) as f32;
    let height = (config.image_height() - 1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + sampler.unit()) / width;
        let t = (y as f32 + sampler.unit()) / height;
        let time = scene.camera.sample_time(sampler);

        let ray = scene.camera.get_ray(s, t, time);
        let color = ray_color(&ray, Interval::from_min(0.0), config.max_depth, &ctx);

        if color.is_finite() {
            pixel_color += color;
        } else {
            log::warn!("Non-finite sample {color} at pixel ({x}, {y}), using background");
            pixel_color += scene.shading.background;
        }
    }

    pixel_color
}

/// Render the scene across the current rayon thread pool.
pub fn render(scene: &Scene) -> ImageBuffer {
    render_buckets(scene, true)
}

/// Render the scene on the calling thread.
///
/// Produces exactly the same image as [`render`].
pub fn render_serial(scene: &Scene) -> ImageBuffer {
    render_buckets(scene, false)
}

fn render_buckets(scene: &Scene, parallel: bool) -> ImageBuffer {
    let config = &scene.render;
    let (width, height) = (config.image_width, config.image_height());
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} buckets ({})",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len(),
        if parallel {
            format!("{} threads", rayon::current_num_threads())
        } else {
            "serial".to_string()
        }
    );

    let start = Instant::now();
    let completed = AtomicUsize::new(0);
    let total = buckets.len();

    let run = |bucket: &crate::Bucket| {
        let result = BucketResult::new(*bucket, render_bucket(bucket, scene));
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("Bucket {} done ({}/{})", bucket.index, done, total);
        result
    };

    let results: Vec<BucketResult> = if parallel {
        buckets.par_iter().map(run).collect()
    } else {
        buckets.iter().map(run).collect()
    };

    let mut image = ImageBuffer::new(width, height, config.samples_per_pixel);
    for result in &results {
        image.blit(result);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BvhNode, Camera, Material, MaterialArena, PointLight, Sphere};
    use prism_core::{RenderConfig, ShadingConfig, SplitAxis};
    use prism_math::Vec3;

    fn small_scene(seed: u64) -> Scene {
        let mut materials = MaterialArena::new();
        let matte = materials.add(Material::diffuse(Color::new(0.7, 0.3, 0.3)));
        let mirror = materials.add(Material::mirror(Color::splat(0.9)));
        let glass = materials.add(Material::dielectric(1.5));

        let primitives = vec![
            Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, matte).into(),
            Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, glass).into(),
            Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, mirror).into(),
            Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, matte).into(),
        ];

        let render = RenderConfig {
            image_width: 24,
            aspect_ratio: 2.0,
            samples_per_pixel: 3,
            max_depth: 5,
            seed,
            bucket_size: 5,
            split: SplitAxis::LongestAxis,
        };

        let mut camera = Camera::new()
            .with_position(Vec3::new(0.0, 0.5, 2.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(60.0, render.aspect_ratio);
        camera.initialize();

        Scene {
            world: BvhNode::new(primitives, render.split),
            materials,
            light: PointLight::new(Vec3::new(2.0, 5.0, 2.0), Color::splat(0.8)),
            camera,
            render,
            shading: ShadingConfig::default(),
        }
    }

    #[test]
    fn test_image_buffer_dimensions() {
        let image = render_serial(&small_scene(1));
        assert_eq!((image.width, image.height), (24, 12));
        assert_eq!(image.pixels.len(), 24 * 12);
        assert_eq!(image.to_rgb8().len(), 24 * 12 * 3);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let scene = small_scene(9);
        let serial = render_serial(&scene);
        let parallel = render(&scene);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_thread_count_does_not_change_image() {
        let scene = small_scene(4);
        let render_with = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| render(&scene))
        };
        assert_eq!(render_with(1), render_with(3));
    }

    #[test]
    fn test_empty_scene_is_background() {
        let mut scene = small_scene(0);
        scene.world = BvhNode::new(Vec::new(), SplitAxis::default());

        let image = render(&scene);
        let background = scene.shading.background;
        for y in 0..image.height {
            for x in 0..image.width {
                let avg = image.average(x, y);
                assert!((avg - background).abs().max_element() < 1e-5);
            }
        }
    }

    #[test]
    fn test_blit_places_bucket() {
        let mut image = ImageBuffer::new(4, 4, 1);
        let bucket = crate::Bucket::new(2, 1, 2, 2, 0);
        let pixels = vec![Color::X, Color::Y, Color::Z, Color::ONE];
        image.blit(&BucketResult::new(bucket, pixels));

        assert_eq!(image.get(2, 1), Color::X);
        assert_eq!(image.get(3, 1), Color::Y);
        assert_eq!(image.get(2, 2), Color::Z);
        assert_eq!(image.get(3, 2), Color::ONE);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_to_rgb8_is_top_down() {
        let mut image = ImageBuffer::new(1, 2, 1);
        image.set(0, 0, Color::ZERO);
        image.set(0, 1, Color::ONE);

        // Top row (y = 1) is emitted first
        assert_eq!(image.to_rgb8(), vec![255, 255, 255, 0, 0, 0]);
    }
}

//! Prism renderer - CPU Whitted ray tracing
//!
//! Spheres, triangles and boxes in a BVH, shaded with Blinn-Phong local
//! illumination from a point light plus recursive mirror reflection and
//! dielectric refraction. Buckets render in parallel with rayon.

mod bucket;
mod bvh;
mod camera;
mod cuboid;
mod demo;
mod hittable;
mod light;
mod material;
mod output;
mod primitive;
mod renderer;
mod sampler;
mod scene_builder;
mod shading;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
pub use bvh::BvhNode;
pub use camera::Camera;
pub use cuboid::Cuboid;
pub use demo::random_scene;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use light::PointLight;
pub use material::{Material, MaterialArena, MaterialId, TextureId, TextureMap};
pub use output::{quantize, save, write_ppm, OutputError, OutputResult};
pub use primitive::Primitive;
pub use renderer::{render, render_pixel, render_serial, ImageBuffer};
pub use sampler::Sampler;
pub use scene_builder::Scene;
pub use shading::{ray_color, ShadeContext};
pub use sphere::{MovingSphere, Sphere};
pub use triangle::Triangle;

/// Settings live next to the scene description.
pub use prism_core::{FresnelModel, RenderConfig, ShadingConfig, SplitAxis};

/// Re-export common math types from prism_math
pub use prism_math::{Aabb, Color, Interval, Ray, UnitVec3, Vec3};

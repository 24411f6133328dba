//! Prism Core - declarative scene description and texture loading.
//!
//! This crate provides:
//!
//! - **Scene description**: serde types for cameras, lights, materials,
//!   textures and primitives, loaded from JSON and validated before any
//!   geometry is built
//! - **Settings**: render and shading configuration shared with the renderer
//! - **Textures**: image loading and caching through the `image` crate
//!
//! # Example
//!
//! ```ignore
//! use prism_core::SceneDescription;
//!
//! let desc = SceneDescription::load("scene.json")?;
//! println!("{} materials, {} objects", desc.materials.len(), desc.objects.len());
//! ```

pub mod scene;
pub mod settings;
pub mod texture;

// Re-export commonly used types
pub use scene::{
    CameraDesc, LightDesc, MaterialDesc, MaterialKind, ObjectDesc, SceneDescription, SceneError,
    SceneResult, TextureDesc, TextureKind,
};
pub use settings::{
    FresnelModel, RenderConfig, SettingsError, SettingsResult, ShadingConfig, SplitAxis,
};
pub use texture::{Texture, TextureCache, TextureError, TextureResult};

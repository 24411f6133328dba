//! Surface materials and the arena that owns them.
//!
//! Primitives never hold a material directly. They store a [`MaterialId`]
//! handle into the scene's [`MaterialArena`], so any number of primitives can
//! share one material and the whole scene stays `Send + Sync`.

use std::sync::Arc;

use prism_core::Texture;
use prism_math::Color;

/// Handle to a material stored in a [`MaterialArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u32);

impl MaterialId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a texture stored in a [`MaterialArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Default specular coefficient for [`Material::diffuse`].
pub const DEFAULT_KS: f32 = 0.2;
/// Default Blinn-Phong exponent for [`Material::diffuse`].
pub const DEFAULT_SPECULAR_EXPONENT: f32 = 25.0;

/// How a surface responds to light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Blinn-Phong surface with ambient, diffuse and specular terms.
    Diffuse {
        /// Diffuse color, multiplied by the texture when one is set
        kd: Color,
        /// Specular color
        ks: Color,
        specular_exponent: f32,
        texture: Option<TextureId>,
    },
    /// Ideal reflector weighted by a Fresnel term.
    Mirror { reflectance: Color },
    /// Glass-like surface that both reflects and refracts.
    Dielectric { ior: f32 },
}

impl Material {
    /// Diffuse material with the default highlight.
    pub fn diffuse(kd: Color) -> Self {
        Self::blinn_phong(kd, Color::splat(DEFAULT_KS), DEFAULT_SPECULAR_EXPONENT)
    }

    pub fn blinn_phong(kd: Color, ks: Color, specular_exponent: f32) -> Self {
        Material::Diffuse {
            kd,
            ks,
            specular_exponent,
            texture: None,
        }
    }

    /// Diffuse material whose color is `kd` times a texture lookup.
    pub fn textured(kd: Color, texture: TextureId) -> Self {
        Material::Diffuse {
            kd,
            ks: Color::splat(DEFAULT_KS),
            specular_exponent: DEFAULT_SPECULAR_EXPONENT,
            texture: Some(texture),
        }
    }

    pub fn mirror(reflectance: Color) -> Self {
        Material::Mirror { reflectance }
    }

    pub fn dielectric(ior: f32) -> Self {
        Material::Dielectric { ior }
    }

    /// True for materials shaded purely by recursion (mirror, glass).
    pub fn is_specular(&self) -> bool {
        !matches!(self, Material::Diffuse { .. })
    }
}

/// A color source for diffuse materials.
#[derive(Debug, Clone)]
pub enum TextureMap {
    Solid(Color),
    Image(Arc<Texture>),
}

impl TextureMap {
    pub fn sample(&self, u: f32, v: f32) -> Color {
        match self {
            TextureMap::Solid(color) => *color,
            TextureMap::Image(texture) => texture.sample(u, v),
        }
    }
}

/// Owns every material and texture of a scene.
#[derive(Debug, Clone, Default)]
pub struct MaterialArena {
    materials: Vec<Material>,
    textures: Vec<TextureMap>,
}

impl MaterialArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its handle.
    pub fn add(&mut self, material: Material) -> MaterialId {
        if let Material::Diffuse {
            texture: Some(id), ..
        } = material
        {
            debug_assert!(id.index() < self.textures.len(), "texture {id:?} not in arena");
        }
        self.materials.push(material);
        MaterialId((self.materials.len() - 1) as u32)
    }

    /// Store a texture and return its handle.
    pub fn add_texture(&mut self, texture: TextureMap) -> TextureId {
        self.textures.push(texture);
        TextureId((self.textures.len() - 1) as u32)
    }

    /// Look up a material. Handles are only created by this arena, so an
    /// out-of-range id means it came from a different scene.
    #[inline]
    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.index()]
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureMap> {
        self.textures.get(id.index())
    }

    /// Effective diffuse color at `(u, v)`.
    pub fn diffuse_color(&self, kd: Color, texture: Option<TextureId>, u: f32, v: f32) -> Color {
        match texture.and_then(|id| self.texture(id)) {
            Some(map) => kd * map.sample(u, v),
            None => kd,
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

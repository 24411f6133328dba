//! Runtime scene and its construction from a [`SceneDescription`].

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::{
    BvhNode, Camera, Cuboid, Material, MaterialArena, MaterialId, MovingSphere, PointLight,
    Primitive, ShadeContext, Sphere, TextureId, TextureMap, Triangle,
};
use prism_core::{
    MaterialKind, ObjectDesc, RenderConfig, SceneDescription, SceneError, SceneResult,
    ShadingConfig, TextureCache, TextureKind,
};

/// Everything a render needs, immutable once built.
pub struct Scene {
    pub world: BvhNode,
    pub materials: MaterialArena,
    pub light: PointLight,
    pub camera: Camera,
    pub render: RenderConfig,
    pub shading: ShadingConfig,
}

impl Scene {
    /// Validate `desc` and build the runtime scene.
    ///
    /// Relative texture paths resolve against `base_dir` when given.
    pub fn from_description(desc: &SceneDescription, base_dir: Option<&Path>) -> SceneResult<Self> {
        desc.validate()?;
        let start = Instant::now();

        let mut cache = match base_dir {
            Some(dir) => TextureCache::with_base_dir(dir),
            None => TextureCache::new(),
        };
        let mut materials = MaterialArena::new();

        let mut textures: HashMap<&str, TextureId> = HashMap::new();
        for texture in &desc.textures {
            let map = match &texture.kind {
                TextureKind::Solid { color } => TextureMap::Solid(*color),
                TextureKind::Image { path } => TextureMap::Image(cache.load(path)?),
            };
            textures.insert(texture.name.as_str(), materials.add_texture(map));
        }

        let mut material_ids: HashMap<&str, MaterialId> = HashMap::new();
        for material in &desc.materials {
            let built = match &material.kind {
                MaterialKind::Diffuse {
                    kd,
                    ks,
                    specular_exponent,
                    texture,
                } => {
                    let texture = match texture {
                        Some(name) => Some(
                            *textures
                                .get(name.as_str())
                                .ok_or_else(|| SceneError::UnknownTexture(name.clone()))?,
                        ),
                        None => None,
                    };
                    Material::Diffuse {
                        kd: *kd,
                        ks: *ks,
                        specular_exponent: *specular_exponent,
                        texture,
                    }
                }
                MaterialKind::Mirror { reflectance } => Material::mirror(*reflectance),
                MaterialKind::Dielectric { ior } => Material::dielectric(*ior),
            };
            material_ids.insert(material.name.as_str(), materials.add(built));
        }

        let primitives = desc
            .objects
            .iter()
            .map(|object| {
                let material = *material_ids.get(object.material()).ok_or_else(|| {
                    SceneError::UnknownMaterial(object.material().to_string())
                })?;
                Ok(build_primitive(object, material))
            })
            .collect::<SceneResult<Vec<Primitive>>>()?;

        let primitive_count = primitives.len();
        let world = BvhNode::new(primitives, desc.render.split);

        let mut camera = Camera::new()
            .with_position(desc.camera.look_from, desc.camera.look_at, desc.camera.vup)
            .with_lens(desc.camera.vfov, desc.render.aspect_ratio)
            .with_shutter(desc.camera.time0, desc.camera.time1);
        camera.initialize();

        log::info!(
            "Built scene: {} primitives, {} materials, {} textures, BVH depth {} ({} nodes) in {:.2?}",
            primitive_count,
            materials.len(),
            materials.texture_count(),
            world.depth(),
            world.node_count(),
            start.elapsed()
        );

        Ok(Self {
            world,
            materials,
            light: PointLight::new(desc.light.position, desc.light.intensity),
            camera,
            render: desc.render.clone(),
            shading: desc.shading.clone(),
        })
    }

    /// Borrow the parts the shader reads.
    pub fn shade_context(&self) -> ShadeContext<'_> {
        ShadeContext {
            world: &self.world,
            materials: &self.materials,
            light: &self.light,
            config: &self.shading,
        }
    }
}

fn build_primitive(object: &ObjectDesc, material: MaterialId) -> Primitive {
    match object {
        ObjectDesc::Sphere { center, radius, .. } => Sphere::new(*center, *radius, material).into(),
        ObjectDesc::MovingSphere {
            center0,
            center1,
            time0,
            time1,
            radius,
            ..
        } => MovingSphere::new(*center0, *center1, *time0, *time1, *radius, material).into(),
        ObjectDesc::Triangle {
            vertices,
            double_sided,
            ..
        } => Triangle::new(vertices[0], vertices[1], vertices[2], material)
            .with_double_sided(*double_sided)
            .into(),
        ObjectDesc::Cuboid { min, max, .. } => Cuboid::new(*min, *max, material).into(),
    }
}

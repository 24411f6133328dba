//! Declarative scene description.
//!
//! A scene file is JSON with optional `render`, `shading`, `camera` and
//! `light` sections plus named `textures`, named `materials` and a list of
//! `objects` that refer to materials by name:
//!
//! ```json
//! {
//!   "light": { "position": [0, 70, 20], "intensity": [0.5, 0.5, 0.5] },
//!   "materials": [
//!     { "name": "ground", "type": "diffuse", "kd": [0.5, 0.5, 0.5] },
//!     { "name": "glass", "type": "dielectric", "ior": 1.5 }
//!   ],
//!   "objects": [
//!     { "type": "sphere", "center": [0, -1000, 0], "radius": 1000, "material": "ground" },
//!     { "type": "sphere", "center": [0, 1, 0], "radius": 1, "material": "glass" }
//!   ]
//! }
//! ```
//!
//! Everything a primitive constructor would assert on is checked by
//! [`SceneDescription::validate`] first, so a bad file produces an error
//! instead of a panic.

use std::collections::HashSet;
use std::path::Path;

use prism_math::{Color, UnitVec3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::{RenderConfig, SettingsError, SettingsResult, ShadingConfig};
use crate::texture::TextureError;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Unknown texture: {0}")]
    UnknownTexture(String),

    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    #[error("Object {index}: sphere radius must be positive, got {radius}")]
    InvalidSphere { index: usize, radius: f32 },

    #[error("Object {index}: invalid moving sphere: {reason}")]
    InvalidMovingSphere { index: usize, reason: String },

    #[error("Object {index}: triangle has zero area")]
    InvalidTriangle { index: usize },

    #[error("Object {index}: box min {min} must be below max {max} on every axis")]
    InvalidBox { index: usize, min: Vec3, max: Vec3 },

    #[error("Material {name}: {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Pinhole camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDesc {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Shutter open time (motion blur)
    pub time0: f32,
    /// Shutter close time
    pub time1: f32,
}

impl CameraDesc {
    /// Report the first unusable camera setting, if any.
    pub fn check(&self) -> SettingsResult<()> {
        let view = self.look_from - self.look_at;
        if UnitVec3::new(view).is_none() {
            return Err(SettingsError::CameraPosition);
        }
        if UnitVec3::new(self.vup.cross(view)).is_none() {
            return Err(SettingsError::CameraUp);
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SettingsError::CameraFov(self.vfov));
        }
        if !(self.time0 <= self.time1) {
            return Err(SettingsError::CameraShutter {
                time0: self.time0,
                time1: self.time1,
            });
        }
        Ok(())
    }
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 20.0,
            time0: 0.0,
            time1: 1.0,
        }
    }
}

/// The single point light of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightDesc {
    pub position: Vec3,
    pub intensity: Color,
}

impl Default for LightDesc {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 70.0, 20.0),
            intensity: Color::splat(0.5),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDesc {
    pub name: String,
    #[serde(flatten)]
    pub kind: TextureKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextureKind {
    Solid { color: Color },
    /// Image file, relative paths resolve against the scene file's directory
    Image { path: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    /// Blinn-Phong surface
    Diffuse {
        #[serde(default = "default_kd")]
        kd: Color,
        #[serde(default = "default_ks")]
        ks: Color,
        #[serde(default = "default_specular_exponent")]
        specular_exponent: f32,
        /// Texture name replacing `kd`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        texture: Option<String>,
    },
    /// Perfect specular reflector
    Mirror {
        #[serde(default = "default_reflectance")]
        reflectance: Color,
    },
    /// Glass-like surface
    Dielectric {
        #[serde(default = "default_ior")]
        ior: f32,
    },
}

fn default_kd() -> Color {
    Color::splat(0.8)
}

fn default_ks() -> Color {
    Color::splat(0.2)
}

fn default_specular_exponent() -> f32 {
    25.0
}

fn default_reflectance() -> Color {
    Color::ONE
}

fn default_ior() -> f32 {
    1.5
}

/// A primitive referring to a material by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDesc {
    Sphere {
        center: Vec3,
        radius: f32,
        material: String,
    },
    MovingSphere {
        center0: Vec3,
        center1: Vec3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: String,
    },
    /// Vertices counter-clockwise as seen from the outside
    Triangle {
        vertices: [Vec3; 3],
        material: String,
        #[serde(default)]
        double_sided: bool,
    },
    #[serde(rename = "box")]
    Cuboid {
        min: Vec3,
        max: Vec3,
        material: String,
    },
}

impl ObjectDesc {
    pub fn material(&self) -> &str {
        match self {
            ObjectDesc::Sphere { material, .. }
            | ObjectDesc::MovingSphere { material, .. }
            | ObjectDesc::Triangle { material, .. }
            | ObjectDesc::Cuboid { material, .. } => material,
        }
    }
}

/// Complete, renderer-agnostic description of a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub shading: ShadingConfig,
    #[serde(default)]
    pub camera: CameraDesc,
    #[serde(default)]
    pub light: LightDesc,
    #[serde(default)]
    pub textures: Vec<TextureDesc>,
    #[serde(default)]
    pub materials: Vec<MaterialDesc>,
    #[serde(default)]
    pub objects: Vec<ObjectDesc>,
}

impl SceneDescription {
    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let desc: SceneDescription = serde_json::from_str(json)?;
        desc.validate()?;
        Ok(desc)
    }

    /// Load and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let desc = Self::from_json_str(&json)?;

        log::info!(
            "Loaded scene {}: {} textures, {} materials, {} objects",
            path.display(),
            desc.textures.len(),
            desc.materials.len(),
            desc.objects.len()
        );
        Ok(desc)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Index of the material called `name`.
    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Index of the texture called `name`.
    pub fn texture_index(&self, name: &str) -> Option<usize> {
        self.textures.iter().position(|t| t.name == name)
    }

    /// Check names, references and geometric preconditions.
    pub fn validate(&self) -> SceneResult<()> {
        self.render.check()?;
        self.shading.check()?;
        self.camera.check()?;

        let mut names = HashSet::new();
        for texture in &self.textures {
            if !names.insert(texture.name.as_str()) {
                return Err(SceneError::DuplicateName(texture.name.clone()));
            }
        }

        let mut names = HashSet::new();
        for material in &self.materials {
            if !names.insert(material.name.as_str()) {
                return Err(SceneError::DuplicateName(material.name.clone()));
            }
            self.validate_material(material)?;
        }

        for (index, object) in self.objects.iter().enumerate() {
            if self.material_index(object.material()).is_none() {
                return Err(SceneError::UnknownMaterial(object.material().to_string()));
            }
            validate_object(index, object)?;
        }

        Ok(())
    }

    fn validate_material(&self, material: &MaterialDesc) -> SceneResult<()> {
        let invalid = |reason: &str| SceneError::InvalidMaterial {
            name: material.name.clone(),
            reason: reason.to_string(),
        };

        match &material.kind {
            MaterialKind::Diffuse {
                kd,
                ks,
                specular_exponent,
                texture,
            } => {
                if !kd.is_finite() || !ks.is_finite() {
                    return Err(invalid("kd and ks must be finite"));
                }
                if !(specular_exponent.is_finite() && *specular_exponent >= 0.0) {
                    return Err(invalid("specular_exponent must be non-negative"));
                }
                if let Some(name) = texture {
                    if self.texture_index(name).is_none() {
                        return Err(SceneError::UnknownTexture(name.clone()));
                    }
                }
            }
            MaterialKind::Mirror { reflectance } => {
                if !reflectance.is_finite() {
                    return Err(invalid("reflectance must be finite"));
                }
            }
            MaterialKind::Dielectric { ior } => {
                if !(ior.is_finite() && *ior > 0.0) {
                    return Err(invalid("ior must be positive"));
                }
            }
        }
        Ok(())
    }
}

fn validate_object(index: usize, object: &ObjectDesc) -> SceneResult<()> {
    match object {
        ObjectDesc::Sphere { center, radius, .. } => {
            if !(radius.is_finite() && *radius > 0.0) || !center.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    radius: *radius,
                });
            }
        }
        ObjectDesc::MovingSphere {
            center0,
            center1,
            time0,
            time1,
            radius,
            ..
        } => {
            let reason = if !(radius.is_finite() && *radius > 0.0) {
                Some(format!("radius must be positive, got {radius}"))
            } else if !(time0 < time1) {
                Some(format!("time0 {time0} must be before time1 {time1}"))
            } else if !center0.is_finite() || !center1.is_finite() {
                Some("centers must be finite".to_string())
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(SceneError::InvalidMovingSphere { index, reason });
            }
        }
        ObjectDesc::Triangle { vertices: [a, b, c], .. } => {
            if UnitVec3::new((*b - *a).cross(*c - *a)).is_none() {
                return Err(SceneError::InvalidTriangle { index });
            }
        }
        ObjectDesc::Cuboid { min, max, .. } => {
            if !(min.x < max.x && min.y < max.y && min.z < max.z) {
                return Err(SceneError::InvalidBox {
                    index,
                    min: *min,
                    max: *max,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "render": { "image_width": 64, "samples_per_pixel": 4 },
        "light": { "position": [0, 10, 0], "intensity": [1, 1, 1] },
        "textures": [ { "name": "red", "type": "solid", "color": [1, 0, 0] } ],
        "materials": [
            { "name": "ground", "type": "diffuse", "kd": [0.5, 0.5, 0.5], "texture": "red" },
            { "name": "chrome", "type": "mirror" },
            { "name": "glass", "type": "dielectric", "ior": 1.3 }
        ],
        "objects": [
            { "type": "sphere", "center": [0, -100, 0], "radius": 100, "material": "ground" },
            { "type": "moving_sphere", "center0": [0, 1, 0], "center1": [0, 2, 0],
              "time0": 0, "time1": 1, "radius": 0.5, "material": "chrome" },
            { "type": "triangle", "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
              "material": "glass", "double_sided": true },
            { "type": "box", "min": [-1, -1, -1], "max": [1, 1, 1], "material": "glass" }
        ]
    }"#;

    #[test]
    fn test_parse_full_scene() {
        let desc = SceneDescription::from_json_str(SCENE).unwrap();

        assert_eq!(desc.render.image_width, 64);
        assert_eq!(desc.render.max_depth, 10);
        assert_eq!(desc.camera, CameraDesc::default());
        assert_eq!(desc.light.position, Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(desc.objects.len(), 4);
        assert_eq!(desc.material_index("glass"), Some(2));
        assert_eq!(desc.texture_index("red"), Some(0));

        match &desc.materials[1].kind {
            MaterialKind::Mirror { reflectance } => assert_eq!(*reflectance, Color::ONE),
            other => panic!("expected mirror, got {other:?}"),
        }
        match &desc.materials[0].kind {
            MaterialKind::Diffuse {
                ks,
                specular_exponent,
                texture,
                ..
            } => {
                assert_eq!(*ks, Color::splat(0.2));
                assert_eq!(*specular_exponent, 25.0);
                assert_eq!(texture.as_deref(), Some("red"));
            }
            other => panic!("expected diffuse, got {other:?}"),
        }
        assert!(matches!(
            desc.objects[3],
            ObjectDesc::Cuboid { .. }
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_scene() {
        let desc = SceneDescription::from_json_str(SCENE).unwrap();
        let json = desc.to_json_string().unwrap();
        assert_eq!(SceneDescription::from_json_str(&json).unwrap(), desc);
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{ "objects": [
            { "type": "sphere", "center": [0, 0, 0], "radius": 1, "material": "missing" }
        ] }"#;
        let err = SceneDescription::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaterial(name) if name == "missing"));
    }

    #[test]
    fn test_unknown_texture() {
        let json = r#"{ "materials": [
            { "name": "m", "type": "diffuse", "texture": "nope" }
        ] }"#;
        let err = SceneDescription::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::UnknownTexture(_)));
    }

    #[test]
    fn test_duplicate_material_name() {
        let json = r#"{ "materials": [
            { "name": "m", "type": "mirror" },
            { "name": "m", "type": "dielectric" }
        ] }"#;
        let err = SceneDescription::from_json_str(json).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateName(_)));
    }

    #[test]
    fn test_geometry_preconditions() {
        let with_object = |object: &str| {
            format!(
                r#"{{ "materials": [ {{ "name": "m", "type": "mirror" }} ], "objects": [ {object} ] }}"#
            )
        };

        let sphere = with_object(r#"{ "type": "sphere", "center": [0, 0, 0], "radius": 0, "material": "m" }"#);
        assert!(matches!(
            SceneDescription::from_json_str(&sphere),
            Err(SceneError::InvalidSphere { index: 0, .. })
        ));

        let triangle = with_object(
            r#"{ "type": "triangle", "vertices": [[0, 0, 0], [1, 1, 1], [2, 2, 2]], "material": "m" }"#,
        );
        assert!(matches!(
            SceneDescription::from_json_str(&triangle),
            Err(SceneError::InvalidTriangle { index: 0 })
        ));

        let cuboid = with_object(r#"{ "type": "box", "min": [0, 0, 0], "max": [1, 0, 1], "material": "m" }"#);
        assert!(matches!(
            SceneDescription::from_json_str(&cuboid),
            Err(SceneError::InvalidBox { .. })
        ));

        let moving = with_object(
            r#"{ "type": "moving_sphere", "center0": [0, 0, 0], "center1": [1, 0, 0],
                 "time0": 1, "time1": 1, "radius": 1, "material": "m" }"#,
        );
        assert!(matches!(
            SceneDescription::from_json_str(&moving),
            Err(SceneError::InvalidMovingSphere { .. })
        ));
    }

    #[test]
    fn test_invalid_material_parameters() {
        let json = r#"{ "materials": [ { "name": "g", "type": "dielectric", "ior": -1 } ] }"#;
        assert!(matches!(
            SceneDescription::from_json_str(json),
            Err(SceneError::InvalidMaterial { .. })
        ));
    }

    #[test]
    fn test_invalid_camera() {
        let json = r#"{ "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, 0] } }"#;
        assert!(matches!(
            SceneDescription::from_json_str(json),
            Err(SceneError::Settings(SettingsError::CameraPosition))
        ));

        let json = r#"{ "camera": { "look_from": [0, 5, 0], "look_at": [0, 0, 0] } }"#;
        assert!(matches!(
            SceneDescription::from_json_str(json),
            Err(SceneError::Settings(SettingsError::CameraUp))
        ));
    }

    #[test]
    fn test_invalid_render_settings() {
        let json = r#"{ "render": { "samples_per_pixel": 0 } }"#;
        assert!(matches!(
            SceneDescription::from_json_str(json),
            Err(SceneError::Settings(SettingsError::NoSamples))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SceneDescription::from_json_str("{ not json"),
            Err(SceneError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("prism_scene_{}.json", std::process::id()));
        std::fs::write(&path, SCENE).unwrap();

        let desc = SceneDescription::load(&path).unwrap();
        assert_eq!(desc.materials.len(), 3);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            SceneDescription::load(&path),
            Err(SceneError::Io(_))
        ));
    }

    #[test]
    fn test_showcase_scene_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenes/showcase.json");
        let desc = SceneDescription::load(&path).unwrap();
        desc.validate().unwrap();
        assert_eq!(desc.objects.len(), 7);
        assert_eq!(desc.render.bucket_size, 32);
    }
}

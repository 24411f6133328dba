//! Render and shading settings.
//!
//! Both structs deserialize from the `"render"` and `"shading"` sections of a
//! scene file. Every field is optional there and falls back to the defaults
//! below.

use prism_math::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Render, shading or camera setting out of range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("image_width must be at least 2, got {0}")]
    ImageWidth(u32),

    #[error("aspect_ratio must be positive, got {0}")]
    AspectRatio(f32),

    #[error("image height must be at least 2, got {height} ({width}px at aspect {aspect_ratio})")]
    ImageHeight {
        height: u32,
        width: u32,
        aspect_ratio: f32,
    },

    #[error("samples_per_pixel must be positive")]
    NoSamples,

    #[error("bucket_size must be positive")]
    BucketSize,

    #[error("background color must be finite, got {0}")]
    Background(Color),

    #[error("ambient_strength must be non-negative, got {0}")]
    AmbientStrength(f32),

    #[error("epsilon must be positive, got {0}")]
    Epsilon(f32),

    #[error("mirror_ior must be positive, got {0}")]
    MirrorIor(f32),

    #[error("camera look_from and look_at must differ")]
    CameraPosition,

    #[error("camera vup must not be parallel to the view direction")]
    CameraUp,

    #[error("camera vfov must be in (0, 180), got {0}")]
    CameraFov(f32),

    #[error("camera shutter opens at {time0} after it closes at {time1}")]
    CameraShutter { time0: f32, time1: f32 },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Axis selection used when splitting a BVH node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    /// Sort by the minimum x coordinate of each primitive's box.
    MinX,
    /// Sort by centroid along the longest axis of the centroid bounds.
    #[default]
    LongestAxis,
}

/// Reflectance model used for mirrors and dielectrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FresnelModel {
    /// Full unpolarized Fresnel equations.
    #[default]
    Exact,
    /// Schlick's approximation.
    Schlick,
}

/// Image and sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub image_width: u32,
    /// Width / height
    pub aspect_ratio: f32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum recursion depth of the shader
    pub max_depth: u32,
    /// Base seed; every bucket derives its own sampler stream from it
    pub seed: u64,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// BVH split heuristic
    pub split: SplitAxis,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 50,
            max_depth: 10,
            seed: 0,
            bucket_size: 64,
            split: SplitAxis::default(),
        }
    }
}

impl RenderConfig {
    /// Image height derived from width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    /// Report the first invalid setting, if any.
    pub fn check(&self) -> SettingsResult<()> {
        if self.image_width < 2 {
            return Err(SettingsError::ImageWidth(self.image_width));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(SettingsError::AspectRatio(self.aspect_ratio));
        }
        if self.image_height() < 2 {
            return Err(SettingsError::ImageHeight {
                height: self.image_height(),
                width: self.image_width,
                aspect_ratio: self.aspect_ratio,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(SettingsError::NoSamples);
        }
        if self.bucket_size == 0 {
            return Err(SettingsError::BucketSize);
        }
        Ok(())
    }
}

/// Constants of the local illumination model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Color returned for rays that escape or run out of depth
    pub background: Color,
    /// Fraction of the light intensity applied as ambient term
    pub ambient_strength: f32,
    /// Lower bound on secondary ray parameters (self-intersection bias)
    pub epsilon: f32,
    /// Index of refraction used for the Fresnel weight of mirrors
    pub mirror_ior: f32,
    pub fresnel: FresnelModel,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            background: Color::new(0.235294, 0.67451, 0.843137),
            ambient_strength: 0.1,
            epsilon: 0.001,
            mirror_ior: 1.5,
            fresnel: FresnelModel::default(),
        }
    }
}

impl ShadingConfig {
    /// Report the first invalid setting, if any.
    pub fn check(&self) -> SettingsResult<()> {
        if !self.background.is_finite() {
            return Err(SettingsError::Background(self.background));
        }
        if !(self.ambient_strength.is_finite() && self.ambient_strength >= 0.0) {
            return Err(SettingsError::AmbientStrength(self.ambient_strength));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SettingsError::Epsilon(self.epsilon));
        }
        if !(self.mirror_ior.is_finite() && self.mirror_ior > 0.0) {
            return Err(SettingsError::MirrorIor(self.mirror_ior));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.image_height(), 225);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "image_width": 200, "split": "min_x" }"#).unwrap();
        assert_eq!(config.image_width, 200);
        assert_eq!(config.samples_per_pixel, 50);
        assert_eq!(config.split, SplitAxis::MinX);

        let shading: ShadingConfig =
            serde_json::from_str(r#"{ "background": [0.0, 0.0, 0.0], "fresnel": "schlick" }"#).unwrap();
        assert_eq!(shading.background, Color::ZERO);
        assert_eq!(shading.fresnel, FresnelModel::Schlick);
        assert_eq!(shading.epsilon, 0.001);
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert_eq!(config.check(), Err(SettingsError::NoSamples));

        let config = RenderConfig {
            aspect_ratio: 1000.0,
            ..Default::default()
        };
        assert!(matches!(
            config.check(),
            Err(SettingsError::ImageHeight { height: 1, width: 400, .. })
        ));

        let config = RenderConfig {
            image_width: 1,
            ..Default::default()
        };
        assert_eq!(config.check(), Err(SettingsError::ImageWidth(1)));

        let shading = ShadingConfig {
            epsilon: 0.0,
            ..Default::default()
        };
        assert_eq!(shading.check(), Err(SettingsError::Epsilon(0.0)));

        let shading = ShadingConfig {
            ambient_strength: -0.5,
            ..Default::default()
        };
        assert_eq!(shading.check(), Err(SettingsError::AmbientStrength(-0.5)));
    }

    #[test]
    fn test_settings_error_messages() {
        assert_eq!(
            SettingsError::CameraFov(200.0).to_string(),
            "camera vfov must be in (0, 180), got 200"
        );
        assert_eq!(
            SettingsError::NoSamples.to_string(),
            "samples_per_pixel must be positive"
        );
    }
}

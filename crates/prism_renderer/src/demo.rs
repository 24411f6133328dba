//! Procedural demo scene: a field of small spheres around three large ones.

use crate::Sampler;
use prism_core::{
    CameraDesc, LightDesc, MaterialDesc, MaterialKind, ObjectDesc, SceneDescription,
};
use prism_math::{Color, Vec3};

/// Radius of the small spheres scattered over the ground.
const SMALL_RADIUS: f32 = 0.2;

fn diffuse(kd: Color) -> MaterialKind {
    MaterialKind::Diffuse {
        kd,
        ks: Color::splat(0.2),
        specular_exponent: 25.0,
        texture: None,
    }
}

/// Build the demo scene. The same seed always yields the same scene.
pub fn random_scene(seed: u64) -> SceneDescription {
    let mut sampler = Sampler::new(seed);
    let mut materials = Vec::new();
    let mut objects = Vec::new();

    let mut add = |name: String, kind: MaterialKind, center: Vec3, radius: f32| {
        objects.push(ObjectDesc::Sphere {
            center,
            radius,
            material: name.clone(),
        });
        materials.push(MaterialDesc { name, kind });
    };

    add(
        "ground".to_string(),
        diffuse(Color::splat(0.5)),
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
    );

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = sampler.unit();
            let center = Vec3::new(
                a as f32 + 0.9 * sampler.unit(),
                SMALL_RADIUS,
                b as f32 + 0.9 * sampler.unit(),
            );

            // Keep clear of the large mirror sphere
            if (center - Vec3::new(4.0, SMALL_RADIUS, 0.0)).length() <= 0.9 {
                continue;
            }

            let name = format!("sphere_{}_{}", a, b);
            let kind = if choose_mat < 0.8 {
                let c0 = Color::new(sampler.unit(), sampler.unit(), sampler.unit());
                let c1 = Color::new(sampler.unit(), sampler.unit(), sampler.unit());
                diffuse(c0 * c1)
            } else if choose_mat < 0.95 {
                MaterialKind::Mirror {
                    reflectance: Color::new(
                        sampler.uniform(0.5, 1.0),
                        sampler.uniform(0.5, 1.0),
                        sampler.uniform(0.5, 1.0),
                    ),
                }
            } else {
                MaterialKind::Dielectric { ior: 1.5 }
            };
            add(name, kind, center, SMALL_RADIUS);
        }
    }

    add(
        "glass".to_string(),
        MaterialKind::Dielectric { ior: 1.5 },
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
    );
    add(
        "matte".to_string(),
        diffuse(Color::new(0.4, 0.2, 0.1)),
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
    );
    add(
        "chrome".to_string(),
        MaterialKind::Mirror {
            reflectance: Color::new(0.7, 0.6, 0.5),
        },
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
    );

    SceneDescription {
        camera: CameraDesc {
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 20.0,
            ..Default::default()
        },
        light: LightDesc {
            position: Vec3::new(0.0, 70.0, 20.0),
            intensity: Color::splat(0.5),
        },
        materials,
        objects,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scene;

    #[test]
    fn test_random_scene_is_valid() {
        let desc = random_scene(42);
        desc.validate().unwrap();

        // Ground, up to 22x22 small spheres, three feature spheres
        assert!(desc.objects.len() > 400);
        assert!(desc.objects.len() <= 1 + 22 * 22 + 3);
        assert_eq!(desc.objects.len(), desc.materials.len());
    }

    #[test]
    fn test_random_scene_is_deterministic() {
        assert_eq!(random_scene(7), random_scene(7));
        assert_ne!(random_scene(7), random_scene(8));
    }

    #[test]
    fn test_random_scene_builds() {
        let scene = Scene::from_description(&random_scene(1), None).unwrap();
        assert_eq!(scene.world.primitive_count(), random_scene(1).objects.len());
    }
}

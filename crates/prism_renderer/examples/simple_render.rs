//! Simple ray tracer example.
//!
//! Builds a small scene in code (no scene file) and saves it as PPM.

use prism_renderer::{
    render, save, BvhNode, Camera, Color, Cuboid, Material, MaterialArena, PointLight,
    Primitive, RenderConfig, Scene, ShadingConfig, Sphere, SplitAxis, Triangle, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let render_config = RenderConfig {
        image_width: 480,
        samples_per_pixel: 16,
        ..Default::default()
    };

    let mut materials = MaterialArena::new();
    let ground = materials.add(Material::diffuse(Color::splat(0.5)));
    let glass = materials.add(Material::dielectric(1.5));
    let clay = materials.add(Material::diffuse(Color::new(0.4, 0.2, 0.1)));
    let chrome = materials.add(Material::mirror(Color::new(0.7, 0.6, 0.5)));
    let plastic = materials.add(Material::blinn_phong(
        Color::new(0.1, 0.3, 0.8),
        Color::splat(0.6),
        80.0,
    ));

    let primitives: Vec<Primitive> = vec![
        Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground).into(),
        Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass).into(),
        Sphere::new(Vec3::new(-4.0, 1.0, 0.0), 1.0, clay).into(),
        Sphere::new(Vec3::new(4.0, 1.0, 0.0), 1.0, chrome).into(),
        Cuboid::new(Vec3::new(1.5, 0.0, 2.0), Vec3::new(2.5, 0.8, 3.0), plastic).into(),
        Triangle::new(
            Vec3::new(-2.0, 0.01, 2.0),
            Vec3::new(-1.0, 0.01, 3.5),
            Vec3::new(-0.5, 1.5, 2.5),
            plastic,
        )
        .with_double_sided(true)
        .into(),
    ];

    let mut camera = Camera::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, render_config.aspect_ratio);
    camera.initialize();

    let scene = Scene {
        world: BvhNode::new(primitives, SplitAxis::LongestAxis),
        materials,
        light: PointLight::new(Vec3::new(0.0, 70.0, 20.0), Color::splat(0.5)),
        camera,
        render: render_config,
        shading: ShadingConfig::default(),
    };

    let image = render(&scene);
    save(&image, "output.ppm")?;
    Ok(())
}

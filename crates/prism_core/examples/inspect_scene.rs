//! Example: Load, validate and summarize a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/showcase.json

use std::env;

use prism_core::{MaterialKind, ObjectDesc, SceneDescription};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene.json>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/showcase.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match SceneDescription::load(path) {
        Ok(scene) => {
            let render = &scene.render;
            println!(
                "\n=== {}x{} @ {} spp, depth {} ===",
                render.image_width,
                render.image_height(),
                render.samples_per_pixel,
                render.max_depth
            );
            println!(
                "Camera: {} -> {} (vfov {})",
                scene.camera.look_from, scene.camera.look_at, scene.camera.vfov
            );
            println!("Light: {} (intensity {})", scene.light.position, scene.light.intensity);

            println!("\n--- Materials ---");
            for material in &scene.materials {
                let kind = match &material.kind {
                    MaterialKind::Diffuse { texture: Some(t), .. } => format!("diffuse, texture {t}"),
                    MaterialKind::Diffuse { .. } => "diffuse".to_string(),
                    MaterialKind::Mirror { .. } => "mirror".to_string(),
                    MaterialKind::Dielectric { ior } => format!("dielectric, ior {ior}"),
                };
                println!("  {} ({})", material.name, kind);
            }

            let mut counts = [0usize; 4];
            for object in &scene.objects {
                let slot = match object {
                    ObjectDesc::Sphere { .. } => 0,
                    ObjectDesc::MovingSphere { .. } => 1,
                    ObjectDesc::Triangle { .. } => 2,
                    ObjectDesc::Cuboid { .. } => 3,
                };
                counts[slot] += 1;
            }
            println!("\n--- Objects ---");
            println!("  spheres: {}", counts[0]);
            println!("  moving spheres: {}", counts[1]);
            println!("  triangles: {}", counts[2]);
            println!("  boxes: {}", counts[3]);
        }
        Err(e) => {
            eprintln!("Error loading scene: {}", e);
            std::process::exit(1);
        }
    }
}

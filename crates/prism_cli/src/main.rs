//! Prism command line renderer.
//!
//! Renders a JSON scene file, or the procedural demo scene when no file is
//! given, and writes the image to disk.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use prism_core::SceneDescription;
use prism_renderer::{random_scene, render, render_serial, save, Scene};

#[derive(Parser, Debug)]
#[clap(
    name = "prism",
    version,
    about = "Whitted-style ray tracer: spheres, triangles and boxes lit by a point light"
)]
struct CliArguments {
    /// Scene file (JSON). Renders the random demo scene when omitted.
    scene: Option<PathBuf>,

    /// Output image; the extension picks the format (ppm, png, jpg, ...)
    #[clap(short = 'o', long, default_value = "render.ppm")]
    output: PathBuf,

    /// Image width in pixels
    #[clap(short = 'w', long)]
    width: Option<u32>,

    /// Samples per pixel
    #[clap(short = 's', long)]
    samples: Option<u32>,

    /// Maximum recursion depth
    #[clap(short = 'd', long)]
    depth: Option<u32>,

    /// Base seed for the demo scene and the pixel samplers
    #[clap(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[clap(long)]
    threads: Option<usize>,

    /// Render on the calling thread only
    #[clap(long)]
    serial: bool,

    /// Write the resolved scene description as JSON and exit
    #[clap(long)]
    dump_scene: Option<PathBuf>,
}

impl CliArguments {
    /// Load the scene description and apply command line overrides.
    fn scene_description(&self) -> Result<SceneDescription> {
        let mut desc = match &self.scene {
            Some(path) => SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?,
            None => {
                let seed = self.seed.unwrap_or(0);
                log::info!("No scene file given, using demo scene (seed {})", seed);
                random_scene(seed)
            }
        };

        if let Some(width) = self.width {
            desc.render.image_width = width;
        }
        if let Some(samples) = self.samples {
            desc.render.samples_per_pixel = samples;
        }
        if let Some(depth) = self.depth {
            desc.render.max_depth = depth;
        }
        if let Some(seed) = self.seed {
            desc.render.seed = seed;
        }
        Ok(desc)
    }

    fn base_dir(&self) -> Option<&Path> {
        self.scene.as_deref().and_then(Path::parent)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArguments::parse();
    log::info!("Starting Prism");

    let desc = args.scene_description()?;

    if let Some(path) = &args.dump_scene {
        let json = desc.to_json_string()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote scene description to {}", path.display());
        return Ok(());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let scene = Scene::from_description(&desc, args.base_dir()).context("Invalid scene")?;

    log::info!(
        "Rendering {}x{} at {} spp, depth {}, {} threads",
        scene.render.image_width,
        scene.render.image_height(),
        scene.render.samples_per_pixel,
        scene.render.max_depth,
        if args.serial {
            1
        } else {
            rayon::current_num_threads()
        }
    );

    let start = Instant::now();
    let image = if args.serial {
        render_serial(&scene)
    } else {
        render(&scene)
    };
    let elapsed = start.elapsed();

    save(&image, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    let pixels = image.width as u64 * image.height as u64;
    log::info!(
        "Done in {:.2?} ({:.0} pixels/s), wrote {}",
        elapsed,
        pixels as f64 / elapsed.as_secs_f64().max(1e-9),
        args.output.display()
    );

    Ok(())
}

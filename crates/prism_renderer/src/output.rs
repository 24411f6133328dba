//! Image output.
//!
//! PPM (ASCII `P3`) is written by hand; every other format goes through the
//! `image` crate and is chosen by file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::ImageBuffer;
use prism_math::Color;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Average, gamma-correct (gamma 2) and quantize a pixel sum to 8 bits.
///
/// Each channel maps to `floor(256 * clamp(sqrt(sum / samples), 0, 0.999))`.
pub fn quantize(sum: Color, samples: u32) -> [u8; 3] {
    let scale = 1.0 / samples.max(1) as f32;
    let channel = |c: f32| (256.0 * (c * scale).sqrt().clamp(0.0, 0.999)) as u8;
    [channel(sum.x), channel(sum.y), channel(sum.z)]
}

/// Write `image` as ASCII PPM, top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> std::io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "255")?;

    for y in (0..image.height).rev() {
        for x in 0..image.width {
            let [r, g, b] = quantize(image.get(x, y), image.samples_per_pixel);
            writeln!(out, "{r} {g} {b}")?;
        }
    }
    out.flush()
}

/// Save `image` to `path`, picking the encoder from the extension.
pub fn save(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let file = File::create(path)?;
            write_ppm(image, BufWriter::new(file))?;
        }
        "png" | "jpg" | "jpeg" | "bmp" | "tga" | "tif" | "tiff" => {
            let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
                .ok_or_else(|| {
                    OutputError::UnsupportedFormat(format!(
                        "buffer does not match {}x{}",
                        image.width, image.height
                    ))
                })?;
            rgb.save(path)?;
        }
        other => {
            return Err(OutputError::UnsupportedFormat(format!(
                "'{}' ({})",
                other,
                path.display()
            )));
        }
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

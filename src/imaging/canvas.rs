//! Background canvas construction.
//!
//! Two sources: a decoded template image resized to the canvas dimensions,
//! or a synthesized two-color vertical gradient. Template selection is a
//! capability ([`TemplateSource`]) so the render loop can be exercised with
//! deterministic fakes; the production [`DirTemplates`] scans a directory
//! and picks uniformly at random per render.

use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("unreadable template {0}: {1}")]
    UnreadableTemplate(PathBuf, String),
    #[error("no template images found in: {0}")]
    NoTemplates(PathBuf),
}

/// Extensions accepted as background templates.
const TEMPLATE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Gradient color pairs (top, bottom), picked uniformly per render when a
/// gradient background is used.
const GRADIENT_PALETTES: &[([u8; 3], [u8; 3])] = &[
    ([24, 32, 72], [118, 64, 140]),  // dusk
    ([16, 42, 67], [60, 132, 158]),  // sea
    ([44, 18, 46], [188, 96, 72]),   // ember
    ([20, 20, 20], [84, 84, 92]),    // slate
    ([12, 52, 48], [132, 160, 96]),  // moss
];

/// Supplies a template image path for one render.
pub trait TemplateSource {
    fn pick(&self) -> Result<PathBuf, CanvasError>;
}

/// Production source: a flat directory of raster files, uniform random pick.
pub struct DirTemplates {
    dir: PathBuf,
}

impl DirTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidates(&self) -> Result<Vec<PathBuf>, CanvasError> {
        let entries = std::fs::read_dir(&self.dir)
            .map_err(|e| CanvasError::UnreadableTemplate(self.dir.clone(), e.to_string()))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| {
                        TEMPLATE_EXTENSIONS
                            .iter()
                            .any(|t| ext.eq_ignore_ascii_case(t))
                    })
            })
            .collect();
        // Stable order before the random pick, so the choice distribution
        // doesn't depend on directory iteration order.
        files.sort();
        Ok(files)
    }
}

impl TemplateSource for DirTemplates {
    fn pick(&self) -> Result<PathBuf, CanvasError> {
        let files = self.candidates()?;
        files
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| CanvasError::NoTemplates(self.dir.clone()))
    }
}

/// Decode a template and resize it to exactly `width` × `height`.
pub fn from_template(path: &Path, width: u32, height: u32) -> Result<RgbImage, CanvasError> {
    let img = image::open(path)
        .map_err(|e| CanvasError::UnreadableTemplate(path.to_path_buf(), e.to_string()))?;
    Ok(img
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgb8())
}

/// Synthesize a vertical gradient from `top` to `bottom`.
///
/// Each row blends per channel with `c(y) = top*(1 - y/h) + bottom*(y/h)`,
/// truncated toward zero.
pub fn gradient(width: u32, height: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);
    for y in 0..height {
        let t = y as f64 / height as f64;
        let row = Rgb([
            blend_channel(top.0[0], bottom.0[0], t),
            blend_channel(top.0[1], bottom.0[1], t),
            blend_channel(top.0[2], bottom.0[2], t),
        ]);
        for x in 0..width {
            canvas.put_pixel(x, y, row);
        }
    }
    canvas
}

fn blend_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 * (1.0 - t) + b as f64 * t) as u8
}

/// Pick a random gradient palette as (top, bottom) colors.
pub fn random_palette() -> (Rgb<u8>, Rgb<u8>) {
    let (top, bottom) = GRADIENT_PALETTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(([20, 20, 20], [84, 84, 92]));
    (Rgb(top), Rgb(bottom))
}

/// Composite a uniform semi-transparent black overlay over the canvas to
/// improve text contrast. `alpha` is 0-255; higher is darker.
pub fn darken(canvas: &mut RgbImage, alpha: u8) {
    let keep = (255 - alpha) as u16;
    for pixel in canvas.pixels_mut() {
        for channel in &mut pixel.0 {
            *channel = (*channel as u16 * keep / 255) as u8;
        }
    }
}

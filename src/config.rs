//! Render configuration.
//!
//! Handles loading and validating `config.toml`. Every option has a stock
//! default, so a config file is optional and sparse — override just the
//! values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! canvas_width = 1000
//! canvas_height = 1500
//! margin_x = 90
//! margin_y = 140
//! max_per_run = 3            # Quotes rendered per invocation
//! low_stock_threshold = 5    # Warn when fewer unused quotes remain
//! jpeg_quality = 95          # JPEG encoding quality (1-100)
//! background = "auto"        # auto | template | gradient
//!
//! fonts = [
//!     "fonts/PlayfairDisplay-Bold.ttf",
//!     "fonts/Montserrat-Bold.ttf",
//!     "fonts/DejaVuSans-Bold.ttf",
//! ]
//!
//! [text]
//! max_font_size = 64
//! min_font_size = 42
//! line_spacing = 10          # Gap between wrapped lines (px)
//! color = "#ffffff"
//!
//! [shadow]
//! enabled = true
//! offset = [3, 4]            # Pixel offset of the shadow pass
//! color = "#000000"
//!
//! [darken]
//! enabled = true
//! alpha = 80                 # 0-255, higher = darker background
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full render configuration.
///
/// All fields have defaults matching the canonical 1000×1500 quote card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Horizontal margin on each side; the text box is the canvas minus
    /// margins.
    pub margin_x: u32,
    pub margin_y: u32,
    /// Quotes consumed per invocation.
    pub max_per_run: usize,
    /// Remaining-unused count under which the run report warns.
    pub low_stock_threshold: usize,
    /// JPEG encoding quality (1-100).
    pub jpeg_quality: u8,
    pub background: BackgroundMode,
    /// Ranked font candidates; the first readable file wins.
    pub fonts: Vec<PathBuf>,
    pub text: TextOptions,
    pub shadow: ShadowOptions,
    pub darken: DarkenOptions,
}

/// How backgrounds are chosen per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    /// Template image when one can be picked, gradient otherwise.
    Auto,
    /// Template images only; an unreadable source skips that render.
    Template,
    /// Synthesized gradient only.
    Gradient,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextOptions {
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub line_spacing: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowOptions {
    pub enabled: bool,
    pub offset: [i32; 2],
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DarkenOptions {
    pub enabled: bool,
    pub alpha: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 1500,
            margin_x: 90,
            margin_y: 140,
            max_per_run: 3,
            low_stock_threshold: 5,
            jpeg_quality: 95,
            background: BackgroundMode::Auto,
            fonts: vec![
                PathBuf::from("fonts/PlayfairDisplay-Bold.ttf"),
                PathBuf::from("fonts/Montserrat-Bold.ttf"),
                PathBuf::from("fonts/DejaVuSans-Bold.ttf"),
            ],
            text: TextOptions::default(),
            shadow: ShadowOptions::default(),
            darken: DarkenOptions::default(),
        }
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            max_font_size: 64,
            min_font_size: 42,
            line_spacing: 10,
            color: "#ffffff".to_string(),
        }
    }
}

impl Default for ShadowOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: [3, 4],
            color: "#000000".to_string(),
        }
    }
}

impl Default for DarkenOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            alpha: 80,
        }
    }
}

impl RenderConfig {
    /// Load from `path`, or return defaults when the file doesn't exist.
    /// The result is always validated.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Validation(
                "canvas dimensions must be non-zero".to_string(),
            ));
        }
        if self.margin_x.saturating_mul(2) >= self.canvas_width
            || self.margin_y.saturating_mul(2) >= self.canvas_height
        {
            return Err(ConfigError::Validation(format!(
                "margins ({}, {}) leave no text box inside {}x{}",
                self.margin_x, self.margin_y, self.canvas_width, self.canvas_height
            )));
        }
        if self.text.min_font_size == 0 || self.text.min_font_size > self.text.max_font_size {
            return Err(ConfigError::Validation(format!(
                "font size range {}..{} is invalid",
                self.text.min_font_size, self.text.max_font_size
            )));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ConfigError::Validation(format!(
                "jpeg_quality {} outside 1-100",
                self.jpeg_quality
            )));
        }
        if self.max_per_run == 0 {
            return Err(ConfigError::Validation(
                "max_per_run must be at least 1".to_string(),
            ));
        }
        if self.fonts.is_empty() {
            return Err(ConfigError::Validation(
                "at least one font candidate is required".to_string(),
            ));
        }
        parse_color(&self.text.color)?;
        parse_color(&self.shadow.color)?;
        Ok(())
    }

    /// Width of the text bounding box (canvas minus horizontal margins).
    pub fn box_width(&self) -> u32 {
        self.canvas_width - 2 * self.margin_x
    }

    /// Height of the text bounding box (canvas minus vertical margins).
    pub fn box_height(&self) -> u32 {
        self.canvas_height - 2 * self.margin_y
    }

    /// Candidate font sizes, largest first, stepping down by 2 like the
    /// layout search expects. The minimum is always included.
    pub fn font_size_candidates(&self) -> Vec<u32> {
        let mut sizes = Vec::new();
        let mut size = self.text.max_font_size;
        while size > self.text.min_font_size {
            sizes.push(size);
            size = size.saturating_sub(2);
        }
        sizes.push(self.text.min_font_size);
        sizes
    }

    pub fn text_color(&self) -> Result<image::Rgb<u8>, ConfigError> {
        parse_color(&self.text.color)
    }

    pub fn shadow_color(&self) -> Result<image::Rgb<u8>, ConfigError> {
        parse_color(&self.shadow.color)
    }
}

/// Parse a `#rrggbb` hex color.
pub fn parse_color(s: &str) -> Result<image::Rgb<u8>, ConfigError> {
    let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::Validation(format!("invalid color: {s}")));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(image::Rgb([r, g, b])),
        _ => Err(ConfigError::Validation(format!("invalid color: {s}"))),
    }
}

/// A documented stock `config.toml` for the `gen-config` subcommand.
pub fn stock_config_toml() -> String {
    let defaults = RenderConfig::default();
    format!(
        r##"# quotegen configuration
# All options are optional - defaults shown.

# Canvas dimensions for every output image (px).
canvas_width = {width}
canvas_height = {height}

# Margins around the text box (px, each side).
margin_x = {mx}
margin_y = {my}

# Quotes rendered per invocation.
max_per_run = {per_run}

# Warn after a run when fewer unused quotes remain.
low_stock_threshold = {low}

# JPEG encoding quality (1-100).
jpeg_quality = {quality}

# Background selection: "auto" uses a template image when one is available
# and falls back to a gradient; "template" skips renders without a usable
# template; "gradient" always synthesizes one.
background = "auto"

# Ranked font candidates - the first readable file is used.
fonts = [
    "fonts/PlayfairDisplay-Bold.ttf",
    "fonts/Montserrat-Bold.ttf",
    "fonts/DejaVuSans-Bold.ttf",
]

[text]
max_font_size = {max_font}
min_font_size = {min_font}
line_spacing = {spacing}
color = "#ffffff"

[shadow]
enabled = true
offset = [3, 4]
color = "#000000"

[darken]
enabled = true
alpha = {alpha}
"##,
        width = defaults.canvas_width,
        height = defaults.canvas_height,
        mx = defaults.margin_x,
        my = defaults.margin_y,
        per_run = defaults.max_per_run,
        low = defaults.low_stock_threshold,
        quality = defaults.jpeg_quality,
        max_font = defaults.text.max_font_size,
        min_font = defaults.text.min_font_size,
        spacing = defaults.text.line_spacing,
        alpha = defaults.darken.alpha,
    )
}

//! Font loading and text measurement.
//!
//! Fonts come from a ranked candidate list; the first path that can be read
//! and parsed wins. There is no bundled fallback raster font, so an empty or
//! unusable candidate set is a hard error — rendering with a guessed font
//! would silently change every measurement the layout search depends on.

use crate::layout::TextMeasure;
use rusttype::{Font, Scale, point};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to parse font: {0}")]
    Parse(PathBuf),
    #[error("no usable font among candidates: {0:?}")]
    NoUsableFont(Vec<PathBuf>),
}

/// A loaded TrueType font plus the measurement it backs.
pub struct QuoteFont {
    font: Font<'static>,
    path: PathBuf,
}

impl std::fmt::Debug for QuoteFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteFont")
            .field("path", &self.path)
            .finish()
    }
}

impl QuoteFont {
    /// Load a single font file.
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let bytes =
            std::fs::read(path).map_err(|_| FontError::Parse(path.to_path_buf()))?;
        let font =
            Font::try_from_vec(bytes).ok_or_else(|| FontError::Parse(path.to_path_buf()))?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// Try each candidate in order; first readable, parsable font wins.
    pub fn from_candidates(candidates: &[PathBuf]) -> Result<Self, FontError> {
        for path in candidates {
            if let Ok(font) = Self::load(path) {
                return Ok(font);
            }
        }
        Err(FontError::NoUsableFont(candidates.to_vec()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn inner(&self) -> &Font<'static> {
        &self.font
    }

    /// Baseline offset from the top of a line at this size.
    pub fn ascent(&self, size: u32) -> f32 {
        self.font.v_metrics(Scale::uniform(size as f32)).ascent
    }
}

impl TextMeasure for QuoteFont {
    fn line_width(&self, text: &str, size: u32) -> u32 {
        let scale = Scale::uniform(size as f32);
        let width = self
            .font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        width.ceil() as u32
    }

    fn line_height(&self, size: u32) -> u32 {
        let metrics = self.font.v_metrics(Scale::uniform(size as f32));
        (metrics.ascent - metrics.descent).ceil() as u32
    }
}

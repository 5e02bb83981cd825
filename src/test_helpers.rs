//! Shared test utilities for the quotegen test suite.
//!
//! Provides a canonical three-quote backlog, a deterministic text measurer
//! for layout tests, and fixed/failing template sources so the render loop
//! can run without a real template directory.

use crate::imaging::canvas::{CanvasError, TemplateSource};
use crate::layout::TextMeasure;
use crate::stock::{Backlog, QuoteRecord};
use std::path::{Path, PathBuf};

/// Three unused quotes with ids 1..=3, in stored order.
pub fn sample_backlog() -> Backlog {
    Backlog::new(vec![
        QuoteRecord::new(1, "The obstacle is the way").with_topic("stoic"),
        QuoteRecord::new(2, "Hello world"),
        QuoteRecord::new(3, "Keep going").with_topic("grit"),
    ])
}

/// Deterministic measurer: every char is `size / 2` px wide, every line
/// `size` px tall. Wider text and bigger sizes measure strictly larger,
/// which is all the layout search relies on.
pub struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn line_width(&self, text: &str, size: u32) -> u32 {
        text.chars().count() as u32 * (size / 2)
    }

    fn line_height(&self, size: u32) -> u32 {
        size
    }
}

/// Template source returning a fixed path or a canned failure.
pub struct StaticTemplates {
    path: Option<PathBuf>,
    error: Option<String>,
}

impl StaticTemplates {
    /// Always picks the given file.
    pub fn fixed(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            error: None,
        }
    }

    /// Always fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            path: None,
            error: Some(message.to_string()),
        }
    }
}

impl TemplateSource for StaticTemplates {
    fn pick(&self) -> Result<PathBuf, CanvasError> {
        match (&self.path, &self.error) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(message)) => Err(CanvasError::UnreadableTemplate(
                PathBuf::from("<static>"),
                message.clone(),
            )),
            (None, None) => Err(CanvasError::NoTemplates(PathBuf::from("<static>"))),
        }
    }
}

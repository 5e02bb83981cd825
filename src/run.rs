//! The render run: select a batch, render each quote, commit each
//! consumption before moving on.
//!
//! Per-record failures never cross a record boundary. [`render_one`] returns
//! a `Result` whose error is a [`SkipReason`]; the batch loop records the
//! skip and continues with the next candidate. Only two things abort a run
//! before it starts: an unreadable backlog and an unusable font set — both
//! make every subsequent step meaningless.
//!
//! The commit for a rendered quote happens immediately after its image is
//! written, before the next record is touched. A crash mid-batch therefore
//! leaves the backlog consistent with exactly the already-committed quotes
//! (see [`stock`](crate::stock) for the persistence discipline).

use crate::audit::{AuditLog, OUTCOME_GENERATED, STATUS_OK};
use crate::config::{BackgroundMode, ConfigError, RenderConfig};
use crate::imaging::canvas::{self, CanvasError, DirTemplates, TemplateSource};
use crate::imaging::compose::{self, Shadow, TextStyle};
use crate::imaging::font::{FontError, QuoteFont};
use crate::layout;
use crate::naming::{TimestampNamer, UniqueNamer};
use crate::stock::{Backlog, StockError};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("stock: {0}")]
    Stock(#[from] StockError),
    #[error("font: {0}")]
    Font(#[from] FontError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why one record was skipped. Skips are reported, never silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The quote text is empty after trimming — nothing to render.
    EmptyQuoteText,
    /// No usable template background and the config forbids the gradient
    /// fallback.
    UnreadableTemplate(String),
    /// Encoding or writing the output file failed.
    WriteFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyQuoteText => write!(f, "empty quote text"),
            SkipReason::UnreadableTemplate(detail) => {
                write!(f, "unreadable template: {detail}")
            }
            SkipReason::WriteFailed(detail) => write!(f, "write failed: {detail}"),
        }
    }
}

/// Which background ended up behind the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    Template(PathBuf),
    Gradient,
    /// The template source failed and the run fell back to a gradient; the
    /// detail says why, so the operator can fix the template directory.
    GradientFallback(String),
}

#[derive(Debug)]
pub enum RecordStatus {
    Rendered {
        output: PathBuf,
        background: Background,
    },
    Skipped(SkipReason),
    /// The record vanished between selection and commit — possible only if
    /// the single-writer contract on the backlog was broken externally.
    UnknownId,
}

#[derive(Debug)]
pub struct RecordReport {
    pub id: u64,
    pub topic: Option<String>,
    pub status: RecordStatus,
}

/// Outcome of one full run, for reporting.
#[derive(Debug)]
pub struct RunReport {
    pub selected: usize,
    pub records: Vec<RecordReport>,
    pub remaining_unused: usize,
    pub low_stock_threshold: usize,
}

impl RunReport {
    pub fn rendered(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.status, RecordStatus::Rendered { .. }))
            .count()
    }

    pub fn low_stock(&self) -> bool {
        self.remaining_unused < self.low_stock_threshold
    }
}

/// Ephemeral binding of one selected quote to the render that consumes it.
/// Built from the selection snapshot so the backlog borrow ends before the
/// first commit needs it mutably.
struct RenderJob {
    id: u64,
    text: String,
    topic: Option<String>,
}

/// Filesystem locations for one run.
pub struct RunPaths {
    pub stock: PathBuf,
    pub templates: PathBuf,
    pub output_dir: PathBuf,
    pub audit_log: PathBuf,
}

/// Load the backlog and render up to `config.max_per_run` quotes with the
/// production collaborators.
pub fn render_batch(paths: &RunPaths, config: &RenderConfig) -> Result<RunReport, RunError> {
    let mut backlog = Backlog::load(&paths.stock)?;
    let font = QuoteFont::from_candidates(&config.fonts)?;
    let templates = DirTemplates::new(&paths.templates);
    let mut namer = TimestampNamer::new();
    let audit = AuditLog::new(&paths.audit_log);
    render_batch_with(
        &mut backlog,
        &paths.stock,
        &templates,
        &mut namer,
        &font,
        config,
        &paths.output_dir,
        &audit,
    )
}

/// Render a batch using injected collaborators (template source and namer),
/// so tests can drive the loop deterministically.
#[allow(clippy::too_many_arguments)]
pub fn render_batch_with(
    backlog: &mut Backlog,
    stock_path: &Path,
    templates: &dyn TemplateSource,
    namer: &mut dyn UniqueNamer,
    font: &QuoteFont,
    config: &RenderConfig,
    output_dir: &Path,
    audit: &AuditLog,
) -> Result<RunReport, RunError> {
    std::fs::create_dir_all(output_dir)?;

    let shadow = if config.shadow.enabled {
        Some(Shadow {
            offset: (config.shadow.offset[0], config.shadow.offset[1]),
            color: config.shadow_color()?,
        })
    } else {
        None
    };
    let style = TextStyle {
        color: config.text_color()?,
        shadow,
        line_spacing: config.text.line_spacing,
    };
    let sizes = config.font_size_candidates();

    // Selection is simulated; consumption only becomes real at commit time,
    // one record at a time.
    let jobs: Vec<RenderJob> = backlog
        .select_batch(config.max_per_run)
        .into_iter()
        .map(|r| RenderJob {
            id: r.id,
            text: r.text.clone(),
            topic: r.topic.clone(),
        })
        .collect();
    let selected = jobs.len();

    let mut records = Vec::new();
    for job in jobs {
        let status = match render_one(
            &job, templates, font, config, &sizes, &style, output_dir, namer,
        ) {
            Ok((output, background)) => {
                if backlog.commit(job.id, stock_path)? {
                    audit.record(
                        job.id,
                        job.topic.as_deref(),
                        &output,
                        STATUS_OK,
                        OUTCOME_GENERATED,
                    )?;
                    RecordStatus::Rendered { output, background }
                } else {
                    RecordStatus::UnknownId
                }
            }
            Err(reason) => RecordStatus::Skipped(reason),
        };
        records.push(RecordReport {
            id: job.id,
            topic: job.topic,
            status,
        });
    }

    Ok(RunReport {
        selected,
        records,
        remaining_unused: backlog.remaining_unused(),
        low_stock_threshold: config.low_stock_threshold,
    })
}

/// Render a single quote: background, fit, compose, encode. Every failure
/// is a [`SkipReason`] — layout overflow is not one; an overflowing quote
/// still renders at the smallest candidate size.
#[allow(clippy::too_many_arguments)]
fn render_one(
    job: &RenderJob,
    templates: &dyn TemplateSource,
    font: &QuoteFont,
    config: &RenderConfig,
    sizes: &[u32],
    style: &TextStyle,
    output_dir: &Path,
    namer: &mut dyn UniqueNamer,
) -> Result<(PathBuf, Background), SkipReason> {
    if job.text.trim().is_empty() {
        return Err(SkipReason::EmptyQuoteText);
    }

    let (mut image, background) = build_background(templates, config)?;

    let layout = layout::fit(
        &job.text,
        config.box_width(),
        config.box_height(),
        sizes,
        config.text.line_spacing,
        font,
    );
    if layout.is_empty() {
        return Err(SkipReason::EmptyQuoteText);
    }
    compose::draw_quote(&mut image, &layout, font, style);

    let output = output_dir.join(namer.next(job.id));
    write_jpeg(&image, &output, config.jpeg_quality)
        .map_err(SkipReason::WriteFailed)?;
    Ok((output, background))
}

/// Build the background canvas per the configured mode. In `Auto` mode a
/// failing template source degrades to a gradient instead of skipping the
/// render — the alternative background path keeps a bad template directory
/// from killing a run.
fn build_background(
    templates: &dyn TemplateSource,
    config: &RenderConfig,
) -> Result<(RgbImage, Background), SkipReason> {
    match config.background {
        BackgroundMode::Gradient => Ok((gradient_canvas(config), Background::Gradient)),
        BackgroundMode::Template => template_canvas(templates, config)
            .map_err(|e| SkipReason::UnreadableTemplate(e.to_string())),
        BackgroundMode::Auto => match template_canvas(templates, config) {
            Ok(pair) => Ok(pair),
            Err(e) => Ok((
                gradient_canvas(config),
                Background::GradientFallback(e.to_string()),
            )),
        },
    }
}

fn template_canvas(
    templates: &dyn TemplateSource,
    config: &RenderConfig,
) -> Result<(RgbImage, Background), CanvasError> {
    let path = templates.pick()?;
    let mut image = canvas::from_template(&path, config.canvas_width, config.canvas_height)?;
    if config.darken.enabled {
        canvas::darken(&mut image, config.darken.alpha);
    }
    Ok((image, Background::Template(path)))
}

fn gradient_canvas(config: &RenderConfig) -> RgbImage {
    let (top, bottom) = canvas::random_palette();
    canvas::gradient(config.canvas_width, config.canvas_height, top, bottom)
}

fn write_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<(), String> {
    let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| e.to_string())
}

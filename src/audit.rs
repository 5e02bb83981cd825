//! Append-only audit log.
//!
//! One CSV line per successful render:
//!
//! ```text
//! 2026-08-07T09:15:02.114329+09:00,12,perseverance,output/images/quote_12_20260807091502_114329_000.jpg,ok,generated_image_only
//! ```
//!
//! Columns: timestamp, quote id, topic, output path, status token, outcome
//! description. The file is only ever appended to — history is never
//! rewritten. Fields that could contain commas or quotes are CSV-quoted.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Status token for a completed render.
pub const STATUS_OK: &str = "ok";
/// Outcome description: the image was generated but not posted anywhere.
pub const OUTCOME_GENERATED: &str = "generated_image_only";

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line for a successful render. Creates the parent
    /// directory and the file on first use.
    pub fn record(
        &self,
        quote_id: u64,
        topic: Option<&str>,
        output_path: &Path,
        status: &str,
        detail: &str,
    ) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{},{},{},{},{},{}",
            chrono::Local::now().to_rfc3339(),
            quote_id,
            escape_field(topic.unwrap_or("")),
            escape_field(&output_path.to_string_lossy()),
            status,
            detail
        )
    }
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

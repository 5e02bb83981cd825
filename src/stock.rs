//! Quote backlog storage and consumption state.
//!
//! The backlog is a JSON array of quote records on disk. Each record carries
//! a stable `id`, the quote text, an optional `topic`, and a `used` flag that
//! transitions false→true exactly once and never back. Selection always honors
//! stored order: the first unconsumed record wins.
//!
//! ## Crash safety
//!
//! [`Backlog::commit`] marks one record used and persists the whole backlog
//! immediately, writing to a temporary file in the same directory and renaming
//! it over the original. A crash between two commits therefore costs at most
//! one duplicate render — never a lost `used` mark for an already-rendered
//! quote. Committing per record instead of per batch is what bounds the blast
//! radius; re-running after a crash never reproduces an image for a record
//! that was already committed.
//!
//! ## Single writer
//!
//! The backlog file has exactly one writer at a time. [`Backlog::select_batch`]
//! simulates consumption in memory and never re-reads the file between picks;
//! a concurrent external writer would lose updates. This matches the
//! read-once / read-modify-write-per-commit discipline the file format was
//! designed for.
//!
//! ## Round-trip fidelity
//!
//! Records preserve fields this tool doesn't know about (via a flattened
//! map), so `save(load(x))` differs from `x` only in the `used` fields a
//! commit explicitly flipped. A record that never carried a `used` key stays
//! without one until it is committed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("backlog not readable: {0}: {1}")]
    Unreadable(PathBuf, String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One quote in the backlog.
///
/// The on-disk field for the text is `quote` (the original file format);
/// `text` is accepted as an alias when reading. Unknown fields round-trip
/// through `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: u64,
    #[serde(rename = "quote", alias = "text")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Stored as an option so a record without a `used` key keeps its shape
    /// on save until a commit writes `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    used: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl QuoteRecord {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            topic: None,
            used: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn is_used(&self) -> bool {
        self.used.unwrap_or(false)
    }

    fn mark_used(&mut self) {
        self.used = Some(true);
    }
}

/// The full quote backlog, in stored order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Backlog {
    records: Vec<QuoteRecord>,
}

impl Backlog {
    pub fn new(records: Vec<QuoteRecord>) -> Self {
        Self { records }
    }

    /// Load the backlog from `path`.
    ///
    /// A missing or structurally invalid file is [`StockError::Unreadable`] —
    /// fatal for the run, since rendering against a guessed backlog would
    /// break the duplicate-avoidance guarantee.
    pub fn load(path: &Path) -> Result<Self, StockError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StockError::Unreadable(path.to_path_buf(), e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| StockError::Unreadable(path.to_path_buf(), e.to_string()))
    }

    /// Persist the backlog to `path` atomically: write a sibling temp file,
    /// then rename it over the original. A crash mid-write leaves either the
    /// old file or the new one, never a torn mix.
    pub fn save(&self, path: &Path) -> Result<(), StockError> {
        let json = serde_json::to_string_pretty(&self.records)?;
        let tmp = tmp_path(path);
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with `used == false`, in stored order. Pure query.
    pub fn select_next(&self) -> Option<&QuoteRecord> {
        self.records.iter().find(|r| !r.is_used())
    }

    /// Up to `n` distinct records, chosen by simulating consumption over the
    /// stored order without mutating anything. No two entries share an `id`,
    /// even if the file itself carries a duplicate.
    pub fn select_batch(&self, n: usize) -> Vec<&QuoteRecord> {
        let mut picked: Vec<&QuoteRecord> = Vec::new();
        for record in &self.records {
            if picked.len() >= n {
                break;
            }
            if record.is_used() {
                continue;
            }
            if picked.iter().any(|p| p.id == record.id) {
                continue;
            }
            picked.push(record);
        }
        picked
    }

    /// Mark the record with `id` as used and persist immediately.
    ///
    /// Returns `Ok(false)` when no record has that id — the caller skips and
    /// continues; nothing is written in that case.
    pub fn commit(&mut self, id: u64, path: &Path) -> Result<bool, StockError> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        record.mark_used();
        self.save(path)?;
        Ok(true)
    }

    /// How many records are still unconsumed. The backlog never refuses to
    /// run on low stock — the caller decides whether to warn.
    pub fn remaining_unused(&self) -> usize {
        self.records.iter().filter(|r| !r.is_used()).count()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

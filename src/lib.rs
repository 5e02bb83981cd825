//! # quotegen
//!
//! Renders a backlog of quotes into shareable image cards, one quote per
//! image, and durably tracks which quotes have been used so repeated runs
//! never repost the same quote.
//!
//! # Architecture: Select → Render → Commit
//!
//! ```text
//! 1. Select    stock.json   →  batch of unused quotes   (pure query)
//! 2. Render    quote text   →  background + fitted text →  .jpg
//! 3. Commit    stock.json   ←  used = true, atomically, per record
//! ```
//!
//! The commit happens after *each* render, not at the end of the batch.
//! This bounds the blast radius of a mid-run crash to at most one duplicate
//! render — a quote whose image was written is never offered again, even if
//! the process dies before the next record. That per-record discipline is
//! the system's only fault-tolerance mechanism, and everything in [`stock`]
//! exists to keep it honest.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`stock`] | Backlog load/save, selection, atomic per-record commit |
//! | [`layout`] | Text-fit search: largest font size whose wrap fits the box |
//! | [`imaging`] | Pixel work: backgrounds, fonts, glyph compositing |
//! | [`run`] | The batch loop binding selection, rendering, and commits |
//! | [`naming`] | Collision-free output filenames (timestamp + sequence) |
//! | [`audit`] | Append-only CSV log of successful renders |
//! | [`config`] | `config.toml` loading, validation, stock defaults |
//! | [`output`] | CLI output formatting — run reports and backlog status |
//!
//! # Design Decisions
//!
//! ## Biggest Comfortable Size, Not Optimal Size
//!
//! The layout engine walks candidate font sizes from largest to smallest
//! and takes the first one whose word-wrapped rendering fits the text box.
//! It never fails on overflow: when nothing fits, the smallest candidate is
//! used anyway. A quote card with slightly cramped text beats a run that
//! dies on one long quote.
//!
//! ## Injectable Collaborators
//!
//! The incidental glue — picking a template file, generating an output
//! name, measuring text — sits behind small traits
//! ([`imaging::canvas::TemplateSource`], [`naming::UniqueNamer`],
//! [`layout::TextMeasure`]) so the render loop and the layout search are
//! testable with deterministic fakes, no fonts or template directories
//! required.
//!
//! ## Pure-Rust Imaging
//!
//! Backgrounds and text render through the `image` and `rusttype` crates —
//! no ImageMagick, no system font stack. The binary is self-contained: a
//! stock file, a fonts directory, and optionally some background templates
//! are all a deployment needs.
//!
//! ## Single Writer
//!
//! The backlog file is the sole shared resource. The design assumes exactly
//! one process runs against it at a time; there is no inter-process lock.
//! Runs are strictly sequential by design — throughput is bounded by a
//! small per-run batch, so concurrency would buy nothing and cost the
//! crash-safety story its simplicity.

pub mod audit;
pub mod config;
pub mod imaging;
pub mod layout;
pub mod naming;
pub mod output;
pub mod run;
pub mod stock;

#[cfg(test)]
pub(crate) mod test_helpers;

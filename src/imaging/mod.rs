//! Pixel work — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Gradient background** | per-row linear blend into an `image::RgbImage` |
//! | **Template background** | `image` crate decoders + `resize_exact` (Lanczos3) |
//! | **Darken overlay** | fixed-alpha composite toward black |
//! | **Font loading / measurement** | `rusttype` v-metrics + glyph advances |
//! | **Text drawing** | per-glyph coverage blend, shadow pass first |
//!
//! The module is split into:
//! - **Canvas**: background construction ([`canvas`])
//! - **Font**: font candidates + the production [`TextMeasure`](crate::layout::TextMeasure) ([`font`])
//! - **Compose**: centered multiline text with drop shadow ([`compose`])

pub mod canvas;
pub mod compose;
pub mod font;

pub use canvas::{CanvasError, DirTemplates, TemplateSource};
pub use compose::{Shadow, TextStyle};
pub use font::{FontError, QuoteFont};

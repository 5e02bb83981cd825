//! Compositing: draw a laid-out quote onto a canvas.
//!
//! The block is centered vertically using the *measured* layout height and
//! each line is centered horizontally about the canvas midline, so residual
//! slack is distributed evenly on all sides. When a shadow is configured, a
//! full shadow pass is drawn first at a fixed pixel offset, then the primary
//! text on top. The only side effect is mutation of the passed canvas.

use crate::imaging::font::QuoteFont;
use crate::layout::{LayoutResult, TextMeasure};
use image::{Rgb, RgbImage};
use rusttype::{Scale, point};

/// Drop-shadow parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shadow {
    pub offset: (i32, i32),
    pub color: Rgb<u8>,
}

/// Text appearance for one render.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub color: Rgb<u8>,
    pub shadow: Option<Shadow>,
    pub line_spacing: u32,
}

/// Draw the wrapped quote centered on the canvas. An empty layout draws
/// nothing — callers are expected to have skipped the record already.
pub fn draw_quote(canvas: &mut RgbImage, layout: &LayoutResult, font: &QuoteFont, style: &TextStyle) {
    if layout.is_empty() {
        return;
    }

    let top = (canvas.height() as i32 - layout.height as i32) / 2;

    if let Some(shadow) = style.shadow {
        draw_block(
            canvas,
            layout,
            font,
            shadow.color,
            style.line_spacing,
            top + shadow.offset.1,
            shadow.offset.0,
        );
    }
    draw_block(canvas, layout, font, style.color, style.line_spacing, top, 0);
}

fn draw_block(
    canvas: &mut RgbImage,
    layout: &LayoutResult,
    font: &QuoteFont,
    color: Rgb<u8>,
    line_spacing: u32,
    top: i32,
    x_offset: i32,
) {
    let size = layout.font_size;
    let line_height = font.line_height(size) as i32;
    let mut y = top;
    for line in &layout.lines {
        let line_width = font.line_width(line, size) as i32;
        let x = (canvas.width() as i32 - line_width) / 2 + x_offset;
        draw_line(canvas, font, size, x, y, color, line);
        y += line_height + line_spacing as i32;
    }
}

/// Rasterize one line at (x, y) where y is the top of the line box. Glyph
/// coverage is alpha-blended src-over onto the canvas.
fn draw_line(
    canvas: &mut RgbImage,
    font: &QuoteFont,
    size: u32,
    x: i32,
    y: i32,
    color: Rgb<u8>,
    text: &str,
) {
    let scale = Scale::uniform(size as f32);
    let baseline = y as f32 + font.ascent(size);

    for glyph in font.inner().layout(text, scale, point(x as f32, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || py < 0 {
                return;
            }
            let (px, py) = (px as u32, py as u32);
            if px >= canvas.width() || py >= canvas.height() {
                return;
            }
            if coverage <= 0.0 {
                return;
            }
            let dst = canvas.get_pixel_mut(px, py);
            let inv = 1.0 - coverage;
            dst.0[0] = (color.0[0] as f32 * coverage + dst.0[0] as f32 * inv) as u8;
            dst.0[1] = (color.0[1] as f32 * coverage + dst.0[1] as f32 * inv) as u8;
            dst.0[2] = (color.0[2] as f32 * coverage + dst.0[2] as f32 * inv) as u8;
        });
    }
}

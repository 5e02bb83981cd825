//! Text-fit layout: find the largest font size whose word-wrapped rendering
//! of a quote fits a bounding box.
//!
//! The search runs outer-to-inner:
//!
//! 1. For each candidate font size, largest first, run a wrap-width search:
//!    wrap the text at a generous column count and step the count down until
//!    the measured multi-line width fits the box (the widest fitting column
//!    count wins; the narrowest tried is the fallback).
//! 2. The first size whose wrapped block fits both width and height is the
//!    answer — larger sizes are preferred whenever they fit, a "biggest
//!    comfortable size" policy rather than an exact optimum.
//! 3. If no size fits, the layout at the smallest candidate is returned
//!    anyway. Overflow is never an error; a render always gets *some* layout.
//!
//! Wrapping never splits a single unbroken word, even one wider than the box
//! on its own — that overflow is accepted, not fixed by character splitting.
//!
//! Measurement goes through the [`TextMeasure`] seam so the engine stays
//! independent of any font library; the production implementation lives in
//! [`imaging::font`](crate::imaging::font), and tests use a fixed-advance
//! fake.

/// Measurement seam between the layout search and the font stack.
pub trait TextMeasure {
    /// Pixel width of a single line at the given font size.
    fn line_width(&self, text: &str, size: u32) -> u32;
    /// Pixel height of one line at the given font size.
    fn line_height(&self, size: u32) -> u32;
}

/// A wrapped, sized quote ready for compositing. Transient — produced per
/// render, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub lines: Vec<String>,
    pub font_size: u32,
    /// Measured width of the widest line.
    pub width: u32,
    /// Measured height of the full block, line spacing included.
    pub height: u32,
}

impl LayoutResult {
    /// Empty or whitespace-only input produces an empty layout. Callers must
    /// treat this as "nothing to render" and skip the record — compositing an
    /// empty layout silently would conflate a blank image with success.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The wrapped text with embedded line breaks.
    pub fn wrapped_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Wrap-column search range. The quote corpus is English prose; 28 columns
/// is roomy for the widest candidate size, 10 is the hard floor when
/// nothing fits.
const MAX_WRAP_COLUMNS: usize = 28;
const MIN_WRAP_COLUMNS: usize = 10;

/// Greedy word wrap at a column limit. Words stay intact: a word longer
/// than the limit gets a line of its own and overflows.
pub fn wrap_columns(text: &str, max_columns: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= max_columns {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Wrap `text` for the given font size so the measured block width fits
/// `box_width`, searching column counts from wide to narrow. Falls back to
/// the narrowest column count when nothing fits.
fn wrap_to_fit(
    text: &str,
    size: u32,
    box_width: u32,
    measure: &impl TextMeasure,
) -> Vec<String> {
    for columns in (MIN_WRAP_COLUMNS + 1..=MAX_WRAP_COLUMNS).rev() {
        let lines = wrap_columns(text, columns);
        if block_width(&lines, size, measure) <= box_width {
            return lines;
        }
    }
    wrap_columns(text, MIN_WRAP_COLUMNS)
}

fn block_width(lines: &[String], size: u32, measure: &impl TextMeasure) -> u32 {
    lines
        .iter()
        .map(|l| measure.line_width(l, size))
        .max()
        .unwrap_or(0)
}

fn block_height(lines: &[String], size: u32, line_spacing: u32, measure: &impl TextMeasure) -> u32 {
    if lines.is_empty() {
        return 0;
    }
    let n = lines.len() as u32;
    n * measure.line_height(size) + (n - 1) * line_spacing
}

/// Find the largest candidate font size whose wrapped rendering of `text`
/// fits `box_width` × `box_height`.
///
/// `sizes` must be ordered largest to smallest. If no candidate fits, the
/// layout at the smallest candidate is returned regardless of overflow.
pub fn fit(
    text: &str,
    box_width: u32,
    box_height: u32,
    sizes: &[u32],
    line_spacing: u32,
    measure: &impl TextMeasure,
) -> LayoutResult {
    let text = text.trim();
    if text.is_empty() || sizes.is_empty() {
        return LayoutResult {
            lines: Vec::new(),
            font_size: sizes.last().copied().unwrap_or(0),
            width: 0,
            height: 0,
        };
    }

    let mut last = LayoutResult {
        lines: Vec::new(),
        font_size: sizes[0],
        width: 0,
        height: 0,
    };
    for &size in sizes {
        let lines = wrap_to_fit(text, size, box_width, measure);
        let width = block_width(&lines, size, measure);
        let height = block_height(&lines, size, line_spacing, measure);
        last = LayoutResult {
            lines,
            font_size: size,
            width,
            height,
        };
        if width <= box_width && height <= box_height {
            return last;
        }
    }

    // Nothing fit; the smallest candidate's layout is the best effort.
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::FixedMeasure;

    // FixedMeasure: every char is `size / 2` wide, every line `size` tall.
    const SIZES: &[u32] = &[64, 62, 60, 58, 56, 54, 52, 50, 48, 46, 44, 42];

    #[test]
    fn wrap_keeps_words_intact() {
        let lines = wrap_columns("a quick brown fox", 7);
        assert_eq!(lines, vec!["a quick", "brown", "fox"]);
    }

    #[test]
    fn wrap_never_splits_overlong_word() {
        let lines = wrap_columns("tiny pneumonoultramicroscopic word", 10);
        assert_eq!(lines[1], "pneumonoultramicroscopic");
    }

    #[test]
    fn wrap_collapses_whitespace_runs() {
        let lines = wrap_columns("spaced   out\twords", 28);
        assert_eq!(lines, vec!["spaced out words"]);
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        let m = FixedMeasure;
        let layout = fit("   \n  ", 820, 1220, SIZES, 10, &m);
        assert!(layout.is_empty());
        assert_eq!((layout.width, layout.height), (0, 0));
        assert_eq!(layout.wrapped_text(), "");
    }

    #[test]
    fn short_text_gets_largest_size() {
        let m = FixedMeasure;
        let layout = fit("Hello world", 820, 1220, SIZES, 10, &m);
        assert_eq!(layout.font_size, 64);
        assert!(layout.width <= 820);
        assert!(layout.height <= 1220);
    }

    #[test]
    fn returned_size_always_satisfies_fit_or_is_minimum() {
        let m = FixedMeasure;
        let text = "The quick brown fox jumps over the lazy dog and keeps \
                    running far beyond the fence line into the hills";
        for &(w, h) in &[(820u32, 1220u32), (400, 600), (300, 300), (120, 90)] {
            let layout = fit(text, w, h, SIZES, 10, &m);
            let fits = layout.width <= w && layout.height <= h;
            assert!(
                fits || layout.font_size == *SIZES.last().unwrap(),
                "size {} overflows {}x{} without being the minimum",
                layout.font_size,
                w,
                h
            );
        }
    }

    #[test]
    fn tighter_box_never_returns_larger_font() {
        let m = FixedMeasure;
        let text = "Discipline is choosing between what you want now and \
                    what you want most";
        let roomy = fit(text, 900, 1300, SIZES, 10, &m);
        let tight = fit(text, 500, 700, SIZES, 10, &m);
        assert!(tight.font_size <= roomy.font_size);
    }

    #[test]
    fn overlong_word_survives_wrap_at_every_size() {
        let m = FixedMeasure;
        let word = "incomprehensibilities";
        let layout = fit(word, 60, 60, SIZES, 10, &m);
        assert!(layout.lines.iter().any(|l| l.contains(word)));
    }

    #[test]
    fn overflow_degrades_to_smallest_candidate() {
        let m = FixedMeasure;
        let text = "far too much text for a box this small to ever hold at \
                    any of the candidate sizes in the configured range";
        let layout = fit(text, 80, 40, SIZES, 10, &m);
        assert_eq!(layout.font_size, 42);
        assert!(!layout.is_empty());
    }

    #[test]
    fn wrapped_text_joins_with_newlines() {
        let m = FixedMeasure;
        let layout = fit("one two three four five six seven", 300, 1200, SIZES, 10, &m);
        assert!(layout.lines.len() > 1);
        assert_eq!(layout.wrapped_text().lines().count(), layout.lines.len());
    }

    #[test]
    fn block_height_includes_line_spacing() {
        let m = FixedMeasure;
        let lines = vec!["aa".to_string(), "bb".to_string(), "cc".to_string()];
        assert_eq!(block_height(&lines, 40, 10, &m), 3 * 40 + 2 * 10);
    }
}

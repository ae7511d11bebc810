//! Sub-span location inside a line's bounding box.
//!
//! A line's visible characters are assumed to divide its width evenly. That
//! monospacing model is only good enough for solid-fill redaction: the
//! resulting box visually contains the substring, nothing more precise.

use std::ops::Range;

use crate::model::{BoundingBox, Line};

/// Fraction of line height removed at the top and at the bottom. OCR line
/// boxes run taller than the glyphs they bound.
pub const VERTICAL_SHRINK: f64 = 0.15;

/// Box covering `span_length` characters starting at `start_offset` of a
/// line with `total_visible_chars` visible characters.
///
/// Falls back to the whole line box when the geometry is degenerate (zero
/// width, no visible characters, empty or out-of-range span).
pub fn interpolate(
    line_bbox: BoundingBox,
    total_visible_chars: usize,
    start_offset: usize,
    span_length: usize,
) -> BoundingBox {
    interpolate_with_shrink(
        line_bbox,
        total_visible_chars,
        start_offset,
        span_length,
        VERTICAL_SHRINK,
    )
}

/// [`interpolate`] with an explicit vertical shrink ratio.
pub fn interpolate_with_shrink(
    line_bbox: BoundingBox,
    total_visible_chars: usize,
    start_offset: usize,
    span_length: usize,
    vertical_shrink: f64,
) -> BoundingBox {
    let width = line_bbox.width();
    if total_visible_chars == 0 || width <= 0 || span_length == 0 || start_offset >= total_visible_chars
    {
        return line_bbox;
    }
    let end_offset = start_offset
        .saturating_add(span_length)
        .min(total_visible_chars);

    let char_width = width as f64 / total_visible_chars as f64;
    let left = line_bbox.x0 as f64;
    let x0 = (left + char_width * start_offset as f64).floor() as i32;
    let x1 = (left + char_width * end_offset as f64).ceil() as i32;

    let shrink = if vertical_shrink.is_finite() {
        vertical_shrink.clamp(0.0, 0.49)
    } else {
        0.0
    };
    let inset = (line_bbox.height() as f64 * shrink).floor() as i32;

    BoundingBox::new(x0, line_bbox.y0 + inset, x1, line_bbox.y1 - inset).clamp_to(&line_bbox)
}

/// A line's text annotated with the geometry needed to turn byte ranges of
/// `line.text` (as produced by regex matches) into boxes.
#[derive(Debug, Clone, Copy)]
pub struct LineText<'a> {
    line: &'a Line,
    leading: usize,
    visible_end: usize,
    total_chars: usize,
    vertical_shrink: f64,
}

impl<'a> LineText<'a> {
    /// Annotate a line with the default vertical shrink.
    pub fn new(line: &'a Line) -> Self {
        Self::with_shrink(line, VERTICAL_SHRINK)
    }

    /// Annotate a line with an explicit vertical shrink.
    pub fn with_shrink(line: &'a Line, vertical_shrink: f64) -> Self {
        let text = line.text.as_str();
        let leading = text.len() - text.trim_start().len();
        let visible_end = text.trim_end().len().max(leading);
        let total_chars = text[leading..visible_end].chars().count();
        Self {
            line,
            leading,
            visible_end,
            total_chars,
            vertical_shrink,
        }
    }

    /// The full line text that byte ranges refer to.
    pub fn text(&self) -> &'a str {
        &self.line.text
    }

    /// The annotated line.
    pub fn line(&self) -> &'a Line {
        self.line
    }

    /// Number of visible characters.
    pub fn total_chars(&self) -> usize {
        self.total_chars
    }

    /// Visible-character offset of a byte position in the line text.
    pub fn char_offset(&self, byte: usize) -> usize {
        let end = byte.clamp(self.leading, self.visible_end);
        self.line.text[self.leading..end].chars().count()
    }

    /// Box covering the byte range `range` of the line text.
    pub fn locate(&self, range: Range<usize>) -> BoundingBox {
        let start = self.char_offset(range.start);
        let end = self.char_offset(range.end);
        interpolate_with_shrink(
            self.line.bbox,
            self.total_chars,
            start,
            end.saturating_sub(start),
            self.vertical_shrink,
        )
    }
}

//! OCR input shape detection.
//!
//! Reports which structural forms a raw output carries without normalizing
//! it. Useful for diagnostics and for the CLI `info` command.

use crate::model::RecoverySource;
use crate::parser::RawOcrOutput;

/// Which forms are present in a raw OCR output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputShape {
    /// Number of lines inside the block tree
    pub block_lines: usize,
    /// Number of flat lines
    pub lines: usize,
    /// Whether non-blank hOCR markup is present
    pub has_markup: bool,
    /// Number of flat words
    pub words: usize,
    /// Number of non-blank text lines
    pub text_lines: usize,
}

impl InputShape {
    /// The recovery strategy expected to win, judged by presence alone.
    ///
    /// Normalization may still fall through when a present form contains no
    /// usable nodes.
    pub fn preferred_source(&self) -> RecoverySource {
        if self.block_lines > 0 {
            RecoverySource::Blocks
        } else if self.lines > 0 {
            RecoverySource::Lines
        } else if self.has_markup {
            RecoverySource::Markup
        } else if self.words > 0 {
            RecoverySource::Words
        } else if self.text_lines > 0 {
            RecoverySource::Text
        } else {
            RecoverySource::Empty
        }
    }

    /// Whether nothing at all is present.
    pub fn is_empty(&self) -> bool {
        self.preferred_source() == RecoverySource::Empty
    }
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "block lines: {}, lines: {}, markup: {}, words: {}, text lines: {}",
            self.block_lines,
            self.lines,
            if self.has_markup { "yes" } else { "no" },
            self.words,
            self.text_lines
        )
    }
}

/// Inspect a raw OCR output.
pub fn detect_shape(raw: &RawOcrOutput) -> InputShape {
    InputShape {
        block_lines: raw
            .blocks
            .iter()
            .flatten()
            .flat_map(|b| b.paragraphs.iter())
            .map(|p| p.lines.len())
            .sum(),
        lines: raw.lines.as_ref().map_or(0, Vec::len),
        has_markup: raw.hocr.as_deref().is_some_and(|m| !m.trim().is_empty()),
        words: raw.words.as_ref().map_or(0, Vec::len),
        text_lines: raw
            .text
            .as_deref()
            .map_or(0, |t| t.lines().filter(|l| !l.trim().is_empty()).count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{RawBBox, RawBlock, RawLine, RawWord};

    #[test]
    fn test_detect_empty() {
        let shape = detect_shape(&RawOcrOutput::new());
        assert!(shape.is_empty());
        assert_eq!(shape.preferred_source(), RecoverySource::Empty);
    }

    #[test]
    fn test_detect_text_only() {
        let shape = detect_shape(&RawOcrOutput::from_text("a\n\nb\n"));
        assert_eq!(shape.text_lines, 2);
        assert_eq!(shape.preferred_source(), RecoverySource::Text);
    }

    #[test]
    fn test_detect_precedence() {
        let word = RawWord::new("x", RawBBox::new(0.0, 0.0, 1.0, 1.0), 50.0);
        let raw = RawOcrOutput {
            blocks: Some(vec![RawBlock::from_lines(vec![RawLine::from_words(vec![
                word.clone(),
            ])])]),
            words: Some(vec![word]),
            hocr: Some("  ".to_string()),
            ..Default::default()
        };
        let shape = detect_shape(&raw);
        assert_eq!(shape.block_lines, 1);
        assert_eq!(shape.words, 1);
        assert!(!shape.has_markup);
        assert_eq!(shape.preferred_source(), RecoverySource::Blocks);
    }
}

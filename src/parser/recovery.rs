//! Structure recovery: raw engine output to a canonical document.
//!
//! Recovery is an ordered list of strategies. Each one is a pure function
//! from the raw output to lines; the first that yields at least one line
//! wins. The last strategy synthesizes positions from plain text, so every
//! input produces a document.

use unicode_normalization::UnicodeNormalization;

use crate::model::{BoundingBox, Line, RecognizedDocument, RecoverySource, Word};

use super::cluster::cluster_words;
use super::hocr::HocrParser;
use super::options::NormalizeOptions;
use super::raw::{RawLine, RawOcrOutput, RawWord};

/// A single recovery strategy.
pub type RecoveryStrategy = fn(&RawOcrOutput, &NormalizeOptions) -> Vec<Line>;

/// Strategies in order of preference.
pub const STRATEGIES: &[(RecoverySource, RecoveryStrategy)] = &[
    (RecoverySource::Blocks, from_blocks),
    (RecoverySource::Lines, from_flat_lines),
    (RecoverySource::Markup, from_markup),
    (RecoverySource::Words, from_flat_words),
    (RecoverySource::Text, from_plain_text),
];

/// Normalizes raw OCR output into a [`RecognizedDocument`].
#[derive(Debug, Clone, Default)]
pub struct OcrNormalizer {
    options: NormalizeOptions,
}

impl OcrNormalizer {
    /// Create a normalizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with custom options.
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Recover the line structure. Never fails; an input with nothing usable
    /// yields an empty document.
    pub fn normalize(&self, raw: &RawOcrOutput) -> RecognizedDocument {
        let full_text = raw
            .text
            .as_deref()
            .map(|t| self.clean(t))
            .unwrap_or_default();

        for (source, strategy) in STRATEGIES {
            let lines = strategy(raw, &self.options);
            if lines.is_empty() {
                continue;
            }
            if source.is_synthetic() {
                log::warn!(
                    "No positional OCR structure; synthesized {} lines from text",
                    lines.len()
                );
            } else {
                log::debug!("Recovered {} lines from {}", lines.len(), source);
            }
            return RecognizedDocument::from_lines(full_text, lines, *source);
        }

        log::debug!("OCR output contained no text");
        RecognizedDocument::empty()
    }

    fn clean(&self, text: &str) -> String {
        clean_text(text, &self.options)
    }
}

/// Normalize with default options.
pub fn normalize(raw: &RawOcrOutput) -> RecognizedDocument {
    OcrNormalizer::new().normalize(raw)
}

/// Normalize with custom options.
pub fn normalize_with_options(raw: &RawOcrOutput, options: &NormalizeOptions) -> RecognizedDocument {
    OcrNormalizer::with_options(options.clone()).normalize(raw)
}

fn clean_text(text: &str, options: &NormalizeOptions) -> String {
    let text = text.trim_end_matches(['\n', '\r']);
    if options.normalize_unicode {
        text.nfc().collect()
    } else {
        text.to_string()
    }
}

fn convert_word(raw: &RawWord, options: &NormalizeOptions) -> Option<Word> {
    let text = clean_text(raw.text.as_deref()?, options);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let bbox = raw.bbox?.to_bbox()?;
    let confidence = raw.confidence.unwrap_or(0.0) as f32;
    Some(Word::new(text, bbox, confidence))
}

fn convert_line(raw: &RawLine, options: &NormalizeOptions) -> Option<Line> {
    let words: Vec<Word> = raw
        .words
        .iter()
        .filter_map(|w| convert_word(w, options))
        .collect();

    let engine_text = raw
        .text
        .as_deref()
        .map(|t| clean_text(t, options))
        .filter(|t| !t.trim().is_empty());
    let engine_box = raw.bbox.and_then(|b| b.to_bbox());

    if words.is_empty() {
        // Wordless line: one word spanning the whole line.
        let text = engine_text?;
        let bbox = engine_box?;
        let word = Word::new(
            text.trim(),
            bbox,
            raw.confidence.unwrap_or(0.0) as f32,
        );
        return Some(Line::new(text, bbox, vec![word]));
    }

    let mut line = Line::from_words(words)?;
    if let Some(text) = engine_text {
        line.text = text;
    }
    if let Some(bbox) = engine_box {
        line.bbox = bbox;
    }
    Some(line)
}

fn convert_lines<'a, I>(raw_lines: I, options: &NormalizeOptions) -> Vec<Line>
where
    I: IntoIterator<Item = &'a RawLine>,
{
    raw_lines
        .into_iter()
        .filter_map(|l| convert_line(l, options))
        .collect()
}

/// Flatten a block/paragraph/line tree, keeping line order.
pub fn from_blocks(raw: &RawOcrOutput, options: &NormalizeOptions) -> Vec<Line> {
    let Some(blocks) = &raw.blocks else {
        return Vec::new();
    };
    convert_lines(
        blocks
            .iter()
            .flat_map(|b| b.paragraphs.iter())
            .flat_map(|p| p.lines.iter()),
        options,
    )
}

/// Use the engine's flat line list.
pub fn from_flat_lines(raw: &RawOcrOutput, options: &NormalizeOptions) -> Vec<Line> {
    match &raw.lines {
        Some(lines) => convert_lines(lines, options),
        None => Vec::new(),
    }
}

/// Parse line and word boxes out of hOCR markup.
pub fn from_markup(raw: &RawOcrOutput, options: &NormalizeOptions) -> Vec<Line> {
    let Some(markup) = raw.hocr.as_deref().filter(|m| !m.trim().is_empty()) else {
        return Vec::new();
    };
    let lines = HocrParser::new().parse(markup);
    if !options.normalize_unicode {
        return lines;
    }
    lines
        .into_iter()
        .map(|mut line| {
            line.text = line.text.nfc().collect();
            for word in &mut line.words {
                word.text = word.text.nfc().collect();
            }
            line
        })
        .collect()
}

/// Group flat words into lines by vertical position.
pub fn from_flat_words(raw: &RawOcrOutput, options: &NormalizeOptions) -> Vec<Line> {
    let Some(raw_words) = &raw.words else {
        return Vec::new();
    };
    let words: Vec<Word> = raw_words
        .iter()
        .filter_map(|w| convert_word(w, options))
        .collect();
    cluster_words(words, options.line_tolerance)
}

/// Stack text lines at a fixed height with fixed-width words.
///
/// Positions are fictitious; the resulting document reports
/// [`RecoverySource::Text`].
pub fn from_plain_text(raw: &RawOcrOutput, options: &NormalizeOptions) -> Vec<Line> {
    let Some(text) = raw.text.as_deref() else {
        return Vec::new();
    };
    let text = clean_text(text, options);
    let height = options.synthetic_line_height.max(1);
    let width = options.synthetic_word_width.max(1);
    let gap = options.synthetic_word_gap.max(0);

    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .filter_map(|(row, line_text)| {
            let y0 = row as i32 * height;
            let words = line_text
                .split_whitespace()
                .enumerate()
                .map(|(col, token)| {
                    let x0 = col as i32 * (width + gap);
                    Word::new(token, BoundingBox::new(x0, y0, x0 + width, y0 + height), 0.0)
                })
                .collect::<Vec<_>>();
            let bbox = BoundingBox::union_all(words.iter().map(|w| &w.bbox))?;
            Some(Line::new(line_text, bbox, words))
        })
        .collect()
}

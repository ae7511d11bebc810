//! Recognized-document types: words, lines and the normalized document.

use super::BoundingBox;
use serde::Serialize;

/// A single recognized word. Leaf unit of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    /// Recognized text
    pub text: String,

    /// Position in the OCR image
    pub bbox: BoundingBox,

    /// Engine confidence, 0..=100
    pub confidence: f32,
}

impl Word {
    /// Create a new word. Confidence is clamped to 0..=100.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, confidence: f32) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            text: text.into(),
            bbox,
            confidence,
        }
    }
}

/// A line of recognized text.
///
/// `text` is either engine-supplied or the space-join of the words; the two
/// are not guaranteed to agree character for character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    /// Line text
    pub text: String,

    /// Line position, engine-supplied or the union of the word boxes
    pub bbox: BoundingBox,

    /// Words in reading order
    pub words: Vec<Word>,
}

impl Line {
    /// Create a line with explicit text and box.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, words: Vec<Word>) -> Self {
        Self {
            text: text.into(),
            bbox,
            words,
        }
    }

    /// Build a line from words: text is the space-join, box is the union.
    ///
    /// Returns `None` for an empty word list.
    pub fn from_words(words: Vec<Word>) -> Option<Self> {
        let bbox = BoundingBox::union_all(words.iter().map(|w| &w.bbox))?;
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Some(Self { text, bbox, words })
    }

    /// Text without leading/trailing whitespace.
    pub fn visible_text(&self) -> &str {
        self.text.trim()
    }

    /// Text with all whitespace removed, for matching against OCR output
    /// that inserted spaces inside tokens.
    pub fn compact_text(&self) -> String {
        self.text.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

/// Which recovery strategy produced a document's line structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoverySource {
    /// Nested block/paragraph/line tree
    Blocks,
    /// Flat engine line list
    Lines,
    /// Markup recognition document (hOCR)
    Markup,
    /// Flat words grouped by vertical clustering
    Words,
    /// Plain text with synthetic positions
    Text,
    /// Nothing recognizable
    Empty,
}

impl RecoverySource {
    /// Whether positions were fabricated rather than recognized.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, RecoverySource::Text)
    }

    /// Short name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            RecoverySource::Blocks => "blocks",
            RecoverySource::Lines => "lines",
            RecoverySource::Markup => "markup",
            RecoverySource::Words => "words",
            RecoverySource::Text => "text",
            RecoverySource::Empty => "empty",
        }
    }
}

impl std::fmt::Display for RecoverySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical OCR result: ordered lines, each carrying its words.
///
/// The flat word list is always the flattening of the lines' words; it is
/// derived at construction and cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizedDocument {
    full_text: String,
    lines: Vec<Line>,
    words: Vec<Word>,
    source: RecoverySource,
}

impl RecognizedDocument {
    /// Build a document from lines. When `full_text` is blank it is
    /// reconstructed by joining line texts with newlines.
    pub fn from_lines(full_text: impl Into<String>, lines: Vec<Line>, source: RecoverySource) -> Self {
        let mut full_text = full_text.into();
        if full_text.trim().is_empty() {
            full_text = lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
        }
        let words = lines.iter().flat_map(|l| l.words.iter().cloned()).collect();
        Self {
            full_text,
            lines,
            words,
            source,
        }
    }

    /// An empty document.
    pub fn empty() -> Self {
        Self {
            full_text: String::new(),
            lines: Vec::new(),
            words: Vec::new(),
            source: RecoverySource::Empty,
        }
    }

    /// Full recognized text.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Lines in reading order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Flat word list.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Strategy that produced the lines.
    pub fn source(&self) -> RecoverySource {
        self.source
    }

    /// Get a line by index.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether `words` equals the flattening of every line's words.
    pub fn is_consistent(&self) -> bool {
        self.words.len() == self.lines.iter().map(|l| l.words.len()).sum::<usize>()
            && self
                .lines
                .iter()
                .flat_map(|l| l.words.iter())
                .zip(self.words.iter())
                .all(|(a, b)| a == b)
    }
}

impl Default for RecognizedDocument {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: i32, x1: i32) -> Word {
        Word::new(text, BoundingBox::new(x0, 0, x1, 20), 90.0)
    }

    #[test]
    fn test_line_from_words() {
        let line = Line::from_words(vec![word("홍길동", 10, 60), word("님", 70, 90)]).unwrap();
        assert_eq!(line.text, "홍길동 님");
        assert_eq!(line.bbox, BoundingBox::new(10, 0, 90, 20));
        assert!(Line::from_words(Vec::new()).is_none());
    }

    #[test]
    fn test_word_confidence_clamped() {
        assert_eq!(Word::new("a", BoundingBox::default(), 140.0).confidence, 100.0);
        assert_eq!(Word::new("a", BoundingBox::default(), f32::NAN).confidence, 0.0);
    }

    #[test]
    fn test_document_words_flattened() {
        let l1 = Line::from_words(vec![word("a", 0, 10), word("b", 20, 30)]).unwrap();
        let l2 = Line::from_words(vec![word("c", 0, 10)]).unwrap();
        let doc = RecognizedDocument::from_lines("", vec![l1, l2], RecoverySource::Words);

        assert_eq!(doc.words().len(), 3);
        assert!(doc.is_consistent());
        assert_eq!(doc.full_text(), "a b\nc");
    }

    #[test]
    fn test_empty_document() {
        let doc = RecognizedDocument::empty();
        assert!(doc.is_empty());
        assert!(doc.is_consistent());
        assert_eq!(doc.source(), RecoverySource::Empty);
    }

    #[test]
    fn test_compact_text() {
        let line = Line::new(" 서 울 특별시 ", BoundingBox::default(), Vec::new());
        assert_eq!(line.compact_text(), "서울특별시");
        assert_eq!(line.visible_text(), "서 울 특별시");
    }
}

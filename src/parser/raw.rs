//! Loosely-typed OCR engine output.
//!
//! Engines report any mix of a block/paragraph/line/word tree, flat line or
//! word arrays, an hOCR markup document, and plain text. Every field is
//! optional; the caller never declares which form is present.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::BoundingBox;

/// Raw box as reported by the engine. Coordinates may be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawBBox {
    /// Left edge
    pub x0: f64,
    /// Top edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Bottom edge
    pub y1: f64,
}

impl RawBBox {
    /// Create a raw box.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Round to integer pixels. Non-finite coordinates yield `None`.
    pub fn to_bbox(&self) -> Option<BoundingBox> {
        let coords = [self.x0, self.y0, self.x1, self.y1];
        if coords.iter().any(|c| !c.is_finite()) {
            return None;
        }
        Some(BoundingBox::new(
            self.x0.round() as i32,
            self.y0.round() as i32,
            self.x1.round() as i32,
            self.y1.round() as i32,
        ))
    }
}

impl From<BoundingBox> for RawBBox {
    fn from(b: BoundingBox) -> Self {
        Self::new(b.x0 as f64, b.y0 as f64, b.x1 as f64, b.y1 as f64)
    }
}

/// A recognized word node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawWord {
    /// Word text
    pub text: Option<String>,
    /// Word box
    pub bbox: Option<RawBBox>,
    /// Engine confidence
    pub confidence: Option<f64>,
}

impl RawWord {
    /// Create a word node.
    pub fn new(text: impl Into<String>, bbox: RawBBox, confidence: f64) -> Self {
        Self {
            text: Some(text.into()),
            bbox: Some(bbox),
            confidence: Some(confidence),
        }
    }
}

/// A recognized line node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLine {
    /// Line text
    pub text: Option<String>,
    /// Line box
    pub bbox: Option<RawBBox>,
    /// Engine confidence
    pub confidence: Option<f64>,
    /// Word children
    pub words: Vec<RawWord>,
}

impl RawLine {
    /// Create a line node from its words, without engine text or box.
    pub fn from_words(words: Vec<RawWord>) -> Self {
        Self {
            words,
            ..Default::default()
        }
    }

    /// Create a wordless line node with text and box.
    pub fn with_text(text: impl Into<String>, bbox: RawBBox) -> Self {
        Self {
            text: Some(text.into()),
            bbox: Some(bbox),
            ..Default::default()
        }
    }
}

/// A paragraph node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParagraph {
    /// Paragraph text
    pub text: Option<String>,
    /// Paragraph box
    pub bbox: Option<RawBBox>,
    /// Line children
    pub lines: Vec<RawLine>,
}

/// A block node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBlock {
    /// Block text
    pub text: Option<String>,
    /// Block box
    pub bbox: Option<RawBBox>,
    /// Paragraph children
    pub paragraphs: Vec<RawParagraph>,
}

impl RawBlock {
    /// Wrap lines in a single block with a single paragraph.
    pub fn from_lines(lines: Vec<RawLine>) -> Self {
        Self {
            paragraphs: vec![RawParagraph {
                lines,
                ..Default::default()
            }],
            ..Default::default()
        }
    }
}

/// Everything an OCR engine may report for one image.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOcrOutput {
    /// Concatenated recognized text
    pub text: Option<String>,
    /// hOCR markup document
    #[serde(alias = "html")]
    pub hocr: Option<String>,
    /// Nested block/paragraph/line/word tree
    pub blocks: Option<Vec<RawBlock>>,
    /// Flat line list
    pub lines: Option<Vec<RawLine>>,
    /// Flat word list
    pub words: Option<Vec<RawWord>>,
}

impl RawOcrOutput {
    /// Create an empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output carrying only text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Output carrying only an hOCR document.
    pub fn from_hocr(hocr: impl Into<String>) -> Self {
        Self {
            hocr: Some(hocr.into()),
            ..Default::default()
        }
    }

    /// Output carrying only flat words.
    pub fn from_words(words: Vec<RawWord>) -> Self {
        Self {
            words: Some(words),
            ..Default::default()
        }
    }

    /// Output carrying only flat lines.
    pub fn from_lines(lines: Vec<RawLine>) -> Self {
        Self {
            lines: Some(lines),
            ..Default::default()
        }
    }

    /// Output carrying only a block tree.
    pub fn from_blocks(blocks: Vec<RawBlock>) -> Self {
        Self {
            blocks: Some(blocks),
            ..Default::default()
        }
    }

    /// Set the concatenated text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Decode engine JSON.
    ///
    /// An object is read field by field, a bare string is taken as plain
    /// text and `null` as an empty output.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON value. See [`RawOcrOutput::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Self::default()),
            serde_json::Value::String(text) => Ok(Self::from_text(text)),
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(Error::InvalidInput(format!(
                "expected an object or a string, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

//! hOCR markup parsing.
//!
//! Only the parts needed for line/word recovery are read: elements whose
//! `class` marks them as a line or a word, and the `bbox x0 y0 x1 y1` and
//! `x_wconf N` properties in their `title` attribute.

use regex::Regex;

use crate::model::{BoundingBox, Line, Word};

const LINE_CLASSES: &[&str] = &[
    "ocr_line",
    "ocrx_line",
    "ocr_header",
    "ocr_textfloat",
    "ocr_caption",
];
const WORD_CLASS: &str = "ocrx_word";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Line,
    Word,
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    /// Byte offset just past the opening tag
    content_start: usize,
    /// Byte offset of the opening tag
    tag_start: usize,
    bbox: Option<BoundingBox>,
    confidence: Option<f32>,
}

#[derive(Debug, Default)]
struct PendingLine {
    bbox: Option<BoundingBox>,
    content_start: usize,
    words: Vec<Word>,
}

/// Parser for hOCR recognition documents.
pub struct HocrParser {
    tag_regex: Regex,
    class_regex: Regex,
    title_regex: Regex,
    bbox_regex: Regex,
    wconf_regex: Regex,
    strip_regex: Regex,
    space_regex: Regex,
}

impl HocrParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            tag_regex: Regex::new(r"<([A-Za-z][A-Za-z0-9]*)\b([^>]*)>").expect("hOCR tag regex"),
            class_regex: Regex::new(r#"class\s*=\s*["']([^"']*)["']"#).expect("hOCR class regex"),
            title_regex: Regex::new(r#"title\s*=\s*["']([^"']*)["']"#).expect("hOCR title regex"),
            bbox_regex: Regex::new(r"bbox\s+(-?[0-9]+(?:\.[0-9]+)?)\s+(-?[0-9]+(?:\.[0-9]+)?)\s+(-?[0-9]+(?:\.[0-9]+)?)\s+(-?[0-9]+(?:\.[0-9]+)?)")
                .expect("hOCR bbox regex"),
            wconf_regex: Regex::new(r"x_wconf\s+([0-9]+(?:\.[0-9]+)?)").expect("hOCR wconf regex"),
            strip_regex: Regex::new(r"<[^>]*>").expect("hOCR strip regex"),
            space_regex: Regex::new(r"\s+").expect("hOCR space regex"),
        }
    }

    /// Parse a document into lines. Lines without any box are dropped.
    ///
    /// A line's text is the space-join of its words, or the line element's
    /// own text when it has no word children.
    pub fn parse(&self, markup: &str) -> Vec<Line> {
        let nodes = self.scan(markup);
        let mut lines = Vec::new();
        let mut pending: Option<PendingLine> = None;

        for node in &nodes {
            match node.kind {
                NodeKind::Line => {
                    if let Some(line) = pending.take() {
                        lines.extend(self.finish(markup, line, node.tag_start));
                    }
                    pending = Some(PendingLine {
                        bbox: node.bbox,
                        content_start: node.content_start,
                        words: Vec::new(),
                    });
                }
                NodeKind::Word => {
                    let Some(bbox) = node.bbox else {
                        continue;
                    };
                    let text = self.element_text(markup, node.content_start);
                    if text.is_empty() {
                        continue;
                    }
                    let word = Word::new(text, bbox, node.confidence.unwrap_or(0.0));
                    pending
                        .get_or_insert_with(|| PendingLine {
                            content_start: node.tag_start,
                            ..Default::default()
                        })
                        .words
                        .push(word);
                }
            }
        }
        if let Some(line) = pending.take() {
            lines.extend(self.finish(markup, line, markup.len()));
        }

        log::debug!("hOCR: {} nodes, {} lines", nodes.len(), lines.len());
        lines
    }

    fn scan(&self, markup: &str) -> Vec<Node> {
        let mut nodes = Vec::new();
        for caps in self.tag_regex.captures_iter(markup) {
            let (Some(tag), Some(attrs)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let attrs = attrs.as_str();
            let Some(classes) = self.class_regex.captures(attrs).and_then(|c| c.get(1)) else {
                continue;
            };
            let classes = classes.as_str();
            let kind = if classes.split_whitespace().any(|c| c == WORD_CLASS) {
                NodeKind::Word
            } else if classes
                .split_whitespace()
                .any(|c| LINE_CLASSES.contains(&c))
            {
                NodeKind::Line
            } else {
                continue;
            };

            let title = self
                .title_regex
                .captures(attrs)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str())
                .unwrap_or("");
            nodes.push(Node {
                kind,
                content_start: tag.end(),
                tag_start: tag.start(),
                bbox: self.parse_bbox(title),
                confidence: self.parse_confidence(title),
            });
        }
        nodes
    }

    fn parse_bbox(&self, title: &str) -> Option<BoundingBox> {
        let caps = self.bbox_regex.captures(title)?;
        let mut coords = [0i32; 4];
        for (i, coord) in coords.iter_mut().enumerate() {
            let value: f64 = caps.get(i + 1)?.as_str().parse().ok()?;
            *coord = value.round() as i32;
        }
        Some(BoundingBox::new(coords[0], coords[1], coords[2], coords[3]))
    }

    fn parse_confidence(&self, title: &str) -> Option<f32> {
        self.wconf_regex
            .captures(title)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Text of the element whose content starts at `start`, up to its first
    /// closing `</span>`.
    fn element_text(&self, markup: &str, start: usize) -> String {
        let rest = &markup[start..];
        let end = rest.find("</span>").unwrap_or(rest.len());
        self.clean_text(&rest[..end])
    }

    fn clean_text(&self, fragment: &str) -> String {
        let stripped = self.strip_regex.replace_all(fragment, " ");
        let decoded = decode_entities(&stripped);
        self.space_regex
            .replace_all(decoded.trim(), " ")
            .into_owned()
    }

    fn finish(&self, markup: &str, line: PendingLine, end: usize) -> Option<Line> {
        if line.words.is_empty() {
            let bbox = line.bbox?;
            let end = end.max(line.content_start).min(markup.len());
            let text = self.clean_text(&markup[line.content_start..end]);
            if text.is_empty() {
                return None;
            }
            // One word spanning the whole line.
            let word = Word::new(text.as_str(), bbox, 0.0);
            return Some(Line::new(text, bbox, vec![word]));
        }

        let mut built = Line::from_words(line.words)?;
        if let Some(bbox) = line.bbox {
            built.bbox = bbox;
        }
        Some(built)
    }
}

impl Default for HocrParser {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

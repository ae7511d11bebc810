//! Identifier code matcher (driver licenses only): a six-character
//! alphanumeric token mixing letters and digits.
//!
//! Tokens are taken from word text. A word that holds several tokens (a line
//! recovered without word boxes carries one word spanning the line) gets an
//! interpolated sub-box for the code.

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, FieldKind, RecognizedDocument};

use super::matcher::{FieldMatcher, MatchContext};
use super::span::interpolate_with_shrink;

const CODE_LENGTH: usize = 6;

/// Matcher for identifier codes.
#[derive(Debug, Clone, Default)]
pub struct IdentifierCodeMatcher;

impl IdentifierCodeMatcher {
    /// Create the matcher.
    pub fn new() -> Self {
        Self
    }

    /// Whether `token` has the identifier code shape.
    pub fn is_code(token: &str) -> bool {
        token.len() == CODE_LENGTH
            && token.chars().all(|c| c.is_ascii_alphanumeric())
            && token.chars().any(|c| c.is_ascii_alphabetic())
            && token.chars().any(|c| c.is_ascii_digit())
    }
}

/// Whitespace-separated tokens of `text` with their character offset.
fn tokens(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    for (offset, (byte, c)) in text.char_indices().enumerate() {
        match (c.is_whitespace(), current) {
            (true, Some((start_offset, start_byte))) => {
                tokens.push((start_offset, &text[start_byte..byte]));
                current = None;
            }
            (false, None) => current = Some((offset, byte)),
            _ => {}
        }
    }
    if let Some((start_offset, start_byte)) = current {
        tokens.push((start_offset, &text[start_byte..]));
    }
    tokens
}

impl FieldMatcher for IdentifierCodeMatcher {
    fn name(&self) -> &'static str {
        "identifier code"
    }

    fn find(
        &self,
        doc: &RecognizedDocument,
        ctx: &MatchContext<'_>,
        diag: &mut Diagnostics,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for (index, line) in doc.lines().iter().enumerate() {
            for word in &line.words {
                let text = word.text.trim();
                let total = text.chars().count();
                for (offset, token) in tokens(text) {
                    if !Self::is_code(token) {
                        continue;
                    }
                    let bbox = if token.len() == text.len() {
                        word.bbox
                    } else {
                        interpolate_with_shrink(
                            word.bbox,
                            total,
                            offset,
                            CODE_LENGTH,
                            ctx.options.vertical_shrink,
                        )
                    };
                    diag.record(format!("identifier code: '{}' on line {}", token, index));
                    candidates.push(Candidate::new(
                        FieldKind::IdentifierCode,
                        token,
                        bbox,
                        Some(index),
                    ));
                }
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractOptions;
    use crate::model::{BoundingBox, Line, RecoverySource, Word};

    #[test]
    fn test_is_code() {
        assert!(IdentifierCodeMatcher::is_code("A1B2C3"));
        assert!(IdentifierCodeMatcher::is_code("9XK2PQ"));
        assert!(!IdentifierCodeMatcher::is_code("ABCDEF"));
        assert!(!IdentifierCodeMatcher::is_code("123456"));
        assert!(!IdentifierCodeMatcher::is_code("A1B2C"));
        assert!(!IdentifierCodeMatcher::is_code("A1B2C3D"));
        assert!(!IdentifierCodeMatcher::is_code("A1-2C3"));
    }

    #[test]
    fn test_word_boxes() {
        let code_box = BoundingBox::new(120, 5, 200, 35);
        let line = Line::from_words(vec![
            Word::new("식별번호", BoundingBox::new(0, 5, 100, 35), 90.0),
            Word::new("X7Y8Z9", code_box, 90.0),
        ])
        .unwrap();
        let doc = RecognizedDocument::from_lines("", vec![line], RecoverySource::Words);
        let options = ExtractOptions::default();
        let found = IdentifierCodeMatcher::new().find(
            &doc,
            &MatchContext::new(&options, &[]),
            &mut Diagnostics::new(),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "X7Y8Z9");
        assert_eq!(found[0].bbox, code_box);
    }

    #[test]
    fn test_code_inside_spanning_word() {
        let line_box = BoundingBox::new(0, 0, 110, 30);
        let line = Line::new(
            "A1B2C3 운전면허",
            line_box,
            vec![Word::new("A1B2C3 운전면허", line_box, 0.0)],
        );
        let doc = RecognizedDocument::from_lines("", vec![line], RecoverySource::Markup);
        let options = ExtractOptions::default();
        let found = IdentifierCodeMatcher::new().find(
            &doc,
            &MatchContext::new(&options, &[]),
            &mut Diagnostics::new(),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "A1B2C3");
        // 11 chars over 110px, code is the first 6
        assert_eq!(found[0].bbox.x0, 0);
        assert_eq!(found[0].bbox.x1, 60);
        assert!(line_box.contains(&found[0].bbox));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens(" ab  c"), vec![(1, "ab"), (5, "c")]);
        assert_eq!(tokens("운전 X7Y8Z9"), vec![(0, "운전"), (3, "X7Y8Z9")]);
        assert!(tokens("   ").is_empty());
    }
}

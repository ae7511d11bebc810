//! Passport number matcher: a nine-character token `[A-Z][0-9A-Z]{8}`.

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::model::{BoundingBox, Candidate, FieldKind, Line, RecognizedDocument};

use super::matcher::{FieldMatcher, MatchContext};
use super::span::LineText;

/// Matcher for passport numbers.
#[derive(Debug, Clone)]
pub struct PassportNumberMatcher {
    token: Regex,
    grammar: Regex,
}

impl PassportNumberMatcher {
    /// Compile the grammar.
    pub fn new() -> Self {
        Self {
            token: Regex::new(r"\S+").expect("token regex"),
            grammar: Regex::new(r"^[A-Z][0-9A-Z]{8}$").expect("passport regex"),
        }
    }

    fn word_box(line: &Line, token: &str) -> Option<BoundingBox> {
        line.words
            .iter()
            .find(|w| trim_token(&w.text) == token)
            .map(|w| w.bbox)
    }
}

impl Default for PassportNumberMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip surrounding punctuation from a token.
fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

impl FieldMatcher for PassportNumberMatcher {
    fn name(&self) -> &'static str {
        "passport number"
    }

    fn find(
        &self,
        doc: &RecognizedDocument,
        ctx: &MatchContext<'_>,
        diag: &mut Diagnostics,
    ) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (index, line) in doc.lines().iter().enumerate() {
            let text = line.text.as_str();
            for m in self.token.find_iter(text) {
                let token = trim_token(m.as_str());
                if !self.grammar.is_match(token) {
                    continue;
                }
                // An all-letter token is an ordinary word such as a name.
                if !token.chars().any(|c| c.is_ascii_digit()) {
                    diag.record(format!(
                        "passport number: discarded '{}' on line {}: no digits",
                        token, index
                    ));
                    continue;
                }

                let bbox = Self::word_box(line, token).unwrap_or_else(|| {
                    let offset = m.as_str().find(token).unwrap_or(0);
                    let start = m.start() + offset;
                    LineText::with_shrink(line, ctx.options.vertical_shrink)
                        .locate(start..start + token.len())
                });
                candidates.push(Candidate::new(
                    FieldKind::PassportNumber,
                    token,
                    bbox,
                    Some(index),
                ));
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractOptions;
    use crate::model::{RecoverySource, Word};

    fn run(lines: Vec<Line>) -> Vec<Candidate> {
        let doc = RecognizedDocument::from_lines("", lines, RecoverySource::Lines);
        let options = ExtractOptions::default();
        PassportNumberMatcher::new().find(
            &doc,
            &MatchContext::new(&options, &[]),
            &mut Diagnostics::new(),
        )
    }

    fn text_line(text: &str) -> Line {
        Line::new(text, BoundingBox::new(0, 0, 300, 30), Vec::new())
    }

    #[test]
    fn test_nine_character_token() {
        let found = run(vec![text_line("PM KOR M12345678")]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "M12345678");
    }

    #[test]
    fn test_wrong_lengths_rejected() {
        assert!(run(vec![text_line("M1234567")]).is_empty());
        assert!(run(vec![text_line("M123456789")]).is_empty());
        assert!(run(vec![text_line("m12345678")]).is_empty());
    }

    #[test]
    fn test_all_letters_rejected() {
        assert!(run(vec![text_line("PASSPORTS")]).is_empty());
    }

    #[test]
    fn test_word_box_preferred() {
        let word_box = BoundingBox::new(200, 2, 290, 28);
        let line = Line::new(
            "No. M12345678",
            BoundingBox::new(0, 0, 300, 30),
            vec![
                Word::new("No.", BoundingBox::new(0, 2, 40, 28), 90.0),
                Word::new("M12345678", word_box, 90.0),
            ],
        );
        let found = run(vec![line]);
        assert_eq!(found[0].bbox, word_box);
    }
}

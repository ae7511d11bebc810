//! The field matcher seam.

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, FieldKind, RecognizedDocument};

use super::options::ExtractOptions;

/// What a matcher may see besides the document: the options and every
/// candidate accepted by matchers that ran before it.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    /// Extraction options
    pub options: &'a ExtractOptions,
    /// Candidates accepted so far, in production order
    pub accepted: &'a [Candidate],
}

impl<'a> MatchContext<'a> {
    /// Create a context.
    pub fn new(options: &'a ExtractOptions, accepted: &'a [Candidate]) -> Self {
        Self { options, accepted }
    }

    /// Accepted candidates of one kind.
    pub fn accepted_of(&self, kind: FieldKind) -> impl Iterator<Item = &'a Candidate> {
        self.accepted.iter().filter(move |c| c.kind == kind)
    }

    /// Top edges of the source lines of accepted candidates of one kind.
    /// Falls back to the candidate box when the source line is unknown.
    pub fn source_line_tops(&self, doc: &RecognizedDocument, kind: FieldKind) -> Vec<i32> {
        self.accepted_of(kind)
            .map(|c| {
                c.source_line_index
                    .and_then(|i| doc.line(i))
                    .map_or(c.bbox.y0, |l| l.bbox.y0)
            })
            .collect()
    }

    /// Whether `top` lies within the co-location tolerance of any of `tops`.
    pub fn is_colocated(&self, top: i32, tops: &[i32]) -> bool {
        tops.iter()
            .any(|t| (t - top).abs() <= self.options.colocation_tolerance)
    }
}

/// A detector for one field grammar.
///
/// Matchers work on per-line text and carry their own line provenance so
/// their output can be pooled.
pub trait FieldMatcher: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Scan the document and return accepted candidates.
    fn find(
        &self,
        doc: &RecognizedDocument,
        ctx: &MatchContext<'_>,
        diag: &mut Diagnostics,
    ) -> Vec<Candidate>;
}

/// Whether the character before `start` in `text` is an ASCII digit.
pub(crate) fn digit_before(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit())
}

/// Whether the character at `end` in `text` is an ASCII digit.
pub(crate) fn digit_after(text: &str, end: usize) -> bool {
    text[end..].chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Number of ASCII digits in `text`.
pub(crate) fn count_digits(text: &str) -> usize {
    text.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Line, RecoverySource};

    #[test]
    fn test_digit_guards() {
        let text = "a1-23b";
        assert!(digit_before(text, 2));
        assert!(!digit_before(text, 1));
        assert!(!digit_before(text, 0));
        assert!(digit_after(text, 3));
        assert!(!digit_after(text, 5));
        assert!(!digit_after(text, 6));
        assert_eq!(count_digits(text), 3);
    }

    #[test]
    fn test_source_line_tops() {
        let lines = vec![
            Line::new("a", BoundingBox::new(0, 100, 10, 120), Vec::new()),
            Line::new("b", BoundingBox::new(0, 200, 10, 220), Vec::new()),
        ];
        let doc = RecognizedDocument::from_lines("", lines, RecoverySource::Lines);
        let accepted = vec![
            Candidate::new(FieldKind::DriverLicenseNumber, "x", BoundingBox::new(0, 205, 5, 215), Some(1)),
            Candidate::new(FieldKind::DriverLicenseNumber, "y", BoundingBox::new(0, 50, 5, 60), None),
            Candidate::new(FieldKind::PassportNumber, "z", BoundingBox::default(), Some(0)),
        ];
        let options = ExtractOptions::default();
        let ctx = MatchContext::new(&options, &accepted);

        let tops = ctx.source_line_tops(&doc, FieldKind::DriverLicenseNumber);
        assert_eq!(tops, vec![200, 50]);
        assert!(ctx.is_colocated(208, &tops));
        assert!(!ctx.is_colocated(211, &tops));
    }
}

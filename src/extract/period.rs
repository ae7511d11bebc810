//! Validity period matcher (driver licenses only).

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, FieldKind, RecognizedDocument};

use super::date::DateGrammar;
use super::matcher::{FieldMatcher, MatchContext};
use super::span::LineText;

/// Words that mark a line as carrying the renewal/validity window.
const PERIOD_KEYWORDS: &[&str] = &["적성검사", "갱신", "유효기간", "기간", "VALID", "EXPIR"];

/// Matcher for `date ~ date` periods and keyword-marked date lines.
#[derive(Debug, Clone, Default)]
pub struct ValidityPeriodMatcher {
    dates: DateGrammar,
}

impl ValidityPeriodMatcher {
    /// Create a matcher over a date grammar.
    pub fn new(dates: DateGrammar) -> Self {
        Self { dates }
    }

    fn has_keyword(text: &str) -> bool {
        let upper = text.to_uppercase();
        PERIOD_KEYWORDS.iter().any(|k| upper.contains(k))
    }
}

impl FieldMatcher for ValidityPeriodMatcher {
    fn name(&self) -> &'static str {
        "validity period"
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
            let keyword = Self::has_keyword(text);
            let period = self.dates.find_period(text);
            if period.is_none() && !keyword {
                continue;
            }

            // Restrict date validation to the period itself when one exists.
            let (scope, base) = match &period {
                Some(range) => (&text[range.clone()], range.start),
                None => (text, 0),
            };
            let dates = self.dates.find_dates(scope);
            if dates.is_empty() {
                continue;
            }
            if let Some(bad) = dates.iter().find(|d| !d.is_valid()) {
                diag.record(format!(
                    "validity period: discarded line {}: '{}' is not a calendar date",
                    index,
                    &scope[bad.range.clone()]
                ));
                continue;
            }

            let start = base + dates[0].range.start;
            let end = base + dates[dates.len() - 1].range.end;
            let located = LineText::with_shrink(line, ctx.options.vertical_shrink);
            diag.record(format!(
                "validity period: line {} via {}",
                index,
                if period.is_some() { "date range" } else { "keyword" }
            ));
            candidates.push(Candidate::new(
                FieldKind::ValidityPeriod,
                &text[start..end],
                located.locate(start..end),
                Some(index),
            ));
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractOptions;
    use crate::model::{BoundingBox, Line, RecoverySource};

    fn run(texts: &[&str]) -> (Vec<Candidate>, Diagnostics) {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let y = i as i32 * 50;
                Line::new(*t, BoundingBox::new(0, y, 400, y + 40), Vec::new())
            })
            .collect();
        let doc = RecognizedDocument::from_lines("", lines, RecoverySource::Lines);
        let options = ExtractOptions::default();
        let mut diag = Diagnostics::new();
        let found =
            ValidityPeriodMatcher::default().find(&doc, &MatchContext::new(&options, &[]), &mut diag);
        (found, diag)
    }

    #[test]
    fn test_date_range() {
        let (found, _) = run(&["홍길동", "적성검사 2021.01.01~2030.12.31"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "2021.01.01~2030.12.31");
        assert_eq!(found[0].source_line_index, Some(1));
        assert!(found[0].bbox.x0 > 0);
    }

    #[test]
    fn test_keyword_with_single_date() {
        let (found, _) = run(&["갱신기간 2030.12.31"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "2030.12.31");
    }

    #[test]
    fn test_plain_date_ignored() {
        let (found, _) = run(&["2020.01.15 서울지방경찰청장"]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_impossible_date_rejected() {
        let (found, diag) = run(&["2021.02.30~2030.12.31"]);
        assert!(found.is_empty());
        assert!(diag.entries().iter().any(|e| e.contains("not a calendar date")));
    }
}

//! Issue date and issuing authority matcher (driver licenses only).
//!
//! The issue line sits near the bottom of the card, so lines are scanned
//! bottom-up and the first qualifying line wins.

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, FieldKind, RecognizedDocument};

use super::date::DateGrammar;
use super::matcher::{FieldMatcher, MatchContext};
use super::span::LineText;

/// Matcher for the issue date line.
#[derive(Debug, Clone)]
pub struct IssueDateMatcher {
    dates: DateGrammar,
    authority: Regex,
}

impl IssueDateMatcher {
    /// Create a matcher over a date grammar.
    pub fn new(dates: DateGrammar) -> Self {
        Self {
            dates,
            authority: Regex::new(
                r"[가-힣]{2,}(?:지방경찰청장|경찰청장|경찰서장|구청장|시장|군수|도지사|청장)",
            )
            .expect("authority regex"),
        }
    }
}

impl Default for IssueDateMatcher {
    fn default() -> Self {
        Self::new(DateGrammar::new())
    }
}

impl FieldMatcher for IssueDateMatcher {
    fn name(&self) -> &'static str {
        "issue date"
    }

    fn find(
        &self,
        doc: &RecognizedDocument,
        ctx: &MatchContext<'_>,
        diag: &mut Diagnostics,
    ) -> Vec<Candidate> {
        let period_lines: Vec<usize> = ctx
            .accepted_of(FieldKind::ValidityPeriod)
            .filter_map(|c| c.source_line_index)
            .collect();
        let id_tops = ctx.source_line_tops(doc, FieldKind::NationalIdNumber);

        for (index, line) in doc.lines().iter().enumerate().rev() {
            if period_lines.contains(&index) {
                continue;
            }
            let text = line.text.as_str();
            let dates = self.dates.find_dates(text);
            if dates.len() != 1 {
                continue;
            }
            if ctx.is_colocated(line.bbox.y0, &id_tops) {
                diag.record(format!(
                    "issue date: skipped line {}: shares a row with the national id",
                    index
                ));
                continue;
            }
            let date = &dates[0];
            if !date.is_valid() {
                diag.record(format!(
                    "issue date: skipped line {}: '{}' is not a calendar date",
                    index,
                    &text[date.range.clone()]
                ));
                continue;
            }

            let source = Some(index);
            let Some(authority) = self.authority.find(text) else {
                diag.record(format!("issue date: line {} without authority", index));
                return vec![Candidate::new(
                    FieldKind::IssueDate,
                    line.visible_text(),
                    line.bbox,
                    source,
                )];
            };

            diag.record(format!(
                "issue date: line {} split into date and authority '{}'",
                index,
                authority.as_str()
            ));
            let located = LineText::with_shrink(line, ctx.options.vertical_shrink);
            return vec![
                Candidate::new(
                    FieldKind::IssueDate,
                    &text[date.range.clone()],
                    located.locate(date.range.clone()),
                    source,
                ),
                Candidate::new(
                    FieldKind::IssuingAuthority,
                    authority.as_str(),
                    located.locate(authority.range()),
                    source,
                ),
            ];
        }
        Vec::new()
    }
}

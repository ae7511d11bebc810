//! Resident registration (national ID) number matcher.
//!
//! Grammar: six birth-date digits, a one-to-three character separator run,
//! then a seven-digit tail whose first digit encodes sex and century. The
//! tail tolerates single spaces or hyphens between digits.

use std::ops::{Range, RangeInclusive};

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, FieldKind, RecognizedDocument};

use super::matcher::{count_digits, digit_after, digit_before, FieldMatcher, MatchContext};
use super::span::LineText;

/// Digits accepted as the sex/century marker.
const SEX_CENTURY_DIGITS: RangeInclusive<char> = '1'..='8';

/// Byte ranges, relative to the line text, of the logical parts of one
/// national ID match.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IdParts {
    whole: Range<usize>,
    birth: Range<usize>,
    marker: Range<usize>,
    back: Range<usize>,
}

/// Matcher for national ID numbers and their sub-fields.
#[derive(Debug, Clone)]
pub struct NationalIdMatcher {
    regex: Regex,
}

impl NationalIdMatcher {
    /// Compile the grammar.
    pub fn new() -> Self {
        Self {
            // The tail allows up to eight digits so that a separator misread
            // as a digit can be recognized and skipped.
            regex: Regex::new(r"[0-9]{6}[^0-9\p{L}\p{N}]{1,3}[0-9](?:[ \-]?[0-9]){4,6}[0-9]?")
                .expect("national id regex"),
        }
    }

    /// Whether `text` contains something shaped like an ID number,
    /// regardless of digit-count validation.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex
            .find_iter(text)
            .any(|m| !digit_before(text, m.start()) && !digit_after(text, m.end()))
    }

    fn validate(
        &self,
        text: &str,
        range: Range<usize>,
        line_index: usize,
        min_digits: usize,
        diag: &mut Diagnostics,
    ) -> Option<IdParts> {
        let matched = &text[range.clone()];
        let digits = count_digits(matched);
        if digits < min_digits {
            diag.record(format!(
                "national id: discarded '{}' on line {}: {} digits, need {}",
                matched, line_index, digits, min_digits
            ));
            return None;
        }

        let offsets: Vec<usize> = matched
            .char_indices()
            .filter(|(_, c)| c.is_ascii_digit())
            .map(|(i, _)| range.start + i)
            .collect();
        let mut tail = &offsets[6..];
        if tail.len() == 8 {
            diag.record(format!(
                "national id: tail of '{}' on line {} has 8 digits; skipped presumed separator '{}'",
                matched,
                line_index,
                &text[tail[0]..tail[0] + 1]
            ));
            tail = &tail[1..];
        }
        if tail.len() != 7 {
            diag.record(format!(
                "national id: discarded '{}' on line {}: tail has {} digits",
                matched,
                line_index,
                tail.len()
            ));
            return None;
        }

        let marker = text[tail[0]..].chars().next()?;
        if !SEX_CENTURY_DIGITS.contains(&marker) {
            diag.record(format!(
                "national id: discarded '{}' on line {}: '{}' is not a sex/century digit",
                matched, line_index, marker
            ));
            return None;
        }

        Some(IdParts {
            whole: range,
            birth: offsets[0]..offsets[5] + 1,
            marker: tail[0]..tail[0] + 1,
            back: tail[1]..tail[6] + 1,
        })
    }
}

impl Default for NationalIdMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMatcher for NationalIdMatcher {
    fn name(&self) -> &'static str {
        "national id"
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
            let located = LineText::with_shrink(line, ctx.options.vertical_shrink);

            for m in self.regex.find_iter(text) {
                if digit_before(text, m.start()) || digit_after(text, m.end()) {
                    diag.record(format!(
                        "national id: discarded '{}' on line {}: part of a longer number",
                        m.as_str(),
                        index
                    ));
                    continue;
                }
                let Some(parts) = self.validate(
                    text,
                    m.range(),
                    index,
                    ctx.options.min_national_id_digits,
                    diag,
                ) else {
                    continue;
                };

                let back_digits: String = text[parts.back.clone()]
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                let source = Some(index);
                candidates.push(Candidate::new(
                    FieldKind::NationalIdNumber,
                    m.as_str(),
                    located.locate(parts.whole.clone()),
                    source,
                ));
                candidates.push(Candidate::new(
                    FieldKind::BirthDate,
                    &text[parts.birth.clone()],
                    located.locate(parts.birth.clone()),
                    source,
                ));
                candidates.push(Candidate::new(
                    FieldKind::Gender,
                    &text[parts.marker.clone()],
                    located.locate(parts.marker.clone()),
                    source,
                ));
                candidates.push(Candidate::new(
                    FieldKind::NationalIdBackDigits,
                    back_digits,
                    located.locate(parts.back.clone()),
                    source,
                ));
            }
        }
        candidates
    }
}

//! Driver license number matcher.
//!
//! Grammar: two digits, separator, six digits, separator, two digits. Any
//! short non-digit run counts as a separator.

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, FieldKind, RecognizedDocument};

use super::matcher::{count_digits, digit_after, digit_before, FieldMatcher, MatchContext};
use super::span::LineText;

/// Matcher for driver license numbers.
#[derive(Debug, Clone)]
pub struct LicenseNumberMatcher {
    regex: Regex,
}

impl LicenseNumberMatcher {
    /// Compile the grammar. Groups are one digit short on purpose so that
    /// near-misses reach digit-count validation and get logged.
    pub fn new() -> Self {
        Self {
            regex: Regex::new(r"[0-9]{2}[^0-9]{1,3}[0-9]{5,6}[^0-9]{1,3}[0-9]{1,2}")
                .expect("license regex"),
        }
    }

    /// Whether `text` contains something shaped like a license number,
    /// regardless of digit-count validation.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex
            .find_iter(text)
            .any(|m| !digit_before(text, m.start()) && !digit_after(text, m.end()))
    }
}

impl Default for LicenseNumberMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMatcher for LicenseNumberMatcher {
    fn name(&self) -> &'static str {
        "license number"
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
            for m in self.regex.find_iter(text) {
                if digit_before(text, m.start()) || digit_after(text, m.end()) {
                    continue;
                }
                let digits = count_digits(m.as_str());
                if digits < ctx.options.min_license_digits {
                    diag.record(format!(
                        "license number: discarded '{}' on line {}: {} digits, need {}",
                        m.as_str(),
                        index,
                        digits,
                        ctx.options.min_license_digits
                    ));
                    continue;
                }
                let located = LineText::with_shrink(line, ctx.options.vertical_shrink);
                candidates.push(Candidate::new(
                    FieldKind::DriverLicenseNumber,
                    m.as_str(),
                    located.locate(m.range()),
                    Some(index),
                ));
            }
        }
        candidates
    }
}

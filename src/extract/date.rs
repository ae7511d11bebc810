//! Date grammar shared by the address, validity-period and issue-date
//! matchers.

use std::ops::Range;

use chrono::NaiveDate;
use regex::Regex;

/// `YYYY.MM.DD`-like date, also accepting `-`, `/`, spaces and Korean
/// 년/월/일 markers between the parts.
const DATE_PATTERN: &str =
    r"((?:19|20)[0-9]{2})\s*[.\-/년]\s*([0-9]{1,2})\s*[.\-/월]\s*([0-9]{1,2})(?:\s*일|\.)?";

/// [`DATE_PATTERN`] without capture groups, for embedding.
const DATE_BODY: &str =
    r"(?:19|20)[0-9]{2}\s*[.\-/년]\s*[0-9]{1,2}\s*[.\-/월]\s*[0-9]{1,2}(?:\s*일|\.)?";

/// A date found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    /// Byte range in the searched text
    pub range: Range<usize>,
    /// Calendar date, `None` when the digits do not form a real day
    pub date: Option<NaiveDate>,
}

impl DateMatch {
    /// Whether the digits form a real calendar day.
    pub fn is_valid(&self) -> bool {
        self.date.is_some()
    }
}

/// Compiled date patterns.
#[derive(Debug, Clone)]
pub struct DateGrammar {
    date: Regex,
    standalone: Regex,
    period: Regex,
}

impl DateGrammar {
    /// Compile the date patterns.
    pub fn new() -> Self {
        Self {
            date: Regex::new(DATE_PATTERN).expect("date regex"),
            standalone: Regex::new(&format!(r"^\s*{}\s*$", DATE_BODY))
                .expect("standalone date regex"),
            period: Regex::new(&format!(r"{}\s*[~∼～〜]\s*{}", DATE_BODY, DATE_BODY))
                .expect("period regex"),
        }
    }

    /// Every date in `text`, in order.
    pub fn find_dates(&self, text: &str) -> Vec<DateMatch> {
        self.date
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
                let date = match (part(1), part(2), part(3)) {
                    (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y as i32, m, d),
                    _ => None,
                };
                Some(DateMatch {
                    range: whole.range(),
                    date,
                })
            })
            .collect()
    }

    /// Whether the whole text is a single date.
    pub fn is_standalone(&self, text: &str) -> bool {
        self.standalone.is_match(text)
    }

    /// Byte range of the first `date ~ date` period in `text`.
    pub fn find_period(&self, text: &str) -> Option<Range<usize>> {
        self.period.find(text).map(|m| m.range())
    }
}

impl Default for DateGrammar {
    fn default() -> Self {
        Self::new()
    }
}

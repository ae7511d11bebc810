//! Address block matcher.
//!
//! An address starts at the first line naming a region from a closed
//! gazetteer and may continue over a few following lines. Only one address
//! is reported per document.

use crate::diagnostics::Diagnostics;
use crate::model::{BoundingBox, Candidate, FieldKind, RecognizedDocument};

use super::date::DateGrammar;
use super::license::LicenseNumberMatcher;
use super::matcher::{FieldMatcher, MatchContext};
use super::national_id::NationalIdMatcher;

/// Province and metropolitan-city names, full and short forms.
const REGION_TOKENS: &[&str] = &[
    "서울특별시",
    "부산광역시",
    "대구광역시",
    "인천광역시",
    "광주광역시",
    "대전광역시",
    "울산광역시",
    "세종특별자치시",
    "경기도",
    "강원도",
    "강원특별자치도",
    "충청북도",
    "충청남도",
    "전라북도",
    "전북특별자치도",
    "전라남도",
    "경상북도",
    "경상남도",
    "제주특별자치도",
    "서울",
    "부산",
    "대구",
    "인천",
    "광주",
    "대전",
    "울산",
    "세종",
    "경기",
    "강원",
    "충북",
    "충남",
    "전북",
    "전남",
    "경북",
    "경남",
    "제주",
];

/// Matcher for address blocks.
#[derive(Debug, Clone)]
pub struct AddressMatcher {
    national_id: NationalIdMatcher,
    license: LicenseNumberMatcher,
    dates: DateGrammar,
}

impl AddressMatcher {
    /// Create a matcher that stops absorbing lines at anything shaped like
    /// an ID number, a license number or a lone date.
    pub fn new(
        national_id: NationalIdMatcher,
        license: LicenseNumberMatcher,
        dates: DateGrammar,
    ) -> Self {
        Self {
            national_id,
            license,
            dates,
        }
    }

    /// The gazetteer token a line mentions, if any. Spaces inserted by OCR
    /// inside a token are tolerated.
    pub fn region_token(text: &str) -> Option<&'static str> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        REGION_TOKENS
            .iter()
            .copied()
            .find(|token| text.contains(token) || compact.contains(token))
    }

    fn stops_absorption(&self, text: &str) -> Option<&'static str> {
        if self.national_id.is_match(text) {
            Some("national id")
        } else if self.license.is_match(text) {
            Some("license number")
        } else if self.dates.is_standalone(text) {
            Some("date")
        } else {
            None
        }
    }
}

impl Default for AddressMatcher {
    fn default() -> Self {
        Self::new(
            NationalIdMatcher::new(),
            LicenseNumberMatcher::new(),
            DateGrammar::new(),
        )
    }
}

impl FieldMatcher for AddressMatcher {
    fn name(&self) -> &'static str {
        "address"
    }

    fn find(
        &self,
        doc: &RecognizedDocument,
        ctx: &MatchContext<'_>,
        diag: &mut Diagnostics,
    ) -> Vec<Candidate> {
        let lines = doc.lines();
        let license_tops = ctx.source_line_tops(doc, FieldKind::DriverLicenseNumber);

        for (anchor, line) in lines.iter().enumerate() {
            let Some(token) = Self::region_token(&line.text) else {
                continue;
            };
            if ctx.is_colocated(line.bbox.y0, &license_tops) {
                diag.record(format!(
                    "address: skipped anchor '{}' on line {}: shares a row with the license number",
                    token, anchor
                ));
                continue;
            }

            let mut absorbed = vec![anchor];
            let follow_end = (anchor + 1)
                .saturating_add(ctx.options.address_follow_lines)
                .min(lines.len());
            for next in anchor + 1..follow_end {
                let prev = &lines[absorbed[absorbed.len() - 1]];
                let candidate = &lines[next];
                let gap = candidate.bbox.y0 - prev.bbox.y1;
                if gap as f64 > ctx.options.address_gap_ratio * prev.bbox.height() as f64 {
                    diag.record(format!(
                        "address: stopped before line {}: vertical gap {}px",
                        next, gap
                    ));
                    break;
                }
                if let Some(reason) = self.stops_absorption(&candidate.text) {
                    diag.record(format!(
                        "address: stopped before line {}: looks like a {}",
                        next, reason
                    ));
                    break;
                }
                absorbed.push(next);
            }

            let value = absorbed
                .iter()
                .map(|&i| lines[i].visible_text())
                .collect::<Vec<_>>()
                .join(" ");
            let bbox = BoundingBox::union_all(absorbed.iter().map(|&i| &lines[i].bbox))
                .unwrap_or(line.bbox);
            diag.record(format!(
                "address: anchored at line {} on '{}', {} line(s)",
                anchor,
                token,
                absorbed.len()
            ));
            return vec![Candidate::new(FieldKind::Address, value, bbox, Some(anchor))];
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractOptions;
    use crate::model::{Line, RecoverySource};

    fn line(text: &str, y0: i32, y1: i32) -> Line {
        Line::new(text, BoundingBox::new(10, y0, 400, y1), Vec::new())
    }

    fn run(lines: Vec<Line>, accepted: &[Candidate]) -> Vec<Candidate> {
        let doc = RecognizedDocument::from_lines("", lines, RecoverySource::Lines);
        let options = ExtractOptions::default();
        AddressMatcher::default().find(
            &doc,
            &MatchContext::new(&options, accepted),
            &mut Diagnostics::new(),
        )
    }

    #[test]
    fn test_region_token() {
        assert_eq!(AddressMatcher::region_token("서울특별시 강남구"), Some("서울특별시"));
        assert_eq!(AddressMatcher::region_token("서 울 특 별 시"), Some("서울특별시"));
        assert_eq!(AddressMatcher::region_token("홍길동"), None);
    }

    #[test]
    fn test_absorbs_following_lines() {
        let found = run(
            vec![
                line("홍길동", 0, 30),
                line("서울특별시 강남구", 40, 70),
                line("테헤란로 123", 75, 105),
                line("(역삼동)", 110, 140),
                line("2015.3.2.", 145, 175),
            ],
            &[],
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "서울특별시 강남구 테헤란로 123 (역삼동)");
        assert_eq!(found[0].bbox, BoundingBox::new(10, 40, 400, 140));
        assert_eq!(found[0].source_line_index, Some(1));
    }

    #[test]
    fn test_stops_at_large_gap_and_id() {
        let found = run(
            vec![line("경기도 성남시", 0, 20), line("분당구", 100, 120)],
            &[],
        );
        assert_eq!(found[0].value, "경기도 성남시");

        let found = run(
            vec![line("경기도 성남시", 0, 20), line("810627-1234567", 25, 45)],
            &[],
        );
        assert_eq!(found[0].value, "경기도 성남시");
    }

    #[test]
    fn test_follow_limit() {
        let found = run(
            vec![
                line("부산광역시", 0, 20),
                line("a", 25, 45),
                line("b", 50, 70),
                line("c", 75, 95),
                line("d", 100, 120),
            ],
            &[],
        );
        assert_eq!(found[0].value, "부산광역시 a b c");
    }

    #[test]
    fn test_unbounded_follow_limit() {
        let doc = RecognizedDocument::from_lines(
            "",
            vec![line("부산광역시", 0, 20), line("a", 25, 45), line("b", 50, 70)],
            RecoverySource::Lines,
        );
        let options = ExtractOptions::default().with_address_limits(usize::MAX, 2.5);
        let found = AddressMatcher::default().find(
            &doc,
            &MatchContext::new(&options, &[]),
            &mut Diagnostics::new(),
        );
        assert_eq!(found[0].value, "부산광역시 a b");
    }

    #[test]
    fn test_single_address_per_document() {
        let found = run(
            vec![line("서울특별시 종로구", 0, 20), line("부산광역시 중구", 200, 220)],
            &[],
        );
        assert_eq!(found.len(), 1);
        assert!(found[0].value.starts_with("서울"));
    }

    #[test]
    fn test_anchor_on_license_row_skipped() {
        let license = Candidate::new(
            FieldKind::DriverLicenseNumber,
            "05-009337-70",
            BoundingBox::new(100, 12, 300, 40),
            Some(0),
        );
        let found = run(
            vec![line("서울 05-009337-70", 10, 40), line("대구광역시 중구", 100, 130)],
            &[license],
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].source_line_index, Some(1));
    }
}

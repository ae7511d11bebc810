//! Region synthesis: candidates become masking regions, and recognized
//! lines no candidate accounts for become `OtherText` regions.

use crate::model::{Candidate, DocumentType, Line, MaskingRegion, RecognizedDocument};

use super::RenderOptions;

/// Build the ordered region list with default options.
pub fn synthesize(
    doc: &RecognizedDocument,
    candidates: &[Candidate],
    document_type: DocumentType,
) -> Vec<MaskingRegion> {
    synthesize_with_options(doc, candidates, document_type, &RenderOptions::default())
}

/// Build the ordered region list: one region per candidate in candidate
/// order, then one `OtherText` region per unclaimed line in line order.
pub fn synthesize_with_options(
    doc: &RecognizedDocument,
    candidates: &[Candidate],
    document_type: DocumentType,
    options: &RenderOptions,
) -> Vec<MaskingRegion> {
    let mut regions: Vec<MaskingRegion> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| MaskingRegion::from_candidate(c, i))
        .collect();

    if options.include_other_text {
        for (index, line) in doc.lines().iter().enumerate() {
            if line.visible_text().is_empty() || is_claimed(line, index, candidates, options) {
                continue;
            }
            regions.push(MaskingRegion::other_text(line, index));
        }
    }

    log::debug!(
        "Synthesized {} regions ({} from candidates) for {}",
        regions.len(),
        candidates.len(),
        document_type
    );
    regions
}

/// Whether a candidate already accounts for the line: it came from the line,
/// or its box covers enough of the line.
///
/// Lines absorbed into an address after its anchor are claimed by overlap
/// alone, since the address candidate only records the anchor line.
fn is_claimed(line: &Line, index: usize, candidates: &[Candidate], options: &RenderOptions) -> bool {
    candidates.iter().any(|c| {
        c.source_line_index == Some(index)
            || line.bbox.overlap_ratio(&c.bbox) >= options.overlap_threshold
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, FieldKind, RecoverySource};

    fn doc_of(texts: &[&str]) -> RecognizedDocument {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let y = i as i32 * 50;
                Line::new(*t, BoundingBox::new(0, y, 200, y + 40), Vec::new())
            })
            .collect();
        RecognizedDocument::from_lines("", lines, RecoverySource::Lines)
    }

    #[test]
    fn test_unclaimed_lines_become_other_text() {
        let doc = doc_of(&["주민등록증", "홍길동", "810627-1234567", "서울특별시", "2015.3.2."]);
        let candidates = vec![
            Candidate::new(
                FieldKind::NationalIdNumber,
                "810627-1234567",
                BoundingBox::new(0, 106, 200, 134),
                Some(2),
            ),
            Candidate::new(
                FieldKind::Address,
                "서울특별시",
                BoundingBox::new(0, 150, 200, 190),
                Some(3),
            ),
        ];
        let regions = synthesize(&doc, &candidates, DocumentType::ResidentCard);
        let other: Vec<_> = regions
            .iter()
            .filter(|r| r.kind() == FieldKind::OtherText)
            .collect();
        assert_eq!(regions.len(), 5);
        assert_eq!(other.len(), 3);
        assert!(other.iter().all(|r| !r.selected_by_default()));
        assert_eq!(
            other.iter().map(|r| r.id()).collect::<Vec<_>>(),
            vec!["other_text-0", "other_text-1", "other_text-4"]
        );
    }

    #[test]
    fn test_overlap_suppresses_absorbed_lines() {
        let doc = doc_of(&["서울특별시 강남구", "테헤란로 123", "홍길동"]);
        let address = Candidate::new(
            FieldKind::Address,
            "서울특별시 강남구 테헤란로 123",
            BoundingBox::new(0, 0, 200, 90),
            Some(0),
        );
        let regions = synthesize(&doc, &[address], DocumentType::Unknown);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].id(), "other_text-2");
    }

    #[test]
    fn test_small_overlap_keeps_line() {
        let doc = doc_of(&["a", "b"]);
        // covers 20% of line 1 and nothing of line 0
        let candidate = Candidate::new(
            FieldKind::PassportNumber,
            "M12345678",
            BoundingBox::new(0, 50, 40, 90),
            None,
        );
        let regions = synthesize(&doc, &[candidate], DocumentType::Passport);
        assert_eq!(regions.len(), 3);
    }

    #[test]
    fn test_candidate_order_and_ids() {
        let doc = doc_of(&["810627-1234567"]);
        let candidates = vec![
            Candidate::new(FieldKind::NationalIdNumber, "810627-1234567", BoundingBox::new(0, 6, 200, 34), Some(0)),
            Candidate::new(FieldKind::BirthDate, "810627", BoundingBox::new(0, 6, 86, 34), Some(0)),
        ];
        let regions = synthesize(&doc, &candidates, DocumentType::ResidentCardInferred);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].id(), "national_id_number-0");
        assert!(regions[0].selected_by_default());
        assert_eq!(regions[1].id(), "birth_date-1");
        assert!(!regions[1].selected_by_default());
    }

    #[test]
    fn test_other_text_disabled() {
        let doc = doc_of(&["a", "b"]);
        let options = RenderOptions::new().with_other_text(false);
        let regions = synthesize_with_options(&doc, &[], DocumentType::Unknown, &options);
        assert!(regions.is_empty());
    }
}

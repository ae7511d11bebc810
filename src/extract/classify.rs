//! Document type classification.

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, DocumentType, FieldKind, RecognizedDocument};

/// Keyword sets in priority order. Keywords are compared against the
/// uppercased full text with whitespace removed.
const KEYWORDS: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::DriverLicense,
        &["운전면허", "운전", "면허", "DRIVER", "LICENSE", "LICENCE"],
    ),
    (
        DocumentType::ResidentCard,
        &["주민등록증", "주민등록", "RESIDENTREGISTRATION"],
    ),
    (DocumentType::Passport, &["여권", "PASSPORT"]),
];

/// Field kinds that imply a document type when no keyword is present.
const FALLBACKS: &[(FieldKind, DocumentType)] = &[
    (FieldKind::DriverLicenseNumber, DocumentType::DriverLicense),
    (FieldKind::PassportNumber, DocumentType::Passport),
    (FieldKind::NationalIdNumber, DocumentType::ResidentCardInferred),
];

/// Classify a document from its text, falling back to the fields found.
pub fn classify(doc: &RecognizedDocument, candidates: &[Candidate]) -> DocumentType {
    classify_with_diagnostics(doc, candidates, &mut Diagnostics::new())
}

/// [`classify`], recording which branch decided.
pub fn classify_with_diagnostics(
    doc: &RecognizedDocument,
    candidates: &[Candidate],
    diag: &mut Diagnostics,
) -> DocumentType {
    let haystack: String = doc
        .full_text()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    for (doc_type, keywords) in KEYWORDS {
        if let Some(keyword) = keywords.iter().find(|k| haystack.contains(*k)) {
            diag.record(format!("classify: {} by keyword '{}'", doc_type, keyword));
            return *doc_type;
        }
    }

    for (kind, doc_type) in FALLBACKS {
        if candidates.iter().any(|c| c.kind == *kind) {
            diag.record(format!("classify: {} inferred from {}", doc_type, kind));
            return *doc_type;
        }
    }

    diag.record("classify: no keyword or identifying field, unknown");
    DocumentType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Line, RecoverySource};

    fn doc(text: &str) -> RecognizedDocument {
        let lines = text
            .lines()
            .map(|t| Line::new(t, BoundingBox::new(0, 0, 100, 20), Vec::new()))
            .collect();
        RecognizedDocument::from_lines(text, lines, RecoverySource::Lines)
    }

    fn candidate(kind: FieldKind) -> Candidate {
        Candidate::new(kind, "x", BoundingBox::default(), Some(0))
    }

    #[test]
    fn test_keyword_wins_over_candidates() {
        let found = vec![candidate(FieldKind::PassportNumber)];
        assert_eq!(classify(&doc("자동차 운전 면허증"), &found), DocumentType::DriverLicense);
    }

    #[test]
    fn test_keyword_priority() {
        assert_eq!(classify(&doc("주민등록증\n여권"), &[]), DocumentType::ResidentCard);
        assert_eq!(classify(&doc("PASSPORT"), &[]), DocumentType::Passport);
        assert_eq!(classify(&doc("Resident Registration"), &[]), DocumentType::ResidentCard);
        assert_eq!(classify(&doc("driver's licence"), &[]), DocumentType::DriverLicense);
    }

    #[test]
    fn test_spaced_keyword() {
        assert_eq!(classify(&doc("주 민 등 록 증"), &[]), DocumentType::ResidentCard);
    }

    #[test]
    fn test_fallback_inference() {
        let plain = doc("홍길동");
        assert_eq!(
            classify(&plain, &[candidate(FieldKind::NationalIdNumber)]),
            DocumentType::ResidentCardInferred
        );
        assert_eq!(
            classify(
                &plain,
                &[candidate(FieldKind::NationalIdNumber), candidate(FieldKind::PassportNumber)]
            ),
            DocumentType::Passport
        );
        assert_eq!(
            classify(
                &plain,
                &[candidate(FieldKind::PassportNumber), candidate(FieldKind::DriverLicenseNumber)]
            ),
            DocumentType::DriverLicense
        );
        assert_eq!(classify(&plain, &[]), DocumentType::Unknown);
    }

    #[test]
    fn test_records_branch() {
        let mut diag = Diagnostics::new();
        classify_with_diagnostics(&doc("여권"), &[], &mut diag);
        assert_eq!(diag.len(), 1);
        assert!(diag.entries()[0].contains("keyword"));
    }
}

//! Field kinds, document types and matcher candidates.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// Kind of a detected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Whole resident registration number
    NationalIdNumber,
    /// Birth-date part of the resident registration number
    BirthDate,
    /// Sex/century digit of the resident registration number
    Gender,
    /// Six digits after the sex/century digit
    NationalIdBackDigits,
    /// Driver license number
    DriverLicenseNumber,
    /// Passport number
    PassportNumber,
    /// Address block
    Address,
    /// License validity (aptitude test) period
    ValidityPeriod,
    /// Issue date
    IssueDate,
    /// Issuing authority
    IssuingAuthority,
    /// Six-character identifier code on a license
    IdentifierCode,
    /// Recognized text not claimed by any matcher
    OtherText,
    /// Region drawn by the user
    ManualSelection,
}

impl FieldKind {
    /// All kinds in declaration order.
    pub const ALL: [FieldKind; 13] = [
        FieldKind::NationalIdNumber,
        FieldKind::BirthDate,
        FieldKind::Gender,
        FieldKind::NationalIdBackDigits,
        FieldKind::DriverLicenseNumber,
        FieldKind::PassportNumber,
        FieldKind::Address,
        FieldKind::ValidityPeriod,
        FieldKind::IssueDate,
        FieldKind::IssuingAuthority,
        FieldKind::IdentifierCode,
        FieldKind::OtherText,
        FieldKind::ManualSelection,
    ];

    /// Whether regions of this kind are selected for redaction by default.
    ///
    /// Only whole document numbers are; their sub-fields are not.
    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            FieldKind::NationalIdNumber | FieldKind::DriverLicenseNumber | FieldKind::PassportNumber
        )
    }

    /// Stable identifier used in region ids.
    pub fn slug(&self) -> &'static str {
        match self {
            FieldKind::NationalIdNumber => "national_id_number",
            FieldKind::BirthDate => "birth_date",
            FieldKind::Gender => "gender",
            FieldKind::NationalIdBackDigits => "national_id_back_digits",
            FieldKind::DriverLicenseNumber => "driver_license_number",
            FieldKind::PassportNumber => "passport_number",
            FieldKind::Address => "address",
            FieldKind::ValidityPeriod => "validity_period",
            FieldKind::IssueDate => "issue_date",
            FieldKind::IssuingAuthority => "issuing_authority",
            FieldKind::IdentifierCode => "identifier_code",
            FieldKind::OtherText => "other_text",
            FieldKind::ManualSelection => "manual",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::NationalIdNumber => "주민등록번호",
            FieldKind::BirthDate => "생년월일",
            FieldKind::Gender => "성별",
            FieldKind::NationalIdBackDigits => "주민번호 뒷자리",
            FieldKind::DriverLicenseNumber => "운전면허번호",
            FieldKind::PassportNumber => "여권번호",
            FieldKind::Address => "주소",
            FieldKind::ValidityPeriod => "적성검사 기간",
            FieldKind::IssueDate => "발급일",
            FieldKind::IssuingAuthority => "발급기관",
            FieldKind::IdentifierCode => "식별번호",
            FieldKind::OtherText => "기타 텍스트",
            FieldKind::ManualSelection => "수동 선택",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Inferred identity-document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Driver license, identified by keyword or license number
    DriverLicense,
    /// Resident registration card, identified by keyword
    ResidentCard,
    /// Probably a resident card: only an ID number was found
    ResidentCardInferred,
    /// Passport
    Passport,
    /// Nothing conclusive
    #[default]
    Unknown,
}

impl DocumentType {
    /// Short name for reports.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentType::DriverLicense => "driver_license",
            DocumentType::ResidentCard => "resident_card",
            DocumentType::ResidentCardInferred => "resident_card_inferred",
            DocumentType::Passport => "passport",
            DocumentType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A matcher's provisional field detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Field kind
    pub kind: FieldKind,

    /// Matched value
    pub value: String,

    /// Region to redact
    pub bbox: BoundingBox,

    /// Index of the line the match came from
    pub source_line_index: Option<usize>,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(
        kind: FieldKind,
        value: impl Into<String>,
        bbox: BoundingBox,
        source_line_index: Option<usize>,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            bbox,
            source_line_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_set() {
        let sensitive: Vec<_> = FieldKind::ALL.iter().filter(|k| k.is_sensitive()).collect();
        assert_eq!(
            sensitive,
            vec![
                &FieldKind::NationalIdNumber,
                &FieldKind::DriverLicenseNumber,
                &FieldKind::PassportNumber
            ]
        );
        assert!(!FieldKind::BirthDate.is_sensitive());
        assert!(!FieldKind::NationalIdBackDigits.is_sensitive());
    }

    #[test]
    fn test_slugs_unique() {
        let mut slugs: Vec<_> = FieldKind::ALL.iter().map(|k| k.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), FieldKind::ALL.len());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&DocumentType::ResidentCardInferred).unwrap();
        assert_eq!(json, "\"resident_card_inferred\"");
        let json = serde_json::to_string(&FieldKind::NationalIdBackDigits).unwrap();
        assert_eq!(json, "\"national_id_back_digits\"");
    }
}

//! JSON rendering of the extraction envelope.

use crate::error::{Error, Result};
use crate::model::Extraction;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an extraction to JSON.
pub fn to_json(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(extraction),
        JsonFormat::Compact => serde_json::to_string(extraction),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, Candidate, DocumentType, FieldKind, MaskingRegion, RecoverySource};

    fn sample() -> Extraction {
        let candidate = Candidate::new(
            FieldKind::PassportNumber,
            "M12345678",
            BoundingBox::new(10, 20, 110, 40),
            Some(0),
        );
        Extraction {
            document_type: DocumentType::Passport,
            regions: vec![MaskingRegion::from_candidate(&candidate, 0)],
            source: RecoverySource::Words,
            diagnostics: vec!["passport number: 1 accepted".to_string()],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"document_type\": \"passport\""));
        assert!(json.contains("\"passport_number-0\""));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["regions"][0]["kind"], "passport_number");
        assert_eq!(value["regions"][0]["selected_by_default"], true);
        assert_eq!(value["regions"][0]["bbox"]["x1"], 110);
        assert_eq!(value["source"], "words");
    }
}

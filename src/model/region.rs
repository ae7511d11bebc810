//! Masking regions and the pipeline's outbound envelope.

use super::{BoundingBox, Candidate, DocumentType, FieldKind, Line, RecoverySource};
use chrono::Utc;
use serde::Serialize;

/// A renderer-facing redaction rectangle.
///
/// Immutable once created; which regions are currently selected is tracked
/// by the consumer (see [`crate::render::SelectionSet`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskingRegion {
    id: String,
    kind: FieldKind,
    bbox: BoundingBox,
    text: String,
    selected_by_default: bool,
}

impl MaskingRegion {
    /// Promote a candidate. `index` is the candidate's position in the pooled
    /// candidate list and keeps the id deterministic.
    pub fn from_candidate(candidate: &Candidate, index: usize) -> Self {
        Self {
            id: format!("{}-{}", candidate.kind.slug(), index),
            kind: candidate.kind,
            bbox: candidate.bbox,
            text: candidate.value.clone(),
            selected_by_default: candidate.kind.is_sensitive(),
        }
    }

    /// Unclaimed recognized line, never selected by default.
    pub fn other_text(line: &Line, line_index: usize) -> Self {
        Self {
            id: format!("{}-{}", FieldKind::OtherText.slug(), line_index),
            kind: FieldKind::OtherText,
            bbox: line.bbox,
            text: line.text.trim().to_string(),
            selected_by_default: false,
        }
    }

    /// A region drawn by the user. Its id is derived from the wall clock,
    /// which is the only place region ids depend on time.
    pub fn manual(bbox: BoundingBox) -> Self {
        Self {
            id: format!(
                "{}-{}",
                FieldKind::ManualSelection.slug(),
                Utc::now().timestamp_nanos_opt().unwrap_or_default()
            ),
            kind: FieldKind::ManualSelection,
            bbox,
            text: String::new(),
            selected_by_default: true,
        }
    }

    /// Unique region id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Field kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Region box in OCR image coordinates.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Text the region covers.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the region starts out selected for redaction.
    pub fn selected_by_default(&self) -> bool {
        self.selected_by_default
    }
}

/// Result of running the pipeline on one OCR output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Inferred document type
    pub document_type: DocumentType,

    /// Sensitive fields first, then unclaimed lines
    pub regions: Vec<MaskingRegion>,

    /// How the line structure was recovered
    pub source: RecoverySource,

    /// Ordered matcher decisions, informational only
    pub diagnostics: Vec<String>,
}

impl Extraction {
    /// An extraction with no regions.
    pub fn empty() -> Self {
        Self {
            document_type: DocumentType::Unknown,
            regions: Vec::new(),
            source: RecoverySource::Empty,
            diagnostics: Vec::new(),
        }
    }

    /// Regions of the given kind.
    pub fn regions_of(&self, kind: FieldKind) -> impl Iterator<Item = &MaskingRegion> {
        self.regions.iter().filter(move |r| r.kind == kind)
    }

    /// Regions selected by default.
    pub fn default_selection(&self) -> impl Iterator<Item = &MaskingRegion> {
        self.regions.iter().filter(|r| r.selected_by_default)
    }

    /// Look up a region by id.
    pub fn region(&self, id: &str) -> Option<&MaskingRegion> {
        self.regions.iter().find(|r| r.id == id)
    }
}

impl Default for Extraction {
    fn default() -> Self {
        Self::empty()
    }
}

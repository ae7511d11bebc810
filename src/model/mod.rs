//! Data model shared by every pipeline stage.
//!
//! Everything here is created fresh per document and discarded after region
//! synthesis; no state is shared between runs.

mod bbox;
mod document;
mod field;
mod region;

pub use bbox::BoundingBox;
pub use document::{Line, RecognizedDocument, RecoverySource, Word};
pub use field::{Candidate, DocumentType, FieldKind};
pub use region::{Extraction, MaskingRegion};

//! # idmask
//!
//! Locates personally-identifiable fields in OCR output of Korean identity
//! documents and computes a redaction box for each.
//!
//! The pipeline has three stages:
//!
//! 1. [`parser`] rebuilds a line/word hierarchy with boxes from whatever the
//!    OCR engine produced (block tree, flat lines, hOCR markup, flat words or
//!    bare text).
//! 2. [`extract`] runs the field matchers, classifies the document and
//!    narrows each match to a sub-box of its line.
//! 3. [`render`] turns the matches into [`MaskingRegion`]s, adding an
//!    unselected `OtherText` region for every line nothing claimed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use idmask::{process_file, render};
//!
//! fn main() -> idmask::Result<()> {
//!     let extraction = process_file("ocr.json")?;
//!     for region in extraction.default_selection() {
//!         println!("{} {}", region.id(), region.bbox());
//!     }
//!     println!("{}", render::to_json(&extraction, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Tolerant input**: any engine JSON shape, hOCR, or plain text
//! - **Noise-tolerant grammars**: ID, license and passport numbers, address
//!   blocks, validity periods, issue dates
//! - **Sub-field boxes**: birth date, sex digit and back digits of an ID
//! - **Parallel batches**: Uses Rayon for independent documents
//! - **Async file input**: behind the `async` feature

pub mod detect;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_shape, InputShape};
pub use diagnostics::Diagnostics;
pub use error::{Error, Result};
pub use extract::{classify, interpolate, ExtractOptions, FieldExtraction, FieldExtractor};
pub use model::{
    BoundingBox, Candidate, DocumentType, Extraction, FieldKind, Line, MaskingRegion,
    RecognizedDocument, RecoverySource, Word,
};
pub use parser::{normalize, NormalizeOptions, OcrNormalizer, RawOcrOutput};
pub use render::{synthesize, JsonFormat, RenderOptions, ScaleFactor, SelectionSet};

use rayon::prelude::*;
use std::path::Path;

/// Run the full pipeline with default options.
///
/// Never fails: empty or unusable input yields an extraction with no
/// regions.
///
/// # Example
///
/// ```
/// use idmask::{process, FieldKind, RawOcrOutput};
///
/// let raw = RawOcrOutput::from_text("주민등록증\n홍길동\n810627-1234567");
/// let extraction = process(&raw);
/// assert_eq!(extraction.regions_of(FieldKind::NationalIdNumber).count(), 1);
/// ```
pub fn process(raw: &RawOcrOutput) -> Extraction {
    IdMask::new().process(raw)
}

/// Run the full pipeline with explicit options.
pub fn process_with_options(
    raw: &RawOcrOutput,
    normalize: &NormalizeOptions,
    extract: &ExtractOptions,
    render: &RenderOptions,
) -> Extraction {
    IdMask::new()
        .with_normalize_options(normalize.clone())
        .with_extract_options(extract.clone())
        .with_render_options(render.clone())
        .process(raw)
}

/// Decode engine JSON and run the pipeline.
///
/// # Example
///
/// ```
/// use idmask::process_json;
///
/// let extraction = process_json(r#"{"text": "PASSPORT M12345678"}"#).unwrap();
/// assert_eq!(extraction.document_type, idmask::DocumentType::Passport);
/// ```
pub fn process_json(json: &str) -> Result<Extraction> {
    IdMask::new().process_json(json)
}

/// Read an engine JSON file and run the pipeline.
///
/// # Example
///
/// ```no_run
/// use idmask::process_file;
///
/// let extraction = process_file("ocr.json").unwrap();
/// println!("{} regions", extraction.regions.len());
/// ```
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    IdMask::new().process_file(path)
}

/// Read an engine JSON file asynchronously and run the pipeline.
#[cfg(feature = "async")]
pub async fn process_file_async<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let json = tokio::fs::read_to_string(path).await?;
    process_json(&json)
}

/// Process independent documents in parallel. Output order matches input
/// order.
pub fn process_batch(raws: &[RawOcrOutput]) -> Vec<Extraction> {
    IdMask::new().process_batch(raws)
}

/// Builder for configuring the pipeline.
///
/// # Example
///
/// ```
/// use idmask::{ExtractOptions, IdMask, RawOcrOutput};
///
/// let pipeline = IdMask::new()
///     .with_extract_options(ExtractOptions::new().with_license_matchers(false))
///     .without_other_text()
///     .sequential();
/// let extraction = pipeline.process(&RawOcrOutput::from_text("운전면허증"));
/// assert!(extraction.regions.is_empty());
/// ```
#[derive(Debug)]
pub struct IdMask {
    normalizer: OcrNormalizer,
    extractor: FieldExtractor,
    render_options: RenderOptions,
    parallel: bool,
}

impl IdMask {
    /// Create a pipeline with default options.
    pub fn new() -> Self {
        Self {
            normalizer: OcrNormalizer::new(),
            extractor: FieldExtractor::new(),
            render_options: RenderOptions::default(),
            parallel: true,
        }
    }

    /// Set structure recovery options.
    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalizer = OcrNormalizer::with_options(options);
        self
    }

    /// Set field extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extractor = FieldExtractor::with_options(options);
        self
    }

    /// Set region synthesis options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Do not emit `OtherText` regions.
    pub fn without_other_text(mut self) -> Self {
        self.render_options = self.render_options.with_other_text(false);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Whether batches run in parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Recover the line structure only.
    pub fn normalize(&self, raw: &RawOcrOutput) -> RecognizedDocument {
        self.normalizer.normalize(raw)
    }

    /// Run the pipeline on one OCR output.
    pub fn process(&self, raw: &RawOcrOutput) -> Extraction {
        let doc = self.normalizer.normalize(raw);
        self.process_document(&doc)
    }

    /// Run extraction and synthesis on an already recovered document.
    pub fn process_document(&self, doc: &RecognizedDocument) -> Extraction {
        let mut diag = Diagnostics::new();
        diag.record(format!(
            "recovery: {} line(s) from {}",
            doc.line_count(),
            doc.source()
        ));
        if doc.source().is_synthetic() {
            diag.record("recovery: positions are synthetic, boxes are approximate");
        }

        let FieldExtraction {
            candidates,
            document_type,
        } = self.extractor.extract(doc, &mut diag);
        let regions =
            render::synthesize_with_options(doc, &candidates, document_type, &self.render_options);

        Extraction {
            document_type,
            regions,
            source: doc.source(),
            diagnostics: diag.into_entries(),
        }
    }

    /// Decode engine JSON and run the pipeline.
    pub fn process_json(&self, json: &str) -> Result<Extraction> {
        let raw = RawOcrOutput::from_json(json)?;
        Ok(self.process(&raw))
    }

    /// Read an engine JSON file and run the pipeline.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<Extraction> {
        let json = std::fs::read_to_string(path)?;
        self.process_json(&json)
    }

    /// Process independent documents, in parallel unless disabled.
    pub fn process_batch(&self, raws: &[RawOcrOutput]) -> Vec<Extraction> {
        if self.parallel {
            raws.par_iter().map(|raw| self.process(raw)).collect()
        } else {
            raws.iter().map(|raw| self.process(raw)).collect()
        }
    }
}

impl Default for IdMask {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idmask_builder() {
        let pipeline = IdMask::new()
            .with_render_options(RenderOptions::new().with_overlap_threshold(0.5))
            .sequential();
        assert!(!pipeline.is_parallel());
        assert_eq!(pipeline.render_options.overlap_threshold, 0.5);
    }

    #[test]
    fn test_idmask_builder_default() {
        let pipeline = IdMask::default();
        assert!(pipeline.is_parallel());
        assert!(pipeline.render_options.include_other_text);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_process_empty() {
        let extraction = process(&RawOcrOutput::new());
        assert_eq!(extraction.document_type, DocumentType::Unknown);
        assert!(extraction.regions.is_empty());
        assert_eq!(extraction.source, RecoverySource::Empty);
    }

    #[test]
    fn test_process_json_invalid() {
        assert!(matches!(process_json("{"), Err(Error::InvalidInput(_))));
        assert!(matches!(process_json("42"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_process_json_null_and_string() {
        assert!(process_json("null").unwrap().regions.is_empty());
        let extraction = process_json(r#""여권 M12345678""#).unwrap();
        assert_eq!(extraction.document_type, DocumentType::Passport);
        assert_eq!(extraction.source, RecoverySource::Text);
    }

    #[test]
    fn test_process_file_missing() {
        let result = process_file("/nonexistent/ocr.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    // ==================== Pipeline Tests ====================

    #[test]
    fn test_synthetic_path_flagged() {
        let extraction = process(&RawOcrOutput::from_text("홍길동"));
        assert!(extraction
            .diagnostics
            .iter()
            .any(|d| d.contains("synthetic")));
        assert_eq!(extraction.regions.len(), 1);
        assert_eq!(extraction.regions[0].kind(), FieldKind::OtherText);
    }

    #[test]
    fn test_without_other_text() {
        let extraction = IdMask::new()
            .without_other_text()
            .process(&RawOcrOutput::from_text("홍길동\n810627-1234567"));
        assert!(extraction.regions_of(FieldKind::OtherText).next().is_none());
        assert_eq!(extraction.regions.len(), 4);
    }

    #[test]
    fn test_batch_order() {
        let raws = vec![
            RawOcrOutput::from_text("여권 M12345678"),
            RawOcrOutput::from_text("운전면허"),
            RawOcrOutput::new(),
        ];
        let parallel = process_batch(&raws);
        let sequential = IdMask::new().sequential().process_batch(&raws);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0].document_type, DocumentType::Passport);
        assert_eq!(parallel[1].document_type, DocumentType::DriverLicense);
        assert_eq!(parallel[2].document_type, DocumentType::Unknown);
    }
}

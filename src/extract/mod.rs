//! Field extraction.
//!
//! Matchers run in a fixed order over the recognized document. Each sees
//! the candidates accepted before it, which is how the address matcher
//! learns where the license number sits and the issue date matcher skips
//! period and ID lines. Once the document type is known the
//! license-only matchers run on top.

mod address;
mod classify;
mod code;
mod date;
mod issue;
mod license;
mod matcher;
mod national_id;
mod options;
mod passport;
mod period;
mod span;

pub use address::AddressMatcher;
pub use classify::{classify, classify_with_diagnostics};
pub use code::IdentifierCodeMatcher;
pub use date::{DateGrammar, DateMatch};
pub use issue::IssueDateMatcher;
pub use license::LicenseNumberMatcher;
pub use matcher::{FieldMatcher, MatchContext};
pub use national_id::NationalIdMatcher;
pub use options::ExtractOptions;
pub use passport::PassportNumberMatcher;
pub use period::ValidityPeriodMatcher;
pub use span::{interpolate, interpolate_with_shrink, LineText, VERTICAL_SHRINK};

use crate::diagnostics::Diagnostics;
use crate::model::{Candidate, DocumentType, RecognizedDocument};

/// Candidates and document type for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldExtraction {
    /// Accepted candidates in production order
    pub candidates: Vec<Candidate>,

    /// Classified document type
    pub document_type: DocumentType,
}

/// Runs the field matchers and the classifier.
pub struct FieldExtractor {
    options: ExtractOptions,
    base: Vec<Box<dyn FieldMatcher>>,
    license_only: Vec<Box<dyn FieldMatcher>>,
}

impl FieldExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an extractor with the given options.
    pub fn with_options(options: ExtractOptions) -> Self {
        let national_id = NationalIdMatcher::new();
        let license = LicenseNumberMatcher::new();
        let dates = DateGrammar::new();

        let base: Vec<Box<dyn FieldMatcher>> = vec![
            Box::new(national_id.clone()),
            Box::new(license.clone()),
            Box::new(PassportNumberMatcher::new()),
            Box::new(AddressMatcher::new(national_id, license, dates.clone())),
        ];
        let license_only: Vec<Box<dyn FieldMatcher>> = vec![
            Box::new(ValidityPeriodMatcher::new(dates.clone())),
            Box::new(IssueDateMatcher::new(dates)),
            Box::new(IdentifierCodeMatcher::new()),
        ];

        Self {
            options,
            base,
            license_only,
        }
    }

    /// The options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract candidates and classify the document.
    pub fn extract(&self, doc: &RecognizedDocument, diag: &mut Diagnostics) -> FieldExtraction {
        let mut candidates = Vec::new();
        self.run(&self.base, doc, &mut candidates, diag);

        let document_type = classify_with_diagnostics(doc, &candidates, diag);
        if document_type == DocumentType::DriverLicense {
            if self.options.license_matchers {
                self.run(&self.license_only, doc, &mut candidates, diag);
            } else {
                diag.record("license-only matchers disabled");
            }
        }

        log::debug!(
            "Extracted {} candidates, document type {}",
            candidates.len(),
            document_type
        );
        FieldExtraction {
            candidates,
            document_type,
        }
    }

    fn run(
        &self,
        matchers: &[Box<dyn FieldMatcher>],
        doc: &RecognizedDocument,
        candidates: &mut Vec<Candidate>,
        diag: &mut Diagnostics,
    ) {
        for matcher in matchers {
            let found = {
                let ctx = MatchContext::new(&self.options, &candidates[..]);
                matcher.find(doc, &ctx, diag)
            };
            diag.record(format!("{}: {} accepted", matcher.name(), found.len()));
            candidates.extend(found);
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self
            .base
            .iter()
            .chain(&self.license_only)
            .map(|m| m.name())
            .collect();
        f.debug_struct("FieldExtractor")
            .field("options", &self.options)
            .field("matchers", &names)
            .finish()
    }
}

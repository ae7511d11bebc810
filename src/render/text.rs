//! Plain text report of an extraction.

use std::fmt::Write;

use crate::model::Extraction;

/// Render a human-readable report: document type, recovery source, then
/// one row per region. Selected-by-default regions are marked with `*`.
pub fn to_text(extraction: &Extraction) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "document type: {}", extraction.document_type);
    let _ = writeln!(output, "recovered from: {}", extraction.source);
    if extraction.source.is_synthetic() {
        let _ = writeln!(output, "warning: positions are synthetic");
    }
    let _ = writeln!(output, "regions: {}", extraction.regions.len());

    for region in &extraction.regions {
        let _ = writeln!(
            output,
            "{} {:<28} {:<24} {}",
            if region.selected_by_default() { "*" } else { " " },
            region.id(),
            region.bbox().to_string(),
            region.text()
        );
    }

    output.trim_end().to_string()
}

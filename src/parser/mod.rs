//! Structure recovery from raw OCR engine output.

mod cluster;
mod hocr;
mod options;
mod raw;
mod recovery;

pub use cluster::cluster_words;
pub use hocr::HocrParser;
pub use options::NormalizeOptions;
pub use raw::{RawBBox, RawBlock, RawLine, RawOcrOutput, RawParagraph, RawWord};
pub use recovery::{
    from_blocks, from_flat_lines, from_flat_words, from_markup, from_plain_text, normalize,
    normalize_with_options, OcrNormalizer, RecoveryStrategy, STRATEGIES,
};

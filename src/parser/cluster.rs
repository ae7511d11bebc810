//! Line reconstruction from a flat word list by vertical clustering.

use crate::model::{BoundingBox, Line, Word};

/// Group words into lines.
///
/// Words are visited top-to-bottom, then left-to-right. A word whose
/// vertical center is more than `tolerance` line heights away from the
/// running line's center starts a new line. Each line keeps its words in
/// visiting order.
pub fn cluster_words(mut words: Vec<Word>, tolerance: f64) -> Vec<Line> {
    words.sort_by_key(|w| (w.bbox.y0, w.bbox.x0));

    let mut lines = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut current_box: Option<BoundingBox> = None;

    for word in words {
        if let Some(line_box) = current_box {
            let deviation = (word.bbox.center_y() - line_box.center_y()).abs();
            if deviation > tolerance * line_box.height() as f64 {
                lines.extend(Line::from_words(std::mem::take(&mut current)));
                current_box = None;
            }
        }
        current_box = Some(match current_box {
            Some(b) => b.union(&word.bbox),
            None => word.bbox,
        });
        current.push(word);
    }
    lines.extend(Line::from_words(current));

    log::debug!("Clustered words into {} lines", lines.len());
    lines
}

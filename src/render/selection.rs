//! Consumer-side selection state.
//!
//! Regions never change once synthesized. Which of them the user wants
//! redacted is a per-session map keyed by region id, seeded from each
//! region's default and updated by user action.

use std::collections::HashSet;

use crate::model::{BoundingBox, Extraction, MaskingRegion};

/// Per-axis linear factor from OCR image coordinates to a render raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    /// Horizontal factor
    pub sx: f64,
    /// Vertical factor
    pub sy: f64,
}

impl ScaleFactor {
    /// No scaling.
    pub const IDENTITY: ScaleFactor = ScaleFactor { sx: 1.0, sy: 1.0 };

    /// Factor mapping a `from` raster of `(width, height)` onto `to`.
    /// Falls back to identity on an empty source raster.
    pub fn between(from: (u32, u32), to: (u32, u32)) -> Self {
        if from.0 == 0 || from.1 == 0 {
            return Self::IDENTITY;
        }
        Self {
            sx: to.0 as f64 / from.0 as f64,
            sy: to.1 as f64 / from.1 as f64,
        }
    }

    /// Apply the factor to a box.
    pub fn apply(&self, bbox: &BoundingBox) -> BoundingBox {
        bbox.scaled(self.sx, self.sy)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Regions of one document together with the ids currently selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    regions: Vec<MaskingRegion>,
    selected: HashSet<String>,
}

impl SelectionSet {
    /// Seed a selection from each region's default.
    pub fn new(regions: Vec<MaskingRegion>) -> Self {
        let selected = regions
            .iter()
            .filter(|r| r.selected_by_default())
            .map(|r| r.id().to_string())
            .collect();
        Self { regions, selected }
    }

    /// Regions in synthesis order, manual regions last.
    pub fn regions(&self) -> &[MaskingRegion] {
        &self.regions
    }

    /// Add a user-drawn region, selected, and return its id.
    pub fn add_manual(&mut self, bbox: BoundingBox) -> String {
        let mut region = MaskingRegion::manual(bbox);
        // Two regions drawn within the same clock tick would share an id.
        while self.contains(region.id()) {
            region = MaskingRegion::manual(bbox);
        }
        let id = region.id().to_string();
        self.selected.insert(id.clone());
        self.regions.push(region);
        id
    }

    /// Whether a region with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.regions.iter().any(|r| r.id() == id)
    }

    /// Whether the region is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Flip a region's selection. Returns the new state, or `None` for an
    /// unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !self.contains(id) {
            return None;
        }
        if self.selected.remove(id) {
            Some(false)
        } else {
            self.selected.insert(id.to_string());
            Some(true)
        }
    }

    /// Select a region. Returns false for an unknown id.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected.insert(id.to_string());
        true
    }

    /// Deselect a region. Returns false for an unknown id.
    pub fn deselect(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected.remove(id);
        true
    }

    /// Select every region.
    pub fn select_all(&mut self) {
        self.selected = self.regions.iter().map(|r| r.id().to_string()).collect();
    }

    /// Deselect every region.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected regions in region order.
    pub fn selected(&self) -> impl Iterator<Item = &MaskingRegion> {
        self.regions
            .iter()
            .filter(move |r| self.selected.contains(r.id()))
    }

    /// Number of selected regions.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Boxes to fill, scaled to the render raster.
    pub fn masks(&self, scale: ScaleFactor) -> Vec<BoundingBox> {
        self.selected().map(|r| scale.apply(&r.bbox())).collect()
    }
}

impl From<&Extraction> for SelectionSet {
    fn from(extraction: &Extraction) -> Self {
        Self::new(extraction.regions.clone())
    }
}

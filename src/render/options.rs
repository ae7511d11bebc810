//! Region synthesis options.

/// Options for turning candidates into masking regions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// A line is redundant when a candidate box covers at least this share
    /// of the line's own area (0.0-1.0)
    pub overlap_threshold: f64,

    /// Emit unclaimed lines as `OtherText` regions
    pub include_other_text: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlap threshold.
    pub fn with_overlap_threshold(mut self, threshold: f64) -> Self {
        if threshold.is_finite() {
            self.overlap_threshold = threshold.clamp(0.0, 1.0);
        }
        self
    }

    /// Enable or disable `OtherText` regions.
    pub fn with_other_text(mut self, include: bool) -> Self {
        self.include_other_text = include;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.3,
            include_other_text: true,
        }
    }
}

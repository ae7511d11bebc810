//! Structure recovery options.

/// Options for normalizing raw OCR output.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// A word joins the running line while its vertical center stays within
    /// this multiple of the line height
    pub line_tolerance: f64,

    /// Height of each synthesized line when only text is available
    pub synthetic_line_height: i32,

    /// Width of each synthesized word when only text is available
    pub synthetic_word_width: i32,

    /// Horizontal gap between synthesized words
    pub synthetic_word_gap: i32,

    /// Normalize recognized text to Unicode NFC
    pub normalize_unicode: bool,
}

impl NormalizeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line clustering tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f64) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the synthetic line height and word geometry.
    pub fn with_synthetic_geometry(mut self, line_height: i32, word_width: i32, gap: i32) -> Self {
        self.synthetic_line_height = line_height.max(1);
        self.synthetic_word_width = word_width.max(1);
        self.synthetic_word_gap = gap.max(0);
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            line_tolerance: 0.6,
            synthetic_line_height: 30,
            synthetic_word_width: 100,
            synthetic_word_gap: 10,
            normalize_unicode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_options_builder() {
        let options = NormalizeOptions::new()
            .with_line_tolerance(0.8)
            .with_synthetic_geometry(0, 50, -3)
            .with_unicode_normalization(false);

        assert_eq!(options.line_tolerance, 0.8);
        assert_eq!(options.synthetic_line_height, 1);
        assert_eq!(options.synthetic_word_width, 50);
        assert_eq!(options.synthetic_word_gap, 0);
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_default_options() {
        let options = NormalizeOptions::default();
        assert_eq!(options.line_tolerance, 0.6);
        assert!(options.normalize_unicode);
    }
}

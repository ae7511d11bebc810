//! Field extraction options.

use super::span::VERTICAL_SHRINK;

/// Options for the field matchers.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Minimum digit count for a national ID number match
    pub min_national_id_digits: usize,

    /// Minimum digit count for a driver license number match
    pub min_license_digits: usize,

    /// Maximum number of lines absorbed after an address anchor
    pub address_follow_lines: usize,

    /// Largest vertical gap, in multiples of the previous line's height,
    /// an absorbed address line may have
    pub address_gap_ratio: f64,

    /// Two lines whose tops differ by at most this many pixels are
    /// considered co-located
    pub colocation_tolerance: i32,

    /// Vertical shrink ratio applied to interpolated sub-boxes
    pub vertical_shrink: f64,

    /// Run the license-only matchers (validity period, issue date,
    /// identifier code) when the document is a driver license
    pub license_matchers: bool,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum national ID digit count.
    pub fn with_min_national_id_digits(mut self, digits: usize) -> Self {
        self.min_national_id_digits = digits;
        self
    }

    /// Set the minimum license digit count.
    pub fn with_min_license_digits(mut self, digits: usize) -> Self {
        self.min_license_digits = digits;
        self
    }

    /// Set address absorption limits.
    pub fn with_address_limits(mut self, follow_lines: usize, gap_ratio: f64) -> Self {
        self.address_follow_lines = follow_lines;
        self.address_gap_ratio = gap_ratio;
        self
    }

    /// Set the co-location tolerance in pixels.
    pub fn with_colocation_tolerance(mut self, pixels: i32) -> Self {
        self.colocation_tolerance = pixels.max(0);
        self
    }

    /// Set the vertical shrink ratio.
    pub fn with_vertical_shrink(mut self, ratio: f64) -> Self {
        self.vertical_shrink = ratio;
        self
    }

    /// Enable or disable the license-only matchers.
    pub fn with_license_matchers(mut self, enabled: bool) -> Self {
        self.license_matchers = enabled;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_national_id_digits: 13,
            min_license_digits: 10,
            address_follow_lines: 3,
            address_gap_ratio: 2.5,
            colocation_tolerance: 10,
            vertical_shrink: VERTICAL_SHRINK,
            license_matchers: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_min_national_id_digits(12)
            .with_address_limits(2, 1.5)
            .with_colocation_tolerance(-4)
            .with_license_matchers(false);

        assert_eq!(options.min_national_id_digits, 12);
        assert_eq!(options.address_follow_lines, 2);
        assert_eq!(options.address_gap_ratio, 1.5);
        assert_eq!(options.colocation_tolerance, 0);
        assert!(!options.license_matchers);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.min_national_id_digits, 13);
        assert_eq!(options.min_license_digits, 10);
        assert_eq!(options.vertical_shrink, 0.15);
    }
}

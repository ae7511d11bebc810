//! Ordered, human-readable record of pipeline decisions.
//!
//! Purely observational: nothing reads these entries to make a decision.
//! Each entry is also forwarded to the `log` facade at debug level.

/// Collector for diagnostic lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<String>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one decision.
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{}", message);
        self.entries.push(message);
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the collector, returning its entries.
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order() {
        let mut diag = Diagnostics::new();
        diag.record("first");
        diag.record(format!("second {}", 2));

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.entries()[1], "second 2");
        assert_eq!(diag.into_entries(), vec!["first", "second 2"]);
    }
}

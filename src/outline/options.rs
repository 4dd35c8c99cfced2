//! Outline extraction options.

/// Options controlling outline extraction.
///
/// # Example
///
/// ```
/// use pdfsift::OutlineOptions;
///
/// let options = OutlineOptions::new()
///     .with_min_heading_len(5)
///     .with_table_exclusion(false);
/// ```
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Minimum trimmed length for a span or candidate to be considered
    pub min_heading_len: usize,
    /// Whether blocks inside detected table regions are excluded
    pub exclude_tables: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            min_heading_len: 3,
            exclude_tables: true,
        }
    }
}

impl OutlineOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum heading candidate length.
    pub fn with_min_heading_len(mut self, len: usize) -> Self {
        self.min_heading_len = len;
        self
    }

    /// Enable or disable table-region exclusion.
    pub fn with_table_exclusion(mut self, enabled: bool) -> Self {
        self.exclude_tables = enabled;
        self
    }
}

//! Row parser configuration.

/// Options controlling how a [`RowParser`](crate::RowParser) reads a sheet.
///
/// The defaults give the standard behavior: header text is normalized,
/// hidden rows are skipped and rows without data are not emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Pre-register [`clean_column_titles`](crate::titles::clean_column_titles)
    pub clean_titles: bool,

    /// Skip rows marked hidden in the worksheet
    pub skip_hidden_rows: bool,

    /// Do not fire the row data chain for rows whose values are all falsy
    pub skip_blank_rows: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            clean_titles: true,
            skip_hidden_rows: true,
            skip_blank_rows: true,
        }
    }
}

impl ReaderOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the default header normalization callback.
    pub fn with_clean_titles(mut self, enabled: bool) -> Self {
        self.clean_titles = enabled;
        self
    }

    /// Enable or disable skipping hidden rows.
    pub fn with_skip_hidden_rows(mut self, enabled: bool) -> Self {
        self.skip_hidden_rows = enabled;
        self
    }

    /// Enable or disable skipping blank rows.
    pub fn with_skip_blank_rows(mut self, enabled: bool) -> Self {
        self.skip_blank_rows = enabled;
        self
    }
}

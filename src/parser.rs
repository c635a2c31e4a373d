//! Streaming row parser.

use crate::callbacks::{CallbackRegistry, Event};
use crate::error::Result;
use crate::options::ReaderOptions;
use crate::record::RowRecord;
use crate::titles::clean_column_titles;
use crate::workbook::{CellValue, Workbook};
use std::io::{Read, Seek};
use std::path::Path;
use tracing::{debug, trace};

/// Reads a worksheet row by row and hands each data row to callbacks.
///
/// The first visible row of a sheet is the header: its text goes through the
/// column titles chain, and the returned identifiers key every later row.
/// Each later row becomes a [`RowRecord`] passed to the row data chain.
///
/// Column titles are resolved once per parser. Parsing a second sheet with
/// the same parser reuses the first sheet's titles unless
/// [`reset_column_titles`](Self::reset_column_titles) is called in between.
///
/// # Example
///
/// ```no_run
/// use sheetrows::RowParser;
///
/// let mut names = Vec::new();
/// let mut parser = RowParser::open("people.xlsx")?;
/// parser.on_row_data(|record, _row| {
///     if let Some(name) = record.get("name") {
///         names.push(name.to_string());
///     }
///     record
/// });
/// parser.parse(0)?;
/// drop(parser);
/// println!("{names:?}");
/// # Ok::<(), sheetrows::Error>(())
/// ```
pub struct RowParser<'a> {
    workbook: Workbook,
    options: ReaderOptions,
    callbacks: CallbackRegistry<'a>,
    column_titles: Option<Vec<String>>,
    rows_emitted: usize,
}

impl<'a> RowParser<'a> {
    /// Open a workbook file with default options.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    /// Open a workbook file.
    pub fn open_with_options(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let workbook = Workbook::open(path)?;
        Ok(Self::from_workbook_with_options(workbook, options))
    }

    /// Create a parser from the bytes of a workbook.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let workbook = Workbook::from_bytes(data)?;
        Ok(Self::from_workbook(workbook))
    }

    /// Create a parser from a seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let workbook = Workbook::from_reader(reader)?;
        Ok(Self::from_workbook(workbook))
    }

    /// Wrap an already opened workbook.
    pub fn from_workbook(workbook: Workbook) -> Self {
        Self::from_workbook_with_options(workbook, ReaderOptions::default())
    }

    /// Wrap an already opened workbook with explicit options.
    pub fn from_workbook_with_options(workbook: Workbook, options: ReaderOptions) -> Self {
        let mut callbacks = CallbackRegistry::new();
        if options.clean_titles {
            callbacks.on_column_titles(clean_column_titles);
        }
        Self {
            workbook,
            options,
            callbacks,
            column_titles: None,
            rows_emitted: 0,
        }
    }

    /// Append a step to the column titles chain.
    ///
    /// The callback receives the header text (or the previous step's
    /// output) and the header's row number.
    pub fn on_column_titles<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(Vec<String>, u32) -> Vec<String> + 'a,
    {
        self.callbacks.on_column_titles(callback);
        self
    }

    /// Append a consumer to the row data chain.
    ///
    /// The returned record is passed to the next consumer; the last
    /// consumer's return value is discarded.
    pub fn on_row_data<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(RowRecord, u32) -> RowRecord + 'a,
    {
        self.callbacks.on_row_data(callback);
        self
    }

    /// Parse the sheet at the zero-based `sheet_index`.
    ///
    /// Rows are visited from 1 to the highest populated row. Output only
    /// happens through the row data callbacks.
    ///
    /// A header and a data row of different widths are paired up to the
    /// shorter of the two; surplus cells or titles are dropped.
    pub fn parse(&mut self, sheet_index: usize) -> Result<()> {
        let sheet = self.workbook.sheet(sheet_index)?;
        let last_column = sheet.highest_column();
        let last_row = sheet.highest_row();
        debug!(
            sheet = sheet.name(),
            last_row, last_column, "parsing sheet"
        );

        let (mut emitted, mut hidden, mut blank) = (0usize, 0usize, 0usize);
        self.rows_emitted = 0;

        for row in sheet.row_indices() {
            if row > last_row {
                break;
            }
            if self.options.skip_hidden_rows && !sheet.is_row_visible(row) {
                trace!(row, "skipping hidden row");
                hidden += 1;
                continue;
            }

            let values = sheet.row_values(row, last_column);

            if self.column_titles.is_none() {
                let raw = values.iter().map(CellValue::to_title_text).collect();
                // Without any title callback the set stays empty and every
                // later record is empty, hence blank.
                let titles = self
                    .callbacks
                    .fire_column_titles(raw, row)
                    .unwrap_or_default();
                debug!(row, ?titles, "resolved column titles");
                self.column_titles = Some(titles);
                continue;
            }

            let titles = self.column_titles.as_deref().unwrap_or_default();
            if titles.len() != values.len() {
                debug!(
                    row,
                    titles = titles.len(),
                    cells = values.len(),
                    "row width differs from header, pairing truncated"
                );
            }

            let record = RowRecord::from_pairs(titles, values);
            if self.options.skip_blank_rows && record.is_blank() {
                blank += 1;
                continue;
            }

            if self.callbacks.fire_row_data(record, row).is_some() {
                emitted += 1;
            }
        }

        self.rows_emitted = emitted;
        debug!(
            sheet = sheet.name(),
            emitted, hidden, blank, "finished sheet"
        );
        Ok(())
    }

    /// Column identifiers resolved so far, if a header has been read.
    pub fn column_titles(&self) -> Option<&[String]> {
        self.column_titles.as_deref()
    }

    /// Rows handed to the row data chain by the most recent `parse`.
    ///
    /// Rows are not counted while no row data callback is registered.
    pub fn rows_emitted(&self) -> usize {
        self.rows_emitted
    }

    /// Forget the resolved titles so the next parse reads a new header.
    pub fn reset_column_titles(&mut self) {
        self.column_titles = None;
    }

    /// Number of callbacks registered for `event`.
    pub fn callback_count(&self, event: Event) -> usize {
        self.callbacks.callback_count(event)
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Get a reference to the opened workbook.
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.workbook.sheet_count()
    }

    /// Get sheet names.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.sheet_names()
    }
}

impl std::fmt::Debug for RowParser<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowParser")
            .field("workbook", &self.workbook)
            .field("options", &self.options)
            .field("callbacks", &self.callbacks)
            .field("column_titles", &self.column_titles)
            .field("rows_emitted", &self.rows_emitted)
            .finish()
    }
}

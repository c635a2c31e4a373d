//! # sheetrows
//!
//! Row-oriented streaming ingestion of XLSX worksheets.
//!
//! A [`RowParser`] reads one sheet top to bottom. The first visible row is
//! the header: its text is turned into column identifiers by a chain of
//! "column titles" callbacks. Every later row becomes a [`RowRecord`]
//! (identifier to [`CellValue`]) handed to a chain of "row data" callbacks.
//! Hidden rows and rows without data are skipped.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetrows::RowParser;
//!
//! let mut parser = RowParser::open("inventory.xlsx")?;
//! parser.on_row_data(|record, row| {
//!     println!("row {}: {:?}", row, record.get("sku"));
//!     record
//! });
//! parser.parse(0)?;
//! # Ok::<(), sheetrows::Error>(())
//! ```
//!
//! ## Custom Column Titles
//!
//! Header text is normalized by [`titles::clean_column_titles`] unless
//! disabled in [`ReaderOptions`]. Further steps run after it, in
//! registration order:
//!
//! ```no_run
//! use sheetrows::{ReaderOptions, RowParser};
//!
//! let mut parser = RowParser::open("inventory.xlsx")?;
//! parser.on_column_titles(|titles, _row| {
//!     titles.into_iter().map(|t| t.replace(' ', "_")).collect()
//! });
//!
//! let plain = RowParser::open_with_options(
//!     "inventory.xlsx",
//!     ReaderOptions::default().with_clean_titles(false),
//! )?;
//! # Ok::<(), sheetrows::Error>(())
//! ```

pub mod callbacks;
pub mod container;
pub mod detect;
pub mod error;
pub mod options;
pub mod parser;
pub mod record;
pub mod titles;
pub mod upload;
pub mod workbook;

// Re-exports
pub use callbacks::{CallbackChain, CallbackRegistry, Event};
pub use error::{Error, Result};
pub use options::ReaderOptions;
pub use parser::RowParser;
pub use record::RowRecord;
pub use titles::{clean_column_titles, normalize_title};
pub use upload::UploadedFile;
pub use workbook::{column_label, CellValue, Sheet, Workbook};

use std::path::Path;

/// Parse one sheet of a workbook file, collecting every data row.
///
/// Convenience for small files; use [`RowParser`] to stream large ones.
///
/// # Example
///
/// ```no_run
/// let rows = sheetrows::read_rows("people.xlsx", 0)?;
/// println!("{} rows", rows.len());
/// # Ok::<(), sheetrows::Error>(())
/// ```
pub fn read_rows(path: impl AsRef<Path>, sheet_index: usize) -> Result<Vec<RowRecord>> {
    let mut rows = Vec::new();
    let mut parser = RowParser::open(path)?;
    parser.on_row_data(|record, _| {
        rows.push(record.clone());
        record
    });
    parser.parse(sheet_index)?;
    drop(parser);
    Ok(rows)
}

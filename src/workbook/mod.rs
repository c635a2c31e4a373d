//! Read-only XLSX decoding.
//!
//! This module exposes just enough of a workbook for row ingestion: the
//! sheet list, cell values, populated bounds and row visibility.
//!
//! # Example
//!
//! ```no_run
//! use sheetrows::workbook::Workbook;
//!
//! let workbook = Workbook::open("data.xlsx")?;
//! let sheet = workbook.sheet(0)?;
//! for row in sheet.row_indices() {
//!     if sheet.is_row_visible(row) {
//!         println!("{:?}", sheet.row_values(row, sheet.highest_column()));
//!     }
//! }
//! # Ok::<(), sheetrows::Error>(())
//! ```

mod cell;
mod reader;
mod shared_strings;
mod sheet;

pub use cell::{column_index, column_label, parse_cell_ref, CellValue, MAX_COLUMNS, MAX_ROWS};
pub use reader::Workbook;
pub use shared_strings::SharedStrings;
pub use sheet::Sheet;

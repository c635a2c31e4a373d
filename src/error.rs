//! Error types for the sheetrows library.

use std::io;
use thiserror::Error;

/// Result type alias for sheetrows operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening or reading a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a recognizable spreadsheet.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required workbook part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The requested worksheet does not exist.
    #[error("Sheet not found: index {index} (workbook has {count} sheets)")]
    SheetNotFound {
        /// Zero-based index that was requested
        index: usize,
        /// Number of sheets in the workbook
        count: usize,
    },
}

impl Error {
    /// Whether this error means the workbook source could not be opened.
    ///
    /// Everything except [`Error::SheetNotFound`] is raised while opening.
    pub fn is_open_error(&self) -> bool {
        !matches!(self, Error::SheetNotFound { .. })
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

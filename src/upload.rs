//! Adapter for workbooks received through a file upload.

use crate::error::Result;
use crate::parser::RowParser;
use std::path::{Path, PathBuf};

/// A file received by an upload handler.
///
/// `validated` records whether the web layer confirmed the file really
/// arrived through an upload; unvalidated files are never opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub path: PathBuf,
    pub validated: bool,
}

impl UploadedFile {
    /// Describe an uploaded file that has not been validated.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            validated: false,
        }
    }

    /// Mark the file as validated.
    pub fn validated(mut self) -> Self {
        self.validated = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowParser<'_> {
    /// Create a parser for an uploaded workbook.
    ///
    /// Returns `Ok(None)` when nothing was uploaded or the upload was not
    /// validated. Errors opening a validated upload are returned.
    pub fn from_upload(upload: Option<&UploadedFile>) -> Result<Option<Self>> {
        match upload {
            Some(file) if file.validated => Self::open(&file.path).map(Some),
            Some(file) => {
                tracing::warn!(path = %file.path.display(), "ignoring unvalidated upload");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

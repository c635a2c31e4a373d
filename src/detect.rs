//! Format sniffing for workbook sources.

use crate::container::PackageContainer;
use crate::error::{Error, Result};

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// OLE compound file magic, used by legacy `.xls` workbooks.
const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Content type for the XLSX workbook part.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Macro-enabled workbooks share the worksheet layout.
const XLSM_CONTENT_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.main+xml";

/// Content types of other OOXML documents that are not workbooks.
const OTHER_OOXML: [(&str, &str); 2] = [
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        "Word document",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
        "PowerPoint presentation",
    ),
];

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.starts_with(&ZIP_MAGIC)
}

/// Check if data is an OLE compound file (legacy `.xls`).
pub fn is_compound_file(data: &[u8]) -> bool {
    data.starts_with(&CFB_MAGIC)
}

/// Reject byte sources that cannot be an XLSX package before unzipping them.
pub fn check_workbook_bytes(data: &[u8]) -> Result<()> {
    if is_compound_file(data) {
        return Err(Error::UnsupportedFormat(
            "legacy .xls (BIFF) workbook".to_string(),
        ));
    }
    if !is_zip_file(data) {
        return Err(Error::UnknownFormat);
    }
    Ok(())
}

/// Verify that an opened package holds a spreadsheet.
///
/// `[Content_Types].xml` is authoritative; packages without it fall back to
/// the presence of `xl/workbook.xml`.
pub fn check_workbook_package(container: &PackageContainer) -> Result<()> {
    let content_types = match container.read_xml("[Content_Types].xml") {
        Ok(xml) => xml,
        Err(_) if container.exists("xl/workbook.xml") => return Ok(()),
        Err(_) => {
            return Err(Error::MissingComponent("[Content_Types].xml".to_string()));
        }
    };

    if content_types.contains(XLSX_CONTENT_TYPE) || content_types.contains(XLSM_CONTENT_TYPE) {
        return Ok(());
    }
    if let Some((_, name)) = OTHER_OOXML
        .iter()
        .find(|(content_type, _)| content_types.contains(content_type))
    {
        return Err(Error::UnsupportedFormat(name.to_string()));
    }
    if container.exists("xl/workbook.xml") {
        return Ok(());
    }

    Err(Error::UnknownFormat)
}

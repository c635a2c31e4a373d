//! ZIP container abstraction for the parts of an XLSX package.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

/// Rewrite a UTF-16 encoding declaration after the content was decoded.
///
/// quick-xml trusts the declaration, so a string that is already UTF-8 must
/// not keep claiming to be UTF-16.
fn fix_xml_encoding_declaration(content: String) -> String {
    if !content.starts_with("<?xml") {
        return content;
    }
    let Some(end_decl) = content.find("?>") else {
        return content;
    };

    let (decl, rest) = content.split_at(end_decl + 2);
    let fixed = ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"]
        .iter()
        .fold(decl.to_string(), |d, enc| {
            d.replace(&format!("encoding={}", enc), "encoding=\"UTF-8\"")
        });

    format!("{}{}", fixed, rest)
}

/// Decode UTF-16 bytes with the given byte order.
fn decode_utf16(bytes: &[u8], little_endian: bool) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| {
        if little_endian {
            u16::from_le_bytes([pair[0], pair[1]])
        } else {
            u16::from_be_bytes([pair[0], pair[1]])
        }
    });

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Decode XML bytes handling UTF-8 and UTF-16 (LE/BE), with or without BOM.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        return String::from_utf8(rest.to_vec())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)));
    }
    if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        return decode_utf16(rest, true).map(fix_xml_encoding_declaration);
    }
    if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        return decode_utf16(rest, false).map(fix_xml_encoding_declaration);
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        // No BOM: ASCII markup in UTF-16 leaves a zero in every other byte
        Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
            decode_utf16(bytes, true).map(fix_xml_encoding_declaration)
        }
        Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
            decode_utf16(bytes, false).map(fix_xml_encoding_declaration)
        }
        Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Read-only view of the ZIP archive behind a workbook.
pub struct PackageContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl PackageContainer {
    /// Create a container from the raw bytes of a ZIP archive.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part from the archive as a string.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.archive.borrow().file_names().any(|n| n == path)
    }

    /// List all part names in the archive.
    pub fn list_files(&self) -> Vec<String> {
        self.archive.borrow().file_names().map(String::from).collect()
    }

    /// Resolve a relationship target against the part that references it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut result: PathBuf = Path::new(base)
            .parent()
            .unwrap_or(Path::new(""))
            .to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                Component::ParentDir => {
                    result.pop();
                }
                Component::Normal(c) => result.push(c),
                _ => {}
            }
        }

        result.to_string_lossy().replace('\\', "/")
    }
}

impl std::fmt::Debug for PackageContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}

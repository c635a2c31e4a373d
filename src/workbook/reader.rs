//! Workbook-level decoding: sheet list and part resolution.

use crate::container::PackageContainer;
use crate::detect;
use crate::error::{Error, Result};
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use super::shared_strings::SharedStrings;
use super::sheet::Sheet;

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// An opened XLSX workbook.
///
/// Worksheets are decoded on demand by [`Workbook::sheet`].
#[derive(Debug)]
pub struct Workbook {
    container: PackageContainer,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
    relationships: HashMap<String, String>,
}

impl Workbook {
    /// Open an XLSX file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open a workbook from any seekable reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a workbook from its raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        detect::check_workbook_bytes(&data)?;
        let container = PackageContainer::from_bytes(data)?;
        detect::check_workbook_package(&container)?;
        Self::from_container(container)
    }

    fn from_container(container: PackageContainer) -> Result<Self> {
        let shared_strings = if container.exists("xl/sharedStrings.xml") {
            SharedStrings::parse(&container.read_xml("xl/sharedStrings.xml")?)?
        } else {
            SharedStrings::default()
        };

        let relationships = Self::parse_workbook_rels(&container)?;
        let sheets = Self::parse_workbook(&container)?;

        Ok(Self {
            container,
            shared_strings,
            sheets,
            relationships,
        })
    }

    /// Parse workbook relationships: id -> target part.
    fn parse_workbook_rels(container: &PackageContainer) -> Result<HashMap<String, String>> {
        let mut rels = HashMap::new();

        let Ok(xml) = container.read_xml("xl/_rels/workbook.xml.rels") else {
            return Ok(rels);
        };
        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).into_owned(),
                            b"Target" => {
                                target = String::from_utf8_lossy(&attr.value).into_owned()
                            }
                            _ => {}
                        }
                    }

                    if !id.is_empty() && !target.is_empty() {
                        rels.insert(id, target);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Parse workbook.xml for the ordered sheet list.
    fn parse_workbook(container: &PackageContainer) -> Result<Vec<SheetInfo>> {
        let xml = container.read_xml("xl/workbook.xml")?;
        let mut reader = quick_xml::Reader::from_str(&xml);
        reader.config_mut().trim_text(true);

        let mut sheets = Vec::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                    let mut name = String::new();
                    let mut rel_id = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr
                                    .unescape_value()
                                    .map(|v| v.into_owned())
                                    .unwrap_or_else(|_| {
                                        String::from_utf8_lossy(&attr.value).into_owned()
                                    });
                            }
                            b"r:id" => {
                                rel_id = String::from_utf8_lossy(&attr.value).into_owned()
                            }
                            _ => {}
                        }
                    }

                    if !name.is_empty() {
                        sheets.push(SheetInfo { name, rel_id });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Part path of the worksheet at `index`.
    fn sheet_path(&self, index: usize, info: &SheetInfo) -> String {
        match self.relationships.get(&info.rel_id) {
            Some(target) => PackageContainer::resolve_path("xl/workbook.xml", target),
            // Producers that omit relationships use the conventional part names
            None => format!("xl/worksheets/sheet{}.xml", index + 1),
        }
    }

    /// Decode the worksheet at the zero-based `index`.
    pub fn sheet(&self, index: usize) -> Result<Sheet> {
        let info = self.sheets.get(index).ok_or(Error::SheetNotFound {
            index,
            count: self.sheets.len(),
        })?;
        let path = self.sheet_path(index, info);
        let xml = self.container.read_xml(&path)?;
        Sheet::parse(info.name.clone(), &xml, &self.shared_strings)
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Get a reference to the underlying package.
    pub fn container(&self) -> &PackageContainer {
        &self.container
    }
}

//! Worksheet grid decoding.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use super::cell::{parse_cell_ref, CellValue, MAX_COLUMNS, MAX_ROWS};
use super::shared_strings::SharedStrings;

/// One decoded `<row>` element.
#[derive(Debug, Clone, Default)]
struct SheetRow {
    hidden: bool,
    cells: BTreeMap<u32, CellValue>,
}

/// A decoded worksheet: cell values plus row visibility.
///
/// Bounds are computed from cells that carry a value; the `<dimension>`
/// element is only a hint written by the producing application and is
/// ignored. Cells outside the addressable grid are dropped, so the bounds
/// never exceed `XFD1048576`.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, SheetRow>,
    highest_column: u32,
    highest_row: u32,
}

/// Attribute value as an owned string.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

fn is_true(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

impl Sheet {
    /// Decode worksheet XML, resolving shared strings.
    pub fn parse(name: impl Into<String>, xml: &str, shared: &SharedStrings) -> Result<Self> {
        let mut sheet = Sheet {
            name: name.into(),
            ..Default::default()
        };
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut row_index = 0u32;
        let mut column = 0u32;
        let mut cell_type: Option<String> = None;
        let mut value = String::new();
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline = false;
        let mut in_phonetic = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        row_index = sheet.open_row(e, row_index);
                        column = 0;
                    }
                    b"c" => {
                        column = Self::cell_column(e, column);
                        cell_type = attr_value(e, b"t");
                        value.clear();
                        in_cell = true;
                    }
                    b"v" if in_cell => in_value = true,
                    b"is" if in_cell => in_inline = true,
                    b"rPh" => in_phonetic = true,
                    b"t" if in_inline && !in_phonetic => in_value = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"row" => {
                        row_index = sheet.open_row(e, row_index);
                        column = 0;
                    }
                    b"c" => column = Self::cell_column(e, column),
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_value => {
                    let text = e.unescape().map_err(|e| Error::XmlParse(e.to_string()))?;
                    value.push_str(&text);
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"c" => {
                        let cell = Self::resolve_value(&value, cell_type.as_deref(), shared);
                        sheet.set_cell(row_index, column, cell);
                        in_cell = false;
                    }
                    b"v" | b"t" => in_value = false,
                    b"is" => in_inline = false,
                    b"rPh" => in_phonetic = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// Register a `<row>` element and return its 1-based index.
    ///
    /// Rows without a usable `r` attribute follow the previous row.
    fn open_row(&mut self, e: &BytesStart<'_>, previous: u32) -> u32 {
        let index = attr_value(e, b"r")
            .and_then(|r| r.parse().ok())
            .filter(|r| (1..=MAX_ROWS).contains(r))
            .unwrap_or(previous.saturating_add(1));
        if index <= MAX_ROWS {
            let hidden = attr_value(e, b"hidden").is_some_and(|h| is_true(&h));
            self.rows.entry(index).or_default().hidden |= hidden;
        }
        index
    }

    /// 1-based column of a `<c>` element; cells without `r` follow the previous one.
    fn cell_column(e: &BytesStart<'_>, previous: u32) -> u32 {
        attr_value(e, b"r")
            .and_then(|r| parse_cell_ref(&r))
            .map(|(column, _)| column)
            .unwrap_or(previous.saturating_add(1))
    }

    /// Resolve the raw `<v>` text of a cell based on its type.
    fn resolve_value(raw: &str, cell_type: Option<&str>, shared: &SharedStrings) -> CellValue {
        match cell_type {
            Some("s") => raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|idx| shared.get(idx))
                .map(|s| CellValue::String(s.to_string()))
                .unwrap_or(CellValue::Empty),
            Some("b") => CellValue::Bool(is_true(raw.trim())),
            Some("e") => CellValue::Error(raw.to_string()),
            Some("str") | Some("inlineStr") => CellValue::String(raw.to_string()),
            _ if raw.is_empty() => CellValue::Empty,
            _ => match raw.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(raw.to_string()),
            },
        }
    }

    fn set_cell(&mut self, row: u32, column: u32, value: CellValue) {
        if !(1..=MAX_ROWS).contains(&row) || !(1..=MAX_COLUMNS).contains(&column) {
            return;
        }
        if !value.is_empty() {
            self.highest_row = self.highest_row.max(row);
            self.highest_column = self.highest_column.max(column);
        }
        self.rows.entry(row).or_default().cells.insert(column, value);
    }

    /// Sheet name as shown on its tab.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest 1-based column holding a value (0 for an empty sheet).
    pub fn highest_column(&self) -> u32 {
        self.highest_column
    }

    /// Highest 1-based row holding a value (0 for an empty sheet).
    pub fn highest_row(&self) -> u32 {
        self.highest_row
    }

    /// Row numbers from the first row to the highest populated row.
    pub fn row_indices(&self) -> RangeInclusive<u32> {
        1..=self.highest_row
    }

    /// Whether the row is visible. Rows without a `<row>` element are visible.
    pub fn is_row_visible(&self, row: u32) -> bool {
        self.rows.get(&row).is_none_or(|r| !r.hidden)
    }

    /// Get a single cell value.
    pub fn cell(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|r| r.cells.get(&column))
    }

    /// Values of `row` for columns `1..=last_column`, missing cells as empty.
    pub fn row_values(&self, row: u32, last_column: u32) -> Vec<CellValue> {
        let cells = self.rows.get(&row).map(|r| &r.cells);
        (1..=last_column)
            .map(|column| {
                cells
                    .and_then(|c| c.get(&column))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect()
    }
}

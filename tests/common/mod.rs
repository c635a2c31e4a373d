//! Synthetic XLSX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Cell content for a fixture row.
#[derive(Clone, Copy)]
pub enum Fx<'s> {
    Text(&'s str),
    Num(f64),
    Shared(usize),
    Bool(bool),
    Blank,
}

impl<'s> From<&'s str> for Fx<'s> {
    fn from(value: &'s str) -> Self {
        if value.is_empty() {
            Fx::Blank
        } else {
            Fx::Text(value)
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn cell_xml(reference: &str, cell: Fx<'_>) -> String {
    match cell {
        Fx::Text(t) => format!(
            r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
            escape(t)
        ),
        Fx::Num(n) => format!(r#"<c r="{reference}"><v>{n}</v></c>"#),
        Fx::Shared(i) => format!(r#"<c r="{reference}" t="s"><v>{i}</v></c>"#),
        Fx::Bool(b) => format!(r#"<c r="{reference}" t="b"><v>{}</v></c>"#, u8::from(b)),
        Fx::Blank => String::new(),
    }
}

/// Worksheet XML under construction.
#[derive(Default)]
pub struct SheetXml {
    rows: Vec<String>,
}

impl SheetXml {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, r: u32, hidden: bool, cells: Vec<Fx<'_>>) -> Self {
        let body: String = cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| cell_xml(&format!("{}{}", sheetrows::column_label(i as u32 + 1), r), cell))
            .collect();
        let hidden = if hidden { r#" hidden="1""# } else { "" };
        self.rows
            .push(format!(r#"<row r="{r}"{hidden}>{body}</row>"#));
        self
    }

    /// Add a visible row of text cells (`""` leaves the cell out).
    pub fn row(self, r: u32, cells: &[&str]) -> Self {
        self.push(r, false, cells.iter().map(|c| Fx::from(*c)).collect())
    }

    /// Add a hidden row of text cells.
    pub fn hidden_row(self, r: u32, cells: &[&str]) -> Self {
        self.push(r, true, cells.iter().map(|c| Fx::from(*c)).collect())
    }

    /// Add a visible row of mixed cells.
    pub fn cells(self, r: u32, cells: &[Fx<'_>]) -> Self {
        self.push(r, false, cells.to_vec())
    }

    pub fn xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            self.rows.concat()
        )
    }
}

/// Build an XLSX package with the given sheets and shared strings.
pub fn xlsx_with_strings(sheets: &[(&str, SheetXml)], shared: &[&str]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    let overrides: String = (1..=sheets.len())
        .map(|i| format!(
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ))
        .collect();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  {overrides}
</Types>"#
        )
        .as_bytes(),
    )
    .unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    )
    .unwrap();

    let sheet_entries: String = sheets
        .iter()
        .enumerate()
        .map(|(i, (name, _))| {
            format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(name),
                i + 1,
                i + 1
            )
        })
        .collect();
    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>{sheet_entries}</sheets>
</workbook>"#
        )
        .as_bytes(),
    )
    .unwrap();

    let rels: String = (1..=sheets.len())
        .map(|i| format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        ))
        .collect();
    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        )
        .as_bytes(),
    )
    .unwrap();

    if !shared.is_empty() {
        let items: String = shared
            .iter()
            .map(|s| format!(r#"<si><t xml:space="preserve">{}</t></si>"#, escape(s)))
            .collect();
        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{items}</sst>"#
            )
            .as_bytes(),
        )
        .unwrap();
    }

    for (i, (_, sheet)) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
            .unwrap();
        zip.write_all(sheet.xml().as_bytes()).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// Build an XLSX package with the given sheets.
pub fn xlsx(sheets: &[(&str, SheetXml)]) -> Vec<u8> {
    xlsx_with_strings(sheets, &[])
}

/// Build a single-sheet XLSX package.
pub fn single_sheet(sheet: SheetXml) -> Vec<u8> {
    xlsx(&[("Sheet1", sheet)])
}

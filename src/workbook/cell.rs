//! Cell values and A1-style cell references.

use serde::Serialize;
use std::fmt;

/// The value of one worksheet cell, as stored in the file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No cell, or a cell without a value
    #[default]
    Empty,
    /// Shared, inline or formula string
    String(String),
    /// Numeric value (dates are serial numbers)
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Error literal such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Whether the cell holds no value at all.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Whether the value counts as blank for row filtering.
    ///
    /// Empty strings, `"0"`, zero and `false` are all falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty() || s == "0",
            CellValue::Number(n) => *n == 0.0,
            CellValue::Bool(b) => !b,
            CellValue::Error(_) => false,
        }
    }

    /// Text of the cell when it is used as a header title.
    ///
    /// Like [`Display`](fmt::Display), except booleans read `"1"` for true and
    /// nothing for false.
    pub fn to_title_text(&self) -> String {
        match self {
            CellValue::Bool(true) => "1".to_string(),
            CellValue::Bool(false) => String::new(),
            other => other.to_string(),
        }
    }

    /// Borrow the string content, if this is a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) | CellValue::Error(s) => f.write_str(s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Highest column a worksheet can address (`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Highest row a worksheet can address.
pub const MAX_ROWS: u32 = 1_048_576;

/// Native column label for a 1-based column index (1 → `A`, 27 → `AA`).
///
/// Index 0 has no label and yields an empty string.
pub fn column_label(index: u32) -> String {
    let mut n = index;
    let mut label = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        label.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// 1-based column index for a column label (`A` → 1, `AA` → 27).
pub fn column_index(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }
    label.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Split an A1 reference into 1-based `(column, row)`.
///
/// Absolute markers (`$B$12`) are accepted. References past `XFD1048576`
/// are rejected.
pub fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let reference = reference.replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    let column = column_index(letters)?;
    let row: u32 = digits.parse().ok()?;
    if !(1..=MAX_COLUMNS).contains(&column) || !(1..=MAX_ROWS).contains(&row) {
        return None;
    }
    Some((column, row))
}

//! Header text normalization.

use crate::workbook::column_label;
use once_cell::sync::Lazy;
use regex::Regex;

/// Anything outside word characters, `-`, `#` and space.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_#\- ]+").expect("title pattern is valid")
});

/// Characters removed from both ends of a title.
const TRIMMED: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Normalize one header cell into a column identifier.
///
/// Lowercases, trims, turns each `"  "` into `" "` and strips disallowed
/// characters. Only exact double spaces are collapsed: three spaces become
/// two.
pub fn normalize_title(raw: &str) -> String {
    let value = raw.to_lowercase();
    let value = value.trim_matches(TRIMMED).replace("  ", " ");
    DISALLOWED.replace_all(&value, "").into_owned()
}

/// Default column title callback.
///
/// Every title is normalized; a title that normalizes to nothing or to `"0"`
/// is replaced by its column label (`A`, `B`, ...), so each column keeps a
/// usable identifier.
pub fn clean_column_titles(titles: Vec<String>, _row: u32) -> Vec<String> {
    titles
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let value = normalize_title(&raw);
            if value.is_empty() || value == "0" {
                column_label(i as u32 + 1)
            } else {
                value
            }
        })
        .collect()
}

//! Row records: column identifier to cell value.

use crate::workbook::CellValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One data row keyed by column identifier.
///
/// Keys keep the order of their first insertion. Inserting an existing key
/// replaces its value in place, so columns that normalize to the same
/// identifier collapse to the rightmost value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    entries: Vec<(String, CellValue)>,
}

impl RowRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair titles with values position by position.
    ///
    /// The result is truncated to the shorter of the two sequences.
    pub fn from_pairs<I, V>(titles: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        titles
            .iter()
            .cloned()
            .zip(values.into_iter().map(Into::into))
            .collect()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Option<CellValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Get a value by column identifier.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a mutable value by column identifier.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut CellValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Remove a column, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<CellValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every value is falsy. An empty record is blank.
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|(_, v)| v.is_falsy())
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for RowRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = RowRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl IntoIterator for RowRecord {
    type Item = (String, CellValue);
    type IntoIter = std::vec::IntoIter<(String, CellValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

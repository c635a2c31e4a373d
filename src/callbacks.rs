//! Ordered callback chains for the two parser extension points.
//!
//! A chain threads one value through its callbacks: each callback receives
//! the value returned by the previous one (the first receives the input)
//! together with the spreadsheet row number, and the last return value is
//! handed back to whoever fired the chain.

use crate::record::RowRecord;
use std::fmt;

/// The extension points a [`CallbackRegistry`] dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Raw header text to column identifiers
    ColumnTitles,
    /// One parsed data row
    RowData,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ColumnTitles => f.write_str("column titles"),
            Event::RowData => f.write_str("row data"),
        }
    }
}

type Callback<'a, T> = Box<dyn FnMut(T, u32) -> T + 'a>;

/// Callbacks registered for one event, in registration order.
pub struct CallbackChain<'a, T> {
    callbacks: Vec<Callback<'a, T>>,
}

impl<'a, T> CallbackChain<'a, T> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Append a callback. Registering the same logic twice runs it twice.
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(T, u32) -> T + 'a,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Run every callback in order, threading `value` through them.
    ///
    /// Returns `None` when nothing is registered.
    pub fn fire(&mut self, value: T, row: u32) -> Option<T> {
        if self.callbacks.is_empty() {
            return None;
        }
        Some(
            self.callbacks
                .iter_mut()
                .fold(value, |value, callback| callback(value, row)),
        )
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Drop every registered callback.
    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl<T> Default for CallbackChain<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CallbackChain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackChain")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// One chain per [`Event`].
///
/// Firing an event that has no callbacks is not an error: a warning is
/// logged and `None` is returned so the caller can carry on.
#[derive(Debug, Default)]
pub struct CallbackRegistry<'a> {
    column_titles: CallbackChain<'a, Vec<String>>,
    row_data: CallbackChain<'a, RowRecord>,
}

impl<'a> CallbackRegistry<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header normalization step.
    pub fn on_column_titles<F>(&mut self, callback: F)
    where
        F: FnMut(Vec<String>, u32) -> Vec<String> + 'a,
    {
        self.column_titles.register(callback);
    }

    /// Resolve column identifiers from raw header text.
    pub fn fire_column_titles(&mut self, raw: Vec<String>, row: u32) -> Option<Vec<String>> {
        let titles = self.column_titles.fire(raw, row);
        if titles.is_none() {
            warn_unregistered(Event::ColumnTitles, row);
        }
        titles
    }

    /// Add a row consumer.
    pub fn on_row_data<F>(&mut self, callback: F)
    where
        F: FnMut(RowRecord, u32) -> RowRecord + 'a,
    {
        self.row_data.register(callback);
    }

    /// Hand a parsed row to the registered consumers.
    pub fn fire_row_data(&mut self, record: RowRecord, row: u32) -> Option<RowRecord> {
        let record = self.row_data.fire(record, row);
        if record.is_none() {
            warn_unregistered(Event::RowData, row);
        }
        record
    }

    /// Number of callbacks registered for `event`.
    pub fn callback_count(&self, event: Event) -> usize {
        match event {
            Event::ColumnTitles => self.column_titles.len(),
            Event::RowData => self.row_data.len(),
        }
    }

    /// Drop every callback registered for `event`.
    pub fn clear(&mut self, event: Event) {
        match event {
            Event::ColumnTitles => self.column_titles.clear(),
            Event::RowData => self.row_data.clear(),
        }
    }
}

fn warn_unregistered(event: Event, row: u32) {
    tracing::warn!(%event, row, "no callback registered for event");
}

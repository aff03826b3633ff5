// SPDX-License-Identifier: MPL-2.0
//! History ledger: applied edits plus a cursor for undo/redo.

use super::SessionError;
use crate::domain::editing::{Operation, OperationParams, PendingParameters};
use crate::media::ImageRef;

/// One successfully applied operation.
///
/// Entries are immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    image: ImageRef,
    operation: Operation,
    parameters: PendingParameters,
    params: OperationParams,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(
        image: ImageRef,
        operation: Operation,
        parameters: PendingParameters,
        params: OperationParams,
    ) -> Self {
        Self {
            image,
            operation,
            parameters,
            params,
        }
    }

    /// The derived image this edit produced.
    #[must_use]
    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    #[must_use]
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Adjustment values in effect when the request was sent.
    #[must_use]
    pub fn parameters(&self) -> &PendingParameters {
        &self.parameters
    }

    /// The exact payload that was sent.
    #[must_use]
    pub fn params(&self) -> &OperationParams {
        &self.params
    }
}

/// Ordered record of applied edits with a cursor.
///
/// `cursor` is `None` exactly when the ledger is empty; otherwise it indexes
/// an existing entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl HistoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry after the cursor, then pushes `entry` and moves the
    /// cursor onto it.
    pub fn append(&mut self, entry: HistoryEntry) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.entries.truncate(keep);
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Steps back one entry.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoHistory`] when the cursor is at the first
    /// entry or the ledger is empty.
    pub fn undo(&mut self) -> Result<&HistoryEntry, SessionError> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                Ok(&self.entries[cursor - 1])
            }
            _ => Err(SessionError::NoHistory),
        }
    }

    /// Steps forward one entry.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoHistory`] when the cursor is at the last
    /// entry or the ledger is empty.
    pub fn redo(&mut self) -> Result<&HistoryEntry, SessionError> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                Ok(&self.entries[cursor + 1])
            }
            _ => Err(SessionError::NoHistory),
        }
    }

    /// Clears all entries.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.cursor.and_then(|cursor| self.entries.get(cursor))
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor + 1 < self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::png_bytes;

    fn entry(operation: Operation) -> HistoryEntry {
        let image = ImageRef::derived(png_bytes(2, 2)).expect("fixture");
        let parameters = PendingParameters::default();
        let params = OperationParams::from_pending(&operation, &parameters).expect("params");
        HistoryEntry::new(image, operation, parameters, params)
    }

    fn operations(ledger: &HistoryLedger) -> Vec<Operation> {
        ledger
            .entries()
            .iter()
            .map(|e| e.operation().clone())
            .collect()
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = HistoryLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.cursor(), None);
        assert!(ledger.current().is_none());
        assert!(!ledger.can_undo());
        assert!(!ledger.can_redo());
    }

    #[test]
    fn append_moves_cursor_to_last_entry() {
        let mut ledger = HistoryLedger::new();
        for (i, op) in [Operation::Gray, Operation::Negative, Operation::Equalize]
            .into_iter()
            .enumerate()
        {
            ledger.append(entry(op));
            assert_eq!(ledger.len(), i + 1);
            assert_eq!(ledger.cursor(), Some(i));
        }
    }

    #[test]
    fn undo_stops_at_first_entry() {
        let mut ledger = HistoryLedger::new();
        assert_eq!(ledger.undo().unwrap_err(), SessionError::NoHistory);

        ledger.append(entry(Operation::Gray));
        assert_eq!(ledger.undo().unwrap_err(), SessionError::NoHistory);

        ledger.append(entry(Operation::Negative));
        assert_eq!(ledger.undo().unwrap().operation(), &Operation::Gray);
        assert_eq!(ledger.cursor(), Some(0));
        assert_eq!(ledger.undo().unwrap_err(), SessionError::NoHistory);
    }

    #[test]
    fn redo_stops_at_last_entry() {
        let mut ledger = HistoryLedger::new();
        assert_eq!(ledger.redo().unwrap_err(), SessionError::NoHistory);

        ledger.append(entry(Operation::Gray));
        ledger.append(entry(Operation::Negative));
        assert_eq!(ledger.redo().unwrap_err(), SessionError::NoHistory);

        ledger.undo().unwrap();
        assert!(ledger.can_redo());
        assert_eq!(ledger.redo().unwrap().operation(), &Operation::Negative);
        assert!(!ledger.can_redo());
    }

    #[test]
    fn undo_then_redo_restores_cursor_and_entries() {
        let mut ledger = HistoryLedger::new();
        ledger.append(entry(Operation::Gray));
        ledger.append(entry(Operation::Negative));
        ledger.append(entry(Operation::Equalize));
        let before = ledger.clone();

        ledger.undo().unwrap();
        ledger.redo().unwrap();
        assert_eq!(ledger, before);

        ledger.undo().unwrap();
        let middle = ledger.clone();
        ledger.redo().unwrap();
        ledger.undo().unwrap();
        assert_eq!(ledger, middle);
    }

    #[test]
    fn append_after_undo_truncates_redo_branch() {
        let mut ledger = HistoryLedger::new();
        ledger.append(entry(Operation::Gray));
        ledger.append(entry(Operation::Negative));
        ledger.append(entry(Operation::Equalize));

        ledger.undo().unwrap();
        ledger.append(entry(Operation::Rotate));

        assert_eq!(
            operations(&ledger),
            vec![Operation::Gray, Operation::Negative, Operation::Rotate]
        );
        assert_eq!(ledger.cursor(), Some(2));
        assert!(!ledger.can_redo());
    }

    #[test]
    fn reset_clears_everything() {
        let mut ledger = HistoryLedger::new();
        ledger.append(entry(Operation::Gray));
        ledger.append(entry(Operation::Negative));
        ledger.reset();

        assert!(ledger.is_empty());
        assert_eq!(ledger.cursor(), None);
        assert!(ledger.current().is_none());
    }

    #[test]
    fn current_tracks_cursor() {
        let mut ledger = HistoryLedger::new();
        ledger.append(entry(Operation::Gray));
        ledger.append(entry(Operation::Negative));
        assert_eq!(
            ledger.current().map(HistoryEntry::operation),
            Some(&Operation::Negative)
        );
        ledger.undo().unwrap();
        assert_eq!(
            ledger.current().map(HistoryEntry::operation),
            Some(&Operation::Gray)
        );
    }
}

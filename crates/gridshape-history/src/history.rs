//! Undo/redo stacks of applied operations.
//!
//! Each entry holds exactly one stored table state: while the entry is on the
//! undo stack it is the state *before* the operation, while it is on the redo
//! stack it is the state *after*. Undo and redo both apply the stored state and
//! keep whatever it displaced.

use std::collections::VecDeque;

use gridshape_core::change::MassChange;
use gridshape_core::id::HistoryEntryId;
use gridshape_core::manifest::EntryManifest;

/// Default number of undoable entries.
pub const MAX_HISTORY_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    /// Human-readable description (e.g. "Transpose cells in 3 column(s) ...").
    pub description: String,
    /// Parameter record of the operation, as it would be persisted.
    pub operation: serde_json::Value,
    pub manifest: EntryManifest,
    pub(crate) saved: MassChange,
}

impl HistoryEntry {
    pub fn new(
        id: HistoryEntryId,
        description: String,
        operation: serde_json::Value,
        manifest: EntryManifest,
        saved: MassChange,
    ) -> Self {
        Self {
            id,
            description,
            operation,
            manifest,
            saved,
        }
    }
}

#[derive(Debug)]
pub struct History {
    /// Applied entries (most recent at back)
    undo_stack: VecDeque<HistoryEntry>,
    /// Undone entries (most recent at back)
    redo_stack: VecDeque<HistoryEntry>,
    next_id: u64,
    max_size: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_size(MAX_HISTORY_SIZE)
    }

    pub fn with_max_size(max_size: usize) -> Self {
        History {
            undo_stack: VecDeque::with_capacity(max_size.min(MAX_HISTORY_SIZE)),
            redo_stack: VecDeque::new(),
            next_id: 1,
            max_size,
        }
    }

    /// Allocate the id for the next recorded entry. Ids are never reused.
    pub fn next_id(&mut self) -> HistoryEntryId {
        let id = HistoryEntryId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record a newly applied entry. Clears the redo stack.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.redo_stack.clear();
        self.push_undo(entry);
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        if self.max_size == 0 {
            return;
        }
        while self.undo_stack.len() >= self.max_size {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(entry);
    }

    pub(crate) fn pop_undo(&mut self) -> Option<HistoryEntry> {
        self.undo_stack.pop_back()
    }

    pub(crate) fn push_redo(&mut self, entry: HistoryEntry) {
        self.redo_stack.push_back(entry);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<HistoryEntry> {
        self.redo_stack.pop_back()
    }

    /// Put a redone entry back without clearing the rest of the redo stack.
    pub(crate) fn push_undo_for_redo(&mut self, entry: HistoryEntry) {
        self.push_undo(entry);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(|e| e.description.as_str())
    }

    /// Applied entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    pub fn manifests(&self) -> impl Iterator<Item = &EntryManifest> {
        self.undo_stack.iter().map(|e| &e.manifest)
    }

    /// (undo, redo) stack sizes.
    pub fn stack_sizes(&self) -> (usize, usize) {
        (self.undo_stack.len(), self.redo_stack.len())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

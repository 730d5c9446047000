//! # Undo/Redo Stack
//!
//! Snapshot history around document mutations.
//!
//! ## Design
//!
//! - Every mutation is bracketed by a snapshot of the whole document taken
//!   just before it runs
//! - Starting a mutation on an open document invalidates the redo stack,
//!   whether or not the mutation succeeds
//! - A failed mutation adds no undo entry
//! - Composite mutations are rolled back from that snapshot on failure
//! - Undo restores the newest snapshot and keeps the replaced state for redo
//! - New mutations clear the redo stack
//! - When a restore fails the popped entry is dropped, not requeued
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut store = MemoryStore::with_pages(PageSet::labeled(["A", "B"]));
//!
//! stack.perform(&mut store, &Mutation::DeletePage { index: 0 })?;
//! stack.undo(&mut store)?;
//! stack.redo(&mut store)?;
//! ```

use crate::{Mutation, MutationError};
use folio_store::{DocumentStore, Snapshot, StoreError};
use tracing::{debug, warn};

/// One step of history: the document as it was, and what changed it
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,

    /// Label of the mutation this entry reverts (undo) or reapplies (redo)
    pub description: Option<String>,
}

/// Undo/redo stack for one document
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots taken before each applied mutation (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Snapshots replaced by undo (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn perform<S: DocumentStore + ?Sized>(
        &mut self,
        store: &mut S,
        mutation: &Mutation,
    ) -> Result<(), MutationError> {
        self.transaction(store, mutation.description(), mutation.is_composite(), |store| {
            mutation.apply(store)
        })
    }

    /// Run `f` against the store as one undoable step.
    ///
    /// Redo history is discarded before `f` runs. When no snapshot can be
    /// taken (nothing open) `f` still runs, but nothing is recorded. With `rollback` set, a failing `f` is reverted
    /// from the snapshot before the error is returned.
    pub fn transaction<S, F, T, E>(
        &mut self,
        store: &mut S,
        description: impl Into<String>,
        rollback: bool,
        f: F,
    ) -> Result<T, E>
    where
        S: DocumentStore + ?Sized,
        F: FnOnce(&mut S) -> Result<T, E>,
    {
        let before = store.snapshot();
        if before.is_some() {
            self.redo_stack.clear();
        }

        match f(store) {
            Ok(value) => {
                if let Some(snapshot) = before {
                    self.push(HistoryEntry {
                        snapshot,
                        description: Some(description.into()),
                    });
                }
                Ok(value)
            }
            Err(err) => {
                if let (true, Some(snapshot)) = (rollback, before.as_ref()) {
                    if let Err(restore_err) = store.restore(snapshot) {
                        warn!("Rollback failed: {}", restore_err);
                    }
                }
                Err(err)
            }
        }
    }

    /// Push an entry to the undo stack
    fn push(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
    }

    /// Undo the most recent mutation
    pub fn undo<S: DocumentStore + ?Sized>(&mut self, store: &mut S) -> Result<bool, StoreError> {
        Self::step(store, &mut self.undo_stack, &mut self.redo_stack)
    }

    /// Redo the most recently undone mutation
    pub fn redo<S: DocumentStore + ?Sized>(&mut self, store: &mut S) -> Result<bool, StoreError> {
        Self::step(store, &mut self.redo_stack, &mut self.undo_stack)
    }

    fn step<S: DocumentStore + ?Sized>(
        store: &mut S,
        from: &mut Vec<HistoryEntry>,
        to: &mut Vec<HistoryEntry>,
    ) -> Result<bool, StoreError> {
        if from.is_empty() || !store.is_open() {
            return Ok(false);
        }
        let Some(current) = store.snapshot() else {
            return Ok(false);
        };
        let Some(entry) = from.pop() else {
            return Ok(false);
        };

        store.restore(&entry.snapshot)?;
        debug!(
            "Restored {:?} ({})",
            entry.description.as_deref().unwrap_or("unnamed"),
            entry.snapshot.len()
        );

        to.push(HistoryEntry {
            snapshot: current,
            description: entry.description,
        });
        Ok(true)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

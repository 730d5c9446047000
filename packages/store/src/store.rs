//! # Document Store
//!
//! The page-level primitives the editor drives. A store owns exactly one
//! open document (or none) and never holds UI state.
//!
//! ## Contract
//!
//! - Every mutating primitive validates its arguments before touching the
//!   document, so a failed call leaves the store unmodified
//! - A successful mutation marks the document dirty
//! - `open` and `save` leave the document clean, `restore` leaves it dirty
//! - Page indices are positions, not identities: any mutation may renumber

use crate::{Snapshot, StoreResult};
use std::path::Path;

pub trait DocumentStore {
    /// Whether a document is currently open
    fn is_open(&self) -> bool;

    /// Whether the open document has unsaved changes
    fn is_dirty(&self) -> bool;

    /// Number of pages (0 when nothing is open)
    fn page_count(&self) -> usize;

    /// File extension (without the dot) of documents this store reads
    fn file_extension(&self) -> &str;

    /// Open a document, replacing the current one
    fn open(&mut self, path: &Path) -> StoreResult<()>;

    /// Close the current document (no-op when nothing is open)
    fn close(&mut self);

    /// Write the open document to `path`
    fn save(&mut self, path: &Path) -> StoreResult<()>;

    fn delete_page(&mut self, index: usize) -> StoreResult<()>;

    /// Add `delta` degrees to the page rotation, modulo 360
    fn rotate_page_by(&mut self, index: usize, delta: i32) -> StoreResult<()>;

    /// Move page `from` to sit immediately before the page currently at `to`
    fn move_page(&mut self, from: usize, to: usize) -> StoreResult<()>;

    /// Rebuild the document in `order`, which must be a permutation of the pages
    fn reorder_pages(&mut self, order: &[usize]) -> StoreResult<()>;

    /// Keep only the listed pages, in the listed order
    fn keep_only_pages(&mut self, indices: &[usize]) -> StoreResult<()>;

    /// Insert every page of the document at `path` before position `index`
    fn insert_document_at(&mut self, path: &Path, index: usize) -> StoreResult<()>;

    /// Append every page of the document at `path`
    fn insert_document(&mut self, path: &Path) -> StoreResult<()> {
        let end = self.page_count();
        self.insert_document_at(path, end)
    }

    /// Write the listed pages, in order, to a new document at `destination`
    fn export_pages(&self, indices: &[usize], destination: &Path) -> StoreResult<()>;

    /// Serialize the whole document, or `None` when nothing is open
    fn snapshot(&self) -> Option<Snapshot>;

    /// Replace the document with a previously captured snapshot
    fn restore(&mut self, snapshot: &Snapshot) -> StoreResult<()>;
}

/// Check that `order` holds every index in `[0, count)` exactly once.
pub fn is_permutation(order: &[usize], count: usize) -> bool {
    if order.len() != count {
        return false;
    }

    let mut seen = vec![false; count];
    for &index in order {
        match seen.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

//! # Page-list store
//!
//! A `DocumentStore` that keeps an ordered list of pages in memory and
//! persists it as a JSON `.folio` file:
//!
//! ```json
//! { "pages": [ { "label": "Cover", "rotation": 0 }, { "label": "p1", "rotation": 90 } ] }
//! ```
//!
//! Pages carry no content, only a label and a rotation, which is all the
//! editor needs to observe reordering, rotation and deletion.

use crate::{is_permutation, DocumentStore, Snapshot, StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const FOLIO_EXTENSION: &str = "folio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub label: String,

    /// Clockwise rotation in degrees, always in `[0, 360)`
    #[serde(default)]
    pub rotation: u16,
}

impl Page {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            rotation: 0,
        }
    }
}

/// The persisted document: an ordered list of pages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSet {
    pub pages: Vec<Page>,
}

impl PageSet {
    pub fn labeled<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            pages: labels.into_iter().map(Page::new).collect(),
        }
    }

    pub fn load(path: &Path) -> StoreResult<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn write(&self, path: &Path) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: Option<PageSet>,
    dirty: bool,
}

impl MemoryStore {
    /// Create a store with nothing open
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `pages` already open and clean
    pub fn with_pages(pages: PageSet) -> Self {
        Self {
            doc: Some(pages),
            dirty: false,
        }
    }

    /// Pages of the open document (empty when nothing is open)
    pub fn pages(&self) -> &[Page] {
        self.doc.as_ref().map(|doc| doc.pages.as_slice()).unwrap_or(&[])
    }

    pub fn labels(&self) -> Vec<&str> {
        self.pages().iter().map(|page| page.label.as_str()).collect()
    }

    fn doc(&self) -> StoreResult<&PageSet> {
        self.doc.as_ref().ok_or(StoreError::NotOpen)
    }

    fn doc_mut(&mut self) -> StoreResult<&mut PageSet> {
        self.doc.as_mut().ok_or(StoreError::NotOpen)
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        let count = self.doc()?.pages.len();
        if index < count {
            Ok(())
        } else {
            Err(StoreError::InvalidIndex { index, count })
        }
    }

    fn touched(&mut self) -> StoreResult<()> {
        self.dirty = true;
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn is_open(&self) -> bool {
        self.doc.is_some()
    }

    fn is_dirty(&self) -> bool {
        self.doc.is_some() && self.dirty
    }

    fn page_count(&self) -> usize {
        self.pages().len()
    }

    fn file_extension(&self) -> &str {
        FOLIO_EXTENSION
    }

    fn open(&mut self, path: &Path) -> StoreResult<()> {
        let pages = PageSet::load(path)?;
        debug!("Opened {} ({} pages)", path.display(), pages.pages.len());
        self.doc = Some(pages);
        self.dirty = false;
        Ok(())
    }

    fn close(&mut self) {
        self.doc = None;
        self.dirty = false;
    }

    fn save(&mut self, path: &Path) -> StoreResult<()> {
        self.doc()?.write(path)?;
        self.dirty = false;
        Ok(())
    }

    fn delete_page(&mut self, index: usize) -> StoreResult<()> {
        self.check_index(index)?;
        self.doc_mut()?.pages.remove(index);
        self.touched()
    }

    fn rotate_page_by(&mut self, index: usize, delta: i32) -> StoreResult<()> {
        self.check_index(index)?;
        let page = &mut self.doc_mut()?.pages[index];
        page.rotation = (i32::from(page.rotation) + delta).rem_euclid(360) as u16;
        self.touched()
    }

    fn move_page(&mut self, from: usize, to: usize) -> StoreResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let pages = &mut self.doc_mut()?.pages;
        let page = pages.remove(from);
        let slot = if to > from { to - 1 } else { to };
        pages.insert(slot, page);
        self.touched()
    }

    fn reorder_pages(&mut self, order: &[usize]) -> StoreResult<()> {
        let count = self.doc()?.pages.len();
        if !is_permutation(order, count) {
            return Err(StoreError::InvalidOrder(format!(
                "{:?} is not a permutation of {} pages",
                order, count
            )));
        }

        let doc = self.doc_mut()?;
        let reordered = order.iter().map(|&index| doc.pages[index].clone()).collect();
        doc.pages = reordered;
        self.touched()
    }

    fn keep_only_pages(&mut self, indices: &[usize]) -> StoreResult<()> {
        let count = self.doc()?.pages.len();
        let mut seen = HashSet::new();
        let kept: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| index < count && seen.insert(index))
            .collect();

        if kept.is_empty() {
            return Err(StoreError::NoPages("keep"));
        }

        let doc = self.doc_mut()?;
        let pages = kept.iter().map(|&index| doc.pages[index].clone()).collect();
        doc.pages = pages;
        self.touched()
    }

    fn insert_document_at(&mut self, path: &Path, index: usize) -> StoreResult<()> {
        let count = self.doc()?.pages.len();
        if index > count {
            return Err(StoreError::InvalidIndex { index, count });
        }

        let incoming = PageSet::load(path)?;
        debug!(
            "Inserting {} pages from {} at {}",
            incoming.pages.len(),
            path.display(),
            index
        );
        let pages = &mut self.doc_mut()?.pages;
        pages.splice(index..index, incoming.pages);
        self.touched()
    }

    fn export_pages(&self, indices: &[usize], destination: &Path) -> StoreResult<()> {
        if indices.is_empty() {
            return Err(StoreError::NoPages("export"));
        }
        for &index in indices {
            self.check_index(index)?;
        }

        let doc = self.doc()?;
        let exported = PageSet {
            pages: indices.iter().map(|&index| doc.pages[index].clone()).collect(),
        };
        exported.write(destination)
    }

    fn snapshot(&self) -> Option<Snapshot> {
        let doc = self.doc.as_ref()?;
        serde_json::to_vec(doc).ok().map(Snapshot::from_bytes)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> StoreResult<()> {
        let pages: PageSet = serde_json::from_slice(snapshot.as_bytes())?;
        self.doc = Some(pages);
        self.dirty = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(labels: &[&str]) -> MemoryStore {
        MemoryStore::with_pages(PageSet::labeled(labels.iter().copied()))
    }

    #[test]
    fn test_closed_store_rejects_mutations() {
        let mut store = MemoryStore::new();
        assert!(!store.is_open());
        assert_eq!(store.page_count(), 0);
        assert!(store.snapshot().is_none());
        assert!(matches!(store.delete_page(0), Err(StoreError::NotOpen)));
        assert!(matches!(store.reorder_pages(&[]), Err(StoreError::NotOpen)));
    }

    #[test]
    fn test_rotation_wraps_modulo_360() {
        let mut store = store(&["A", "B"]);
        store.rotate_page_by(1, 270).unwrap();
        store.rotate_page_by(1, 180).unwrap();
        assert_eq!(store.pages()[1].rotation, 90);

        store.rotate_page_by(0, -90).unwrap();
        assert_eq!(store.pages()[0].rotation, 270);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_move_page_forward_lands_before_target() {
        let mut store = store(&["A", "B", "C", "D"]);
        store.move_page(0, 3).unwrap();
        assert_eq!(store.labels(), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_move_page_backward() {
        let mut store = store(&["A", "B", "C", "D"]);
        store.move_page(3, 1).unwrap();
        assert_eq!(store.labels(), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_move_page_rejects_out_of_range() {
        let mut store = store(&["A", "B"]);
        let err = store.move_page(0, 2).unwrap_err();
        assert!(matches!(err, StoreError::InvalidIndex { index: 2, count: 2 }));
        assert_eq!(store.labels(), vec!["A", "B"]);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_reorder_rejects_non_permutation() {
        let mut store = store(&["A", "B", "C"]);
        assert!(store.reorder_pages(&[0, 0, 1]).is_err());
        assert!(store.reorder_pages(&[0, 1]).is_err());
        assert_eq!(store.labels(), vec!["A", "B", "C"]);

        store.reorder_pages(&[2, 0, 1]).unwrap();
        assert_eq!(store.labels(), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_keep_only_dedupes_and_filters() {
        let mut store = store(&["A", "B", "C", "D"]);
        store.keep_only_pages(&[3, 1, 3, 9]).unwrap();
        assert_eq!(store.labels(), vec!["D", "B"]);

        let err = store.keep_only_pages(&[7, 8]).unwrap_err();
        assert!(matches!(err, StoreError::NoPages(_)));
        assert_eq!(store.labels(), vec!["D", "B"]);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut store = store(&["A", "B", "C"]);
        let before = store.snapshot().unwrap();

        store.delete_page(1).unwrap();
        assert_ne!(store.snapshot().unwrap(), before);

        store.restore(&before).unwrap();
        assert_eq!(store.snapshot().unwrap(), before);
        assert_eq!(store.labels(), vec!["A", "B", "C"]);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_restore_rejects_garbage() {
        let mut store = store(&["A"]);
        let err = store.restore(&Snapshot::from_bytes(b"not json".to_vec()));
        assert!(matches!(err, Err(StoreError::Format(_))));
        assert_eq!(store.labels(), vec!["A"]);
    }

    #[test]
    fn test_export_requires_pages() {
        let store = store(&["A"]);
        let err = store
            .export_pages(&[], Path::new("unused.folio"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NoPages(_)));
    }
}

//! # Folio Store
//!
//! The document side of Folio: the page-level primitives the editor calls,
//! and a page-list store that implements them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ editor: selection, drag, reorder, history   │
//! └─────────────────────────────────────────────┘
//!                     ↓  DocumentStore
//! ┌─────────────────────────────────────────────┐
//! │ store: one open document                    │
//! │  - open / save / close                      │
//! │  - delete / rotate / move / reorder / keep  │
//! │  - insert / export                          │
//! │  - snapshot / restore (undo history)        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The editor never reads page content, only counts and indices, so any
//! backend that can honor the `DocumentStore` contract plugs in.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_store::{DocumentStore, MemoryStore, PageSet, StoreError};
//!
//! let mut store = MemoryStore::with_pages(PageSet::labeled(["A", "B", "C"]));
//! let before = store.snapshot().ok_or(StoreError::NotOpen)?;
//! store.reorder_pages(&[2, 0, 1])?;
//! store.restore(&before)?;
//! ```

mod errors;
mod memory;
mod snapshot;
mod store;

pub use errors::{StoreError, StoreResult};
pub use memory::{MemoryStore, Page, PageSet, FOLIO_EXTENSION};
pub use snapshot::Snapshot;
pub use store::{is_permutation, DocumentStore};

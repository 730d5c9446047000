//! # Page Mutations
//!
//! Structural operations on a document, expressed as values so they can be
//! validated, described, logged and replayed before touching the store.
//!
//! ## Design Principles
//!
//! 1. **Validated first**: indices and permutations are checked against the
//!    current page count before any store primitive runs
//! 2. **Atomic**: single-primitive mutations rely on the store leaving itself
//!    unmodified on failure; composite mutations are rolled back by the
//!    undo stack from the snapshot taken before them
//! 3. **Positional**: indices refer to the order at the time of application
//!
//! ## Mutation Semantics
//!
//! ### MovePage
//! - Remove-then-insert: the page lands before the page currently at `to`
//!
//! ### Reorder
//! - `order` must mention every current page exactly once
//!
//! ### InsertDocuments
//! - Documents land in list order starting at `index`; each one advances the
//!   insertion cursor by the number of pages it actually added

use folio_store::{is_permutation, DocumentStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    /// Remove one page
    DeletePage { index: usize },

    /// Add `degrees` to the rotation of every listed page
    RotatePages { indices: Vec<usize>, degrees: i32 },

    /// Move a single page (remove-then-insert)
    MovePage { from: usize, to: usize },

    /// Rebuild the document in a new order
    Reorder { order: Vec<usize> },

    /// Keep only the listed pages
    KeepOnly { indices: Vec<usize> },

    /// Insert whole documents at a position
    InsertDocuments { paths: Vec<PathBuf>, index: usize },

    /// Append a whole document
    AppendDocument { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("Invalid page index {index} (document has {count} pages)")]
    InvalidIndex { index: usize, count: usize },

    #[error("Invalid page order {0:?}")]
    InvalidOrder(Vec<usize>),

    #[error("Nothing to {0}")]
    Empty(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Mutation {
    /// Check indices against a document of `count` pages
    pub fn validate(&self, count: usize) -> Result<(), MutationError> {
        let check = |index: usize| {
            if index < count {
                Ok(())
            } else {
                Err(MutationError::InvalidIndex { index, count })
            }
        };

        match self {
            Mutation::DeletePage { index } => check(*index),

            Mutation::RotatePages { indices, .. } => {
                if indices.is_empty() {
                    return Err(MutationError::Empty("rotate"));
                }
                indices.iter().try_for_each(|&index| check(index))
            }

            Mutation::MovePage { from, to } => {
                check(*from)?;
                check(*to)
            }

            Mutation::Reorder { order } => {
                if is_permutation(order, count) {
                    Ok(())
                } else {
                    Err(MutationError::InvalidOrder(order.clone()))
                }
            }

            Mutation::KeepOnly { indices } => {
                if indices.is_empty() {
                    return Err(MutationError::Empty("keep"));
                }
                indices.iter().try_for_each(|&index| check(index))
            }

            Mutation::InsertDocuments { paths, index } => {
                if paths.is_empty() {
                    return Err(MutationError::Empty("insert"));
                }
                if *index > count {
                    return Err(MutationError::InvalidIndex {
                        index: *index,
                        count,
                    });
                }
                Ok(())
            }

            Mutation::AppendDocument { .. } => Ok(()),
        }
    }

    /// Apply to the store with validation
    pub fn apply<S: DocumentStore + ?Sized>(&self, store: &mut S) -> Result<(), MutationError> {
        self.validate(store.page_count())?;

        match self {
            Mutation::DeletePage { index } => store.delete_page(*index)?,

            Mutation::RotatePages { indices, degrees } => {
                for &index in indices {
                    store.rotate_page_by(index, *degrees)?;
                }
            }

            Mutation::MovePage { from, to } => store.move_page(*from, *to)?,

            Mutation::Reorder { order } => store.reorder_pages(order)?,

            Mutation::KeepOnly { indices } => store.keep_only_pages(indices)?,

            Mutation::InsertDocuments { paths, index } => {
                let mut cursor = *index;
                for path in paths {
                    let before = store.page_count();
                    store.insert_document_at(path, cursor)?;
                    cursor += store.page_count().saturating_sub(before);
                }
            }

            Mutation::AppendDocument { path } => store.insert_document(path)?,
        }

        Ok(())
    }

    /// Whether this mutation issues more than one store primitive
    pub fn is_composite(&self) -> bool {
        match self {
            Mutation::RotatePages { indices, .. } => indices.len() > 1,
            Mutation::InsertDocuments { paths, .. } => paths.len() > 1,
            _ => false,
        }
    }

    /// Human-readable label, used for history entries
    pub fn description(&self) -> String {
        match self {
            Mutation::DeletePage { index } => format!("Delete page {}", index + 1),
            Mutation::RotatePages { indices, degrees } if indices.len() == 1 => {
                format!("Rotate page {} by {}°", indices[0] + 1, degrees)
            }
            Mutation::RotatePages { indices, degrees } => {
                format!("Rotate {} pages by {}°", indices.len(), degrees)
            }
            Mutation::MovePage { from, to } => format!("Move page {} to {}", from + 1, to + 1),
            Mutation::Reorder { .. } => "Reorder pages".to_string(),
            Mutation::KeepOnly { indices } => format!("Keep {} pages", indices.len()),
            Mutation::InsertDocuments { paths, .. } if paths.len() == 1 => {
                format!("Insert {}", file_label(&paths[0]))
            }
            Mutation::InsertDocuments { paths, .. } => format!("Insert {} documents", paths.len()),
            Mutation::AppendDocument { path } => format!("Merge {}", file_label(path)),
        }
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Store error: {0}")]
    Store(#[from] folio_store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No document is open")]
    NoDocument,

    #[error("No file path to save to")]
    NoPath,

    #[error("Current document has unsaved changes")]
    UnsavedChanges,
}

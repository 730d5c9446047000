//! Error types for document stores

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No document is open")]
    NotOpen,

    #[error("Invalid page index {index} (document has {count} pages)")]
    InvalidIndex { index: usize, count: usize },

    #[error("Invalid page order: {0}")]
    InvalidOrder(String),

    #[error("No pages left to {0}")]
    NoPages(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Format(#[from] serde_json::Error),
}

use thiserror::Error;

/// Failures reported by a record store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Uniqueness constraint on `email` rejected the write.
    #[error("duplicate key")]
    DuplicateKey,
    #[error("record not found")]
    NotFound,
    #[error("store backend error: {0}")]
    Backend(String),
}

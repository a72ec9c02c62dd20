//! Error types for the local store.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A persisted snapshot is not a flat object of strings.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

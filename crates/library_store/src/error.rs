//! Library store error types.

use thiserror::Error;

/// Errors that can occur during library store operations.
#[derive(Debug, Error)]
pub enum LibraryStoreError {
    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Duplicate entity.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back into an entity.
    #[error("Corrupt {entity_type} row: {reason}")]
    CorruptRow {
        entity_type: &'static str,
        reason: String,
    },

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl LibraryStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an already exists error.
    pub fn already_exists(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a corrupt row error.
    pub fn corrupt_row(entity_type: &'static str, reason: impl Into<String>) -> Self {
        Self::CorruptRow {
            entity_type,
            reason: reason.into(),
        }
    }

    /// Returns true if this error reports a uniqueness conflict.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Result type for library store operations.
pub type StoreResult<T> = Result<T, LibraryStoreError>;

//! Store error types.

use thiserror::Error;

/// Fixture store errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No collection loaded under this name
    #[error("Collection '{collection}' not found")]
    CollectionNotFound { collection: String },

    /// No record with this id in the collection
    #[error("Record {id} not found in collection '{collection}'")]
    RecordNotFound { collection: String, id: u64 },

    /// Record payload is not usable (missing id, not an object, ...)
    #[error("Invalid record in collection '{collection}': {reason}")]
    InvalidRecord { collection: String, reason: String },

    /// Highest id already in use, no id left to assign
    #[error("Collection '{collection}' has no ids left to assign")]
    IdExhausted { collection: String },

    /// Bulk load payload has the wrong shape
    #[error("Invalid fixture data: {0}")]
    InvalidData(String),

    /// Lock poisoned (RwLock poisoned)
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Returns true for lookups that missed (collection or record).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::CollectionNotFound { .. } | StoreError::RecordNotFound { .. }
        )
    }
}
